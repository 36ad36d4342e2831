//! Force-directed graph layout.
//!
//! Computes 2D positions for graph vertices by simulating physical forces:
//! repulsion between every pair of vertices, spring attraction along edges,
//! and a pull toward a fixed origin. Repulsion can run through a Barnes-Hut
//! quadtree, dropping the per-iteration cost from O(n²) to roughly
//! O(n log n).
//!
//! ```
//! use torpedo::graphlib::Graph;
//! use torpedo::{ForceLayout, LayoutConfig, spiral_positions};
//!
//! let mut graph: Graph<()> = Graph::new();
//! graph.set_path(&["a", "b", "c"]);
//! graph.set_edge("a", "c");
//!
//! let seeds = spiral_positions(&graph, 30.0);
//! let mut layout = ForceLayout::new(&graph, seeds, [], LayoutConfig::default()).unwrap();
//! let report = layout.run();
//! assert!(report.iterations > 0);
//! for (id, position) in layout.positions() {
//!     println!("{id}: ({}, {})", position.x, position.y);
//! }
//! ```

#![forbid(unsafe_code)]

pub use torpedo_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod barnes_hut;
pub mod config;
pub mod error;
pub mod force;
pub mod geom;
pub mod layout;
pub mod point;
pub mod quadtree;

pub use barnes_hut::BarnesHutRepulsion;
pub use config::{LayoutConfig, RepulsionModel};
pub use error::{Error, Result};
pub use force::{CenterModel, Force};
pub use geom::{BoundingBox, Position, Vector};
pub use layout::{ForceLayout, RunReport, Snapshot, spiral_positions};
pub use point::{Point, PointStore};
pub use quadtree::Quadtree;
