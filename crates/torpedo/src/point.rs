//! Per-vertex simulation state and the arena that owns it.

use crate::error::{Error, Result};
use crate::geom::Position;
use rustc_hash::FxHashMap;
use torpedo_graphlib::Graph;

/// Simulation state for one graph vertex.
///
/// Positions are written by the integrator only; everything else is auxiliary
/// state a force may prime during its `init` phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    position: Position,
    mass: f64,
    vertex_degree: usize,
    fixed: bool,
}

impl Point {
    /// Mass a point carries until a force assigns one explicitly. The
    /// quadtree reads a barycenter still holding this value as "a single real
    /// point that was never aggregated" and stops descending there.
    pub const DEFAULT_MASS: f64 = 1.0;

    pub fn new(position: Position) -> Self {
        Self {
            position,
            mass: Self::DEFAULT_MASS,
            vertex_degree: 0,
            fixed: false,
        }
    }

    /// A point that never moves but still acts as a force source.
    pub fn fixed(position: Position) -> Self {
        Self {
            fixed: true,
            ..Self::new(position)
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        debug_assert!(mass >= 0.0, "point mass must be non-negative");
        self.mass = mass;
    }

    pub fn vertex_degree(&self) -> usize {
        self.vertex_degree
    }

    pub fn set_vertex_degree(&mut self, degree: usize) {
        self.vertex_degree = degree;
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }
}

/// Insertion-ordered arena of every simulation point, moving and fixed.
///
/// Points are stored in graph node order, which fixes the deterministic
/// iteration order of the whole simulation. The arena is the exclusively
/// owned mutable half of the engine; forces only ever see it behind a shared
/// borrow.
#[derive(Debug, Clone)]
pub struct PointStore {
    ids: Vec<String>,
    points: Vec<Point>,
    index: FxHashMap<String, usize>,
}

impl PointStore {
    /// Builds the arena from the two disjoint position partitions.
    ///
    /// Every graph vertex must appear in exactly one partition, and every
    /// supplied position must name a graph vertex; any violation is a fatal
    /// construction error and the engine never runs on a partial point set.
    pub fn from_partitions<N>(
        graph: &Graph<N>,
        moving: impl IntoIterator<Item = (String, Position)>,
        fixed: impl IntoIterator<Item = (String, Position)>,
    ) -> Result<Self>
    where
        N: Default + 'static,
    {
        let mut moving_by_id: FxHashMap<String, Position> = FxHashMap::default();
        for (id, position) in moving {
            if !graph.has_node(&id) {
                return Err(Error::UnknownVertex { id });
            }
            moving_by_id.insert(id, position);
        }

        let mut fixed_by_id: FxHashMap<String, Position> = FxHashMap::default();
        for (id, position) in fixed {
            if !graph.has_node(&id) {
                return Err(Error::UnknownVertex { id });
            }
            if moving_by_id.contains_key(&id) {
                return Err(Error::OverlappingPartitions { id });
            }
            fixed_by_id.insert(id, position);
        }

        let mut ids: Vec<String> = Vec::with_capacity(graph.node_count());
        let mut points: Vec<Point> = Vec::with_capacity(graph.node_count());
        let mut index: FxHashMap<String, usize> = FxHashMap::default();

        for id in graph.nodes() {
            let point = if let Some(&position) = moving_by_id.get(id) {
                Point::new(position)
            } else if let Some(&position) = fixed_by_id.get(id) {
                Point::fixed(position)
            } else {
                return Err(Error::MissingPoint { id: id.to_string() });
            };

            index.insert(id.to_string(), points.len());
            ids.push(id.to_string());
            points.push(point);
        }

        Ok(Self { ids, points, index })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Point> {
        self.index.get(id).map(|&ix| &self.points[ix])
    }

    pub fn ix_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn id_by_ix(&self, ix: usize) -> Option<&str> {
        self.ids.get(ix).map(|s| s.as_str())
    }

    /// All points in insertion order; the quadtree is built over this slice.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn point_mut(&mut self, ix: usize) -> &mut Point {
        &mut self.points[ix]
    }

    pub(crate) fn points_mut(&mut self) -> impl Iterator<Item = (&str, &mut Point)> {
        self.ids
            .iter()
            .map(|s| s.as_str())
            .zip(self.points.iter_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Point)> {
        self.ids.iter().map(|s| s.as_str()).zip(self.points.iter())
    }

    /// Moving points with their arena index, in insertion order.
    pub fn iter_moving(&self) -> impl Iterator<Item = (usize, &str, &Point)> {
        self.ids
            .iter()
            .zip(self.points.iter())
            .enumerate()
            .filter(|(_, (_, point))| !point.is_fixed())
            .map(|(ix, (id, point))| (ix, id.as_str(), point))
    }
}
