//! Barnes-Hut approximated repulsion.
//!
//! The only force whose per-point cost is sub-linear in the point count: it
//! walks the per-iteration quadtree snapshot and treats far-away subtrees as
//! single aggregated sources. Functionally it is the exact
//! [`DegreeRepulsion`](crate::force::DegreeRepulsion) kernel with the
//! source's aggregated mass substituted for the exact `(degree + 1)` term, so
//! shrinking `theta` converges to the exact result.

use crate::geom::Vector;
use crate::layout::Snapshot;
use crate::point::{Point, PointStore};
use torpedo_graphlib::Graph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarnesHutRepulsion {
    pub intensity: f64,
    /// Accuracy/performance trade-off: a subtree of width `w` at distance `d`
    /// is approximated when `w < theta · d`. Smaller is more exact; `0`
    /// degenerates to a full descent (brute force through the tree).
    pub theta: f64,
}

impl BarnesHutRepulsion {
    /// Assigns every point its graph degree and `mass = degree + 1`, so a
    /// quadtree cluster's aggregated mass stands in for the sum of the degree
    /// terms it represents.
    pub(crate) fn init<N>(&self, graph: &Graph<N>, points: &mut PointStore)
    where
        N: Default + 'static,
    {
        for (id, point) in points.points_mut() {
            let degree = graph.degree(id);
            point.set_vertex_degree(degree);
            point.set_mass((degree + 1) as f64);
        }
    }

    pub(crate) fn apply<N>(&self, point: &Point, snapshot: &Snapshot<'_, N>) -> Vector
    where
        N: Default + 'static,
    {
        let Some(tree) = snapshot.quadtree() else {
            debug_assert!(false, "Barnes-Hut force evaluated without a quadtree snapshot");
            return Vector::zero();
        };
        if tree.is_empty() {
            return Vector::zero();
        }

        let sources = tree.interaction_list(point.position(), self.theta);
        let degree_term = (point.vertex_degree() + 1) as f64;

        let mut total = Vector::zero();
        for source in sources {
            // The query point itself comes back as one of the sources; skip
            // anything positionally identical to it.
            if source.position == point.position() {
                continue;
            }
            let v = point.position() - source.position;
            total += v * (self.intensity * degree_term * source.mass / v.square_length());
        }
        total
    }
}
