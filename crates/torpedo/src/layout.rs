//! The simulation loop.
//!
//! [`ForceLayout`] owns every point (moving and fixed) and drives the three
//! phases of a run: force `init`, the iterate loop, termination. Within one
//! iteration every force reads the same immutable [`Snapshot`]; integration
//! then takes the exclusive borrow of the point store and is the only place
//! positions change. That split makes the evaluate/integrate barrier a borrow
//! rule instead of a convention.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::force::Force;
use crate::geom::{Position, Vector, position};
use crate::point::{Point, PointStore};
use crate::quadtree::Quadtree;
use torpedo_graphlib::Graph;

/// Read-only view of one iteration's pre-integration state, handed to every
/// force `apply`.
pub struct Snapshot<'a, N>
where
    N: Default + 'static,
{
    graph: &'a Graph<N>,
    points: &'a PointStore,
    origin: Position,
    quadtree: Option<&'a Quadtree>,
}

impl<'a, N> Snapshot<'a, N>
where
    N: Default + 'static,
{
    pub fn new(
        graph: &'a Graph<N>,
        points: &'a PointStore,
        origin: Position,
        quadtree: Option<&'a Quadtree>,
    ) -> Self {
        Self {
            graph,
            points,
            origin,
            quadtree,
        }
    }

    pub fn graph(&self) -> &'a Graph<N> {
        self.graph
    }

    pub fn points(&self) -> &'a PointStore {
        self.points
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// The per-iteration quadtree; present whenever a Barnes-Hut force is
    /// active.
    pub fn quadtree(&self) -> Option<&'a Quadtree> {
        self.quadtree
    }
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Completed iterations.
    pub iterations: usize,
    /// Whether the convergence tolerance was reached before the iteration cap.
    pub converged: bool,
    /// True when the numeric guard stopped a diverging run; positions then
    /// hold the last stable state.
    pub aborted: bool,
}

#[derive(Debug)]
pub struct ForceLayout<'g, N>
where
    N: Default + 'static,
{
    graph: &'g Graph<N>,
    points: PointStore,
    origin: Position,
    forces: Vec<Force>,
    config: LayoutConfig,
}

impl<'g, N> ForceLayout<'g, N>
where
    N: Default + 'static,
{
    /// Builds an engine with the standard force stack of `config`.
    ///
    /// `moving` and `fixed` are the disjoint initial-position partitions;
    /// together they must cover every graph vertex. Configuration and
    /// partition violations fail here, before any simulation work.
    pub fn new(
        graph: &'g Graph<N>,
        moving: impl IntoIterator<Item = (String, Position)>,
        fixed: impl IntoIterator<Item = (String, Position)>,
        config: LayoutConfig,
    ) -> Result<Self> {
        let forces = config.forces();
        Self::with_forces(graph, moving, fixed, forces, config)
    }

    /// Like [`ForceLayout::new`] but with a caller-composed force stack.
    pub fn with_forces(
        graph: &'g Graph<N>,
        moving: impl IntoIterator<Item = (String, Position)>,
        fixed: impl IntoIterator<Item = (String, Position)>,
        forces: Vec<Force>,
        config: LayoutConfig,
    ) -> Result<Self> {
        config.validate()?;
        let points = PointStore::from_partitions(graph, moving, fixed)?;
        let origin = centroid(&points);
        Ok(Self {
            graph,
            points,
            origin,
            forces,
            config,
        })
    }

    /// Overrides the fixed reference point the center forces pull toward;
    /// defaults to the centroid of the initial positions.
    pub fn set_origin(&mut self, origin: Position) {
        self.origin = origin;
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Runs init → iterate → terminate and reports what happened. Positions
    /// are read back through [`ForceLayout::positions`] afterwards.
    pub fn run(&mut self) -> RunReport {
        for force in &mut self.forces {
            force.init(self.graph, &mut self.points);
        }
        let needs_quadtree = self
            .forces
            .iter()
            .any(|f| matches!(f, Force::BarnesHut(_)));

        tracing::debug!(
            points = self.points.len(),
            forces = self.forces.len(),
            max_iterations = self.config.max_iterations,
            "starting force layout"
        );

        let mut report = RunReport {
            iterations: 0,
            converged: false,
            aborted: false,
        };
        let mut displacements: Vec<(usize, Vector)> = Vec::new();

        for iteration in 0..self.config.max_iterations {
            let quadtree = needs_quadtree.then(|| Quadtree::build(self.points.points()));
            let snapshot = Snapshot {
                graph: self.graph,
                points: &self.points,
                origin: self.origin,
                quadtree: quadtree.as_ref(),
            };

            displacements.clear();
            for (ix, id, point) in self.points.iter_moving() {
                let mut total = Vector::zero();
                for force in &self.forces {
                    total += force.apply(id, point, &snapshot);
                }
                displacements.push((ix, total * self.config.step_size));
            }
            // End of the read phase: the snapshot borrow is released before
            // integration takes the exclusive borrow.
            drop(snapshot);

            if self.config.numeric_guard
                && displacements
                    .iter()
                    .any(|(_, d)| !d.x.is_finite() || !d.y.is_finite())
            {
                tracing::warn!(
                    iteration,
                    "non-finite displacement; aborting with the last stable positions"
                );
                report.aborted = true;
                break;
            }

            let mut total_displacement = 0.0;
            for &(ix, delta) in &displacements {
                total_displacement += delta.length();
                let point = self.points.point_mut(ix);
                point.set_position(point.position() + delta);
            }
            report.iterations = iteration + 1;

            if total_displacement < self.config.convergence_tolerance {
                report.converged = true;
                break;
            }
        }

        tracing::debug!(
            iterations = report.iterations,
            converged = report.converged,
            aborted = report.aborted,
            "force layout finished"
        );
        report
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.points.get(id)
    }

    pub fn position(&self, id: &str) -> Option<Position> {
        self.points.get(id).map(|p| p.position())
    }

    /// Final vertex positions, in graph node order. This is what a renderer
    /// consumes.
    pub fn positions(&self) -> impl Iterator<Item = (&str, Position)> {
        self.points.iter().map(|(id, p)| (id, p.position()))
    }
}

/// Deterministic initial placement on a golden-angle spiral, for callers
/// without prior coordinates.
pub fn spiral_positions<N>(graph: &Graph<N>, spacing: f64) -> Vec<(String, Position)>
where
    N: Default + 'static,
{
    const GOLDEN_ANGLE: f64 = 2.399963229728653;
    graph
        .nodes()
        .enumerate()
        .map(|(i, id)| {
            let radius = spacing * (i as f64).sqrt();
            let angle = GOLDEN_ANGLE * i as f64;
            (
                id.to_string(),
                position(radius * angle.cos(), radius * angle.sin()),
            )
        })
        .collect()
}

fn centroid(points: &PointStore) -> Position {
    if points.is_empty() {
        return Position::origin();
    }
    let mut sum = Vector::zero();
    for point in points.points() {
        sum += point.position().to_vector();
    }
    Position::origin() + sum / points.len() as f64
}
