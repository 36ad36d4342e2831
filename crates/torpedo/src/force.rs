//! Force models applied to every moving point each iteration.
//!
//! A force is one of a closed set of variants dispatched by `match`. `init`
//! runs exactly once per simulation run and may prime auxiliary point state
//! (vertex degrees, masses, the no-overlap point size) but never positions;
//! `apply` is a pure function of the pre-iteration snapshot and returns this
//! model's contribution for one point. The simulation loop sums contributions
//! and integrates; forces do no damping or integration of their own.

use crate::barnes_hut::BarnesHutRepulsion;
use crate::geom::{Position, Vector, unit_vector};
use crate::layout::Snapshot;
use crate::point::{Point, PointStore};
use serde::{Deserialize, Serialize};
use torpedo_graphlib::Graph;

/// How the pull toward the layout origin scales with distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CenterModel {
    /// Direction-only pull with the same magnitude at any distance.
    #[default]
    Unit,
    /// Grows with distance and is deliberately not normalized: it bounds how
    /// far a layout can drift from its origin, trading compactness for it.
    Linear,
}

/// Pull toward the layout origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterAttraction {
    pub intensity: f64,
    pub model: CenterModel,
    /// Scale the pull by `degree + 1`, so weakly connected vertices settle
    /// further out than hubs.
    pub by_degree: bool,
}

/// Pairwise repulsion with the legacy denominator `0.5·d³ + 0.1·d`.
///
/// The constants reproduce a historical formula rather than a corrected
/// inverse-square law; they are kept verbatim so layouts stay compatible with
/// output produced by the formula's prior users.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoulombRepulsion {
    pub intensity: f64,
    pub effect_from_fixed_nodes: bool,
}

/// Exact pairwise repulsion scaled by both endpoint degrees.
///
/// Despite the name this is inverse-distance, not inverse-square: the `V /
/// ‖V‖²` term carries magnitude `1/‖V‖` once the direction is factored out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeRepulsion {
    pub intensity: f64,
    pub effect_from_fixed_nodes: bool,
}

/// Spring-like pull along graph edges; grows with distance, vanishes at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAttraction {
    pub intensity: f64,
}

/// [`DegreeRepulsion`] gated to the overlap zone: zero beyond
/// `zone_ratio × point_size`, where `point_size = scale × point_count +
/// offset` is recomputed in `init`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoOverlapRepulsion {
    pub intensity: f64,
    pub effect_from_fixed_nodes: bool,
    pub zone_ratio: f64,
    pub point_size_scale: f64,
    pub point_size_offset: f64,
    point_size: f64,
}

impl NoOverlapRepulsion {
    pub fn new(
        intensity: f64,
        effect_from_fixed_nodes: bool,
        zone_ratio: f64,
        point_size_scale: f64,
        point_size_offset: f64,
    ) -> Self {
        Self {
            intensity,
            effect_from_fixed_nodes,
            zone_ratio,
            point_size_scale,
            point_size_offset,
            point_size: 0.0,
        }
    }

    /// Gate radius after `init`; exposed for gate-exactness tests.
    pub fn zone_radius(&self) -> f64 {
        self.zone_ratio * self.point_size
    }
}

/// [`EdgeAttraction`] under the same overlap-zone gate as
/// [`NoOverlapRepulsion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoOverlapEdgeAttraction {
    pub intensity: f64,
    pub zone_ratio: f64,
    pub point_size_scale: f64,
    pub point_size_offset: f64,
    point_size: f64,
}

impl NoOverlapEdgeAttraction {
    pub fn new(
        intensity: f64,
        zone_ratio: f64,
        point_size_scale: f64,
        point_size_offset: f64,
    ) -> Self {
        Self {
            intensity,
            zone_ratio,
            point_size_scale,
            point_size_offset,
            point_size: 0.0,
        }
    }

    pub fn zone_radius(&self) -> f64 {
        self.zone_ratio * self.point_size
    }
}

/// A force model the simulation loop can drive.
#[derive(Debug, Clone, PartialEq)]
pub enum Force {
    CenterAttraction(CenterAttraction),
    CoulombRepulsion(CoulombRepulsion),
    DegreeRepulsion(DegreeRepulsion),
    EdgeAttraction(EdgeAttraction),
    NoOverlapRepulsion(NoOverlapRepulsion),
    NoOverlapEdgeAttraction(NoOverlapEdgeAttraction),
    BarnesHut(BarnesHutRepulsion),
}

impl Force {
    /// Called once per run, before the first iteration, in the order the
    /// forces were registered. Primes the auxiliary point state this model
    /// reads on every `apply`; positions are never touched here.
    pub fn init<N>(&mut self, graph: &Graph<N>, points: &mut PointStore)
    where
        N: Default + 'static,
    {
        match self {
            Force::CenterAttraction(f) => {
                if f.by_degree {
                    assign_degrees(graph, points);
                }
            }
            Force::CoulombRepulsion(_) | Force::EdgeAttraction(_) => {}
            Force::DegreeRepulsion(_) => assign_degrees(graph, points),
            Force::NoOverlapRepulsion(f) => {
                assign_degrees(graph, points);
                f.point_size = f.point_size_scale * points.len() as f64 + f.point_size_offset;
            }
            Force::NoOverlapEdgeAttraction(f) => {
                f.point_size = f.point_size_scale * points.len() as f64 + f.point_size_offset;
            }
            Force::BarnesHut(f) => f.init(graph, points),
        }
    }

    /// Contribution of this model for one moving point, as a pure function of
    /// the pre-iteration snapshot.
    pub fn apply<N>(&self, id: &str, point: &Point, snapshot: &Snapshot<'_, N>) -> Vector
    where
        N: Default + 'static,
    {
        match self {
            Force::CenterAttraction(f) => center_attraction(f, point, snapshot.origin()),
            Force::CoulombRepulsion(f) => {
                pairwise(id, snapshot, f.effect_from_fixed_nodes, |other| {
                    coulomb_kernel(f.intensity, point, other)
                })
            }
            Force::DegreeRepulsion(f) => {
                pairwise(id, snapshot, f.effect_from_fixed_nodes, |other| {
                    degree_repulsion_kernel(f.intensity, point, other)
                })
            }
            Force::EdgeAttraction(f) => {
                edge_attraction(f.intensity, id, point, snapshot, f64::INFINITY)
            }
            Force::NoOverlapRepulsion(f) => {
                let radius = f.zone_radius();
                pairwise(id, snapshot, f.effect_from_fixed_nodes, |other| {
                    if separation(point.position(), other.position()) > radius {
                        Vector::zero()
                    } else {
                        degree_repulsion_kernel(f.intensity, point, other)
                    }
                })
            }
            Force::NoOverlapEdgeAttraction(f) => {
                edge_attraction(f.intensity, id, point, snapshot, f.zone_radius())
            }
            Force::BarnesHut(f) => f.apply(point, snapshot),
        }
    }
}

/// Assigns every point its graph degree; degree-dependent forces call this
/// from `init` rather than the engine deriving it implicitly.
pub(crate) fn assign_degrees<N>(graph: &Graph<N>, points: &mut PointStore)
where
    N: Default + 'static,
{
    for (id, point) in points.points_mut() {
        point.set_vertex_degree(graph.degree(id));
    }
}

fn center_attraction(f: &CenterAttraction, point: &Point, origin: Position) -> Vector {
    let degree_scale = if f.by_degree {
        (point.vertex_degree() + 1) as f64
    } else {
        1.0
    };
    match f.model {
        CenterModel::Unit => {
            unit_vector(point.position(), origin) * (f.intensity * degree_scale)
        }
        CenterModel::Linear => (origin - point.position()) * (f.intensity * degree_scale),
    }
}

/// Sums a per-pair kernel over every other point: moving points always,
/// fixed points only when enabled. The kernel never sees `self`.
fn pairwise<N>(
    id: &str,
    snapshot: &Snapshot<'_, N>,
    effect_from_fixed_nodes: bool,
    kernel: impl Fn(&Point) -> Vector,
) -> Vector
where
    N: Default + 'static,
{
    let mut total = Vector::zero();
    for (other_id, other) in snapshot.points().iter() {
        if other_id == id {
            continue;
        }
        if other.is_fixed() && !effect_from_fixed_nodes {
            continue;
        }
        total += kernel(other);
    }
    total
}

/// Magnitude `k / (0.5·d³ + 0.1·d)` away from `other`; zero at coincidence.
fn coulomb_kernel(intensity: f64, point: &Point, other: &Point) -> Vector {
    let d = separation(point.position(), other.position());
    if d == 0.0 {
        return Vector::zero();
    }
    let direction = unit_vector(other.position(), point.position());
    direction * (intensity / (d * d * d * 0.5 + 0.1 * d))
}

/// `k · (deg(self)+1) · (deg(other)+1) · V / ‖V‖²` with `V` from `other` to
/// `self`; zero at coincidence.
fn degree_repulsion_kernel(intensity: f64, point: &Point, other: &Point) -> Vector {
    let v = point.position() - other.position();
    let d2 = v.square_length();
    if d2 == 0.0 {
        return Vector::zero();
    }
    let degrees = (point.vertex_degree() + 1) as f64 * (other.vertex_degree() + 1) as f64;
    v * (intensity * degrees / d2)
}

fn edge_attraction<N>(
    intensity: f64,
    id: &str,
    point: &Point,
    snapshot: &Snapshot<'_, N>,
    radius: f64,
) -> Vector
where
    N: Default + 'static,
{
    let mut total = Vector::zero();
    for neighbor in snapshot.graph().neighbors(id) {
        let Some(other) = snapshot.points().get(neighbor) else {
            continue;
        };
        if separation(point.position(), other.position()) > radius {
            continue;
        }
        total += (other.position() - point.position()) * intensity;
    }
    total
}

fn separation(a: Position, b: Position) -> f64 {
    (a - b).length()
}
