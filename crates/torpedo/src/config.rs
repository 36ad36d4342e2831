//! Layout tunables.

use crate::barnes_hut::BarnesHutRepulsion;
use crate::error::{Error, Result};
use crate::force::{
    CenterAttraction, CenterModel, CoulombRepulsion, DegreeRepulsion, EdgeAttraction, Force,
    NoOverlapEdgeAttraction, NoOverlapRepulsion,
};
use serde::{Deserialize, Serialize};

/// Which repulsion model the standard force stack uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepulsionModel {
    /// Legacy pairwise formula, exact O(n²).
    Coulomb,
    /// Degree-scaled inverse-distance repulsion, exact O(n²).
    DegreeLinear,
    /// Degree-scaled repulsion through the quadtree, O(n log n).
    #[default]
    BarnesHut,
}

/// Every tunable the engine recognizes, consumed at construction time.
///
/// Validation is fail-fast: an out-of-range value is reported before any
/// simulation work begins and is never silently clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Intensity of the pull toward the origin; `0` disables the force.
    pub center_attraction: f64,
    pub center_model: CenterModel,
    pub center_by_degree: bool,

    /// Intensity of the pairwise repulsion; `0` disables the force.
    pub repulsion: f64,
    pub repulsion_model: RepulsionModel,
    /// Swap the exact repulsion and edge attraction for their overlap-zone
    /// gated variants. Takes precedence over `repulsion_model`.
    pub no_overlap: bool,

    /// Intensity of the spring pull along edges; `0` disables the force.
    pub edge_attraction: f64,

    /// Whether pairwise repulsion also sees fixed points as sources.
    pub effect_from_fixed_nodes: bool,

    /// `point_size = point_size_scale × point_count + point_size_offset`.
    pub point_size_scale: f64,
    pub point_size_offset: f64,
    /// Gate radius of the no-overlap variants, in units of `point_size`.
    pub repulsion_zone_ratio: f64,

    pub barnes_hut_theta: f64,

    pub max_iterations: usize,
    /// Stop once the summed displacement magnitude of one iteration falls
    /// below this; `0` runs all iterations.
    pub convergence_tolerance: f64,
    /// Damped-Euler integration step applied to the summed force.
    pub step_size: f64,

    /// Abort the run (keeping the last stable positions) when an iteration
    /// produces a non-finite displacement.
    pub numeric_guard: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_attraction: 0.2,
            center_model: CenterModel::Unit,
            center_by_degree: false,
            repulsion: 800.0,
            repulsion_model: RepulsionModel::BarnesHut,
            no_overlap: false,
            edge_attraction: 0.1,
            effect_from_fixed_nodes: false,
            point_size_scale: 1.0,
            point_size_offset: 10.0,
            repulsion_zone_ratio: 2.0,
            barnes_hut_theta: 0.5,
            max_iterations: 1000,
            convergence_tolerance: 0.01,
            step_size: 0.1,
            numeric_guard: true,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        require(
            self.center_attraction >= 0.0,
            "center_attraction must be non-negative",
        )?;
        require(self.repulsion >= 0.0, "repulsion must be non-negative")?;
        require(
            self.edge_attraction >= 0.0,
            "edge_attraction must be non-negative",
        )?;
        require(
            self.point_size_scale >= 0.0,
            "point_size_scale must be non-negative",
        )?;
        require(
            self.point_size_offset >= 0.0,
            "point_size_offset must be non-negative",
        )?;
        require(
            self.repulsion_zone_ratio > 0.0,
            "repulsion_zone_ratio must be positive",
        )?;
        // Exactly 0 is accepted: it degenerates to a full descent, which is
        // brute force through the tree but still terminates.
        require(
            self.barnes_hut_theta >= 0.0,
            "barnes_hut_theta must be non-negative",
        )?;
        require(
            self.convergence_tolerance >= 0.0,
            "convergence_tolerance must be non-negative",
        )?;
        require(
            self.step_size > 0.0 && self.step_size.is_finite(),
            "step_size must be positive and finite",
        )?;
        Ok(())
    }

    /// The standard force stack for this configuration: repulsion, edge
    /// attraction, center attraction. Zero-intensity forces are left out.
    pub fn forces(&self) -> Vec<Force> {
        let mut forces = Vec::new();

        if self.repulsion > 0.0 {
            forces.push(if self.no_overlap {
                Force::NoOverlapRepulsion(NoOverlapRepulsion::new(
                    self.repulsion,
                    self.effect_from_fixed_nodes,
                    self.repulsion_zone_ratio,
                    self.point_size_scale,
                    self.point_size_offset,
                ))
            } else {
                match self.repulsion_model {
                    RepulsionModel::Coulomb => Force::CoulombRepulsion(CoulombRepulsion {
                        intensity: self.repulsion,
                        effect_from_fixed_nodes: self.effect_from_fixed_nodes,
                    }),
                    RepulsionModel::DegreeLinear => Force::DegreeRepulsion(DegreeRepulsion {
                        intensity: self.repulsion,
                        effect_from_fixed_nodes: self.effect_from_fixed_nodes,
                    }),
                    RepulsionModel::BarnesHut => Force::BarnesHut(BarnesHutRepulsion {
                        intensity: self.repulsion,
                        theta: self.barnes_hut_theta,
                    }),
                }
            });
        }

        if self.edge_attraction > 0.0 {
            forces.push(if self.no_overlap {
                Force::NoOverlapEdgeAttraction(NoOverlapEdgeAttraction::new(
                    self.edge_attraction,
                    self.repulsion_zone_ratio,
                    self.point_size_scale,
                    self.point_size_offset,
                ))
            } else {
                Force::EdgeAttraction(EdgeAttraction {
                    intensity: self.edge_attraction,
                })
            });
        }

        if self.center_attraction > 0.0 {
            forces.push(Force::CenterAttraction(CenterAttraction {
                intensity: self.center_attraction,
                model: self.center_model,
                by_degree: self.center_by_degree,
            }));
        }

        forces
    }
}

fn require(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            message: message.to_string(),
        })
    }
}
