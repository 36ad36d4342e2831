use torpedo::config::{LayoutConfig, RepulsionModel};
use torpedo::error::Error;
use torpedo::force::Force;

#[test]
fn the_default_configuration_validates() {
    assert!(LayoutConfig::default().validate().is_ok());
}

#[test]
fn out_of_range_tunables_fail_fast() {
    let cases: Vec<LayoutConfig> = vec![
        LayoutConfig {
            repulsion: -1.0,
            ..Default::default()
        },
        LayoutConfig {
            center_attraction: -0.5,
            ..Default::default()
        },
        LayoutConfig {
            edge_attraction: -2.0,
            ..Default::default()
        },
        LayoutConfig {
            barnes_hut_theta: -0.1,
            ..Default::default()
        },
        LayoutConfig {
            convergence_tolerance: -1e-6,
            ..Default::default()
        },
        LayoutConfig {
            step_size: 0.0,
            ..Default::default()
        },
        LayoutConfig {
            repulsion_zone_ratio: 0.0,
            ..Default::default()
        },
        LayoutConfig {
            point_size_scale: -1.0,
            ..Default::default()
        },
    ];

    for config in cases {
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}

#[test]
fn zero_theta_is_accepted_as_the_always_descend_degenerate_case() {
    let config = LayoutConfig {
        barnes_hut_theta: 0.0,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn the_standard_stack_is_repulsion_then_edges_then_center() {
    let forces = LayoutConfig::default().forces();
    assert_eq!(forces.len(), 3);
    assert!(matches!(forces[0], Force::BarnesHut(_)));
    assert!(matches!(forces[1], Force::EdgeAttraction(_)));
    assert!(matches!(forces[2], Force::CenterAttraction(_)));
}

#[test]
fn repulsion_model_selects_the_repulsion_force() {
    let coulomb = LayoutConfig {
        repulsion_model: RepulsionModel::Coulomb,
        ..Default::default()
    };
    assert!(matches!(coulomb.forces()[0], Force::CoulombRepulsion(_)));

    let exact = LayoutConfig {
        repulsion_model: RepulsionModel::DegreeLinear,
        ..Default::default()
    };
    assert!(matches!(exact.forces()[0], Force::DegreeRepulsion(_)));
}

#[test]
fn no_overlap_swaps_in_the_gated_variants() {
    let config = LayoutConfig {
        no_overlap: true,
        ..Default::default()
    };
    let forces = config.forces();
    assert!(matches!(forces[0], Force::NoOverlapRepulsion(_)));
    assert!(matches!(forces[1], Force::NoOverlapEdgeAttraction(_)));
}

#[test]
fn zero_intensity_forces_are_left_out_of_the_stack() {
    let config = LayoutConfig {
        repulsion: 0.0,
        center_attraction: 0.0,
        ..Default::default()
    };
    let forces = config.forces();
    assert_eq!(forces.len(), 1);
    assert!(matches!(forces[0], Force::EdgeAttraction(_)));
}

#[test]
fn the_configuration_round_trips_through_serde() {
    let config = LayoutConfig {
        repulsion_model: RepulsionModel::DegreeLinear,
        no_overlap: true,
        barnes_hut_theta: 0.75,
        max_iterations: 42,
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: LayoutConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
