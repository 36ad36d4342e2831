use torpedo::force::{
    CenterAttraction, CenterModel, CoulombRepulsion, DegreeRepulsion, EdgeAttraction, Force,
    NoOverlapRepulsion,
};
use torpedo::geom::{Position, position};
use torpedo::graphlib::Graph;
use torpedo::layout::Snapshot;
use torpedo::point::PointStore;

fn moving_store(graph: &Graph<()>, positions: &[(&str, f64, f64)]) -> PointStore {
    let moving: Vec<(String, Position)> = positions
        .iter()
        .map(|&(id, x, y)| (id.to_string(), position(x, y)))
        .collect();
    PointStore::from_partitions(graph, moving, []).expect("valid partitions")
}

fn two_node_graph() -> Graph<()> {
    let mut g: Graph<()> = Graph::new();
    g.set_node("a", ());
    g.set_node("b", ());
    g
}

#[test]
fn coulomb_magnitude_matches_the_legacy_denominator() {
    let graph = two_node_graph();
    let points = moving_store(&graph, &[("a", 0.0, 0.0), ("b", 10.0, 0.0)]);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let force = Force::CoulombRepulsion(CoulombRepulsion {
        intensity: 1.0,
        effect_from_fixed_nodes: false,
    });
    let v = force.apply("a", points.get("a").unwrap(), &snapshot);

    // 1 / (10³·0.5 + 0.1·10), directed away from the other point.
    assert!((v.x - (-1.0 / 501.0)).abs() < 1e-15);
    assert!(v.y.abs() < 1e-15);
}

#[test]
fn repulsion_always_points_away_from_the_other_point() {
    let graph = two_node_graph();
    let placements = [
        (3.0, 4.0),
        (-2.0, 7.5),
        (0.1, -0.1),
        (-40.0, -9.0),
        (12.0, 0.0),
    ];

    for &(x, y) in &placements {
        let mut points = moving_store(&graph, &[("a", 0.0, 0.0), ("b", x, y)]);

        for mut force in [
            Force::CoulombRepulsion(CoulombRepulsion {
                intensity: 2.0,
                effect_from_fixed_nodes: false,
            }),
            Force::DegreeRepulsion(DegreeRepulsion {
                intensity: 2.0,
                effect_from_fixed_nodes: false,
            }),
        ] {
            force.init(&graph, &mut points);
            let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);
            let v = force.apply("a", points.get("a").unwrap(), &snapshot);

            // Positive dot product with the other→self direction.
            let away = points.get("a").unwrap().position() - points.get("b").unwrap().position();
            assert!(v.dot(away) > 0.0, "force must push a away from b at ({x}, {y})");
        }
    }
}

#[test]
fn pairwise_forces_absorb_coincident_points() {
    let graph = two_node_graph();
    let points = moving_store(&graph, &[("a", 5.0, 5.0), ("b", 5.0, 5.0)]);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    for force in [
        Force::CoulombRepulsion(CoulombRepulsion {
            intensity: 3.0,
            effect_from_fixed_nodes: false,
        }),
        Force::DegreeRepulsion(DegreeRepulsion {
            intensity: 3.0,
            effect_from_fixed_nodes: false,
        }),
    ] {
        let v = force.apply("a", points.get("a").unwrap(), &snapshot);
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, 0.0);
    }
}

#[test]
fn fixed_points_repel_only_when_enabled() {
    let graph = two_node_graph();
    let points = PointStore::from_partitions(
        &graph,
        [("a".to_string(), position(0.0, 0.0))],
        [("b".to_string(), position(10.0, 0.0))],
    )
    .expect("valid partitions");
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let ignoring = Force::CoulombRepulsion(CoulombRepulsion {
        intensity: 1.0,
        effect_from_fixed_nodes: false,
    });
    let v = ignoring.apply("a", points.get("a").unwrap(), &snapshot);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);

    let seeing = Force::CoulombRepulsion(CoulombRepulsion {
        intensity: 1.0,
        effect_from_fixed_nodes: true,
    });
    let v = seeing.apply("a", points.get("a").unwrap(), &snapshot);
    assert!(v.x < 0.0);
}

#[test]
fn edge_attraction_on_an_isolated_vertex_is_zero() {
    let mut graph: Graph<()> = Graph::new();
    graph.set_edge("a", "b");
    graph.set_node("x", ());

    let points = moving_store(
        &graph,
        &[("a", 0.0, 0.0), ("b", 10.0, 0.0), ("x", 50.0, 50.0)],
    );
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let force = Force::EdgeAttraction(EdgeAttraction { intensity: 1.0 });
    let v = force.apply("x", points.get("x").unwrap(), &snapshot);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
}

#[test]
fn edge_attraction_sums_springs_over_neighbors() {
    let mut graph: Graph<()> = Graph::new();
    graph.set_edge("a", "b");
    graph.set_edge("a", "c");

    let points = moving_store(
        &graph,
        &[("a", 0.0, 0.0), ("b", 10.0, 0.0), ("c", 0.0, -4.0)],
    );
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let force = Force::EdgeAttraction(EdgeAttraction { intensity: 0.5 });
    let v = force.apply("a", points.get("a").unwrap(), &snapshot);

    // 0.5·(10, 0) + 0.5·(0, -4)
    assert!((v.x - 5.0).abs() < 1e-12);
    assert!((v.y - (-2.0)).abs() < 1e-12);
}

#[test]
fn no_overlap_repulsion_is_gated_at_the_zone_radius() {
    let graph = two_node_graph();

    // point_size = 1·2 + 0 = 2, zone radius = 2·2 = 4.
    let mut inside = Force::NoOverlapRepulsion(NoOverlapRepulsion::new(1.0, false, 2.0, 1.0, 0.0));
    let mut points = moving_store(&graph, &[("a", 0.0, 0.0), ("b", 4.0, 0.0)]);
    inside.init(&graph, &mut points);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);
    let v = inside.apply("a", points.get("a").unwrap(), &snapshot);
    assert!(v.x < 0.0, "separation at the threshold still repels");

    let mut outside = Force::NoOverlapRepulsion(NoOverlapRepulsion::new(1.0, false, 2.0, 1.0, 0.0));
    let mut points = moving_store(&graph, &[("a", 0.0, 0.0), ("b", 4.000001, 0.0)]);
    outside.init(&graph, &mut points);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);
    let v = outside.apply("a", points.get("a").unwrap(), &snapshot);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
}

#[test]
fn unit_center_attraction_has_distance_independent_magnitude() {
    let graph = two_node_graph();
    let points = moving_store(&graph, &[("a", 3.0, 0.0), ("b", 0.0, -400.0)]);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let force = Force::CenterAttraction(CenterAttraction {
        intensity: 0.25,
        model: CenterModel::Unit,
        by_degree: false,
    });

    let near = force.apply("a", points.get("a").unwrap(), &snapshot);
    let far = force.apply("b", points.get("b").unwrap(), &snapshot);
    assert!((near.length() - 0.25).abs() < 1e-12);
    assert!((far.length() - 0.25).abs() < 1e-12);
    assert!(near.x < 0.0);
    assert!(far.y > 0.0);
}

#[test]
fn linear_center_attraction_grows_with_distance() {
    let graph = two_node_graph();
    let points = moving_store(&graph, &[("a", 10.0, 0.0), ("b", 0.0, 40.0)]);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let force = Force::CenterAttraction(CenterAttraction {
        intensity: 0.5,
        model: CenterModel::Linear,
        by_degree: false,
    });

    let v = force.apply("a", points.get("a").unwrap(), &snapshot);
    assert!((v.x - (-5.0)).abs() < 1e-12);
    assert_eq!(v.y, 0.0);
}

#[test]
fn by_degree_center_attraction_scales_with_degree_plus_one() {
    let mut graph: Graph<()> = Graph::new();
    graph.set_edge("a", "b");
    graph.set_edge("a", "c");

    let mut points = moving_store(
        &graph,
        &[("a", 8.0, 0.0), ("b", -8.0, 0.0), ("c", 0.0, 8.0)],
    );
    let mut force = Force::CenterAttraction(CenterAttraction {
        intensity: 1.0,
        model: CenterModel::Unit,
        by_degree: true,
    });
    force.init(&graph, &mut points);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    // a has degree 2, b degree 1.
    let hub = force.apply("a", points.get("a").unwrap(), &snapshot);
    let leaf = force.apply("b", points.get("b").unwrap(), &snapshot);
    assert!((hub.length() - 3.0).abs() < 1e-12);
    assert!((leaf.length() - 2.0).abs() < 1e-12);
}

#[test]
fn center_attraction_at_the_origin_takes_the_zero_fallback() {
    let graph = two_node_graph();
    let points = moving_store(&graph, &[("a", 0.0, 0.0), ("b", 5.0, 5.0)]);
    let snapshot = Snapshot::new(&graph, &points, Position::origin(), None);

    let force = Force::CenterAttraction(CenterAttraction {
        intensity: 2.0,
        model: CenterModel::Unit,
        by_degree: false,
    });
    let v = force.apply("a", points.get("a").unwrap(), &snapshot);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
}
