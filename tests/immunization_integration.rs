//! Integration tests for the immunization kernel.
//!
//! These tests run selectors and the delta evaluator together through the
//! public API, the way a caller composes them.

use std::collections::BTreeMap;

use immunization_kernel::{
    delta_frame_impact, delta_frame_reach, immunization_delta, naive_ranking, random_set,
    scc_count, strong_articulation_points, strong_articulation_set, DependencyNetwork,
    ImmunizationError, ImmunizationReport, ImmunizationSet, ImmunizationStrategy, MetricKind,
    NetworkModel, PackageId, SamplingMode,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn ids(names: &[&str]) -> ImmunizationSet {
    names.iter().map(|n| PackageId::from(*n)).collect()
}

fn values(entries: &[(&str, f64)]) -> BTreeMap<PackageId, f64> {
    entries.iter().map(|(id, v)| (PackageId::from(*id), *v)).collect()
}

/// Chain where A depends on B, ..., D depends on E, with Reach pinned to
/// 5..1 from A to E and Surface pinned to 1.
fn pinned_chain() -> NetworkModel {
    let network =
        DependencyNetwork::from_edges([("B", "A"), ("C", "B"), ("D", "C"), ("E", "D")]);

    let reach = values(&[("A", 5.0), ("B", 4.0), ("C", 3.0), ("D", 2.0), ("E", 1.0)]);
    let ones = values(&[("A", 1.0), ("B", 1.0), ("C", 1.0), ("D", 1.0), ("E", 1.0)]);

    NetworkModel::with_metrics(
        network,
        [
            (MetricKind::Reach, reach),
            (MetricKind::Surface, ones.clone()),
            (MetricKind::Impact, ones.clone()),
            (MetricKind::DependentsCount, ones),
        ],
    )
    .unwrap()
}

fn ring() -> NetworkModel {
    NetworkModel::build(DependencyNetwork::from_edges([
        ("A", "B"),
        ("B", "C"),
        ("C", "D"),
        ("D", "A"),
    ]))
}

/// A small ecosystem: a core cycle {core, rt, io}, libraries on top of it,
/// and apps on top of the libraries.
fn ecosystem() -> NetworkModel {
    NetworkModel::build(DependencyNetwork::from_edges([
        ("core", "rt"),
        ("rt", "io"),
        ("io", "core"),
        ("core", "json"),
        ("core", "http"),
        ("io", "http"),
        ("json", "web"),
        ("http", "web"),
        ("http", "cli"),
        ("web", "app1"),
        ("web", "app2"),
        ("cli", "app2"),
    ]))
}

// ─────────────────────────────────────────────────────────────────────────────
// Pinned-metric Chain
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_chain_ranking_picks_head() {
    let set = naive_ranking(&pinned_chain(), 1, MetricKind::Reach).unwrap();
    assert_eq!(set, ids(&["A"]));
}

#[test]
fn test_chain_delta_frame_is_anchor_only() {
    let frame = delta_frame_reach(&pinned_chain()).unwrap();

    // L(A) = 5 + 1 - 1; every U = Reach <= 5
    assert_eq!(frame.max_lower, 5.0);
    assert_eq!(frame.anchor, PackageId::from("A"));
    assert!(frame.collapsed);
    assert_eq!(frame.set, ids(&["A"]));
}

// ─────────────────────────────────────────────────────────────────────────────
// Ring
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_ring_articulation_matches_primitive() {
    let model = ring();
    let points = strong_articulation_set(&model, None).unwrap();

    assert_eq!(points, strong_articulation_points(model.network()));

    // Each point, removed alone, splits the ring into singletons
    for point in &points {
        let reduced = model.network().without(&ids(&[point.as_str()]));
        assert!(scc_count(&reduced) > scc_count(model.network()));
    }
    assert_eq!(points.len(), 4);
}

#[test]
fn test_ring_delta_of_articulation_point() {
    let model = ring();
    let result = immunization_delta(&model, &ids(&["A"]), MetricKind::Reach).unwrap();

    // Every node reaches all four; without A the path B->C->D has reach 3,2,1
    assert_eq!(result.initial, 4.0);
    assert!((result.immunized - 0.75 * 2.0).abs() < 1e-12);
    assert!(result.delta > 0.0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Selectors Feed the Evaluator
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_every_selector_output_is_evaluable() {
    let model = ecosystem();

    let sets = [
        naive_ranking(&model, 2, MetricKind::Reach).unwrap(),
        delta_frame_reach(&model).unwrap().into_set(),
        delta_frame_impact(&model).unwrap().into_set(),
        strong_articulation_set(&model, None).unwrap(),
        random_set(&model, 3, SamplingMode::Direct, Some(1)).unwrap(),
        random_set(&model, 3, SamplingMode::Indirect, Some(1)).unwrap(),
    ];

    for set in &sets {
        let result = immunization_delta(&model, set, MetricKind::Reach).unwrap();
        assert!((0.0..=1.0).contains(&result.scale));
        assert!((result.initial - result.immunized - result.delta).abs() < 1e-12);
    }
}

#[test]
fn test_core_cycle_dominates_ranking() {
    // Every package is reachable from the core cycle
    let model = ecosystem();
    let set = naive_ranking(&model, 3, MetricKind::Reach).unwrap();
    assert_eq!(set, ids(&["core", "io", "rt"]));
}

#[test]
fn test_evaluation_leaves_model_untouched() {
    let model = ecosystem();
    let before = model.fingerprint().clone();

    let set = delta_frame_reach(&model).unwrap().into_set();
    immunization_delta(&model, &set, MetricKind::Surface).unwrap();

    assert_eq!(model.fingerprint(), &before);
    assert!(before.verify(model.network()));
}

#[test]
fn test_indirect_on_isolated_packages_fails() {
    let mut network = DependencyNetwork::new();
    for name in ["a", "b", "c"] {
        network.add_package(name);
    }
    let model = NetworkModel::build(network);

    let err = random_set(&model, 1, SamplingMode::Indirect, None).unwrap_err();
    assert!(matches!(err, ImmunizationError::DegenerateNetwork { .. }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy and Report
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_report_from_json_strategy() {
    let model = ecosystem();
    let strategy: ImmunizationStrategy =
        serde_json::from_str(r#"{"strategy": "naive_ranking", "size": 1, "metric": "reach"}"#)
            .unwrap();

    let report = ImmunizationReport::run(&model, &strategy, Some(MetricKind::Reach)).unwrap();

    assert_eq!(report.set, ids(&["core"]));
    assert_eq!(report.params_hash, strategy.params_hash());
    assert_eq!(report.network.package_count, 9);
    assert!(report.evaluation.is_some());
}

#[test]
fn test_seeded_report_is_reproducible() {
    let model = ecosystem();
    let strategy = ImmunizationStrategy::Random {
        size: 4,
        indirect: true,
        seed: Some(2024),
    };

    let first = ImmunizationReport::run(&model, &strategy, None).unwrap();
    let second = ImmunizationReport::run(&model, &strategy, None).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
