//! Known-topology regression tests for the analysis stage.
//!
//! Each test uses a hand-crafted edge list whose metric values are worked
//! out by hand and hardcoded.

use newsnet_core::WeightedEdge;
use newsnet_core::config::EigenvectorConfig;
use newsnet_core::edgelist::write_edgelist;
use newsnet_graph::graph::stats::{density, transitivity};
use newsnet_graph::{
    CooccurrenceGraph, Measure, build_graph, compute_centrality, filter_by_weight, load_edges,
    summarize,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn edges(list: &[(&str, &str, u64)]) -> Vec<WeightedEdge> {
    list.iter()
        .map(|(a, b, w)| WeightedEdge::new(*a, *b, *w))
        .collect()
}

fn complete(names: &[&str]) -> CooccurrenceGraph {
    let mut list = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            list.push(WeightedEdge::new(*a, *b, 1));
        }
    }
    build_graph(&list).expect("graph")
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn threshold_keeps_heavier_edges_and_their_endpoints() {
    let all = edges(&[("A", "B", 600), ("B", "C", 400), ("A", "C", 700)]);
    let kept = filter_by_weight(&all, 500);
    assert_eq!(kept, edges(&[("A", "B", 600), ("A", "C", 700)]));

    let g = build_graph(&kept).expect("graph");
    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.weight_between("B", "C"), None);
    assert!(g.node_index("C").is_some(), "C is still an endpoint of (A, C)");
}

#[test]
fn names_only_on_removed_edges_are_absent() {
    let all = edges(&[("A", "B", 600), ("C", "D", 100)]);
    let g = build_graph(&filter_by_weight(&all, 500)).expect("graph");
    assert!(g.node_index("C").is_none());
    assert!(g.node_index("D").is_none());
    assert_eq!(g.node_count(), 2);
}

#[test]
fn complete_graph_degree_and_density_are_one() {
    let g = complete(&["A", "B", "C", "D", "E"]);
    let table = compute_centrality(&g, &EigenvectorConfig::default()).expect("centrality");

    for row in table.rows() {
        assert!((row.degree - 1.0).abs() < 1e-10, "{}: {}", row.node, row.degree);
        assert!(row.betweenness.abs() < 1e-10);
        assert!((row.eigenvector - 1.0 / 5.0_f64.sqrt()).abs() < 1e-6);
    }
    assert!((density(&g) - 1.0).abs() < 1e-10);
    assert!((transitivity(&g) - 1.0).abs() < 1e-10);
}

#[test]
fn edgeless_graph_density_is_zero() {
    let g = build_graph(&[]).expect("graph");
    assert!(density(&g).abs() < f64::EPSILON);
    let table = compute_centrality(&g, &EigenvectorConfig::default()).expect("empty");
    assert!(table.is_empty());

    let summary = summarize(&g, &table, 500, 10);
    assert_eq!(summary.stats.edge_count, 0);
    assert!(summary.rankings.iter().all(|r| r.nodes.is_empty()));
}

#[test]
fn threshold_above_every_weight_empties_the_graph() {
    let all = edges(&[("A", "B", 600), ("A", "C", 700)]);
    let g = build_graph(&filter_by_weight(&all, 10_000)).expect("graph");
    assert!(g.is_empty());
}

#[test]
fn bridge_between_two_triangles() {
    // Triangles {A, B, C} and {D, E, F} joined by C - D.
    let g = build_graph(&edges(&[
        ("A", "B", 1),
        ("B", "C", 1),
        ("A", "C", 1),
        ("D", "E", 1),
        ("E", "F", 1),
        ("D", "F", 1),
        ("C", "D", 1),
    ]))
    .expect("graph");
    let table = compute_centrality(&g, &EigenvectorConfig::default()).expect("centrality");

    // C lies on every shortest path from {A, B} to {D, E, F}: 6 of the
    // C(5, 2) = 10 pairs not involving C.
    let c = table.get("C").expect("C");
    assert!((c.betweenness - 0.6).abs() < 1e-10, "C: {}", c.betweenness);
    assert!((c.degree - 0.6).abs() < 1e-10);

    let top = table.top(Measure::Betweenness, 2);
    let names: Vec<&str> = top.iter().map(|r| r.node.as_str()).collect();
    assert_eq!(names, ["C", "D"]);

    // 2 triangles; triples: 4 nodes of degree 2 (1 each) + C, D of degree 3 (3 each).
    assert!((transitivity(&g) - 6.0 / 10.0).abs() < 1e-10);
}

#[test]
fn edge_list_file_feeds_the_analysis() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("weighted_edgelist_realnews.csv");
    write_edgelist(
        &path,
        &edges(&[("Alice", "Bob", 900), ("Bob", "Carol", 700), ("Alice", "Dan", 3)]),
    )
    .expect("write");

    let loaded = load_edges(&path).expect("load");
    let g = build_graph(&filter_by_weight(&loaded, 500)).expect("graph");
    assert_eq!(g.node_count(), 3);

    let table = compute_centrality(&g, &EigenvectorConfig::default()).expect("centrality");
    assert_eq!(table.rows()[0].node, "Bob");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_edges() -> impl Strategy<Value = Vec<WeightedEdge>> {
    let name = prop::sample::select(vec!["A", "B", "C", "D", "E", "F"]);
    prop::collection::vec((name.clone(), name, 0_u64..1_000), 0..20).prop_map(|rows| {
        rows.into_iter()
            .map(|(a, b, w)| WeightedEdge::new(a, b, w))
            .collect()
    })
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn filter_is_monotonic(all in arb_edges(), low in 0_u64..1_000, bump in 0_u64..1_000) {
        let high = low + bump;
        let at_low = filter_by_weight(&all, low);
        let at_high = filter_by_weight(&all, high);
        prop_assert!(at_high.len() <= at_low.len());
        for edge in &at_high {
            prop_assert!(at_low.contains(edge));
        }
    }

    #[test]
    fn centrality_scores_stay_in_range(all in arb_edges()) {
        let g = build_graph(&all).expect("graph");
        let generous = EigenvectorConfig { max_iterations: 10_000, ..EigenvectorConfig::default() };
        let table = compute_centrality(&g, &generous).expect("centrality");
        prop_assert_eq!(table.len(), g.node_count());
        for row in table.rows() {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&row.degree));
            prop_assert!((0.0..=1.0 + 1e-12).contains(&row.betweenness));
            prop_assert!(row.eigenvector >= -1e-12);
        }
        let d = density(&g);
        prop_assert!((0.0..=1.0 + 1e-12).contains(&d));
    }
}
