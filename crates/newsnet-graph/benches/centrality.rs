use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use newsnet_core::WeightedEdge;
use newsnet_core::config::EigenvectorConfig;
use newsnet_graph::metrics::betweenness::betweenness_centrality;
use newsnet_graph::metrics::eigenvector::eigenvector_centrality;
use newsnet_graph::{CooccurrenceGraph, compute_centrality, spring_layout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// (name, nodes, edges)
const TIERS: [(&str, usize, usize); 3] = [
    ("small", 50, 150),
    ("medium", 200, 800),
    ("large", 800, 4_000),
];

/// Synthetic co-occurrence graph with a few heavily connected hubs.
fn synthetic_graph(nodes: usize, edges: usize, seed: u64) -> CooccurrenceGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let hubs = (nodes / 20).max(1);
    let rows: Vec<WeightedEdge> = (0..edges)
        .map(|_| {
            let a = if rng.gen_bool(0.5) {
                rng.gen_range(0..hubs)
            } else {
                rng.gen_range(0..nodes)
            };
            let b = rng.gen_range(0..nodes);
            WeightedEdge::new(format!("person-{a}"), format!("person-{b}"), rng.gen_range(1..2_000))
        })
        .collect();
    CooccurrenceGraph::from_edges(&rows).expect("graph")
}

fn bench_centrality(c: &mut Criterion) {
    let mut group = c.benchmark_group("centrality.tiered");
    let eigen = EigenvectorConfig {
        max_iterations: 1_000,
        ..EigenvectorConfig::default()
    };

    for (name, nodes, edges) in TIERS {
        let g = synthetic_graph(nodes, edges, 0x5EED_u64 + nodes as u64);
        group.throughput(Throughput::Elements(g.edge_count() as u64));

        group.bench_with_input(BenchmarkId::new("betweenness", name), &g, |b, g| {
            b.iter(|| black_box(betweenness_centrality(g)));
        });

        group.bench_with_input(BenchmarkId::new("eigenvector", name), &g, |b, g| {
            b.iter(|| black_box(eigenvector_centrality(g, &eigen)));
        });

        group.bench_with_input(BenchmarkId::new("table", name), &g, |b, g| {
            b.iter(|| black_box(compute_centrality(g, &eigen)));
        });

        group.bench_with_input(BenchmarkId::new("layout", name), &g, |b, g| {
            b.iter(|| black_box(spring_layout(g, 50, 42)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_centrality);
criterion_main!(benches);
