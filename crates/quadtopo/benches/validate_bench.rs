//! Criterion benchmarks for repair and validation on generated grid meshes.
//! Focus sizes: n×n cells for n in {2, 8, 16, 32}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use quadtopo::rand::{grid_mesh, GridMeshCfg, ReplayToken};
use quadtopo::{api, ShapeRule, TopologyCfg};

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("topology");
    for &n in &[2usize, 8, 16, 32] {
        let clean = GridMeshCfg {
            diagonal_prob: 0.3,
            ..GridMeshCfg::default()
        };
        let sloppy = GridMeshCfg {
            jitter: Some(10.0),
            ..clean
        };

        group.bench_with_input(BenchmarkId::new("validate", n), &n, |b, &n| {
            let g = grid_mesh(n, n, clean, ReplayToken { seed: 43, index: 0 });
            b.iter(|| api::validate(&g.vertices, &g.edges, ShapeRule::TriOrQuad))
        });

        group.bench_with_input(BenchmarkId::new("repair", n), &n, |b, &n| {
            b.iter_batched(
                || grid_mesh(n, n, sloppy, ReplayToken { seed: 44, index: 0 }),
                |g| api::repair(&g.vertices, &g.edges, api::MERGE_DIST),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("check", n), &n, |b, &n| {
            let g = grid_mesh(n, n, sloppy, ReplayToken { seed: 45, index: 0 });
            let cfg = TopologyCfg::with_rule(ShapeRule::TriOrQuad);
            b.iter(|| api::check(&g, cfg))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_topology);
criterion_main!(benches);
