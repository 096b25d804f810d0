use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hourglass_core::config::{AppConfig, SimulationConfig};
use hourglass_core::neighbors::{grid_neighbor_sets, max_radius, naive_neighbor_sets};
use hourglass_core::provider::ParticleProvider;
use hourglass_core::spatial_hash::SpatialHash;
use hourglass_data::{Particle, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn packed_silo() -> Vec<Particle> {
    let config = AppConfig {
        simulation: SimulationConfig {
            fill_fraction: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    ParticleProvider::fill(&config, &mut rng).unwrap_or_default()
}

fn bench_naive_neighbors(c: &mut Criterion) {
    let particles = packed_silo();

    c.bench_function("naive_neighbors", |b| {
        b.iter(|| black_box(naive_neighbor_sets(black_box(&particles), false)))
    });
}

fn bench_grid_neighbors(c: &mut Criterion) {
    let particles = packed_silo();
    let r = max_radius(&particles);
    let mut grid = SpatialHash::new(2.0 * r, Vec2::new(0.0, -0.1), Vec2::new(0.3, 0.7));

    c.bench_function("grid_neighbors", |b| {
        b.iter(|| black_box(grid_neighbor_sets(black_box(&particles), &mut grid, r, false)))
    });
}

fn bench_grid_neighbors_parallel(c: &mut Criterion) {
    let particles = packed_silo();
    let r = max_radius(&particles);
    let mut grid = SpatialHash::new(2.0 * r, Vec2::new(0.0, -0.1), Vec2::new(0.3, 0.7));

    c.bench_function("grid_neighbors_parallel", |b| {
        b.iter(|| black_box(grid_neighbor_sets(black_box(&particles), &mut grid, r, true)))
    });
}

criterion_group!(
    benches,
    bench_naive_neighbors,
    bench_grid_neighbors,
    bench_grid_neighbors_parallel
);
criterion_main!(benches);
