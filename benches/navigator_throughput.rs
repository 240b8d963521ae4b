//! Measure a navigator draining a burst of requests, with and without the
//! corridor cache
//!

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy_trinav_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};

/// Random endpoints across a `size` by `size` grid, drawn from a few spawn
/// and goal areas so the cache sees repeats
fn prepare_endpoints(size: f32, count: usize) -> Vec<(Vec3, Vec3)> {
	let mut rng = rand::rngs::StdRng::seed_from_u64(11);
	let spots: Vec<Vec3> = (0..12)
		.map(|_| Vec3::new(rng.random_range(0.5..size - 0.5), 0.0, rng.random_range(0.5..size - 0.5)))
		.collect();
	(0..count)
		.map(|_| {
			let start = spots[rng.random_range(0..spots.len())];
			let goal = spots[rng.random_range(0..spots.len())];
			(start, goal)
		})
		.collect()
}

/// Submit every request then process until all are answered
fn drain(graph: Arc<CellGraph>, config: NavigatorConfig, endpoints: &[(Vec3, Vec3)]) {
	let mut master = MasterNavigator::new(graph, config).unwrap();
	let requests: Vec<_> = endpoints
		.iter()
		.map(|(start, goal)| master.navigator().get_path(*start, *goal))
		.collect();
	while !requests.iter().all(|r| r.is_finished()) {
		master.process(false);
	}
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(50);
	let mesh = mesh_fixtures::grid(50, 50, 1.0);
	let graph = Arc::new(CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.0).unwrap());
	let endpoints = prepare_endpoints(50.0, 200);
	let cached = NavigatorConfig::default();
	let uncached = NavigatorConfig::default().with_path_ages(Duration::ZERO, Duration::ZERO);
	group.bench_function("navigator_throughput_cached", |b| {
		b.iter(|| drain(black_box(Arc::clone(&graph)), black_box(cached), black_box(&endpoints)))
	});
	group.bench_function("navigator_throughput_uncached", |b| {
		b.iter(|| drain(black_box(Arc::clone(&graph)), black_box(uncached), black_box(&endpoints)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
