//! Measure building and linking the cells of a navigation mesh
//!

use bevy_trinav_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Build a graph from raw buffers
fn init(mesh: mesh_fixtures::MeshData) {
	let _graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.1).unwrap();
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("data_initialisation");
	group.significance_level(0.05).sample_size(100);
	let grid = mesh_fixtures::grid(100, 100, 1.0);
	group.bench_function("init_cell_graph_grid", |b| {
		b.iter(|| init(black_box(grid.clone())))
	});
	let stacked = mesh_fixtures::stacked(50, 50, 4.0);
	group.bench_function("init_cell_graph_stacked", |b| {
		b.iter(|| init(black_box(stacked.clone())))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
