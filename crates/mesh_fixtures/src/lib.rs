//! Navigation mesh geometry shared by the tests and benches of
//! `bevy_trinav_plugin`. Every helper returns raw vertex and index buffers so
//! callers decide the plane tolerance and offset scale when building a graph
//!

use bevy::prelude::*;

/// Vertex and triangle buffers of a mesh
#[derive(Clone, Debug, Default)]
pub struct MeshData {
	/// Vertex positions
	pub vertices: Vec<Vec3>,
	/// Triangles as indices into `vertices`
	pub indices: Vec<[u32; 3]>,
}

impl MeshData {
	/// Smallest corner of the box bounding every vertex
	pub fn bounds_min(&self) -> Vec3 {
		self.vertices
			.iter()
			.fold(Vec3::splat(f32::MAX), |acc, v| acc.min(*v))
	}
	/// Largest corner of the box bounding every vertex
	pub fn bounds_max(&self) -> Vec3 {
		self.vertices
			.iter()
			.fold(Vec3::splat(f32::MIN), |acc, v| acc.max(*v))
	}
	/// Append another mesh, offsetting its indices
	pub fn merge(mut self, other: MeshData) -> MeshData {
		let offset = self.vertices.len() as u32;
		self.vertices.extend(other.vertices);
		self.indices.extend(
			other
				.indices
				.iter()
				.map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
		);
		self
	}
	/// Move every vertex by `offset`
	pub fn translated(mut self, offset: Vec3) -> MeshData {
		for v in self.vertices.iter_mut() {
			*v += offset;
		}
		self
	}
}

/// A zig-zag strip of `cells` triangles running along +x at y = 0.
///
/// Triangle `k` uses vertices `k, k + 1, k + 2` so each one links only to
/// the triangles before and after it, making both ends dead ends
pub fn strip(cells: usize) -> MeshData {
	let vertices = (0..cells + 2)
		.map(|k| Vec3::new(k as f32 * 0.5, 0.0, (k % 2) as f32))
		.collect();
	let indices = (0..cells as u32).map(|k| [k, k + 1, k + 2]).collect();
	MeshData { vertices, indices }
}

/// A flat grid of `columns` by `rows` squares, each split into two
/// triangles. Square `(column, row)` owns triangles `2 * (row * columns + column)`
/// (upper left) and the one after it (lower right), so along a single row
/// consecutive triangles are linked
pub fn grid(columns: usize, rows: usize, spacing: f32) -> MeshData {
	grid_with_height(columns, rows, spacing, |_, _| 0.0)
}

/// Like [grid] but with the height of each vertex taken from `height(x, z)`
pub fn grid_with_height(
	columns: usize,
	rows: usize,
	spacing: f32,
	height: impl Fn(f32, f32) -> f32,
) -> MeshData {
	let mut vertices = Vec::with_capacity((columns + 1) * (rows + 1));
	for row in 0..=rows {
		for column in 0..=columns {
			let x = column as f32 * spacing;
			let z = row as f32 * spacing;
			vertices.push(Vec3::new(x, height(x, z), z));
		}
	}
	let stride = columns as u32 + 1;
	let mut indices = Vec::with_capacity(columns * rows * 2);
	for row in 0..rows as u32 {
		for column in 0..columns as u32 {
			let v00 = row * stride + column;
			let v10 = v00 + 1;
			let v01 = v00 + stride;
			let v11 = v01 + 1;
			indices.push([v00, v11, v01]);
			indices.push([v00, v10, v11]);
		}
	}
	MeshData { vertices, indices }
}

/// Two unconnected strips of four cells, the second placed far along +z
pub fn islands() -> MeshData {
	strip(4).merge(strip(4).translated(Vec3::new(0.0, 0.0, 20.0)))
}

/// Two unconnected grids sharing the same xz footprint, the upper one `gap` above the lower
pub fn stacked(columns: usize, rows: usize, gap: f32) -> MeshData {
	grid(columns, rows, 1.0).merge(grid(columns, rows, 1.0).translated(Vec3::new(0.0, gap, 0.0)))
}

/// A `size` by `size` grid with the central `hole` by `hole` squares removed,
/// forcing paths across the middle to bend around it
pub fn ring(size: usize, hole: usize) -> MeshData {
	let full = grid(size, size, 1.0);
	let start = (size - hole) / 2;
	let blocked = start..start + hole;
	let indices = full
		.indices
		.chunks(2)
		.enumerate()
		.filter(|(square, _)| {
			let column = square % size;
			let row = square / size;
			!(blocked.contains(&column) && blocked.contains(&row))
		})
		.flat_map(|(_, pair)| pair.iter().copied())
		.collect();
	MeshData {
		vertices: full.vertices,
		indices,
	}
}

/// The ten cell corridor used to check string pulling. Returns the mesh, a
/// start point on its first vertex and a goal point inside the last cell
pub fn funnel_corridor() -> (MeshData, Vec3, Vec3) {
	let vertices = vec![
		Vec3::new(-1.0, -5.0, -2.0),
		Vec3::new(0.0, -5.5, -1.0),
		Vec3::new(0.0, -5.0, -2.0),
		Vec3::new(-1.0, -5.5, -1.0),
		Vec3::new(-0.8, -6.0, 0.0),
		Vec3::new(-2.0, -6.0, 0.0),
		Vec3::new(-1.2, -5.5, 1.0),
		Vec3::new(-2.0, -5.5, 2.0),
		Vec3::new(-1.0, -5.5, 2.0),
		Vec3::new(0.0, -5.0, 2.0),
		Vec3::new(0.0, -5.0, 1.0),
		Vec3::new(1.0, -4.5, 2.0),
	];
	let indices = vec![
		[0, 1, 2],
		[0, 3, 1],
		[3, 4, 1],
		[3, 5, 4],
		[4, 5, 6],
		[6, 5, 7],
		[7, 8, 6],
		[6, 8, 9],
		[10, 6, 9],
		[9, 11, 10],
	];
	(
		MeshData { vertices, indices },
		Vec3::new(-1.0, -5.0, -2.0),
		Vec3::new(0.2, -5.0, 1.8),
	)
}
