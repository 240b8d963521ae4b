//! The [CellGraph] is the finalised navigation mesh consumed by searches and
//! the [MasterNavigator]. It is built once from vertex and index buffers and
//! never mutated afterwards, which lets it be shared behind an `Arc`
//!

use std::collections::HashMap;

use crate::prelude::*;
use bevy::prelude::*;

/// Static cell-adjacency graph of a navigation mesh
#[derive(Clone, Debug)]
pub struct CellGraph {
	/// Every triangle of the mesh, indexed by [CellId]
	cells: Vec<Cell>,
	/// Vertical tolerance used when snapping points onto the surface
	plane_tolerance: f32,
	/// How far corridor corners are pulled toward the next cell, `0.0..=0.5`
	offset_scale: f32,
}

impl CellGraph {
	/// Build a graph from a vertex buffer and a list of triangles. Triangles
	/// which share an edge (by vertex index) are linked to each other
	pub fn build(
		vertices: Vec<Vec3>,
		indices: Vec<[u32; 3]>,
		plane_tolerance: f32,
		offset_scale: f32,
	) -> Result<Self, NavMeshError> {
		if vertices.is_empty() || indices.is_empty() {
			return Err(NavMeshError::EmptyGeometry);
		}
		if !plane_tolerance.is_finite() || plane_tolerance < 0.0 {
			return Err(NavMeshError::InvalidTolerance(plane_tolerance));
		}
		if !offset_scale.is_finite() || offset_scale < 0.0 {
			return Err(NavMeshError::InvalidTolerance(offset_scale));
		}
		if let Some(bad) = vertices.iter().position(|v| !v.is_finite()) {
			return Err(NavMeshError::NonFiniteVertex(bad));
		}
		let mut cells = Vec::with_capacity(indices.len());
		for (triangle, tri) in indices.iter().enumerate() {
			let mut corners = [Vec3::ZERO; CELL_WALLS];
			for (corner, index) in corners.iter_mut().zip(tri.iter()) {
				*corner = *vertices
					.get(*index as usize)
					.ok_or(NavMeshError::IndexOutOfRange {
						triangle,
						index: *index,
						vertex_count: vertices.len(),
					})?;
			}
			let cell = Cell::new(corners).ok_or(NavMeshError::DegenerateTriangle(triangle))?;
			cells.push(cell);
		}
		// pair up every wall by its (sorted) vertex indices
		let mut edges: HashMap<(u32, u32), Vec<(usize, usize)>> = HashMap::new();
		for (triangle, tri) in indices.iter().enumerate() {
			for wall in 0..CELL_WALLS {
				let a = tri[(wall + 1) % CELL_WALLS];
				let b = tri[(wall + 2) % CELL_WALLS];
				edges.entry((a.min(b), a.max(b))).or_default().push((triangle, wall));
			}
		}
		for ((a, b), owners) in edges.iter() {
			match owners.as_slice() {
				[(cell_a, wall_a), (cell_b, wall_b)] => {
					cells[*cell_a].set_link(*wall_a, CellId::new(*cell_b));
					cells[*cell_b].set_link(*wall_b, CellId::new(*cell_a));
				}
				[_] => {}
				_ => return Err(NavMeshError::NonManifoldEdge(*a, *b)),
			}
		}
		let clamped_offset = offset_scale.min(MAX_OFFSET_SCALE);
		if clamped_offset != offset_scale {
			warn!(
				"Corner offset scale {} clamped to {}",
				offset_scale, clamped_offset
			);
		}
		debug!("Built cell graph of {} cells", cells.len());
		Ok(CellGraph {
			cells,
			plane_tolerance: plane_tolerance.max(MIN_PLANE_TOLERANCE),
			offset_scale: clamped_offset,
		})
	}
	/// Get a reference to the cells of the graph
	pub fn get(&self) -> &[Cell] {
		&self.cells
	}
	/// Get a cell by ID
	pub fn get_cell(&self, id: CellId) -> Option<&Cell> {
		self.cells.get(id.get_index())
	}
	/// Number of cells
	pub fn cell_count(&self) -> usize {
		self.cells.len()
	}
	/// Get the vertical snapping tolerance
	pub fn get_plane_tolerance(&self) -> f32 {
		self.plane_tolerance
	}
	/// Get the corner offset scale handed to corridors
	pub fn get_offset_scale(&self) -> f32 {
		self.offset_scale
	}
	/// Find the cell closest to `point` along with the nearest point on its
	/// surface.
	///
	/// Cells whose column contains the point win, the one vertically nearest
	/// being chosen so overlapping floors resolve correctly. If no column
	/// contains the point and `must_be_in_column` is set then [None] is
	/// returned, otherwise the nearest point on any cell edge is used
	pub fn closest_cell(&self, point: Vec3, must_be_in_column: bool) -> Option<(CellId, Vec3)> {
		let mut in_column: Option<(CellId, Vec3, f32)> = None;
		for (index, cell) in self.cells.iter().enumerate() {
			if cell.is_in_column(point) {
				let height = cell.plane_height(point);
				let distance = (height - point.y).abs();
				if in_column.is_none_or(|(_, _, best)| distance < best) {
					in_column = Some((
						CellId::new(index),
						Vec3::new(point.x, height, point.z),
						distance,
					));
				}
			}
		}
		if let Some((id, snapped, _)) = in_column {
			return Some((id, snapped));
		}
		if must_be_in_column {
			return None;
		}
		let mut nearest: Option<(CellId, Vec3, f32)> = None;
		for (index, cell) in self.cells.iter().enumerate() {
			let candidate = cell.closest_point(point);
			let distance = candidate.distance_squared(point);
			if nearest.is_none_or(|(_, _, best)| distance < best) {
				nearest = Some((CellId::new(index), candidate, distance));
			}
		}
		nearest.map(|(id, snapped, _)| (id, snapped))
	}
	/// Whether `point` sits on the surface of a cell within `y_tolerance`
	pub fn is_valid_position(&self, point: Vec3, y_tolerance: f32) -> bool {
		self.cells
			.iter()
			.any(|c| c.is_in_column(point) && (c.plane_height(point) - point.y).abs() <= y_tolerance)
	}
	/// Get the wall of `from` which leads into `to`, if the two are linked
	pub fn shared_wall(&self, from: CellId, to: CellId) -> Option<(usize, Wall)> {
		let cell = self.get_cell(from)?;
		let index = cell.link_index(to)?;
		Some((index, cell.get_wall(index)))
	}
	/// Smallest corner of the bounding box around every vertex
	pub fn get_bounds_min(&self) -> Vec3 {
		self.cells
			.iter()
			.fold(Vec3::splat(f32::MAX), |acc, c| acc.min(c.get_bounds().0))
	}
}
