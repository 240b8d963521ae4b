//! A [Cell] is a convex triangle of the navigation surface. Each of its three
//! walls may link to exactly one neighbouring cell which shares that edge
//!
//! Wall `i` is the edge opposite vertex `i`, so it runs from vertex `i + 1` to
//! vertex `i + 2` (wrapped)
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Number of walls (and vertices) of a cell
pub const CELL_WALLS: usize = 3;

/// ID of a cell within a [CellGraph]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct CellId(usize);

impl CellId {
	/// Create a new instance of [CellId]
	pub fn new(index: usize) -> Self {
		CellId(index)
	}
	/// Get the position of the cell within its graph
	pub fn get_index(&self) -> usize {
		self.0
	}
}

/// An edge of a [Cell], the portal an agent crosses when moving into the
/// neighbouring cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
	/// First endpoint
	start: Vec3,
	/// Second endpoint
	end: Vec3,
}

impl Wall {
	/// Create a new instance of [Wall]
	pub fn new(start: Vec3, end: Vec3) -> Self {
		Wall { start, end }
	}
	/// Get the first endpoint
	pub fn get_start(&self) -> Vec3 {
		self.start
	}
	/// Get the second endpoint
	pub fn get_end(&self) -> Vec3 {
		self.end
	}
	/// Centre of the wall
	pub fn midpoint(&self) -> Vec3 {
		(self.start + self.end) * 0.5
	}
	/// Nearest point along the wall to `point`
	pub fn closest_point(&self, point: Vec3) -> Vec3 {
		closest_point_on_segment(point, self.start, self.end)
	}
}

/// Immutable triangle of the navigation mesh with its wall links
#[derive(Clone, Debug)]
pub struct Cell {
	/// Corners of the triangle
	vertices: [Vec3; CELL_WALLS],
	/// Neighbour across each wall, `None` for a boundary wall
	links: [Option<CellId>; CELL_WALLS],
	/// Mean of the vertices
	centroid: Vec3,
	/// Unnormalised plane normal, its y is never zero
	normal: Vec3,
	/// `1.0` when the vertices wind counter-clockwise on the xz plane, `-1.0` otherwise
	winding: f32,
	/// Smallest corner of the axis aligned bounding box
	bounds_min: Vec3,
	/// Largest corner of the axis aligned bounding box
	bounds_max: Vec3,
}

impl Cell {
	/// Create an unlinked cell. Returns [None] if the triangle has no area on
	/// the xz plane
	pub fn new(vertices: [Vec3; CELL_WALLS]) -> Option<Self> {
		let [a, b, c] = vertices;
		let area = signed_area_x2(planar(a), planar(b), planar(c));
		if area.abs() <= f32::EPSILON || !area.is_finite() {
			return None;
		}
		Some(Cell {
			vertices,
			links: [None; CELL_WALLS],
			centroid: (a + b + c) / 3.0,
			normal: (b - a).cross(c - a),
			winding: area.signum(),
			bounds_min: a.min(b).min(c),
			bounds_max: a.max(b).max(c),
		})
	}
	/// Get a corner of the cell
	pub fn get_vertex(&self, index: usize) -> Vec3 {
		self.vertices[index % CELL_WALLS]
	}
	/// Get all corners of the cell
	pub fn get_vertices(&self) -> &[Vec3; CELL_WALLS] {
		&self.vertices
	}
	/// Get the centroid
	pub fn get_centroid(&self) -> Vec3 {
		self.centroid
	}
	/// Get the neighbour across a wall
	pub fn get_link(&self, wall: usize) -> Option<CellId> {
		self.links.get(wall).copied().flatten()
	}
	/// Get the neighbours of every wall
	pub fn get_links(&self) -> &[Option<CellId>; CELL_WALLS] {
		&self.links
	}
	/// Set the neighbour across a wall
	pub(crate) fn set_link(&mut self, wall: usize, neighbour: CellId) {
		self.links[wall] = Some(neighbour);
	}
	/// Number of walls which lead to another cell
	pub fn link_count(&self) -> usize {
		self.links.iter().filter(|l| l.is_some()).count()
	}
	/// Find which wall leads to `neighbour`
	pub fn link_index(&self, neighbour: CellId) -> Option<usize> {
		self.links.iter().position(|l| *l == Some(neighbour))
	}
	/// Get the wall opposite vertex `index`
	pub fn get_wall(&self, index: usize) -> Wall {
		Wall::new(self.get_vertex(index + 1), self.get_vertex(index + 2))
	}
	/// Get the axis aligned bounds as `(min, max)`
	pub fn get_bounds(&self) -> (Vec3, Vec3) {
		(self.bounds_min, self.bounds_max)
	}
	/// Height of the cell's plane at the xz position of `point`
	pub fn plane_height(&self, point: Vec3) -> f32 {
		let a = self.vertices[0];
		a.y - (self.normal.x * (point.x - a.x) + self.normal.z * (point.z - a.z)) / self.normal.y
	}
	/// Whether the xz projection of `point` lies within the cell's xz
	/// projection, edges included
	pub fn is_in_column(&self, point: Vec3) -> bool {
		let p = planar(point);
		(0..CELL_WALLS).all(|i| {
			let area = signed_area_x2(
				planar(self.get_vertex(i)),
				planar(self.get_vertex(i + 1)),
				p,
			);
			area * self.winding >= -TOLERANCE
		})
	}
	/// Nearest point on the cell surface. When `point` is inside the column
	/// it is snapped vertically onto the plane, otherwise it is moved onto
	/// the nearest edge
	pub fn closest_point(&self, point: Vec3) -> Vec3 {
		if self.is_in_column(point) {
			return Vec3::new(point.x, self.plane_height(point), point.z);
		}
		let target = planar(point);
		let mut best = self.vertices[0];
		let mut best_distance = f32::MAX;
		for i in 0..CELL_WALLS {
			let wall = self.get_wall(i);
			let candidate = closest_point_on_segment_planar(point, wall.get_start(), wall.get_end());
			let distance = planar(candidate).distance_squared(target);
			if distance < best_distance {
				best_distance = distance;
				best = candidate;
			}
		}
		best
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	fn flat() -> Cell {
		Cell::new([
			Vec3::new(0.0, 1.0, 0.0),
			Vec3::new(4.0, 1.0, 0.0),
			Vec3::new(0.0, 1.0, 4.0),
		]).unwrap()
	}
	#[test]
	fn degenerate_cell_rejected() {
		let cell = Cell::new([
			Vec3::new(0.0, 0.0, 0.0),
			Vec3::new(0.0, 5.0, 0.0),
			Vec3::new(1.0, 0.0, 0.0),
		]);
		assert!(cell.is_none());
	}
	#[test]
	fn wall_opposite_vertex() {
		let cell = flat();
		let wall = cell.get_wall(0);
		assert_eq!(Vec3::new(4.0, 1.0, 0.0), wall.get_start());
		assert_eq!(Vec3::new(0.0, 1.0, 4.0), wall.get_end());
		assert_eq!(Vec3::new(2.0, 1.0, 2.0), wall.midpoint());
	}
	#[test]
	fn column_containment() {
		let cell = flat();
		assert!(cell.is_in_column(Vec3::new(1.0, 50.0, 1.0)));
		assert!(cell.is_in_column(Vec3::new(0.0, -3.0, 0.0)));
		assert!(!cell.is_in_column(Vec3::new(3.0, 1.0, 3.0)));
		assert!(!cell.is_in_column(Vec3::new(-0.1, 1.0, 1.0)));
	}
	#[test]
	fn column_containment_either_winding() {
		let cell = Cell::new([
			Vec3::new(0.0, 1.0, 0.0),
			Vec3::new(0.0, 1.0, 4.0),
			Vec3::new(4.0, 1.0, 0.0),
		]).unwrap();
		assert!(cell.is_in_column(Vec3::new(1.0, 0.0, 1.0)));
		assert!(!cell.is_in_column(Vec3::new(3.0, 0.0, 3.0)));
	}
	#[test]
	fn sloped_plane_height() {
		let cell = Cell::new([
			Vec3::new(0.0, 0.0, 0.0),
			Vec3::new(2.0, 2.0, 0.0),
			Vec3::new(0.0, 0.0, 2.0),
		]).unwrap();
		let height = cell.plane_height(Vec3::new(1.0, 0.0, 0.5));
		assert!((height - 1.0).abs() < TOLERANCE);
		let centroid = cell.get_centroid();
		assert!((cell.plane_height(centroid) - centroid.y).abs() < TOLERANCE);
	}
	#[test]
	fn closest_point_outside_column() {
		let cell = flat();
		let result = cell.closest_point(Vec3::new(-2.0, 7.0, 1.0));
		assert_eq!(Vec3::new(0.0, 1.0, 1.0), result);
		let inside = cell.closest_point(Vec3::new(1.0, 7.0, 1.0));
		assert_eq!(Vec3::new(1.0, 1.0, 1.0), inside);
	}
	#[test]
	fn links() {
		let mut cell = flat();
		assert_eq!(0, cell.link_count());
		cell.set_link(2, CellId::new(7));
		assert_eq!(1, cell.link_count());
		assert_eq!(Some(2), cell.link_index(CellId::new(7)));
		assert_eq!(None, cell.link_index(CellId::new(3)));
		assert_eq!(Some(CellId::new(7)), cell.get_link(2));
		assert_eq!(None, cell.get_link(5));
	}
}
