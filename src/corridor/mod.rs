//! A corridor is the ordered run of cells produced by a completed search,
//! plus the precise goal point inside the final cell.
//!
//! The cell geometry is copied out of the [CellGraph] when the corridor is
//! built so corridors can be queried from any thread without touching the
//! navigator. Many [Corridor]s may share one [MasterCorridor] when requests
//! with equivalent endpoints are served from the cache, each keeping its own
//! goal point
//!

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of a [MasterCorridor] within its navigator
pub type CorridorId = u64;

/// The cells of a corridor shared by every [Corridor] built from them
#[derive(Debug)]
pub struct MasterCorridor {
	/// ID assigned by the navigator
	id: CorridorId,
	/// Cells of the corridor, start first
	cell_ids: Vec<CellId>,
	/// Geometry of each cell in `cell_ids`
	cells: Vec<Cell>,
	/// Wall of each cell leading into the next one, `None` for the last cell
	exit_walls: Vec<Option<usize>>,
	/// Vertical tolerance used when snapping onto the corridor
	plane_tolerance: f32,
	/// How far corners are pulled toward the next cell's centroid
	offset_scale: f32,
	/// Set once the owning navigator no longer vouches for the corridor
	disposed: AtomicBool,
}

impl MasterCorridor {
	/// Copy the cells of `path` out of `graph`. Returns [None] if the path is
	/// empty, references a cell not in the graph, or two consecutive cells
	/// are not linked
	pub fn new(id: CorridorId, graph: &CellGraph, path: &[CellId]) -> Option<Self> {
		if path.is_empty() {
			return None;
		}
		let mut cells = Vec::with_capacity(path.len());
		let mut exit_walls = Vec::with_capacity(path.len());
		for (i, cell_id) in path.iter().enumerate() {
			let cell = graph.get_cell(*cell_id)?;
			let exit = match path.get(i + 1) {
				Some(next) => Some(cell.link_index(*next)?),
				None => None,
			};
			cells.push(cell.clone());
			exit_walls.push(exit);
		}
		Some(MasterCorridor {
			id,
			cell_ids: path.to_vec(),
			cells,
			exit_walls,
			plane_tolerance: graph.get_plane_tolerance(),
			offset_scale: graph.get_offset_scale(),
			disposed: AtomicBool::new(false),
		})
	}
	/// Get the ID
	pub fn id(&self) -> CorridorId {
		self.id
	}
	/// Get the cells, start first
	pub fn get_cell_ids(&self) -> &[CellId] {
		&self.cell_ids
	}
	/// Number of cells
	pub fn cell_count(&self) -> usize {
		self.cell_ids.len()
	}
	/// Get the first cell
	pub fn start_cell(&self) -> CellId {
		self.cell_ids[0]
	}
	/// Get the last cell
	pub fn goal_cell(&self) -> CellId {
		self.cell_ids[self.cell_ids.len() - 1]
	}
	/// Position of `cell` within the corridor
	pub fn cell_index(&self, cell: CellId) -> Option<usize> {
		self.cell_ids.iter().position(|c| *c == cell)
	}
	/// Mark the corridor as no longer valid. Cannot be undone
	pub fn dispose(&self) {
		self.disposed.store(true, Ordering::Release);
	}
	/// Whether the corridor has been disposed
	pub fn is_disposed(&self) -> bool {
		self.disposed.load(Ordering::Acquire)
	}
	/// Create a [Corridor] ending at `goal`
	pub fn with_goal(self: &Arc<Self>, goal: Vec3) -> Corridor {
		Corridor {
			master: Arc::clone(self),
			goal,
		}
	}
	/// The exit wall endpoints of cell `index` as `(left, right)` when
	/// looking out of the cell through the wall
	fn portal(&self, index: usize) -> Option<(Vec3, Vec3)> {
		let wall_index = self.exit_walls.get(index).copied().flatten()?;
		let cell = &self.cells[index];
		let wall = cell.get_wall(wall_index);
		let (a, b) = (wall.get_start(), wall.get_end());
		if signed_area_x2(planar(cell.get_centroid()), planar(a), planar(b)) > 0.0 {
			Some((b, a))
		} else {
			Some((a, b))
		}
	}
	/// Pull a corner found on the exit wall of cell `index` toward the
	/// centroid of the following cell
	fn offset_corner(&self, corner: Vec3, index: usize) -> Vec3 {
		match self.cells.get(index + 1) {
			Some(next) => translate_toward(corner, next.get_centroid(), self.offset_scale),
			None => corner,
		}
	}
	/// Find the corridor cell best matching `point`. Among the cells whose
	/// column holds the point those within the plane tolerance are preferred,
	/// latest in the corridor first, otherwise the vertically nearest wins
	fn locate(&self, point: Vec3) -> Option<usize> {
		let mut within: Option<usize> = None;
		let mut nearest: Option<(usize, f32)> = None;
		for (index, cell) in self.cells.iter().enumerate() {
			if !cell.is_in_column(point) {
				continue;
			}
			let distance = (cell.plane_height(point) - point.y).abs();
			if distance <= self.plane_tolerance {
				within = Some(index);
			}
			if nearest.is_none_or(|(_, best)| distance < best) {
				nearest = Some((index, distance));
			}
		}
		within.or(nearest.map(|(index, _)| index))
	}
}

/// A route through the navigation mesh from a start cell to a goal point
#[derive(Clone, Debug)]
pub struct Corridor {
	/// Shared cells
	master: Arc<MasterCorridor>,
	/// Where the route ends, inside the last cell
	goal: Vec3,
}

impl Corridor {
	/// Get the ID of the shared cells
	pub fn id(&self) -> CorridorId {
		self.master.id()
	}
	/// Get the goal point
	pub fn get_goal(&self) -> Vec3 {
		self.goal
	}
	/// Get the cells, start first
	pub fn get_cells(&self) -> &[CellId] {
		self.master.get_cell_ids()
	}
	/// Number of cells
	pub fn cell_count(&self) -> usize {
		self.master.cell_count()
	}
	/// Get the first cell
	pub fn start_cell(&self) -> CellId {
		self.master.start_cell()
	}
	/// Get the last cell
	pub fn goal_cell(&self) -> CellId {
		self.master.goal_cell()
	}
	/// Position of `cell` within the corridor
	pub fn cell_index(&self, cell: CellId) -> Option<usize> {
		self.master.cell_index(cell)
	}
	/// Whether the navigator that built the corridor has discarded it
	pub fn is_disposed(&self) -> bool {
		self.master.is_disposed()
	}
	/// Get the shared cells
	pub fn get_master(&self) -> &Arc<MasterCorridor> {
		&self.master
	}
	/// Whether the xz projection of `point` falls on any corridor cell
	pub fn is_in_footprint(&self, point: Vec3) -> bool {
		self.master.cells.iter().any(|c| c.is_in_column(point))
	}
	/// Snap `point` vertically onto the corridor surface. Returns [None] if
	/// the point is outside the corridor's footprint
	pub fn force_y_to_path(&self, point: Vec3) -> Option<Vec3> {
		let index = self.master.locate(point)?;
		let height = self.master.cells[index].plane_height(point);
		Some(Vec3::new(point.x, height, point.z))
	}
	/// The nearest point on the corridor surface to `point`, moving it
	/// horizontally onto the corridor when it lies outside the footprint
	pub fn force_to_path(&self, point: Vec3) -> Vec3 {
		if let Some(snapped) = self.force_y_to_path(point) {
			return snapped;
		}
		let mut best = point;
		let mut best_distance = f32::MAX;
		for cell in self.master.cells.iter() {
			let candidate = cell.closest_point(point);
			let distance = candidate.distance_squared(point);
			if distance < best_distance {
				best_distance = distance;
				best = candidate;
			}
		}
		best
	}
	/// The next point to steer toward from `from`.
	///
	/// Runs a funnel over the walls ahead of the agent's cell and returns the
	/// first corner that blocks the straight line toward the goal, pulled
	/// toward the following cell's centroid by the offset scale. When the
	/// goal is visible it is returned as is. Returns [None] if `from` is
	/// outside the corridor or the corridor is disposed
	pub fn steering_target(&self, from: Vec3) -> Option<Vec3> {
		if self.is_disposed() {
			return None;
		}
		let master = &self.master;
		let start = master.locate(from)?;
		let last = master.cell_count() - 1;
		if start == last {
			return Some(self.goal);
		}
		let apex = planar(from);
		let (mut left, mut right) = master.portal(start)?;
		let (mut left_index, mut right_index) = (start, start);
		let corner = |point: Vec3, index: usize| {
			if index == last {
				self.goal
			} else {
				master.offset_corner(point, index)
			}
		};
		for index in start + 1..=last {
			let (l, r) = if index == last {
				(self.goal, self.goal)
			} else {
				master.portal(index)?
			};
			// narrow the right side unless it crosses over the left
			if signed_area_x2(apex, planar(right), planar(r)) >= 0.0 {
				if planar_eq(from, right) || signed_area_x2(apex, planar(left), planar(r)) < 0.0 {
					right = r;
					right_index = index;
				} else {
					return Some(corner(left, left_index));
				}
			}
			// narrow the left side unless it crosses over the right
			if signed_area_x2(apex, planar(left), planar(l)) <= 0.0 {
				if planar_eq(from, left) || signed_area_x2(apex, planar(right), planar(l)) > 0.0 {
					left = l;
					left_index = index;
				} else {
					return Some(corner(right, right_index));
				}
			}
		}
		Some(self.goal)
	}
	/// Midpoint of every wall crossed by the corridor, each pulled toward the
	/// centroid of the cell it leads into by the offset scale, followed by the
	/// goal point
	pub fn wall_waypoints(&self) -> Vec<Vec3> {
		let master = &self.master;
		let mut waypoints = Vec::with_capacity(master.cell_count());
		for (index, cell) in master.cells.iter().enumerate() {
			if let Some(wall) = master.exit_walls[index] {
				let midpoint = cell.get_wall(wall).midpoint();
				waypoints.push(master.offset_corner(midpoint, index));
			}
		}
		waypoints.push(self.goal);
		waypoints
	}
	/// Triangles of the corridor for debug drawing
	pub fn triangles(&self) -> Vec<[Vec3; 3]> {
		self.master.cells.iter().map(|c| *c.get_vertices()).collect()
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	fn corridor_from(mesh: mesh_fixtures::MeshData, offset_scale: f32, goal: Vec3) -> Corridor {
		let count = mesh.indices.len();
		let graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, offset_scale).unwrap();
		let path: Vec<CellId> = (0..count).map(CellId::new).collect();
		Arc::new(MasterCorridor::new(1, &graph, &path).unwrap()).with_goal(goal)
	}
	#[test]
	fn rejects_unlinked_cells() {
		let mesh = mesh_fixtures::strip(5);
		let graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.0).unwrap();
		assert!(MasterCorridor::new(0, &graph, &[CellId::new(0), CellId::new(2)]).is_none());
		assert!(MasterCorridor::new(0, &graph, &[]).is_none());
		assert!(MasterCorridor::new(0, &graph, &[CellId::new(9)]).is_none());
	}
	#[test]
	fn footprint_containment() {
		let mesh = mesh_fixtures::strip(10);
		let min = mesh.bounds_min();
		let corridor = corridor_from(mesh, 0.0, Vec3::new(5.0, 0.0, 0.5));
		let inside = Vec3::new(2.0, 0.0, 0.5);
		assert!(corridor.is_in_footprint(inside));
		assert!(!corridor.is_in_footprint(min - Vec3::ONE));
	}
	#[test]
	fn force_y_onto_sloped_corridor() {
		let mesh = mesh_fixtures::grid_with_height(4, 1, 1.0, |x, _| x * 0.5);
		let corridor = corridor_from(mesh, 0.0, Vec3::new(3.5, 1.75, 0.5));
		let centroid = corridor.get_master().cells[3].get_centroid();
		let above = centroid + Vec3::new(0.0, 0.3, 0.0);
		let snapped = corridor.force_y_to_path(above).unwrap();
		assert!((snapped.y - centroid.y).abs() < TOLERANCE);
		assert!(corridor.force_y_to_path(Vec3::new(50.0, 0.0, 50.0)).is_none());
	}
	#[test]
	fn force_to_path_moves_outside_points_onto_edge() {
		let mesh = mesh_fixtures::grid(4, 1, 1.0);
		let corridor = corridor_from(mesh, 0.0, Vec3::new(3.5, 0.0, 0.5));
		assert_eq!(Vec3::new(2.0, 0.0, 1.0), corridor.force_to_path(Vec3::new(2.0, 3.0, 4.0)));
		assert_eq!(Vec3::new(1.5, 0.0, 0.5), corridor.force_to_path(Vec3::new(1.5, 0.2, 0.5)));
	}
	#[test]
	fn waypoints_at_wall_midpoints() {
		let goal = Vec3::new(5.2, 0.0, 0.5);
		let corridor = corridor_from(mesh_fixtures::strip(10), 0.0, goal);
		let waypoints = corridor.wall_waypoints();
		assert_eq!(10, waypoints.len());
		for (k, waypoint) in waypoints.iter().take(9).enumerate() {
			// the wall between cell k and k + 1 joins vertices k + 1 and k + 2
			let a = Vec3::new((k + 1) as f32 * 0.5, 0.0, ((k + 1) % 2) as f32);
			let b = Vec3::new((k + 2) as f32 * 0.5, 0.0, ((k + 2) % 2) as f32);
			assert!(waypoint.distance((a + b) * 0.5) < TOLERANCE);
		}
		assert_eq!(goal, waypoints[9]);
	}
	#[test]
	fn waypoints_offset_toward_next_centroid() {
		let scale = 0.2;
		let goal = Vec3::new(5.2, 0.0, 0.5);
		let plain = corridor_from(mesh_fixtures::strip(10), 0.0, goal).wall_waypoints();
		let corridor = corridor_from(mesh_fixtures::strip(10), scale, goal);
		let offset = corridor.wall_waypoints();
		for k in 0..9 {
			let next = corridor.get_master().cells[k + 1].get_centroid();
			let expected = plain[k] + (next - plain[k]) * scale;
			assert!(offset[k].distance(expected) < TOLERANCE);
		}
	}
	#[test]
	fn steering_target_follows_corners() {
		let (mesh, start, goal) = mesh_fixtures::funnel_corridor();
		let corridor = corridor_from(mesh.clone(), 0.0, goal);
		let expected = [mesh.vertices[3], mesh.vertices[6], goal];
		let mut position = start;
		for target in expected {
			position = corridor.steering_target(position).unwrap();
			assert!(position.distance(target) < TOLERANCE, "{:?} != {:?}", position, target);
		}
	}
	#[test]
	fn steering_target_offset_stays_on_corridor() {
		let (mesh, start, goal) = mesh_fixtures::funnel_corridor();
		let corner = mesh.vertices[3];
		let corridor = corridor_from(mesh, 0.1, goal);
		let target = corridor.steering_target(start).unwrap();
		assert!(target.distance(corner) > TOLERANCE);
		assert!(target.distance(corner) < 0.5);
		assert!(corridor.is_in_footprint(target));
	}
	#[test]
	fn steering_target_in_goal_cell_is_goal() {
		let goal = Vec3::new(5.2, 0.0, 0.5);
		let corridor = corridor_from(mesh_fixtures::strip(10), 0.0, goal);
		assert_eq!(Some(goal), corridor.steering_target(Vec3::new(5.0, 0.0, 0.6)));
		assert_eq!(None, corridor.steering_target(Vec3::new(50.0, 0.0, 0.6)));
	}
	#[test]
	fn straight_strip_sees_goal() {
		let goal = Vec3::new(5.2, 0.0, 0.5);
		let corridor = corridor_from(mesh_fixtures::strip(10), 0.0, goal);
		assert_eq!(Some(goal), corridor.steering_target(Vec3::new(0.5, 0.0, 0.4)));
	}
	#[test]
	fn dispose_is_one_way_and_shared() {
		let corridor = corridor_from(mesh_fixtures::strip(3), 0.0, Vec3::new(1.0, 0.0, 0.5));
		let sibling = corridor.get_master().with_goal(Vec3::new(1.1, 0.0, 0.5));
		assert!(!corridor.is_disposed());
		corridor.get_master().dispose();
		assert!(corridor.is_disposed());
		assert!(sibling.is_disposed());
		assert_eq!(None, sibling.steering_target(Vec3::new(0.5, 0.0, 0.4)));
	}
	#[test]
	fn triangles_match_cells() {
		let corridor = corridor_from(mesh_fixtures::strip(4), 0.0, Vec3::new(1.0, 0.0, 0.5));
		let triangles = corridor.triangles();
		assert_eq!(4, triangles.len());
		assert_eq!(Vec3::new(0.0, 0.0, 0.0), triangles[0][0]);
	}
}
