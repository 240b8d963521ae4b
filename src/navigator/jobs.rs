//! Work submitted by a [crate::navigator::client::Navigator] and carried out
//! by the [crate::navigator::master::MasterNavigator] that owns the queue
//!

use std::sync::Arc;

use crate::prelude::*;
use bevy::prelude::*;

/// A request as it travels through the submission queue
pub(crate) enum NavJob {
	/// Find a corridor between two points
	Path {
		/// Where the corridor starts
		start: Vec3,
		/// Where the corridor ends
		goal: Vec3,
		/// Handle given to the client
		request: NavRequest<Corridor>,
	},
	/// Rejoin an existing corridor from a new start point
	Repair {
		/// Where the new corridor starts
		start: Vec3,
		/// Corridor to rejoin
		corridor: Corridor,
		/// Handle given to the client
		request: NavRequest<Corridor>,
	},
	/// Restart the age of a cached corridor
	KeepAlive {
		/// Corridor to keep
		corridor_id: CorridorId,
	},
	/// Find the closest point on the mesh surface
	NearestLocation {
		/// Point to snap
		point: Vec3,
		/// Handle given to the client
		request: NavRequest<Vec3>,
	},
	/// Check whether a point sits on the mesh surface
	ValidLocation {
		/// Point to check
		point: Vec3,
		/// Allowed vertical distance from the surface
		y_tolerance: f32,
		/// Handle given to the client
		request: NavRequest<bool>,
	},
}

impl NavJob {
	/// Resolve the job's handle as failed without doing the work
	pub(crate) fn fail(self) {
		match self {
			NavJob::Path { request, .. } | NavJob::Repair { request, .. } => request.fail(),
			NavJob::NearestLocation { request, .. } => request.fail(),
			NavJob::ValidLocation { request, .. } => request.fail(),
			NavJob::KeepAlive { .. } => {}
		}
	}
}

/// Endpoints of a corridor request, already resolved to cells
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathEndpoints {
	/// Start point snapped onto the surface
	pub start_point: Vec3,
	/// Goal point snapped onto the surface
	pub goal_point: Vec3,
	/// Cell containing the start point
	pub start_cell: CellId,
	/// Cell containing the goal point
	pub goal_cell: CellId,
}

/// A corridor search in flight
pub(crate) struct PathJob {
	/// Handle given to the client
	pub request: NavRequest<Corridor>,
	/// Search being stepped
	pub search: AStarSearch,
}

/// A repair search in flight
pub(crate) struct RepairJob {
	/// Handle given to the client
	pub request: NavRequest<Corridor>,
	/// Corridor being rejoined
	pub master: Arc<MasterCorridor>,
	/// Goal point of the resulting corridor
	pub goal_point: Vec3,
	/// Search being stepped
	pub search: DijkstraSearch,
	/// When repairing a cached corridor, what to search for if the repair fails
	pub fallback: Option<PathEndpoints>,
}

impl RepairJob {
	/// Join the path which reached the latest corridor cell onto the rest of
	/// the corridor. [None] if the search found nothing
	pub(crate) fn spliced_cells(&self) -> Option<Vec<CellId>> {
		let (index, path) = self
			.search
			.paths()
			.iter()
			.filter_map(|p| Some((self.master.cell_index(p.goal_cell()?)?, p)))
			.max_by_key(|(index, _)| *index)?;
		let mut cells = path.get_cells().to_vec();
		cells.extend_from_slice(&self.master.get_cell_ids()[index + 1..]);
		Some(cells)
	}
}

/// Goals of a repair search: every corridor cell at its centroid, except the
/// last which uses `goal_point`
pub(crate) fn repair_goals(
	graph: &CellGraph,
	master: &MasterCorridor,
	goal_point: Vec3,
) -> Vec<(CellId, Vec3)> {
	let last = master.cell_count() - 1;
	master
		.get_cell_ids()
		.iter()
		.enumerate()
		.filter_map(|(index, id)| {
			if index == last {
				Some((*id, goal_point))
			} else {
				graph.get_cell(*id).map(|c| (*id, c.get_centroid()))
			}
		})
		.collect()
}
