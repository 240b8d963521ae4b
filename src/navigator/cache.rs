//! Corridors kept by a navigator so equivalent requests can share them
//!

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Describes which requests a cached corridor can serve
#[derive(Clone, Copy, Debug, Reflect)]
pub struct CorridorMetadata {
	/// Cell the corridor starts in
	start_cell: CellId,
	/// Cell the corridor ends in
	goal_cell: CellId,
	/// Time since the navigator was created when the corridor was built or
	/// last kept alive
	time_generated: Duration,
}
// the age of an entry does not change which requests it serves
impl PartialEq for CorridorMetadata {
	fn eq(&self, other: &Self) -> bool {
		self.start_cell == other.start_cell && self.goal_cell == other.goal_cell
	}
}
impl Eq for CorridorMetadata {}

impl Ord for CorridorMetadata {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		(self.start_cell, self.goal_cell).cmp(&(other.start_cell, other.goal_cell))
	}
}

impl PartialOrd for CorridorMetadata {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl CorridorMetadata {
	/// Describe a corridor built at `time_generated`
	pub fn new(start_cell: CellId, goal_cell: CellId, time_generated: Duration) -> Self {
		CorridorMetadata {
			start_cell,
			goal_cell,
			time_generated,
		}
	}
	/// Get the start cell
	pub fn get_start_cell(&self) -> CellId {
		self.start_cell
	}
	/// Get the goal cell
	pub fn get_goal_cell(&self) -> CellId {
		self.goal_cell
	}
	/// Get when the corridor was generated
	pub fn get_time_generated(&self) -> Duration {
		self.time_generated
	}
	/// Age of the entry at `now`
	pub fn age(&self, now: Duration) -> Duration {
		now.saturating_sub(self.time_generated)
	}
}

/// Cached corridors keyed by their start and goal cells
#[derive(Default)]
pub struct CorridorCache {
	/// Corridor for each pair of cells
	corridors: BTreeMap<CorridorMetadata, Arc<MasterCorridor>>,
}

impl CorridorCache {
	/// Get a reference to the map of corridors
	pub fn get(&self) -> &BTreeMap<CorridorMetadata, Arc<MasterCorridor>> {
		&self.corridors
	}
	/// Find the corridor between two cells along with its metadata
	pub fn get_corridor(
		&self,
		start_cell: CellId,
		goal_cell: CellId,
	) -> Option<(&CorridorMetadata, &Arc<MasterCorridor>)> {
		let key = CorridorMetadata::new(start_cell, goal_cell, Duration::ZERO);
		self.corridors.get_key_value(&key)
	}
	/// Find a cached corridor by its ID
	pub fn find_by_id(&self, id: CorridorId) -> Option<(&CorridorMetadata, &Arc<MasterCorridor>)> {
		self.corridors.iter().find(|(_, corridor)| corridor.id() == id)
	}
	/// Cache `corridor`, replacing any corridor between the same cells
	pub fn insert(&mut self, corridor: Arc<MasterCorridor>, now: Duration) {
		let metadata = CorridorMetadata::new(corridor.start_cell(), corridor.goal_cell(), now);
		// a plain insert would keep the old key and with it the old timestamp
		self.corridors.remove(&metadata);
		self.corridors.insert(metadata, corridor);
	}
	/// Restart the age of the corridor with `id`. Returns whether it was found
	pub fn refresh(&mut self, id: CorridorId, now: Duration) -> bool {
		let Some((metadata, _)) = self.find_by_id(id) else {
			return false;
		};
		let metadata = *metadata;
		if let Some(corridor) = self.corridors.remove(&metadata) {
			let refreshed =
				CorridorMetadata::new(metadata.start_cell, metadata.goal_cell, now);
			self.corridors.insert(refreshed, corridor);
		}
		true
	}
	/// Drop the corridor between two cells, disposing it
	pub fn remove(&mut self, start_cell: CellId, goal_cell: CellId) {
		let key = CorridorMetadata::new(start_cell, goal_cell, Duration::ZERO);
		if let Some(corridor) = self.corridors.remove(&key) {
			corridor.dispose();
		}
	}
	/// Drop and dispose every corridor older than `max_age` at `now`.
	/// Returns how many were dropped
	pub fn purge_older_than(&mut self, max_age: Duration, now: Duration) -> usize {
		let mut to_purge = Vec::new();
		for metadata in self.corridors.keys() {
			if metadata.age(now) > max_age {
				to_purge.push(*metadata);
			}
		}
		for metadata in to_purge.iter() {
			if let Some(corridor) = self.corridors.remove(metadata) {
				debug!(
					"Evicting corridor {} from {:?} to {:?}",
					corridor.id(),
					metadata.start_cell,
					metadata.goal_cell
				);
				corridor.dispose();
			}
		}
		to_purge.len()
	}
	/// Dispose and drop every corridor
	pub fn dispose_all(&mut self) {
		for corridor in self.corridors.values() {
			corridor.dispose();
		}
		self.corridors.clear();
	}
	/// Number of cached corridors
	pub fn len(&self) -> usize {
		self.corridors.len()
	}
	/// Whether nothing is cached
	pub fn is_empty(&self) -> bool {
		self.corridors.is_empty()
	}
}
