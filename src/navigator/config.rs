//! Tuning of a [crate::navigator::master::MasterNavigator]
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Default age after which a cached corridor is discarded
const DEFAULT_MAX_PATH_AGE: Duration = Duration::from_secs(60);
/// Default age after which a cached corridor is checked before reuse
const DEFAULT_REPAIR_AGE: Duration = Duration::from_secs(20);
/// Default number of walls a repair search may cross
const DEFAULT_REPAIR_SEARCH_DEPTH: usize = 8;
/// Default number of idle searches kept for reuse
const DEFAULT_SEARCH_POOL_MAX: usize = 16;

/// Settings controlling how a navigator spends its time and caches corridors
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorConfig {
	/// Estimate of remaining cost used by corridor searches
	pub heuristic: DistanceHeuristic,
	/// How long a single call to `process` may work for, [None] for no limit
	pub max_processing_timeslice: Option<Duration>,
	/// Cached corridors older than this are discarded. Zero disables caching
	pub max_path_age: Duration,
	/// Cached corridors older than this are repaired before being reused
	pub repair_age: Duration,
	/// Number of walls a repair search may cross
	pub repair_search_depth: usize,
	/// Number of idle searches of each kind kept for reuse
	pub search_pool_max: usize,
}

impl Default for NavigatorConfig {
	fn default() -> Self {
		NavigatorConfig {
			heuristic: DistanceHeuristic::default(),
			max_processing_timeslice: Some(Duration::from_millis(2)),
			max_path_age: DEFAULT_MAX_PATH_AGE,
			repair_age: DEFAULT_REPAIR_AGE,
			repair_search_depth: DEFAULT_REPAIR_SEARCH_DEPTH,
			search_pool_max: DEFAULT_SEARCH_POOL_MAX,
		}
	}
}

impl NavigatorConfig {
	/// Use `heuristic` for corridor searches
	pub fn with_heuristic(mut self, heuristic: DistanceHeuristic) -> Self {
		self.heuristic = heuristic;
		self
	}
	/// Bound each call to `process`, [None] removes the bound
	pub fn with_timeslice(mut self, timeslice: Option<Duration>) -> Self {
		self.max_processing_timeslice = timeslice;
		self
	}
	/// Set the cache ages
	pub fn with_path_ages(mut self, max_path_age: Duration, repair_age: Duration) -> Self {
		self.max_path_age = max_path_age;
		self.repair_age = repair_age;
		self
	}
	/// Set how far a repair search may go
	pub fn with_repair_search_depth(mut self, depth: usize) -> Self {
		self.repair_search_depth = depth;
		self
	}
	/// Set how many idle searches are kept
	pub fn with_search_pool_max(mut self, max: usize) -> Self {
		self.search_pool_max = max;
		self
	}
	/// Whether corridors are cached at all
	pub fn is_caching(&self) -> bool {
		!self.max_path_age.is_zero()
	}
	/// Check the settings, clamping the repair age so it never exceeds the
	/// maximum path age
	pub fn validate(mut self) -> Result<Self, NavMeshError> {
		if self.repair_search_depth == 0 {
			return Err(NavMeshError::InvalidRepairDepth);
		}
		if self.repair_age > self.max_path_age {
			warn!(
				"Repair age {:?} exceeds max path age {:?}, clamping",
				self.repair_age, self.max_path_age
			);
			self.repair_age = self.max_path_age;
		}
		Ok(self)
	}
	/// Load and validate a config from a `.ron` file
	#[cfg(feature = "ron")]
	pub fn from_ron(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: NavigatorConfig = ron::de::from_reader(file)?;
		Ok(config.validate()?)
	}
}
