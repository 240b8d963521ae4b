//! Defines the Bevy [Plugin] for TriNav
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;

pub mod navigation_layer;

/// How often cached corridors are checked for keep alive requests and expiry
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(1);

/// Order in which the plugin's systems run within [Update]
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Cache maintenance
	Tidy,
	/// Admitting requests and stepping searches
	Calculate,
}

/// Drives every [MasterNavigator] component each frame
pub struct TriNavPlugin;

impl Plugin for TriNavPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<CellId>()
			.register_type::<DistanceHeuristic>()
			.register_type::<SearchState>()
			.register_type::<NavRequestState>()
			.register_type::<CorridorMetadata>()
			.configure_sets(Update, (OrderingSet::Tidy, OrderingSet::Calculate).chain())
			.add_systems(
				Update,
				(
					navigation_layer::maintain_navigators
						.run_if(on_timer(MAINTENANCE_INTERVAL))
						.in_set(OrderingSet::Tidy),
					navigation_layer::process_navigators.in_set(OrderingSet::Calculate),
				),
			);
	}
}
