//! Systems driving every [MasterNavigator] in the world
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Give each navigator its time slice for the frame
#[cfg(not(tarpaulin_include))]
pub fn process_navigators(mut navigators: Query<&mut MasterNavigator>) {
	for mut navigator in navigators.iter_mut() {
		// a disposed navigator still fails whatever was queued late
		let spent = navigator.process(false);
		trace!("Navigator processed for {:?}", spent);
	}
}

/// Apply keep alive requests and evict corridors past their max age
#[cfg(not(tarpaulin_include))]
pub fn maintain_navigators(mut navigators: Query<&mut MasterNavigator>) {
	for mut navigator in navigators.iter_mut() {
		navigator.maintain();
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::navigator::jobs::NavJob;

	#[test]
	#[cfg(not(tarpaulin_include))]
	fn disposed_navigator_fails_late_jobs() {
		let mut app = App::new();
		app.add_systems(Update, process_navigators);
		let mesh = mesh_fixtures::strip(4);
		let graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.0).unwrap();
		let master = MasterNavigator::new(Arc::new(graph), NavigatorConfig::default()).unwrap();
		let navigator = master.navigator().clone();
		let entity = app.world_mut().spawn(master).id();
		app.world_mut().get_mut::<MasterNavigator>(entity).unwrap().dispose();
		let request = NavRequest::new();
		assert!(navigator.send_job(NavJob::ValidLocation {
			point: Vec3::ZERO,
			y_tolerance: 0.1,
			request: request.clone(),
		}));
		app.update();
		assert_eq!(NavRequestState::Failed, request.state());
	}
}
