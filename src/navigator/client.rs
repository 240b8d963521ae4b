//! The thread safe side of a navigator. A [Navigator] can be cloned and
//! handed to any number of threads, each submission returns a [NavRequest]
//! straight away and the work happens later on the owning
//! [crate::navigator::master::MasterNavigator]
//!

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

use super::jobs::NavJob;
use crate::prelude::*;
use bevy::prelude::*;

/// Submits work to a [MasterNavigator]
#[derive(Clone)]
pub struct Navigator {
	/// Queue read by the master navigator
	sender: Sender<NavJob>,
	/// Shared with the master navigator, set when it is disposed
	disposed: Arc<AtomicBool>,
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("queued", &self.sender.len())
			.field("disposed", &self.is_disposed())
			.finish()
	}
}

impl Navigator {
	/// Create a navigator feeding `sender`
	pub(crate) fn new(sender: Sender<NavJob>, disposed: Arc<AtomicBool>) -> Self {
		Navigator { sender, disposed }
	}
	/// Whether the master navigator has been disposed
	pub fn is_disposed(&self) -> bool {
		self.disposed.load(Ordering::Acquire)
	}
	/// Queue a job built around a fresh handle. The handle has already failed
	/// if the master navigator is gone
	fn submit<T>(&self, job: impl FnOnce(NavRequest<T>) -> NavJob) -> NavRequest<T> {
		if self.is_disposed() {
			debug!("Request submitted to a disposed navigator");
			return NavRequest::failed();
		}
		let request = NavRequest::new();
		if !self.send_job(job(request.clone())) {
			debug!("Request submitted after the navigator was dropped");
			request.fail();
		} else if self.is_disposed() {
			// disposal may have drained the queue before this job arrived
			request.fail();
		}
		request
	}
	/// Push a job onto the queue. False if the master navigator is gone
	pub(crate) fn send_job(&self, job: NavJob) -> bool {
		self.sender.send(job).is_ok()
	}
	/// Request a corridor from `start` to `goal`
	pub fn get_path(&self, start: Vec3, goal: Vec3) -> NavRequest<Corridor> {
		self.submit(|request| NavJob::Path {
			start,
			goal,
			request,
		})
	}
	/// Request a corridor from `start` which rejoins `corridor` as far along
	/// it as a short search allows
	pub fn repair_path(&self, start: Vec3, corridor: &Corridor) -> NavRequest<Corridor> {
		let corridor = corridor.clone();
		self.submit(|request| NavJob::Repair {
			start,
			corridor,
			request,
		})
	}
	/// Stop `corridor` from aging out of the cache for another full period
	pub fn keep_path_alive(&self, corridor: &Corridor) {
		if self.is_disposed() {
			return;
		}
		self.send_job(NavJob::KeepAlive {
			corridor_id: corridor.id(),
		});
	}
	/// Request the closest point on the mesh surface to `point`. Completes
	/// during the next processing pass
	pub fn get_nearest_valid_location(&self, point: Vec3) -> NavRequest<Vec3> {
		self.submit(|request| NavJob::NearestLocation { point, request })
	}
	/// Request whether `point` lies on the mesh surface within `y_tolerance`.
	/// Completes during the next processing pass
	pub fn is_valid_location(&self, point: Vec3, y_tolerance: f32) -> NavRequest<bool> {
		self.submit(|request| NavJob::ValidLocation {
			point,
			y_tolerance,
			request,
		})
	}
}
