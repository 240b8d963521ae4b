//! Handles returned to clients when they submit work to a navigator.
//!
//! A handle is written exactly once by the worker and may be polled from any
//! thread. The result is stored before the terminal state is published so a
//! reader that observes [NavRequestState::Complete] always sees the data
//!

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use bevy::prelude::*;

/// Progress of a request
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Reflect)]
pub enum NavRequestState {
	/// Queued, the worker has not looked at it yet
	Pending,
	/// Admitted by the worker and being worked on
	Processing,
	/// Finished with a result
	Complete,
	/// Finished without a result
	Failed,
}

impl NavRequestState {
	/// Decode from the atomic representation
	fn from_u8(value: u8) -> Self {
		match value {
			0 => NavRequestState::Pending,
			1 => NavRequestState::Processing,
			2 => NavRequestState::Complete,
			_ => NavRequestState::Failed,
		}
	}
	/// Whether no further change will happen
	pub fn is_finished(&self) -> bool {
		matches!(self, NavRequestState::Complete | NavRequestState::Failed)
	}
}

/// Storage shared between a handle and the worker
struct RequestSlot<T> {
	/// Current [NavRequestState] as a `u8`
	state: AtomicU8,
	/// Result, set once before the state becomes complete
	data: OnceLock<T>,
}

/// Thread safe, cheaply clonable handle to the result of a request
pub struct NavRequest<T> {
	/// Shared storage
	slot: Arc<RequestSlot<T>>,
}

impl<T> Clone for NavRequest<T> {
	fn clone(&self) -> Self {
		NavRequest {
			slot: Arc::clone(&self.slot),
		}
	}
}

impl<T> fmt::Debug for NavRequest<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavRequest")
			.field("state", &self.state())
			.finish()
	}
}

impl<T> NavRequest<T> {
	/// Create a request waiting to be admitted
	pub(crate) fn new() -> Self {
		NavRequest {
			slot: Arc::new(RequestSlot {
				state: AtomicU8::new(NavRequestState::Pending as u8),
				data: OnceLock::new(),
			}),
		}
	}
	/// Create a request which has already failed
	pub(crate) fn failed() -> Self {
		let request = NavRequest::new();
		request.fail();
		request
	}
	/// Get the current state
	pub fn state(&self) -> NavRequestState {
		NavRequestState::from_u8(self.slot.state.load(Ordering::Acquire))
	}
	/// Whether the request completed or failed
	pub fn is_finished(&self) -> bool {
		self.state().is_finished()
	}
	/// Get the result once the request is complete
	pub fn data(&self) -> Option<&T> {
		match self.state() {
			NavRequestState::Complete => self.slot.data.get(),
			_ => None,
		}
	}
	/// Move a pending request into processing
	pub(crate) fn mark_processing(&self) {
		let _ = self.slot.state.compare_exchange(
			NavRequestState::Pending as u8,
			NavRequestState::Processing as u8,
			Ordering::AcqRel,
			Ordering::Acquire,
		);
	}
	/// Publish the result. Ignored if the request already finished
	pub(crate) fn complete(&self, data: T) {
		if self.is_finished() || self.slot.data.set(data).is_err() {
			return;
		}
		self.slot
			.state
			.store(NavRequestState::Complete as u8, Ordering::Release);
	}
	/// Publish failure. Ignored if the request already finished
	pub(crate) fn fail(&self) {
		let mut current = self.slot.state.load(Ordering::Acquire);
		while !NavRequestState::from_u8(current).is_finished() {
			match self.slot.state.compare_exchange_weak(
				current,
				NavRequestState::Failed as u8,
				Ordering::AcqRel,
				Ordering::Acquire,
			) {
				Ok(_) => return,
				Err(actual) => current = actual,
			}
		}
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lifecycle() {
		let request: NavRequest<u32> = NavRequest::new();
		assert_eq!(NavRequestState::Pending, request.state());
		assert!(!request.is_finished());
		request.mark_processing();
		assert_eq!(NavRequestState::Processing, request.state());
		assert_eq!(None, request.data());
		request.complete(7);
		assert_eq!(NavRequestState::Complete, request.state());
		assert_eq!(Some(&7), request.data());
	}
	#[test]
	fn published_once() {
		let request: NavRequest<u32> = NavRequest::new();
		request.complete(1);
		request.complete(2);
		request.fail();
		assert_eq!(NavRequestState::Complete, request.state());
		assert_eq!(Some(&1), request.data());
	}
	#[test]
	fn failed_stays_failed() {
		let request: NavRequest<u32> = NavRequest::failed();
		assert!(request.is_finished());
		request.mark_processing();
		request.complete(3);
		assert_eq!(NavRequestState::Failed, request.state());
		assert_eq!(None, request.data());
	}
	#[test]
	fn clones_share_state() {
		let request: NavRequest<&str> = NavRequest::new();
		let observer = request.clone();
		std::thread::scope(|s| {
			s.spawn(|| request.complete("done"));
		});
		assert_eq!(Some(&"done"), observer.data());
	}
}
