//! Incremental best-first searches over a [CellGraph].
//!
//! Both searches are stepped one node at a time so a driver can interleave
//! many of them under a shared time budget
//!

pub mod astar;
pub mod dijkstra;
pub mod heuristic;
pub mod open_set;
pub mod path_node;

use bevy::prelude::*;

/// Lifecycle of a search
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Reflect)]
pub enum SearchState {
	/// Never initialised
	#[default]
	Uninitialized,
	/// Ready to be stepped
	Initialized,
	/// At least one step has run and a result is still pending
	Processing,
	/// A path was found
	Complete,
	/// The open set emptied before a goal was reached
	Failed,
}

impl SearchState {
	/// Whether stepping the search can still make progress
	pub fn is_active(&self) -> bool {
		matches!(self, SearchState::Initialized | SearchState::Processing)
	}
	/// Whether the search reached a terminal state
	pub fn is_finished(&self) -> bool {
		matches!(self, SearchState::Complete | SearchState::Failed)
	}
}
