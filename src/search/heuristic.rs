//! Estimates of the remaining cost between two points
//!

use bevy::prelude::*;

/// Anything able to estimate the cost of travelling between two points.
/// Searches only depend on this signature so custom estimates can be
/// supplied without touching the search code
pub trait Heuristic {
	/// Estimated cost of moving from `from` to `to`
	fn estimate(&self, from: Vec3, to: Vec3) -> f32;
}

/// The built-in estimates
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Reflect)]
pub enum DistanceHeuristic {
	/// Largest absolute difference along any one axis. Admissible when
	/// diagonal movement costs no more than movement along an axis
	#[default]
	LongestAxis,
	/// Sum of the absolute differences along each axis. Only admissible for
	/// orthogonal movement, otherwise it may overestimate
	Manhattan,
}

impl Heuristic for DistanceHeuristic {
	fn estimate(&self, from: Vec3, to: Vec3) -> f32 {
		let delta = (to - from).abs();
		match self {
			DistanceHeuristic::LongestAxis => delta.max_element(),
			DistanceHeuristic::Manhattan => delta.x + delta.y + delta.z,
		}
	}
}

impl<F> Heuristic for F
where
	F: Fn(Vec3, Vec3) -> f32,
{
	fn estimate(&self, from: Vec3, to: Vec3) -> f32 {
		self(from, to)
	}
}
