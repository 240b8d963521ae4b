//! Frontier of a best-first search, ordered by lowest `f`.
//!
//! Improving a node pushes a fresh entry rather than updating it in place,
//! the outdated entry is skipped by the search once its cell is closed
//!

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::prelude::*;

/// A queued node and the score it was queued with
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
	/// `f` of the node at the time it was pushed
	f: f32,
	/// Push order, used to break ties between equal `f`
	sequence: u64,
	/// The queued node
	node: NodeIndex,
}

impl PartialEq for OpenEntry {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for OpenEntry {}

// reversed so the std max-heap pops the lowest score, earliest push first
impl Ord for OpenEntry {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.f
			.total_cmp(&self.f)
			.then_with(|| other.sequence.cmp(&self.sequence))
	}
}

impl PartialOrd for OpenEntry {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Min-priority queue of [NodeIndex] keyed by `f`, ties resolved in push order
#[derive(Clone, Debug, Default)]
pub struct OpenSet {
	/// Queued entries, possibly including outdated ones
	heap: BinaryHeap<OpenEntry>,
	/// Next push sequence number
	sequence: u64,
}

impl OpenSet {
	/// Queue `node` with score `f`
	pub fn push(&mut self, node: NodeIndex, f: f32) {
		self.heap.push(OpenEntry {
			f,
			sequence: self.sequence,
			node,
		});
		self.sequence += 1;
	}
	/// Remove the entry with the lowest score
	pub fn pop(&mut self) -> Option<NodeIndex> {
		self.heap.pop().map(|e| e.node)
	}
	/// Number of queued entries
	pub fn len(&self) -> usize {
		self.heap.len()
	}
	/// Whether nothing is queued
	pub fn is_empty(&self) -> bool {
		self.heap.is_empty()
	}
	/// Drop every entry, keeping the allocation
	pub fn clear(&mut self) {
		self.heap.clear();
		self.sequence = 0;
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pops_lowest_first() {
		let mut open = OpenSet::default();
		open.push(0, 5.0);
		open.push(1, 1.5);
		open.push(2, 3.0);
		assert_eq!(Some(1), open.pop());
		assert_eq!(Some(2), open.pop());
		assert_eq!(Some(0), open.pop());
		assert_eq!(None, open.pop());
	}
	#[test]
	fn ties_pop_in_push_order() {
		let mut open = OpenSet::default();
		for node in 0..6 {
			open.push(node, 2.0);
		}
		let popped: Vec<NodeIndex> = std::iter::from_fn(|| open.pop()).collect();
		assert_eq!(vec![0, 1, 2, 3, 4, 5], popped);
	}
	#[test]
	fn clear_resets() {
		let mut open = OpenSet::default();
		open.push(4, 1.0);
		open.clear();
		assert!(open.is_empty());
		assert_eq!(0, open.len());
	}
}
