//! Nodes of a search tree. Each [PathNode] wraps a cell and points back at
//! the node it was reached from, forming a parent chain that is walked to
//! materialise the final corridor.
//!
//! Nodes live in a [NodePool] and parents are stored as indices into that
//! pool, the pool is cleared and reused between searches
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Position of a [PathNode] within a [NodePool]
pub type NodeIndex = usize;

/// A cell visited by a search
#[derive(Clone, Debug)]
pub struct PathNode {
	/// Cell the node represents
	cell: CellId,
	/// Node this one was reached from, `None` for the root
	parent: Option<NodeIndex>,
	/// Number of nodes in the chain ending at this one, the root is `1`
	path_size: usize,
	/// Cost of the hop from the parent's reference point onto the wall shared with the parent
	local_g: f32,
	/// Cumulative cost from the root
	g: f32,
	/// Estimated remaining cost, assigned by the search
	h: f32,
	/// Point where this node's path enters the cell, children measure their hop from here
	reference_point: Vec3,
}

impl PathNode {
	/// Create the first node of a search at the `start` point
	pub fn root(cell: CellId, start: Vec3) -> Self {
		PathNode {
			cell,
			parent: None,
			path_size: 1,
			local_g: 0.0,
			g: 0.0,
			h: 0.0,
			reference_point: start,
		}
	}
	/// Create a node reached from `parent` by crossing `wall` (the wall of
	/// the parent's cell leading into `cell`)
	pub fn child(cell: CellId, parent_index: NodeIndex, parent: &PathNode, wall: &Wall) -> Self {
		let reference_point = wall.closest_point(parent.reference_point);
		let local_g = parent.reference_point.distance(reference_point);
		PathNode {
			cell,
			parent: Some(parent_index),
			path_size: parent.path_size + 1,
			local_g,
			g: parent.g + local_g,
			h: 0.0,
			reference_point,
		}
	}
	/// The `g` this node would have if it were reached from `parent` across
	/// `wall`. Nothing is mutated
	pub fn estimate_new_g(&self, parent: &PathNode, wall: &Wall) -> f32 {
		let crossing = wall.closest_point(parent.reference_point);
		parent.g + parent.reference_point.distance(crossing)
	}
	/// Re-parent the node onto `parent`, crossing `wall`
	pub fn set_parent(&mut self, parent_index: NodeIndex, parent: &PathNode, wall: &Wall) {
		self.reference_point = wall.closest_point(parent.reference_point);
		self.local_g = parent.reference_point.distance(self.reference_point);
		self.g = parent.g + self.local_g;
		self.parent = Some(parent_index);
		self.path_size = parent.path_size + 1;
	}
	/// Set the heuristic estimate
	pub fn set_h(&mut self, h: f32) {
		self.h = h;
	}
	/// Get the cell
	pub fn get_cell(&self) -> CellId {
		self.cell
	}
	/// Get the parent node
	pub fn get_parent(&self) -> Option<NodeIndex> {
		self.parent
	}
	/// Get the cost of the last hop
	pub fn local_g(&self) -> f32 {
		self.local_g
	}
	/// Get the cost from the root
	pub fn g(&self) -> f32 {
		self.g
	}
	/// Get the heuristic estimate
	pub fn h(&self) -> f32 {
		self.h
	}
	/// Total estimated cost, `g + h`
	pub fn f(&self) -> f32 {
		self.g + self.h
	}
	/// Get the point this node's path enters its cell
	pub fn get_reference_point(&self) -> Vec3 {
		self.reference_point
	}
	/// Number of cells in the chain ending at this node
	pub fn path_size(&self) -> usize {
		self.path_size
	}
}

/// Arena owning every node of a search
#[derive(Clone, Debug, Default)]
pub struct NodePool {
	/// Nodes in creation order
	nodes: Vec<PathNode>,
}

impl NodePool {
	/// Drop all nodes, keeping the allocation
	pub fn clear(&mut self) {
		self.nodes.clear();
	}
	/// Add a node and return its index
	pub fn push(&mut self, node: PathNode) -> NodeIndex {
		self.nodes.push(node);
		self.nodes.len() - 1
	}
	/// Get a node
	pub fn get(&self, index: NodeIndex) -> &PathNode {
		&self.nodes[index]
	}
	/// Get a mutable node
	pub fn get_mut(&mut self, index: NodeIndex) -> &mut PathNode {
		&mut self.nodes[index]
	}
	/// Number of nodes created
	pub fn len(&self) -> usize {
		self.nodes.len()
	}
	/// Whether no nodes exist
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
	/// Walk the parent chain of `index` and load its cells into `out`, root first
	pub fn load_path(&self, index: NodeIndex, out: &mut Vec<CellId>) {
		out.clear();
		let mut current = Some(index);
		while let Some(i) = current {
			let node = self.get(i);
			out.push(node.get_cell());
			current = node.get_parent();
		}
		out.reverse();
	}
	/// Count the cells of the chain ending at `index` by walking it
	pub fn walk_path_size(&self, index: NodeIndex) -> usize {
		let mut count = 0;
		let mut current = Some(index);
		while let Some(i) = current {
			count += 1;
			current = self.get(i).get_parent();
		}
		count
	}
	/// Re-parent the node at `index`, see [PathNode::set_parent]
	pub fn relax(&mut self, index: NodeIndex, parent_index: NodeIndex, wall: &Wall) {
		let parent = self.nodes[parent_index].clone();
		self.nodes[index].set_parent(parent_index, &parent, wall);
	}
}
