//! Informed search from a start point to a single goal cell
//!

use std::collections::{HashMap, HashSet};

use crate::prelude::*;
use bevy::prelude::*;

/// A* search across a [CellGraph], stepped one node at a time with
/// [AStarSearch::process_step].
///
/// The cost of a corridor is the length of the line running from the start
/// point through the nearest crossing point of each wall, which keeps
/// corridors from zig-zagging between cell centres
pub struct AStarSearch<H: Heuristic = DistanceHeuristic> {
	/// Estimate of remaining cost
	heuristic: H,
	/// Lifecycle of the search
	state: SearchState,
	/// Where the search starts from
	start_point: Vec3,
	/// Where the search is heading
	goal_point: Vec3,
	/// Cell containing the start point
	start_cell: CellId,
	/// Cell containing the goal point
	goal_cell: CellId,
	/// Every node created by the search
	pool: NodePool,
	/// Frontier
	open: OpenSet,
	/// Node created for each cell seen so far
	discovered: HashMap<CellId, NodeIndex>,
	/// Cells which will not be expanded again
	closed: HashSet<CellId>,
	/// Resulting corridor, start cell first
	path: Vec<CellId>,
	/// Cost of the resulting corridor including the final hop to the goal point
	cost: f32,
}

impl Default for AStarSearch<DistanceHeuristic> {
	fn default() -> Self {
		AStarSearch::new(DistanceHeuristic::default())
	}
}

impl<H: Heuristic> AStarSearch<H> {
	/// Create an uninitialised search using `heuristic`
	pub fn new(heuristic: H) -> Self {
		AStarSearch {
			heuristic,
			state: SearchState::Uninitialized,
			start_point: Vec3::ZERO,
			goal_point: Vec3::ZERO,
			start_cell: CellId::default(),
			goal_cell: CellId::default(),
			pool: NodePool::default(),
			open: OpenSet::default(),
			discovered: HashMap::new(),
			closed: HashSet::new(),
			path: Vec::new(),
			cost: 0.0,
		}
	}
	/// Prepare the search, discarding the results of any previous run
	pub fn initialize(
		&mut self,
		start_point: Vec3,
		goal_point: Vec3,
		start_cell: CellId,
		goal_cell: CellId,
	) {
		self.reset();
		self.start_point = start_point;
		self.goal_point = goal_point;
		self.start_cell = start_cell;
		self.goal_cell = goal_cell;
		let mut root = PathNode::root(start_cell, start_point);
		root.set_h(self.heuristic.estimate(start_point, goal_point));
		let f = root.f();
		let index = self.pool.push(root);
		self.discovered.insert(start_cell, index);
		self.open.push(index, f);
		self.state = SearchState::Initialized;
	}
	/// Return to [SearchState::Uninitialized], keeping allocations for reuse
	pub fn reset(&mut self) {
		self.state = SearchState::Uninitialized;
		self.pool.clear();
		self.open.clear();
		self.discovered.clear();
		self.closed.clear();
		self.path.clear();
		self.cost = 0.0;
	}
	/// Expand a single node. Returns the state of the search afterwards,
	/// stepping a finished or uninitialised search does nothing
	pub fn process_step(&mut self, graph: &CellGraph) -> SearchState {
		match self.state {
			SearchState::Initialized => {
				self.state = SearchState::Processing;
				if self.start_cell == self.goal_cell {
					self.path.push(self.start_cell);
					self.cost = self.start_point.distance(self.goal_point);
					self.state = SearchState::Complete;
					return self.state;
				}
			}
			SearchState::Processing => {}
			_ => return self.state,
		}
		let Some(current) = self.pop_open() else {
			trace!("Open set exhausted before reaching {:?}", self.goal_cell);
			self.state = SearchState::Failed;
			return self.state;
		};
		let current_cell = self.pool.get(current).get_cell();
		self.closed.insert(current_cell);
		if current_cell == self.goal_cell {
			self.finish(current);
			return self.state;
		}
		let Some(cell) = graph.get_cell(current_cell) else {
			self.state = SearchState::Failed;
			return self.state;
		};
		for wall_index in 0..CELL_WALLS {
			let Some(neighbour) = cell.get_link(wall_index) else {
				continue;
			};
			if self.closed.contains(&neighbour) {
				continue;
			}
			let is_goal = neighbour == self.goal_cell;
			let is_dead_end = graph
				.get_cell(neighbour)
				.is_some_and(|n| n.link_count() == 1);
			if is_dead_end && !is_goal {
				// the only way out of a dead end is back through the current cell
				self.closed.insert(neighbour);
				continue;
			}
			let wall = cell.get_wall(wall_index);
			if let Some(&existing) = self.discovered.get(&neighbour) {
				let new_g = self
					.pool
					.get(existing)
					.estimate_new_g(self.pool.get(current), &wall);
				if new_g < self.pool.get(existing).g() {
					self.pool.relax(existing, current, &wall);
					let h = self
						.heuristic
						.estimate(self.pool.get(existing).get_reference_point(), self.goal_point);
					let node = self.pool.get_mut(existing);
					node.set_h(h);
					let f = node.f();
					self.open.push(existing, f);
				}
			} else {
				let mut node = PathNode::child(neighbour, current, self.pool.get(current), &wall);
				node.set_h(
					self.heuristic
						.estimate(node.get_reference_point(), self.goal_point),
				);
				let f = node.f();
				let index = self.pool.push(node);
				self.discovered.insert(neighbour, index);
				if is_goal && is_dead_end {
					self.finish(index);
					return self.state;
				}
				self.open.push(index, f);
			}
		}
		self.state
	}
	/// Step the search until it completes or fails
	pub fn run(&mut self, graph: &CellGraph) -> SearchState {
		while self.process_step(graph).is_active() {}
		self.state
	}
	/// Pop the next node whose cell has not been closed
	fn pop_open(&mut self) -> Option<NodeIndex> {
		while let Some(index) = self.open.pop() {
			if !self.closed.contains(&self.pool.get(index).get_cell()) {
				return Some(index);
			}
		}
		None
	}
	/// Record the corridor ending at `goal`
	fn finish(&mut self, goal: NodeIndex) {
		self.pool.load_path(goal, &mut self.path);
		let node = self.pool.get(goal);
		self.cost = node.g() + node.get_reference_point().distance(self.goal_point);
		self.state = SearchState::Complete;
		trace!(
			"Corridor of {} cells found after creating {} nodes",
			self.path.len(),
			self.pool.len()
		);
	}
	/// Get the state of the search
	pub fn state(&self) -> SearchState {
		self.state
	}
	/// Whether stepping can still make progress
	pub fn is_active(&self) -> bool {
		self.state.is_active()
	}
	/// Cells of the corridor, start first. Empty unless complete
	pub fn path_cells(&self) -> &[CellId] {
		&self.path
	}
	/// Cost of the corridor. Zero unless complete
	pub fn cost(&self) -> f32 {
		self.cost
	}
	/// Get the start point
	pub fn get_start_point(&self) -> Vec3 {
		self.start_point
	}
	/// Get the goal point
	pub fn get_goal_point(&self) -> Vec3 {
		self.goal_point
	}
	/// Get the start cell
	pub fn get_start_cell(&self) -> CellId {
		self.start_cell
	}
	/// Get the goal cell
	pub fn get_goal_cell(&self) -> CellId {
		self.goal_cell
	}
}
