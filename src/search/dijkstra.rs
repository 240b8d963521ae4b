//! Uninformed search from a start point toward any number of goal cells.
//!
//! Used to repair corridors: the goals are the cells of an existing corridor
//! and the search only needs to find a short hop back onto it
//!

use std::collections::{HashMap, HashSet};

use crate::prelude::*;
use bevy::prelude::*;

/// A path found by a [DijkstraSearch] to one of its goals
#[derive(Clone, Debug, PartialEq)]
pub struct MultiGoalPath {
	/// Cells from the start cell to the goal cell
	cells: Vec<CellId>,
	/// Cost of reaching the goal cell
	cost: f32,
	/// The true target within the goal cell
	goal_point: Vec3,
	/// Distance from where the path enters the goal cell to the goal point
	terminal_cost: f32,
}

impl MultiGoalPath {
	/// Get the cells, start first
	pub fn get_cells(&self) -> &[CellId] {
		&self.cells
	}
	/// Get the cell the path ends in
	pub fn goal_cell(&self) -> Option<CellId> {
		self.cells.last().copied()
	}
	/// Get the goal point
	pub fn get_goal_point(&self) -> Vec3 {
		self.goal_point
	}
	/// Cost of reaching the goal cell
	pub fn cost(&self) -> f32 {
		self.cost
	}
	/// Cost of reaching the goal point
	pub fn total_cost(&self) -> f32 {
		self.cost + self.terminal_cost
	}
	/// Number of cells
	pub fn len(&self) -> usize {
		self.cells.len()
	}
	/// Whether the path has no cells
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
}

/// Dijkstra search with dead end pruning, a depth bound and optional early exit
#[derive(Clone, Debug, Default)]
pub struct DijkstraSearch {
	/// Lifecycle of the search
	state: SearchState,
	/// Where the search starts from
	start_point: Vec3,
	/// Cell containing the start point
	start_cell: CellId,
	/// Goals not yet reached, as (cell, point) pairs
	goals: Vec<(CellId, Vec3)>,
	/// Nodes this many wall crossings from the start are not expanded
	max_depth: usize,
	/// Stop at the first goal reached
	select_first: bool,
	/// Every node created by the search
	pool: NodePool,
	/// Frontier
	open: OpenSet,
	/// Node created for each cell seen so far
	discovered: HashMap<CellId, NodeIndex>,
	/// Cells which will not be expanded again
	closed: HashSet<CellId>,
	/// One path per goal reached
	paths: Vec<MultiGoalPath>,
}

impl DijkstraSearch {
	/// Prepare the search, discarding the results of any previous run.
	///
	/// `max_depth` is the number of walls a path may cross, values below `1`
	/// are raised to `1`
	pub fn initialize(
		&mut self,
		start_point: Vec3,
		start_cell: CellId,
		goals: impl IntoIterator<Item = (CellId, Vec3)>,
		max_depth: usize,
		select_first: bool,
	) {
		self.reset();
		self.start_point = start_point;
		self.start_cell = start_cell;
		self.goals.extend(goals);
		self.max_depth = max_depth.max(1);
		self.select_first = select_first;
		let index = self.pool.push(PathNode::root(start_cell, start_point));
		self.discovered.insert(start_cell, index);
		self.open.push(index, 0.0);
		self.state = if self.goals.is_empty() {
			SearchState::Failed
		} else {
			SearchState::Initialized
		};
	}
	/// Return to [SearchState::Uninitialized], keeping allocations for reuse
	pub fn reset(&mut self) {
		self.state = SearchState::Uninitialized;
		self.goals.clear();
		self.pool.clear();
		self.open.clear();
		self.discovered.clear();
		self.closed.clear();
		self.paths.clear();
	}
	/// Expand a single node. Returns the state of the search afterwards
	pub fn process_step(&mut self, graph: &CellGraph) -> SearchState {
		match self.state {
			SearchState::Initialized => self.state = SearchState::Processing,
			SearchState::Processing => {}
			_ => return self.state,
		}
		let Some(current) = self.pop_open() else {
			self.state = if self.paths.is_empty() {
				SearchState::Failed
			} else {
				SearchState::Complete
			};
			return self.state;
		};
		let current_cell = self.pool.get(current).get_cell();
		self.closed.insert(current_cell);
		// goals are claimed as they are popped so paths are found cheapest first
		if self.is_goal(current_cell) {
			self.claim_goals(current);
			if self.select_first || self.goals.is_empty() {
				self.state = SearchState::Complete;
				return self.state;
			}
		}
		if self.pool.get(current).path_size() > self.max_depth {
			return self.state;
		}
		let Some(cell) = graph.get_cell(current_cell) else {
			return self.state;
		};
		for wall_index in 0..CELL_WALLS {
			let Some(neighbour) = cell.get_link(wall_index) else {
				continue;
			};
			if self.closed.contains(&neighbour) {
				continue;
			}
			let is_dead_end = graph
				.get_cell(neighbour)
				.is_some_and(|n| n.link_count() == 1);
			if is_dead_end && !self.is_goal(neighbour) {
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
					self.open.push(existing, new_g);
				}
			} else {
				let node = PathNode::child(neighbour, current, self.pool.get(current), &wall);
				let g = node.g();
				let index = self.pool.push(node);
				self.discovered.insert(neighbour, index);
				self.open.push(index, g);
			}
		}
		self.state
	}
	/// Step the search until it completes or fails
	pub fn run(&mut self, graph: &CellGraph) -> SearchState {
		while self.process_step(graph).is_active() {}
		self.state
	}
	/// Whether `cell` is one of the outstanding goals
	fn is_goal(&self, cell: CellId) -> bool {
		self.goals.iter().any(|(c, _)| *c == cell)
	}
	/// Record a path for every outstanding goal in the cell of `node`
	fn claim_goals(&mut self, node: NodeIndex) {
		let cell = self.pool.get(node).get_cell();
		let mut cells = Vec::new();
		self.pool.load_path(node, &mut cells);
		let reached = self.pool.get(node);
		let mut remaining = Vec::with_capacity(self.goals.len());
		for (goal_cell, goal_point) in self.goals.drain(..) {
			let already_claimed = self.select_first && !self.paths.is_empty();
			if goal_cell == cell && !already_claimed {
				self.paths.push(MultiGoalPath {
					cells: cells.clone(),
					cost: reached.g(),
					goal_point,
					terminal_cost: reached.get_reference_point().distance(goal_point),
				});
			} else {
				remaining.push((goal_cell, goal_point));
			}
		}
		self.goals = remaining;
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
	/// Get the state of the search
	pub fn state(&self) -> SearchState {
		self.state
	}
	/// Whether stepping can still make progress
	pub fn is_active(&self) -> bool {
		self.state.is_active()
	}
	/// Paths found, one per goal reached in no particular order
	pub fn paths(&self) -> &[MultiGoalPath] {
		&self.paths
	}
	/// Number of paths found
	pub fn path_count(&self) -> usize {
		self.paths.len()
	}
	/// Get the start point
	pub fn get_start_point(&self) -> Vec3 {
		self.start_point
	}
	/// Get the start cell
	pub fn get_start_cell(&self) -> CellId {
		self.start_cell
	}
	/// Get the depth bound
	pub fn get_max_depth(&self) -> usize {
		self.max_depth
	}
}
