//! The single worker which owns every search, the corridor cache and all
//! reads of the [CellGraph].
//!
//! Clients only ever hold a [Navigator], which pushes jobs onto a channel.
//! Each call to one of the `process` methods drains that channel, answers
//! cheap queries on the spot and steps the corridor searches in flight
//! round-robin until the configured time slice runs out.
//!
//! Cached corridors go through three stages as they age:
//! - younger than the repair age they are handed out as they are
//! - between the repair age and the max path age a short repair search from
//!   the new start point is run first, falling back to a full search if it
//!   fails
//! - past the max path age they are disposed
//!

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use super::jobs::{repair_goals, NavJob, PathEndpoints, PathJob, RepairJob};
use crate::prelude::*;
use bevy::prelude::*;

/// Worker serving path requests over a single [CellGraph]
#[derive(Component)]
pub struct MasterNavigator {
	/// Mesh searched by every job
	graph: Arc<CellGraph>,
	/// Tuning
	config: NavigatorConfig,
	/// Facade handed out to clients
	navigator: Navigator,
	/// Jobs submitted by clients
	receiver: Receiver<NavJob>,
	/// Shared with every [Navigator], set once disposed
	disposed: Arc<AtomicBool>,
	/// Creation time, ages are measured from here
	epoch: Instant,
	/// ID given to the next corridor built
	next_corridor_id: CorridorId,
	/// Reusable corridors
	cache: CorridorCache,
	/// Corridor searches in flight
	path_jobs: Vec<PathJob>,
	/// Repair searches in flight
	repair_jobs: Vec<RepairJob>,
	/// Nearest location queries awaiting the current pass
	nearest_jobs: Vec<(Vec3, NavRequest<Vec3>)>,
	/// Valid location queries awaiting the current pass
	valid_jobs: Vec<(Vec3, f32, NavRequest<bool>)>,
	/// Corridors to refresh at the next maintenance
	keep_alive: Vec<CorridorId>,
	/// Idle corridor searches
	astar_pool: Vec<AStarSearch>,
	/// Idle repair searches
	dijkstra_pool: Vec<DijkstraSearch>,
}

impl MasterNavigator {
	/// Create a navigator over `graph`. Fails if `config` is invalid
	pub fn new(graph: Arc<CellGraph>, config: NavigatorConfig) -> Result<Self, NavMeshError> {
		let config = config.validate()?;
		let (sender, receiver) = crossbeam_channel::unbounded();
		let disposed = Arc::new(AtomicBool::new(false));
		debug!(
			"Created navigator over {} cells with {:?}",
			graph.cell_count(),
			config
		);
		Ok(MasterNavigator {
			graph,
			config,
			navigator: Navigator::new(sender, Arc::clone(&disposed)),
			receiver,
			disposed,
			epoch: Instant::now(),
			next_corridor_id: 1,
			cache: CorridorCache::default(),
			path_jobs: Vec::new(),
			repair_jobs: Vec::new(),
			nearest_jobs: Vec::new(),
			valid_jobs: Vec::new(),
			keep_alive: Vec::new(),
			astar_pool: Vec::new(),
			dijkstra_pool: Vec::new(),
		})
	}
	/// Get the facade used to submit requests
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}
	/// Get the mesh
	pub fn get_graph(&self) -> &Arc<CellGraph> {
		&self.graph
	}
	/// Get the configuration
	pub fn get_config(&self) -> &NavigatorConfig {
		&self.config
	}
	/// Get the corridor cache
	pub fn get_cache(&self) -> &CorridorCache {
		&self.cache
	}
	/// Number of submitted jobs not yet admitted
	pub fn queued_count(&self) -> usize {
		self.receiver.len()
	}
	/// Number of searches being stepped
	pub fn in_flight_count(&self) -> usize {
		self.path_jobs.len() + self.repair_jobs.len()
	}
	/// Number of cached corridors
	pub fn cached_corridor_count(&self) -> usize {
		self.cache.len()
	}
	/// Number of idle searches kept for reuse
	pub fn search_pool_size(&self) -> usize {
		self.astar_pool.len() + self.dijkstra_pool.len()
	}
	/// Whether the navigator has been disposed
	pub fn is_disposed(&self) -> bool {
		self.disposed.load(Ordering::Acquire)
	}
	/// Stop accepting requests. Everything queued or in flight fails and the
	/// cached corridors are disposed. Disposing again does nothing
	pub fn dispose(&mut self) {
		if self.disposed.swap(true, Ordering::AcqRel) {
			return;
		}
		let failed = self.fail_outstanding();
		self.cache.dispose_all();
		debug!("Navigator disposed, {} requests failed", failed);
	}
	/// Work for up to the configured time slice. Without a time slice this is
	/// the same as [MasterNavigator::process_all]. Returns the time spent
	pub fn process(&mut self, include_maintenance: bool) -> Duration {
		let Some(timeslice) = self.config.max_processing_timeslice else {
			return self.process_all(include_maintenance);
		};
		let started = Instant::now();
		let deadline = started + timeslice;
		if !self.begin_pass(include_maintenance, Some(deadline)) {
			return Duration::ZERO;
		}
		loop {
			self.step_searches();
			if !self.has_search_work() || Instant::now() >= deadline {
				break;
			}
		}
		started.elapsed()
	}
	/// Admit everything queued and step each search in flight once
	pub fn process_once(&mut self, include_maintenance: bool) -> Duration {
		let started = Instant::now();
		if !self.begin_pass(include_maintenance, None) {
			return Duration::ZERO;
		}
		self.step_searches();
		started.elapsed()
	}
	/// Work until nothing is queued or in flight
	pub fn process_all(&mut self, include_maintenance: bool) -> Duration {
		let started = Instant::now();
		let mut maintain = include_maintenance;
		loop {
			if !self.begin_pass(maintain, None) {
				return Duration::ZERO;
			}
			maintain = false;
			while self.has_search_work() {
				self.step_searches();
			}
			if self.receiver.is_empty() {
				break;
			}
		}
		started.elapsed()
	}
	/// Apply keep alive requests and evict expired corridors
	pub fn maintain(&mut self) {
		if self.is_disposed() {
			return;
		}
		let now = self.now();
		for id in self.keep_alive.drain(..) {
			if !self.cache.refresh(id, now) {
				trace!("Keep alive for corridor {} which is no longer cached", id);
			}
		}
		let evicted = self.cache.purge_older_than(self.config.max_path_age, now);
		if evicted > 0 {
			debug!("Evicted {} corridors, {} remain cached", evicted, self.cache.len());
		}
	}
	/// Time since the navigator was created
	fn now(&self) -> Duration {
		self.epoch.elapsed()
	}
	/// Whether any search is in flight
	fn has_search_work(&self) -> bool {
		!self.path_jobs.is_empty() || !self.repair_jobs.is_empty()
	}
	/// Start a processing pass: optional maintenance, admission of queued jobs
	/// until `deadline` and the answers to cheap queries. Returns false if the
	/// navigator is disposed, in which case late submissions are failed
	fn begin_pass(&mut self, include_maintenance: bool, deadline: Option<Instant>) -> bool {
		if self.is_disposed() {
			self.fail_outstanding();
			return false;
		}
		if include_maintenance {
			self.maintain();
		}
		while let Ok(job) = self.receiver.try_recv() {
			self.admit(job);
			if deadline.is_some_and(|d| Instant::now() >= d) {
				break;
			}
		}
		self.answer_queries();
		true
	}
	/// Fail every queued and in-flight request. Returns how many failed
	fn fail_outstanding(&mut self) -> usize {
		let mut failed = 0;
		for job in self.path_jobs.drain(..) {
			job.request.fail();
			failed += 1;
		}
		for job in self.repair_jobs.drain(..) {
			job.request.fail();
			failed += 1;
		}
		for (_, request) in self.nearest_jobs.drain(..) {
			request.fail();
			failed += 1;
		}
		for (_, _, request) in self.valid_jobs.drain(..) {
			request.fail();
			failed += 1;
		}
		self.keep_alive.clear();
		while let Ok(job) = self.receiver.try_recv() {
			job.fail();
			failed += 1;
		}
		failed
	}
	/// Take a queued job on
	fn admit(&mut self, job: NavJob) {
		match job {
			NavJob::Path {
				start,
				goal,
				request,
			} => {
				request.mark_processing();
				self.admit_path(start, goal, request);
			}
			NavJob::Repair {
				start,
				corridor,
				request,
			} => {
				request.mark_processing();
				self.admit_repair(start, corridor, request);
			}
			NavJob::KeepAlive { corridor_id } => self.keep_alive.push(corridor_id),
			NavJob::NearestLocation { point, request } => {
				request.mark_processing();
				self.nearest_jobs.push((point, request));
			}
			NavJob::ValidLocation {
				point,
				y_tolerance,
				request,
			} => {
				request.mark_processing();
				self.valid_jobs.push((point, y_tolerance, request));
			}
		}
	}
	/// Serve a corridor request from the cache, repair a stale cached
	/// corridor or start a fresh search
	fn admit_path(&mut self, start: Vec3, goal: Vec3, request: NavRequest<Corridor>) {
		let (Some((start_cell, start_point)), Some((goal_cell, goal_point))) = (
			self.graph.closest_cell(start, true),
			self.graph.closest_cell(goal, true),
		) else {
			debug!("Corridor request from {} to {} is off the mesh", start, goal);
			request.fail();
			return;
		};
		let endpoints = PathEndpoints {
			start_point,
			goal_point,
			start_cell,
			goal_cell,
		};
		if self.config.is_caching() {
			let now = self.now();
			let cached = self
				.cache
				.get_corridor(start_cell, goal_cell)
				.map(|(metadata, master)| (metadata.age(now), Arc::clone(master)));
			if let Some((age, master)) = cached {
				if age <= self.config.repair_age {
					trace!("Corridor {} served from cache", master.id());
					self.cache.refresh(master.id(), now);
					request.complete(master.with_goal(goal_point));
					return;
				}
				if age <= self.config.max_path_age {
					trace!("Corridor {} is stale, repairing", master.id());
					self.start_repair(start_point, start_cell, master, goal_point, request, Some(endpoints));
					return;
				}
				self.cache.remove(start_cell, goal_cell);
			}
		}
		self.start_path(endpoints, request);
	}
	/// Start a repair of a corridor a client holds
	fn admit_repair(&mut self, start: Vec3, corridor: Corridor, request: NavRequest<Corridor>) {
		let cached = self
			.cache
			.find_by_id(corridor.id())
			.map(|(_, master)| Arc::clone(master));
		let Some(master) = cached else {
			debug!("Corridor {} is not cached, cannot repair", corridor.id());
			request.fail();
			return;
		};
		let Some((start_cell, start_point)) = self.graph.closest_cell(start, true) else {
			debug!("Repair start {} is off the mesh", start);
			request.fail();
			return;
		};
		self.start_repair(start_point, start_cell, master, corridor.get_goal(), request, None);
	}
	/// Put a corridor search in flight
	fn start_path(&mut self, endpoints: PathEndpoints, request: NavRequest<Corridor>) {
		let heuristic = self.config.heuristic;
		let mut search = self
			.astar_pool
			.pop()
			.unwrap_or_else(|| AStarSearch::new(heuristic));
		search.initialize(
			endpoints.start_point,
			endpoints.goal_point,
			endpoints.start_cell,
			endpoints.goal_cell,
		);
		self.path_jobs.push(PathJob { request, search });
	}
	/// Put a repair search in flight
	fn start_repair(
		&mut self,
		start_point: Vec3,
		start_cell: CellId,
		master: Arc<MasterCorridor>,
		goal_point: Vec3,
		request: NavRequest<Corridor>,
		fallback: Option<PathEndpoints>,
	) {
		let mut search = self.dijkstra_pool.pop().unwrap_or_default();
		search.initialize(
			start_point,
			start_cell,
			repair_goals(&self.graph, &master, goal_point),
			self.config.repair_search_depth,
			false,
		);
		self.repair_jobs.push(RepairJob {
			request,
			master,
			goal_point,
			search,
			fallback,
		});
	}
	/// Answer nearest and valid location queries
	fn answer_queries(&mut self) {
		for (point, request) in self.nearest_jobs.drain(..) {
			match self.graph.closest_cell(point, false) {
				Some((_, nearest)) => request.complete(nearest),
				None => request.fail(),
			}
		}
		for (point, y_tolerance, request) in self.valid_jobs.drain(..) {
			request.complete(self.graph.is_valid_position(point, y_tolerance));
		}
	}
	/// Step every search in flight once, resolving those that finish
	fn step_searches(&mut self) {
		let mut index = 0;
		while index < self.path_jobs.len() {
			if self.path_jobs[index].search.process_step(&self.graph).is_active() {
				index += 1;
			} else {
				let job = self.path_jobs.swap_remove(index);
				self.finish_path(job);
			}
		}
		let mut index = 0;
		while index < self.repair_jobs.len() {
			if self.repair_jobs[index].search.process_step(&self.graph).is_active() {
				index += 1;
			} else {
				let job = self.repair_jobs.swap_remove(index);
				self.finish_repair(job);
			}
		}
	}
	/// Build, cache and hand out a corridor made of `cells`. [None] if the
	/// cells do not form a corridor
	fn publish(&mut self, cells: &[CellId], goal_point: Vec3) -> Option<Corridor> {
		let id = self.next_corridor_id;
		let master = Arc::new(MasterCorridor::new(id, &self.graph, cells)?);
		self.next_corridor_id += 1;
		if self.config.is_caching() {
			let now = self.now();
			self.cache.insert(Arc::clone(&master), now);
		}
		debug!("Built corridor {} of {} cells", id, master.cell_count());
		Some(master.with_goal(goal_point))
	}
	/// Resolve a finished corridor search
	fn finish_path(&mut self, mut job: PathJob) {
		let corridor = match job.search.state() {
			SearchState::Complete => {
				let cells = job.search.path_cells().to_vec();
				self.publish(&cells, job.search.get_goal_point())
			}
			_ => None,
		};
		match corridor {
			Some(corridor) => job.request.complete(corridor),
			None => {
				debug!(
					"No corridor from {:?} to {:?}",
					job.search.get_start_cell(),
					job.search.get_goal_cell()
				);
				job.request.fail();
			}
		}
		job.search.reset();
		if self.astar_pool.len() < self.config.search_pool_max {
			self.astar_pool.push(job.search);
		}
	}
	/// Resolve a finished repair search, falling back to a full search when
	/// a stale cached corridor could not be repaired
	fn finish_repair(&mut self, mut job: RepairJob) {
		let spliced = match job.search.state() {
			SearchState::Complete => job.spliced_cells(),
			_ => None,
		};
		let corridor = spliced.and_then(|cells| self.publish(&cells, job.goal_point));
		match (corridor, job.fallback) {
			(Some(corridor), _) => {
				debug!("Repaired corridor {} as {}", job.master.id(), corridor.id());
				job.request.complete(corridor);
			}
			(None, Some(endpoints)) => {
				debug!("Repair of corridor {} failed, searching again", job.master.id());
				self.cache.remove(endpoints.start_cell, endpoints.goal_cell);
				self.start_path(endpoints, job.request.clone());
			}
			(None, None) => {
				debug!("Repair of corridor {} failed", job.master.id());
				job.request.fail();
			}
		}
		job.search.reset();
		if self.dijkstra_pool.len() < self.config.search_pool_max {
			self.dijkstra_pool.push(job.search);
		}
	}
}

impl Drop for MasterNavigator {
	fn drop(&mut self) {
		self.dispose();
		// jobs which slipped in after an earlier dispose drained the queue
		self.fail_outstanding();
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	fn strip_navigator(cells: usize, config: NavigatorConfig) -> MasterNavigator {
		let mesh = mesh_fixtures::strip(cells);
		let graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.0).unwrap();
		MasterNavigator::new(Arc::new(graph), config).unwrap()
	}
	fn centroid(master: &MasterNavigator, cell: usize) -> Vec3 {
		master.get_graph().get_cell(CellId::new(cell)).unwrap().get_centroid()
	}
	#[test]
	fn invalid_config_rejected() {
		let mesh = mesh_fixtures::strip(3);
		let graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.0).unwrap();
		let config = NavigatorConfig::default().with_repair_search_depth(0);
		assert!(MasterNavigator::new(Arc::new(graph), config).is_err());
	}
	#[test]
	fn path_completes_after_processing() {
		let mut master = strip_navigator(10, NavigatorConfig::default());
		let request = master.navigator().get_path(centroid(&master, 0), centroid(&master, 9));
		assert_eq!(NavRequestState::Pending, request.state());
		master.process_all(false);
		let corridor = request.data().unwrap();
		assert_eq!(10, corridor.cell_count());
		assert_eq!(1, master.cached_corridor_count());
		assert_eq!(0, master.in_flight_count());
		assert_eq!(1, master.search_pool_size());
	}
	#[test]
	fn process_once_steps_each_search() {
		let mut master = strip_navigator(10, NavigatorConfig::default());
		let request = master.navigator().get_path(centroid(&master, 0), centroid(&master, 9));
		master.process_once(false);
		assert_eq!(NavRequestState::Processing, request.state());
		assert_eq!(1, master.in_flight_count());
		while !request.is_finished() {
			master.process_once(false);
		}
		assert_eq!(NavRequestState::Complete, request.state());
	}
	#[test]
	fn cache_hit_shares_master() {
		let mut master = strip_navigator(10, NavigatorConfig::default());
		let first = master.navigator().get_path(centroid(&master, 0), centroid(&master, 9));
		master.process_all(false);
		let goal = centroid(&master, 9) + Vec3::new(0.05, 0.0, 0.0);
		let second = master.navigator().get_path(centroid(&master, 0), goal);
		master.process_once(false);
		let (a, b) = (first.data().unwrap(), second.data().unwrap());
		assert_eq!(a.id(), b.id());
		assert!(b.get_goal().distance(goal) < TOLERANCE);
	}
	#[test]
	fn caching_disabled() {
		let config = NavigatorConfig::default().with_path_ages(Duration::ZERO, Duration::ZERO);
		let mut master = strip_navigator(6, config);
		let first = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		let second = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		master.process_all(false);
		assert_ne!(first.data().unwrap().id(), second.data().unwrap().id());
		assert_eq!(0, master.cached_corridor_count());
		let repair = master.navigator().repair_path(centroid(&master, 1), first.data().unwrap());
		master.process_all(false);
		assert_eq!(NavRequestState::Failed, repair.state());
	}
	#[test]
	fn off_mesh_request_fails() {
		let mut master = strip_navigator(4, NavigatorConfig::default());
		let request = master.navigator().get_path(Vec3::new(-10.0, 0.0, -10.0), centroid(&master, 3));
		master.process_all(false);
		assert_eq!(NavRequestState::Failed, request.state());
	}
	#[test]
	fn unreachable_goal_fails() {
		let mesh = mesh_fixtures::islands();
		let graph = CellGraph::build(mesh.vertices, mesh.indices, 0.5, 0.0).unwrap();
		let goal = graph.get_cell(CellId::new(graph.cell_count() - 1)).unwrap().get_centroid();
		let start = graph.get_cell(CellId::new(0)).unwrap().get_centroid();
		let mut master = MasterNavigator::new(Arc::new(graph), NavigatorConfig::default()).unwrap();
		let request = master.navigator().get_path(start, goal);
		master.process_all(false);
		assert_eq!(NavRequestState::Failed, request.state());
		assert_eq!(0, master.cached_corridor_count());
	}
	#[test]
	fn repair_rejoins_corridor() {
		let mut master = strip_navigator(10, NavigatorConfig::default());
		let request = master.navigator().get_path(centroid(&master, 4), centroid(&master, 9));
		master.process_all(false);
		let corridor = request.data().unwrap().clone();
		let repair = master.navigator().repair_path(centroid(&master, 2), &corridor);
		master.process_all(false);
		let repaired = repair.data().unwrap();
		let expected: Vec<CellId> = (2..10).map(CellId::new).collect();
		assert_eq!(expected.as_slice(), repaired.get_cells());
		assert_eq!(corridor.get_goal(), repaired.get_goal());
		assert_ne!(corridor.id(), repaired.id());
	}
	#[test]
	fn repair_out_of_depth_fails() {
		let config = NavigatorConfig::default().with_repair_search_depth(1);
		let mut master = strip_navigator(10, config);
		let request = master.navigator().get_path(centroid(&master, 6), centroid(&master, 9));
		master.process_all(false);
		let corridor = request.data().unwrap().clone();
		let repair = master.navigator().repair_path(centroid(&master, 1), &corridor);
		master.process_all(false);
		assert_eq!(NavRequestState::Failed, repair.state());
	}
	#[test]
	fn queries_answer_in_one_pass() {
		let mut master = strip_navigator(4, NavigatorConfig::default());
		let nearest = master.navigator().get_nearest_valid_location(Vec3::new(0.5, 3.0, 0.5));
		let valid = master.navigator().is_valid_location(Vec3::new(0.5, 0.05, 0.5), 0.1);
		let invalid = master.navigator().is_valid_location(Vec3::new(0.5, 2.0, 0.5), 0.1);
		master.process_once(false);
		assert_eq!(Some(&Vec3::new(0.5, 0.0, 0.5)), nearest.data());
		assert_eq!(Some(&true), valid.data());
		assert_eq!(Some(&false), invalid.data());
	}
	#[test]
	fn dispose_fails_outstanding_work() {
		let mut master = strip_navigator(10, NavigatorConfig::default());
		let in_flight = master.navigator().get_path(centroid(&master, 0), centroid(&master, 9));
		master.process_once(false);
		let queued = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		master.dispose();
		assert!(master.is_disposed());
		assert_eq!(NavRequestState::Failed, in_flight.state());
		assert_eq!(NavRequestState::Failed, queued.state());
		let late = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		assert_eq!(NavRequestState::Failed, late.state());
		master.dispose();
		assert_eq!(Duration::ZERO, master.process_all(true));
		assert!(master.is_disposed());
	}
	#[test]
	fn dispose_disposes_cached_corridors() {
		let mut master = strip_navigator(6, NavigatorConfig::default());
		let request = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		master.process_all(false);
		let corridor = request.data().unwrap().clone();
		drop(master);
		assert!(corridor.is_disposed());
	}
	#[test]
	fn keep_alive_applied_during_maintenance() {
		let mut master = strip_navigator(6, NavigatorConfig::default());
		let request = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		master.process_all(false);
		let corridor = request.data().unwrap().clone();
		let before = master.get_cache().find_by_id(corridor.id()).unwrap().0.get_time_generated();
		std::thread::sleep(Duration::from_millis(5));
		master.navigator().keep_path_alive(&corridor);
		master.process_all(false);
		master.maintain();
		let after = master.get_cache().find_by_id(corridor.id()).unwrap().0.get_time_generated();
		assert!(after > before);
	}
	#[test]
	fn cache_hit_restarts_age() {
		let mut master = strip_navigator(6, NavigatorConfig::default());
		let first = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		master.process_all(false);
		let id = first.data().unwrap().id();
		let before = master.get_cache().find_by_id(id).unwrap().0.get_time_generated();
		std::thread::sleep(Duration::from_millis(5));
		let second = master.navigator().get_path(centroid(&master, 0), centroid(&master, 5));
		master.process_all(false);
		assert_eq!(id, second.data().unwrap().id());
		let after = master.get_cache().find_by_id(id).unwrap().0.get_time_generated();
		assert!(after > before);
	}
	#[test]
	fn job_queued_after_dispose_fails_on_next_pass() {
		let mut master = strip_navigator(6, NavigatorConfig::default());
		let navigator = master.navigator().clone();
		master.dispose();
		let request = NavRequest::new();
		assert!(navigator.send_job(NavJob::Path {
			start: centroid(&master, 0),
			goal: centroid(&master, 5),
			request: request.clone(),
		}));
		assert_eq!(NavRequestState::Pending, request.state());
		assert_eq!(Duration::ZERO, master.process(false));
		assert_eq!(NavRequestState::Failed, request.state());
	}
	#[test]
	fn job_queued_after_dispose_fails_on_drop() {
		let mut master = strip_navigator(6, NavigatorConfig::default());
		let navigator = master.navigator().clone();
		master.dispose();
		let request = NavRequest::new();
		assert!(navigator.send_job(NavJob::NearestLocation {
			point: Vec3::ZERO,
			request: request.clone(),
		}));
		drop(master);
		assert_eq!(NavRequestState::Failed, request.state());
		let late = navigator.get_nearest_valid_location(Vec3::ZERO);
		assert_eq!(NavRequestState::Failed, late.state());
	}
}
