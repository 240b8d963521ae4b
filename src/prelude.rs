//! `use bevy_trinav_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::navmesh::{cell::*, cell_graph::*, utilities::*};

#[doc(hidden)]
pub use crate::search::{
	astar::*, dijkstra::*, heuristic::*, open_set::*, path_node::*, *,
};

#[doc(hidden)]
pub use crate::{
	corridor::*,
	error::*,
	navigator::{cache::*, client::*, config::*, master::*, request::*},
	plugin::{navigation_layer::*, *},
};
