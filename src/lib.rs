//! This is a plugin for Bevy game engine to find corridors across a
//! triangulated navigation mesh and serve them to many threads at once
//!

pub mod corridor;
pub mod error;
pub mod navigator;
pub mod navmesh;
pub mod plugin;
pub mod search;

pub mod prelude;
