//! Serves corridor requests from many threads while a single worker does the
//! searching.
//!
//! A [master::MasterNavigator] owns the graph, the searches and the corridor
//! cache. Clients hold a cloned [client::Navigator] and poll the
//! [request::NavRequest] handles it returns
//!

pub mod cache;
pub mod client;
pub mod config;
pub(crate) mod jobs;
pub mod master;
pub mod request;
