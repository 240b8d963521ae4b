//! Geometry of the navigation surface. A mesh of convex triangles is linked
//! into a [CellGraph] through the walls they share
//!

pub mod cell;
pub mod cell_graph;
pub mod utilities;
