//! Errors raised while building a [crate::navmesh::cell_graph::CellGraph] or
//! configuring a [crate::navigator::master::MasterNavigator]
//!
//! Search failures and requests made after disposal are not errors, they
//! surface as a failed [crate::navigator::request::NavRequest] instead
//!

/// Invalid input supplied when constructing navigation state
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NavMeshError {
	/// No vertices or no triangles were supplied
	#[error("navigation mesh has no geometry")]
	EmptyGeometry,
	/// A triangle refers to a vertex beyond the end of the vertex buffer
	#[error("triangle {triangle} references vertex {index} but only {vertex_count} vertices exist")]
	IndexOutOfRange {
		/// Offending triangle
		triangle: usize,
		/// Offending vertex index
		index: u32,
		/// Length of the vertex buffer
		vertex_count: usize,
	},
	/// A vertex has a NaN or infinite component
	#[error("vertex {0} is not finite")]
	NonFiniteVertex(usize),
	/// A triangle has no area when projected onto the xz plane
	#[error("triangle {0} is degenerate in the xz plane")]
	DegenerateTriangle(usize),
	/// More than two triangles share the same edge
	#[error("edge ({0}, {1}) is shared by more than two triangles")]
	NonManifoldEdge(u32, u32),
	/// Tolerances must be finite and not negative
	#[error("tolerance {0} must be finite and not negative")]
	InvalidTolerance(f32),
	/// A repair search must be allowed to cross at least one wall
	#[error("repair search depth must be at least 1")]
	InvalidRepairDepth,
}

/// Failure to load a [crate::navigator::config::NavigatorConfig] from disk
#[cfg(feature = "ron")]
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
	/// The file could not be opened
	#[error("failed opening navigator config: {0}")]
	Io(#[from] std::io::Error),
	/// The file contents are not a valid config
	#[error("failed deserializing navigator config: {0}")]
	Ron(#[from] ron::error::SpannedError),
	/// The file deserialized but holds invalid values
	#[error(transparent)]
	Invalid(#[from] NavMeshError),
}
