use thiserror::Error;

/// Rejected node lists. Raised while building a [`GraphModel`](super::GraphModel).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
	/// The node list was empty.
	#[error("graph has no nodes")]
	Empty,
	/// Two nodes share an id.
	#[error("node id `{0}` is declared more than once")]
	DuplicateId(String),
	/// A parent id that no node carries.
	#[error("node `{node}` names parent `{parent}`, which does not exist")]
	MissingParent {
		/// Node declaring the parent.
		node: String,
		/// The unknown parent id.
		parent: String,
	},
	/// Following parents from this node loops.
	#[error("parent chain of node `{0}` never reaches a root")]
	ParentCycle(String),
}

/// Fatal failures of a mounted viewport.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewportError {
	/// The model could not be built.
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),
	/// The canvas refused a 2d context.
	#[error("could not acquire a 2d rendering context: {0}")]
	RenderingContext(String),
}
