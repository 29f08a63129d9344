use thiserror::Error;

/// Errors surfaced by the trim pipeline and the path data parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrimError {
	/// Fewer paths were provided than the pipeline can meaningfully trim.
	#[error("at least {minimum} paths are required, but {actual} were provided")]
	InsufficientPaths { minimum: usize, actual: usize },

	/// More paths were provided than the pairwise intersection pass accepts.
	#[error("at most {maximum} paths are supported, but {actual} were provided")]
	TooManyPaths { maximum: usize, actual: usize },

	/// A path element carried data that does not describe a path.
	#[error("path {path_id} is malformed: {reason}")]
	InvalidElementType { path_id: u64, reason: String },

	/// The path data string could not be parsed.
	#[error("invalid path data at byte {position}: {reason}")]
	ParseError { position: usize, reason: String },

	/// Input geometry contained non-finite coordinates.
	#[error("path {path_id} contains non-finite coordinates")]
	DegenerateGeometry { path_id: u64 },
}
