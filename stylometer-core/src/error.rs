//! Error types for the stylometer engine.

use thiserror::Error;

/// Main error type for the library.
///
/// Only conditions that make a whole run meaningless live here. A metric
/// that is undefined for a particular corpus (zero variance, no sentences in
/// a chunk, ...) is reported as [`crate::features::Metric::Undefined`]
/// instead.
#[derive(Error, Debug)]
pub enum StyloError {
	#[error("Degenerate input: {0}")]
	DegenerateInput(String),

	#[error("Invalid parameter: {0}")]
	InvalidParameter(String),

	#[error("Annotator error: {0}")]
	Annotator(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON serialization error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Annotation cache error: {0}")]
	Cache(#[from] postcard::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, StyloError>;
