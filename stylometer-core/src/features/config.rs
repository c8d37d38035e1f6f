use std::ops::RangeInclusive;

use crate::error::{Result, StyloError};

/// Tunable parameters of the feature engine.
///
/// `EngineConfig` is passed explicitly to every feature module; no module
/// keeps defaults of its own.
///
/// # Responsibilities
/// - Hold the MATTR window, the n-gram size range, qualifier and cap, and the
///   readability chunk size
/// - Reject values that would make a module meaningless
///
/// # Invariants
/// - `window_size >= 1`
/// - `1 <= ngram_min <= ngram_max`
/// - `ngram_cap >= 1`
/// - `chunk_size >= 1`
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
	/// MATTR window width.
	window_size: usize,

	/// Smallest n-gram size mined.
	ngram_min: usize,

	/// Largest n-gram size mined (inclusive).
	ngram_max: usize,

	/// An n-gram must occur strictly more often than this to be reported.
	ngram_qualifier: usize,

	/// Maximum number of n-grams reported per size.
	ngram_cap: usize,

	/// Number of sentences per readability chunk.
	chunk_size: usize,

	/// Mine n-gram sizes on worker threads.
	pub parallel_ngrams: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			window_size: 250,
			ngram_min: 3,
			ngram_max: 10,
			ngram_qualifier: 3,
			ngram_cap: 10,
			chunk_size: 10,
			parallel_ngrams: false,
		}
	}
}

impl EngineConfig {
	pub fn window_size(&self) -> usize {
		self.window_size
	}

	pub fn ngram_range(&self) -> RangeInclusive<usize> {
		self.ngram_min..=self.ngram_max
	}

	pub fn ngram_qualifier(&self) -> usize {
		self.ngram_qualifier
	}

	pub fn ngram_cap(&self) -> usize {
		self.ngram_cap
	}

	pub fn chunk_size(&self) -> usize {
		self.chunk_size
	}

	/// Sets the MATTR window width.
	///
	/// # Errors
	/// Returns an error if `window_size` is 0.
	pub fn set_window_size(&mut self, window_size: usize) -> Result<()> {
		if window_size == 0 {
			return Err(StyloError::InvalidParameter("window size must be >= 1".to_owned()));
		}
		self.window_size = window_size;
		Ok(())
	}

	/// Sets the inclusive range of n-gram sizes.
	///
	/// # Errors
	/// Returns an error if `min` is 0 or greater than `max`.
	pub fn set_ngram_range(&mut self, min: usize, max: usize) -> Result<()> {
		if min == 0 || min > max {
			return Err(StyloError::InvalidParameter(format!(
				"n-gram range must satisfy 1 <= min <= max, got {}..={}",
				min, max
			)));
		}
		self.ngram_min = min;
		self.ngram_max = max;
		Ok(())
	}

	/// Sets the minimum-occurrence qualifier. Any value is valid.
	pub fn set_ngram_qualifier(&mut self, qualifier: usize) {
		self.ngram_qualifier = qualifier;
	}

	/// Sets the per-size result cap.
	///
	/// # Errors
	/// Returns an error if `cap` is 0.
	pub fn set_ngram_cap(&mut self, cap: usize) -> Result<()> {
		if cap == 0 {
			return Err(StyloError::InvalidParameter("n-gram cap must be >= 1".to_owned()));
		}
		self.ngram_cap = cap;
		Ok(())
	}

	/// Sets the readability chunk size.
	///
	/// # Errors
	/// Returns an error if `chunk_size` is 0.
	pub fn set_chunk_size(&mut self, chunk_size: usize) -> Result<()> {
		if chunk_size == 0 {
			return Err(StyloError::InvalidParameter("chunk size must be >= 1".to_owned()));
		}
		self.chunk_size = chunk_size;
		Ok(())
	}
}
