use std::collections::{HashMap, HashSet};

use crate::error::{Result, StyloError};
use crate::features::Metric;

/// Unique tokens divided by total tokens.
///
/// # Errors
/// Returns `DegenerateInput` on an empty token sequence.
pub fn type_token_ratio(tokens: &[String]) -> Result<f64> {
	if tokens.is_empty() {
		return Err(StyloError::DegenerateInput("cannot compute type-token ratio of an empty corpus".to_owned()));
	}
	let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
	Ok(unique.len() as f64 / tokens.len() as f64)
}

/// Moving-average type-token ratio (MATTR), rounded to 2 decimals.
///
/// - Fewer tokens than `window_size`: whole-corpus type-token ratio
/// - Otherwise: mean of `unique / window_size` over every window at stride 1
///
/// The window is slid with an occurrence table, so each step costs O(1)
/// instead of rebuilding the window's set.
///
/// # Errors
/// - `DegenerateInput` if `tokens` is empty
/// - `InvalidParameter` if `window_size` is 0
pub fn moving_average_ttr(tokens: &[String], window_size: usize) -> Result<Metric> {
	if window_size == 0 {
		return Err(StyloError::InvalidParameter("window size must be >= 1".to_owned()));
	}
	if tokens.len() < window_size {
		return Ok(Metric::fixed(type_token_ratio(tokens)?, 2));
	}

	let mut occurrences: HashMap<&str, usize> = HashMap::new();
	for token in &tokens[..window_size] {
		*occurrences.entry(token.as_str()).or_insert(0) += 1;
	}

	let windows = tokens.len() - window_size + 1;
	let mut total = occurrences.len() as f64 / window_size as f64;

	for start in 1..windows {
		let leaving = tokens[start - 1].as_str();
		if let Some(count) = occurrences.get_mut(leaving) {
			*count -= 1;
			if *count == 0 {
				occurrences.remove(leaving);
			}
		}
		let entering = tokens[start + window_size - 1].as_str();
		*occurrences.entry(entering).or_insert(0) += 1;

		total += occurrences.len() as f64 / window_size as f64;
	}

	tracing::debug!(tokens = tokens.len(), window_size, windows, "computed MATTR");
	Ok(Metric::fixed(total / windows as f64, 2))
}
