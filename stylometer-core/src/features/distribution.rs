use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, StyloError};
use crate::features::Metric;

/// Shape of the sentence-length distribution.
///
/// Lengths are word counts, one per sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceLengthStats {
	/// Arithmetic mean, 0 decimals.
	pub mean: Metric,
	/// Population standard deviation (divisor n), 2 decimals.
	pub standard_deviation: Metric,
	/// Longest minus shortest, 0 decimals.
	pub range: Metric,
	/// Median, 0 decimals.
	pub median: Metric,
	/// `sorted[3n/4] - sorted[n/4]` with truncated indices, 0 decimals.
	#[serde(rename = "IQR")]
	pub iqr: Metric,
	/// Third standardized moment; undefined at zero variance.
	pub skewness: Metric,
	/// Fourth standardized moment minus 3; undefined at zero variance.
	pub kurtosis: Metric,
	/// Base-2 Shannon entropy of the length frequencies, 2 decimals.
	pub entropy: Metric,
}

impl std::fmt::Display for SentenceLengthStats {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "Sentence Length Distribution")?;
		writeln!(f, "  Mean:      {}", self.mean)?;
		writeln!(f, "  Std dev:   {}", self.standard_deviation)?;
		writeln!(f, "  Range:     {}", self.range)?;
		writeln!(f, "  Median:    {}", self.median)?;
		writeln!(f, "  IQR:       {}", self.iqr)?;
		writeln!(f, "  Skewness:  {}", self.skewness)?;
		writeln!(f, "  Kurtosis:  {}", self.kurtosis)?;
		writeln!(f, "  Entropy:   {}", self.entropy)?;
		Ok(())
	}
}

/// Describe a sample of sentence lengths.
///
/// # Errors
/// Returns `DegenerateInput` on an empty sample.
pub fn describe_lengths(lengths: &[usize]) -> Result<SentenceLengthStats> {
	if lengths.is_empty() {
		return Err(StyloError::DegenerateInput("no sentences to describe".to_owned()));
	}

	let n = lengths.len() as f64;
	let mean = lengths.iter().map(|&l| l as f64).sum::<f64>() / n;
	let variance = lengths.iter().map(|&l| (l as f64 - mean).powi(2)).sum::<f64>() / n;
	let std_dev = variance.sqrt();

	let mut sorted = lengths.to_vec();
	sorted.sort_unstable();
	let len = sorted.len();

	let range = sorted[len - 1] - sorted[0];
	let median = if len % 2 == 0 {
		(sorted[len / 2 - 1] + sorted[len / 2]) as f64 / 2.0
	} else {
		sorted[len / 2] as f64
	};
	let q1 = sorted[len / 4];
	let q3 = sorted[3 * len / 4];

	let (skewness, kurtosis) = if std_dev == 0.0 {
		(Metric::Undefined, Metric::Undefined)
	} else {
		let skew = standardized_moment(lengths, mean, std_dev, 3);
		let kurt = standardized_moment(lengths, mean, std_dev, 4) - 3.0;
		(Metric::fixed(skew, 2), Metric::fixed(kurt, 2))
	};

	tracing::debug!(sentences = len, mean, std_dev, "described sentence lengths");

	Ok(SentenceLengthStats {
		mean: Metric::fixed(mean, 0),
		standard_deviation: Metric::fixed(std_dev, 2),
		range: Metric::fixed(range as f64, 0),
		median: Metric::fixed(median, 0),
		iqr: Metric::fixed((q3 - q1) as f64, 0),
		skewness,
		kurtosis,
		entropy: Metric::fixed(length_entropy(lengths), 2),
	})
}

fn standardized_moment(lengths: &[usize], mean: f64, std_dev: f64, order: i32) -> f64 {
	lengths
		.iter()
		.map(|&l| ((l as f64 - mean) / std_dev).powi(order))
		.sum::<f64>()
		/ lengths.len() as f64
}

/// Shannon entropy (bits) of the length frequency table, summed in
/// ascending length order.
fn length_entropy(lengths: &[usize]) -> f64 {
	let mut frequencies: BTreeMap<usize, usize> = BTreeMap::new();
	for &length in lengths {
		*frequencies.entry(length).or_insert(0) += 1;
	}
	let n = lengths.len() as f64;
	frequencies.values().fold(0.0, |entropy, &count| {
		let p = count as f64 / n;
		entropy - p * p.log2()
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn constant_sample_has_undefined_shape() {
		let stats = describe_lengths(&[4, 4, 4, 4]).unwrap();
		assert_eq!(stats.mean.to_string(), "4");
		assert_eq!(stats.standard_deviation.to_string(), "0.00");
		assert_eq!(stats.range.to_string(), "0");
		assert_eq!(stats.iqr.to_string(), "0");
		assert_eq!(stats.skewness, Metric::Undefined);
		assert_eq!(stats.kurtosis, Metric::Undefined);
		assert_eq!(stats.entropy.to_string(), "0.00");
	}

	#[test]
	fn one_to_five() {
		let stats = describe_lengths(&[1, 2, 3, 4, 5]).unwrap();
		assert_eq!(stats.mean.to_string(), "3");
		assert_eq!(stats.standard_deviation.to_string(), "1.41");
		assert_eq!(stats.median.to_string(), "3");
		assert_eq!(stats.range.to_string(), "4");
		// Q1 = sorted[1] = 2, Q3 = sorted[3] = 4
		assert_eq!(stats.iqr.to_string(), "2");
		assert_eq!(stats.skewness.to_string(), "0.00");
		assert_eq!(stats.kurtosis.to_string(), "-1.30");
		assert_eq!(stats.entropy.to_string(), "2.32");
	}

	#[test]
	fn even_sample_median_averages_middle() {
		// sorted: 2 3 7 10, median 5
		let stats = describe_lengths(&[10, 2, 7, 3]).unwrap();
		assert_eq!(stats.median.to_string(), "5");
		// sorted[1] = 3, sorted[3] = 10
		assert_eq!(stats.iqr.to_string(), "7");
		assert_eq!(stats.entropy.to_string(), "2.00");
	}

	#[test]
	fn half_median_rounds_up() {
		let stats = describe_lengths(&[2, 3]).unwrap();
		assert_eq!(stats.median.to_string(), "3");
		assert_eq!(stats.mean.to_string(), "3");
	}

	#[test]
	fn zero_word_sentences_are_counted() {
		let stats = describe_lengths(&[0, 0, 6]).unwrap();
		assert_eq!(stats.mean.to_string(), "2");
		assert_eq!(stats.range.to_string(), "6");
		assert!(stats.skewness.is_defined());
	}

	#[test]
	fn right_skewed_sample_is_positive() {
		let stats = describe_lengths(&[3, 4, 4, 5, 5, 5, 30]).unwrap();
		assert!(stats.skewness.value().unwrap() > 0.0);
		assert!(stats.kurtosis.value().unwrap() > 0.0);
	}

	#[test]
	fn empty_sample_is_degenerate() {
		assert!(matches!(describe_lengths(&[]), Err(StyloError::DegenerateInput(_))));
	}

	#[test]
	fn serializes_with_report_keys() {
		let stats = describe_lengths(&[1, 2, 3, 4, 5]).unwrap();
		let json = serde_json::to_value(&stats).unwrap();
		assert_eq!(json["standardDeviation"], "1.41");
		assert_eq!(json["IQR"], "2");
		assert!(json.get("iqr").is_none());
	}
}
