use serde::Serialize;

use crate::annotation::PolarityScorer;
use crate::features::Metric;

/// Compound score at or above which a sentence counts as positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound score at or below which a sentence counts as negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
	Positive,
	Neutral,
	Negative,
}

impl Polarity {
	pub fn classify(compound: f64) -> Self {
		if compound >= POSITIVE_THRESHOLD {
			Polarity::Positive
		} else if compound <= NEGATIVE_THRESHOLD {
			Polarity::Negative
		} else {
			Polarity::Neutral
		}
	}
}

/// Share of positive, negative and neutral sentences, 2 decimals each.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDistribution {
	pub positive: Metric,
	pub negative: Metric,
	pub neutral: Metric,
}

impl SentimentDistribution {
	/// Proportions from classified sentences; all undefined when empty.
	pub fn from_polarities(polarities: &[Polarity]) -> Self {
		let total = polarities.len() as f64;
		let share = |wanted: Polarity| {
			let count = polarities.iter().filter(|p| **p == wanted).count();
			Metric::ratio(count as f64, total, 2)
		};
		Self {
			positive: share(Polarity::Positive),
			negative: share(Polarity::Negative),
			neutral: share(Polarity::Neutral),
		}
	}
}

/// Splits text into sentences on `.`, `!` and `?` alone.
///
/// Each sentence is a (possibly empty) run of non-terminator characters
/// followed by a single terminator, which is kept. Text after the last
/// terminator is dropped; `"..."` yields three one-character sentences.
///
/// This is not the annotator's segmenter. Abbreviations, decimals and quoted
/// speech are split differently here, so sentence counts may differ between
/// this distribution and the other sentence-based metrics.
pub fn split_on_terminal_punctuation(text: &str) -> Vec<&str> {
	let mut sentences = Vec::new();
	let mut start = 0;
	for (index, c) in text.char_indices() {
		if matches!(c, '.' | '!' | '?') {
			let end = index + c.len_utf8();
			sentences.push(&text[start..end]);
			start = end;
		}
	}
	sentences
}

/// Sentiment distribution of `text`, scoring each punctuation-split sentence.
pub fn sentiment_distribution(text: &str, scorer: &dyn PolarityScorer) -> SentimentDistribution {
	let polarities: Vec<Polarity> = split_on_terminal_punctuation(text)
		.into_iter()
		.map(|sentence| Polarity::classify(scorer.compound(sentence)))
		.collect();
	tracing::debug!(sentences = polarities.len(), "classified sentence polarity");
	SentimentDistribution::from_polarities(&polarities)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Scores by keyword so tests control each sentence's polarity.
	struct KeywordScorer;

	impl PolarityScorer for KeywordScorer {
		fn compound(&self, sentence: &str) -> f64 {
			if sentence.contains("good") {
				0.6
			} else if sentence.contains("bad") {
				-0.6
			} else {
				0.0
			}
		}
	}

	#[test]
	fn thresholds_are_inclusive() {
		assert_eq!(Polarity::classify(0.05), Polarity::Positive);
		assert_eq!(Polarity::classify(-0.05), Polarity::Negative);
		assert_eq!(Polarity::classify(0.049), Polarity::Neutral);
		assert_eq!(Polarity::classify(-0.049), Polarity::Neutral);
	}

	#[test]
	fn two_positive_one_neutral_one_negative() {
		let text = "a good day. another good one! just a day? a bad end.";
		let distribution = sentiment_distribution(text, &KeywordScorer);
		assert_eq!(distribution.positive.to_string(), "0.50");
		assert_eq!(distribution.neutral.to_string(), "0.25");
		assert_eq!(distribution.negative.to_string(), "0.25");
	}

	#[test]
	fn splitter_keeps_terminator_and_drops_tail() {
		let sentences = split_on_terminal_punctuation("one. two! three? four");
		assert_eq!(sentences, vec!["one.", " two!", " three?"]);
	}

	#[test]
	fn splitter_splits_every_terminator() {
		let sentences = split_on_terminal_punctuation("wait... what?!");
		assert_eq!(sentences, vec!["wait.", ".", ".", " what?", "!"]);
	}

	#[test]
	fn splitter_disagrees_on_decimals() {
		assert_eq!(split_on_terminal_punctuation("it cost 3.5 dollars.").len(), 2);
	}

	#[test]
	fn no_sentences_is_undefined() {
		let distribution = sentiment_distribution("no terminator here", &KeywordScorer);
		assert_eq!(distribution.positive, Metric::Undefined);
		assert_eq!(distribution.negative, Metric::Undefined);
		assert_eq!(distribution.neutral, Metric::Undefined);
	}
}
