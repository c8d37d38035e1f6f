//! Flesch Reading Ease and Flesch-Kincaid Grade Level.
//!
//! Reading ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Grade level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Scores are computed for the whole corpus and for fixed-size chunks of
//! consecutive sentences, keeping the hardest and the easiest chunk.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::annotation::SentenceView;
use crate::error::{Result, StyloError};
use crate::features::Metric;

static SILENT_SUFFIX: OnceLock<Regex> = OnceLock::new();
static LEADING_Y: OnceLock<Regex> = OnceLock::new();
static VOWEL_GROUP: OnceLock<Regex> = OnceLock::new();

fn silent_suffix() -> &'static Regex {
	SILENT_SUFFIX.get_or_init(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid regex"))
}

fn leading_y() -> &'static Regex {
	LEADING_Y.get_or_init(|| Regex::new(r"^y").expect("valid regex"))
}

fn vowel_group() -> &'static Regex {
	VOWEL_GROUP.get_or_init(|| Regex::new(r"[aeiouy]{1,2}").expect("valid regex"))
}

/// Heuristic syllable count.
///
/// - Words of at most 3 characters count as 1
/// - A trailing `es`/`ed`/`e` (with the consonant before `es`/`e`) is dropped
/// - A leading `y` is dropped
/// - Remaining groups of one or two vowels are counted
///
/// Returns 0 for longer words without a vowel group (`"pfft"`). Callers sum
/// the raw value; it is never raised to 1.
pub fn count_syllables(word: &str) -> usize {
	let word = word.to_lowercase();
	if word.chars().count() <= 3 {
		return 1;
	}
	let word = silent_suffix().replace(&word, "");
	let word = leading_y().replace(&word, "");
	vowel_group().find_iter(&word).count()
}

/// Reading ease and grade level of one span of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityScore {
	/// Flesch Reading Ease, 2 decimals.
	pub flesch_reading_ease: Metric,
	/// Flesch-Kincaid Grade Level, 0 decimals.
	pub flesch_kincaid_grade_level: Metric,
}

impl ReadabilityScore {
	/// Scores from aggregate counts; both metrics are undefined when
	/// `sentences` or `words` is 0.
	pub fn from_counts(sentences: usize, words: usize, syllables: usize) -> Self {
		if sentences == 0 || words == 0 {
			return Self {
				flesch_reading_ease: Metric::Undefined,
				flesch_kincaid_grade_level: Metric::Undefined,
			};
		}
		let words_per_sentence = words as f64 / sentences as f64;
		let syllables_per_word = syllables as f64 / words as f64;

		let reading_ease = 206.835 - (1.015 * words_per_sentence) - (84.6 * syllables_per_word);
		let grade_level = (0.39 * words_per_sentence) + (11.8 * syllables_per_word) - 15.59;

		Self {
			flesch_reading_ease: Metric::fixed(reading_ease, 2),
			flesch_kincaid_grade_level: Metric::fixed(grade_level, 0),
		}
	}

	/// Scores a word list split into `sentences` sentences.
	pub fn from_words(words: &[String], sentences: usize) -> Self {
		let syllables = words.iter().map(|w| count_syllables(w)).sum();
		Self::from_counts(sentences, words.len(), syllables)
	}
}

/// Readability section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadabilityScores {
	/// Whole-corpus reading ease.
	pub avg_readability_score: Metric,
	/// Whole-corpus grade level.
	pub avg_grade_level: Metric,
	/// Highest grade level among chunks.
	pub highest_grade_level: Metric,
	/// Highest reading ease among chunks.
	pub highest_readability: Metric,
	/// Index of the chunk holding `highest_grade_level`.
	#[serde(skip)]
	pub highest_grade_chunk: Option<usize>,
	/// Index of the chunk holding `highest_readability`.
	#[serde(skip)]
	pub highest_readability_chunk: Option<usize>,
}

/// Running maximum over chunk metrics; undefined metrics never win and the
/// first chunk reaching the maximum keeps it.
#[derive(Debug, Default)]
struct ChunkMax {
	best: Option<(usize, f64, Metric)>,
}

impl ChunkMax {
	fn offer(&mut self, chunk: usize, metric: Metric) {
		let Some(value) = metric.value() else {
			return;
		};
		match self.best {
			Some((_, best, _)) if value <= best => {}
			_ => self.best = Some((chunk, value, metric)),
		}
	}

	fn finish(self) -> (Metric, Option<usize>) {
		match self.best {
			Some((chunk, _, metric)) => (metric, Some(chunk)),
			None => (Metric::Undefined, None),
		}
	}
}

/// Whole-corpus and chunked readability.
///
/// `tokens` is the full token sequence; chunk word lists are the tokens
/// covered by each chunk's sentences.
///
/// # Errors
/// Returns `InvalidParameter` if `chunk_size` is 0.
pub fn readability_scores(tokens: &[String], sentences: &[SentenceView], chunk_size: usize) -> Result<ReadabilityScores> {
	if chunk_size == 0 {
		return Err(StyloError::InvalidParameter("chunk size must be >= 1".to_owned()));
	}

	let overall = ReadabilityScore::from_words(tokens, sentences.len());

	let mut hardest = ChunkMax::default();
	let mut easiest = ChunkMax::default();
	for (index, chunk) in sentences.chunks(chunk_size).enumerate() {
		let mut words = 0;
		let mut syllables = 0;
		for sentence in chunk {
			let span = tokens.get(sentence.token_range()).unwrap_or(&[]);
			words += span.len();
			syllables += span.iter().map(|w| count_syllables(w)).sum::<usize>();
		}
		let score = ReadabilityScore::from_counts(chunk.len(), words, syllables);
		hardest.offer(index, score.flesch_kincaid_grade_level);
		easiest.offer(index, score.flesch_reading_ease);
	}

	let (highest_grade_level, highest_grade_chunk) = hardest.finish();
	let (highest_readability, highest_readability_chunk) = easiest.finish();

	tracing::debug!(
		sentences = sentences.len(),
		chunks = sentences.len().div_ceil(chunk_size),
		"scored readability"
	);

	Ok(ReadabilityScores {
		avg_readability_score: overall.flesch_reading_ease,
		avg_grade_level: overall.flesch_kincaid_grade_level,
		highest_grade_level,
		highest_readability,
		highest_grade_chunk,
		highest_readability_chunk,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	/// Sentences covering consecutive tokens, `lengths[i]` words each.
	fn sentences(lengths: &[usize]) -> Vec<SentenceView> {
		let mut start = 0;
		lengths
			.iter()
			.map(|&len| {
				let view = SentenceView::new(String::new(), start..start + len, false);
				start += len;
				view
			})
			.collect()
	}

	#[test]
	fn short_words_are_one_syllable() {
		assert_eq!(count_syllables("the"), 1);
		assert_eq!(count_syllables("a"), 1);
		assert_eq!(count_syllables("shh"), 1);
	}

	#[test]
	fn syllable_heuristic() {
		assert_eq!(count_syllables("happiness"), 3);
		assert_eq!(count_syllables("wanted"), 1);
		assert_eq!(count_syllables("makes"), 1);
		assert_eq!(count_syllables("yellow"), 2);
		assert_eq!(count_syllables("Reading"), 2);
	}

	#[test]
	fn syllables_may_be_zero() {
		assert_eq!(count_syllables("pfft"), 0);
		assert_eq!(count_syllables("tsks"), 0);
	}

	#[test]
	fn formula_from_counts() {
		// 9 words per sentence, 2 syllables per word
		let score = ReadabilityScore::from_counts(1, 9, 18);
		assert_eq!(score.flesch_reading_ease.to_string(), "28.50");
		assert_eq!(score.flesch_kincaid_grade_level.to_string(), "12");

		// 7 words per sentence, 4/3 syllables per word
		let score = ReadabilityScore::from_counts(3, 21, 28);
		assert_eq!(score.flesch_reading_ease.to_string(), "86.93");
		assert_eq!(score.flesch_kincaid_grade_level.to_string(), "3");
	}

	#[test]
	fn zero_sentences_is_not_available() {
		let scores = readability_scores(&words("some words here"), &[], 10).unwrap();
		assert_eq!(scores.avg_readability_score.to_string(), "N/A");
		assert_eq!(scores.avg_grade_level.to_string(), "N/A");
		assert_eq!(scores.highest_grade_level, Metric::Undefined);
		assert_eq!(scores.highest_readability, Metric::Undefined);
		assert_eq!(scores.highest_grade_chunk, None);
	}

	#[test]
	fn chunk_extrema_are_independent() {
		// chunk 0: one long sentence of long words, chunk 1: short words
		let tokens = words(
			"organizational considerations necessitate comprehensive documentation \
			 the cat sat on a mat",
		);
		let views = sentences(&[5, 3, 3]);
		let scores = readability_scores(&tokens, &views, 1).unwrap();
		assert_eq!(scores.highest_grade_chunk, Some(0));
		assert!(matches!(scores.highest_readability_chunk, Some(1) | Some(2)));
		assert!(scores.highest_grade_level.value().unwrap() > 10.0);
		assert!(scores.highest_readability.value().unwrap() > 100.0);
	}

	#[test]
	fn empty_chunks_are_skipped() {
		let tokens = words("the cat sat");
		// first sentence has no words
		let views = sentences(&[0, 3]);
		let scores = readability_scores(&tokens, &views, 1).unwrap();
		assert_eq!(scores.highest_grade_chunk, Some(1));
		assert_eq!(scores.highest_readability_chunk, Some(1));
	}

	#[test]
	fn first_chunk_wins_ties() {
		let tokens = words("the cat sat the cat sat");
		let views = sentences(&[3, 3]);
		let scores = readability_scores(&tokens, &views, 1).unwrap();
		assert_eq!(scores.highest_grade_chunk, Some(0));
		assert_eq!(scores.highest_readability_chunk, Some(0));
	}

	#[test]
	fn serialized_keys() {
		let tokens = words("the cat sat");
		let scores = readability_scores(&tokens, &sentences(&[3]), 10).unwrap();
		let json = serde_json::to_value(&scores).unwrap();
		assert!(json.get("avgReadabilityScore").is_some());
		assert!(json.get("highestReadability").is_some());
		assert!(json.get("highestGradeChunk").is_none());
	}

	#[test]
	fn zero_chunk_size_is_rejected() {
		assert!(readability_scores(&words("a"), &sentences(&[1]), 0).is_err());
	}
}
