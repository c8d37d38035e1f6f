//! Report assembly and rendering.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::annotation::{CorpusView, PolarityScorer};
use crate::error::{Result, StyloError};
use crate::features::distribution::{SentenceLengthStats, describe_lengths};
use crate::features::diversity::moving_average_ttr;
use crate::features::lexical::{PosTagsData, TagCounts, active_voice_ratio, adjective_adverb_density, lexical_density};
use crate::features::ngram::{NGramQuery, mine_ngrams, mine_ngrams_parallel};
use crate::features::readability::{ReadabilityScores, readability_scores};
use crate::features::sentiment::{SentimentDistribution, sentiment_distribution};
use crate::features::{EngineConfig, Metric};

/// Every feature extracted from one corpus.
///
/// Serializes with the field names below, in this order. Values are strings
/// (see [`Metric`]) except for the nested sections and the n-gram lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureReport {
	pub lexical_density: Metric,
	pub adjective_adverb_density: Metric,
	#[serde(rename = "lexical_diversity_as_MATTR")]
	pub lexical_diversity_as_mattr: Metric,
	pub active_voice_ratio: Metric,
	pub readability_scores: ReadabilityScores,
	pub sentiment_distribution: SentimentDistribution,
	pub sentence_variability_distribution: SentenceLengthStats,
	#[serde(rename = "POS_tags_data")]
	pub pos_tags_data: PosTagsData,
	/// `"<n>gram"` → most frequent n-grams of that size, ascending sizes.
	pub commonly_used_ngrams: IndexMap<String, Vec<String>>,
}

impl FeatureReport {
	/// Pretty-printed JSON, two-space indent.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// One `- path.to.key: value` line per leaf, in report order.
	///
	/// Arrays are joined with `", "` on a single line.
	pub fn to_text(&self) -> Result<String> {
		let value = serde_json::to_value(self)?;
		let mut lines = Vec::new();
		flatten("", &value, &mut lines);
		let mut text = lines.join("\n");
		text.push('\n');
		Ok(text)
	}
}

fn flatten(path: &str, value: &Value, lines: &mut Vec<String>) {
	match value {
		Value::Object(map) => {
			for (key, child) in map {
				let child_path = if path.is_empty() { key.clone() } else { format!("{}.{}", path, key) };
				flatten(&child_path, child, lines);
			}
		}
		Value::Array(items) => {
			let joined: Vec<String> = items.iter().map(scalar).collect();
			lines.push(format!("- {}: {}", path, joined.join(", ")));
		}
		other => lines.push(format!("- {}: {}", path, scalar(other))),
	}
}

fn scalar(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Number of scalar leaves plus object keys in a JSON value.
///
/// Arrays count only their elements, not themselves.
pub fn json_token_count(value: &Value) -> usize {
	match value {
		Value::Array(items) => items.iter().map(json_token_count).sum(),
		Value::Object(map) => map.values().map(|v| 1 + json_token_count(v)).sum(),
		_ => 1,
	}
}

/// Runs every feature module over an annotated corpus.
///
/// # Responsibilities
/// - Reject a corpus without tokens before any module runs
/// - Hand each module its slice of the corpus and its parameters
/// - Assemble the results into one [`FeatureReport`]
#[derive(Debug, Clone, Default)]
pub struct StyleEngine {
	config: EngineConfig,
}

impl StyleEngine {
	pub fn new(config: EngineConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Extracts the full report.
	///
	/// Both checks below run before any module, so a corpus without
	/// sentences never reaches the sentence-based modules. Their own `"N/A"`
	/// fallbacks only apply to parts of a corpus (an empty readability chunk).
	///
	/// # Errors
	/// - `DegenerateInput` if the corpus has no tokens
	/// - `DegenerateInput` if the annotator found no sentences
	/// - `InvalidParameter` if the configuration cannot drive a module
	///
	/// Metrics that are merely undefined for this corpus do not fail; they
	/// are reported as `"N/A"`.
	pub fn analyze(&self, corpus: &dyn CorpusView, scorer: &dyn PolarityScorer) -> Result<FeatureReport> {
		let tokens = corpus.tokens();
		if tokens.is_empty() {
			return Err(StyloError::DegenerateInput("corpus contains no tokens".to_owned()));
		}
		let sentences = corpus.sentences();
		if sentences.is_empty() {
			return Err(StyloError::DegenerateInput(format!(
				"annotator found no sentences in {} tokens",
				tokens.len()
			)));
		}

		let counts = TagCounts::from_corpus(corpus);
		let lengths: Vec<usize> = sentences.iter().map(|s| s.word_count()).collect();
		let distribution = describe_lengths(&lengths)?;
		let mattr = moving_average_ttr(tokens, self.config.window_size())?;
		let readability = readability_scores(tokens, sentences, self.config.chunk_size())?;
		let sentiment = sentiment_distribution(corpus.text(), scorer);

		let query = NGramQuery {
			sizes: self.config.ngram_range(),
			qualifier: self.config.ngram_qualifier(),
			cap: self.config.ngram_cap(),
		};
		let ngrams = if self.config.parallel_ngrams {
			mine_ngrams_parallel(tokens, &query)?
		} else {
			mine_ngrams(tokens, &query)?
		};

		tracing::info!(
			tokens = tokens.len(),
			sentences = sentences.len(),
			ngram_sizes = ngrams.len(),
			"assembled feature report"
		);

		Ok(FeatureReport {
			lexical_density: lexical_density(&counts),
			adjective_adverb_density: adjective_adverb_density(&counts),
			lexical_diversity_as_mattr: mattr,
			active_voice_ratio: active_voice_ratio(corpus),
			readability_scores: readability,
			sentiment_distribution: sentiment,
			sentence_variability_distribution: distribution,
			pos_tags_data: PosTagsData::from_counts(&counts),
			commonly_used_ngrams: ngrams,
		})
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::annotation::{AnnotatedCorpus, Annotator, LexiconAnnotator, LexiconPolarityScorer};

	fn annotate(text: &str) -> AnnotatedCorpus {
		LexiconAnnotator::new().annotate(text).unwrap()
	}

	fn repeated() -> AnnotatedCorpus {
		annotate(&"the cat sat on the mat. ".repeat(5))
	}

	#[test]
	fn empty_corpus_is_rejected() {
		let corpus = AnnotatedCorpus::new(String::new(), vec![], vec![], vec![]).unwrap();
		let result = StyleEngine::default().analyze(&corpus, &LexiconPolarityScorer::new());
		assert!(matches!(result, Err(StyloError::DegenerateInput(_))));
	}

	#[test]
	fn corpus_without_sentences_is_rejected() {
		let tokens = vec!["stray".to_owned(), "words".to_owned()];
		let tags = vec![crate::annotation::TagLabel::Noun; 2];
		let corpus = AnnotatedCorpus::new("stray words".to_owned(), tokens, tags, vec![]).unwrap();
		let result = StyleEngine::default().analyze(&corpus, &LexiconPolarityScorer::new());
		match result {
			Err(StyloError::DegenerateInput(message)) => assert!(message.contains("no sentences")),
			other => panic!("expected DegenerateInput, got {:?}", other),
		}
	}

	#[test]
	fn field_names_and_order() {
		let report = StyleEngine::default().analyze(&repeated(), &LexiconPolarityScorer::new()).unwrap();
		let value = serde_json::to_value(&report).unwrap();
		let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
		assert_eq!(
			keys,
			vec![
				"lexical_density",
				"adjective_adverb_density",
				"lexical_diversity_as_MATTR",
				"active_voice_ratio",
				"readability_scores",
				"sentiment_distribution",
				"sentence_variability_distribution",
				"POS_tags_data",
				"commonly_used_ngrams",
			]
		);
	}

	#[test]
	fn repeated_sentences() {
		let report = StyleEngine::default().analyze(&repeated(), &LexiconPolarityScorer::new()).unwrap();
		let stats = &report.sentence_variability_distribution;
		assert_eq!(stats.mean.to_string(), "6");
		assert_eq!(stats.standard_deviation.to_string(), "0.00");
		assert_eq!(stats.skewness, Metric::Undefined);
		assert_eq!(report.active_voice_ratio.to_string(), "1.00");
		// 5 distinct tokens out of 30, shorter than the window
		assert_eq!(report.lexical_diversity_as_mattr.to_string(), "0.17");
		assert_eq!(report.sentiment_distribution.neutral.to_string(), "1.00");

		let trigrams = &report.commonly_used_ngrams["3gram"];
		assert_eq!(trigrams[0], "the cat sat");
		assert_eq!(trigrams.len(), 6);
		assert_eq!(trigrams[5], "mat the cat");
	}

	#[test]
	fn parallel_mining_gives_same_report() {
		let corpus = repeated();
		let scorer = LexiconPolarityScorer::new();
		let sequential = StyleEngine::default().analyze(&corpus, &scorer).unwrap();
		let mut config = EngineConfig::default();
		config.parallel_ngrams = true;
		let parallel = StyleEngine::new(config).analyze(&corpus, &scorer).unwrap();
		assert_eq!(sequential.to_json().unwrap(), parallel.to_json().unwrap());
	}

	#[test]
	fn text_rendering() {
		let report = StyleEngine::default().analyze(&repeated(), &LexiconPolarityScorer::new()).unwrap();
		let text = report.to_text().unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert!(lines[0].starts_with("- lexical_density: "));
		assert!(lines.contains(&"- sentence_variability_distribution.skewness: N/A"));
		assert!(lines.iter().any(|l| l.starts_with("- readability_scores.avgReadabilityScore: ")));
		assert!(lines.iter().any(|l| l.starts_with("- commonly_used_ngrams.3gram: the cat sat, cat sat on, ")));
	}

	#[test]
	fn json_is_pretty() {
		let report = StyleEngine::default().analyze(&repeated(), &LexiconPolarityScorer::new()).unwrap();
		let json = report.to_json().unwrap();
		assert!(json.starts_with("{\n  \"lexical_density\": \""));
	}

	#[test]
	fn token_count_counts_keys_and_leaves() {
		let value = json!({ "a": 1, "b": [1, 2], "c": { "d": "x" } });
		assert_eq!(json_token_count(&value), 8);
		assert_eq!(json_token_count(&json!("alone")), 1);
		assert_eq!(json_token_count(&json!([])), 0);
	}
}
