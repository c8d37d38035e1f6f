use serde::Serialize;

use crate::annotation::{CorpusView, TagLabel};
use crate::features::Metric;

/// Occurrences of each tag over the whole corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
	pub nouns: usize,
	pub verbs: usize,
	pub adjectives: usize,
	pub adverbs: usize,
	pub pronouns: usize,
	pub tokens: usize,
}

impl TagCounts {
	pub fn from_corpus(corpus: &dyn CorpusView) -> Self {
		let mut counts = Self { tokens: corpus.tokens().len(), ..Self::default() };
		for i in 0..counts.tokens {
			match corpus.pos_tag(i) {
				TagLabel::Noun => counts.nouns += 1,
				TagLabel::Verb => counts.verbs += 1,
				TagLabel::Adjective => counts.adjectives += 1,
				TagLabel::Adverb => counts.adverbs += 1,
				TagLabel::Pronoun => counts.pronouns += 1,
				TagLabel::Other => {}
			}
		}
		counts
	}

	/// Nouns, verbs, adjectives and adverbs.
	pub fn content_words(&self) -> usize {
		self.nouns + self.verbs + self.adjectives + self.adverbs
	}
}

/// Part-of-speech ratios.
///
/// The three tag-to-tag ratios divide by `max(count, 1)`, so a corpus
/// without verbs still reports its raw noun count as `nounVerbRatio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosTagsData {
	pub noun_verb_ratio: Metric,
	pub adjective_noun_ratio: Metric,
	pub adverb_verb_ratio: Metric,
	/// Pronouns over all tokens.
	pub pronoun_usage: Metric,
}

impl PosTagsData {
	pub fn from_counts(counts: &TagCounts) -> Self {
		let floored = |count: usize| count.max(1) as f64;
		Self {
			noun_verb_ratio: Metric::fixed(counts.nouns as f64 / floored(counts.verbs), 2),
			adjective_noun_ratio: Metric::fixed(counts.adjectives as f64 / floored(counts.nouns), 2),
			adverb_verb_ratio: Metric::fixed(counts.adverbs as f64 / floored(counts.verbs), 2),
			pronoun_usage: Metric::ratio(counts.pronouns as f64, counts.tokens as f64, 2),
		}
	}
}

/// Content words over tokens, 2 decimals.
pub fn lexical_density(counts: &TagCounts) -> Metric {
	Metric::ratio(counts.content_words() as f64, counts.tokens as f64, 2)
}

/// Adjectives and adverbs over tokens, 4 decimals.
pub fn adjective_adverb_density(counts: &TagCounts) -> Metric {
	Metric::ratio((counts.adjectives + counts.adverbs) as f64, counts.tokens as f64, 4)
}

/// Share of sentences not flagged passive, 2 decimals.
pub fn active_voice_ratio(corpus: &dyn CorpusView) -> Metric {
	let sentences = corpus.sentences();
	let passive = sentences.iter().filter(|s| s.is_passive()).count();
	Metric::ratio((sentences.len() - passive) as f64, sentences.len() as f64, 2)
}
