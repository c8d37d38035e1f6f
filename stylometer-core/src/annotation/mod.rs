//! Boundary to the linguistic annotator and the sentiment scorer.
//!
//! The feature engine never tokenizes, segments or tags text itself; it reads
//! an annotated corpus through [`CorpusView`] and scores sentences through
//! [`PolarityScorer`]. The reference implementations in [`lexicon`] and
//! [`polarity`] are small rule/lexicon based stand-ins that any real NLP
//! backend can replace.

use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyloError};
use crate::io::{build_output_path, read_corpus};

/// Rule and lexicon based annotator.
pub mod lexicon;

/// Lexicon based compound polarity scorer.
pub mod polarity;

pub use lexicon::LexiconAnnotator;
pub use polarity::LexiconPolarityScorer;

/// Part-of-speech label, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagLabel {
	Noun,
	Verb,
	Adjective,
	Adverb,
	Pronoun,
	Other,
}

/// One sentence as produced by the annotator's segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceView {
	/// Sentence text as found in the corpus.
	text: String,
	/// Positions of the sentence's tokens in the corpus token sequence.
	tokens: Range<usize>,
	/// Whether the annotator classified the sentence as passive voice.
	passive: bool,
}

impl SentenceView {
	pub fn new(text: String, tokens: Range<usize>, passive: bool) -> Self {
		Self { text, tokens, passive }
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn token_range(&self) -> Range<usize> {
		self.tokens.clone()
	}

	/// Number of word tokens, possibly 0.
	pub fn word_count(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_passive(&self) -> bool {
		self.passive
	}
}

/// Read-only view of an annotated corpus.
pub trait CorpusView {
	/// The lower-cased corpus text.
	fn text(&self) -> &str;

	/// Word tokens in reading order.
	fn tokens(&self) -> &[String];

	/// Sentences in reading order.
	fn sentences(&self) -> &[SentenceView];

	/// Tag of the token at position `i`.
	fn pos_tag(&self, i: usize) -> TagLabel;
}

/// Produces an [`AnnotatedCorpus`] from raw text.
///
/// Tokenization must be deterministic for a fixed input. Any failure is
/// fatal for the run.
pub trait Annotator {
	fn annotate(&self, text: &str) -> Result<AnnotatedCorpus>;

	/// Identifies this annotator and its rules in the annotation cache.
	///
	/// Two annotators that may tag the same text differently must return
	/// different keys.
	fn cache_key(&self) -> String;
}

/// Extension of the annotation cache written next to a corpus.
pub const CACHE_EXTENSION: &str = "annotation.bin";

/// On-disk cache record.
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
	annotator: String,
	corpus: AnnotatedCorpus,
}

/// Scores one sentence with a compound polarity in `[-1, 1]`.
pub trait PolarityScorer {
	fn compound(&self, sentence: &str) -> f64;
}

/// Owned annotator output.
///
/// # Invariants
/// - exactly one tag per token
/// - sentence token ranges are in bounds and do not go backwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCorpus {
	text: String,
	tokens: Vec<String>,
	tags: Vec<TagLabel>,
	sentences: Vec<SentenceView>,
}

impl AnnotatedCorpus {
	/// Checks the annotator contract and wraps the result.
	///
	/// # Errors
	/// Returns `Annotator` if tags and tokens differ in length or a sentence
	/// range is out of bounds or out of order.
	pub fn new(text: String, tokens: Vec<String>, tags: Vec<TagLabel>, sentences: Vec<SentenceView>) -> Result<Self> {
		if tags.len() != tokens.len() {
			return Err(StyloError::Annotator(format!(
				"{} tags for {} tokens",
				tags.len(),
				tokens.len()
			)));
		}
		let mut previous_end = 0;
		for (index, sentence) in sentences.iter().enumerate() {
			let range = sentence.token_range();
			if range.start > range.end || range.end > tokens.len() || range.start < previous_end {
				return Err(StyloError::Annotator(format!(
					"sentence {} covers tokens {:?} out of {}",
					index,
					range,
					tokens.len()
				)));
			}
			previous_end = range.end;
		}
		Ok(Self { text, tokens, tags, sentences })
	}

	/// Loads a corpus file and annotates it, reusing a binary cache.
	///
	/// - The cache lives next to the corpus (`corpus.txt` → `corpus.annotation.bin`)
	/// - It is only reused when it was built by the same annotator from the
	///   exact same text
	/// - Otherwise the corpus is annotated again and the cache rewritten
	///
	/// # Errors
	/// Returns an error if the corpus cannot be read, the annotator fails, or
	/// the cache cannot be written.
	pub fn load_or_annotate<P: AsRef<Path>>(filepath: P, annotator: &dyn Annotator) -> Result<Self> {
		let text = read_corpus(&filepath)?;
		let cache_path = build_output_path(&filepath, CACHE_EXTENSION)?;
		if cache_path == filepath.as_ref() {
			tracing::warn!(corpus = %cache_path.display(), "corpus path collides with its cache, not caching");
			return annotator.annotate(&text);
		}
		let annotator_key = annotator.cache_key();

		if cache_path.exists() {
			let bytes = std::fs::read(&cache_path)?;
			match postcard::from_bytes::<CacheRecord>(&bytes) {
				Ok(cached) if cached.annotator == annotator_key && cached.corpus.text == text => {
					tracing::debug!(cache = %cache_path.display(), "reusing annotation cache");
					return Ok(cached.corpus);
				}
				Ok(_) => tracing::warn!(cache = %cache_path.display(), "annotation cache is stale, rebuilding"),
				Err(e) => tracing::warn!(cache = %cache_path.display(), error = %e, "unreadable annotation cache, rebuilding"),
			}
		}

		let corpus = annotator.annotate(&text)?;
		let record = CacheRecord { annotator: annotator_key, corpus };
		std::fs::write(&cache_path, postcard::to_stdvec(&record)?)?;
		Ok(record.corpus)
	}
}

impl CorpusView for AnnotatedCorpus {
	fn text(&self) -> &str {
		&self.text
	}

	fn tokens(&self) -> &[String] {
		&self.tokens
	}

	fn sentences(&self) -> &[SentenceView] {
		&self.sentences
	}

	fn pos_tag(&self, i: usize) -> TagLabel {
		self.tags.get(i).copied().unwrap_or(TagLabel::Other)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn rejects_tag_count_mismatch() {
		let result = AnnotatedCorpus::new("a b".to_owned(), words("a b"), vec![TagLabel::Noun], vec![]);
		assert!(matches!(result, Err(StyloError::Annotator(_))));
	}

	#[test]
	fn rejects_out_of_bounds_sentence() {
		let sentences = vec![SentenceView::new("a b".to_owned(), 0..3, false)];
		let result = AnnotatedCorpus::new(
			"a b".to_owned(),
			words("a b"),
			vec![TagLabel::Noun, TagLabel::Noun],
			sentences,
		);
		assert!(result.is_err());
	}

	#[test]
	fn rejects_overlapping_sentences() {
		let sentences = vec![
			SentenceView::new("a b".to_owned(), 0..2, false),
			SentenceView::new("b".to_owned(), 1..2, false),
		];
		let result = AnnotatedCorpus::new(
			"a b".to_owned(),
			words("a b"),
			vec![TagLabel::Noun, TagLabel::Noun],
			sentences,
		);
		assert!(result.is_err());
	}

	#[test]
	fn view_accessors() {
		let sentences = vec![
			SentenceView::new("a b.".to_owned(), 0..2, true),
			SentenceView::new("...".to_owned(), 2..2, false),
		];
		let corpus = AnnotatedCorpus::new(
			"a b. ...".to_owned(),
			words("a b"),
			vec![TagLabel::Pronoun, TagLabel::Verb],
			sentences,
		)
		.unwrap();
		assert_eq!(corpus.pos_tag(1), TagLabel::Verb);
		assert_eq!(corpus.pos_tag(7), TagLabel::Other);
		assert_eq!(corpus.sentences()[1].word_count(), 0);
		assert!(corpus.sentences()[0].is_passive());
	}

	#[test]
	fn cache_is_reused_and_refreshed() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		std::fs::write(&path, "The cat sat.").unwrap();

		let annotator = LexiconAnnotator::new();
		let first = AnnotatedCorpus::load_or_annotate(&path, &annotator).unwrap();
		assert!(dir.path().join("corpus.annotation.bin").exists());
		assert_eq!(first.text(), "the cat sat.");

		let second = AnnotatedCorpus::load_or_annotate(&path, &annotator).unwrap();
		assert_eq!(first, second);

		std::fs::write(&path, "The dog ran. It was fast.").unwrap();
		let third = AnnotatedCorpus::load_or_annotate(&path, &annotator).unwrap();
		assert_eq!(third.sentences().len(), 2);
		assert_eq!(third.tokens().len(), 6);
	}

	#[test]
	fn corrupt_cache_is_rebuilt() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		std::fs::write(&path, "Short text.").unwrap();
		std::fs::write(dir.path().join("corpus.annotation.bin"), [0xff, 0xff, 0xff]).unwrap();

		let corpus = AnnotatedCorpus::load_or_annotate(&path, &LexiconAnnotator::new()).unwrap();
		assert_eq!(corpus.tokens(), ["short", "text"]);
	}

	#[test]
	fn binary_named_corpus_is_never_overwritten() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("novel.bin");
		std::fs::write(&path, "The cat sat on the mat.").unwrap();

		let annotator = LexiconAnnotator::new();
		let first = AnnotatedCorpus::load_or_annotate(&path, &annotator).unwrap();
		assert_eq!(std::fs::read_to_string(&path).unwrap(), "The cat sat on the mat.");
		assert!(dir.path().join("novel.annotation.bin").exists());

		let second = AnnotatedCorpus::load_or_annotate(&path, &annotator).unwrap();
		assert_eq!(second.tokens(), ["the", "cat", "sat", "on", "the", "mat"]);
		assert_eq!(first, second);
	}

	/// Tags every token `Other`, under its own cache key.
	struct FlatAnnotator;

	impl Annotator for FlatAnnotator {
		fn annotate(&self, text: &str) -> Result<AnnotatedCorpus> {
			let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
			let tags = vec![TagLabel::Other; tokens.len()];
			let sentence = SentenceView::new(text.to_owned(), 0..tokens.len(), false);
			AnnotatedCorpus::new(text.to_owned(), tokens, tags, vec![sentence])
		}

		fn cache_key(&self) -> String {
			"flat".to_owned()
		}
	}

	#[test]
	fn cache_from_another_annotator_is_rebuilt() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		std::fs::write(&path, "She ran home").unwrap();

		let lexicon = AnnotatedCorpus::load_or_annotate(&path, &LexiconAnnotator::new()).unwrap();
		assert_eq!(lexicon.pos_tag(0), TagLabel::Pronoun);

		let flat = AnnotatedCorpus::load_or_annotate(&path, &FlatAnnotator).unwrap();
		assert_eq!(flat.pos_tag(0), TagLabel::Other);

		let again = AnnotatedCorpus::load_or_annotate(&path, &LexiconAnnotator::new()).unwrap();
		assert_eq!(again, lexicon);
	}
}
