use std::sync::OnceLock;

use regex::Regex;

use super::{AnnotatedCorpus, Annotator, SentenceView, TagLabel};
use crate::error::Result;

static WORD: OnceLock<Regex> = OnceLock::new();

pub(super) fn word_pattern() -> &'static Regex {
	WORD.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").expect("valid regex"))
}

const PRONOUNS: &[&str] = &[
	"i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his",
	"himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our", "ours", "ourselves",
	"they", "them", "their", "theirs", "themselves", "who", "whom", "whose", "someone", "anyone", "everyone",
	"nobody", "somebody", "everybody", "something", "anything", "everything", "nothing",
];

/// Determiners, prepositions, conjunctions and other function words.
const FUNCTION_WORDS: &[&str] = &[
	"the", "a", "an", "and", "or", "but", "nor", "for", "of", "in", "on", "at", "by", "with", "from", "to",
	"into", "onto", "upon", "about", "above", "below", "over", "under", "between", "among", "through",
	"during", "before", "after", "since", "until", "against", "without", "within", "along", "across",
	"behind", "beyond", "near", "off", "out", "up", "down", "this", "that", "these", "those", "some", "any",
	"no", "every", "each", "either", "neither", "both", "all", "few", "many", "much", "more", "most", "other",
	"another", "such", "if", "than", "because", "while", "although", "though", "whether", "as", "what",
	"which", "when", "where", "why", "how", "like", "unless",
];

const AUXILIARIES: &[&str] = &[
	"be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having", "do", "does",
	"did", "can", "could", "will", "would", "shall", "should", "may", "might", "must",
];

const SUBJECT_PRONOUNS: &[&str] = &["i", "you", "he", "she", "it", "we", "they", "who"];

const MODALS: &[&str] = &["can", "could", "will", "would", "shall", "should", "may", "might", "must", "to"];

const VERBS: &[&str] = &[
	"say", "said", "go", "goes", "went", "gone", "get", "gets", "got", "make", "makes", "made", "know",
	"knew", "known", "think", "thought", "take", "took", "taken", "see", "saw", "seen", "come", "came",
	"want", "look", "use", "find", "found", "give", "gave", "given", "tell", "told", "feel", "felt", "seem",
	"leave", "left", "call", "keep", "kept", "let", "begin", "began", "run", "ran", "sit", "sat", "stand",
	"stood", "hear", "heard", "walk", "turn", "put", "bring", "brought", "hold", "held", "write", "wrote",
	"written", "speak", "spoke", "read", "meet", "met", "pay", "paid", "lose", "lost", "fall", "fell",
];

const ADVERBS: &[&str] = &[
	"not", "never", "very", "too", "also", "just", "only", "even", "still", "already", "always", "often",
	"sometimes", "usually", "again", "here", "there", "now", "then", "soon", "quite", "rather", "almost",
	"so", "well", "yet", "ever", "perhaps", "maybe", "away", "back", "once", "together", "later", "today",
];

const ADJECTIVES: &[&str] = &[
	"good", "bad", "new", "old", "great", "big", "small", "long", "little", "high", "low", "young", "large",
	"different", "important", "same", "happy", "sad", "dark", "cold", "hot", "warm", "bright", "quiet",
	"strange", "true", "free", "full", "whole", "real", "best", "better", "worse", "worst", "last", "first",
	"early", "late", "red", "black", "white", "green", "blue", "fast", "slow", "easy", "hard", "fine",
];

/// Words ending in `-ly` that are not adverbs.
const LY_NON_ADVERBS: &[&str] = &["family", "reply", "supply", "apply", "belly", "lily", "rally", "ally", "only"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ic", "ish"];

const PASSIVE_AUXILIARIES: &[&str] = &[
	"am", "is", "are", "was", "were", "be", "been", "being", "get", "gets", "got", "gotten", "isn't",
	"aren't", "wasn't", "weren't",
];

const IRREGULAR_PARTICIPLES: &[&str] = &[
	"done", "made", "given", "taken", "seen", "known", "written", "told", "found", "held", "kept", "left",
	"built", "sent", "brought", "bought", "caught", "taught", "thought", "born", "broken", "chosen",
	"driven", "eaten", "fallen", "forgotten", "hidden", "spoken", "stolen", "worn", "shown", "thrown",
	"drawn", "paid", "said", "sold", "heard", "led", "lost", "met", "put", "set", "shut", "hit", "hurt",
	"cut", "beaten", "bitten", "forgiven",
];

/// Abbreviations whose period does not end a sentence.
const ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "st", "jr", "sr", "vs", "etc", "prof", "e.g", "i.e"];

/// Rule and lexicon based annotator for English prose.
///
/// # Responsibilities
/// - Split words on letters and digits, keeping inner apostrophes and hyphens
/// - Segment sentences at terminal punctuation followed by whitespace, a quote
///   or the end of text, skipping common abbreviations
/// - Tag words from closed-class lexicons, suffixes and the previous word
/// - Flag sentences holding a form of *be*/*get* followed by a participle
///
/// # Notes
/// - Accuracy is that of a heuristic; it exists so the engine can run
///   without an external NLP service.
#[derive(Debug, Default, Clone)]
pub struct LexiconAnnotator;

impl LexiconAnnotator {
	pub fn new() -> Self {
		Self
	}

	/// Sentence texts, trimmed; whitespace-only pieces are dropped.
	pub fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
		let chars: Vec<(usize, char)> = text.char_indices().collect();
		let mut sentences = Vec::new();
		let mut start = 0;
		let mut i = 0;

		while i < chars.len() {
			let (offset, c) = chars[i];
			if !matches!(c, '.' | '!' | '?') {
				i += 1;
				continue;
			}

			// Consume the whole run of terminators
			let mut j = i;
			while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
				j += 1;
			}
			let end = chars.get(j).map_or(text.len(), |(o, _)| *o);
			let boundary = match chars.get(j) {
				None => true,
				Some((_, next)) => next.is_whitespace() || matches!(next, '"' | '”' | '\'' | '‘' | '’' | '“'),
			};

			if boundary && !(c == '.' && j == i + 1 && Self::ends_with_abbreviation(&text[start..offset])) {
				Self::push_trimmed(&mut sentences, &text[start..end]);
				start = end;
			}
			i = j;
		}
		Self::push_trimmed(&mut sentences, &text[start..]);
		sentences
	}

	fn push_trimmed<'t>(sentences: &mut Vec<&'t str>, piece: &'t str) {
		let piece = piece.trim();
		if !piece.is_empty() {
			sentences.push(piece);
		}
	}

	fn ends_with_abbreviation(before: &str) -> bool {
		let last = before.rsplit(char::is_whitespace).next().unwrap_or("");
		ABBREVIATIONS.contains(&last)
	}

	/// Word tokens of `text`, in order.
	pub fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
		word_pattern().find_iter(text).map(|m| m.as_str()).collect()
	}

	/// Tags one sentence's words.
	pub fn tag(&self, words: &[&str]) -> Vec<TagLabel> {
		let mut tags: Vec<TagLabel> = Vec::with_capacity(words.len());
		for (index, word) in words.iter().enumerate() {
			let previous = index.checked_sub(1).map(|p| words[p]);
			tags.push(Self::tag_word(word, previous));
		}
		tags
	}

	fn tag_word(word: &str, previous: Option<&str>) -> TagLabel {
		if PRONOUNS.contains(&word) {
			return TagLabel::Pronoun;
		}
		if FUNCTION_WORDS.contains(&word) {
			return TagLabel::Other;
		}
		if AUXILIARIES.contains(&word) || VERBS.contains(&word) || word.ends_with("n't") {
			return TagLabel::Verb;
		}
		if ADVERBS.contains(&word) {
			return TagLabel::Adverb;
		}
		if ADJECTIVES.contains(&word) {
			return TagLabel::Adjective;
		}
		if word.chars().all(|c| c.is_numeric()) {
			return TagLabel::Other;
		}

		let len = word.chars().count();
		if len > 4 && word.ends_with("ly") && !LY_NON_ADVERBS.contains(&word) {
			return TagLabel::Adverb;
		}
		if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
			return TagLabel::Adjective;
		}
		if previous.is_some_and(|p| SUBJECT_PRONOUNS.contains(&p) || MODALS.contains(&p)) {
			return TagLabel::Verb;
		}
		if (len > 4 && word.ends_with("ed")) || (len > 5 && word.ends_with("ing")) {
			return TagLabel::Verb;
		}
		TagLabel::Noun
	}

	/// Whether a sentence's words contain a passive construction.
	pub fn is_passive(&self, words: &[&str], tags: &[TagLabel]) -> bool {
		words.iter().enumerate().any(|(index, word)| {
			if !PASSIVE_AUXILIARIES.contains(word) {
				return false;
			}
			let mut next = index + 1;
			if tags.get(next) == Some(&TagLabel::Adverb) {
				next += 1;
			}
			words.get(next).is_some_and(|candidate| Self::is_participle(candidate))
		})
	}

	fn is_participle(word: &str) -> bool {
		IRREGULAR_PARTICIPLES.contains(&word) || (word.chars().count() > 3 && word.ends_with("ed"))
	}
}

impl Annotator for LexiconAnnotator {
	fn annotate(&self, text: &str) -> Result<AnnotatedCorpus> {
		let mut tokens = Vec::new();
		let mut tags = Vec::new();
		let mut sentences = Vec::new();

		for sentence in self.segment(text) {
			let words = self.tokenize(sentence);
			let sentence_tags = self.tag(&words);
			let passive = self.is_passive(&words, &sentence_tags);

			let start = tokens.len();
			tokens.extend(words.iter().map(|w| (*w).to_owned()));
			tags.extend(sentence_tags);
			sentences.push(SentenceView::new(sentence.to_owned(), start..tokens.len(), passive));
		}

		tracing::debug!(tokens = tokens.len(), sentences = sentences.len(), "annotated corpus");
		AnnotatedCorpus::new(text.to_owned(), tokens, tags, sentences)
	}

	/// Lexicons ship with the crate, so its version identifies them.
	fn cache_key(&self) -> String {
		format!("lexicon-{}", env!("CARGO_PKG_VERSION"))
	}
}
