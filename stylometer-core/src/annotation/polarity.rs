use super::PolarityScorer;
use super::lexicon::word_pattern;

/// Normalization constant of the compound score.
const ALPHA: f64 = 15.0;

/// Factor applied to a valence preceded by a negation.
const NEGATION_SCALAR: f64 = -0.74;

/// Magnitude added by an intensifier right before a valenced word.
const BOOST: f64 = 0.293;

/// Magnitude added per exclamation mark, up to [`MAX_EXCLAMATIONS`].
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;

/// How many preceding words are searched for a negation.
const NEGATION_WINDOW: usize = 3;

const NEGATIONS: &[&str] = &[
	"not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot", "without",
	"don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "won't", "wouldn't", "can't",
	"couldn't", "shouldn't", "hasn't", "haven't", "hadn't",
];

const BOOSTERS: &[&str] = &[
	"very", "really", "extremely", "so", "incredibly", "absolutely", "completely", "totally", "deeply",
	"highly", "truly", "most", "too",
];

const DAMPENERS: &[&str] = &["barely", "hardly", "slightly", "somewhat", "kind", "sort", "little", "marginally"];

/// Word valences on a -4..=4 scale.
const VALENCES: &[(&str, f64)] = &[
	("good", 1.9),
	("great", 3.1),
	("excellent", 2.7),
	("wonderful", 2.7),
	("amazing", 2.8),
	("fantastic", 2.6),
	("nice", 1.8),
	("fine", 0.8),
	("best", 3.2),
	("better", 1.9),
	("happy", 2.7),
	("happiness", 2.6),
	("glad", 2.0),
	("joy", 2.8),
	("love", 3.2),
	("loved", 2.9),
	("lovely", 2.8),
	("like", 1.5),
	("liked", 1.8),
	("beautiful", 2.9),
	("kind", 2.4),
	("gentle", 1.9),
	("warm", 1.2),
	("bright", 1.9),
	("hope", 1.9),
	("smile", 1.5),
	("smiled", 2.0),
	("laugh", 2.6),
	("laughed", 2.0),
	("win", 2.8),
	("won", 2.7),
	("success", 2.7),
	("safe", 1.9),
	("calm", 1.3),
	("peace", 2.5),
	("free", 2.3),
	("friend", 2.2),
	("thanks", 1.9),
	("enjoy", 2.2),
	("pleasant", 2.3),
	("perfect", 2.7),
	("brilliant", 2.8),
	("proud", 2.1),
	("bad", -2.5),
	("worse", -2.1),
	("worst", -3.1),
	("terrible", -2.1),
	("awful", -2.0),
	("horrible", -2.5),
	("sad", -2.1),
	("unhappy", -1.8),
	("angry", -2.3),
	("hate", -2.7),
	("hated", -3.2),
	("fear", -2.2),
	("afraid", -2.2),
	("scared", -2.2),
	("cry", -2.1),
	("cried", -1.6),
	("pain", -2.3),
	("hurt", -2.4),
	("lost", -1.3),
	("lose", -1.7),
	("fail", -2.5),
	("failed", -2.3),
	("dead", -3.3),
	("death", -2.9),
	("die", -2.9),
	("died", -2.6),
	("kill", -3.7),
	("killed", -3.5),
	("war", -2.9),
	("cold", -0.3),
	("dark", -0.8),
	("alone", -1.0),
	("lonely", -1.5),
	("sick", -2.3),
	("ugly", -2.3),
	("cruel", -2.8),
	("danger", -2.4),
	("wrong", -2.1),
	("problem", -1.7),
	("trouble", -1.7),
	("sorry", -0.3),
	("tired", -1.9),
	("worried", -1.2),
	("miserable", -2.2),
	("disaster", -3.1),
];

/// Lexicon based compound polarity scorer.
///
/// Each valenced word contributes its valence, strengthened by an intensifier
/// or weakened by a dampener right before it, and flipped when a negation
/// appears within the previous three words. Exclamation marks amplify the
/// sum, which is then squashed into `[-1, 1]` with `s / sqrt(s² + 15)`.
#[derive(Debug, Default, Clone)]
pub struct LexiconPolarityScorer;

impl LexiconPolarityScorer {
	pub fn new() -> Self {
		Self
	}

	fn valence(word: &str) -> Option<f64> {
		VALENCES.iter().find(|(entry, _)| *entry == word).map(|(_, valence)| *valence)
	}

	/// Unnormalized sentiment sum of a sentence.
	pub fn raw_score(&self, sentence: &str) -> f64 {
		let lowered = sentence.to_lowercase();
		let words: Vec<&str> = word_pattern().find_iter(&lowered).map(|m| m.as_str()).collect();

		let mut sum = 0.0;
		for (index, word) in words.iter().enumerate() {
			let Some(mut valence) = Self::valence(word) else {
				continue;
			};
			// "kind of" is a dampener, not a valence
			if *word == "kind" && words.get(index + 1) == Some(&"of") {
				continue;
			}

			if let Some(previous) = index.checked_sub(1).map(|p| words[p]) {
				let sign = valence.signum();
				if BOOSTERS.contains(&previous) {
					valence += sign * BOOST;
				} else if DAMPENERS.contains(&previous) {
					valence -= sign * BOOST;
				}
			}

			let window = &words[index.saturating_sub(NEGATION_WINDOW)..index];
			if window.iter().any(|w| NEGATIONS.contains(w)) {
				valence *= NEGATION_SCALAR;
			}
			sum += valence;
		}

		if sum != 0.0 {
			let exclamations = sentence.matches('!').count().min(MAX_EXCLAMATIONS);
			sum += sum.signum() * exclamations as f64 * EXCLAMATION_BOOST;
		}
		sum
	}
}

/// Squashes a raw sum into `[-1, 1]`.
fn normalize(score: f64) -> f64 {
	(score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

impl PolarityScorer for LexiconPolarityScorer {
	fn compound(&self, sentence: &str) -> f64 {
		normalize(self.raw_score(sentence))
	}
}
