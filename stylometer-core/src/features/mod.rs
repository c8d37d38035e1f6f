//! Statistical feature modules.
//!
//! Every module is a pure function of token or sentence data plus the
//! parameters it is handed; none of them reads the annotator directly
//! except through [`CorpusView`](crate::annotation::CorpusView).

/// Engine parameters with validated setters.
pub mod config;

/// Fixed-precision report values and the `"N/A"` sentinel.
pub mod metric;

/// Type-token ratio and its moving-average variant (MATTR).
pub mod diversity;

/// Sentence-length distribution statistics.
///
/// Mean, spread, quartiles, higher moments and Shannon entropy of the
/// per-sentence word counts.
pub mod distribution;

/// Flesch readability, whole-corpus and per chunk of sentences.
pub mod readability;

/// Frequent word n-gram mining.
///
/// Counts contiguous token windows per size, keeps those above a
/// qualifier and ranks them, optionally spreading sizes over threads.
pub mod ngram;

/// Sentence polarity distribution.
pub mod sentiment;

/// Lexical density and part-of-speech ratios.
pub mod lexical;

pub use config::EngineConfig;
pub use metric::Metric;
