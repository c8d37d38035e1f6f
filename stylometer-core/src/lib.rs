//! Stylometric feature extraction.
//!
//! This crate turns one annotated text corpus into a [`FeatureReport`]:
//! - Lexical and part-of-speech densities
//! - Lexical diversity as a moving-average type-token ratio
//! - Sentence-length distribution statistics
//! - Flesch readability, whole-corpus and per chunk
//! - Sentence sentiment distribution
//! - Frequent word n-grams
//!
//! Tokenization, tagging and sentiment scoring sit behind the traits of
//! [`annotation`]; the reference implementations shipped there can be
//! swapped for any other backend.

/// Annotator and polarity scorer boundary, with reference implementations.
pub mod annotation;

/// Library error type.
pub mod error;

/// Statistical feature modules and engine configuration.
pub mod features;

/// Corpus loading, cache paths and report writing.
pub mod io;

/// Report assembly, JSON and text rendering.
pub mod report;

pub use annotation::{AnnotatedCorpus, CorpusView, LexiconAnnotator, LexiconPolarityScorer};
pub use error::{Result, StyloError};
pub use features::{EngineConfig, Metric};
pub use report::{FeatureReport, StyleEngine, json_token_count};
