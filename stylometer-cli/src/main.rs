use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stylometer_core::annotation::{AnnotatedCorpus, LexiconAnnotator, LexiconPolarityScorer};
use stylometer_core::io;
use stylometer_core::report::{StyleEngine, json_token_count};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Extract stylometric features from a text corpus.
#[derive(Parser, Debug)]
#[command(name = "stylometer", version)]
struct Cli {
    /// Corpus file, read whole and lower-cased
    #[arg(default_value = "corpus.txt")]
    corpus: PathBuf,

    /// Folder receiving result.json and result.txt
    #[arg(default_value = "outputs")]
    output: String,
}

fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Annotate the corpus, reusing "<corpus>.annotation.bin" when it matches
    let corpus = AnnotatedCorpus::load_or_annotate(&cli.corpus, &LexiconAnnotator::new())
        .with_context(|| format!("failed to annotate {}", cli.corpus.display()))?;

    // Default parameters: MATTR window 250, 3..=10 grams seen more than 3 times, top 10
    let engine = StyleEngine::default();
    let report = engine
        .analyze(&corpus, &LexiconPolarityScorer::new())
        .with_context(|| format!("failed to analyze {}", cli.corpus.display()))?;

    let (json_path, text_path) = io::write_report(&cli.output, &report)
        .with_context(|| format!("failed to write report into {}", cli.output))?;
    tracing::info!(json = %json_path.display(), text = %text_path.display(), "report written");

    let tokens = json_token_count(&serde_json::to_value(&report)?);
    println!("JSON Tokens: {}", tokens);

    Ok(())
}
