//! Corpus Search Demo
//!
//! Searches a text file (or a built-in verse) and prints highlighted snippets.
//!
//! ```bash
//! cargo run --example full_text_search -- --corpus completeworks.txt romeo juliet
//! cargo run --example full_text_search -- --whole-word --case-sensitive Fox
//! cargo run --example full_text_search -- --suggest fox
//! RUST_LOG=alice_corpus_search=debug cargo run --example full_text_search -- fox
//! ```

use std::path::PathBuf;

use alice_corpus_search::{CorpusIndex, SearchConfig, SearchOptions, Searcher};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "the quick brown fox jumps over the lazy dog. \
    the fox was quick and the dog was lazy. \
    a quick brown dog outfoxed a lazy fox. Foxes, foxgloves and a fox-trot.";

#[derive(Debug, Parser)]
#[command(name = "full_text_search", about = "Search a corpus and print snippets")]
struct Args {
    /// Corpus file; the built-in sample is used when omitted
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// TOML search configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Context bytes around each match (overrides the config)
    #[arg(long)]
    radius: Option<usize>,

    #[arg(long)]
    case_sensitive: bool,

    #[arg(long)]
    whole_word: bool,

    /// Print autocomplete suggestions for the first term instead
    #[arg(long)]
    suggest: bool,

    /// Search terms
    #[arg(required = true)]
    terms: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SearchConfig::from_file(path)?,
        None => SearchConfig::default(),
    };
    if let Some(radius) = args.radius {
        config = config.with_radius(radius);
    }

    let index = match &args.corpus {
        Some(path) => CorpusIndex::open(path)?,
        None => CorpusIndex::from_bytes(SAMPLE),
    };
    let searcher = Searcher::new(index, config)?;
    println!(
        "=== Corpus Search Demo ({} bytes indexed, radius {}) ===\n",
        searcher.index().len(),
        searcher.config().radius
    );

    if args.suggest {
        let words = searcher.suggest(&args.terms.join(" "))?;
        println!("Suggestions for \"{}\": {:?}", args.terms[0], words);
        return Ok(());
    }

    let options = SearchOptions::new(args.terms.iter().cloned())
        .case_sensitive(args.case_sensitive)
        .whole_word(args.whole_word);
    let snippets = searcher.search(&options)?;

    if snippets.is_empty() {
        println!("  {:?} -> not found", options.terms);
    }
    for (i, snippet) in snippets.iter().enumerate() {
        println!(
            "[{}] bytes {}..{} ({} highlights)\n    {}\n",
            i + 1,
            snippet.from,
            snippet.to,
            snippet.highlights.len(),
            snippet
        );
    }
    Ok(())
}
