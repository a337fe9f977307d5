//! # ALICE-Corpus-Search
//!
//! **Suffix-array full-text search over one immutable corpus**
//!
//! > "Find every match, then show it in context."
//!
//! ## Architecture
//!
//! - **Suffix Array**: prefix-doubling build, literal lookup by binary search
//! - **Corpus Index**: regex matching, seeded from the suffix array when the
//!   query is literal
//! - **Query Compiler**: terms → one alternation, case and whole-word flags
//! - **Snippets**: radius windows, adjacency merge, partial-word trimming
//! - **Suggestions**: word-start completions, deduplicated, capped
//!
//! ## Cost
//!
//! | Operation | Time |
//! |-----------|------|
//! | Build | O(N log² N) |
//! | Literal query | O(M log N + occ × M) |
//! | Regex query | O(N) |
//! | Snippets | O(occ × radius) |
//!
//! ## Example
//!
//! ```
//! use alice_corpus_search::{CorpusIndex, SearchConfig, SearchOptions, Searcher};
//!
//! let index = CorpusIndex::from_bytes("the cat sat on the mat. category. the cat");
//! let searcher = Searcher::new(index, SearchConfig::default().with_radius(8)).unwrap();
//!
//! let snippets = searcher
//!     .search(&SearchOptions::parse("cat").whole_word(true))
//!     .unwrap();
//! assert_eq!(snippets.len(), 2);
//! assert_eq!(snippets[0].text, "the <mark>cat</mark> sat on");
//!
//! assert_eq!(searcher.suggest("cat").unwrap(), vec!["cat", "category"]);
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod searcher;
pub mod snippet;
pub mod suffix;
pub mod suggest;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use index::{CorpusIndex, MatchRange};
pub use query::{compile, compile_prefix, Pattern, SearchOptions};
pub use searcher::Searcher;
pub use snippet::{build_snippets, Snippet, SnippetOptions};
pub use suffix::SuffixArray;
pub use suggest::suggest;

/// Version
pub const VERSION: &str = "0.1.0";
