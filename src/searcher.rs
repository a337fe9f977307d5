//! Searcher
//!
//! The two operations a transport layer calls: `search` and `suggest`.
//! Stateless per request; clone freely across threads.

use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::index::CorpusIndex;
use crate::query::{compile_prefix, SearchOptions};
use crate::snippet::{build_snippets, Snippet, SnippetOptions};
use crate::suggest::suggest;

#[derive(Debug, Clone)]
pub struct Searcher {
    index: CorpusIndex,
    config: SearchConfig,
    snippet_options: SnippetOptions,
}

impl Searcher {
    pub fn new(index: CorpusIndex, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let snippet_options = config.snippet_options();
        Ok(Self {
            index,
            config,
            snippet_options,
        })
    }

    /// Searcher with the default configuration
    pub fn with_defaults(index: CorpusIndex) -> Self {
        let config = SearchConfig::default();
        let snippet_options = config.snippet_options();
        Self {
            index,
            config,
            snippet_options,
        }
    }

    /// Highlighted snippets for every match of `options`, in corpus order.
    ///
    /// # Errors
    /// `InvalidQuery` for missing terms, `PatternCompile` for a bad expression.
    pub fn search(&self, options: &SearchOptions) -> Result<Vec<Snippet>> {
        let pattern = options.compile().map_err(|e| {
            warn!(target: "alice_corpus_search", terms = ?options.terms, error = %e, "search rejected");
            e
        })?;

        let matches = self.index.find_all(&pattern);
        let snippets = build_snippets(&matches, self.index.text(), &self.snippet_options);

        debug!(
            target: "alice_corpus_search",
            pattern = pattern.as_str(),
            matches = matches.len(),
            snippets = snippets.len(),
            "search"
        );
        Ok(snippets)
    }

    /// Word completions for the first whitespace-separated token of `prefix`.
    ///
    /// # Errors
    /// `InvalidQuery` when the token is shorter than `min_prefix_len` bytes,
    /// `PatternCompile` for a bad expression.
    pub fn suggest(&self, prefix: &str) -> Result<Vec<String>> {
        let term = prefix.split_whitespace().next().unwrap_or("");
        if term.len() < self.config.min_prefix_len {
            warn!(target: "alice_corpus_search", prefix, "suggestion prefix too short");
            return Err(SearchError::invalid_query(format!(
                "prefix must be at least {} characters",
                self.config.min_prefix_len
            )));
        }

        let pattern = compile_prefix(term)?;
        let matches = self.index.find_all(&pattern);
        let words = suggest(&matches, self.index.text(), self.config.suggestion_limit);

        debug!(
            target: "alice_corpus_search",
            prefix = term,
            matches = matches.len(),
            suggestions = words.len(),
            "suggest"
        );
        Ok(words)
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
