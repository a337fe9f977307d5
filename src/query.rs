//! Query compilation
//!
//! Terms are regular-expression fragments joined into one alternation.
//! Precedence, outermost first: word boundaries, then the case flag, then
//! the alternation itself, so `["cat", "dog"]` in whole-word, case-insensitive
//! mode becomes `\b(?i:cat|dog)\b`.
//!
//! Word boundaries are ASCII-only (`(?-u:\b)`).

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// A compiled search expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    /// Plain byte strings one of which starts every match. Empty when the
    /// pattern cannot be reduced to literals (case folding, metacharacters).
    literals: Vec<Vec<u8>>,
}

impl Pattern {
    fn new(source: String, literals: Vec<Vec<u8>>) -> Result<Self> {
        let regex = Regex::new(&source).map_err(|e| SearchError::PatternCompile {
            pattern: source.clone(),
            source: e,
        })?;
        Ok(Self { regex, literals })
    }

    /// The expression text handed to the regex engine
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Literal prefixes usable for a suffix-array lookup.
    pub fn literals(&self) -> &[Vec<u8>] {
        &self.literals
    }

    pub fn has_literals(&self) -> bool {
        !self.literals.is_empty()
    }
}

/// Compile search terms into one pattern.
///
/// Blank terms are ignored; nothing left is an `InvalidQuery`.
pub fn compile<S: AsRef<str>>(terms: &[S], case_sensitive: bool, whole_word: bool) -> Result<Pattern> {
    let terms: Vec<&str> = terms
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.trim().is_empty())
        .collect();
    if terms.is_empty() {
        return Err(SearchError::invalid_query("missing search terms"));
    }

    let alternation = terms.join("|");
    let mut source = if case_sensitive {
        format!("(?:{})", alternation)
    } else {
        format!("(?i:{})", alternation)
    };
    if whole_word {
        source = format!(r"(?-u:\b){}(?-u:\b)", source);
    }

    let literals = if case_sensitive && terms.iter().all(|t| is_literal(t)) {
        terms.iter().map(|t| t.as_bytes().to_vec()).collect()
    } else {
        Vec::new()
    };

    Pattern::new(source, literals)
}

/// Compile the autocomplete pattern for `term`.
///
/// Matches a non-word byte (or the start of the corpus), the term, then any
/// trailing word characters. Always case-insensitive. The leading byte lets
/// the suggestion engine see word starts instead of arbitrary substrings.
pub fn compile_prefix(term: &str) -> Result<Pattern> {
    if term.trim().is_empty() {
        return Err(SearchError::invalid_query("missing prefix term"));
    }
    let source = format!(r"(?i)(?:\A|(?-u:\W))(?:{})(?-u:\w)*", term);
    Pattern::new(source, Vec::new())
}

fn is_literal(term: &str) -> bool {
    regex::escape(term) == term
}

/// Options for one search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub terms: Vec<String>,
    #[serde(default)]
    pub case_sensitive: bool,
    #[serde(default)]
    pub whole_word: bool,
}

impl SearchOptions {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Split a raw query string on whitespace, one term per word.
    pub fn parse(query: &str) -> Self {
        Self::new(query.split_whitespace())
    }

    pub fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    pub fn whole_word(mut self, on: bool) -> Self {
        self.whole_word = on;
        self
    }

    pub fn compile(&self) -> Result<Pattern> {
        compile(self.terms.as_slice(), self.case_sensitive, self.whole_word)
    }
}
