//! Error types
//!
//! Load-time failures (`Io`) are fatal: nothing works without a corpus.
//! Everything else is local to one request and leaves the index untouched.

use thiserror::Error;

/// Errors produced by index loading, query compilation and configuration.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The corpus could not be read
    #[error("failed to read corpus: {source}")]
    Io {
        /// Underlying I/O failure
        #[from]
        source: std::io::Error,
    },

    /// Query terms are empty or otherwise unusable
    #[error("invalid query: {reason}")]
    InvalidQuery {
        /// Why the query was rejected
        reason: String,
    },

    /// The compiled expression is not a valid regular expression
    #[error("pattern '{pattern}' failed to compile: {source}")]
    PatternCompile {
        /// The expression handed to the regex engine
        pattern: String,
        /// Regex engine diagnostic
        source: regex::Error,
    },

    /// Configuration could not be read, parsed or validated
    #[error("invalid configuration: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl SearchError {
    pub(crate) fn invalid_query(reason: impl Into<String>) -> Self {
        SearchError::InvalidQuery {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        SearchError::Config {
            reason: reason.into(),
        }
    }

    /// True for errors caused by the request itself (a client error at the
    /// transport layer), false for load and configuration failures.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            SearchError::InvalidQuery { .. } | SearchError::PatternCompile { .. }
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: SearchError = io.into();
        assert!(matches!(err, SearchError::Io { .. }));
        assert!(!err.is_query_error());
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_query_errors_are_classified() {
        assert!(SearchError::invalid_query("empty").is_query_error());
        assert!(!SearchError::config("bad radius").is_query_error());
    }
}
