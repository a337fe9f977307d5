//! Search configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! radius = 250
//! suggestion_limit = 10
//! min_prefix_len = 3
//! highlight_start = "<mark>"
//! highlight_end = "</mark>"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::snippet::SnippetOptions;

/// Bytes of context kept on each side of a match
pub const DEFAULT_RADIUS: usize = 250;
/// Maximum number of suggestions returned
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;
/// Shortest prefix accepted for autocomplete
pub const DEFAULT_MIN_PREFIX_LEN: usize = 3;
/// Marker opening a highlighted span
pub const DEFAULT_HIGHLIGHT_START: &str = "<mark>";
/// Marker closing a highlighted span
pub const DEFAULT_HIGHLIGHT_END: &str = "</mark>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Context radius in bytes around each match
    #[serde(default = "default_radius")]
    pub radius: usize,
    /// Cap on unique suggestions per request
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Minimum prefix length (bytes) for autocomplete
    #[serde(default = "default_min_prefix_len")]
    pub min_prefix_len: usize,
    #[serde(default = "default_highlight_start")]
    pub highlight_start: String,
    #[serde(default = "default_highlight_end")]
    pub highlight_end: String,
}

fn default_radius() -> usize {
    DEFAULT_RADIUS
}

fn default_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_min_prefix_len() -> usize {
    DEFAULT_MIN_PREFIX_LEN
}

fn default_highlight_start() -> String {
    DEFAULT_HIGHLIGHT_START.to_string()
}

fn default_highlight_end() -> String {
    DEFAULT_HIGHLIGHT_END.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            min_prefix_len: DEFAULT_MIN_PREFIX_LEN,
            highlight_start: default_highlight_start(),
            highlight_end: default_highlight_end(),
        }
    }
}

impl SearchConfig {
    /// Commented default config, suitable for writing next to a corpus.
    pub fn default_toml() -> &'static str {
        r#"# Corpus search configuration
#
# Bytes of context kept on each side of a match. Matches whose context
# windows touch are merged into one snippet.
radius = 250

# Maximum number of autocomplete suggestions.
suggestion_limit = 10

# Prefixes shorter than this are rejected.
min_prefix_len = 3

# Markers wrapped around every highlighted match.
highlight_start = "<mark>"
highlight_end = "</mark>"
"#
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SearchConfig = toml::from_str(content)
            .map_err(|e| SearchError::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SearchError::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suggestion_limit == 0 {
            return Err(SearchError::config("suggestion_limit must be > 0"));
        }
        if self.min_prefix_len == 0 {
            return Err(SearchError::config("min_prefix_len must be > 0"));
        }
        if self.highlight_start.is_empty() || self.highlight_end.is_empty() {
            return Err(SearchError::config("highlight markers must not be empty"));
        }
        Ok(())
    }

    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Window builder settings derived from this config
    pub fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            radius: self.radius,
            highlight_start: self.highlight_start.clone(),
            highlight_end: self.highlight_end.clone(),
        }
    }
}
