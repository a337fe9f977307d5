//! Suggestion Engine
//!
//! Turns prefix matches (see [`crate::query::compile_prefix`]) into unique
//! words, in the order they first appear in the corpus.

use std::collections::HashSet;

use crate::index::MatchRange;

#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Suggestion key for one match: the anchor byte skipped, everything outside
/// `[A-Za-z0-9 ]` removed.
fn suggestion_key(corpus: &[u8], m: MatchRange) -> String {
    let end = m.end.min(corpus.len());
    let mut start = m.start.min(end);
    // A match at the very start of the corpus has no anchor byte
    if start < end && !is_word_byte(corpus[start]) {
        start += 1;
    }

    corpus[start..end]
        .iter()
        .filter(|b| b.is_ascii_alphanumeric() || **b == b' ')
        .map(|&b| b as char)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Unique suggestion words for `matches`, first-seen order, at most `limit`.
///
/// Matches whose key is empty after stripping are skipped and do not count
/// toward the limit, so the result need not map 1:1 onto `matches`.
pub fn suggest(matches: &[MatchRange], corpus: &[u8], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for &m in matches {
        if results.len() >= limit {
            break;
        }
        let key = suggestion_key(corpus, m);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        results.push(key);
    }

    results
}
