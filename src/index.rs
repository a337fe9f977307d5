//! Corpus Index
//!
//! Build once, query many. The corpus bytes and the suffix array are shared
//! behind `Arc`, so clones are cheap and concurrent readers need no locking.
//!
//! **Query strategy**:
//! - Pattern reducible to literals: candidates come from the suffix array,
//!   each confirmed by the regex at that offset (O(M log N + occ × M)).
//! - Anything else: a single left-to-right regex scan (O(N)).
//!
//! Both strategies return the same ranges: leftmost-first, non-overlapping,
//! ascending.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::query::Pattern;
use crate::suffix::SuffixArray;

/// Half-open byte range `[start, end)` of one match in the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Immutable, pattern-searchable index over one corpus.
#[derive(Clone)]
pub struct CorpusIndex {
    text: Arc<[u8]>,
    suffixes: Arc<SuffixArray>,
}

impl fmt::Debug for CorpusIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorpusIndex")
            .field("corpus_bytes", &self.text.len())
            .field("size_bytes", &self.size_bytes())
            .finish_non_exhaustive()
    }
}

impl CorpusIndex {
    /// Build the index from bytes already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let started = Instant::now();
        let bytes: Vec<u8> = bytes.into();
        let text: Arc<[u8]> = Arc::from(bytes);
        let suffixes = Arc::new(SuffixArray::build(Arc::clone(&text)));

        info!(
            target: "alice_corpus_search",
            corpus_bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Corpus index built"
        );

        Self { text, suffixes }
    }

    /// Read the whole corpus from `reader` and build the index.
    ///
    /// # Errors
    /// `SearchError::Io` if the reader fails.
    pub fn load<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Convenience wrapper around [`CorpusIndex::load`] for a file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::load(BufReader::new(file))
    }

    /// Every non-overlapping match of `pattern`, ascending by start.
    ///
    /// Empty matches are never reported.
    pub fn find_all(&self, pattern: &Pattern) -> Vec<MatchRange> {
        let (strategy, matches) = if pattern.has_literals() {
            ("literal", self.find_by_literals(pattern))
        } else {
            ("scan", self.scan(pattern))
        };

        debug!(
            target: "alice_corpus_search",
            pattern = pattern.as_str(),
            strategy,
            matches = matches.len(),
            "find_all"
        );
        matches
    }

    /// Full left-to-right regex scan.
    pub(crate) fn scan(&self, pattern: &Pattern) -> Vec<MatchRange> {
        pattern
            .regex()
            .find_iter(&self.text)
            .filter(|m| !m.is_empty())
            .map(|m| MatchRange::new(m.start(), m.end()))
            .collect()
    }

    /// Suffix-array lookup of every literal, then regex confirmation.
    ///
    /// A literal-only pattern matches exactly one of its literals, so the
    /// confirming search never needs more than `longest + 1` bytes past the
    /// candidate (the extra byte gives a trailing `\b` its real context).
    pub(crate) fn find_by_literals(&self, pattern: &Pattern) -> Vec<MatchRange> {
        let longest = pattern.literals().iter().map(Vec::len).max().unwrap_or(0);

        let mut candidates: Vec<usize> = pattern
            .literals()
            .iter()
            .flat_map(|lit| self.suffixes.locate(lit))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let mut matches = Vec::new();
        let mut next = 0;
        for pos in candidates {
            if pos < next {
                continue;
            }
            let limit = (pos + longest + 1).min(self.text.len());
            if let Some(m) = pattern.regex().find_at(&self.text[..limit], pos) {
                if m.start() == pos && !m.is_empty() {
                    matches.push(MatchRange::new(m.start(), m.end()));
                    next = m.end();
                }
            }
        }
        matches
    }

    /// The corpus bytes
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Corpus bytes in `range`, clamped to the corpus.
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        let end = range.end.min(self.text.len());
        let start = range.start.min(end);
        &self.text[start..end]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn suffix_array(&self) -> &SuffixArray {
        &self.suffixes
    }

    /// Approximate heap footprint: corpus plus suffix array
    pub fn size_bytes(&self) -> usize {
        self.text.len() + self.suffixes.size_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::query::{compile, compile_prefix};

    fn ranges(index: &CorpusIndex, terms: &[&str], cs: bool, ww: bool) -> Vec<(usize, usize)> {
        let pattern = compile(terms, cs, ww).unwrap();
        index
            .find_all(&pattern)
            .into_iter()
            .map(|m| (m.start, m.end))
            .collect()
    }

    #[test]
    fn test_case_sensitive_literal() {
        let index = CorpusIndex::from_bytes("the The THE");
        assert_eq!(ranges(&index, &["THE"], true, false), vec![(8, 11)]);
        assert_eq!(
            ranges(&index, &["THE"], false, false),
            vec![(0, 3), (4, 7), (8, 11)]
        );
    }

    #[test]
    fn test_whole_word_excludes_substrings() {
        let index = CorpusIndex::from_bytes("category cat catalog");
        assert_eq!(ranges(&index, &["cat"], false, true), vec![(9, 12)]);
        assert_eq!(ranges(&index, &["cat"], true, true), vec![(9, 12)]);
        assert_eq!(ranges(&index, &["cat"], true, false).len(), 3);
    }

    #[test]
    fn test_literal_overlaps_resolved_leftmost_first() {
        let index = CorpusIndex::from_bytes("aaaaa");
        let pattern = compile(&["aa"], true, false).unwrap();
        assert!(pattern.has_literals());
        assert_eq!(
            index.find_all(&pattern),
            vec![MatchRange::new(0, 2), MatchRange::new(2, 4)]
        );
    }

    #[test]
    fn test_alternation_prefers_first_term() {
        let index = CorpusIndex::from_bytes("ab abc");
        let pattern = compile(&["ab", "abc"], true, false).unwrap();
        assert_eq!(index.find_by_literals(&pattern), index.scan(&pattern));
        assert_eq!(index.find_all(&pattern)[1], MatchRange::new(3, 5));
    }

    #[test]
    fn test_literal_path_equals_scan() {
        let text = "To be, or not to be: that is the question. Tobe or not; be-to be.";
        let index = CorpusIndex::from_bytes(text);
        let cases: [&[&str]; 4] = [&["be"], &["to", "be"], &["question", "not"], &["e"]];
        for terms in cases {
            for ww in [false, true] {
                let pattern = compile(terms, true, ww).unwrap();
                assert!(pattern.has_literals());
                assert_eq!(
                    index.find_by_literals(&pattern),
                    index.scan(&pattern),
                    "terms {:?} whole_word {}",
                    terms,
                    ww
                );
            }
        }
    }

    #[test]
    fn test_match_at_corpus_edges() {
        let index = CorpusIndex::from_bytes("end at end");
        assert_eq!(ranges(&index, &["end"], true, true), vec![(0, 3), (7, 10)]);
    }

    #[test]
    fn test_no_matches() {
        let index = CorpusIndex::from_bytes("hello world");
        assert!(ranges(&index, &["xyz"], true, false).is_empty());
        assert!(ranges(&index, &["xyz"], false, false).is_empty());
    }

    #[test]
    fn test_empty_matches_dropped() {
        let index = CorpusIndex::from_bytes("bbb");
        let pattern = compile(&["a*"], true, false).unwrap();
        assert!(index.find_all(&pattern).is_empty());
    }

    #[test]
    fn test_prefix_pattern_scans() {
        let index = CorpusIndex::from_bytes("cat cats cat catalog");
        let pattern = compile_prefix("cat").unwrap();
        assert_eq!(
            index.find_all(&pattern),
            vec![
                MatchRange::new(0, 3),
                MatchRange::new(3, 8),
                MatchRange::new(8, 12),
                MatchRange::new(12, 20),
            ]
        );
    }

    #[test]
    fn test_load_from_reader() {
        let index = CorpusIndex::load(&b"read me"[..]).unwrap();
        assert_eq!(index.text(), b"read me");
        assert_eq!(index.len(), 7);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CorpusIndex::open(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, SearchError::Io { .. }));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "From forth the fatal loins").unwrap();
        let index = CorpusIndex::open(&path).unwrap();
        assert_eq!(ranges(&index, &["fatal"], false, false), vec![(15, 20)]);
    }

    #[test]
    fn test_slice_clamps() {
        let index = CorpusIndex::from_bytes("abc");
        assert_eq!(index.slice(1..10), b"bc");
        assert_eq!(index.slice(5..10), b"");
    }

    #[test]
    fn test_empty_corpus() {
        let index = CorpusIndex::from_bytes(Vec::new());
        assert!(index.is_empty());
        assert!(ranges(&index, &["a"], true, false).is_empty());
        assert!(ranges(&index, &["a"], false, false).is_empty());
    }

    #[test]
    fn test_clone_shares_corpus() {
        let index = CorpusIndex::from_bytes("shared");
        let other = index.clone();
        assert!(std::ptr::eq(index.text().as_ptr(), other.text().as_ptr()));
    }
}
