//! Context Window Builder
//!
//! Turns sorted match ranges into highlighted snippets.
//!
//! Each match gets a window of `radius` bytes on both sides, clamped to the
//! corpus. Walking matches in ascending order, a match whose window starts at
//! or before the running group's extended end (`last_end + radius`) joins the
//! group; otherwise the group is closed and emitted. A closed window drops its
//! first token (through the first ASCII blank) and its last token, unless the
//! edge was clamped to the corpus boundary.
//!
//! Highlights are widened to UTF-8 character boundaries. Trimmed edges sit
//! next to an ASCII blank or on a highlight edge, so the window never splits a
//! multi-byte character either.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::{DEFAULT_HIGHLIGHT_END, DEFAULT_HIGHLIGHT_START, DEFAULT_RADIUS};
use crate::index::MatchRange;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetOptions {
    /// Context bytes on each side of a match
    pub radius: usize,
    pub highlight_start: String,
    pub highlight_end: String,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            highlight_start: DEFAULT_HIGHLIGHT_START.to_string(),
            highlight_end: DEFAULT_HIGHLIGHT_END.to_string(),
        }
    }
}

impl SnippetOptions {
    pub fn with_radius(radius: usize) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }
}

/// One emitted context window.
///
/// Serializes as its `text` alone, which is what a transport layer returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Window start in the corpus (after trimming)
    pub from: usize,
    /// Window end in the corpus (after trimming)
    pub to: usize,
    /// Highlighted corpus ranges, ascending, non-overlapping
    pub highlights: Vec<MatchRange>,
    /// Window text with markers around every highlight
    pub text: String,
}

impl Snippet {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Snippet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[inline]
fn is_blank(b: u8) -> bool {
    b.is_ascii_whitespace()
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Move `pos` left onto the start of the character it falls in.
fn floor_char_boundary(corpus: &[u8], mut pos: usize) -> usize {
    while pos > 0 && pos < corpus.len() && is_continuation(corpus[pos]) {
        pos -= 1;
    }
    pos
}

/// Move `pos` right past the character it falls in.
fn ceil_char_boundary(corpus: &[u8], mut pos: usize) -> usize {
    while pos < corpus.len() && is_continuation(corpus[pos]) {
        pos += 1;
    }
    pos
}

/// Matches collected into one window.
struct Group {
    /// Clamped, untrimmed window start
    from: usize,
    highlights: Vec<MatchRange>,
}

impl Group {
    fn new(from: usize, first: MatchRange) -> Self {
        Self {
            from,
            highlights: vec![first],
        }
    }

    #[inline]
    fn last_end(&self) -> usize {
        self.highlights.last().map_or(self.from, |h| h.end)
    }

    /// Clamped end of the window as it stands
    #[inline]
    fn window_end(&self, radius: usize, len: usize) -> usize {
        self.last_end().saturating_add(radius).min(len)
    }

    fn push(&mut self, m: MatchRange) {
        match self.highlights.last_mut() {
            // Overlapping input: widen the open span, never nest markers
            Some(last) if m.start < last.end => last.end = last.end.max(m.end),
            _ => self.highlights.push(m),
        }
    }

    fn close(self, corpus: &[u8], opts: &SnippetOptions) -> Snippet {
        let len = corpus.len();
        let first_start = self.highlights[0].start;
        let last_end = self.last_end();

        let mut from = self.from;
        if from > 0 {
            from = match corpus[from..first_start].iter().position(|&b| is_blank(b)) {
                Some(i) => from + i + 1,
                None => first_start,
            };
            while from < first_start && is_blank(corpus[from]) {
                from += 1;
            }
        }

        let mut to = self.window_end(opts.radius, len);
        if to < len {
            to = match corpus[last_end..to].iter().rposition(|&b| is_blank(b)) {
                Some(i) => last_end + i,
                None => last_end,
            };
            while to > last_end && is_blank(corpus[to - 1]) {
                to -= 1;
            }
        }

        let markers = opts.highlight_start.len() + opts.highlight_end.len();
        let mut out = Vec::with_capacity(to - from + self.highlights.len() * markers);
        let mut cursor = from;
        for h in &self.highlights {
            out.extend_from_slice(&corpus[cursor..h.start]);
            out.extend_from_slice(opts.highlight_start.as_bytes());
            out.extend_from_slice(&corpus[h.start..h.end]);
            out.extend_from_slice(opts.highlight_end.as_bytes());
            cursor = h.end;
        }
        out.extend_from_slice(&corpus[cursor..to]);

        Snippet {
            from,
            to,
            highlights: self.highlights,
            text: String::from_utf8_lossy(&out).into_owned(),
        }
    }
}

/// Build merged, trimmed, highlighted snippets for `matches`.
///
/// Input order does not matter. Ranges are clamped to the corpus, empty ranges
/// are ignored, and the rest are widened to character boundaries. Produces at
/// most one snippet per match.
pub fn build_snippets(matches: &[MatchRange], corpus: &[u8], opts: &SnippetOptions) -> Vec<Snippet> {
    let len = corpus.len();
    let mut sorted: Vec<MatchRange> = matches
        .iter()
        .map(|m| {
            let start = m.start.min(len);
            MatchRange::new(start, m.end.clamp(start, len))
        })
        .filter(|m| !m.is_empty())
        .map(|m| {
            MatchRange::new(
                floor_char_boundary(corpus, m.start),
                ceil_char_boundary(corpus, m.end),
            )
        })
        .collect();
    sorted.sort_unstable();

    let mut snippets = Vec::new();
    let mut group: Option<Group> = None;

    for m in sorted {
        let from = m.start.saturating_sub(opts.radius);
        match group.as_mut() {
            Some(g) if from <= g.window_end(opts.radius, len) => g.push(m),
            _ => {
                if let Some(done) = group.take() {
                    snippets.push(done.close(corpus, opts));
                }
                group = Some(Group::new(from, m));
            }
        }
    }
    if let Some(done) = group {
        snippets.push(done.close(corpus, opts));
    }

    snippets
}
