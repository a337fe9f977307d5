//! Suffix Array
//!
//! Sorted start offsets of every suffix of the corpus. All suffixes sharing a
//! prefix form one contiguous run, so a literal lookup is two binary searches.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Build the suffix array of `text` by prefix doubling.
///
/// Round `k` sorts suffixes by their first `2k` bytes using the ranks from
/// round `k / 2`, so long repeated runs never get compared byte by byte.
/// O(N log^2 N) worst case.
pub fn build_suffix_array(text: &[u8]) -> Vec<usize> {
    let n = text.len();
    let mut sa: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return sa;
    }

    let mut rank: Vec<usize> = text.iter().map(|&b| b as usize).collect();
    let mut next_rank = vec![0usize; n];
    let mut k = 1;

    loop {
        // 0 sorts a suffix that ends inside the window before any that doesn't
        let key = |i: usize| (rank[i], if i + k < n { rank[i + k] + 1 } else { 0 });
        sa.sort_unstable_by_key(|&i| key(i));

        next_rank[sa[0]] = 0;
        for w in 1..n {
            let (prev, cur) = (sa[w - 1], sa[w]);
            next_rank[cur] = next_rank[prev] + usize::from(key(prev) != key(cur));
        }
        std::mem::swap(&mut rank, &mut next_rank);

        // All ranks distinct: fully sorted
        if rank[sa[n - 1]] == n - 1 {
            break;
        }
        k *= 2;
    }

    sa
}

/// Suffix array paired with the text it indexes.
#[derive(Clone)]
pub struct SuffixArray {
    text: Arc<[u8]>,
    sa: Vec<usize>,
}

impl fmt::Debug for SuffixArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixArray")
            .field("len", &self.sa.len())
            .finish_non_exhaustive()
    }
}

impl SuffixArray {
    pub fn build(text: Arc<[u8]>) -> Self {
        let sa = build_suffix_array(&text);
        Self { text, sa }
    }

    /// Range of the suffix array whose suffixes start with `literal`.
    ///
    /// An empty literal matches every suffix.
    pub fn lookup(&self, literal: &[u8]) -> Range<usize> {
        let text = &self.text[..];
        let m = literal.len();
        let head = |pos: usize| &text[pos..(pos + m).min(text.len())];

        let start = self.sa.partition_point(|&p| head(p) < literal);
        let end = start + self.sa[start..].partition_point(|&p| head(p) == literal);
        start..end
    }

    /// Every offset where `literal` occurs, ascending.
    ///
    /// Overlapping occurrences are all reported.
    pub fn locate(&self, literal: &[u8]) -> Vec<usize> {
        let mut positions = self.sa[self.lookup(literal)].to_vec();
        positions.sort_unstable();
        positions
    }

    #[inline]
    pub fn count(&self, literal: &[u8]) -> usize {
        self.lookup(literal).len()
    }

    #[inline]
    pub fn contains(&self, literal: &[u8]) -> bool {
        !self.lookup(literal).is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sa.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sa.is_empty()
    }

    /// Heap footprint of the array (the shared text is not counted)
    pub fn size_bytes(&self) -> usize {
        self.sa.len() * std::mem::size_of::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(text: &[u8]) -> Vec<usize> {
        let mut sa: Vec<usize> = (0..text.len()).collect();
        sa.sort_by(|&a, &b| text[a..].cmp(&text[b..]));
        sa
    }

    fn array(text: &[u8]) -> SuffixArray {
        SuffixArray::build(Arc::from(text))
    }

    #[test]
    fn test_banana() {
        // a, ana, anana, banana, na, nana
        assert_eq!(build_suffix_array(b"banana"), vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_matches_naive_sort() {
        let texts: [&[u8]; 5] = [
            b"mississippi",
            b"abracadabra",
            b"aaaaaaaaaaaaaaaa",
            b"the quick brown fox jumps over the lazy dog. the fox.",
            b"\xff\x00\xfe\x00\xff",
        ];
        for text in texts {
            assert_eq!(build_suffix_array(text), naive(text), "text {:?}", text);
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert!(build_suffix_array(b"").is_empty());
        assert_eq!(build_suffix_array(b"x"), vec![0]);
    }

    #[test]
    fn test_locate_sorted() {
        let sa = array(b"abracadabra");
        assert_eq!(sa.locate(b"abra"), vec![0, 7]);
        assert_eq!(sa.locate(b"a"), vec![0, 3, 5, 7, 10]);
        assert!(sa.locate(b"xyz").is_empty());
    }

    #[test]
    fn test_locate_reports_overlaps() {
        let sa = array(b"aaaa");
        assert_eq!(sa.locate(b"aa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_count_and_contains() {
        let sa = array(b"hello world");
        assert_eq!(sa.count(b"o"), 2);
        assert!(sa.contains(b"o w"));
        assert!(!sa.contains(b"worlds"));
        assert!(!sa.contains(b"dx"));
    }

    #[test]
    fn test_empty_literal_matches_everything() {
        let sa = array(b"hello");
        assert_eq!(sa.count(b""), 5);
    }

    #[test]
    fn test_literal_longer_than_text() {
        let sa = array(b"ab");
        assert_eq!(sa.count(b"abc"), 0);
    }

    #[test]
    fn test_large_repetitive_text() {
        let text = b"the quick brown fox jumps over the lazy dog ".repeat(100);
        let sa = array(&text);
        assert_eq!(sa.count(b"the"), 200);
        assert_eq!(sa.count(b"fox"), 100);
        assert_eq!(sa.len(), text.len());
    }
}
