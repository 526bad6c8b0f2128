//! Subsequence matching.
//!
//! A query matches a piece of text when every query character occurs in the text, in order, but
//! not necessarily contiguously. The matcher is deliberately greedy: each query character is bound
//! to the *first* occurrence at or after the scan cursor, with no backtracking and no attempt to
//! find the shortest span. For example, matching `"ab"` against `"a_a_b"` yields `[0, 4]`, not
//! `[2, 4]`.
//!
//! All positions are **character offsets** (Unicode scalar values), not byte offsets. Callers are
//! expected to case-fold both sides with [`fold_case`] before matching.

/// A single subsequence match: one strictly increasing character offset per query character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubsequenceMatch {
    positions: Vec<usize>,
}

impl SubsequenceMatch {
    pub(crate) fn new(positions: Vec<usize>) -> Self {
        debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Self { positions }
    }

    /// Matched character offsets, in query order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Offset of the first matched character.
    pub fn first(&self) -> usize {
        self.positions[0]
    }

    /// Offset of the last matched character.
    pub fn last(&self) -> usize {
        self.positions[self.positions.len() - 1]
    }

    /// Number of matched characters (always the query length).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; an empty query never produces a match.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of characters covered from the first to the last matched offset, inclusive.
    pub fn span(&self) -> usize {
        self.last() - self.first() + 1
    }

    /// Consume the match and return its positions.
    pub fn into_positions(self) -> Vec<usize> {
        self.positions
    }
}

/// Case-fold a string into a character vector whose indices line up with the original text.
///
/// Each character is replaced by the first character of its lowercase mapping, so the result has
/// exactly as many characters as the input. Multi-character lowercase expansions (e.g. `'İ'`) are
/// truncated to keep offsets stable.
pub fn fold_case(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Find the next match of `query` in `text` starting at character offset `start`.
///
/// Returns `None` if the query is empty or if any query character has no remaining occurrence.
pub fn find_next_match(text: &[char], query: &[char], start: usize) -> Option<SubsequenceMatch> {
    if query.is_empty() {
        return None;
    }

    let mut positions = Vec::with_capacity(query.len());
    let mut cursor = start;
    for &wanted in query {
        let offset = text.get(cursor..)?.iter().position(|&ch| ch == wanted)?;
        cursor += offset;
        positions.push(cursor);
        cursor += 1;
    }

    Some(SubsequenceMatch::new(positions))
}

/// Find up to `max_count` non-overlapping matches of `query` in `text`, left to right.
///
/// After each match, scanning resumes one past its last matched character. An empty query yields
/// no matches without scanning.
pub fn find_matches(text: &[char], query: &[char], max_count: usize) -> Vec<SubsequenceMatch> {
    let mut matches = Vec::new();
    if query.is_empty() {
        return matches;
    }

    let mut cursor = 0;
    while cursor < text.len() && matches.len() < max_count {
        let Some(m) = find_next_match(text, query, cursor) else {
            break;
        };
        cursor = m.last() + 1;
        matches.push(m);
    }

    matches
}

/// Case-insensitive convenience wrapper over [`find_matches`] for `&str` inputs.
pub fn find_matches_in_str(text: &str, query: &str, max_count: usize) -> Vec<SubsequenceMatch> {
    find_matches(&fold_case(text), &fold_case(query), max_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn fold_char_keeps_one_to_one_mapping() {
        assert_eq!(fold_case("AbÇ"), vec!['a', 'b', 'ç']);
        assert_eq!(fold_case("İx").len(), 2);
    }

    #[test]
    fn next_match_respects_start() {
        let text = chars("abcabc");
        let m = find_next_match(&text, &chars("ac"), 1).unwrap();
        assert_eq!(m.positions(), &[3, 5]);
        assert_eq!(m.span(), 3);
    }

    #[test]
    fn next_match_past_end_is_none() {
        let text = chars("abc");
        assert!(find_next_match(&text, &chars("a"), 10).is_none());
    }
}
