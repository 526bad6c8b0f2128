//! Segment highlighting.
//!
//! Highlighting rewrites one text segment into a sequence of plain-text fragments and
//! one-character marks. Marks are per character so the controller can toggle emphasis on each
//! matched character independently and scroll to an exact character.

use crate::repository::{Fragment, RegionId, SegmentId, SegmentRepository};
use std::collections::HashMap;

/// Split `text` into fragments, marking each character offset in `positions`.
///
/// Positions are deduplicated and sorted first; offsets at or past the end of `text` are
/// ignored. Empty gaps between adjacent marks produce no text fragment.
pub fn build_fragments(text: &str, positions: &[usize]) -> Vec<Fragment> {
    let chars: Vec<char> = text.chars().collect();
    let sorted = sorted_positions(positions, chars.len());

    let mut fragments = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut last = 0;
    for pos in sorted {
        if pos > last {
            fragments.push(Fragment::Text(chars[last..pos].iter().collect()));
        }
        fragments.push(Fragment::Mark(chars[pos]));
        last = pos + 1;
    }
    if last < chars.len() {
        fragments.push(Fragment::Text(chars[last..].iter().collect()));
    }

    fragments
}

fn sorted_positions(positions: &[usize], len: usize) -> Vec<usize> {
    let mut sorted: Vec<usize> = positions.iter().copied().filter(|&p| p < len).collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

/// Mark `positions` in `segment` and return the region created for each position.
///
/// The segment is replaced atomically. If it cannot be resolved as a text segment the call is a
/// logged no-op and the returned map is empty.
pub fn apply_marks<R>(
    repo: &mut R,
    segment: SegmentId,
    positions: &[usize],
) -> HashMap<usize, RegionId>
where
    R: SegmentRepository + ?Sized,
{
    let text = match repo.segment_text(segment) {
        Ok(text) => text,
        Err(err) => {
            log::error!("cannot highlight {:?}: {}", segment, err);
            return HashMap::new();
        }
    };

    let char_count = text.chars().count();
    let marked = sorted_positions(positions, char_count);
    if marked.is_empty() {
        return HashMap::new();
    }
    let fragments = build_fragments(text, &marked);

    match repo.replace_segment(segment, fragments) {
        Ok(regions) => {
            debug_assert_eq!(regions.len(), marked.len());
            marked.into_iter().zip(regions).collect()
        }
        Err(err) => {
            log::error!("cannot highlight {:?}: {}", segment, err);
            HashMap::new()
        }
    }
}
