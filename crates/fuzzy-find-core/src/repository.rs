//! Host capabilities the search engine depends on.
//!
//! The engine never touches a concrete text structure. Instead the host injects:
//!
//! - a [`SegmentRepository`], which enumerates the document's text segments and performs the
//!   structural rewrites (segment → fragments, marks → plain text), and
//! - a [`SearchSurface`], which owns presentation: the search box, region emphasis, scrolling.
//!
//! [`Document`](crate::Document) implements both for in-memory text and is what tests and the TUI
//! demo use.

use crate::config::SearchBoxConfig;
use thiserror::Error;

/// Identifier of a text segment.
///
/// Ids are stable while the segment is unmodified. Once a segment has been rewritten (or merged
/// during normalization) its id no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub u64);

/// Identifier of a single-character highlight region produced by
/// [`SegmentRepository::replace_segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub u64);

/// One piece of the sequence that replaces a highlighted segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Unmarked text.
    Text(String),
    /// A single marked character; becomes a region.
    Mark(char),
}

/// Visual treatment of a highlight region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Emphasis {
    /// Region belongs to a match that is not selected.
    #[default]
    Inactive,
    /// Region belongs to the currently selected match.
    Active,
}

/// How a scroll should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Animate the scroll, if the host supports it.
    Smooth,
}

/// Where the target should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align the target with the top of the viewport.
    Start,
    /// Center the target vertically.
    Center,
    /// Align the target with the bottom of the viewport.
    End,
}

/// Scroll request passed to [`SearchSurface::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoView {
    /// Animation behavior.
    pub behavior: ScrollBehavior,
    /// Vertical alignment.
    pub align: ScrollAlign,
}

impl ScrollIntoView {
    /// Smooth scroll that centers the target; used for the selected match.
    pub const CENTERED: Self = Self {
        behavior: ScrollBehavior::Smooth,
        align: ScrollAlign::Center,
    };
}

/// Errors reported by a [`SegmentRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The id does not resolve to a node (stale or never issued).
    #[error("unknown segment {0:?}")]
    UnknownSegment(SegmentId),

    /// The id resolves to a node that does not carry text.
    #[error("segment {0:?} is not a text node")]
    NotText(SegmentId),
}

/// Access to the document's text segments and the structural edits highlighting needs.
pub trait SegmentRepository {
    /// Current text segments in document order.
    ///
    /// Must reflect the structure as it is *now*; callers never reuse ids across passes.
    fn text_segments(&self) -> Vec<SegmentId>;

    /// Raw text of a segment.
    fn segment_text(&self, segment: SegmentId) -> Result<&str, RepositoryError>;

    /// Replace `segment` in its container with `fragments`, in order.
    ///
    /// Returns one region id per [`Fragment::Mark`], in fragment order. On error the document is
    /// left untouched.
    fn replace_segment(
        &mut self,
        segment: SegmentId,
        fragments: Vec<Fragment>,
    ) -> Result<Vec<RegionId>, RepositoryError>;

    /// Turn every region back into plain text and merge adjacent text runs.
    ///
    /// Returns the number of regions reverted. Calling this with no regions present is a no-op.
    fn revert_marks(&mut self) -> usize;
}

/// Presentation operations the search controller drives.
pub trait SearchSurface {
    /// Create the search input box. Only called when [`has_search_box`](Self::has_search_box)
    /// returns `false`.
    fn create_search_box(&mut self, placement: &SearchBoxConfig);

    /// Whether a search input box currently exists.
    fn has_search_box(&self) -> bool;

    /// Move input focus to the search box.
    fn focus_search_box(&mut self);

    /// Remove the search box, if present.
    fn remove_search_box(&mut self);

    /// Apply a visual treatment to a region. Unknown regions are ignored.
    fn set_emphasis(&mut self, region: RegionId, emphasis: Emphasis);

    /// Scroll a region into view. Unknown regions are ignored.
    fn scroll_into_view(&mut self, region: RegionId, scroll: ScrollIntoView);
}

/// Convenience bound for hosts that provide both capabilities.
pub trait SearchHost: SegmentRepository + SearchSurface {}

impl<T: SegmentRepository + SearchSurface> SearchHost for T {}
