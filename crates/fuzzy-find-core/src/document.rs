//! In-memory document model.
//!
//! A [`Document`] is a list of blocks (paragraphs), each holding an ordered run of inline nodes:
//! text, single-character highlight marks, line breaks and opaque inline content. It implements
//! both [`SegmentRepository`] and [`SearchSurface`], so the search controller can run against it
//! headlessly.
//!
//! Node ids are never reused. Rewriting a text node retires its id, which is how stale segment
//! references are detected.
//!
//! # Example
//!
//! ```rust
//! use fuzzy_find_core::{Document, SegmentRepository};
//!
//! let doc = Document::from_text("first line\nsecond line\n\nnext paragraph");
//! assert_eq!(doc.block_count(), 2);
//! assert_eq!(doc.text_segments().len(), 3);
//! assert_eq!(doc.text(), "first line\nsecond line\n\nnext paragraph");
//! ```

use crate::config::SearchBoxConfig;
use crate::repository::{
    Emphasis, Fragment, RegionId, RepositoryError, ScrollIntoView, SearchSurface, SegmentId,
    SegmentRepository,
};
use std::collections::HashMap;

/// Inline content used to build a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Searchable text.
    Text(String),
    /// A hard line break inside a block.
    LineBreak,
    /// Non-text inline content (an image, a widget). Rendered as `[label]`, never searched.
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Text(String),
    Mark { ch: char, emphasis: Emphasis },
    LineBreak,
    Opaque(String),
}

#[derive(Debug, Clone)]
struct Node {
    id: u64,
    kind: NodeKind,
}

#[derive(Debug, Clone, Default)]
struct Block {
    nodes: Vec<Node>,
}

/// The search input box as the document sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBox {
    /// Placement it was created with.
    pub placement: SearchBoxConfig,
    /// Whether it currently holds input focus.
    pub focused: bool,
}

/// A run of characters on a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Text of the run.
    pub text: String,
    /// Highlight treatment; `None` for plain text.
    pub emphasis: Option<Emphasis>,
}

/// One visual line of a [`Document`], as produced by [`Document::render_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedLine {
    /// Runs in reading order. Adjacent plain runs are merged.
    pub runs: Vec<Run>,
}

impl RenderedLine {
    fn push(&mut self, text: &str, emphasis: Option<Emphasis>) {
        if emphasis.is_none()
            && let Some(last) = self.runs.last_mut()
            && last.emphasis.is_none()
        {
            last.text.push_str(text);
            return;
        }
        self.runs.push(Run {
            text: text.to_string(),
            emphasis,
        });
    }

    /// Plain text of the line.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// In-memory document implementing the search host capabilities.
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
    /// Node id -> (block index, node index). Refreshed whenever a block changes shape.
    owners: HashMap<u64, (usize, usize)>,
    next_id: u64,
    search_box: Option<SearchBox>,
    last_scroll: Option<(RegionId, ScrollIntoView)>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from plain text.
    ///
    /// Blank lines separate blocks. Inside a block each line becomes one text node, separated by
    /// line breaks.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        let mut inlines = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                if !inlines.is_empty() {
                    doc.push_block(std::mem::take(&mut inlines));
                }
                continue;
            }
            if !inlines.is_empty() {
                inlines.push(Inline::LineBreak);
            }
            inlines.push(Inline::Text(line.to_string()));
        }
        if !inlines.is_empty() {
            doc.push_block(inlines);
        }
        doc
    }

    /// Append a block built from `inlines`. Empty text inlines are skipped.
    pub fn push_block(&mut self, inlines: Vec<Inline>) {
        let block_index = self.blocks.len();
        let mut block = Block::default();
        for inline in inlines {
            let kind = match inline {
                Inline::Text(text) if text.is_empty() => continue,
                Inline::Text(text) => NodeKind::Text(text),
                Inline::LineBreak => NodeKind::LineBreak,
                Inline::Opaque(label) => NodeKind::Opaque(label),
            };
            let id = self.alloc_id();
            block.nodes.push(Node { id, kind });
        }
        self.blocks.push(block);
        self.reindex(block_index);
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn reindex(&mut self, block_index: usize) {
        for (node_index, node) in self.blocks[block_index].nodes.iter().enumerate() {
            self.owners.insert(node.id, (block_index, node_index));
        }
    }

    fn find(&self, id: u64) -> Option<(usize, usize)> {
        self.owners.get(&id).copied()
    }

    fn node(&self, id: u64) -> Option<&Node> {
        let (b, n) = self.find(id)?;
        Some(&self.blocks[b].nodes[n])
    }

    fn node_mut(&mut self, id: u64) -> Option<&mut Node> {
        let (b, n) = self.find(id)?;
        Some(&mut self.blocks[b].nodes[n])
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Text of one block; line breaks become `'\n'`, opaque content is omitted.
    pub fn block_text(&self, index: usize) -> Option<String> {
        let block = self.blocks.get(index)?;
        let mut out = String::new();
        for node in &block.nodes {
            match &node.kind {
                NodeKind::Text(text) => out.push_str(text),
                NodeKind::Mark { ch, .. } => out.push(*ch),
                NodeKind::LineBreak => out.push('\n'),
                NodeKind::Opaque(_) => {}
            }
        }
        Some(out)
    }

    /// Full text, blocks separated by a blank line. Highlighting never changes this value.
    pub fn text(&self) -> String {
        (0..self.blocks.len())
            .filter_map(|i| self.block_text(i))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Number of highlight regions currently in the document.
    pub fn mark_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.nodes)
            .filter(|n| matches!(n.kind, NodeKind::Mark { .. }))
            .count()
    }

    /// Total number of nodes of any kind.
    pub fn node_count(&self) -> usize {
        self.blocks.iter().map(|b| b.nodes.len()).sum()
    }

    /// Emphasis of a region, or `None` if the id is not a live region.
    pub fn emphasis_of(&self, region: RegionId) -> Option<Emphasis> {
        match self.node(region.0)?.kind {
            NodeKind::Mark { emphasis, .. } => Some(emphasis),
            _ => None,
        }
    }

    /// Character carried by a region.
    pub fn region_char(&self, region: RegionId) -> Option<char> {
        match self.node(region.0)?.kind {
            NodeKind::Mark { ch, .. } => Some(ch),
            _ => None,
        }
    }

    /// The region most recently scrolled into view.
    pub fn scrolled_to(&self) -> Option<RegionId> {
        self.last_scroll.map(|(region, _)| region)
    }

    /// The most recent scroll request.
    pub fn last_scroll(&self) -> Option<(RegionId, ScrollIntoView)> {
        self.last_scroll
    }

    /// The search box, if one exists.
    pub fn search_box(&self) -> Option<&SearchBox> {
        self.search_box.as_ref()
    }

    /// Visual lines: one per line inside each block, with an empty line between blocks.
    pub fn render_lines(&self) -> Vec<RenderedLine> {
        let mut lines = Vec::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                lines.push(RenderedLine::default());
            }
            let mut line = RenderedLine::default();
            for node in &block.nodes {
                match &node.kind {
                    NodeKind::Text(text) => line.push(text, None),
                    NodeKind::Mark { ch, emphasis } => {
                        line.push(ch.encode_utf8(&mut [0; 4]), Some(*emphasis))
                    }
                    NodeKind::LineBreak => lines.push(std::mem::take(&mut line)),
                    NodeKind::Opaque(label) => line.push(&format!("[{label}]"), None),
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Index into [`render_lines`](Self::render_lines) of the line holding `region`.
    pub fn line_of_region(&self, region: RegionId) -> Option<usize> {
        let (block_index, node_index) = self.find(region.0)?;
        let preceding: usize = self.blocks[..block_index]
            .iter()
            .map(|b| {
                1 + b
                    .nodes
                    .iter()
                    .filter(|n| n.kind == NodeKind::LineBreak)
                    .count()
            })
            .sum();
        let breaks = self.blocks[block_index].nodes[..node_index]
            .iter()
            .filter(|n| n.kind == NodeKind::LineBreak)
            .count();
        // Each earlier block also contributes one separator line.
        Some(preceding + block_index + breaks)
    }

    /// Merge adjacent text nodes and drop empty ones in every block.
    fn normalize(&mut self) {
        for block in &mut self.blocks {
            let mut merged: Vec<Node> = Vec::with_capacity(block.nodes.len());
            for node in block.nodes.drain(..) {
                match node.kind {
                    NodeKind::Text(text) if text.is_empty() => {
                        self.owners.remove(&node.id);
                    }
                    NodeKind::Text(text) => {
                        if let Some(Node {
                            kind: NodeKind::Text(prev),
                            ..
                        }) = merged.last_mut()
                        {
                            prev.push_str(&text);
                            self.owners.remove(&node.id);
                        } else {
                            merged.push(Node {
                                id: node.id,
                                kind: NodeKind::Text(text),
                            });
                        }
                    }
                    kind => merged.push(Node { id: node.id, kind }),
                }
            }
            block.nodes = merged;
        }
        for block_index in 0..self.blocks.len() {
            self.reindex(block_index);
        }
    }
}

impl SegmentRepository for Document {
    fn text_segments(&self) -> Vec<SegmentId> {
        self.blocks
            .iter()
            .flat_map(|b| &b.nodes)
            .filter(|n| matches!(n.kind, NodeKind::Text(_)))
            .map(|n| SegmentId(n.id))
            .collect()
    }

    fn segment_text(&self, segment: SegmentId) -> Result<&str, RepositoryError> {
        match &self
            .node(segment.0)
            .ok_or(RepositoryError::UnknownSegment(segment))?
            .kind
        {
            NodeKind::Text(text) => Ok(text.as_str()),
            _ => Err(RepositoryError::NotText(segment)),
        }
    }

    fn replace_segment(
        &mut self,
        segment: SegmentId,
        fragments: Vec<Fragment>,
    ) -> Result<Vec<RegionId>, RepositoryError> {
        let (block_index, node_index) = self
            .find(segment.0)
            .ok_or(RepositoryError::UnknownSegment(segment))?;
        if !matches!(
            self.blocks[block_index].nodes[node_index].kind,
            NodeKind::Text(_)
        ) {
            return Err(RepositoryError::NotText(segment));
        }

        let mut regions = Vec::new();
        let mut replacement = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let id = self.alloc_id();
            let kind = match fragment {
                Fragment::Text(text) => NodeKind::Text(text),
                Fragment::Mark(ch) => {
                    regions.push(RegionId(id));
                    NodeKind::Mark {
                        ch,
                        emphasis: Emphasis::Inactive,
                    }
                }
            };
            replacement.push(Node { id, kind });
        }

        self.blocks[block_index]
            .nodes
            .splice(node_index..=node_index, replacement);
        self.owners.remove(&segment.0);
        self.reindex(block_index);
        Ok(regions)
    }

    fn revert_marks(&mut self) -> usize {
        let mut reverted = 0;
        for block_index in 0..self.blocks.len() {
            for node_index in 0..self.blocks[block_index].nodes.len() {
                let NodeKind::Mark { ch, .. } = self.blocks[block_index].nodes[node_index].kind
                else {
                    continue;
                };
                let old_id = self.blocks[block_index].nodes[node_index].id;
                let id = self.alloc_id();
                self.owners.remove(&old_id);
                self.blocks[block_index].nodes[node_index] = Node {
                    id,
                    kind: NodeKind::Text(ch.to_string()),
                };
                reverted += 1;
            }
        }
        self.normalize();
        if reverted > 0 {
            self.last_scroll = None;
        }
        reverted
    }
}

impl SearchSurface for Document {
    fn create_search_box(&mut self, placement: &SearchBoxConfig) {
        self.search_box = Some(SearchBox {
            placement: *placement,
            focused: false,
        });
    }

    fn has_search_box(&self) -> bool {
        self.search_box.is_some()
    }

    fn focus_search_box(&mut self) {
        if let Some(search_box) = self.search_box.as_mut() {
            search_box.focused = true;
        }
    }

    fn remove_search_box(&mut self) {
        self.search_box = None;
    }

    fn set_emphasis(&mut self, region: RegionId, emphasis: Emphasis) {
        if let Some(Node {
            kind: NodeKind::Mark { emphasis: e, .. },
            ..
        }) = self.node_mut(region.0)
        {
            *e = emphasis;
        }
    }

    fn scroll_into_view(&mut self, region: RegionId, scroll: ScrollIntoView) {
        if self.emphasis_of(region).is_some() {
            self.last_scroll = Some((region, scroll));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_splits_blocks_and_lines() {
        let doc = Document::from_text("a\nb\n\n\nc");
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.block_text(0).as_deref(), Some("a\nb"));
        assert_eq!(doc.block_text(1).as_deref(), Some("c"));
        assert_eq!(doc.render_lines().len(), 4);
    }

    #[test]
    fn normalize_merges_adjacent_text() {
        let mut doc = Document::new();
        doc.push_block(vec![
            Inline::Text("ab".into()),
            Inline::Text("cd".into()),
            Inline::LineBreak,
            Inline::Text("ef".into()),
        ]);
        doc.normalize();
        assert_eq!(doc.text_segments().len(), 2);
        assert_eq!(doc.node_count(), 3);
    }
}
