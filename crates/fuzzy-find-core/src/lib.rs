#![warn(missing_docs)]
//! Fuzzy Find Core - Headless Find-in-Page Engine
//!
//! # Overview
//!
//! `fuzzy-find-core` locates, highlights and navigates fuzzy (subsequence) matches of a short
//! query across all text segments of a document. It does not render anything: the host injects
//! a [`SegmentRepository`] (text enumeration + structural rewrites) and a [`SearchSurface`]
//! (search box, emphasis, scrolling), and drives the [`SearchController`] from its event loop.
//!
//! # Core Features
//!
//! - **Greedy Subsequence Matching**: first-occurrence placement, non-overlapping, case-insensitive
//! - **Per-Character Regions**: each matched character becomes its own stylable region
//! - **Cyclic Navigation**: next/previous over a document-ordered match list
//! - **Debounced Rescans**: only the last keystroke's scan ever runs
//! - **Bounded Work**: at most [`DEFAULT_MAX_MATCHES`] matches per scan (configurable)
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Search Controller (state machine)          │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Match Index (ordered records + cursor)     │  ← Navigation
//! ├─────────────────────────────────────────────┤
//! │  Segment Highlighter (positions → regions)  │  ← Structure Rewrites
//! ├─────────────────────────────────────────────┤
//! │  Subsequence Matcher                        │  ← Matching
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fuzzy_find_core::{Document, FinderConfig, SearchController, SearchKey};
//! use std::time::{Duration, Instant};
//!
//! let mut doc = Document::from_text("alpha beta\n\ngamma alpha");
//! let mut finder = SearchController::new(FinderConfig::default());
//!
//! finder.open(&mut doc);
//! let now = Instant::now();
//! finder.on_input("ala", now);
//! finder.poll(&mut doc, now + Duration::from_millis(200));
//! assert_eq!(finder.match_count(), 2);
//!
//! finder.handle_key(&mut doc, SearchKey::Enter { shift: false });
//! assert_eq!(finder.current_index(), Some(1));
//! ```
//!
//! # Module Description
//!
//! - [`matcher`] - Greedy subsequence matching over case-folded characters
//! - [`highlight`] - Segment → fragment rewriting
//! - [`match_index`] - Ordered match records with a cyclic cursor
//! - [`debounce`] - Last-write-wins scheduled task
//! - [`controller`] - Search state machine
//! - [`repository`] - Host capability traits
//! - [`document`] - In-memory host implementation
//! - [`config`] - Finder configuration (TOML)
//!
//! # Offsets
//!
//! All positions are character offsets (Unicode scalar values), never byte offsets.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod document;
pub mod highlight;
pub mod match_index;
pub mod matcher;
pub mod repository;

pub use config::{
    ConfigError, DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_MATCHES, FinderConfig, HighlightConfig,
    SearchBoxConfig,
};
pub use controller::{
    ScanSummary, SearchController, SearchEvent, SearchEventCallback, SearchKey, SearchPhase,
};
pub use debounce::Debouncer;
pub use document::{Document, Inline, RenderedLine, Run, SearchBox};
pub use highlight::{apply_marks, build_fragments};
pub use match_index::{MatchIndex, MatchRecord};
pub use matcher::{SubsequenceMatch, find_matches, find_matches_in_str, find_next_match, fold_case};
pub use repository::{
    Emphasis, Fragment, RegionId, RepositoryError, ScrollAlign, ScrollBehavior, ScrollIntoView,
    SearchHost, SearchSurface, SegmentId, SegmentRepository,
};
