//! Search controller: query → matches → highlights → navigation.
//!
//! # Lifecycle
//!
//! ```text
//!            open()                        SearchKey::Escape
//!   Idle ─────────────▶ Editing ───────────────────────────▶ Closed
//!                        │   ▲                                  │
//!     on_input / poll /  │   │                    open()        │
//!     Enter / Shift+Enter└───┘◀─────────────────────────────────┘
//! ```
//!
//! Every keystroke goes through [`SearchController::on_input`], which only re-arms the debouncer.
//! The host calls [`SearchController::poll`] from its event loop; when the debounce delay has
//! elapsed since the last keystroke, the full scan runs synchronously:
//!
//! 1. revert every highlight region and normalize the text structure,
//! 2. clear the match index,
//! 3. enumerate text segments and match each against the remaining capacity,
//! 4. highlight each matching segment once, over the union of its match positions,
//! 5. select the first match and apply emphasis.
//!
//! # Example
//!
//! ```rust
//! use fuzzy_find_core::{Document, FinderConfig, SearchController, SearchKey};
//! use std::time::{Duration, Instant};
//!
//! let mut doc = Document::from_text("the quick brown fox\n\njumps over the lazy dog");
//! let mut finder = SearchController::new(FinderConfig::default());
//!
//! finder.open(&mut doc);
//! let t0 = Instant::now();
//! finder.on_input("qf", t0);
//! let summary = finder.poll(&mut doc, t0 + Duration::from_millis(200)).unwrap();
//! assert_eq!(summary.match_count, 1);
//! assert_eq!(doc.mark_count(), 2);
//!
//! finder.handle_key(&mut doc, SearchKey::Escape);
//! assert_eq!(doc.mark_count(), 0);
//! ```

use crate::config::FinderConfig;
use crate::debounce::Debouncer;
use crate::highlight::apply_marks;
use crate::match_index::{MatchIndex, MatchRecord};
use crate::matcher::{find_matches, fold_case};
use crate::repository::{Emphasis, ScrollIntoView, SearchHost};
use std::time::{Duration, Instant};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search box has been opened yet.
    Idle,
    /// The search box is open; a scan may be pending.
    Editing,
    /// The search box was dismissed and all highlights reverted.
    Closed,
}

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Enter; with `shift`, moves to the previous match instead of the next.
    Enter {
        /// Whether Shift was held.
        shift: bool,
    },
    /// Escape: close the box and restore the original text.
    Escape,
}

/// Outcome of one executed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Normalized (trimmed, case-folded) query.
    pub query: String,
    /// Number of match records collected.
    pub match_count: usize,
    /// Number of segments run through the matcher.
    pub segments_scanned: usize,
    /// Whether the cap was reached; later text may hold unreported matches.
    pub truncated: bool,
}

/// Notification emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The search box was opened (not emitted on refocus).
    Opened,
    /// A scan finished.
    MatchesUpdated {
        /// Normalized query.
        query: String,
        /// Number of matches.
        count: usize,
        /// Whether the cap was reached.
        truncated: bool,
    },
    /// The selected match changed.
    CurrentChanged {
        /// Selected index.
        index: usize,
        /// Number of matches.
        count: usize,
    },
    /// The search box was closed.
    Closed,
}

/// Search event callback type.
pub type SearchEventCallback = Box<dyn FnMut(&SearchEvent) + Send>;

/// Owns the match index, the selection and the debounce timer for one find-in-page session.
pub struct SearchController {
    config: FinderConfig,
    phase: SearchPhase,
    matches: MatchIndex,
    debouncer: Debouncer<String>,
    last_query: String,
    callbacks: Vec<SearchEventCallback>,
}

impl SearchController {
    /// Create an idle controller.
    pub fn new(config: FinderConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce_delay());
        Self {
            config,
            phase: SearchPhase::Idle,
            matches: MatchIndex::new(),
            debouncer,
            last_query: String::new(),
            callbacks: Vec::new(),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Matches of the last scan.
    pub fn matches(&self) -> &MatchIndex {
        &self.matches
    }

    /// Number of matches of the last scan.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Selected match index.
    pub fn current_index(&self) -> Option<usize> {
        self.matches.current_index()
    }

    /// Normalized query of the last executed scan.
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Whether a scan is scheduled.
    pub fn is_scan_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time until the scheduled scan is due; hosts can use this as an event-loop timeout.
    pub fn time_until_scan(&self, now: Instant) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Register a callback for [`SearchEvent`]s.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SearchEvent) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn emit(&mut self, event: SearchEvent) {
        for callback in &mut self.callbacks {
            callback(&event);
        }
    }

    /// Handle the external "open search" trigger.
    ///
    /// Creates the search box if it does not exist and focuses it. Calling this while already
    /// editing only refocuses.
    pub fn open<H: SearchHost + ?Sized>(&mut self, host: &mut H) {
        let opening = self.phase != SearchPhase::Editing;
        if opening && self.phase == SearchPhase::Closed {
            self.matches.clear();
            self.last_query.clear();
        }
        if !host.has_search_box() {
            host.create_search_box(&self.config.search_box);
        }
        host.focus_search_box();
        self.phase = SearchPhase::Editing;
        if opening {
            log::debug!("search box opened");
            self.emit(SearchEvent::Opened);
        }
    }

    /// Record a change of the search box text and (re)arm the debounce timer.
    ///
    /// Ignored unless editing.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        if self.phase != SearchPhase::Editing {
            return;
        }
        if self.debouncer.schedule(now, text.to_string()) {
            log::trace!("superseded pending scan");
        }
    }

    /// Run the scheduled scan if its delay has elapsed at `now`.
    pub fn poll<H: SearchHost + ?Sized>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> Option<ScanSummary> {
        if self.phase != SearchPhase::Editing {
            return None;
        }
        let text = self.debouncer.take_due(now)?;
        Some(self.rescan_now(host, &text))
    }

    /// Cancel any pending scan and run the full scan pipeline for `text` immediately.
    ///
    /// Only runs while editing; in any other phase the host is left untouched and the returned
    /// summary is empty.
    pub fn rescan_now<H: SearchHost + ?Sized>(
        &mut self,
        host: &mut H,
        text: &str,
    ) -> ScanSummary {
        let query: String = fold_case(text.trim()).into_iter().collect();
        let mut summary = ScanSummary {
            query,
            match_count: 0,
            segments_scanned: 0,
            truncated: false,
        };
        if self.phase != SearchPhase::Editing {
            log::debug!("ignoring scan while {:?}", self.phase);
            return summary;
        }

        self.debouncer.cancel();
        self.clear_highlights(host);
        self.last_query = summary.query.clone();

        if !summary.query.is_empty() {
            self.scan(host, &mut summary);
        }

        log::debug!(
            "scan {:?}: {} matches in {} segments{}",
            summary.query,
            summary.match_count,
            summary.segments_scanned,
            if summary.truncated { " (capped)" } else { "" }
        );
        self.emit(SearchEvent::MatchesUpdated {
            query: summary.query.clone(),
            count: summary.match_count,
            truncated: summary.truncated,
        });

        if self.matches.select(0) {
            self.apply_emphasis(host);
        }

        summary
    }

    fn scan<H: SearchHost + ?Sized>(&mut self, host: &mut H, summary: &mut ScanSummary) {
        let cap = self.config.max_matches;
        let query: Vec<char> = summary.query.chars().collect();
        let segments = host.text_segments();

        for segment in segments {
            let remaining = cap.saturating_sub(self.matches.len());
            let found = match host.segment_text(segment) {
                Ok(raw) => find_matches(&fold_case(raw), &query, remaining),
                Err(err) => {
                    log::error!("skipping segment {:?}: {}", segment, err);
                    Vec::new()
                }
            };
            summary.segments_scanned += 1;

            if !found.is_empty() {
                let union: Vec<usize> = found.iter().flat_map(|m| m.positions()).copied().collect();
                let regions = apply_marks(&mut *host, segment, &union);
                for m in &found {
                    let mapped: Option<Vec<_>> =
                        m.positions().iter().map(|p| regions.get(p).copied()).collect();
                    // None when highlighting failed; such a match cannot be shown.
                    if let Some(mapped) = mapped {
                        self.matches.push(MatchRecord::new(mapped));
                    }
                }
            }

            if self.matches.len() >= cap {
                summary.truncated = true;
                break;
            }
        }

        summary.match_count = self.matches.len();
    }

    /// Handle a key delivered to the search box.
    pub fn handle_key<H: SearchHost + ?Sized>(&mut self, host: &mut H, key: SearchKey) {
        if self.phase != SearchPhase::Editing {
            return;
        }
        match key {
            SearchKey::Enter { shift: false } => self.select_next(host),
            SearchKey::Enter { shift: true } => self.select_previous(host),
            SearchKey::Escape => self.close(host),
        }
    }

    /// Select the next match (cyclic) and re-apply emphasis. No-op without matches.
    pub fn select_next<H: SearchHost + ?Sized>(&mut self, host: &mut H) {
        if self.matches.select_next().is_some() {
            self.apply_emphasis(host);
        }
    }

    /// Select the previous match (cyclic) and re-apply emphasis. No-op without matches.
    pub fn select_previous<H: SearchHost + ?Sized>(&mut self, host: &mut H) {
        if self.matches.select_previous().is_some() {
            self.apply_emphasis(host);
        }
    }

    /// Revert all highlights, remove the search box and enter [`SearchPhase::Closed`].
    pub fn close<H: SearchHost + ?Sized>(&mut self, host: &mut H) {
        if self.debouncer.cancel().is_some() {
            log::trace!("dropped pending scan on close");
        }
        self.clear_highlights(host);
        host.remove_search_box();
        self.phase = SearchPhase::Closed;
        log::debug!("search box closed");
        self.emit(SearchEvent::Closed);
    }

    fn clear_highlights<H: SearchHost + ?Sized>(&mut self, host: &mut H) {
        let reverted = host.revert_marks();
        if reverted > 0 {
            log::trace!("reverted {} highlight regions", reverted);
        }
        self.matches.clear();
    }

    fn apply_emphasis<H: SearchHost + ?Sized>(&mut self, host: &mut H) {
        let Some(current) = self.matches.current_index() else {
            return;
        };

        for (index, record) in self.matches.records().iter().enumerate() {
            let emphasis = if index == current {
                Emphasis::Active
            } else {
                Emphasis::Inactive
            };
            for &region in record.regions() {
                host.set_emphasis(region, emphasis);
            }
        }

        if let Some(region) = self.matches.current().and_then(MatchRecord::first_region) {
            host.scroll_into_view(region, ScrollIntoView::CENTERED);
        }

        let count = self.matches.len();
        self.emit(SearchEvent::CurrentChanged {
            index: current,
            count,
        });
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("phase", &self.phase)
            .field("matches", &self.matches.len())
            .field("current", &self.matches.current_index())
            .field("scan_pending", &self.debouncer.is_pending())
            .finish()
    }
}
