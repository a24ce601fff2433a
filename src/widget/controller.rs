//! Debounced query controller.
//!
//! Keystrokes update the query immediately. Lookups are debounced: each
//! `set_query` bumps the generation and re-arms the timer, and when the quiet
//! period elapses one lookup runs, tagged with the generation it was armed
//! under. Its result is applied only if that generation is still current.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use crate::catalog::{CandidateList, CatalogProvider, DEFAULT_LOOKUP_LIMIT, MAX_LOOKUP_LIMIT};
use crate::config::SearchConfig;

use super::debounce::{DebounceTimer, Generation};
use super::dismissal::DismissalDetector;
use super::navigator::Navigator;
use super::scroll::ScrollSync;

/// Quiet period between the last keystroke and the lookup
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Shortest trimmed query that is looked up
pub const MIN_QUERY_CHARS: usize = 2;

/// Rows the dropdown shows before scrolling
pub const DEFAULT_DROPDOWN_ROWS: usize = 8;

/// Tuning for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_chars: usize,
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_chars: MIN_QUERY_CHARS,
            limit: DEFAULT_LOOKUP_LIMIT,
        }
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_chars: config.min_chars.max(1),
            limit: config.limit.clamp(1, MAX_LOOKUP_LIMIT),
        }
    }
}

/// Everything the widget shows, guarded by one lock so a settled lookup
/// replaces the list and resets the highlight in a single step.
#[derive(Debug)]
pub struct SearchState {
    pub query: String,
    pub suggestions: CandidateList,
    pub loading: bool,
    /// Non-blocking notice from the last failed lookup
    pub lookup_error: Option<String>,
    /// Lookups applied so far, successful or not
    pub settled: u64,
    pub nav: Navigator,
    pub scroll: ScrollSync,
    pub dismissal: DismissalDetector,
    mounted: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new().into(),
            loading: false,
            lookup_error: None,
            settled: 0,
            nav: Navigator::new(),
            scroll: ScrollSync::new(DEFAULT_DROPDOWN_ROWS),
            dismissal: DismissalDetector::new(),
            mounted: true,
        }
    }
}

impl SearchState {
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the candidate list wholesale
    pub fn replace_suggestions(&mut self, suggestions: CandidateList) {
        self.nav.on_results(suggestions.len());
        self.suggestions = suggestions;
        self.scroll.reset();
        self.sync_listeners();
    }

    pub fn clear_suggestions(&mut self) {
        self.replace_suggestions(Vec::new().into());
    }

    /// Bring the scroll position and dismissal listener in line with the
    /// navigator after any transition.
    pub fn sync_listeners(&mut self) {
        let open = self.nav.is_open();
        self.scroll.reveal(self.nav.selected_index(), open);
        self.dismissal.sync(open && self.mounted);
    }
}

/// Owns the query and drives debounced catalog lookups
pub struct QueryController<P> {
    provider: Arc<P>,
    settings: SearchSettings,
    state: Arc<Mutex<SearchState>>,
    generation: Arc<Generation>,
    timer: Mutex<DebounceTimer>,
}

impl<P: CatalogProvider + 'static> QueryController<P> {
    pub fn new(provider: Arc<P>, settings: SearchSettings) -> Self {
        Self {
            provider,
            settings,
            state: Arc::new(Mutex::new(SearchState::default())),
            generation: Arc::new(Generation::new()),
            timer: Mutex::new(DebounceTimer::new()),
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Lock the shared widget state
    pub fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock()
    }

    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    pub fn suggestions(&self) -> CandidateList {
        self.state.lock().suggestions.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    pub fn lookup_error(&self) -> Option<String> {
        self.state.lock().lookup_error.clone()
    }

    /// Store new input and schedule (or suppress) a lookup.
    ///
    /// Must be called from within a tokio runtime. Ignored after unmount.
    pub fn set_query(&self, text: impl Into<String>) {
        let mut state = self.state.lock();
        if !state.mounted {
            return;
        }

        state.query = text.into();
        let trimmed = state.query.trim().to_string();

        // Every keystroke supersedes whatever was pending or in flight
        let tag = self.generation.bump();

        if trimmed.chars().count() < self.settings.min_chars {
            self.timer.lock().cancel();
            state.loading = false;
            state.lookup_error = None;
            state.clear_suggestions();
            return;
        }

        state.loading = true;

        // Arm while still holding the state lock so concurrent callers cannot
        // arm out of generation order
        let provider = self.provider.clone();
        let shared = self.state.clone();
        let generation = self.generation.clone();
        let limit = self.settings.limit;

        self.timer.lock().arm(self.settings.debounce, async move {
            if !generation.is_current(tag) {
                return;
            }

            tracing::debug!("Dispatching lookup #{} for '{}'", tag, trimmed);
            let result = provider.lookup(&trimmed, limit).await;

            let mut state = shared.lock();
            if !generation.is_current(tag) {
                tracing::debug!("Discarding stale lookup #{} for '{}'", tag, trimmed);
                return;
            }

            state.loading = false;
            state.settled += 1;
            match result {
                Ok(candidates) => {
                    tracing::debug!(
                        "Lookup #{} settled with {} candidates",
                        tag,
                        candidates.len()
                    );
                    state.lookup_error = None;
                    state.replace_suggestions(candidates);
                }
                Err(e) => {
                    tracing::warn!("Book lookup for '{}' failed: {}", trimmed, e);
                    state.lookup_error = Some(e.to_string());
                    state.clear_suggestions();
                }
            }
        });
    }

    /// Tear down: clear the pending timer, orphan any in-flight lookup, and
    /// detach the dismissal listener. Idempotent.
    pub fn unmount(&self) {
        let mut state = self.state.lock();
        if !state.mounted {
            return;
        }
        state.mounted = false;
        self.generation.bump();
        self.timer.lock().cancel();
        state.loading = false;
        state.dismissal.detach();
        tracing::debug!("Search widget unmounted");
    }
}

impl<P> Drop for QueryController<P> {
    fn drop(&mut self) {
        // The timer cancels itself on drop; orphan anything already in flight
        self.generation.bump();
    }
}
