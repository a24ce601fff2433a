//! Incremental book search and selection widget.
//!
//! Data flow:
//! keystrokes -> [`QueryController`] (debounce) -> [`CatalogProvider`] lookup
//! -> candidate list -> [`Navigator`] (highlight) -> confirm ->
//! [`RegistrationSubmitter`] -> library backend.
//!
//! The widget is headless. A host view feeds it input, pointer events and
//! layout, and renders [`WidgetSnapshot`]s.

pub mod controller;
pub mod debounce;
pub mod dismissal;
pub mod navigator;
pub mod register;
pub mod scroll;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::{Candidate, CandidateList, CatalogProvider};
use crate::error::{Result, ShelfError};
use crate::library::{LibraryBackend, LibraryStore, OwnedItem};

pub use controller::{QueryController, SearchSettings, SearchState};
pub use debounce::{DebounceTimer, Generation};
pub use dismissal::{DismissalDetector, Point, Rect};
pub use navigator::{DropdownState, Navigator, WidgetAction, key_to_action};
pub use register::RegistrationSubmitter;
pub use scroll::ScrollSync;

/// Outcome of the most recent registration attempt
#[derive(Debug, Clone, Default)]
struct RegistrationState {
    /// Confirmed candidate whose registration has not succeeded yet
    pending: Option<Candidate>,
    error: Option<String>,
    last_registered: Option<OwnedItem>,
}

/// Triggers already handled by [`BookSearchWidget::sync_shelf`]
#[derive(Debug, Default)]
struct ShelfSync {
    settled_seen: u64,
    /// A fetch was attempted while the store was stale and has not succeeded
    stale_attempted: bool,
}

/// Point-in-time view of the widget for rendering
#[derive(Debug, Clone, Default)]
pub struct WidgetSnapshot {
    pub query: String,
    pub suggestions: CandidateList,
    /// Per-suggestion "already on the shelf" flags, same order as `suggestions`
    pub registered: Vec<bool>,
    pub is_loading: bool,
    pub is_open: bool,
    pub selected_index: Option<usize>,
    pub scroll_offset: usize,
    pub lookup_error: Option<String>,
    pub is_registering: bool,
    pub pending: Option<Candidate>,
    pub registration_error: Option<String>,
    pub last_registered: Option<OwnedItem>,
}

impl WidgetSnapshot {
    /// Whether the query is long enough and settled with nothing found
    pub fn is_empty_result(&self, min_chars: usize) -> bool {
        !self.is_loading
            && self.lookup_error.is_none()
            && self.suggestions.is_empty()
            && self.query.trim().chars().count() >= min_chars
    }
}

/// The search widget: query controller, navigator and registration in one
pub struct BookSearchWidget<P, B> {
    controller: QueryController<P>,
    submitter: RegistrationSubmitter<B>,
    store: Arc<LibraryStore<B>>,
    registration: Mutex<RegistrationState>,
    shelf_sync: Mutex<ShelfSync>,
}

impl<P, B> BookSearchWidget<P, B>
where
    P: CatalogProvider + 'static,
    B: LibraryBackend,
{
    pub fn new(catalog: Arc<P>, store: Arc<LibraryStore<B>>, settings: SearchSettings) -> Self {
        Self {
            controller: QueryController::new(catalog, settings),
            submitter: RegistrationSubmitter::new(store.clone()),
            store,
            registration: Mutex::new(RegistrationState::default()),
            shelf_sync: Mutex::new(ShelfSync::default()),
        }
    }

    pub fn settings(&self) -> SearchSettings {
        self.controller.settings()
    }

    pub fn store(&self) -> &Arc<LibraryStore<B>> {
        &self.store
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    pub fn query(&self) -> String {
        self.controller.query()
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.controller.set_query(text);
    }

    pub fn suggestions(&self) -> CandidateList {
        self.controller.suggestions()
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn lookup_error(&self) -> Option<String> {
        self.controller.lookup_error()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Highlighted suggestion; `None` means no highlight
    pub fn selected_index(&self) -> Option<usize> {
        self.controller.lock().nav.selected_index()
    }

    pub fn dropdown_state(&self) -> DropdownState {
        self.controller.lock().nav.state()
    }

    pub fn is_open(&self) -> bool {
        self.controller.lock().nav.is_open()
    }

    pub fn move_down(&self) {
        let mut state = self.controller.lock();
        state.nav.move_down();
        state.sync_listeners();
    }

    pub fn move_up(&self) {
        let mut state = self.controller.lock();
        state.nav.move_up();
        state.sync_listeners();
    }

    pub fn dismiss(&self) {
        let mut state = self.controller.lock();
        state.nav.dismiss();
        state.sync_listeners();
    }

    /// Show the current suggestions again after a dismiss
    pub fn reopen(&self) {
        let mut state = self.controller.lock();
        state.nav.reopen();
        state.sync_listeners();
    }

    /// Take the highlighted candidate and close the dropdown.
    ///
    /// Returns `None` (and changes nothing) when nothing is highlighted.
    pub fn confirm_selection(&self) -> Option<Candidate> {
        let candidate = {
            let mut state = self.controller.lock();
            let index = state.nav.confirm()?;
            let candidate = state.suggestions.get(index).cloned();
            state.sync_listeners();
            candidate?
        };

        let mut registration = self.registration.lock();
        registration.pending = Some(candidate.clone());
        registration.error = None;
        Some(candidate)
    }

    /// Apply a keyboard action. Confirm only selects; call
    /// [`Self::confirm_and_register`] to also submit.
    pub fn apply(&self, action: WidgetAction) -> Option<Candidate> {
        match action {
            WidgetAction::MoveDown => self.move_down(),
            WidgetAction::MoveUp => self.move_up(),
            WidgetAction::Dismiss => self.dismiss(),
            WidgetAction::Confirm => return self.confirm_selection(),
        }
        None
    }

    // ------------------------------------------------------------------
    // Pointer and layout
    // ------------------------------------------------------------------

    /// Tell the widget where its input, dropdown and visible rows are
    pub fn set_layout(&self, input: Rect, dropdown: Rect, visible_rows: usize) {
        let mut state = self.controller.lock();
        state.dismissal.set_regions(input, dropdown);
        let highlight = state.nav.selected_index();
        state.scroll.set_viewport(visible_rows, highlight);
    }

    /// Route a pointer-down event; returns true if it closed the dropdown
    pub fn on_pointer_down(&self, point: Point) -> bool {
        let mut state = self.controller.lock();
        if !state.dismissal.on_pointer_down(point) {
            return false;
        }
        state.nav.dismiss();
        state.sync_listeners();
        true
    }

    pub fn is_listening_for_outside_clicks(&self) -> bool {
        self.controller.lock().dismissal.is_attached()
    }

    pub fn scroll_offset(&self) -> usize {
        self.controller.lock().scroll.offset()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn is_registering(&self) -> bool {
        self.submitter.is_registering()
    }

    /// Advisory duplicate check against the shared store, re-evaluated on
    /// every call
    pub fn is_already_registered(&self, candidate_id: &str) -> bool {
        self.store.is_registered(candidate_id)
    }

    /// Re-fetch the shelf listing if it may have changed.
    ///
    /// Fetches once after each settled lookup and once after the store is
    /// invalidated by a registration. A failed fetch is not repeated until
    /// the next trigger. Returns whether a fetch happened.
    pub async fn sync_shelf(&self) -> Result<bool> {
        let settled = self.controller.lock().settled;
        let stale = self.store.is_stale();
        {
            let mut sync = self.shelf_sync.lock();
            let new_lookup = settled != sync.settled_seen;
            let new_invalidation = stale && !sync.stale_attempted;
            if !new_lookup && !new_invalidation {
                return Ok(false);
            }
            sync.settled_seen = settled;
            sync.stale_attempted = stale;
        }

        let items = self.store.refresh().await?;
        self.shelf_sync.lock().stale_attempted = false;
        tracing::debug!("Shelf listing refreshed: {} books", items.len());
        Ok(true)
    }

    /// Candidate kept for retry after a failed registration
    pub fn pending_candidate(&self) -> Option<Candidate> {
        self.registration.lock().pending.clone()
    }

    pub fn registration_error(&self) -> Option<String> {
        self.registration.lock().error.clone()
    }

    /// Register a candidate on the shelf.
    ///
    /// Refuses candidates the store already knows about. On failure the
    /// candidate stays pending so the same submission can be retried.
    pub async fn register_book(&self, candidate: Candidate) -> Result<OwnedItem> {
        if self.is_already_registered(&candidate.id) {
            let err = ShelfError::AlreadyRegistered(candidate.title);
            let mut registration = self.registration.lock();
            registration.pending = None;
            registration.error = Some(err.to_string());
            return Err(err);
        }

        {
            let mut registration = self.registration.lock();
            registration.pending = Some(candidate.clone());
            registration.error = None;
        }

        let result = self.submitter.register(&candidate).await;

        let mut registration = self.registration.lock();
        match &result {
            Ok(item) => {
                registration.pending = None;
                registration.last_registered = Some(item.clone());
            }
            Err(e) => registration.error = Some(e.to_string()),
        }
        result
    }

    /// Confirm the highlighted candidate and register it.
    ///
    /// Returns `None` without contacting the backend when nothing is
    /// highlighted.
    pub async fn confirm_and_register(&self) -> Option<Result<OwnedItem>> {
        let candidate = self.confirm_selection()?;
        Some(self.register_book(candidate).await)
    }

    /// Resubmit the pending candidate after a failure
    pub async fn retry_registration(&self) -> Option<Result<OwnedItem>> {
        let candidate = self.pending_candidate()?;
        Some(self.register_book(candidate).await)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> WidgetSnapshot {
        let (query, suggestions, is_loading, is_open, selected_index, scroll_offset, lookup_error) = {
            let state = self.controller.lock();
            (
                state.query.clone(),
                state.suggestions.clone(),
                state.loading,
                state.nav.is_open(),
                state.nav.selected_index(),
                state.scroll.offset(),
                state.lookup_error.clone(),
            )
        };

        let registered = suggestions
            .iter()
            .map(|c| self.store.is_registered(&c.id))
            .collect();

        let registration = self.registration.lock().clone();

        WidgetSnapshot {
            query,
            suggestions,
            registered,
            is_loading,
            is_open,
            selected_index,
            scroll_offset,
            lookup_error,
            is_registering: self.submitter.is_registering(),
            pending: registration.pending,
            registration_error: registration.error,
            last_registered: registration.last_registered,
        }
    }

    /// Tear the widget down; pending and in-flight lookups are discarded
    pub fn unmount(&self) {
        self.controller.unmount();
    }
}
