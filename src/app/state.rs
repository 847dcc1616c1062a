//! Application state and the search/pagination controller.
//!
//! [`AppState`] owns every piece of client-side state: the query cache, the
//! search query and its debouncer, the modal form, in-flight mutations, and
//! the selection. Controller operations are methods that mutate that state
//! and return the [`Action`]s the host must carry out.
//!
//! Remote data is never edited in place. Every change to the list on screen
//! comes from a fetch resolving in the cache.
//!
//! # State Components
//!
//! - **Cache**: Pages of notes per `(page, term)` key, see [`crate::query`]
//! - **Search**: Raw input, debounced term and page
//! - **Debouncer**: The term waiting for its quiet period
//! - **Mutations**: Create and delete requests in flight
//! - **Modal**: The create-note form while it is open
//! - **Selection**: Cursor row within the visible page
//!
//! # Example
//!
//! ```rust
//! use notehub::{AppState, NoteClient, QueryOptions, Theme};
//!
//! let mut state = AppState::new(NoteClient::default(), QueryOptions::default(), Theme::default());
//! assert!(state.sync_active_query().is_empty());
//!
//! let actions = state.grant_web_access();
//! assert_eq!(actions.len(), 1);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.status.is_some());
//! ```

use super::debounce::Debouncer;
use super::form::NoteForm;
use super::modes::InputMode;
use super::mutation::MutationOrchestrator;
use super::notification::{Notification, NO_RESULTS_MESSAGE};
use super::search::{EmptySearchPolicy, SearchQuery};
use super::Action;
use crate::api::NoteClient;
use crate::domain::{Field, Note};
use crate::query::{QueryCache, QueryKey, QueryView, NOTES_NAMESPACE};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FooterInfo, FormFieldInfo, FormInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, StatusInfo, UIViewModel,
};
use chrono::Utc;
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Query tuning taken from the plugin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Notes requested per page. Clamped to at least 1.
    pub per_page: u32,
    /// Quiet period before a typed term is applied.
    pub debounce: Duration,
    /// What an input that trims to nothing does to the filter.
    pub empty_search: EmptySearchPolicy,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            per_page: 15,
            debounce: Duration::from_millis(500),
            empty_search: EmptySearchPolicy::Keep,
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input, timers and web
/// results. View models are computed on demand from a snapshot.
#[derive(Debug)]
pub struct AppState {
    /// Builds requests and decodes responses; holds the bearer token.
    pub client: NoteClient,

    /// Pages of notes, pending fetches and the placeholder key.
    ///
    /// Only mutated through `get`, `resolve`, `invalidate` and `mark_stale`.
    pub cache: QueryCache,

    /// Raw search input, debounced term and page.
    ///
    /// The cache key on screen is always derived from this.
    pub search: SearchQuery,

    /// Term waiting for its quiet period.
    ///
    /// Fed by `search_input`, drained by `debounce_elapsed`.
    pub debouncer: Debouncer<String>,

    /// Create and delete requests awaiting their responses.
    pub mutations: MutationOrchestrator,

    /// Create-note form, present while the modal is open.
    ///
    /// Created by `open_modal`, dropped by `close_modal` or a successful
    /// create.
    pub modal: Option<NoteForm>,

    /// Current input handling mode.
    ///
    /// Decides how the shim maps keys and which footer hints are shown.
    pub input_mode: InputMode,

    /// Zero-based row within the visible page.
    ///
    /// Reset on page and term changes, clamped whenever a page arrives.
    pub selected_index: usize,

    /// Notes requested per page.
    pub per_page: u32,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Most recent notification, shown on the toast line.
    pub toast: Option<Notification>,

    /// The host granted web access; no request is sent before that.
    pub web_access: bool,

    /// Key whose empty result was already announced.
    last_empty_notice: Option<QueryKey>,
}

impl AppState {
    /// Creates the state with an empty cache on page 1 with no filter.
    ///
    /// # Parameters
    ///
    /// * `client` - API client built from the plugin configuration
    /// * `options` - Page size, debounce window and empty-search policy
    /// * `theme` - Color scheme for UI rendering
    ///
    /// # Returns
    ///
    /// A state that fetches nothing until [`grant_web_access`](Self::grant_web_access).
    #[must_use]
    pub fn new(client: NoteClient, options: QueryOptions, theme: Theme) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
            search: SearchQuery::new(options.empty_search),
            debouncer: Debouncer::new(options.debounce),
            mutations: MutationOrchestrator::new(),
            modal: None,
            input_mode: InputMode::Normal,
            selected_index: 0,
            per_page: options.per_page.max(1),
            theme,
            toast: None,
            web_access: false,
            last_empty_notice: None,
        }
    }

    /// Key of the query currently on screen.
    #[must_use]
    pub fn active_key(&self) -> QueryKey {
        self.search.key()
    }

    /// What the renderer sees for the active key, placeholder included.
    #[must_use]
    pub fn active_view(&self) -> QueryView<'_> {
        self.cache.view(&self.active_key())
    }

    /// Visible notes, including placeholder rows from the previous key.
    #[must_use]
    pub fn visible_notes(&self) -> &[Note] {
        self.cache
            .view(&self.active_key())
            .data
            .map_or(&[], |page| page.notes.as_slice())
    }

    /// Note under the cursor, if the visible page has any.
    #[must_use]
    pub fn selected_note(&self) -> Option<&Note> {
        self.visible_notes().get(self.selected_index)
    }

    /// Records a notification for the toast line and forwards it to the sink.
    pub fn notify(&mut self, notification: Notification) -> Action {
        tracing::debug!(kind = ?notification.kind, message = %notification.message, "notify");
        self.toast = Some(notification.clone());
        Action::Notify(notification)
    }

    /// Enables requests and loads the active query.
    pub fn grant_web_access(&mut self) -> Vec<Action> {
        self.web_access = true;
        self.sync_active_query()
    }

    /// Looks up the active key, starting a fetch if the cache asks for one.
    ///
    /// Also emits the "no results" notice when the lookup lands on a settled
    /// empty page.
    pub fn sync_active_query(&mut self) -> Vec<Action> {
        if !self.web_access {
            tracing::debug!("web access not granted yet, deferring fetch");
            return vec![];
        }

        let key = self.active_key();
        let _span = tracing::debug_span!("sync_query", key = %key).entered();

        let client = &self.client;
        let per_page = self.per_page;
        let fetch = self
            .cache
            .get(&key, |k| client.list_notes(k.page, per_page, &k.term))
            .map(|lookup| lookup.fetch);

        let mut actions = Vec::new();
        match fetch {
            Ok(Some(request)) => actions.push(Action::SendRequest(request)),
            Ok(None) => {}
            Err(e) => actions.push(self.notify(Notification::error(e.user_message()))),
        }

        self.clamp_selection();
        actions.extend(self.check_empty_notice());
        actions
    }

    /// Emits the "no results" notice once per transition into a settled empty
    /// page of the active key.
    pub fn check_empty_notice(&mut self) -> Option<Action> {
        let key = self.active_key();
        let view = self.cache.view(&key);
        if !view.is_settled() {
            return None;
        }
        let empty = view.data.is_some_and(|page| page.is_empty());

        if !empty {
            self.last_empty_notice = None;
            return None;
        }
        if self.last_empty_notice.as_ref() == Some(&key) {
            return None;
        }

        tracing::debug!(key = %key, "no notes for active query");
        self.last_empty_notice = Some(key);
        Some(self.notify(Notification::error(NO_RESULTS_MESSAGE)))
    }

    /// Records new search box contents and (re)starts the debounce window.
    ///
    /// Under [`EmptySearchPolicy::Keep`] an input that trims to nothing
    /// cancels any term still waiting, so the filter on screen stays.
    ///
    /// # Returns
    ///
    /// A [`Action::ScheduleTimer`] when a term was scheduled, nothing
    /// otherwise.
    pub fn search_input(&mut self, text: impl Into<String>) -> Vec<Action> {
        match self.search.set_input(text) {
            Some(term) => {
                tracing::trace!(term = %term, "debouncing search term");
                let delay = self.debouncer.schedule(term);
                vec![Action::ScheduleTimer { delay }]
            }
            None => {
                if self.debouncer.is_pending() {
                    tracing::trace!("search box emptied, dropping pending term");
                    self.debouncer.cancel();
                }
                vec![]
            }
        }
    }

    /// Applies the debounced term if the elapsed timer was the last one started.
    pub fn debounce_elapsed(&mut self) -> Vec<Action> {
        let Some(term) = self.debouncer.tick() else {
            return vec![];
        };

        tracing::debug!(term = %term, "search term settled");
        if self.search.apply_term(term) {
            self.selected_index = 0;
        }
        self.sync_active_query()
    }

    /// Moves to page `n` if it exists in the visible result.
    ///
    /// # Parameters
    ///
    /// * `n` - One-based page number
    ///
    /// # Returns
    ///
    /// The fetch for the new page, if it is not cached. Nothing when `n` is
    /// out of range or already shown.
    pub fn change_page(&mut self, n: u32) -> Vec<Action> {
        let total_pages = self.active_view().total_pages();
        if !self.search.set_page(n, total_pages) {
            tracing::trace!(requested = n, total_pages, "page change ignored");
            return vec![];
        }

        self.selected_index = 0;
        self.sync_active_query()
    }

    /// Moves one page forward; ignored on the last page.
    pub fn next_page(&mut self) -> Vec<Action> {
        self.change_page(self.search.page().saturating_add(1))
    }

    /// Moves one page back; ignored on page 1.
    pub fn prev_page(&mut self) -> Vec<Action> {
        self.change_page(self.search.page().saturating_sub(1))
    }

    /// Marks the active key stale and re-fetches it.
    pub fn refresh(&mut self) -> Vec<Action> {
        let key = self.active_key();
        self.cache.mark_stale(&key);
        self.sync_active_query()
    }

    /// Invalidates the `notes` namespace and re-fetches the active key.
    ///
    /// The page on screen stays visible, marked stale, until the re-fetch
    /// resolves.
    pub fn invalidate_notes(&mut self) -> Vec<Action> {
        self.cache.invalidate(NOTES_NAMESPACE);
        self.sync_active_query()
    }

    /// Opens the create-note form and gives it the keyboard.
    ///
    /// An already open form keeps its draft.
    pub fn open_modal(&mut self) {
        if self.modal.is_none() {
            self.modal = Some(NoteForm::new());
        }
        self.input_mode = InputMode::Form;
    }

    /// Discards the form and returns to the list.
    ///
    /// A create already sent still completes; its result only refreshes the
    /// list.
    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Validates the draft and sends a create request.
    ///
    /// Ignored while any create is in flight, including one sent from a form
    /// that was closed since.
    ///
    /// # Returns
    ///
    /// The create request, or nothing if the draft failed validation. Field
    /// errors are stored on the form.
    pub fn submit_form(&mut self) -> Vec<Action> {
        if self.mutations.is_creating() {
            tracing::debug!("create already in flight, ignoring submit");
            return vec![];
        }

        let new_note = {
            let Some(form) = self.modal.as_mut() else {
                return vec![];
            };

            match form.draft.validate() {
                Ok(note) => note,
                Err(e) => {
                    tracing::debug!(error = %e, "draft rejected");
                    form.errors = form.draft.check();
                    return vec![];
                }
            }
        };

        match self.mutations.submit_create(&self.client, &new_note) {
            Ok(request) => {
                if let Some(form) = self.modal.as_mut() {
                    form.errors.clear();
                    form.server_error = None;
                    form.submitting = true;
                }
                vec![Action::SendRequest(request)]
            }
            Err(e) => vec![self.notify(Notification::error(e.user_message()))],
        }
    }

    /// Sends a delete request for the selected note.
    ///
    /// The row stays in the list, dimmed, until the server answers. A second
    /// delete of the same note while the first is in flight is ignored.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.selected_note().map(|note| note.id.clone()) else {
            tracing::debug!("no note selected to delete");
            return vec![];
        };

        match self.mutations.submit_delete(&self.client, &id) {
            Ok(Some(request)) => vec![Action::SendRequest(request)],
            Ok(None) => vec![],
            Err(e) => vec![self.notify(Notification::error(e.user_message()))],
        }
    }

    /// Moves the cursor down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_notes().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
        }
    }

    /// Moves the cursor up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_notes().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the selection inside the visible page.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_notes().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    /// Builds the renderable view of the current state.
    ///
    /// Rows are windowed around the selection to fit the pane; titles are
    /// highlighted with the debounced term.
    ///
    /// # Parameters
    ///
    /// * `rows` - Pane height in rows
    /// * `cols` - Pane width in columns
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let view = self.active_view();
        let notes = view.data.map_or(&[][..], |page| page.notes.as_slice());

        let selected = self.selected_index.min(notes.len().saturating_sub(1));
        let available_rows = self.calculate_available_rows(rows).max(1);
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(notes.len());
        if visible_end.saturating_sub(visible_start) < available_rows && notes.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let term = self.search.debounced_term();
        let matcher = (!term.is_empty()).then(SkimMatcherV2::default);
        let now = Utc::now();

        let display_items = notes
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, note)| {
                let item = self.compute_display_item(note, cols, now, matcher.as_ref());
                DisplayItem {
                    is_selected: visible_start + offset == selected,
                    ..item
                }
            })
            .collect();

        let empty_state = (view.is_settled() && notes.is_empty()).then(|| EmptyState {
            message: "No notes found".to_string(),
            subtitle: if term.is_empty() {
                "Press n to create your first note".to_string()
            } else {
                format!("Nothing matches \"{term}\"")
            },
        });

        let pagination = (view.data.is_some() && view.total_pages() > 1).then(|| PaginationInfo {
            current: self.search.page(),
            total: view.total_pages(),
        });

        UIViewModel {
            header: self.compute_header(&view),
            search_bar: self.compute_search_bar(),
            display_items,
            selected_index: selected.saturating_sub(visible_start),
            pagination,
            status: Self::compute_status(&view),
            empty_state,
            toast: self.toast.clone(),
            form: self.modal.as_ref().map(Self::compute_form),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_item(
        &self,
        note: &Note,
        cols: usize,
        now: chrono::DateTime<Utc>,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        const TITLE_COLUMN_WIDTH: usize = 32;
        const FIXED_COLUMNS: usize = TITLE_COLUMN_WIDTH + 11 + 10 + 3;

        let title = truncate(&note.title, TITLE_COLUMN_WIDTH - 2);
        let excerpt_width = cols.saturating_sub(FIXED_COLUMNS);
        let excerpt = truncate(&note.content.replace('\n', " "), excerpt_width);

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            highlight_ranges(m, &title, self.search.debounced_term())
        });

        DisplayItem {
            title,
            tag: note.tag.as_str().to_string(),
            excerpt,
            created: note.time_ago(now),
            is_selected: false,
            is_deleting: self.mutations.is_deleting(&note.id),
            highlight_ranges,
        }
    }

    fn compute_header(&self, view: &QueryView<'_>) -> HeaderInfo {
        let count = view.data.map_or(0, |page| page.notes.len());
        let term = self.search.debounced_term();
        let title = if term.is_empty() {
            format!(" NoteHub ({count}) ")
        } else {
            format!(" NoteHub: \"{term}\" ({count}) ")
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.search.raw_input.clone(),
            is_focused: self.input_mode == InputMode::Search,
            is_debouncing: self.debouncer.is_pending(),
        }
    }

    fn compute_status(view: &QueryView<'_>) -> Option<StatusInfo> {
        if view.is_loading {
            let message = if view.data.is_some() {
                "Refreshing..."
            } else {
                "Loading notes..."
            };
            return Some(StatusInfo {
                message: message.to_string(),
                is_error: false,
            });
        }

        view.error.map(|error| StatusInfo {
            message: format!("Could not load notes: {error}"),
            is_error: true,
        })
    }

    fn compute_form(form: &NoteForm) -> FormInfo {
        let field = |field: Field, value: String| FormFieldInfo {
            label: match field {
                Field::Title => "Title",
                Field::Content => "Content",
                Field::Tag => "Tag",
            },
            value,
            is_focused: form.focus == field,
            error: form.error_for(field).map(str::to_string),
        };

        FormInfo {
            fields: vec![
                field(Field::Title, form.draft.title.clone()),
                field(Field::Content, form.draft.content.clone()),
                field(Field::Tag, format!("< {} >", form.draft.tag)),
            ],
            submitting: form.submitting,
            server_error: form.server_error.clone(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: select  h/l: page  /: search  n: new  d: delete  r: refresh  q: quit"
            }
            InputMode::Search => "Type to search  Backspace: delete  Esc/Enter: back to list",
            InputMode::Form => {
                "Tab/Shift+Tab: field  Left/Right: tag  Enter: create  Esc: cancel"
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for the note table after header, search bar, status,
    /// pagination, toast and footer.
    const fn calculate_available_rows(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(crate::ui::components::CHROME_ROWS)
    }
}

/// Cuts `text` to at most `max_chars` characters, ending in `...` when cut.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Character ranges of `text` matched by `pattern`, merged into runs.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, pattern: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
