//! Event handling and state transitions.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the plugin: key commands mapped by the shim, host timer expiries, and web
//! request results. It mutates [`AppState`] and returns whether a re-render is
//! needed along with the [`Action`]s to execute.
//!
//! # Example
//!
//! ```rust
//! use notehub::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, Event::PermissionsResult { granted: true })?;
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//! # Ok::<(), notehub::NoteHubError>(())
//! ```

use super::form::NoteForm;
use super::modes::InputMode;
use super::mutation::PendingMutation;
use super::notification::{Notification, CREATED_MESSAGE, DELETED_MESSAGE};
use crate::api::{NoteClient, Operation, Outcome, RequestContext};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::query::Resolution;

/// Everything the handler reacts to.
#[derive(Debug)]
pub enum Event {
    /// Answer to the web access permission request.
    PermissionsResult { granted: bool },

    SelectNext,
    SelectPrevious,
    NextPage,
    PreviousPage,
    GoToPage(u32),

    /// Focuses the search box.
    SearchMode,
    /// Returns from the search box to the list, keeping the filter.
    ExitSearch,
    /// Replaces the whole search box contents.
    SearchInput(String),

    /// Typed character, routed to the search box or the form by mode.
    Char(char),
    Backspace,

    OpenModal,
    CloseModal,
    NextField,
    PreviousField,
    NextTag,
    PreviousTag,
    Submit,

    DeleteSelected,
    Refresh,
    CloseFocus,

    /// A host timer started by [`Action::ScheduleTimer`] elapsed.
    DebounceElapsed,

    /// A web request finished, successfully or not.
    ResponseReceived {
        context: RequestContext,
        outcome: Outcome,
    },
}

impl Event {
    /// Short name for span fields; response bodies stay out of traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PermissionsResult { .. } => "permissions_result",
            Self::SelectNext => "select_next",
            Self::SelectPrevious => "select_previous",
            Self::NextPage => "next_page",
            Self::PreviousPage => "previous_page",
            Self::GoToPage(_) => "go_to_page",
            Self::SearchMode => "search_mode",
            Self::ExitSearch => "exit_search",
            Self::SearchInput(_) => "search_input",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::OpenModal => "open_modal",
            Self::CloseModal => "close_modal",
            Self::NextField => "next_field",
            Self::PreviousField => "previous_field",
            Self::NextTag => "next_tag",
            Self::PreviousTag => "previous_tag",
            Self::Submit => "submit",
            Self::DeleteSelected => "delete_selected",
            Self::Refresh => "refresh",
            Self::CloseFocus => "close_focus",
            Self::DebounceElapsed => "debounce_elapsed",
            Self::ResponseReceived { .. } => "response_received",
        }
    }
}

/// Processes one event.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Request and decode failures never escape: they end up as error flags in
/// the cache, form errors, or notifications. The `Result` carries failures of
/// the handler itself.
pub fn handle_event(state: &mut AppState, event: Event) -> Result<(bool, Vec<Action>)> {
    let span = tracing::debug_span!("handle_event", event = event.name());
    if let Event::ResponseReceived {
        context: RequestContext {
            trace: Some(trace), ..
        },
        ..
    } = &event
    {
        trace.link_span(&span);
    }
    let _guard = span.entered();

    match event {
        Event::PermissionsResult { granted } => {
            if granted {
                tracing::debug!("web access granted");
                Ok((true, state.grant_web_access()))
            } else {
                tracing::warn!("web access denied");
                let action = state.notify(Notification::error(
                    "Web access permission is required to load notes",
                ));
                Ok((true, vec![action]))
            }
        }
        Event::SelectNext => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectPrevious => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => Ok((true, state.next_page())),
        Event::PreviousPage => Ok((true, state.prev_page())),
        Event::GoToPage(n) => Ok((true, state.change_page(n))),
        Event::SearchMode => {
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::SearchInput(text) => Ok((true, state.search_input(text))),
        Event::Char(c) => match state.input_mode {
            InputMode::Search => {
                let mut text = state.search.raw_input.clone();
                text.push(c);
                Ok((true, state.search_input(text)))
            }
            InputMode::Form => Ok(edit_form(state, |form| form.input_char(c))),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search => {
                let mut text = state.search.raw_input.clone();
                if text.pop().is_none() {
                    return Ok((false, vec![]));
                }
                Ok((true, state.search_input(text)))
            }
            InputMode::Form => Ok(edit_form(state, NoteForm::backspace)),
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::OpenModal => {
            state.open_modal();
            Ok((true, vec![]))
        }
        Event::CloseModal => {
            state.close_modal();
            Ok((true, vec![]))
        }
        Event::NextField => Ok(edit_form(state, NoteForm::focus_next)),
        Event::PreviousField => Ok(edit_form(state, NoteForm::focus_prev)),
        Event::NextTag => Ok(edit_form(state, NoteForm::next_tag)),
        Event::PreviousTag => Ok(edit_form(state, NoteForm::prev_tag)),
        Event::Submit => Ok((true, state.submit_form())),
        Event::DeleteSelected => Ok((true, state.delete_selected())),
        Event::Refresh => Ok((true, state.refresh())),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::DebounceElapsed => Ok((true, state.debounce_elapsed())),
        Event::ResponseReceived { context, outcome } => {
            tracing::debug!(
                request_id = %context.id,
                operation = context.operation.as_str(),
                ok = outcome.is_ok(),
                "response received"
            );
            match context.operation {
                Operation::ListNotes => Ok(handle_list_response(state, &context, outcome)),
                Operation::CreateNote | Operation::DeleteNote => {
                    Ok(handle_mutation_response(state, &context, outcome))
                }
            }
        }
    }
}

fn edit_form(state: &mut AppState, edit: impl FnOnce(&mut NoteForm)) -> (bool, Vec<Action>) {
    match state.modal.as_mut() {
        Some(form) => {
            edit(form);
            (true, vec![])
        }
        None => (false, vec![]),
    }
}

fn handle_list_response(
    state: &mut AppState,
    context: &RequestContext,
    outcome: Outcome,
) -> (bool, Vec<Action>) {
    let result = outcome.and_then(|response| NoteClient::decode_page(&response));

    match state.cache.resolve(context.id, result) {
        Resolution::Discarded => (false, vec![]),
        Resolution::Accepted(key) => {
            if key != state.active_key() {
                tracing::debug!(key = %key, "stored result for inactive key");
                return (false, vec![]);
            }
            state.clamp_selection();
            (true, state.check_empty_notice().into_iter().collect())
        }
    }
}

fn handle_mutation_response(
    state: &mut AppState,
    context: &RequestContext,
    outcome: Outcome,
) -> (bool, Vec<Action>) {
    let Some(mutation) = state.mutations.settle(context.id) else {
        tracing::debug!(request_id = %context.id, "response for unknown mutation");
        return (false, vec![]);
    };

    match mutation {
        PendingMutation::Create { title } => {
            match outcome.and_then(|response| NoteClient::decode_note(&response)) {
                Ok(note) => {
                    tracing::info!(note_id = %note.id, title = %title, "note created");
                    let mut actions = state.invalidate_notes();
                    if state.modal.as_ref().is_some_and(|form| form.submitting) {
                        state.close_modal();
                    }
                    actions.push(state.notify(Notification::success(CREATED_MESSAGE)));
                    (true, actions)
                }
                Err(e) => {
                    tracing::warn!(title = %title, error = %e, "create failed");
                    if let Some(form) = state.modal.as_mut().filter(|form| form.submitting) {
                        form.submitting = false;
                        form.server_error = Some(e.user_message());
                    }
                    (true, vec![state.notify(Notification::error(e.user_message()))])
                }
            }
        }
        PendingMutation::Delete { id } => {
            match outcome.and_then(|response| NoteClient::decode_note(&response)) {
                Ok(_) => {
                    tracing::info!(note_id = %id, "note deleted");
                    let mut actions = state.invalidate_notes();
                    actions.push(state.notify(Notification::success(DELETED_MESSAGE)));
                    (true, actions)
                }
                Err(e) => {
                    tracing::warn!(note_id = %id, error = %e, "delete failed");
                    (true, vec![state.notify(Notification::error(e.user_message()))])
                }
            }
        }
    }
}
