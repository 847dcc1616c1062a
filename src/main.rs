//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the NoteHub library and the Zellij plugin
//! system: it maps host events to library [`Event`]s and executes the
//! [`Action`]s the library returns with host APIs.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the first page is fetched once granted
//! 3. **Update**: Keys, debounce timers and web results go through `handle_event`
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//! - `Timer` → `Event::DebounceElapsed`
//! - `WebRequestResult` → `Event::ResponseReceived`
//! - `Key` → mode-dependent command, see below
//!
//! # Keybindings
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `l`/`Right`, `h`/`Left`: Next and previous page
//! - `/`: Focus search
//! - `n`: New note
//! - `d`: Delete selected note
//! - `r`: Refresh
//! - `q`/`Esc`: Close plugin
//!
//! In search mode:
//! - Characters and `Backspace` edit the search box
//! - `Enter`/`Esc`: Back to the list, filter kept
//!
//! In the create-note modal:
//! - `Tab`/`Shift+Tab`: Next and previous field
//! - `Left`/`Right`: Change tag
//! - `Enter`: Submit
//! - `Esc`: Close

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use notehub::api::{classify_host_result, HttpMethod, RequestContext};
use notehub::{handle_event, Action, ApiRequest, Config, Event, InputMode, NotificationKind};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    app: notehub::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: notehub::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, installs tracing, requests web access and
    /// subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        notehub::observability::init_tracing(&config.trace_level);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = notehub::initialize(&config);
        tracing::debug!(per_page = config.per_page, debounce_ms = config.debounce_ms, "app state initialized");

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates the host event, delegates to `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, headers, body, context) => {
                match Self::map_web_result_event(status, &headers, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                Event::PermissionsResult {
                    granted: matches!(permissions, PermissionStatus::Granted),
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        notehub::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key),
            InputMode::Search => Self::map_search_key(key),
            InputMode::Form => Self::map_form_key(key),
        }
    }

    fn map_normal_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::SelectNext,
            BareKey::Up | BareKey::Char('k') => Event::SelectPrevious,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('n') => Event::OpenModal,
            BareKey::Char('d') => Event::DeleteSelected,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Esc | BareKey::Enter => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_form_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Event::PreviousField,
            BareKey::Tab => Event::NextField,
            BareKey::Right => Event::NextTag,
            BareKey::Left => Event::PreviousTag,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::CloseModal,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) if !key.has_modifiers(&[KeyModifier::Ctrl]) => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps a web request result back to the request that produced it.
    fn map_web_result_event(
        status: u16,
        headers: &BTreeMap<String, String>,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(context) = RequestContext::from_map(context) else {
            tracing::debug!(status, "ignoring web result without notehub context");
            return None;
        };

        tracing::debug!(request_id = %context.id, status, body_len = body.len(), "web request result");
        Some(Event::ResponseReceived {
            context,
            outcome: classify_host_result(status, headers, body),
        })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug", skip_all)]
    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::SendRequest(request) => Self::send_request(request),
            Action::ScheduleTimer { delay } => {
                tracing::debug!(delay_secs = delay.as_secs_f64(), "scheduling timer");
                set_timeout(delay.as_secs_f64());
            }
            Action::Notify(notification) => match notification.kind {
                NotificationKind::Success => {
                    tracing::info!(message = %notification.message, "notification");
                }
                NotificationKind::Error => {
                    tracing::warn!(message = %notification.message, "notification");
                }
            },
        }
    }

    fn send_request(request: ApiRequest) {
        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
            HttpMethod::Delete => HttpVerb::Delete,
        };

        tracing::debug!(
            request_id = %request.id(),
            operation = request.context.operation.as_str(),
            url = %request.url,
            "sending web request"
        );
        web_request(
            request.url,
            verb,
            request.headers,
            request.body,
            request.context.to_map(),
        );
    }
}
