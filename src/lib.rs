//! NoteHub: a Zellij plugin for browsing and editing notes on the NoteHub API.
//!
//! The plugin provides:
//! - A paginated, searchable list of notes, newest first
//! - Debounced search that resets to the first page when the term changes
//! - A cached query layer with stale-while-revalidate and request coalescing
//! - A create-note modal with inline validation
//! - Note deletion with notifications on success and failure

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  - key mapping, web_request, set_timeout            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, search/pagination controller     │
//! │  - Mutation orchestrator, modal, notifications      │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ API Layer     │
//! │ (ui/)         │   │ (query/)      │   │ (api/)        │
//! │ - Rendering   │   │ - Cache keys  │   │ - Requests    │
//! │ - Theming     │   │ - SWR entries │   │ - Decoding    │
//! │ - Components  │   │ - Coalescing  │   │ - Context map │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Error types (domain/error)                       │
//! │  - Note model and form validation (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The library never performs I/O on its own behalf. [`handle_event`] turns
//! an [`Event`] into state changes plus a list of [`Action`]s, and the shim
//! executes them with Zellij's host APIs. Responses come back as
//! [`Event::ResponseReceived`], matched to their request by the id carried in
//! the request context.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/notehub.wasm" {
//!         token "your-notehub-token"
//!         per_page "15"
//!         debounce_ms "500"
//!         empty_search "keep"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use notehub::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, Event::PermissionsResult { granted: true })?;
//!
//! let Action::SendRequest(request) = &actions[0] else { panic!() };
//! assert!(request.url.contains("page=1&perPage=15"));
//! # Ok::<(), notehub::NoteHubError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod ui;

pub use api::{ApiRequest, ApiResponse, ClientConfig, NoteClient, Outcome, RequestContext};
pub use app::{
    handle_event, Action, AppState, EmptySearchPolicy, Event, InputMode, Notification,
    NotificationKind, QueryOptions,
};
pub use domain::{NoteHubError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration.
///
/// Every field has a default; see [`Config::from_zellij`] for the keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root. Default: [`api::DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Bearer token sent with every request.
    pub token: Option<String>,

    /// Notes per page. Default: 15
    pub per_page: u32,

    /// Search debounce window in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// What an emptied search box does to the filter. Default: keep
    pub empty_search: EmptySearchPolicy,

    /// Built-in theme name, ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme, `~` expanded.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let options = QueryOptions::default();
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            token: None,
            per_page: options.per_page,
            debounce_ms: 500,
            empty_search: options.empty_search,
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Keys: `base_url`, `token`, `per_page`, `debounce_ms`, `empty_search`,
    /// `theme`, `theme_file`, `trace_level`. Missing keys take their default;
    /// values that do not parse are logged and replaced by the default too.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use notehub::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("per_page".to_string(), "30".to_string());
    /// map.insert("debounce_ms".to_string(), "abc".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.per_page, 30);
    /// assert_eq!(config.debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let per_page = value("per_page").map_or(defaults.per_page, |raw| {
            match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(per_page = %raw, "invalid per_page, using default");
                    defaults.per_page
                }
            }
        });

        let debounce_ms = value("debounce_ms").map_or(defaults.debounce_ms, |raw| {
            raw.parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(debounce_ms = %raw, "invalid debounce_ms, using default");
                defaults.debounce_ms
            })
        });

        let empty_search = value("empty_search").map_or(defaults.empty_search, |raw| {
            raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "invalid empty_search, using default");
                defaults.empty_search
            })
        });

        Self {
            base_url: value("base_url").map_or(defaults.base_url, String::from),
            token: value("token").map(String::from),
            per_page,
            debounce_ms,
            empty_search,
            theme_name: value("theme").map(String::from),
            theme_file: value("theme_file").map(String::from),
            trace_level: value("trace_level").map_or(defaults.trace_level, String::from),
        }
    }

    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            per_page: self.per_page,
            debounce: Duration::from_millis(self.debounce_ms),
            empty_search: self.empty_search,
        }
    }
}

/// Builds the initial application state.
///
/// Loads the theme (file, then name, then the default) and creates the API
/// client. Nothing is fetched until web access is granted.
///
/// ```rust
/// use notehub::{initialize, Config};
///
/// let state = initialize(&Config {
///     token: Some("secret".to_string()),
///     ..Default::default()
/// });
/// assert!(state.cache.pending_count() == 0);
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(base_url = %config.base_url, per_page = config.per_page, "initializing notehub plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let path = infrastructure::expand_tilde(theme_file);
            Theme::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let client = NoteClient::new(ClientConfig::new(config.base_url.clone(), config.token.clone()));
    AppState::new(client, config.query_options(), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("base_url", "http://localhost:8080/api/"),
            ("token", "abc"),
            ("per_page", "12"),
            ("debounce_ms", "250"),
            ("empty_search", "clear"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "notehub=trace"),
        ]));

        assert_eq!(config.base_url, "http://localhost:8080/api/");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.per_page, 12);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.empty_search, EmptySearchPolicy::Clear);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level, "notehub=trace");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("per_page", "0"),
            ("debounce_ms", "-5"),
            ("empty_search", "sometimes"),
            ("token", "   "),
        ]));

        assert_eq!(config.per_page, 15);
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.empty_search, EmptySearchPolicy::Keep);
        assert_eq!(config.token, None);
    }

    #[test]
    fn initialize_uses_configured_client_and_theme() {
        let state = initialize(&Config {
            base_url: "http://localhost:1/api/".to_string(),
            per_page: 5,
            theme_name: Some("catppuccin-latte".to_string()),
            ..Config::default()
        });

        assert_eq!(state.client.config().base_url, "http://localhost:1/api");
        assert_eq!(state.per_page, 5);
        assert_eq!(state.theme.name, "catppuccin-latte");
    }

    #[test]
    fn missing_theme_file_falls_back_to_default() {
        let state = initialize(&Config {
            theme_file: Some("/no/such/theme.toml".to_string()),
            ..Config::default()
        });
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
