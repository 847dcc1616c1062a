//! Explicit client configuration.
//!
//! Built once at plugin load from [`crate::Config`] and owned by the
//! [`NoteClient`](super::NoteClient). Nothing about the credential is global.

use std::fmt;

/// Public NoteHub API root; `/notes` is appended per request.
pub const DEFAULT_BASE_URL: &str = "https://notehub-public.goit.study/api";

/// Connection settings for the NoteHub API.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root without a trailing slash.
    pub base_url: String,
    /// Bearer token attached to every request, if configured.
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Value of the `Authorization` header, if a token is configured.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_and_blank_token() {
        let config = ClientConfig::new("https://example.test/api/", Some("  ".into()));
        assert_eq!(config.base_url, "https://example.test/api");
        assert_eq!(config.authorization(), None);
    }

    #[test]
    fn debug_output_hides_token() {
        let config = ClientConfig::new(DEFAULT_BASE_URL, Some("secret".into()));
        assert_eq!(config.authorization().as_deref(), Some("Bearer secret"));
        assert!(!format!("{config:?}").contains("secret"));
    }
}
