//! Error types for the NoteHub plugin.
//!
//! This module defines the centralized error type [`NoteHubError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented using the
//! `thiserror` crate.
//!
//! Every variant is recoverable at the UI level: the handler turns errors into an
//! error flag, a message, and a notification rather than aborting the plugin.

use crate::domain::draft::FieldError;
use thiserror::Error;

/// The main error type for NoteHub plugin operations.
///
/// # Examples
///
/// ```
/// use notehub::NoteHubError;
///
/// let err = NoteHubError::Api { status: 404, message: "Note not found".to_string() };
/// assert_eq!(err.to_string(), "API error (404): Note not found");
/// ```
#[derive(Debug, Error)]
pub enum NoteHubError {
    /// The request never produced a server response.
    ///
    /// Raised when the host reports a transport failure (DNS, TLS, refused
    /// connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A note draft failed client-side validation.
    ///
    /// Never produced by the API client; the form rejects the draft before a
    /// request is built.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// A 2xx response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NoteHubError {
    /// Returns the HTTP status if the error came from a server response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short, user-facing text for the status line and notifications.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Network error, check your connection".to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Decode(_) => "Unexpected response from server".to_string(),
            other => other.to_string(),
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A specialized `Result` type for NoteHub operations.
pub type Result<T> = std::result::Result<T, NoteHubError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::{Field, FieldError};

    #[test]
    fn api_error_exposes_status() {
        let err = NoteHubError::Api {
            status: 404,
            message: "missing".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "missing");
        assert_eq!(NoteHubError::Network("refused".into()).status(), None);
    }

    #[test]
    fn validation_error_lists_every_field() {
        let err = NoteHubError::Validation(vec![
            FieldError::new(Field::Title, "Title is required"),
            FieldError::new(Field::Content, "Content must be at most 500 characters"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: title: Title is required; content: Content must be at most 500 characters"
        );
    }
}
