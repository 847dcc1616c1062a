//! Request and response envelopes exchanged with the host transport.
//!
//! The plugin cannot block on HTTP. A request is handed to the host together
//! with a string context map; the host echoes that map back with the result,
//! which is how a response is matched to the [`RequestId`] that produced it.

use crate::domain::error::NoteHubError;
use crate::observability::TraceContext;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const CONTEXT_REQUEST_ID: &str = "notehub.request_id";
const CONTEXT_OPERATION: &str = "notehub.operation";
const CONTEXT_TRACE_ID: &str = "notehub.trace_id";
const CONTEXT_PARENT_SPAN_ID: &str = "notehub.parent_span_id";

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Allocates a fresh identifier, unique for the lifetime of the plugin.
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which API operation a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListNotes,
    CreateNote,
    DeleteNote,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListNotes => "list_notes",
            Self::CreateNote => "create_note",
            Self::DeleteNote => "delete_note",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "list_notes" => Some(Self::ListNotes),
            "create_note" => Some(Self::CreateNote),
            "delete_note" => Some(Self::DeleteNote),
            _ => None,
        }
    }
}

/// Correlation data carried through the host and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub id: RequestId,
    pub operation: Operation,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context with a fresh id and the current trace context.
    pub fn new(operation: Operation) -> Self {
        Self {
            id: RequestId::next(),
            operation,
            trace: TraceContext::from_current(),
        }
    }

    /// Encodes the context as the host's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(CONTEXT_REQUEST_ID.to_string(), self.id.0.to_string());
        map.insert(CONTEXT_OPERATION.to_string(), self.operation.as_str().to_string());
        if let Some(trace) = &self.trace {
            map.insert(CONTEXT_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(CONTEXT_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map echoed back by the host.
    ///
    /// Returns `None` for maps that did not originate from this plugin.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let id = map.get(CONTEXT_REQUEST_ID)?.parse::<u64>().ok()?;
        let operation = Operation::parse(map.get(CONTEXT_OPERATION)?)?;
        let trace = match (map.get(CONTEXT_TRACE_ID), map.get(CONTEXT_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self {
            id: RequestId(id),
            operation,
            trace,
        })
    }
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// A fully built request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub context: RequestContext,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl ApiRequest {
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.context.id
    }
}

/// Raw server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// What came back for one request: a response, or a transport failure.
pub type Outcome = Result<ApiResponse, NoteHubError>;

/// Classifies a web request result reported by the host.
///
/// Zellij reports a failed transport (no connection, bad TLS) as a result
/// carrying an error status, no headers, and the error text as the body. Real
/// server responses always carry headers.
#[must_use]
pub fn classify_host_result(status: u16, headers: &BTreeMap<String, String>, body: Vec<u8>) -> Outcome {
    if headers.is_empty() && status >= 400 {
        let reason = String::from_utf8_lossy(&body).trim().to_string();
        let reason = if reason.is_empty() {
            format!("request failed with status {status}")
        } else {
            reason
        };
        return Err(NoteHubError::Network(reason));
    }

    Ok(ApiResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        let a = RequestId::next();
        let b = RequestId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn context_survives_host_map() {
        let context = RequestContext {
            id: RequestId(42),
            operation: Operation::DeleteNote,
            trace: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".into(),
                parent_span_id: "b7ad6b7169203331".into(),
            }),
        };

        let decoded = RequestContext::from_map(&context.to_map()).unwrap();
        assert_eq!(decoded, context);
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("other".to_string(), "1".to_string());
        assert!(RequestContext::from_map(&map).is_none());
    }

    #[test]
    fn headerless_failure_is_network_error() {
        let outcome = classify_host_result(400, &BTreeMap::new(), b"connection refused".to_vec());
        assert!(matches!(outcome, Err(NoteHubError::Network(ref m)) if m == "connection refused"));
    }

    #[test]
    fn server_error_with_headers_is_a_response() {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = classify_host_result(404, &headers, b"{}".to_vec()).unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }
}
