//! Trace context carried on outgoing requests.
//!
//! Web request results arrive as separate host events, so the span that built
//! a request is long closed when its response is handled. The trace and span
//! ids travel in the request context map and become the remote
//! parent of the response-handling span.

use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

/// OpenTelemetry ids of the span that issued a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace id as 32 hex characters.
    pub trace_id: String,
    /// Span id of the issuing span as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    pub fn from_current() -> Option<Self> {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of `span`.
    ///
    /// Must be called before `span` is entered. Returns `false`, leaving the
    /// span untouched, if the ids do not parse.
    pub fn link_span(&self, span: &tracing::Span) -> bool {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let Some(span_context) = self.span_context() else {
            return false;
        };
        span.set_parent(opentelemetry::Context::new().with_remote_span_context(span_context));
        true
    }

    fn span_context(&self) -> Option<SpanContext> {
        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        Some(SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        ))
    }
}
