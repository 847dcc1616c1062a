//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → notehub-otlp.json
//! ```
//!
//! The trace file lives in [`crate::infrastructure::get_data_dir`] and rotates
//! at 5 MB, keeping two backups. Each line is one OTLP JSON batch.
//!
//! Requests carry a [`TraceContext`] in their host context map so the span
//! handling a response joins the trace of the span that sent it.

mod context;
mod exporter;
mod init;
mod otlp;
mod rotating;

pub use context::TraceContext;
pub use init::{init_tracing, TRACE_FILE_NAME};
