//! Subscriber setup.

use super::exporter;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the OTLP trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "notehub-otlp.json";

/// Installs the global subscriber exporting spans to the trace file.
///
/// `level` is an [`EnvFilter`] directive such as `info` or
/// `notehub::query=trace`; an unparsable directive falls back to `info`.
///
/// Observability is optional: if the data directory cannot be created the
/// plugin runs without a subscriber. Calling this more than once keeps the
/// first subscriber.
pub fn init_tracing(level: &str) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "NoteHub"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer("NoteHub");

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
