//! Span exporter that appends OTLP JSON to the trace file.

use super::otlp;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes every exported batch as one line of the trace file.
///
/// The plugin sandbox has no collector to talk to, so spans go to disk and
/// can be loaded into any OTLP viewer later.
#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    shut_down: bool,
}

impl FileSpanExporter {
    const fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            file: RotatingFile::new(path),
            resource,
            shut_down: false,
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down {
            Err(TraceError::from("trace exporter is shut down"))
        } else {
            let line = otlp::batch_document(&self.resource, &batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Tracer provider exporting every span synchronously to `path`.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::KeyValue;

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = FileSpanExporter::new(
            dir.path().join("trace.json"),
            Resource::new(vec![KeyValue::new("service.name", "NoteHub")]),
        );

        exporter.shutdown();
        let result = futures_util::FutureExt::now_or_never(exporter.export(Vec::new()));
        assert!(matches!(result, Some(Err(_))));
    }

    #[test]
    fn export_appends_one_line_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let mut exporter = FileSpanExporter::new(path.clone(), Resource::empty());

        for _ in 0..2 {
            let result = futures_util::FutureExt::now_or_never(exporter.export(Vec::new()));
            assert!(matches!(result, Some(Ok(()))));
        }

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.lines().all(|l| l.contains("resourceSpans")));
    }
}
