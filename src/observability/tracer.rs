//! Span exporter that appends OTLP/JSON documents to a local file.

use super::file_writer::FileWriter;
use super::span_formatter::encode_batch;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Writes every exported batch as one JSON line.
#[derive(Debug)]
struct JsonFileExporter {
    writer: FileWriter,
    resource: Resource,
    scope: &'static str,
    closed: bool,
}

impl SpanExporter for JsonFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.closed {
            Err(TraceError::from("trace exporter already shut down"))
        } else {
            let line = encode_batch(&self.resource, self.scope, &batch).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.closed = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider that exports synchronously to `file_path`.
///
/// Spans are written as they end; the plugin runs single-threaded under the
/// host, so there is no background batch processor to drive.
pub fn create_tracer_provider(
    file_path: PathBuf,
    resource: Resource,
    scope: &'static str,
) -> TracerProvider {
    let exporter = JsonFileExporter {
        writer: FileWriter::new(file_path),
        resource: resource.clone(),
        scope,
        closed: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
