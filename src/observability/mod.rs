//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK → JsonFileExporter → userdeck-otlp.json
//! ```
//!
//! Spans land in `userdeck-otlp.json` under the plugin data directory, one
//! OTLP/JSON document per line. The file rotates at 10 MB and keeps three
//! numbered backups.
//!
//! The level filter comes from the `trace_level` configuration key and
//! defaults to `info`.
//!
//! # Modules
//!
//! - [`context`]: carrying trace ids through web request round trips
//! - `init`: subscriber setup
//! - `tracer`: the file exporter
//! - `span_formatter`: OTLP/JSON encoding
//! - `file_writer`: rotating line writer

pub mod context;
mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use context::TraceContext;
pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, SERVICE_NAME, TRACE_FILE_NAME};
