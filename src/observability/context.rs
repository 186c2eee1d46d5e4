//! Trace correlation across host round trips.
//!
//! A web request leaves the plugin in one event and its result arrives in a
//! later one, so the span that issued it is long closed by then. The issuing
//! span's ids ride along in the request context map (the host echoes that map
//! back untouched) and are recorded on the span that handles the response.

use std::collections::BTreeMap;

/// Context entry holding the 32-hex-digit trace id.
pub const TRACE_ID_CONTEXT: &str = "trace_id";

/// Context entry holding the 16-hex-digit id of the issuing span.
pub const PARENT_SPAN_CONTEXT: &str = "parent_span_id";

/// Trace and span ids captured from the active OpenTelemetry span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the ids of the current span.
    ///
    /// Returns `None` outside any sampled span, which includes every call made
    /// before tracing is initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
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

    /// Writes both ids into a request context map.
    pub fn inject(&self, context: &mut BTreeMap<String, String>) {
        context.insert(TRACE_ID_CONTEXT.to_string(), self.trace_id.clone());
        context.insert(PARENT_SPAN_CONTEXT.to_string(), self.parent_span_id.clone());
    }

    /// Reads ids previously written by [`inject`](Self::inject).
    ///
    /// Both entries must be present and non-empty.
    #[must_use]
    pub fn extract(context: &BTreeMap<String, String>) -> Option<Self> {
        let trace_id = context.get(TRACE_ID_CONTEXT).filter(|s| !s.is_empty())?;
        let parent_span_id = context.get(PARENT_SPAN_CONTEXT).filter(|s| !s.is_empty())?;
        Some(Self {
            trace_id: trace_id.clone(),
            parent_span_id: parent_span_id.clone(),
        })
    }

    /// Records the ids on `span`, which must declare `trace_id` and
    /// `parent_span_id` fields (usually as `tracing::field::Empty`).
    pub fn record_on(&self, span: &tracing::Span) {
        span.record(TRACE_ID_CONTEXT, self.trace_id.as_str());
        span.record(PARENT_SPAN_CONTEXT, self.parent_span_id.as_str());
    }
}
