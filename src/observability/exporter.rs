//! OpenTelemetry span exporter writing JSON lines.
//!
//! Each finished span becomes one JSON object on its own line:
//!
//! ```json
//! {"service":"jobboard","name":"dispatch","traceId":"…","spanId":"…",
//!  "parentSpanId":"…","startUnixNano":…,"endUnixNano":…,
//!  "attributes":{"method":"PATCH","path":"/post/apply/p1"},"status":"unset"}
//! ```

use super::file_writer::FileWriter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::KeyValue;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SERVICE_NAME: &str = "jobboard";

#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = batch
            .iter()
            .map(|span| self.writer.write_line(&span_line(span).to_string()))
            .collect::<std::io::Result<()>>()
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

fn attributes(values: &[KeyValue]) -> Value {
    let map: Map<String, Value> = values
        .iter()
        .map(|kv| (kv.key.as_str().to_string(), Value::String(kv.value.to_string())))
        .collect();
    Value::Object(map)
}

fn span_line(span: &SpanData) -> Value {
    let status = match &span.status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    };
    let parent = (span.parent_span_id != SpanId::INVALID).then(|| span.parent_span_id.to_string());

    json!({
        "service": SERVICE_NAME,
        "name": span.name.to_string(),
        "traceId": span.span_context.trace_id().to_string(),
        "spanId": span.span_context.span_id().to_string(),
        "parentSpanId": parent,
        "startUnixNano": unix_nanos(span.start_time),
        "endUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "status": status,
    })
}

/// Builds a tracer provider exporting every finished span to `file_path`.
pub fn create_tracer_provider(file_path: PathBuf) -> TracerProvider {
    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let exporter = FileSpanExporter {
        writer: FileWriter::new(file_path),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_become_a_flat_object() {
        let value = attributes(&[
            KeyValue::new("method", "PATCH"),
            KeyValue::new("status", 200_i64),
        ]);
        assert_eq!(value, json!({ "method": "PATCH", "status": "200" }));
    }

    #[test]
    fn pre_epoch_time_is_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH), 0);
    }
}
