//! Logging and trace export.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (stderr)
//!                            → tracing-opentelemetry → FileSpanExporter → JSON lines
//! ```
//!
//! The OpenTelemetry branch is only installed when `trace_export` is set.
//! Trace files rotate at 10 MB, keeping three numbered backups.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: Span exporter and tracer provider
//! - `file_writer`: Rotating line writer

mod exporter;
mod file_writer;
pub mod init;

pub use init::{init_tracing, TRACE_FILE};
