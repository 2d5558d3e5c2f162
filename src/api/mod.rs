//! Remote API plumbing.
//!
//! - `endpoints`: path builders for every API operation
//! - `transport`: request/response types and the [`Transport`] trait
//! - `http`: `reqwest` implementation of [`Transport`]
//! - `scripted`: queued in-memory [`Transport`] for tests and demos

pub mod endpoints;
pub mod http;
pub mod scripted;
pub mod transport;

pub use http::HttpTransport;
pub use scripted::ScriptedTransport;
pub use transport::{ApiRequest, ApiResponse, Method, MultipartPart, RequestBody, Transport};
