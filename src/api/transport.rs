//! Transport abstraction between the action layer and the remote API.
//!
//! Actions build an [`ApiRequest`] and hand it to a [`Transport`]. The
//! production implementation is [`HttpTransport`](crate::api::HttpTransport);
//! tests substitute a scripted transport that records requests.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::form::FileUpload;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP method used by an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        })
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipartPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

impl MultipartPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Request body; the encoding decides the content type.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<MultipartPart>),
}

/// A request to the remote API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attaches a bearer token when one is available.
    #[must_use]
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Content type implied by the body. Multipart returns the bare media
    /// type; the transport appends the boundary.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self.body {
            RequestBody::Empty => None,
            RequestBody::Json(_) => Some("application/json"),
            RequestBody::Multipart(_) => Some("multipart/form-data"),
        }
    }
}

/// Response status and decoded body.
///
/// Bodies that are not JSON are kept as a JSON string; empty bodies are
/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Server-provided error text: the `error` field, else `message`, else a
    /// bare string body.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        ["error", "message"]
            .iter()
            .find_map(|field| self.body.get(field).and_then(Value::as_str))
            .or_else(|| self.body.as_str())
            .filter(|message| !message.is_empty())
            .map(String::from)
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Network`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|e| JobBoardError::Network(format!("unexpected response body: {e}")))
    }

    /// Converts a non-success response into a [`JobBoardError::Remote`],
    /// using `fallback` when the server sent no message.
    #[must_use]
    pub fn into_remote_error(self, fallback: &str) -> JobBoardError {
        JobBoardError::Remote {
            status: self.status,
            message: self.error_message().unwrap_or_else(|| fallback.to_string()),
            payload: self.body,
        }
    }
}

/// Sends requests to the remote API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs `request` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Network`] on transport failure only; HTTP
    /// error statuses are returned as responses.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        (**self).send(request).await
    }
}
