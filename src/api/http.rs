//! `reqwest`-backed transport.
//!
//! JSON bodies go through `RequestBuilder::json`, which sets
//! `application/json`. Multipart bodies go through `RequestBuilder::multipart`,
//! which sets `multipart/form-data` with its own boundary. No content type is
//! ever set by hand.

use crate::api::transport::{
    ApiRequest, ApiResponse, Method, MultipartPart, RequestBody, Transport,
};
use crate::domain::error::{JobBoardError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::Instrument;

/// HTTP transport rooted at the API base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport for `base_url` (for example
    /// `http://localhost:3000/api`).
    ///
    /// `timeout` bounds each whole request; `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| JobBoardError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn multipart_form(parts: Vec<MultipartPart>) -> Result<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name, value),
                MultipartPart::File { name, file } => {
                    let mut body = Part::bytes(file.bytes).file_name(file.file_name);
                    if let Some(content_type) = file.content_type {
                        body = body.mime_str(&content_type).map_err(|e| {
                            JobBoardError::Validation(format!(
                                "invalid content type {content_type}: {e}"
                            ))
                        })?;
                    }
                    form.part(name, body)
                }
            };
        }
        Ok(form)
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(parts) => builder.multipart(Self::multipart_form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, url = %url, error = %e, "request failed");
            JobBoardError::from(e)
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        tracing::debug!(method = %request.method, url = %url, status = status, "response received");
        Ok(ApiResponse::new(status, body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let span = tracing::debug_span!("http_send", method = %request.method, path = %request.path);
        self.execute(request).instrument(span).await
    }
}
