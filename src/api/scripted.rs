//! In-memory transport that replays queued responses.
//!
//! Used by the crate's own tests and available to front ends that want to
//! exercise views without a server. Every request is recorded so callers can
//! assert on exactly what was sent.

use crate::api::transport::{ApiRequest, ApiResponse, Transport};
use crate::domain::error::{JobBoardError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<ApiResponse>>,
    sent: Vec<ApiRequest>,
}

/// Transport answering from a queue, in order.
///
/// When the queue is empty the transport fails with a network error, so a
/// test that forgets to script a reply fails loudly rather than hanging.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<Script>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Queues a response with `status` and `body`.
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.script()
            .replies
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queues a transport failure.
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.script()
            .replies
            .push_back(Err(JobBoardError::Network(message.into())));
        self
    }

    /// Requests sent so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script().sent.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.script().sent.len()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.script().sent.last().cloned()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut script = self.script();
        tracing::trace!(method = %request.method, path = %request.path, "scripted request");
        script.sent.push(request);
        script.replies.pop_front().unwrap_or_else(|| {
            Err(JobBoardError::Network(
                "no scripted reply left for request".to_string(),
            ))
        })
    }
}
