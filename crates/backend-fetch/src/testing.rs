//! Scripted in-memory transport for tests.
//!
//! Enabled inside this crate's tests and, for downstream crates, through the
//! `test-util` feature.

use crate::{FetchError, FetchResult, HttpTransport, OutboundRequest, ResourceResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

type Handler = dyn Fn(&OutboundRequest) -> FetchResult<ResourceResponse> + Send + Sync;

/// Transport that records every request and answers from a script.
///
/// Queued responses are used first, in order; after that the handler (if
/// any) answers; with neither, the call fails as a transport error.
#[derive(Default)]
pub struct RecordingTransport {
    scripted: Mutex<VecDeque<FetchResult<ResourceResponse>>>,
    handler: Option<Box<Handler>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted request with `handler`.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&OutboundRequest) -> FetchResult<ResourceResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Self::default()
        }
    }

    /// Queue a response.
    pub fn respond(&self, status: u16, body: impl Into<String>) {
        self.scripted
            .lock()
            .push_back(Ok(ResourceResponse::new(status, body)));
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, body: &serde_json::Value) {
        self.respond(status, body.to_string());
    }

    /// Queue a transport failure (no response).
    pub fn fail(&self, message: impl Into<String>) {
        self.scripted
            .lock()
            .push_back(Err(FetchError::Transport(message.into())));
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> FetchResult<ResourceResponse> {
        self.requests.lock().push(request.clone());

        let scripted = self.scripted.lock().pop_front();
        if let Some(response) = scripted {
            return response;
        }

        match &self.handler {
            Some(handler) => handler(&request),
            None => Err(FetchError::Transport(format!(
                "no scripted response for {} {}",
                request.method, request.url
            ))),
        }
    }
}
