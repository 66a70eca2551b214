//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use brush_client::{RawResponse, Request, Result, Transport};

/// Replays queued responses in order and records every request.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body.
    pub(crate) fn respond(self, status: u16, body: serde_json::Value) -> Self {
        self.respond_raw(status, body.to_string())
    }

    /// Queue a response with a literal body.
    pub(crate) fn respond_raw(self, status: u16, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
        self
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn execute(&self, request: &Request) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no response queued for {} {}", request.method, request.url));
        Ok(response)
    }
}
