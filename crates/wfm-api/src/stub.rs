//! In-memory [`Transport`] returning canned responses by path.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{ApiError, ApiRequest, RawResponse, Transport};

/// Answers each path with a fixed response and records every request.
///
/// Unknown paths get a 404 so a missing fixture shows up as a transport
/// error rather than a panic.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: HashMap<String, RawResponse>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `path` with HTTP 200 and `body`.
    #[must_use]
    pub fn with_ok(self, path: &str, body: &str) -> Self {
        self.with_response(path, 200, body)
    }

    #[must_use]
    pub fn with_response(mut self, path: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            path.to_string(),
            RawResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// Every request executed so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// Paths requested so far, oldest first.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.path.clone())
            .collect()
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self
            .responses
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| RawResponse {
                status: 404,
                body: format!("no stub for {}", request.path),
            }))
    }
}
