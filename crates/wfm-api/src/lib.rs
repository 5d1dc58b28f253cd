//! WorkflowMax API client.
//!
//! Every call carries the `apiKey`/`accountKey` pair as query parameters and
//! every response is an XML document whose `<Status>` must read `OK`.
//! [`Api`] implements that request contract; [`Client`] layers the
//! timesheet queries on top of it once the caller's staff ID is known.

mod client;
mod response;
#[cfg(any(test, feature = "test-util"))]
pub mod stub;
mod transport;

use thiserror::Error;

pub use client::{Api, Client, Credentials};
pub use transport::{ApiRequest, BASE_URL, HttpTransport, Method, RawResponse, Transport};

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed before a response arrived.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success HTTP status.
    #[error("non-success response: {status}\n\n{body}")]
    Transport { status: u16, body: String },
    /// The response body was not the expected XML document.
    #[error("invalid response: {message}")]
    Parse { message: String, body: String },
    /// The document's `<Status>` was something other than `OK`.
    #[error("{status}: {document}")]
    Status { status: String, document: String },
    /// No staff record carries the configured email address.
    #[error("could not find staff member with email address {email}")]
    StaffNotFound { email: String },
    /// A request document could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// The unparseable body, for errors where it helps diagnosis.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Parse { body, .. } => Some(body),
            _ => None,
        }
    }
}
