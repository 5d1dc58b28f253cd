//! The HTTP seam: one request in, one status code and body out.

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::ApiError;

/// Every API path is relative to this URL.
pub const BASE_URL: &str = "https://api.workflowmax.com/";

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Query parameters whose values never appear in `Debug` output.
const SECRET_PARAMS: [&str; 2] = ["apiKey", "accountKey"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A fully-parameterized API call, authentication included.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to [`BASE_URL`], e.g. `time.api/list`.
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// Returns the value of a query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(key, value)| {
                if SECRET_PARAMS.contains(&key.as_str()) {
                    (key.as_str(), "[REDACTED]")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &params)
            .field("body", &self.body)
            .finish()
    }
}

/// Status code and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an [`ApiRequest`] and returns the raw response.
///
/// Implementations must not interpret the status code or body; that is the
/// client's job.
pub trait Transport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// Blocking HTTPS transport backed by `reqwest`.
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport pointed at [`BASE_URL`].
    pub fn new() -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("wfm/", env!("CARGO_PKG_VERSION")))
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        }
        .query(&request.params);

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/xml")
                .body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}
