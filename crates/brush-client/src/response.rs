//! Raw responses and their interpretation into typed outcomes.

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};
use crate::request::Request;

/// What a transport hands back: status plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Create a response from parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Turns raw responses into decoded JSON or a typed error.
///
/// Statuses are checked in a fixed order: 404, 401 and 403 as exact matches,
/// then anything above 400. Everything else (including 400 itself and 3xx)
/// counts as success and is decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseInterpreter;

impl ResponseInterpreter {
    /// Fail on error statuses; otherwise pass the response through.
    pub fn check(request: &Request, response: RawResponse) -> Result<RawResponse> {
        match response.status {
            404 => Err(Error::new(ErrorKind::NotFound(format!(
                "resource not found at {}; check the configured base URL",
                request.url
            )))),
            401 => Err(Error::new(ErrorKind::Unauthorized(
                "invalid token".to_string(),
            ))),
            403 => Err(Error::new(ErrorKind::Forbidden {
                method: request.method.to_string(),
                url: request.url.clone(),
            })),
            status if status > 400 => Err(Error::new(ErrorKind::Remote {
                status,
                message: "error fetching from remote resource".to_string(),
            })),
            _ => Ok(response),
        }
    }

    /// Decode a successful body. An empty body decodes to `null`.
    pub fn decode(response: &RawResponse) -> Result<Value> {
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response.body).map_err(|e| {
            Error::with_source(
                ErrorKind::Remote {
                    status: response.status,
                    message: format!("malformed response body: {e}"),
                },
                e,
            )
        })
    }

    /// [`check`](Self::check) then [`decode`](Self::decode).
    pub fn retrieve(request: &Request, response: RawResponse) -> Result<Value> {
        let response = Self::check(request, response)?;
        Self::decode(&response)
    }
}
