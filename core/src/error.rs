//! Error type for the Megaphone client.
//!
//! # Design
//! Every failure surfaces as a single `ConnectionError` so callers handle one
//! type. `ErrorKind` tells the failure modes apart for callers that care,
//! and every error keeps the method and URL of the attempted request.

use thiserror::Error;

use crate::http::HttpMethod;

/// What went wrong while performing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received (DNS, TLS, connection reset, timeout).
    Transport,

    /// The server answered with a non-2xx status.
    Status(u16),

    /// A successful response carried a body that is not valid JSON, or not
    /// the expected shape.
    Decode,

    /// The request payload could not be serialized to JSON.
    Encode,

    /// The configured base URL or a resource id produced an unusable URL.
    InvalidUrl,

    /// The accessor lacks an id the operation needs.
    MissingIdentity,
}

/// The single error returned by every request.
#[derive(Debug, Clone, Error)]
#[error("Megaphone ConnectionError: {description}, Request: {method} {url}")]
pub struct ConnectionError {
    kind: ErrorKind,
    description: String,
    method: HttpMethod,
    url: String,
}

impl ConnectionError {
    pub fn new(
        kind: ErrorKind,
        description: impl Into<String>,
        method: HttpMethod,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            method,
            url: url.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
