//! Error types for the appsec client.
//!
//! # Design
//! Every operation returns the single [`Error`] enum so callers can match on
//! the failure kind. Validation failures never reach the network, transport
//! failures are wrapped with the operation name, and non-success statuses
//! are handed to an [`ErrorMapper`] that turns the response into an
//! [`ApiError`]. The default mapper decodes the RFC 7807 problem documents
//! the API emits and keeps the raw body when decoding fails.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::http::HttpResponse;
use crate::validation::ValidationError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request fields failed local validation; nothing was sent.
    #[error("struct validation: {0}")]
    Validation(#[from] ValidationError),

    /// The exchange did not complete.
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: TransportError,
    },

    /// The server answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request payload could not be serialized to JSON.
    #[error("failed to create {operation} request: {message}")]
    Serialization {
        operation: &'static str,
        message: String,
    },

    /// A success response body could not be decoded into the expected type.
    #[error("{operation} response decode failed: {message}")]
    Deserialization {
        operation: &'static str,
        message: String,
    },
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Api,
    Serialization,
    Deserialization,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Api(_) => ErrorKind::Api,
            Error::Serialization { .. } => ErrorKind::Serialization,
            Error::Deserialization { .. } => ErrorKind::Deserialization,
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Transport {
                source: TransportError::Cancelled,
                ..
            }
        )
    }
}

/// Failure of the HTTP exchange itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error("request timed out")]
    Timeout,

    #[error("connection error: {0}")]
    Connection(String),
}

/// A non-success response from the API. `body` is the raw response body,
/// kept even when `problem` decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API error: status {status}: {problem}")]
pub struct ApiError {
    pub status: u16,
    pub problem: Problem,
    pub body: String,
}

/// RFC 7807 problem document as returned by the API.
///
/// Unknown members are ignored. When neither `title` nor `detail` can be
/// read from the body, the raw body ends up in `detail`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Problem>,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.title.is_empty(), self.detail.is_empty()) {
            (false, false) => write!(f, "{}: {}", self.title, self.detail),
            (false, true) => f.write_str(&self.title),
            (true, false) => f.write_str(&self.detail),
            (true, true) => f.write_str("no error detail"),
        }
    }
}

/// Turns a non-success response into a structured [`ApiError`].
pub trait ErrorMapper {
    fn map_error(&self, response: &HttpResponse) -> ApiError;
}

/// Decodes RFC 7807 problem bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemErrorMapper;

impl ErrorMapper for ProblemErrorMapper {
    fn map_error(&self, response: &HttpResponse) -> ApiError {
        let mut problem = serde_json::from_str::<Problem>(&response.body).unwrap_or_default();
        if problem.title.is_empty() && problem.detail.is_empty() {
            problem.detail = response.body.clone();
        }
        ApiError {
            status: response.status,
            problem,
            body: response.body.clone(),
        }
    }
}

impl<M: ErrorMapper + ?Sized> ErrorMapper for &M {
    fn map_error(&self, response: &HttpResponse) -> ApiError {
        (**self).map_error(response)
    }
}
