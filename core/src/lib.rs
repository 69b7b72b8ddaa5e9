//! Synchronous client for the selected-hostnames resource of the
//! Application Security API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values; the actual
//! exchange is delegated to an [`Executor`] (host-does-IO pattern). A blocking
//! `ureq` executor ships behind the default `ureq` feature.
//!
//! # Design
//! - `AppSecClient` is stateless: base URL, executor, error mapper.
//! - Each operation is split into `build_*` (validates, produces the request)
//!   and `parse_*` (checks status, decodes the body). The
//!   [`SelectedHostname`] trait composes them around one executor call.
//! - Request IDs are validated locally before anything is sent.
//! - Cancellation is caller-supplied through a `CancellationToken`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod selected_hostname;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;
pub mod validation;

pub use client::AppSecClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{
    ApiError, Error, ErrorKind, ErrorMapper, Problem, ProblemErrorMapper, Result, TransportError,
};
pub use http::{Executor, HttpMethod, HttpRequest, HttpResponse};
pub use selected_hostname::SelectedHostname;
#[cfg(feature = "ureq")]
pub use transport::UreqExecutor;
pub use types::{
    GetSelectedHostnameRequest, GetSelectedHostnameResponse, GetSelectedHostnamesRequest,
    GetSelectedHostnamesResponse, Hostname, UpdateSelectedHostnameRequest,
    UpdateSelectedHostnameResponse,
};
pub use validation::{FieldViolation, ValidationError};

pub use tokio_util::sync::CancellationToken;
