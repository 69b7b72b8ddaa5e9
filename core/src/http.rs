//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The client builds an
//! [`HttpRequest`], hands it to an [`Executor`] that performs the actual
//! exchange, and parses the returned [`HttpResponse`]. Authentication,
//! connection reuse and retries belong to the executor, never to the client.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
        }
    }
}

/// An HTTP request described as plain data. `url` is absolute: the client's
/// base URL joined with the resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Performs one HTTP exchange.
///
/// Implementations must return every status code as a response, not as an
/// error; only failures to complete the exchange are `TransportError`s. If
/// `cancel` fires before or during the exchange the call should return
/// [`TransportError::Cancelled`] promptly.
pub trait Executor {
    fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        (**self).execute(request, cancel)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        (**self).execute(request, cancel)
    }
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
    fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        (**self).execute(request, cancel)
    }
}
