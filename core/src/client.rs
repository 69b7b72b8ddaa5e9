//! The `AppSecClient` facade.
//!
//! # Design
//! `AppSecClient` holds only a base URL, an [`Executor`] and an
//! [`ErrorMapper`], and carries no mutable state between calls. Resource
//! modules add `build_*` methods that produce an `HttpRequest`, `parse_*`
//! methods that consume an `HttpResponse`, and convenience operations that
//! run both around one executor call. The shared plumbing for those lives
//! here.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, ErrorMapper, ProblemErrorMapper, Result, TransportError};
use crate::http::{Executor, HttpMethod, HttpRequest, HttpResponse};

/// Synchronous, stateless client for the Application Security API.
///
/// Cheap to clone when the executor is; concurrent callers can share one
/// instance or clone it freely.
#[derive(Debug, Clone)]
pub struct AppSecClient<E, M = ProblemErrorMapper> {
    base_url: String,
    executor: E,
    mapper: M,
}

impl<E> AppSecClient<E> {
    pub fn new(base_url: &str, executor: E) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            executor,
            mapper: ProblemErrorMapper,
        }
    }
}

#[cfg(feature = "ureq")]
impl AppSecClient<crate::transport::UreqExecutor> {
    /// Client over a `ureq` executor using the configured timeout.
    pub fn from_config(config: &crate::config::ClientConfig) -> Self {
        Self::new(
            &config.base_url,
            crate::transport::UreqExecutor::new(config.timeout()),
        )
    }
}

impl<E, M> AppSecClient<E, M> {
    /// Replace the error mapper used for non-success responses.
    pub fn with_error_mapper<N>(self, mapper: N) -> AppSecClient<E, N> {
        AppSecClient {
            base_url: self.base_url,
            executor: self.executor,
            mapper,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub(crate) fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub(crate) fn json_request<T: Serialize>(
        &self,
        operation: &'static str,
        method: HttpMethod,
        path: &str,
        payload: &T,
    ) -> Result<HttpRequest> {
        let body = serde_json::to_string(payload).map_err(|e| Error::Serialization {
            operation,
            message: e.to_string(),
        })?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

impl<E, M: ErrorMapper> AppSecClient<E, M> {
    /// Decode `response` as `T` if its status is one of `accepted`, otherwise
    /// map it to an API error.
    pub(crate) fn parse<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: HttpResponse,
        accepted: &[u16],
    ) -> Result<T> {
        if !accepted.contains(&response.status) {
            return Err(self.mapper.map_error(&response).into());
        }
        serde_json::from_str(&response.body).map_err(|e| Error::Deserialization {
            operation,
            message: e.to_string(),
        })
    }
}

impl<E: Executor, M> AppSecClient<E, M> {
    pub(crate) fn send(
        &self,
        operation: &'static str,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse> {
        if cancel.is_cancelled() {
            return Err(Error::Transport {
                operation,
                source: TransportError::Cancelled,
            });
        }
        self.executor
            .execute(request, cancel)
            .map_err(|source| Error::Transport { operation, source })
    }
}
