//! Blocking [`Executor`] backed by `ureq`.
//!
//! The exchange runs on a short-lived worker thread while the calling thread
//! waits on a channel and polls the cancellation token, so a cancelled call
//! returns promptly even though `ureq` itself cannot be interrupted. The
//! worker's late result is dropped.

use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::error::TransportError;
use crate::http::{Executor, HttpMethod, HttpRequest, HttpResponse};

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Clone)]
pub struct UreqExecutor {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqExecutor").finish_non_exhaustive()
    }
}

impl UreqExecutor {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a preconfigured agent. Every request overrides the agent's
    /// `http_status_as_error` so non-2xx statuses still come back as responses.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }
}

impl Executor for UreqExecutor {
    fn execute(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let (tx, rx) = mpsc::sync_channel(1);
        let agent = self.agent.clone();
        thread::spawn(move || {
            let _ = tx.send(exchange(&agent, request));
        });

        loop {
            match rx.recv_timeout(CANCEL_POLL_INTERVAL) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) if cancel.is_cancelled() => {
                    trace!("abandoning in-flight request after cancellation");
                    return Err(TransportError::Cancelled);
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(TransportError::Connection(
                        "transport worker exited without a response".to_string(),
                    ))
                }
            }
        }
    }
}

fn exchange(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, TransportError> {
    trace!(method = req.method.as_str(), url = %req.url, "sending request");

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent
                .get(&req.url)
                .config()
                .http_status_as_error(false)
                .build();
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Put, body) => {
            let mut builder = agent
                .put(&req.url)
                .config()
                .http_status_as_error(false)
                .build();
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = result.map_err(map_ureq_error)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(map_ureq_error)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        other => TransportError::Connection(other.to_string()),
    }
}
