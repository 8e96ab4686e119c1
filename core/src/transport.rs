//! Network execution of `HttpRequest` values.
//!
//! # Design
//! `HttpClient` only builds and parses; a `Transport` performs the actual
//! round-trip. Non-2xx responses are data, not errors: a transport fails only
//! when no response was received at all. Tests plug in scripted transports,
//! binaries use [`UreqTransport`].

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::trace;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Failure to obtain any response (DNS, refused connection, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes one HTTP request and returns the raw response.
pub trait Transport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}

/// Largest response body `UreqTransport` reads by default, in bytes.
pub const DEFAULT_BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// Blocking `ureq` agent driven from the tokio blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are interpreted by `HttpClient`, not by ureq.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap on response body size; larger bodies fail as transport errors.
    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn body_limit(&self) -> u64 {
        self.body_limit
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        let body_limit = self.body_limit;
        async move {
            tokio::task::spawn_blocking(move || execute_blocking(&agent, request, body_limit))
                .await
                .map_err(|e| TransportError(format!("transport worker failed: {e}")))?
        }
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    request: HttpRequest,
    body_limit: u64,
) -> Result<HttpResponse, TransportError> {
    trace!(method = %request.method, url = %request.url, "executing request");

    let result = match request.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match request.body {
                Some(body) => builder.send(body.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };
    let mut response = result.map_err(|e| TransportError(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_string()
        .map_err(|e| TransportError(e.to_string()))?;

    Ok(HttpResponse { status, headers, body })
}
