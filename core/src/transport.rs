//! Executes `HttpRequest` values against the network.
//!
//! The trait hands back a boxed `Send` future so page fetches can be spawned
//! onto the tokio runtime without tying `TodoPage` to a concrete client.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub type TransportFuture =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'static>>;

pub trait Transport: Send + Sync + 'static {
    fn execute(&self, request: HttpRequest) -> TransportFuture;
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
///
/// Status-code-as-error is disabled so 4xx/5xx come back as data and
/// `TodoApi` decides what they mean.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> TransportFuture {
        let agent = self.agent.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
                .await
                .unwrap_or_else(|e| Err(TransportError::Join(e)))
        })
    }
}

fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, TransportError> {
    debug!(
        event = "transport.request.started",
        method = req.method.as_str(),
        url = %req.url,
    );

    let url = req.url.clone();
    let fail = |e: ureq::Error| TransportError::Request {
        url: url.clone(),
        reason: e.to_string(),
    };

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&req.url), &req.headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&req.url), &req.headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&req.url), &req.headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&req.url), &req.headers).send_empty(),
    };
    let mut response = result.map_err(fail)?;

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
    let body = response.body_mut().read_to_string().map_err(fail)?;

    debug!(event = "transport.request.completed", url = %url, status = status);

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
