//! Executes core `HttpRequest`s over the network with ureq.
//!
//! # Design
//! ureq's status-as-error behavior is disabled so 4xx/5xx come back as data
//! and the core decides what they mean. Only connection-level failures
//! become `ApiError::Transport`. No retries and no timeout.

use std::sync::mpsc;

use tracker_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Resource};

#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "sending");
        let mut response = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "received");

        Ok(HttpResponse { status, body })
    }

    /// Run every request at once, one thread each, calling `on_response` on
    /// the caller's thread as each one completes.
    pub fn execute_all<F>(&self, requests: Vec<(Resource, HttpRequest)>, mut on_response: F)
    where
        F: FnMut(Resource, Result<HttpResponse, ApiError>),
    {
        let (tx, rx) = mpsc::channel();
        std::thread::scope(|s| {
            for (resource, req) in requests {
                let tx = tx.clone();
                s.spawn(move || {
                    // The receiver outlives the scope; a send cannot fail.
                    let _ = tx.send((resource, self.execute(req)));
                });
            }
            drop(tx);
            for (resource, response) in rx {
                on_response(resource, response);
            }
        });
    }
}
