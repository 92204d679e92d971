//! Blocking `Transport` backed by ureq.

use std::fmt;

use ureq::http;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Executes requests with a `ureq::Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as `HttpResponse` values rather than errors. The body
/// is buffered without a size cap and decoded lossily, so any received
/// response is returned. Timeouts, redirects and connection reuse are ureq's
/// defaults.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a caller-configured agent. The agent must not turn status codes
    /// into errors.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let invalid = |_| TransportError::InvalidRequest {
            url: request.url.clone(),
        };

        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let result = match &request.body {
            Some(body) => self.agent.run(builder.body(body.clone()).map_err(invalid)?),
            None => self.agent.run(builder.body(()).map_err(invalid)?),
        };

        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::BadUri(_)) => {
                return Err(TransportError::InvalidRequest {
                    url: request.url.clone(),
                })
            }
            Err(err) => return Err(TransportError::Network(err.to_string())),
        };

        let status = response.status();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
