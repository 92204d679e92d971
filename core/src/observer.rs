//! Hooks for observing outbound message traffic.
//!
//! # Design
//! `ZoryaClient` reports each send through an optional `Observer` instead of
//! logging inline. `LogObserver` is installed by default and writes through
//! the `log` facade; the embedding application chooses the logger.

use log::{debug, info, warn};

use crate::error::ZoryaError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::WhatsAppMessageResponse;

/// Callbacks for one `send_template_message` call. All default to no-ops.
pub trait Observer: Send + Sync {
    fn on_request(&self, _request: &HttpRequest) {}

    fn on_response(&self, _response: &HttpResponse) {}

    fn on_sent(&self, _response: &WhatsAppMessageResponse) {}

    fn on_failure(&self, _error: &ZoryaError) {}
}

/// Writes request and response details to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_request(&self, request: &HttpRequest) {
        debug!("request url: {}", request.url);
        debug!("request method: {}", request.method);
        debug!("request headers: {}", redacted_headers(&request.headers));
        debug!("request body: {}", request.body.as_deref().unwrap_or_default());
    }

    fn on_response(&self, response: &HttpResponse) {
        info!("response status: {} {}", response.status, response.status_text);
        if !response.is_success() {
            debug!("response body: {}", response.body);
        }
    }

    fn on_sent(&self, response: &WhatsAppMessageResponse) {
        info!(
            "message sent successfully, transaction {}",
            response.data.transaction_id
        );
    }

    fn on_failure(&self, error: &ZoryaError) {
        warn!("send message failed: {error}");
    }
}

/// Render headers for logging with credentials masked.
pub fn redacted_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                let scheme = value.split_whitespace().next().unwrap_or_default();
                format!("{name}: {scheme} ***")
            } else if name.eq_ignore_ascii_case("x-api-key") {
                format!("{name}: ***")
            } else {
                format!("{name}: {value}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
