//! HTTP transport types and the injected `Transport` capability.
//!
//! # Design
//! Requests and responses are plain data. `HttpRequest::compose` applies the
//! body and header rules (GET drops the body, JSON mode sets headers, raw mode
//! appends them) without touching the network. A `Transport` implementation
//! performs the round-trip and reports any received response as data,
//! whatever its status code. Only failures where no response was obtained are
//! errors.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            other => Err(format!("unsupported method: {other}")),
        }
    }
}

/// How the request body and caller headers are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Adds `content-type: application/json`; caller headers replace any
    /// existing header of the same name.
    Json,
    /// Caller headers are appended as given, duplicates included.
    Raw,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Build a request from loosely typed parts.
    ///
    /// Fails with `TransportError::InvalidRequest` when the URL is empty or
    /// the method is not recognised. No I/O happens here.
    pub fn compose(
        url: &str,
        method: &str,
        headers: Vec<(String, String)>,
        body: Option<String>,
        mode: BodyMode,
    ) -> Result<Self, TransportError> {
        let invalid = || TransportError::InvalidRequest {
            url: url.to_string(),
        };
        if url.trim().is_empty() {
            return Err(invalid());
        }
        let method: HttpMethod = method.parse().map_err(|_| invalid())?;
        let body = if method == HttpMethod::Get { None } else { body };

        let headers = match mode {
            BodyMode::Json => {
                let mut merged = vec![("content-type".to_string(), "application/json".to_string())];
                for (name, value) in headers {
                    merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
                    merged.push((name, value));
                }
                merged
            }
            BodyMode::Raw => headers,
        };

        Ok(Self {
            method,
            url: url.to_string(),
            headers,
            body,
        })
    }

    /// First header value with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The outcome of one HTTP round-trip that produced a response.
///
/// 4xx and 5xx responses are represented here too; interpreting `status`
/// is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes `HttpRequest` values against the network.
///
/// Implementations must drain the whole response body before returning and
/// must not treat non-2xx statuses as errors.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Send an already composed request, logging the URL and resulting status.
pub fn send<T: Transport + ?Sized>(
    transport: &T,
    request: &HttpRequest,
) -> Result<HttpResponse, TransportError> {
    debug!("request url: {}", request.url);
    match transport.execute(request) {
        Ok(response) => {
            debug!("response status: {} {}", response.status, response.status_text);
            Ok(response)
        }
        Err(err) => {
            warn!("request to {} failed: {err}", request.url);
            Err(err)
        }
    }
}

/// Compose and send a request in one step.
pub fn execute<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    method: &str,
    headers: Vec<(String, String)>,
    body: Option<String>,
    mode: BodyMode,
) -> Result<HttpResponse, TransportError> {
    let request = HttpRequest::compose(url, method, headers, body, mode).inspect_err(|err| {
        warn!("could not build request: {err}");
    })?;
    send(transport, &request)
}
