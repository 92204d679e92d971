//! Blocking client for the Zorya WhatsApp messaging API.
//!
//! # Overview
//! Logs in with a username and password, caches the issued bearer token for
//! the lifetime of the client, and sends WhatsApp template messages.
//!
//! # Design
//! - `ZoryaClient` owns its credentials, the token and an injected
//!   `Transport`. `UreqTransport` is the default; tests substitute stubs.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`), so the I/O boundary is explicit.
//! - Transport results are typed: status code and body are plain fields and
//!   non-2xx statuses are data, not errors.
//! - Logging goes through the `log` facade via an optional `Observer`.
//! - No retries, token refresh or persistence; callers own those policies.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observer;
pub mod transport;
pub mod types;

pub use client::ZoryaClient;
pub use config::Credentials;
pub use error::{ErrorKind, TransportError, ZoryaError};
pub use http::{BodyMode, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use observer::{LogObserver, Observer};
pub use transport::UreqTransport;
pub use types::{
    CarouselBody, CarouselCard, CarouselHeader, LoginRequest, LoginResponse, TemplateBody,
    TemplateButton, TemplateCarousel, TemplateData, TemplateFooter, TemplateHeader,
    TemplateLimitedTimeOffer, WhatsAppContent, WhatsAppMessageRequest, WhatsAppMessageResData,
    WhatsAppMessageResponse,
};
