//! Error types for the Zorya client.
//!
//! # Design
//! Every variant belongs to one of four kinds (see `ErrorKind`): missing
//! configuration, a transport failure with no response, a response whose body
//! could not be understood, or a well-formed rejection from the provider.
//! A rejected send keeps the decoded provider response so callers can read
//! the provider's error detail.

use thiserror::Error;

use crate::types::WhatsAppMessageResponse;

/// Failures where no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be constructed locally. No I/O was attempted.
    #[error("invalid request for url {url}")]
    InvalidRequest { url: String },

    /// The request was sent but the exchange failed before a full response
    /// was read.
    #[error("transport failure: {0}")]
    Network(String),
}

/// Coarse classification of `ZoryaError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Protocol,
    Remote,
}

/// Errors returned by `ZoryaClient`.
#[derive(Debug, Error)]
pub enum ZoryaError {
    /// Username or password is empty.
    #[error("Zorya credentials not configured")]
    MissingCredentials,

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Deserialization(String),

    /// Login answered with something other than 200.
    #[error("login failed with status: {status}")]
    LoginStatus { status: u16, body: String },

    /// Login answered 200 but flagged the attempt as unsuccessful.
    #[error("login failed: {errors}")]
    LoginRejected { errors: serde_json::Value },

    /// Login reported success without issuing a token.
    #[error("no token received from Zorya login")]
    NoToken,

    /// The messages endpoint answered with neither 200 nor 201.
    #[error("send message failed with status: {status}")]
    SendRejected {
        status: u16,
        response: Box<WhatsAppMessageResponse>,
    },

    /// An api-key authenticated call answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    ApiKeyRejected { status: u16, message: String },
}

impl ZoryaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZoryaError::MissingCredentials => ErrorKind::Configuration,
            ZoryaError::Transport(_) => ErrorKind::Transport,
            ZoryaError::Serialization(_) | ZoryaError::Deserialization(_) => ErrorKind::Protocol,
            ZoryaError::LoginStatus { .. }
            | ZoryaError::LoginRejected { .. }
            | ZoryaError::NoToken
            | ZoryaError::SendRejected { .. }
            | ZoryaError::ApiKeyRejected { .. } => ErrorKind::Remote,
        }
    }

    /// The decoded provider response carried by a rejected send.
    pub fn response(&self) -> Option<&WhatsAppMessageResponse> {
        match self {
            ZoryaError::SendRejected { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// HTTP status code, when the error came from a received response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ZoryaError::LoginStatus { status, .. }
            | ZoryaError::SendRejected { status, .. }
            | ZoryaError::ApiKeyRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
