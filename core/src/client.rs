//! Service client for the Zorya WhatsApp API.
//!
//! # Design
//! Each operation is split into a pure `build_*` method that produces an
//! `HttpRequest` and a pure `parse_*` method that consumes an `HttpResponse`.
//! `login` and `send_template_message` drive both halves through the injected
//! `Transport`, so hosts that do their own I/O can use the builders directly
//! and tests can substitute a stub transport.
//!
//! The client starts unauthenticated and moves to authenticated on the first
//! successful login. The token is never refreshed or dropped. Operations that
//! may log in take `&mut self`, so a shared client cannot race on first use.

use log::info;
use serde_json::{Map, Value};

use crate::config::Credentials;
use crate::error::ZoryaError;
use crate::http::{self, BodyMode, HttpRequest, HttpResponse, Transport};
use crate::observer::{LogObserver, Observer};
use crate::transport::UreqTransport;
use crate::types::{LoginRequest, LoginResponse, WhatsAppMessageRequest, WhatsAppMessageResponse};

const LOGIN_PATH: &str = "/api/v1/User/login";
const MESSAGES_PATH: &str = "/api/v1/WhatsApp/messages";

/// Client for the Zorya login and WhatsApp message endpoints.
pub struct ZoryaClient<T = UreqTransport> {
    credentials: Credentials,
    token: Option<String>,
    transport: T,
    observer: Option<Box<dyn Observer>>,
}

impl ZoryaClient<UreqTransport> {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self::with_transport(Credentials::new(base_url, username, password), UreqTransport::new())
    }
}

impl<T: Transport> ZoryaClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            token: None,
            transport,
            observer: Some(Box::new(LogObserver)),
        }
    }

    /// Replace the default `LogObserver`.
    pub fn with_observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn without_observer(mut self) -> Self {
        self.observer = None;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_login_request(&self) -> Result<HttpRequest, ZoryaError> {
        if !self.credentials.is_complete() {
            return Err(ZoryaError::MissingCredentials);
        }
        let payload = LoginRequest {
            username: self.credentials.username.clone(),
            user_password: self.credentials.password.clone(),
        };
        let body = to_json(&payload)?;
        let url = format!("{}{LOGIN_PATH}", self.credentials.base_url);
        Ok(HttpRequest::compose(&url, "POST", Vec::new(), Some(body), BodyMode::Json)?)
    }

    /// Extract the token from a login response.
    pub fn parse_login_response(&self, response: &HttpResponse) -> Result<String, ZoryaError> {
        if response.status != 200 {
            return Err(ZoryaError::LoginStatus {
                status: response.status,
                body: response.body.clone(),
            });
        }
        let login: LoginResponse = from_json(&response.body)?;
        if !login.success {
            return Err(ZoryaError::LoginRejected {
                errors: login.errors,
            });
        }
        if login.data.is_empty() {
            return Err(ZoryaError::NoToken);
        }
        Ok(login.data)
    }

    /// Obtain a token unless one is already held.
    ///
    /// Fails with `MissingCredentials` before any I/O when the username or
    /// password is empty.
    pub fn login(&mut self) -> Result<(), ZoryaError> {
        if self.token.is_some() {
            return Ok(());
        }
        let request = self.build_login_request()?;
        let response = http::send(&self.transport, &request)?;
        let token = self.parse_login_response(&response)?;
        info!("authenticated as {}", self.credentials.username);
        self.token = Some(token);
        Ok(())
    }

    pub fn build_send_template_message(
        &self,
        token: &str,
        message: &WhatsAppMessageRequest,
    ) -> Result<HttpRequest, ZoryaError> {
        let body = to_json(message)?;
        let url = format!("{}{MESSAGES_PATH}", self.credentials.base_url);
        let headers = vec![("Authorization".to_string(), format!("Bearer {token}"))];
        Ok(HttpRequest::compose(&url, "POST", headers, Some(body), BodyMode::Json)?)
    }

    /// Decode a messages response.
    ///
    /// The body is decoded before the status is checked, so an undecodable
    /// error response is a `Deserialization` error. A decodable response with
    /// a status other than 200 or 201 becomes `SendRejected`, which carries
    /// the decoded response.
    pub fn parse_send_template_message(
        &self,
        response: &HttpResponse,
    ) -> Result<WhatsAppMessageResponse, ZoryaError> {
        let decoded: WhatsAppMessageResponse = from_json(&response.body)?;
        if response.status != 200 && response.status != 201 {
            return Err(ZoryaError::SendRejected {
                status: response.status,
                response: Box::new(decoded),
            });
        }
        Ok(decoded)
    }

    /// Send a template message, logging in first if no token is held.
    ///
    /// Login failures are returned unchanged and no send is attempted.
    pub fn send_template_message(
        &mut self,
        message: &WhatsAppMessageRequest,
    ) -> Result<WhatsAppMessageResponse, ZoryaError> {
        self.login()?;
        let token = self.token.as_deref().ok_or(ZoryaError::NoToken)?;
        let request = self.build_send_template_message(token, message)?;

        self.notify(|o| o.on_request(&request));
        let result = http::send(&self.transport, &request)
            .map_err(ZoryaError::from)
            .and_then(|response| {
                self.notify(|o| o.on_response(&response));
                self.parse_send_template_message(&response)
            });

        match &result {
            Ok(sent) => self.notify(|o| o.on_sent(sent)),
            Err(err) => self.notify(|o| o.on_failure(err)),
        }
        result
    }

    /// Call an endpoint authenticated by `x-api-key` and return the `data`
    /// object of its JSON response.
    ///
    /// Non-2xx responses fail with the `message` field of the body, falling
    /// back to the status text.
    pub fn execute_with_api_key(
        &self,
        url: &str,
        api_key: &str,
        method: &str,
        body: &Value,
    ) -> Result<Map<String, Value>, ZoryaError> {
        let headers = vec![("x-api-key".to_string(), api_key.to_string())];
        let response = http::execute(
            &self.transport,
            url,
            method,
            headers,
            Some(to_json(body)?),
            BodyMode::Json,
        )?;

        let mut decoded: Map<String, Value> = from_json(&response.body)?;
        if !response.is_success() {
            let message = decoded
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(response.status_text.as_str())
                .to_string();
            return Err(ZoryaError::ApiKeyRejected {
                status: response.status,
                message,
            });
        }
        match decoded.remove("data") {
            Some(Value::Object(data)) => Ok(data),
            _ => Err(ZoryaError::Deserialization(
                "response has no data object".to_string(),
            )),
        }
    }

    fn notify(&self, f: impl FnOnce(&dyn Observer)) {
        if let Some(observer) = &self.observer {
            f(observer.as_ref());
        }
    }
}

impl<T> std::fmt::Debug for ZoryaClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoryaClient")
            .field("credentials", &self.credentials)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

fn to_json<S: serde::Serialize + ?Sized>(value: &S) -> Result<String, ZoryaError> {
    serde_json::to_string(value).map_err(|e| ZoryaError::Serialization(e.to_string()))
}

fn from_json<D: serde::de::DeserializeOwned>(body: &str) -> Result<D, ZoryaError> {
    serde_json::from_str(body).map_err(|e| ZoryaError::Deserialization(e.to_string()))
}
