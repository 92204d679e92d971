use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Template name the mock rejects with 400.
pub const INVALID_TEMPLATE: &str = "invalid";
/// Template name the mock answers with a plain-text 500.
pub const FAILING_TEMPLATE: &str = "crash";

/// Credentials the mock accepts.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub username: String,
    pub password: String,
}

impl MockConfig {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// `MOCK_USERNAME` / `MOCK_PASSWORD`, defaulting to `demo` / `secret`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            username: std::env::var("MOCK_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("MOCK_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self::new("demo", "secret")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub username: String,
    #[serde(default)]
    pub user_password: String,
}

/// Request counters, served at `GET /stats`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub logins: usize,
    pub sends: usize,
    pub last_message: Option<Value>,
}

struct MockState {
    config: MockConfig,
    tokens: RwLock<HashSet<String>>,
    logins: AtomicUsize,
    sends: AtomicUsize,
    last_message: RwLock<Option<Value>>,
}

type Shared = Arc<MockState>;

pub fn app(config: MockConfig) -> Router {
    let state: Shared = Arc::new(MockState {
        config,
        tokens: RwLock::new(HashSet::new()),
        logins: AtomicUsize::new(0),
        sends: AtomicUsize::new(0),
        last_message: RwLock::new(None),
    });
    Router::new()
        .route("/api/v1/User/login", post(login))
        .route("/api/v1/WhatsApp/messages", post(send_message))
        .route("/stats", get(stats))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

fn envelope(success: bool, errors: Value, data: Value) -> Json<Value> {
    Json(json!({
        "success": success,
        "errors": errors,
        "detailedErrors": [],
        "data": data,
    }))
}

async fn login(State(state): State<Shared>, Json(input): Json<LoginBody>) -> (StatusCode, Json<Value>) {
    state.logins.fetch_add(1, Ordering::SeqCst);
    if input.username != state.config.username || input.user_password != state.config.password {
        info!("rejected login for {}", input.username);
        return (
            StatusCode::UNAUTHORIZED,
            envelope(false, json!("invalid credentials"), Value::Null),
        );
    }
    let token = format!("mock-{}", Uuid::new_v4());
    state.tokens.write().await.insert(token.clone());
    info!("issued token for {}", input.username);
    (StatusCode::OK, envelope(true, Value::Null, json!(token)))
}

async fn send_message(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(message): Json<Value>,
) -> Response {
    state.sends.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    let authorized = match bearer {
        Some(token) => state.tokens.read().await.contains(token),
        None => false,
    };
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            envelope(false, json!("unauthorized"), Value::Null),
        )
            .into_response();
    }

    let template = message["content"]["templateName"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    *state.last_message.write().await = Some(message);
    info!("send request for template {template:?}");

    match template.as_str() {
        "" | INVALID_TEMPLATE => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "errors": "invalid template", "detailedErrors": []})),
        )
            .into_response(),
        FAILING_TEMPLATE => (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response(),
        _ => (
            StatusCode::CREATED,
            envelope(
                true,
                Value::Null,
                json!({"transactionId": Uuid::new_v4().to_string()}),
            ),
        )
            .into_response(),
    }
}

async fn stats(State(state): State<Shared>) -> Json<Stats> {
    Json(Stats {
        logins: state.logins.load(Ordering::SeqCst),
        sends: state.sends.load(Ordering::SeqCst),
        last_message: state.last_message.read().await.clone(),
    })
}
