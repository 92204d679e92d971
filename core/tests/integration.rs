//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port, then drives
//! `ZoryaClient` over real HTTP with the default `UreqTransport`. The mock's
//! `/stats` endpoint reports how many login and send calls it received.

use mock_server::{MockConfig, Stats, FAILING_TEMPLATE, INVALID_TEMPLATE};
use zorya_client::{
    http, BodyMode, ErrorKind, TemplateBody, TransportError, UreqTransport, WhatsAppMessageRequest,
    ZoryaClient, ZoryaError,
};

/// Start the mock server in a background thread and return its base URL.
fn start_server(config: MockConfig) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, config).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn stats(base_url: &str) -> Stats {
    let response = http::execute(
        &UreqTransport::new(),
        &format!("{base_url}/stats"),
        "GET",
        Vec::new(),
        None,
        BodyMode::Raw,
    )
    .unwrap();
    assert_eq!(response.status, 200);
    serde_json::from_str(&response.body).unwrap()
}

fn message(template: &str) -> WhatsAppMessageRequest {
    WhatsAppMessageRequest::template(
        "5215500000000",
        "5215511111111",
        template,
        "es_MX",
        TemplateBody::positional(["Ana", "#1042"]),
    )
}

#[test]
fn send_logs_in_once_and_reuses_token() {
    let base_url = start_server(MockConfig::default());
    let mut client = ZoryaClient::new(&base_url, "demo", "secret");

    // Step 1: first send logs in on demand.
    let first = client.send_template_message(&message("order_update")).unwrap();
    assert!(first.success);
    assert!(!first.data.transaction_id.is_empty());
    let token = client.token().unwrap().to_string();

    // Step 2: second send reuses the cached token.
    let second = client.send_template_message(&message("order_update")).unwrap();
    assert_ne!(first.data.transaction_id, second.data.transaction_id);
    assert_eq!(client.token(), Some(token.as_str()));

    // Step 3: the server saw one login and two sends.
    let counters = stats(&base_url);
    assert_eq!(counters.logins, 1);
    assert_eq!(counters.sends, 2);

    // Step 4: the payload arrived intact.
    let last = counters.last_message.unwrap();
    assert_eq!(last["content"]["templateName"], "order_update");
    assert_eq!(last["content"]["templateData"]["body"]["placeholders"][1], "#1042");
    assert!(last.get("trackingMessage").is_none());
}

#[test]
fn explicit_login_is_idempotent() {
    let base_url = start_server(MockConfig::default());
    let mut client = ZoryaClient::new(&base_url, "demo", "secret");

    client.login().unwrap();
    client.login().unwrap();

    assert!(client.is_authenticated());
    assert_eq!(stats(&base_url).logins, 1);
}

#[test]
fn wrong_password_blocks_send() {
    let base_url = start_server(MockConfig::default());
    let mut client = ZoryaClient::new(&base_url, "demo", "wrong");

    let err = client.send_template_message(&message("order_update")).unwrap_err();
    assert!(matches!(err, ZoryaError::LoginStatus { status: 401, .. }));
    assert!(!client.is_authenticated());

    let counters = stats(&base_url);
    assert_eq!(counters.logins, 1);
    assert_eq!(counters.sends, 0);
}

#[test]
fn missing_credentials_never_reach_the_server() {
    let base_url = start_server(MockConfig::default());
    let mut client = ZoryaClient::new(&base_url, "demo", "");

    let err = client.send_template_message(&message("order_update")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(stats(&base_url), Stats::default());
}

#[test]
fn rejected_template_returns_provider_detail() {
    let base_url = start_server(MockConfig::default());
    let mut client = ZoryaClient::new(&base_url, "demo", "secret");

    let err = client.send_template_message(&message(INVALID_TEMPLATE)).unwrap_err();
    assert!(matches!(err, ZoryaError::SendRejected { status: 400, .. }));
    let detail = err.response().unwrap();
    assert!(!detail.success);
    assert_eq!(detail.errors, "invalid template");
}

#[test]
fn plain_text_server_error_is_a_decode_failure() {
    let base_url = start_server(MockConfig::default());
    let mut client = ZoryaClient::new(&base_url, "demo", "secret");

    let err = client.send_template_message(&message(FAILING_TEMPLATE)).unwrap_err();
    assert!(matches!(err, ZoryaError::Deserialization(_)));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client = ZoryaClient::new(&format!("http://{addr}"), "demo", "secret");
    let err = client.login().unwrap_err();
    assert!(matches!(err, ZoryaError::Transport(TransportError::Network(_))));
}
