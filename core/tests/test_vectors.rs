//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use zorya_client::{HttpMethod, HttpRequest, HttpResponse, WhatsAppMessageRequest, ZoryaClient, ZoryaError};

const BASE_URL: &str = "http://localhost:3000";

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    s.parse().unwrap_or_else(|e| panic!("{e}"))
}

/// Name of the error variant, as written in the vectors.
fn error_name(err: &ZoryaError) -> &'static str {
    match err {
        ZoryaError::MissingCredentials => "MissingCredentials",
        ZoryaError::Transport(_) => "Transport",
        ZoryaError::Serialization(_) => "Serialization",
        ZoryaError::Deserialization(_) => "Deserialization",
        ZoryaError::LoginStatus { .. } => "LoginStatus",
        ZoryaError::LoginRejected { .. } => "LoginRejected",
        ZoryaError::NoToken => "NoToken",
        ZoryaError::SendRejected { .. } => "SendRejected",
        ZoryaError::ApiKeyRejected { .. } => "ApiKeyRejected",
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        status_text: String::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[test]
fn login_test_vectors() {
    let raw = include_str!("../../test-vectors/login.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let creds = &case["credentials"];
        let c = ZoryaClient::new(
            BASE_URL,
            creds["username"].as_str().unwrap(),
            creds["password"].as_str().unwrap(),
        );

        // Verify build
        let req = c.build_login_request().unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let expected = &case["expected_result"];
        match c.parse_login_response(&simulated(case)) {
            Ok(token) => assert_eq!(token, expected["token"].as_str().unwrap(), "{name}: token"),
            Err(err) => {
                assert_eq!(error_name(&err), expected["error"].as_str().unwrap(), "{name}: error");
                if let Some(status) = expected["status"].as_u64() {
                    assert_eq!(err.status(), Some(status as u16), "{name}: status");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Send template message
// ---------------------------------------------------------------------------

#[test]
fn send_message_test_vectors() {
    let raw = include_str!("../../test-vectors/send_message.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = ZoryaClient::new(BASE_URL, "demo", "secret");
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let token = case["token"].as_str().unwrap();
        let input: WhatsAppMessageRequest = serde_json::from_value(case["input"].clone()).unwrap();

        // Verify build
        let req = c.build_send_template_message(token, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let expected = &case["expected_result"];
        match c.parse_send_template_message(&simulated(case)) {
            Ok(resp) => assert_eq!(
                resp.data.transaction_id,
                expected["transactionId"].as_str().unwrap(),
                "{name}: transaction id"
            ),
            Err(err) => {
                assert_eq!(error_name(&err), expected["error"].as_str().unwrap(), "{name}: error");
                if let Some(status) = expected["status"].as_u64() {
                    assert_eq!(err.status(), Some(status as u16), "{name}: status");
                }
                if let Some(errors) = expected.get("errors") {
                    let detail = err.response().expect("rejected send keeps the response");
                    assert_eq!(&detail.errors, errors, "{name}: provider errors");
                }
            }
        }
    }
}
