//! `HttpAuthGateway` against a local mock server.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use std::time::Duration;
use userdesk_auth::{AuthConfig, AuthGateway, GatewayError, HttpAuthGateway, LoginCredentials};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> HttpAuthGateway {
    HttpAuthGateway::new(&AuthConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn posts_credentials_and_decodes_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "alice", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "firstName": "Alice",
            "lastName": "Liddell",
            "gender": "female",
            "image": "https://example.com/alice.png",
            "token": "token-alice",
            "refreshToken": "unused"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = gateway_for(&server)
        .login(LoginCredentials::new("alice", "secret"))
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.first_name, "Alice");
    assert_eq!(user.token, "token-alice");
}

#[tokio::test]
async fn rejection_uses_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .login(LoginCredentials::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(error, GatewayError::rejected(400, "Invalid credentials"));
    assert_eq!(error.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn rejection_without_message_uses_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .login(LoginCredentials::new("alice", "secret"))
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Login request failed: 503 Service Unavailable");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "not-a-number" })))
        .mount(&server)
        .await;

    let error = gateway_for(&server)
        .login(LoginCredentials::new("alice", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Decode(_)));
}

#[tokio::test]
async fn timeout_surfaces_as_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = AuthConfig::new(server.uri()).with_request_timeout(Duration::from_millis(50));
    let error = HttpAuthGateway::new(&config)
        .unwrap()
        .login(LoginCredentials::new("alice", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Transport(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    // Nothing listens on the discard port
    let gateway = HttpAuthGateway::new(&AuthConfig::new("http://127.0.0.1:9")).unwrap();

    let error = gateway
        .login(LoginCredentials::new("alice", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Transport(_)));
    assert!(!error.to_string().is_empty());
}
