use serde_json::json;
use surepolicy_backend::error::{AppError, ErrorKind};
use surepolicy_backend::message::ChatRequest;
use surepolicy_backend::services::gemini::GeminiClient;
use surepolicy_backend::services::relay::relay;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "test-model";
const GENERATE_PATH: &str = "/v1beta/models/test-model:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(server.uri(), MODEL)
}

#[tokio::test]
async fn returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({
            "contents": [{ "parts": [{ "text": "ctx\n\nUser Query: Hi" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = relay(&client, Some("test-key"), &ChatRequest::new("Hi", "ctx"))
        .await
        .unwrap();

    assert_eq!(reply, "Hello");
}

#[tokio::test]
async fn upstream_error_object_is_propagated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = relay(&client, Some("test-key"), &ChatRequest::new("Hi", "ctx"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(err.to_string().contains("quota exceeded"));
}

#[tokio::test]
async fn empty_message_makes_no_outbound_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = relay(&client, Some("test-key"), &ChatRequest::new("", "anything"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn missing_credential_makes_no_outbound_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = relay(&client, None, &ChatRequest::new("Hi", "ctx"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn malformed_body_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = relay(&client, Some("test-key"), &ChatRequest::new("Hi", "ctx"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Transport(_)));
}

#[tokio::test]
async fn missing_candidates_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = relay(&client, Some("test-key"), &ChatRequest::new("Hi", "ctx"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn network_failure_hides_the_credential() {
    // Nothing listens on port 1.
    let client = GeminiClient::new("http://127.0.0.1:1", MODEL);
    let err = relay(&client, Some("secret-key-123"), &ChatRequest::new("Hi", "ctx"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.to_string().contains("secret-key-123"));
}
