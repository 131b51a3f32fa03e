//! End-to-end tests for the HTTP surface against a mock completion
//! endpoint.

use std::sync::Arc;

use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    test, web, App, Error,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use llm_gateway::LlmClient;
use settings_manager::{FileSettingsStorage, SettingsManager};
use web_service::server::{app_config, AppState};
use web_service::sessions::SessionRegistry;

async fn test_app() -> (
    impl Service<Request, Response = ServiceResponse, Error = Error>,
    MockServer,
    TempDir,
) {
    let mock_server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();

    let settings = SettingsManager::new(FileSettingsStorage::new(data_dir.path()))
        .await
        .unwrap();

    let app_state = web::Data::new(AppState {
        gateway: Arc::new(LlmClient::new()),
        settings,
        sessions: SessionRegistry::new(),
    });

    let app = test::init_service(App::new().app_data(app_state).configure(app_config)).await;
    (app, mock_server, data_dir)
}

fn completion_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

async fn mount_completion(mock_server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply(content))
        .mount(mock_server)
        .await;
}

async fn create_session(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
) -> String {
    let req = test::TestRequest::post().uri("/sessions").to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["sessionId"].as_str().unwrap().to_string()
}

async fn add_message(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    session: &str,
    sender: &str,
    text: &str,
) -> u64 {
    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{session}/messages"))
        .set_json(json!({ "sender": sender, "text": text }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["messageId"].as_u64().unwrap()
}

async fn snapshot(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    session: &str,
) -> Value {
    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{session}"))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

#[actix_web::test]
async fn health_endpoint_responds() {
    let (app, _mock, _dir) = test_app().await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn relay_rejects_empty_message_and_history() {
    let (app, _mock, _dir) = test_app().await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({ "message": "", "history": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Message is required");
}

#[actix_web::test]
async fn relay_returns_reply_from_upstream() {
    let (app, mock_server, _dir) = test_app().await;
    mount_completion(&mock_server, "Hello!").await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({
            "message": "hi",
            "history": [],
            "llmBaseUrl": mock_server.uri()
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["reply"], "Hello!");
}

#[actix_web::test]
async fn relay_accepts_history_without_new_message() {
    let (app, mock_server, _dir) = test_app().await;
    mount_completion(&mock_server, "continuing").await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({
            "message": "",
            "history": [
                { "sender": "user", "text": "hi" },
                { "sender": "assistant", "text": "hello" }
            ],
            "llmBaseUrl": mock_server.uri()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn relay_prepends_system_prompt_exactly_once() {
    let (app, mock_server, _dir) = test_app().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "hi" }
            ]
        })))
        .respond_with(completion_reply("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({
            "message": "hi",
            "history": [],
            "llmBaseUrl": mock_server.uri(),
            "systemPrompt": "  be brief  "
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn relay_upstream_failure_uses_fixed_error_body() {
    let (app, mock_server, _dir) = test_app().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({
            "message": "hi",
            "history": [],
            "llmBaseUrl": mock_server.uri()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to get response from LLM" }));
}

#[actix_web::test]
async fn session_messages_can_be_edited_toggled_and_removed() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;

    let first = add_message(&app, &session, "user", "hello").await;
    let second = add_message(&app, &session, "assistant", "world").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/sessions/{session}/messages/{first}"))
        .set_json(json!({ "text": "edited", "sender": "assistant", "included": false }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["text"], "edited");
    assert_eq!(updated["sender"], "assistant");
    assert_eq!(updated["included"], false);

    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{session}/messages/{second}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let snapshot = snapshot(&app, &session).await;
    let messages = snapshot["branches"][0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["id"].as_u64().unwrap(), first);
}

#[actix_web::test]
async fn patching_unknown_message_is_not_found() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/sessions/{session}/messages/999"))
        .set_json(json!({ "included": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn branching_copies_prefix_and_switches_current() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;

    add_message(&app, &session, "user", "m0").await;
    let second = add_message(&app, &session, "assistant", "m1").await;
    add_message(&app, &session, "user", "m2").await;

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{session}/branches"))
        .set_json(json!({ "fromMessageId": second }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let new_branch = created["branchId"].as_u64().unwrap();

    let snapshot = snapshot(&app, &session).await;
    assert_eq!(snapshot["current"].as_u64().unwrap(), new_branch);
    let branches = snapshot["branches"].as_array().unwrap();
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0]["messages"].as_array().unwrap().len(), 3);
    assert_eq!(branches[1]["messages"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn deleting_current_branch_reassigns_and_sole_branch_resets() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;
    add_message(&app, &session, "user", "kept").await;

    let before = snapshot(&app, &session).await;
    let original_branch = before["current"].as_u64().unwrap();

    // Branch off, then delete the new (current) branch.
    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{session}/branches"))
        .set_json(json!({}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let new_branch = created["branchId"].as_u64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{session}/branches/{new_branch}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let after = snapshot(&app, &session).await;
    assert_eq!(after["current"].as_u64().unwrap(), original_branch);
    assert_eq!(after["branches"].as_array().unwrap().len(), 1);

    // Deleting the sole branch clears it under a fresh id.
    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{session}/branches/{original_branch}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let reset = snapshot(&app, &session).await;
    let branches = reset["branches"].as_array().unwrap();
    assert_eq!(branches.len(), 1);
    assert_ne!(branches[0]["id"].as_u64().unwrap(), original_branch);
    assert!(branches[0]["messages"].as_array().unwrap().is_empty());
    assert_eq!(reset["current"], branches[0]["id"]);
}

#[actix_web::test]
async fn switching_to_unknown_branch_is_not_found() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;

    let req = test::TestRequest::put()
        .uri(&format!("/sessions/{session}/branches/current"))
        .set_json(json!({ "branchId": 42 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn transcript_filters_excluded_messages() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;

    add_message(&app, &session, "user", "kept").await;
    let excluded = add_message(&app, &session, "assistant", "dropped").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/sessions/{session}/messages/{excluded}"))
        .set_json(json!({ "included": false }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{session}/transcript"))
        .to_request();
    let transcript: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        transcript,
        json!([{ "role": "user", "content": "kept" }])
    );
}

#[actix_web::test]
async fn send_appends_user_message_and_reply() {
    let (app, mock_server, _dir) = test_app().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{ "role": "user", "content": "hi" }]
        })))
        .respond_with(completion_reply("hello"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = create_session(&app).await;
    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{session}/send"))
        .set_json(json!({ "message": "hi", "llmBaseUrl": mock_server.uri() }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["reply"], "hello");

    let snapshot = snapshot(&app, &session).await;
    let messages = snapshot["branches"][0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], "user");
    assert_eq!(messages[0]["text"], "hi");
    assert_eq!(messages[1]["sender"], "assistant");
    assert_eq!(messages[1]["text"], "hello");
}

#[actix_web::test]
async fn failed_send_keeps_the_optimistic_user_message() {
    let (app, mock_server, _dir) = test_app().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let session = create_session(&app).await;
    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{session}/send"))
        .set_json(json!({ "message": "hi", "llmBaseUrl": mock_server.uri() }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to get response from LLM");

    let snapshot = snapshot(&app, &session).await;
    let messages = snapshot["branches"][0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "user");
}

#[actix_web::test]
async fn send_with_nothing_selected_short_circuits_before_the_gateway() {
    let (app, mock_server, _dir) = test_app().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion_reply("unreachable"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = create_session(&app).await;
    let excluded = add_message(&app, &session, "user", "hidden").await;
    let req = test::TestRequest::patch()
        .uri(&format!("/sessions/{session}/messages/{excluded}"))
        .set_json(json!({ "included": false }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/sessions/{session}/send"))
        .set_json(json!({ "message": "", "llmBaseUrl": mock_server.uri() }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn settings_round_trip_with_reset_and_trim() {
    let (app, _mock, _dir) = test_app().await;

    let req = test::TestRequest::get().uri("/settings").to_request();
    let defaults: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(defaults["llmBaseUrl"], "http://localhost:9090/v1");
    assert_eq!(defaults["systemPrompt"], "");
    assert_eq!(defaults["theme"], "light");

    let req = test::TestRequest::put()
        .uri("/settings")
        .set_json(json!({
            "llmBaseUrl": "",
            "systemPrompt": "  stay focused  ",
            "theme": "dark"
        }))
        .to_request();
    let saved: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(saved["llmBaseUrl"], "http://localhost:9090/v1");
    assert_eq!(saved["systemPrompt"], "stay focused");
    assert_eq!(saved["theme"], "dark");

    let req = test::TestRequest::get().uri("/settings").to_request();
    let reloaded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reloaded["systemPrompt"], "stay focused");
    assert_eq!(reloaded["theme"], "dark");
}

#[actix_web::test]
async fn unknown_session_is_not_found() {
    let (app, _mock, _dir) = test_app().await;

    let req = test::TestRequest::get()
        .uri("/sessions/00000000-0000-0000-0000-000000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn deleted_session_is_gone() {
    let (app, _mock, _dir) = test_app().await;
    let session = create_session(&app).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/sessions/{session}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/sessions/{session}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
