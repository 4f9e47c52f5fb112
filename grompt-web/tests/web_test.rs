//! # Form endpoint tests
//!
//! Spawns the router on a random port with a `wiremock` server standing in for the Groq API.

use grompt::Settings;
use grompt_web::{create_router, AppState, MISSING_API_KEY, MISSING_PROMPT};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

struct TestApp {
    address: String,
    client: Client,
    groq: MockServer,
}

impl TestApp {
    async fn spawn() -> Self {
        let groq = MockServer::start().await;
        let base_url = groq.uri();
        let settings = Settings::from_lookup(|key| match key {
            "GROQ_BASE_URL" => Some(base_url.clone()),
            _ => None,
        })
        .unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        let app = create_router(AppState::new(settings));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            address,
            client: Client::new(),
            groq,
        }
    }

    async fn submit(&self, fields: &[(&str, &str)]) -> (StatusCode, String) {
        let response = self
            .client
            .post(format!("{}/optimize", self.address))
            .form(fields)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn index_and_health() {
    let app = TestApp::spawn().await;

    let page = app.client.get(format!("{}/", app.address)).send().await.unwrap();
    assert!(page.status().is_success());
    let body = page.text().await.unwrap();
    assert!(body.contains("Grompt - Prompt Optimizer"));
    assert!(body.contains("Advanced (Prompt Canvas)"));
    assert!(body.contains("llama3-groq-8b-8192-tool-use-preview"));

    let health = app.client.get(format!("{}/health", app.address)).send().await.unwrap();
    assert_eq!("OK", health.text().await.unwrap());
}

#[tokio::test]
async fn submission_without_api_key_is_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app.submit(&[("api_key", ""), ("user_prompt", "hello")]).await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
    assert!(body.contains(MISSING_API_KEY));
    assert!(app.groq.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn submission_without_prompt_warns() {
    let app = TestApp::spawn().await;
    let (status, body) = app.submit(&[("api_key", "gsk_test"), ("user_prompt", ""), ("canvas_prompt", "")]).await;
    assert_eq!(StatusCode::OK, status);
    assert!(body.contains(MISSING_PROMPT));
    assert!(app.groq.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn basic_mode_shows_optimized_prompt() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer gsk_form_key"))
        .and(body_string_contains("User request: \\\"write a haiku\\\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Write a haiku about <autumn> & rain. ")))
        .expect(1)
        .mount(&app.groq)
        .await;

    let (status, body) = app
        .submit(&[
            ("api_key", "gsk_form_key"),
            ("user_prompt", "write a haiku"),
            ("model", "llama3-8b-8192"),
            ("temperature", "0.3"),
            ("max_tokens", "512"),
        ])
        .await;
    assert_eq!(StatusCode::OK, status);
    assert!(body.contains("Optimized Prompt:"));
    assert!(body.contains("Write a haiku about &lt;autumn&gt; &amp; rain."));
    assert!(!body.contains("gsk_form_key"));
}

#[tokio::test]
async fn basic_mode_keeps_prompt_whitespace() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_string_contains("User request: \\\"  write a haiku\\n\\\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Write a haiku.")))
        .expect(1)
        .mount(&app.groq)
        .await;

    let (status, body) = app.submit(&[("api_key", "gsk_test"), ("user_prompt", "  write a haiku\n")]).await;
    assert_eq!(StatusCode::OK, status);
    assert!(body.contains("Write a haiku."));
}

#[tokio::test]
async fn canvas_prompt_selects_advanced_mode() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(body_string_contains("You are a expert technical writer focused on delivering results for software developers."))
        .and(body_string_contains("- Outline the API\\n- Add examples"))
        .and(body_string_contains("References: None"))
        .and(body_string_contains("- Format: Markdown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Canvas optimized")))
        .expect(1)
        .mount(&app.groq)
        .await;

    let (status, body) = app
        .submit(&[
            ("api_key", "gsk_test"),
            ("user_prompt", "this one is ignored"),
            ("persona", "expert technical writer"),
            ("audience", "software developers"),
            ("task", "Document the client"),
            ("steps", "Outline the API\n\nAdd examples\n"),
            ("references", ""),
            ("output_format", "Markdown"),
            ("tonality", "technical"),
            ("canvas_prompt", "document it"),
        ])
        .await;
    assert_eq!(StatusCode::OK, status);
    assert!(body.contains("Canvas optimized"));
}

#[tokio::test]
async fn upstream_failure_shows_generic_error() {
    let app = TestApp::spawn().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API Key",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        })))
        .mount(&app.groq)
        .await;

    let (status, body) = app.submit(&[("api_key", "gsk_bad"), ("user_prompt", "hello")]).await;
    assert_eq!(StatusCode::BAD_GATEWAY, status);
    assert!(body.contains("Prompt engineering error:"));
    assert!(body.contains("Invalid API Key"));
}

#[tokio::test]
async fn out_of_range_settings_are_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .submit(&[("api_key", "gsk_test"), ("user_prompt", "hello"), ("temperature", "1.7")])
        .await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status);
    assert!(body.contains("Temperature must be a number between 0 and 1."));
    assert!(app.groq.received_requests().await.unwrap().is_empty());
}
