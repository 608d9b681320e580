#![cfg(feature = "server")]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use stackexplain::core::links::{LinkPolicy, NoopLinkVerifier};
use stackexplain::core::ChatCompletion;
use stackexplain::server::{create_router, AppState, HealthData};
use stackexplain::{Explainer, ExplainerSettings, Explanation};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Echoes the requested model back as the error type.
struct EchoModel {
    models: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatCompletion for EchoModel {
    async fn complete(&self, model: &str, _prompt: &str) -> stackexplain::Result<String> {
        self.models.lock().unwrap().push(model.to_string());
        Ok(serde_json::json!({
            "error_type": model,
            "explanation": "echo",
            "suggested_fix": "none",
            "relevant_links": ["https://docs.python.org/3/"]
        })
        .to_string())
    }
}

fn router() -> (axum::Router, Arc<EchoModel>) {
    let chat = Arc::new(EchoModel {
        models: Mutex::new(Vec::new()),
    });
    let client: Arc<dyn ChatCompletion> = chat.clone();
    let explainer = Explainer::new(
        client,
        Box::new(NoopLinkVerifier),
        ExplainerSettings {
            model: "deepseek/deepseek-chat-v3-0324:free".to_string(),
            retries: 1,
            retry_base_delay: Duration::from_millis(1),
            link_policy: LinkPolicy::default(),
        },
    );
    (create_router(Arc::new(AppState::new(explainer))), chat)
}

fn explain_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/explain")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_explain_uses_default_model() {
    let (app, chat) = router();

    let response = app
        .oneshot(explain_request(serde_json::json!({"error": "NameError: name 'x' is not defined"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: Explanation = read_json(response).await;
    assert_eq!(result.error_type, "deepseek/deepseek-chat-v3-0324:free");
    assert_eq!(result.relevant_links, vec!["https://docs.python.org/3/"]);
    assert_eq!(chat.models.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_explain_accepts_model_alias() {
    let (app, _chat) = router();

    let response = app
        .oneshot(explain_request(serde_json::json!({"error": "oops", "model": "gemini"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: Explanation = read_json(response).await;
    assert_eq!(result.error_type, "google/gemini-2.0-flash-exp:free");
}

#[tokio::test]
async fn test_blank_error_is_rejected() {
    let (app, chat) = router();

    let response = app
        .oneshot(explain_request(serde_json::json!({"error": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = read_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(chat.models.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_model_is_rejected() {
    let (app, _chat) = router();

    let response = app
        .oneshot(explain_request(serde_json::json!({"error": "oops", "model": "llama"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (app, _chat) = router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthData = read_json(response).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_cors_preflight_is_allowed() {
    let (app, _chat) = router();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/explain")
                .header("Origin", "http://localhost:5173")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
