//! The HTTP endpoint strategy against a local server.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use clarity::ai::{
    EndpointStrategy, Gateway, GatewayError, GeminiEndpoint, GenerationConfig, Part, ProviderError,
};
use clarity::config::Settings;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Recorded = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn candidate(text: &str) -> Value {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
}

/// `/ok` records the key and body and answers; the others fail in
/// different ways. `/slow` answers only after three seconds.
fn router(recorded: Recorded) -> Router {
    Router::new()
        .route(
            "/ok",
            post(
                move |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| {
                    let recorded = recorded.clone();
                    async move {
                        recorded
                            .lock()
                            .unwrap()
                            .push((query.get("key").cloned(), body));
                        Json(candidate("from secondary"))
                    }
                },
            ),
        )
        .route(
            "/overloaded",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": { "code": 500, "message": "model overloaded" } })),
                )
            }),
        )
        .route("/missing", post(|| async { (StatusCode::NOT_FOUND, "not here") }))
        .route("/garbled", post(|| async { "this is not json" }))
        .route("/empty", post(|| async { Json(json!({ "candidates": [] })) }))
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(candidate("too late"))
            }),
        )
}

fn endpoint(base: &str, path: &str, key: Option<&str>) -> Arc<dyn EndpointStrategy> {
    Arc::new(GeminiEndpoint::new(
        format!("{base}{path}"),
        key.map(str::to_string),
    ))
}

async fn ask(gateway: &Gateway) -> Result<String, GatewayError> {
    gateway
        .generate(vec![Part::text("Summarize")], GenerationConfig::DOCUMENTS)
        .await
}

#[tokio::test]
async fn falls_back_after_a_server_error() {
    let recorded = Recorded::default();
    let base = serve(router(recorded.clone())).await;
    let gateway = Gateway::new(vec![
        endpoint(&base, "/overloaded", None),
        endpoint(&base, "/ok", None),
    ]);

    assert_eq!(ask(&gateway).await.unwrap(), "from secondary");
    assert_eq!(recorded.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn last_failure_message_is_reported() {
    let base = serve(router(Recorded::default())).await;
    let gateway = Gateway::new(vec![
        endpoint(&base, "/overloaded", None),
        endpoint(&base, "/missing", None),
    ]);

    let err = ask(&gateway).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 404");
    assert!(matches!(
        err,
        GatewayError::Endpoint {
            source: ProviderError::Status { status: 404, .. },
            ..
        }
    ));
}

#[tokio::test]
async fn api_error_message_is_preferred_over_status() {
    let base = serve(router(Recorded::default())).await;
    let gateway = Gateway::new(vec![endpoint(&base, "/overloaded", None)]);

    let err = ask(&gateway).await.unwrap_err();
    assert_eq!(err.to_string(), "model overloaded");
}

#[tokio::test]
async fn sends_key_and_camel_case_body() {
    let recorded = Recorded::default();
    let base = serve(router(recorded.clone())).await;
    let gateway = Gateway::new(vec![endpoint(&base, "/ok", Some("test-key"))]);

    ask(&gateway).await.unwrap();

    let (key, body) = recorded.lock().unwrap()[0].clone();
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(
        body,
        json!({
            "contents": [{ "parts": [{ "text": "Summarize" }] }],
            "generationConfig": { "temperature": 0.7, "maxOutputTokens": 4096 }
        })
    );
}

#[tokio::test]
async fn omits_key_when_none_is_configured() {
    let recorded = Recorded::default();
    let base = serve(router(recorded.clone())).await;
    let gateway = Gateway::new(vec![endpoint(&base, "/ok", None)]);

    ask(&gateway).await.unwrap();
    assert_eq!(recorded.lock().unwrap()[0].0, None);
}

#[tokio::test]
async fn undecodable_success_body_counts_as_failure() {
    let base = serve(router(Recorded::default())).await;
    let gateway = Gateway::new(vec![endpoint(&base, "/garbled", None)]);

    let err = ask(&gateway).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Endpoint {
            source: ProviderError::Decode(_),
            ..
        }
    ));
}

#[tokio::test]
async fn missing_candidates_yield_empty_text() {
    let base = serve(router(Recorded::default())).await;
    let gateway = Gateway::new(vec![endpoint(&base, "/empty", None)]);

    assert_eq!(ask(&gateway).await.unwrap(), "");
}

#[tokio::test]
async fn connection_failures_fall_back() {
    let closed = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let base = serve(router(Recorded::default())).await;
    let gateway = Gateway::new(vec![
        endpoint(&closed, "/ok", None),
        endpoint(&base, "/ok", None),
    ]);

    assert_eq!(ask(&gateway).await.unwrap(), "from secondary");
}

#[tokio::test]
async fn settings_drive_endpoint_order_and_key() {
    let recorded = Recorded::default();
    let base = serve(router(recorded.clone())).await;
    let settings = Settings {
        endpoints: vec![format!("{base}/missing"), format!("{base}/ok")],
        api_key: Some("from-settings".to_string()),
        request_timeout_secs: Some(5),
        ..Settings::default()
    };
    let gateway = Gateway::from_settings(&settings).unwrap();

    assert_eq!(gateway.endpoint_names(), ["missing", "ok"]);
    assert_eq!(ask(&gateway).await.unwrap(), "from secondary");
    assert_eq!(
        recorded.lock().unwrap()[0].0.as_deref(),
        Some("from-settings")
    );
}

#[tokio::test]
async fn transport_errors_never_echo_the_key() {
    let closed = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let gateway = Gateway::new(vec![endpoint(&closed, "/ok", Some("secret-key"))]);

    let err = ask(&gateway).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Endpoint {
            source: ProviderError::Transport(_),
            ..
        }
    ));
    assert!(!err.to_string().contains("secret-key"));
    assert!(!format!("{err:?}").contains("secret-key"));
}

#[tokio::test]
async fn timed_out_endpoint_falls_back() {
    let base = serve(router(Recorded::default())).await;
    let settings = Settings {
        endpoints: vec![format!("{base}/slow"), format!("{base}/ok")],
        request_timeout_secs: Some(1),
        ..Settings::default()
    };
    let gateway = Gateway::from_settings(&settings).unwrap();

    assert_eq!(ask(&gateway).await.unwrap(), "from secondary");
}

#[tokio::test]
async fn zero_timeout_does_not_fail_every_request() {
    let base = serve(router(Recorded::default())).await;
    let settings = Settings {
        endpoints: vec![format!("{base}/ok")],
        request_timeout_secs: Some(0),
        ..Settings::default()
    };
    let gateway = Gateway::from_settings(&settings).unwrap();

    assert_eq!(ask(&gateway).await.unwrap(), "from secondary");
}
