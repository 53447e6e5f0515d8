//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint against a scripted
//! compiler backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use texforge::{
    api::create_router,
    cache::ArtifactCache,
    compile::{CompileService, CompilerBackend, Engine},
    error::{CompileError, Result},
    templates::TemplateRegistry,
    AppState,
};
use tower::ServiceExt;

// == Helper Functions ==

/// Answers by the first word of the source: `fail`, `hang` and `down`
/// simulate the upstream failure modes, anything else compiles.
#[derive(Default)]
struct ScriptedBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl CompilerBackend for ScriptedBackend {
    async fn compile(&self, source: &str, engine: Engine) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if source.starts_with("fail") {
            return Err(CompileError::Compilation {
                message: "LaTeX Error".to_string(),
                log: Some("! Undefined control sequence.".to_string()),
            });
        }
        if source.starts_with("hang") {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if source.starts_with("down") {
            return Err(CompileError::Network("connection refused".to_string()));
        }
        Ok(Bytes::from(format!("%PDF-1.5 {} {}", engine, source.len())))
    }
}

fn create_test_app() -> (Router, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::default());
    let compiler = CompileService::new(backend.clone(), ArtifactCache::server_default())
        .with_timeout(Duration::from_secs(5));
    let state = AppState::new(compiler, TemplateRegistry::builtin().unwrap());
    (create_router(state), backend)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

async fn body_to_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn sample_resume() -> Value {
    json!({
        "basics": {"name": "Ada Lovelace", "email": "ada@example.com"},
        "work": [{
            "company": "Analytical Engines & Co",
            "position": "Engineer",
            "highlights": ["Improved perf by 30%"]
        }]
    })
}

// == Compile Endpoint Tests ==

#[tokio::test]
async fn test_compile_miss_then_hit() {
    let (app, backend) = create_test_app();
    let body = json!({"latexCode": "\\documentclass{article}"});

    let first = app.clone().oneshot(post_json("/api/compile", body.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["content-type"], "application/pdf");
    assert_eq!(first.headers()["x-cache"], "MISS");
    let key = first.headers()["x-cache-key"].to_str().unwrap().to_string();
    assert_eq!(key.len(), 64);
    let first_pdf = body_bytes(first).await;

    let second = app.oneshot(post_json("/api/compile", body)).await.unwrap();
    assert_eq!(second.headers()["x-cache"], "HIT");
    assert_eq!(second.headers()["x-cache-key"], key.as_str());
    assert_eq!(body_bytes(second).await, first_pdf);

    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_compile_engine_changes_key() {
    let (app, backend) = create_test_app();

    let pdflatex = app
        .clone()
        .oneshot(post_json("/api/compile", json!({"latexCode": "x"})))
        .await
        .unwrap();
    let xelatex = app
        .oneshot(post_json(
            "/api/compile",
            json!({"latexCode": "x", "engine": "xelatex"}),
        ))
        .await
        .unwrap();

    assert_eq!(xelatex.headers()["x-cache"], "MISS");
    assert_ne!(
        pdflatex.headers()["x-cache-key"],
        xelatex.headers()["x-cache-key"]
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_compile_missing_latex_code() {
    let (app, backend) = create_test_app();

    let response = app.oneshot(post_json("/api/compile", json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "validation");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_compile_non_string_latex_code() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/compile", json!({"latexCode": ["a", "b"]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compile_malformed_json_uses_error_envelope() {
    let (app, backend) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/compile")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"latexCode": "#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "validation");
    assert!(json["error"]["message"].is_string());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_compile_missing_content_type_uses_error_envelope() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/compile")
                .body(Body::from(r#"{"latexCode":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "validation");
}

#[tokio::test]
async fn test_template_latex_rejects_wrong_shape_with_envelope() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/templates/classic/latex", json!({"work": "not a list"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "validation");
}

#[tokio::test]
async fn test_compile_whitespace_source() {
    let (app, backend) = create_test_app();

    let response = app
        .oneshot(post_json("/api/compile", json!({"latexCode": "  \n\t "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_compile_unknown_engine() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/compile",
            json!({"latexCode": "x", "engine": "tectonic"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compile_size_limit() {
    let (app, backend) = create_test_app();

    let at_limit = app
        .clone()
        .oneshot(post_json("/api/compile", json!({"latexCode": "a".repeat(500_000)})))
        .await
        .unwrap();
    assert_eq!(at_limit.status(), StatusCode::OK);

    let over_limit = app
        .oneshot(post_json("/api/compile", json!({"latexCode": "a".repeat(500_001)})))
        .await
        .unwrap();
    assert_eq!(over_limit.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_to_json(over_limit).await;
    assert_eq!(json["error"]["kind"], "validation");

    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_compile_failure_carries_log() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/compile", json!({"latexCode": "fail here"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "compilation");
    assert_eq!(json["error"]["log"], "! Undefined control sequence.");
    assert!(json["error"].get("fallback").is_none());
}

#[tokio::test]
async fn test_failed_compile_is_not_cached() {
    let (app, backend) = create_test_app();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/compile", json!({"latexCode": "fail again"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_compile_timeout() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/compile", json!({"latexCode": "hang forever"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "timeout");
    assert!(json["error"]["fallback"].is_string());
}

#[tokio::test]
async fn test_compile_network_failure_offers_fallback() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/compile", json!({"latexCode": "down"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response).await;
    assert_eq!(json["error"]["kind"], "network");
    assert!(json["error"]["fallback"]
        .as_str()
        .unwrap()
        .contains("Overleaf"));
}

// == Template Endpoint Tests ==

#[tokio::test]
async fn test_list_templates() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/api/templates")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["defaultId"], "classic");
    let ids: Vec<&str> = json["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&"classic"));
    assert!(json["templates"][0]["name"].is_string());
    assert!(json["templates"][0]["isPremium"].is_boolean());
}

#[tokio::test]
async fn test_template_latex_escapes_resume_text() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/templates/classic/latex", sample_resume()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["templateId"], "classic");
    assert_eq!(json["fallback"], false);
    let latex = json["latex"].as_str().unwrap();
    assert!(latex.contains("Analytical Engines \\& Co"));
    assert!(latex.contains("Improved perf by 30\\%"));
}

#[tokio::test]
async fn test_template_latex_unknown_id_falls_back() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/templates/no-such-template/latex", sample_resume()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["templateId"], "classic");
    assert_eq!(json["requestedId"], "no-such-template");
    assert_eq!(json["fallback"], true);
}

#[tokio::test]
async fn test_template_latex_accepts_empty_resume() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post_json("/api/templates/modern/latex", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    let latex = json["latex"].as_str().unwrap();
    assert!(latex.contains("\\end{document}"));
    assert!(!latex.contains("\\bfseries }"));
}

#[tokio::test]
async fn test_template_pdf_uses_cache() {
    let (app, backend) = create_test_app();

    let first = app
        .clone()
        .oneshot(post_json("/api/templates/compact/pdf", sample_resume()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-template-id"], "compact");
    assert_eq!(first.headers()["x-cache"], "MISS");

    let second = app
        .oneshot(post_json("/api/templates/compact/pdf", sample_resume()))
        .await
        .unwrap();
    assert_eq!(second.headers()["x-cache"], "HIT");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_template_pdf_engine_query() {
    let (app, _) = create_test_app();

    let ok = app
        .clone()
        .oneshot(post_json("/api/templates/classic/pdf?engine=lualatex", sample_resume()))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert!(body_bytes(ok).await.starts_with(b"%PDF-1.5 lualatex"));

    let bad = app
        .oneshot(post_json("/api/templates/classic/pdf?engine=troff", sample_resume()))
        .await
        .unwrap();
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

// == Stats & Health Endpoint Tests ==

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let (app, _) = create_test_app();
    let body = json!({"latexCode": "stats"});

    for _ in 0..3 {
        app.clone()
            .oneshot(post_json("/api/compile", body.clone()))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response).await;
    assert_eq!(json["hits"], 2);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert!(json["hit_rate"].as_f64().unwrap() > 0.6);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/nonexistent")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
