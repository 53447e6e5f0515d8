//! API Routes
//!
//! Configures the Axum router with all compile service endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    compile_handler, health_handler, list_templates_handler, stats_handler, template_latex_handler,
    template_pdf_handler, AppState,
};

/// Request body cap. Above the source limit so oversized documents reach
/// the handler and get the typed 413 error.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
/// - Body limit: 4 MiB
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    Router::new()
        .route("/api/compile", post(compile_handler))
        .route("/api/templates", get(list_templates_handler))
        .route("/api/templates/:id/latex", post(template_latex_handler))
        .route("/api/templates/:id/pdf", post(template_pdf_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use bytes::Bytes;
    use tower::util::ServiceExt;

    use crate::cache::ArtifactCache;
    use crate::compile::{CompileService, CompilerBackend, Engine};
    use crate::error::Result;
    use crate::templates::TemplateRegistry;

    struct StubBackend;

    #[async_trait]
    impl CompilerBackend for StubBackend {
        async fn compile(&self, _source: &str, _engine: Engine) -> Result<Bytes> {
            Ok(Bytes::from_static(b"%PDF-1.5"))
        }
    }

    fn create_test_app() -> Router {
        let compiler = CompileService::new(Arc::new(StubBackend), ArtifactCache::server_default());
        create_router(AppState::new(compiler, TemplateRegistry::builtin().unwrap()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_compile_endpoint() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/compile")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"latexCode":"\\documentclass{article}"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-cache"], "MISS");
    }

    #[tokio::test]
    async fn test_compile_requires_post() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/compile").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
