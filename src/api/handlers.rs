//! API Handlers
//!
//! HTTP request handlers for each compile service endpoint.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

use crate::compile::{CompileOutput, CompileService, Engine};
use crate::config::Config;
use crate::error::{CompileError, Result};
use crate::models::{
    CompileRequest, EngineQuery, HealthResponse, LatexResponse, ResumeData, StatsResponse,
    TemplateListResponse, TemplateSummary,
};
use crate::templates::TemplateRegistry;

/// Server cache status of a PDF response: `HIT` or `MISS`
pub static X_CACHE: HeaderName = HeaderName::from_static("x-cache");
/// Content address of a PDF response
pub static X_CACHE_KEY: HeaderName = HeaderName::from_static("x-cache-key");
/// Template used to render a PDF response
pub static X_TEMPLATE_ID: HeaderName = HeaderName::from_static("x-template-id");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Compile pipeline with the process-wide server cache
    pub compiler: CompileService,
    /// Immutable template table
    pub templates: Arc<TemplateRegistry>,
    /// Engine used when a request names none
    pub default_engine: Engine,
}

impl AppState {
    pub fn new(compiler: CompileService, templates: TemplateRegistry) -> Self {
        Self {
            compiler,
            templates: Arc::new(templates),
            default_engine: Engine::default(),
        }
    }

    pub fn with_default_engine(mut self, engine: Engine) -> Self {
        self.default_engine = engine;
        self
    }

    /// Builds the HTTP compiler, server cache and template registry.
    ///
    /// Fails on a broken template table or HTTP client setup; both are
    /// fatal at startup.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let templates = TemplateRegistry::builtin().context("Invalid template registry")?;
        let compiler = CompileService::from_config(config).context("Invalid compiler setup")?;
        Ok(Self::new(compiler, templates).with_default_engine(config.default_engine))
    }
}

/// Wraps compiled bytes with the PDF and cache headers.
fn pdf_response(output: CompileOutput, template_id: Option<&'static str>) -> Response {
    let mut response = output.pdf.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        X_CACHE.clone(),
        HeaderValue::from_static(output.cache_status.as_header()),
    );
    if let Ok(key) = HeaderValue::from_str(&output.key) {
        headers.insert(X_CACHE_KEY.clone(), key);
    }
    if let Some(id) = template_id {
        headers.insert(X_TEMPLATE_ID.clone(), HeaderValue::from_static(id));
    }
    response
}

/// Unwraps a JSON body, turning extractor rejections (bad syntax, wrong
/// content type, wrong shape) into the typed validation error.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| CompileError::Validation(rejection.body_text()))
}

/// Handler for POST /api/compile
///
/// Compiles LaTeX source, answering with PDF bytes or a typed JSON error.
pub async fn compile_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CompileRequest>, JsonRejection>,
) -> Result<Response> {
    let (source, engine) = json_body(payload)?.validate(state.default_engine)?;
    let output = state.compiler.compile(&source, engine).await?;
    Ok(pdf_response(output, None))
}

/// Handler for GET /api/templates
pub async fn list_templates_handler(State(state): State<AppState>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        default_id: state.templates.default_id(),
        templates: state
            .templates
            .list()
            .iter()
            .map(TemplateSummary::from)
            .collect(),
    })
}

/// Handler for POST /api/templates/:id/latex
///
/// Unknown ids fall back to the default template.
pub async fn template_latex_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ResumeData>, JsonRejection>,
) -> Result<Json<LatexResponse>> {
    let resume = json_body(payload)?;
    let resolved = state.templates.resolve(&id);
    Ok(Json(LatexResponse {
        template_id: resolved.template.id(),
        latex: resolved.template.generate(&resume),
        fallback: resolved.fallback,
        requested_id: id,
    }))
}

/// Handler for POST /api/templates/:id/pdf
///
/// Renders with fallback, then compiles through the cached pipeline.
pub async fn template_pdf_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EngineQuery>,
    payload: std::result::Result<Json<ResumeData>, JsonRejection>,
) -> Result<Response> {
    let resume = json_body(payload)?;
    let engine = query.resolve(state.default_engine)?;
    let template = state.templates.resolve(&id).template;
    let latex = template.generate(&resume);
    let output = state.compiler.compile(&latex, engine).await?;
    Ok(pdf_response(output, Some(template.id())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.compiler.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
