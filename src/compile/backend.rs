//! Upstream compiler backends.
//!
//! [`HttpCompiler`] talks to a latex-on-http style build service:
//! `POST {compiler, resources: [{main, content}]}` answered with either a
//! PDF body or a JSON failure `{error, log_files}`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::build_log::{collect_logs, truncate_log};
use super::Engine;
use crate::error::{CompileError, Result};

/// Time allowed to establish the upstream connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// == Backend Trait ==
/// Something that can turn LaTeX into PDF bytes.
///
/// Implementations must be cancel-safe: dropping the returned future
/// abandons the request and releases its resources.
#[async_trait]
pub trait CompilerBackend: Send + Sync {
    async fn compile(&self, source: &str, engine: Engine) -> Result<Bytes>;
}

// == Wire Types ==
#[derive(Debug, Serialize)]
struct BuildRequest<'a> {
    compiler: &'a str,
    resources: [BuildResource<'a>; 1],
}

#[derive(Debug, Serialize)]
struct BuildResource<'a> {
    main: bool,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct BuildFailure {
    error: String,
    #[serde(default)]
    log_files: BTreeMap<String, String>,
}

// == HTTP Compiler ==
/// reqwest client for the external build service.
#[derive(Debug, Clone)]
pub struct HttpCompiler {
    client: Client,
    endpoint: String,
}

impl HttpCompiler {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| CompileError::Server(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompilerBackend for HttpCompiler {
    async fn compile(&self, source: &str, engine: Engine) -> Result<Bytes> {
        let body = BuildRequest {
            compiler: engine.as_str(),
            resources: [BuildResource {
                main: true,
                content: source,
            }],
        };

        debug!("Dispatching {} build to {}", engine, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let payload = response.bytes().await.map_err(transport_error)?;

        interpret_response(status, &content_type, payload)
    }
}

/// Decides between "compiled" and "rejected" by content type, not status:
/// the build service can report a failed build with a 2xx status.
fn interpret_response(status: StatusCode, content_type: &str, payload: Bytes) -> Result<Bytes> {
    if status.is_success() && content_type.starts_with("application/pdf") {
        return Ok(payload);
    }

    if let Ok(failure) = serde_json::from_slice::<BuildFailure>(&payload) {
        warn!("Compiler rejected document (HTTP {}): {}", status, failure.error);
        return Err(CompileError::Compilation {
            message: truncate_log(&failure.error),
            log: collect_logs(&failure.log_files),
        });
    }

    if status.is_server_error() {
        return Err(CompileError::Network(format!(
            "Compile service returned HTTP {status}"
        )));
    }

    Err(CompileError::Server(format!(
        "Unexpected response from compile service: HTTP {status}, content type '{content_type}'"
    )))
}

fn transport_error(err: reqwest::Error) -> CompileError {
    if err.is_connect() || err.is_timeout() || err.is_request() || err.is_body() {
        CompileError::Network(err.to_string())
    } else if err.is_decode() {
        CompileError::Network(format!("Response interrupted: {err}"))
    } else {
        CompileError::Server(err.to_string())
    }
}
