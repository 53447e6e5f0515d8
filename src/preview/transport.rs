//! How a preview session reaches the compile endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::cache_key;
use crate::compile::{CacheStatus, CompileOutput, CompileService, Engine, COMPILE_TIMEOUT};
use crate::error::{CompileError, ErrorKind, Result};

/// Response header carrying the server cache status.
pub const CACHE_STATUS_HEADER: &str = "x-cache";
/// Response header carrying the content address.
pub const CACHE_KEY_HEADER: &str = "x-cache-key";

/// Whole-request limit for the endpoint client. Leaves the server room to
/// answer its own upstream timeout with a 504 first.
pub const ENDPOINT_TIMEOUT: Duration = Duration::from_secs(COMPILE_TIMEOUT.as_secs() + 15);

// == Transport Trait ==
#[async_trait]
pub trait CompileTransport: Send + Sync {
    async fn compile(&self, source: &str, engine: Engine) -> Result<CompileOutput>;
}

/// In-process transport, used when the preview runs next to the server.
#[async_trait]
impl CompileTransport for CompileService {
    async fn compile(&self, source: &str, engine: Engine) -> Result<CompileOutput> {
        CompileService::compile(self, source, engine).await
    }
}

// == Endpoint Client ==
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EndpointRequest<'a> {
    latex_code: &'a str,
    engine: Engine,
}

#[derive(Debug, Deserialize)]
struct EndpointErrorBody {
    error: EndpointError,
}

#[derive(Debug, Deserialize)]
struct EndpointError {
    kind: ErrorKind,
    message: String,
    #[serde(default)]
    log: Option<String>,
}

/// HTTP transport to a running `POST /api/compile` endpoint.
#[derive(Debug, Clone)]
pub struct EndpointClient {
    client: Client,
    url: String,
}

impl EndpointClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, ENDPOINT_TIMEOUT)
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompileError::Server(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/api/compile", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl CompileTransport for EndpointClient {
    async fn compile(&self, source: &str, engine: Engine) -> Result<CompileOutput> {
        let response = self
            .client
            .post(&self.url)
            .json(&EndpointRequest {
                latex_code: source,
                engine,
            })
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let cache_status = header(CACHE_STATUS_HEADER).and_then(|v| CacheStatus::from_header(&v));
        let key = header(CACHE_KEY_HEADER);

        let body = response
            .bytes()
            .await
            .map_err(request_error)?;

        if status.is_success() {
            debug!("Endpoint answered {:?} ({} bytes)", cache_status, body.len());
            return Ok(CompileOutput {
                pdf: body,
                cache_status: cache_status.unwrap_or(CacheStatus::Miss),
                key: key.unwrap_or_else(|| cache_key(source, engine.as_str())),
            });
        }

        Err(decode_error(status, &body))
    }
}

fn request_error(err: reqwest::Error) -> CompileError {
    if err.is_timeout() {
        CompileError::Timeout(ENDPOINT_TIMEOUT)
    } else {
        CompileError::Network(err.to_string())
    }
}

/// Rebuilds the typed error from the endpoint's JSON error body. Bodies
/// from proxies or the HTTP layer are classified by status alone.
fn decode_error(status: StatusCode, body: &[u8]) -> CompileError {
    let Ok(EndpointErrorBody { error }) = serde_json::from_slice::<EndpointErrorBody>(body) else {
        return if status.is_server_error() {
            CompileError::Network(format!("Compile endpoint returned HTTP {status}"))
        } else if status == StatusCode::PAYLOAD_TOO_LARGE {
            CompileError::Validation("Request body too large".to_string())
        } else {
            CompileError::Server(format!("Compile endpoint returned HTTP {status}"))
        };
    };

    match error.kind {
        ErrorKind::Validation => CompileError::Validation(error.message),
        ErrorKind::Compilation => CompileError::Compilation {
            message: error.message,
            log: error.log,
        },
        ErrorKind::Timeout => CompileError::Timeout(COMPILE_TIMEOUT),
        ErrorKind::Network => CompileError::Network(error.message),
        ErrorKind::Server => CompileError::Server(error.message),
    }
}
