//! Error types for the compile service
//!
//! Provides the compile failure taxonomy and the registry startup error using thiserror.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Hint attached to failures where exporting the source by hand still works.
pub const FALLBACK_HINT: &str =
    "The compile service is unavailable. You can still export the LaTeX source and compile it in Overleaf.";

// == Error Kind ==
/// Coarse classification of a failed compile attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Compilation,
    Timeout,
    Network,
    Server,
}

// == Compile Error Enum ==
/// Every way a single compile attempt can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Bad input, never retried
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Source exceeds the local size limit
    #[error("LaTeX source is {len} characters, the limit is {max}")]
    TooLarge { len: usize, max: usize },

    /// The compiler rejected the document
    #[error("Compilation failed: {message}")]
    Compilation {
        message: String,
        /// Compiler log, already truncated
        log: Option<String>,
    },

    /// Upstream did not answer in time
    #[error("Compilation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Upstream unreachable
    #[error("Compile service unreachable: {0}")]
    Network(String),

    /// Unexpected failure in the orchestration layer
    #[error("Internal error: {0}")]
    Server(String),
}

impl CompileError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Validation(_) | CompileError::TooLarge { .. } => ErrorKind::Validation,
            CompileError::Compilation { .. } => ErrorKind::Compilation,
            CompileError::Timeout(_) => ErrorKind::Timeout,
            CompileError::Network(_) => ErrorKind::Network,
            CompileError::Server(_) => ErrorKind::Server,
        }
    }

    /// True when the user may retry or fall back to a manual export.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Timeout | ErrorKind::Network)
    }

    /// HTTP status used by the compile endpoint.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CompileError::Validation(_) => StatusCode::BAD_REQUEST,
            CompileError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            CompileError::Compilation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CompileError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            CompileError::Network(_) => StatusCode::BAD_GATEWAY,
            CompileError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CompileError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            CompileError::Server(msg) => {
                tracing::error!("Compile pipeline failure: {msg}");
                "An internal error occurred while compiling".to_string()
            }
            CompileError::Compilation { message, .. } => message.clone(),
            other => other.to_string(),
        };

        let mut error = json!({
            "kind": self.kind(),
            "message": message,
        });
        if let CompileError::Compilation { log: Some(log), .. } = &self {
            error["log"] = json!(log);
        }
        if self.is_retryable() {
            error["fallback"] = json!(FALLBACK_HINT);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

// == Registry Error ==
/// Template registry construction failure. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate template id: {0}")]
    DuplicateId(String),

    #[error("Default template '{0}' is not registered")]
    MissingDefault(String),
}

// == Result Type Alias ==
/// Convenience Result type for the compile pipeline.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: CompileError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            CompileError::TooLarge { len: 2, max: 1 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CompileError::Timeout(Duration::from_secs(90)).kind(),
            ErrorKind::Timeout
        );
        assert!(CompileError::Network("refused".into()).is_retryable());
        assert!(!CompileError::Validation("empty".into()).is_retryable());
    }

    #[tokio::test]
    async fn test_compilation_error_body_carries_log() {
        let (status, json) = body_json(CompileError::Compilation {
            message: "Undefined control sequence".into(),
            log: Some("! Undefined control sequence.".into()),
        })
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["kind"], "compilation");
        assert_eq!(json["error"]["log"], "! Undefined control sequence.");
        assert!(json["error"].get("fallback").is_none());
    }

    #[tokio::test]
    async fn test_network_error_suggests_fallback() {
        let (status, json) = body_json(CompileError::Network("connection refused".into())).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["kind"], "network");
        assert!(json["error"]["fallback"].as_str().unwrap().contains("Overleaf"));
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let (status, json) = body_json(CompileError::Server("lock poisoned".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!json["error"]["message"].as_str().unwrap().contains("poisoned"));
    }

    #[tokio::test]
    async fn test_too_large_is_413() {
        let (status, json) = body_json(CompileError::TooLarge {
            len: 500_001,
            max: 500_000,
        })
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"]["kind"], "validation");
    }
}
