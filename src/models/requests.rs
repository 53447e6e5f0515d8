//! Request DTOs for the compile API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::compile::Engine;
use crate::error::CompileError;

/// Request body for `POST /api/compile`
///
/// `latexCode` is kept as raw JSON so a missing or non-string value becomes
/// a validation error rather than a generic body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    #[serde(default)]
    pub latex_code: Option<Value>,
    /// Engine name; the server default applies when absent
    #[serde(default)]
    pub engine: Option<String>,
}

impl CompileRequest {
    /// Extracts the source and engine, or explains what is wrong.
    pub fn validate(self, default_engine: Engine) -> Result<(String, Engine), CompileError> {
        let source = match self.latex_code {
            Some(Value::String(source)) => source,
            Some(_) => {
                return Err(CompileError::Validation(
                    "latexCode must be a string".to_string(),
                ))
            }
            None => return Err(CompileError::Validation("latexCode is required".to_string())),
        };

        let engine = match self.engine.as_deref() {
            Some(name) if !name.trim().is_empty() => name.parse()?,
            _ => default_engine,
        };

        Ok((source, engine))
    }
}

/// Optional `?engine=` query parameter for template PDF rendering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineQuery {
    #[serde(default)]
    pub engine: Option<String>,
}

impl EngineQuery {
    pub fn resolve(&self, default_engine: Engine) -> Result<Engine, CompileError> {
        match self.engine.as_deref() {
            Some(name) if !name.trim().is_empty() => name.parse(),
            _ => Ok(default_engine),
        }
    }
}
