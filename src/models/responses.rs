//! Response DTOs for the compile API
//!
//! Defines the structure of outgoing JSON bodies. PDF responses are raw
//! bytes and have no DTO.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::templates::{Template, TemplateMetadata};

/// One entry of the template gallery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: &'static str,
    pub version: u32,
    #[serde(flatten)]
    pub metadata: TemplateMetadata,
}

impl From<&Template> for TemplateSummary {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id(),
            version: template.version(),
            metadata: template.metadata().clone(),
        }
    }
}

/// Response body for `GET /api/templates`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListResponse {
    pub default_id: &'static str,
    pub templates: Vec<TemplateSummary>,
}

/// Response body for `POST /api/templates/:id/latex`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatexResponse {
    /// Template actually used
    pub template_id: &'static str,
    /// Id the caller asked for
    pub requested_id: String,
    /// True when `requested_id` was unknown and the default was used
    pub fallback: bool,
    pub latex: String,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Current number of cached PDFs
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
