//! Configuration Module
//!
//! Loads server configuration from environment variables (and `.env`), plus
//! the settings of a client-side preview session.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CLIENT_CACHE_MAX_ENTRIES, CLIENT_CACHE_TTL};
use crate::compile::Engine;

/// Public build service used when `COMPILE_SERVICE_URL` is unset.
pub const DEFAULT_COMPILE_SERVICE_URL: &str = "https://latex.ytotech.com/builds/sync";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream LaTeX build endpoint
    pub compile_service_url: String,
    /// Hard timeout for one upstream compile, in seconds
    pub compile_timeout_secs: u64,
    /// Largest accepted document, in characters
    pub max_source_chars: usize,
    /// Maximum number of cached PDFs
    pub cache_max_entries: usize,
    /// Lifetime of a cached PDF, in seconds
    pub cache_ttl_secs: u64,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Engine used when a request does not name one
    pub default_engine: Engine,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `COMPILE_SERVICE_URL` - build endpoint (default: latex.ytotech.com)
    /// - `COMPILE_TIMEOUT_SECS` - upstream timeout (default: 90)
    /// - `MAX_SOURCE_CHARS` - size limit (default: 500000)
    /// - `CACHE_MAX_ENTRIES` - cache capacity (default: 100)
    /// - `CACHE_TTL_SECS` - cache TTL (default: 3600)
    /// - `CLEANUP_INTERVAL` - sweep frequency in seconds (default: 60)
    /// - `DEFAULT_ENGINE` - pdflatex, xelatex or lualatex (default: pdflatex)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            compile_service_url: env::var("COMPILE_SERVICE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.compile_service_url),
            compile_timeout_secs: parse_env("COMPILE_TIMEOUT_SECS")
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.compile_timeout_secs),
            max_source_chars: parse_env("MAX_SOURCE_CHARS").unwrap_or(defaults.max_source_chars),
            cache_max_entries: parse_env("CACHE_MAX_ENTRIES")
                .filter(|&n| n > 0)
                .unwrap_or(defaults.cache_max_entries),
            cache_ttl_secs: parse_env("CACHE_TTL_SECS").unwrap_or(defaults.cache_ttl_secs),
            cleanup_interval: parse_env("CLEANUP_INTERVAL")
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            default_engine: parse_env("DEFAULT_ENGINE").unwrap_or(defaults.default_engine),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            compile_service_url: DEFAULT_COMPILE_SERVICE_URL.to_string(),
            compile_timeout_secs: 90,
            max_source_chars: 500_000,
            cache_max_entries: 100,
            cache_ttl_secs: 3600,
            cleanup_interval: 60,
            default_engine: Engine::Pdflatex,
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

// == Preview Config ==
/// Settings for one client-side preview session.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Quiet period before a scheduled compile fires
    pub debounce: Duration,
    /// Lifetime of a locally cached PDF
    pub cache_ttl: Duration,
    /// Maximum number of locally cached PDFs
    pub cache_max_entries: usize,
    pub engine: Engine,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
            cache_ttl: CLIENT_CACHE_TTL,
            cache_max_entries: CLIENT_CACHE_MAX_ENTRIES,
            engine: Engine::Pdflatex,
        }
    }
}
