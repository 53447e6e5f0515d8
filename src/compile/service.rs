//! Compile orchestration: validation, cache lookup, timed upstream dispatch.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{CompilerBackend, Engine, HttpCompiler, COMPILE_TIMEOUT, MAX_SOURCE_CHARS};
use crate::cache::{cache_key, ArtifactCache, CacheStats};
use crate::config::Config;
use crate::error::{CompileError, Result};

// == Cache Status ==
/// Whether a result came from the cache or a fresh upstream build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Value of the `X-Cache` response header.
    pub fn as_header(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }

    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("HIT") => Some(CacheStatus::Hit),
            v if v.eq_ignore_ascii_case("MISS") => Some(CacheStatus::Miss),
            _ => None,
        }
    }
}

// == Compile Output ==
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOutput {
    pub pdf: Bytes,
    pub cache_status: CacheStatus,
    /// Content address of the request
    pub key: String,
}

// == Compile Service ==
/// Shared compile pipeline. Cloning is cheap; clones share the cache.
#[derive(Clone)]
pub struct CompileService {
    backend: Arc<dyn CompilerBackend>,
    cache: Arc<RwLock<ArtifactCache>>,
    timeout: Duration,
    max_source_chars: usize,
}

impl CompileService {
    // == Constructors ==
    /// Creates a service with the default timeout and size limit.
    pub fn new(backend: Arc<dyn CompilerBackend>, cache: ArtifactCache) -> Self {
        Self {
            backend,
            cache: Arc::new(RwLock::new(cache)),
            timeout: COMPILE_TIMEOUT,
            max_source_chars: MAX_SOURCE_CHARS,
        }
    }

    /// Wires the HTTP backend and server cache from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = HttpCompiler::new(config.compile_service_url.clone())?;
        let cache = ArtifactCache::new(
            config.cache_max_entries,
            Duration::from_secs(config.cache_ttl_secs),
        );
        Ok(Self::new(Arc::new(backend), cache)
            .with_timeout(Duration::from_secs(config.compile_timeout_secs))
            .with_max_source_chars(config.max_source_chars))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_source_chars(mut self, max: usize) -> Self {
        self.max_source_chars = max;
        self
    }

    // == Accessors ==
    /// Shared handle to the server cache, for the cleanup task.
    pub fn cache(&self) -> Arc<RwLock<ArtifactCache>> {
        Arc::clone(&self.cache)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Validate ==
    /// Local checks that never touch the network.
    pub fn validate(&self, source: &str) -> Result<()> {
        if source.trim().is_empty() {
            return Err(CompileError::Validation(
                "LaTeX source must not be empty".to_string(),
            ));
        }
        let len = source.chars().count();
        if len > self.max_source_chars {
            return Err(CompileError::TooLarge {
                len,
                max: self.max_source_chars,
            });
        }
        Ok(())
    }

    // == Compile ==
    /// Compiles `source`, serving from the cache when possible.
    ///
    /// Concurrent misses on the same key each go upstream; the results are
    /// identical so the last write wins harmlessly.
    pub async fn compile(&self, source: &str, engine: Engine) -> Result<CompileOutput> {
        self.validate(source)?;
        let key = cache_key(source, engine.as_str());

        let cached = self.cache.write().await.get(&key);
        if let Some(pdf) = cached {
            debug!("Cache HIT for {}", short(&key));
            return Ok(CompileOutput {
                pdf,
                cache_status: CacheStatus::Hit,
                key,
            });
        }

        debug!("Cache MISS for {}, compiling with {}", short(&key), engine);
        let pdf = self.dispatch(source, engine).await?;
        info!(
            "Compiled {} ({} bytes) with {}",
            short(&key),
            pdf.len(),
            engine
        );

        self.cache.write().await.put(key.clone(), pdf.clone());
        Ok(CompileOutput {
            pdf,
            cache_status: CacheStatus::Miss,
            key,
        })
    }

    /// Runs the backend under the hard timeout. On expiry the backend future
    /// is dropped, which cancels the in-flight request.
    async fn dispatch(&self, source: &str, engine: Engine) -> Result<Bytes> {
        match tokio::time::timeout(self.timeout, self.backend.compile(source, engine)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Compile timed out after {:?}", self.timeout);
                Err(CompileError::Timeout(self.timeout))
            }
        }
    }
}

fn short(key: &str) -> &str {
    &key[..key.len().min(12)]
}
