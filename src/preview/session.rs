//! Preview session: debounced compiles, local cache, handle ownership.
//!
//! Responses can arrive out of order. Each request is stamped with a
//! generation; a result is applied only if its generation is still the
//! latest and the session is alive. Any handle that is replaced or
//! orphaned by teardown is released.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tracing::debug;

use super::{CompileTransport, Debouncer, HandleTable, PdfHandle};
use crate::cache::{cache_key, ArtifactCache, CacheStats};
use crate::compile::{CacheStatus, Engine};
use crate::config::PreviewConfig;
use crate::error::{CompileError, Result};

// == Preview State ==
/// Where the currently shown PDF came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOrigin {
    /// Served by the session's own cache, no request made
    LocalCache,
    /// Fetched from the endpoint, with its server cache status
    Server(CacheStatus),
}

/// What the preview pane shows right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    pub current: Option<PdfHandle>,
    pub origin: Option<PreviewOrigin>,
    /// Failure of the latest applied compile; the previous PDF stays shown
    pub last_error: Option<CompileError>,
    /// Generation of the latest applied result
    pub applied_generation: u64,
    /// Upstream requests currently awaiting a response
    pub in_flight: usize,
}

struct Job {
    generation: u64,
    source: String,
}

// == Session Internals ==
struct SessionInner {
    transport: Arc<dyn CompileTransport>,
    engine: Engine,
    cache: Mutex<ArtifactCache>,
    handles: HandleTable,
    generation: AtomicU64,
    alive: AtomicBool,
    state: Mutex<PreviewState>,
    tasks: Mutex<Vec<AbortHandle>>,
}

/// Decrements the in-flight counter on every exit path.
struct InFlight<'a>(&'a Mutex<PreviewState>);

impl<'a> InFlight<'a> {
    fn enter(state: &'a Mutex<PreviewState>) -> Self {
        state.lock().in_flight += 1;
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.0.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

impl SessionInner {
    fn is_current(&self, generation: u64) -> bool {
        self.alive.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }

    /// Local cache first, then the transport. Successful fetches are
    /// cached while the session is alive.
    async fn fetch(&self, source: &str) -> Result<(Bytes, PreviewOrigin)> {
        let key = cache_key(source, self.engine.as_str());
        let cached = self.cache.lock().get(&key);
        if let Some(pdf) = cached {
            debug!("Preview cache hit");
            return Ok((pdf, PreviewOrigin::LocalCache));
        }

        let output = {
            let _in_flight = InFlight::enter(&self.state);
            self.transport.compile(source, self.engine).await?
        };

        if self.alive.load(Ordering::SeqCst) {
            self.cache.lock().put(key, output.pdf.clone());
        }
        Ok((output.pdf, PreviewOrigin::Server(output.cache_status)))
    }

    async fn run(&self, job: Job) {
        if !self.is_current(job.generation) {
            return;
        }
        let result = self.fetch(&job.source).await;
        self.apply(job.generation, result);
    }

    fn apply(&self, generation: u64, result: Result<(Bytes, PreviewOrigin)>) {
        let mut state = self.state.lock();
        if !self.is_current(generation) {
            debug!("Discarding stale preview result (generation {})", generation);
            return;
        }

        match result {
            Ok((pdf, origin)) => {
                let handle = self.handles.issue(pdf);
                if let Some(previous) = state.current.replace(handle) {
                    self.handles.release(previous);
                }
                state.origin = Some(origin);
                state.last_error = None;
            }
            Err(err) => {
                debug!("Preview compile failed: {}", err);
                state.last_error = Some(err);
            }
        }
        state.applied_generation = generation;
    }

    fn track(&self, task: AbortHandle) {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }
}

// == Preview Session ==
/// One editor's live preview. Must be created inside a tokio runtime.
pub struct PreviewSession {
    inner: Arc<SessionInner>,
    debouncer: Debouncer<Job>,
}

impl PreviewSession {
    pub fn new(transport: Arc<dyn CompileTransport>, config: PreviewConfig) -> Self {
        let inner = Arc::new(SessionInner {
            transport,
            engine: config.engine,
            cache: Mutex::new(ArtifactCache::new(config.cache_max_entries, config.cache_ttl)),
            handles: HandleTable::new(),
            generation: AtomicU64::new(0),
            alive: AtomicBool::new(true),
            state: Mutex::new(PreviewState::default()),
            tasks: Mutex::new(Vec::new()),
        });

        let dispatch_inner = Arc::clone(&inner);
        let debouncer = Debouncer::new(config.debounce, move |job: Job| {
            let inner = Arc::clone(&dispatch_inner);
            let task = tokio::spawn({
                let inner = Arc::clone(&inner);
                async move { inner.run(job).await }
            });
            inner.track(task.abort_handle());
        });

        Self { inner, debouncer }
    }

    // == Request ==
    /// Schedules a debounced compile of `source`. Returns its generation.
    pub fn request(&self, source: impl Into<String>) -> u64 {
        if !self.is_alive() {
            return self.inner.generation.load(Ordering::SeqCst);
        }
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.debouncer.schedule(Job {
            generation,
            source: source.into(),
        });
        generation
    }

    // == Compile Now ==
    /// Compiles immediately, bypassing the debounce and leaving the preview
    /// state untouched. Used for downloads.
    pub async fn compile_now(&self, source: &str) -> Result<Bytes> {
        self.inner.fetch(source).await.map(|(pdf, _)| pdf)
    }

    // == Reset ==
    /// Cancels the pending compile and invalidates any in-flight result.
    pub fn reset(&self) {
        self.debouncer.cancel();
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }

    // == Teardown ==
    /// Stops the session: cancels pending and in-flight work and releases
    /// the displayed PDF. Idempotent.
    pub fn teardown(&self) {
        self.inner.alive.store(false, Ordering::SeqCst);
        self.debouncer.cancel();
        self.inner.generation.fetch_add(1, Ordering::SeqCst);

        for task in self.inner.tasks.lock().drain(..) {
            task.abort();
        }

        let mut state = self.inner.state.lock();
        if let Some(handle) = state.current.take() {
            self.inner.handles.release(handle);
        }
        state.origin = None;
        self.inner.cache.lock().clear();
    }

    // == Accessors ==
    pub fn state(&self) -> PreviewState {
        self.inner.state.lock().clone()
    }

    /// Bytes of the PDF currently displayed.
    pub fn current_pdf(&self) -> Option<Bytes> {
        let handle = self.inner.state.lock().current?;
        self.inner.handles.resolve(handle)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::SeqCst)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn live_handles(&self) -> usize {
        self.inner.handles.live_count()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.lock().stats()
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
