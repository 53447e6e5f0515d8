//! Compile Module
//!
//! Turns LaTeX source into a PDF through an external build service, with
//! content-addressed caching in front of it.
//!
//! Per request: validate, look up the cache, dispatch upstream under a hard
//! timeout, interpret the response, store successful artifacts.

mod backend;
mod build_log;
mod engine;
mod service;

pub use backend::{CompilerBackend, HttpCompiler};
pub use build_log::{truncate_log, MAX_LOG_CHARS};
pub use engine::Engine;
pub use service::{CacheStatus, CompileOutput, CompileService};

use std::time::Duration;

// == Public Constants ==
/// Largest accepted document, in characters
pub const MAX_SOURCE_CHARS: usize = 500_000;

/// Hard limit on one upstream compile
pub const COMPILE_TIMEOUT: Duration = Duration::from_secs(90);
