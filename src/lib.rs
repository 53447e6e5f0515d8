//! texforge - LaTeX resume rendering and PDF compilation
//!
//! Renders structured resume data through versioned LaTeX templates and
//! compiles the result via a remote build service, caching PDFs by content
//! on both the server and the preview client.

pub mod api;
pub mod cache;
pub mod compile;
pub mod config;
pub mod error;
pub mod models;
pub mod preview;
pub mod tasks;
pub mod templates;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
