//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Purges expired compiled PDFs from the server cache

mod cleanup;

pub use cleanup::spawn_cleanup_task;
