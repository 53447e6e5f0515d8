//! API Module
//!
//! HTTP handlers and routing for the compile service REST API.
//!
//! # Endpoints
//! - `POST /api/compile` - Compile LaTeX source to PDF
//! - `GET /api/templates` - List registered templates
//! - `POST /api/templates/:id/latex` - Render resume data to LaTeX
//! - `POST /api/templates/:id/pdf` - Render resume data and compile it
//! - `GET /stats` - Server cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
