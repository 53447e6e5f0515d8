//! Request, response, and domain models
//!
//! [`ResumeData`] is the structured resume fed to templates; the request and
//! response DTOs are the JSON bodies of the HTTP API.

pub mod requests;
pub mod responses;
pub mod resume;

// Re-export commonly used types
pub use requests::{CompileRequest, EngineQuery};
pub use responses::{
    HealthResponse, LatexResponse, StatsResponse, TemplateListResponse, TemplateSummary,
};
pub use resume::{
    Achievement, Basics, Certification, Education, Profile, Project, ResumeData, SkillGroup, Work,
};
