//! Templates Module
//!
//! Pure LaTeX generators over [`ResumeData`] and the registry that looks
//! them up by id.
//!
//! Every generator must be deterministic: the same resume always produces
//! byte-identical LaTeX, because the compile cache is keyed on that text.

pub mod classic;
pub mod compact;
mod document;
pub mod escape;
pub mod modern;
mod registry;


use std::fmt;

use serde::Serialize;

use crate::models::ResumeData;

pub use escape::{escape_latex, escape_url};
pub use registry::{Resolved, TemplateRegistry, DEFAULT_TEMPLATE_ID};

/// Signature shared by every template generator.
pub type GeneratorFn = fn(&ResumeData) -> String;

// == Category ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Professional,
    Modern,
    Compact,
}

// == Metadata ==
/// Display information for the template gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    pub tags: &'static [&'static str],
    pub is_premium: bool,
    /// Path of the gallery thumbnail
    pub preview_ref: &'static str,
}

// == Template ==
/// A named, versioned generator.
#[derive(Clone)]
pub struct Template {
    id: &'static str,
    version: u32,
    metadata: TemplateMetadata,
    generator: GeneratorFn,
}

impl Template {
    pub fn new(
        id: &'static str,
        version: u32,
        metadata: TemplateMetadata,
        generator: GeneratorFn,
    ) -> Self {
        Self {
            id,
            version,
            metadata,
            generator,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    /// Renders a complete LaTeX document. Never mutates the input.
    pub fn generate(&self, resume: &ResumeData) -> String {
        (self.generator)(resume)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// The statically known template table, in gallery order.
pub fn builtin_templates() -> Vec<Template> {
    vec![classic::template(), modern::template(), compact::template()]
}
