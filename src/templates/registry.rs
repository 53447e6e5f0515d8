//! Template Registry
//!
//! Built once at startup from a static table. Duplicate ids are a fatal
//! configuration error rather than a silent overwrite.

use std::collections::HashMap;

use tracing::debug;

use crate::error::RegistryError;
use crate::models::ResumeData;

use super::{builtin_templates, Template};

/// Template served whenever a requested id is unknown.
pub const DEFAULT_TEMPLATE_ID: &str = super::classic::ID;

// == Resolved ==
/// Outcome of an id lookup with fallback applied.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub template: &'a Template,
    /// True when the requested id was unknown and the default was used
    pub fallback: bool,
}

// == Template Registry ==
#[derive(Debug)]
pub struct TemplateRegistry {
    /// Registration order
    templates: Vec<Template>,
    index: HashMap<&'static str, usize>,
    default_index: usize,
}

impl TemplateRegistry {
    // == Constructors ==
    /// Builds a registry from `templates`, which must contain `default_id`.
    pub fn from_templates(
        templates: impl IntoIterator<Item = Template>,
        default_id: &str,
    ) -> Result<Self, RegistryError> {
        let mut templates_vec = Vec::new();
        let mut index = HashMap::new();
        for template in templates {
            insert(&mut templates_vec, &mut index, template)?;
        }

        let default_index = *index
            .get(default_id)
            .ok_or_else(|| RegistryError::MissingDefault(default_id.to_string()))?;

        Ok(Self {
            templates: templates_vec,
            index,
            default_index,
        })
    }

    /// The built-in template table with `classic` as the default.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_templates(builtin_templates(), DEFAULT_TEMPLATE_ID)
    }

    // == Register ==
    /// Adds a template after construction. Fails if the id is taken.
    pub fn register(&mut self, template: Template) -> Result<(), RegistryError> {
        insert(&mut self.templates, &mut self.index, template)
    }

    // == Lookup ==
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    /// All templates in registration order.
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn default_id(&self) -> &'static str {
        self.default_template().id()
    }

    pub fn default_template(&self) -> &Template {
        &self.templates[self.default_index]
    }

    /// Looks up `id`, substituting the default template when it is unknown.
    pub fn resolve(&self, id: &str) -> Resolved<'_> {
        match self.get(id) {
            Some(template) => Resolved {
                template,
                fallback: false,
            },
            None => {
                debug!("Unknown template '{}', using default '{}'", id, self.default_id());
                Resolved {
                    template: self.default_template(),
                    fallback: true,
                }
            }
        }
    }

    /// Renders `resume` with `id`, or with the default template if `id` is
    /// unknown.
    pub fn generate(&self, id: &str, resume: &ResumeData) -> String {
        self.resolve(id).template.generate(resume)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn insert(
    templates: &mut Vec<Template>,
    index: &mut HashMap<&'static str, usize>,
    template: Template,
) -> Result<(), RegistryError> {
    if index.contains_key(template.id()) {
        return Err(RegistryError::DuplicateId(template.id().to_string()));
    }
    index.insert(template.id(), templates.len());
    templates.push(template);
    Ok(())
}
