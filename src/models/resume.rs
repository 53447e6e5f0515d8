//! Structured resume data
//!
//! The canonical input to every template generator. List order is render
//! order. Every string is raw user text and must be escaped before it is
//! embedded in LaTeX.

use serde::{Deserialize, Serialize};

/// A complete resume as edited in the form UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub basics: Basics,
    pub education: Vec<Education>,
    pub work: Vec<Work>,
    pub projects: Vec<Project>,
    pub skills: Vec<SkillGroup>,
    pub achievements: Vec<Achievement>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    pub name: String,
    /// Headline, e.g. "Senior Backend Engineer"
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
    pub profiles: Vec<Profile>,
}

/// Link to an external profile (GitHub, LinkedIn, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub network: String,
    pub username: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    /// Field of study
    pub area: String,
    /// Degree, e.g. "B.Sc."
    pub study_type: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// GPA or grade, free text
    pub score: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Work {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: String,
    pub keywords: Vec<String>,
    pub highlights: Vec<String>,
}

/// A skill category and its keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Achievement {
    pub title: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

impl Work {
    /// "Jan 2020 -- Present" style range, empty when both ends are blank.
    pub fn date_range(&self) -> String {
        date_range(&self.start_date, &self.end_date)
    }
}

impl Education {
    pub fn date_range(&self) -> String {
        date_range(&self.start_date, &self.end_date)
    }

    /// "B.Sc. in Computer Science", or whichever half is present.
    pub fn degree(&self) -> String {
        match (self.study_type.trim(), self.area.trim()) {
            ("", "") => String::new(),
            (kind, "") => kind.to_string(),
            ("", area) => area.to_string(),
            (kind, area) => format!("{kind} in {area}"),
        }
    }
}

/// Joins two raw dates with `--`, which survives escaping and typesets as
/// an en dash.
fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} -- {e}"),
    }
}
