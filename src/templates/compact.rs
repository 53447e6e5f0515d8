//! Compact template: tight margins and run-in headings for dense one-page
//! resumes.

use crate::models::ResumeData;

use super::document::{is_blank, join_escaped, non_blank, LatexDocument};
use super::escape::{escape_latex, escape_url};
use super::{Template, TemplateCategory, TemplateMetadata};

pub const ID: &str = "compact";

pub fn template() -> Template {
    Template::new(
        ID,
        1,
        TemplateMetadata {
            name: "Compact",
            description: "Dense one-page layout with narrow margins",
            category: TemplateCategory::Compact,
            tags: &["one-page", "dense", "academic"],
            is_premium: true,
            preview_ref: "/templates/compact.png",
        },
        generate,
    )
}

const PREAMBLE: &str = r"\documentclass[10pt]{article}

\usepackage[letterpaper,margin=0.4in]{geometry}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{titlesec}

\pagestyle{empty}
\setlength{\parindent}{0pt}
\setlist{nosep, leftmargin=1em}
\titleformat{\section}{\normalsize\bfseries}{}{0em}{}[\vspace{-6pt}\rule{\linewidth}{0.4pt}]
\titlespacing*{\section}{0pt}{6pt}{3pt}
";

pub fn generate(resume: &ResumeData) -> String {
    let mut doc = LatexDocument::new();
    doc.line(PREAMBLE);
    doc.begin("document");
    doc.line("\\small");
    doc.blank();

    let basics = &resume.basics;
    let headline = join_escaped(&[basics.name.as_str(), basics.title.as_str()], " -- ");
    if !headline.is_empty() {
        doc.line(format!("{{\\LARGE\\bfseries {headline}}} \\\\"));
    }
    let mut contact = vec![join_escaped(
        &[basics.email.as_str(), basics.phone.as_str(), basics.location.as_str()],
        " \\textbullet{} ",
    )];
    contact.extend(
        std::iter::once(&basics.website)
            .chain(basics.profiles.iter().map(|p| &p.url))
            .filter(|url| !is_blank(url))
            .map(|url| format!("\\url{{{}}}", escape_url(url))),
    );
    contact.retain(|c| !c.is_empty());
    if !contact.is_empty() {
        doc.line(contact.join(" \\textbullet{} "));
    }
    doc.blank();

    if !is_blank(&basics.summary) {
        doc.line(format!("\\textit{{{}}}", escape_latex(basics.summary.trim())));
        doc.blank();
    }

    if !resume.work.is_empty() {
        doc.line("\\section*{Experience}");
        for job in &resume.work {
            let title = join_escaped(&[job.position.as_str(), job.company.as_str()], ", ");
            let place = join_escaped(&[job.location.as_str(), job.date_range().as_str()], "; ");
            doc.line(format!("\\textbf{{{title}}} \\hfill {place}"));
            doc.bullet_list("", &job.highlights);
        }
        doc.blank();
    }

    if !resume.education.is_empty() {
        doc.line("\\section*{Education}");
        for edu in &resume.education {
            let title = join_escaped(&[edu.institution.as_str(), edu.degree().as_str()], ", ");
            let detail = join_escaped(&[edu.score.as_str(), edu.date_range().as_str()], "; ");
            doc.line(format!("\\textbf{{{title}}} \\hfill {detail} \\\\"));
        }
        doc.blank();
    }

    if !resume.projects.is_empty() {
        doc.line("\\section*{Projects}");
        for project in &resume.projects {
            let mut line = format!("\\textbf{{{}}}", escape_latex(project.name.trim()));
            if !is_blank(&project.description) {
                line.push_str(&format!(": {}", escape_latex(project.description.trim())));
            }
            let keywords = non_blank(&project.keywords);
            if !keywords.is_empty() {
                line.push_str(&format!(" \\textit{{({})}}", join_escaped(&keywords, ", ")));
            }
            if is_blank(&project.url) {
                doc.line(line);
            } else {
                doc.line(format!("{line} \\hfill \\url{{{}}}", escape_url(&project.url)));
            }
            doc.bullet_list("", &project.highlights);
        }
        doc.blank();
    }

    let skills: Vec<_> = resume
        .skills
        .iter()
        .filter(|g| !non_blank(&g.keywords).is_empty())
        .collect();
    if !skills.is_empty() {
        doc.line("\\section*{Skills}");
        doc.line("\\begin{description}[nosep, leftmargin=0pt]");
        for group in skills {
            doc.line(format!(
                "  \\item[{{{}}}:] {}",
                escape_latex(group.name.trim()),
                join_escaped(&non_blank(&group.keywords), ", ")
            ));
        }
        doc.end("description");
        doc.blank();
    }

    let honours: Vec<String> = resume
        .achievements
        .iter()
        .filter(|a| !is_blank(&a.title))
        .map(|a| join_escaped(&[a.title.as_str(), a.description.as_str(), a.date.as_str()], ", "))
        .chain(
            resume
                .certifications
                .iter()
                .filter(|c| !is_blank(&c.name))
                .map(|c| join_escaped(&[c.name.as_str(), c.issuer.as_str(), c.date.as_str()], ", ")),
        )
        .collect();
    if !honours.is_empty() {
        doc.line("\\section*{Achievements \\& Certifications}");
        doc.begin("itemize");
        for item in honours {
            doc.line(format!("  \\item {item}"));
        }
        doc.end("itemize");
        doc.blank();
    }

    doc.end("document");
    doc.finish()
}
