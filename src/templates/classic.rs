//! Classic template: single column, small caps section rules.
//!
//! The default template. Conservative layout that survives every ATS parser.

use crate::models::ResumeData;

use super::document::{is_blank, join_escaped, non_blank, LatexDocument};
use super::escape::{display_url, escape_latex, escape_url};
use super::{Template, TemplateCategory, TemplateMetadata};

pub const ID: &str = "classic";

pub fn template() -> Template {
    Template::new(
        ID,
        1,
        TemplateMetadata {
            name: "Classic",
            description: "Single-column layout with ruled small-caps section headings",
            category: TemplateCategory::Professional,
            tags: &["ats-friendly", "single-column", "serif"],
            is_premium: false,
            preview_ref: "/templates/classic.png",
        },
        generate,
    )
}

const PREAMBLE: &str = r"\documentclass[letterpaper,11pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage[usenames,dvipsnames]{color}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage[english]{babel}
\usepackage{tabularx}

\pagestyle{empty}

\addtolength{\oddsidemargin}{-0.5in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1in}
\addtolength{\topmargin}{-.5in}
\addtolength{\textheight}{1.0in}

\urlstyle{same}
\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large
}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}
\newcommand{\resumeProjectHeading}[2]{
    \item
    \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
      \small#1 & #2 \\
    \end{tabular*}\vspace{-7pt}
}
\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
";

const BULLETS: &str = "[leftmargin=0.2in, itemsep=-2pt]";

pub fn generate(resume: &ResumeData) -> String {
    let mut doc = LatexDocument::new();
    doc.line(PREAMBLE);
    doc.begin("document");
    doc.blank();

    header(&mut doc, resume);
    summary(&mut doc, resume);
    education(&mut doc, resume);
    experience(&mut doc, resume);
    projects(&mut doc, resume);
    skills(&mut doc, resume);
    achievements(&mut doc, resume);
    certifications(&mut doc, resume);

    doc.end("document");
    doc.finish()
}

fn header(doc: &mut LatexDocument, resume: &ResumeData) {
    let basics = &resume.basics;
    let mut contact: Vec<String> = Vec::new();
    if !is_blank(&basics.phone) {
        contact.push(escape_latex(basics.phone.trim()));
    }
    if !is_blank(&basics.email) {
        contact.push(format!(
            "\\href{{mailto:{}}}{{\\underline{{{}}}}}",
            escape_url(&basics.email),
            escape_latex(basics.email.trim())
        ));
    }
    if !is_blank(&basics.location) {
        contact.push(escape_latex(basics.location.trim()));
    }
    if !is_blank(&basics.website) {
        contact.push(link(&basics.website, ""));
    }
    for profile in &basics.profiles {
        if !is_blank(&profile.url) {
            contact.push(link(&profile.url, &profile.username));
        }
    }

    doc.begin("center");
    if !is_blank(&basics.name) {
        doc.line(format!(
            "  \\textbf{{\\Huge \\scshape {}}} \\\\ \\vspace{{1pt}}",
            escape_latex(basics.name.trim())
        ));
    }
    if !is_blank(&basics.title) {
        doc.line(format!("  \\large {} \\\\ \\vspace{{1pt}}", escape_latex(basics.title.trim())));
    }
    if !contact.is_empty() {
        doc.line(format!("  \\small {}", contact.join(" $|$ ")));
    }
    doc.end("center");
    doc.blank();
}

fn link(url: &str, label: &str) -> String {
    let shown = if is_blank(label) { display_url(url) } else { label.trim() };
    format!(
        "\\href{{{}}}{{\\underline{{{}}}}}",
        escape_url(url),
        escape_latex(shown)
    )
}

fn summary(doc: &mut LatexDocument, resume: &ResumeData) {
    if is_blank(&resume.basics.summary) {
        return;
    }
    doc.line("\\section{Summary}");
    doc.line(format!("\\small{{{}}}", escape_latex(resume.basics.summary.trim())));
    doc.blank();
}

fn education(doc: &mut LatexDocument, resume: &ResumeData) {
    if resume.education.is_empty() {
        return;
    }
    doc.line("\\section{Education}");
    doc.line("  \\resumeSubHeadingListStart");
    for edu in &resume.education {
        let gpa = if is_blank(&edu.score) {
            String::new()
        } else {
            format!("GPA: {}", edu.score.trim())
        };
        let degree = join_escaped(&[edu.degree().as_str(), gpa.as_str()], ", ");
        doc.line(format!(
            "    \\resumeSubheading{{{}}}{{{}}}{{{}}}{{{}}}",
            escape_latex(edu.institution.trim()),
            escape_latex(edu.location.trim()),
            degree,
            escape_latex(&edu.date_range())
        ));
    }
    doc.line("  \\resumeSubHeadingListEnd");
    doc.blank();
}

fn experience(doc: &mut LatexDocument, resume: &ResumeData) {
    if resume.work.is_empty() {
        return;
    }
    doc.line("\\section{Experience}");
    doc.line("  \\resumeSubHeadingListStart");
    for job in &resume.work {
        doc.line(format!(
            "    \\resumeSubheading{{{}}}{{{}}}{{{}}}{{{}}}",
            escape_latex(job.position.trim()),
            escape_latex(&job.date_range()),
            escape_latex(job.company.trim()),
            escape_latex(job.location.trim())
        ));
        doc.bullet_list(BULLETS, &job.highlights);
    }
    doc.line("  \\resumeSubHeadingListEnd");
    doc.blank();
}

fn projects(doc: &mut LatexDocument, resume: &ResumeData) {
    if resume.projects.is_empty() {
        return;
    }
    doc.line("\\section{Projects}");
    doc.line("  \\resumeSubHeadingListStart");
    for project in &resume.projects {
        let keywords = non_blank(&project.keywords);
        let mut title = format!("\\textbf{{{}}}", escape_latex(project.name.trim()));
        if !keywords.is_empty() {
            title.push_str(&format!(" $|$ \\emph{{{}}}", join_escaped(&keywords, ", ")));
        }
        let right = if is_blank(&project.url) {
            String::new()
        } else {
            link(&project.url, "")
        };
        doc.line(format!("    \\resumeProjectHeading{{{title}}}{{{right}}}"));

        let mut bullets = Vec::with_capacity(project.highlights.len() + 1);
        if !is_blank(&project.description) {
            bullets.push(project.description.clone());
        }
        bullets.extend(project.highlights.iter().cloned());
        doc.bullet_list(BULLETS, &bullets);
    }
    doc.line("  \\resumeSubHeadingListEnd");
    doc.blank();
}

fn skills(doc: &mut LatexDocument, resume: &ResumeData) {
    let groups: Vec<_> = resume
        .skills
        .iter()
        .filter(|g| !non_blank(&g.keywords).is_empty())
        .collect();
    if groups.is_empty() {
        return;
    }
    doc.line("\\section{Technical Skills}");
    doc.line(" \\begin{itemize}[leftmargin=0.15in, label={}]");
    doc.line("    \\small{\\item{");
    let rows: Vec<String> = groups
        .iter()
        .map(|group| {
            format!(
                "     \\textbf{{{}}}{{: {}}}",
                escape_latex(group.name.trim()),
                join_escaped(&non_blank(&group.keywords), ", ")
            )
        })
        .collect();
    doc.line(rows.join(" \\\\\n"));
    doc.line("    }}");
    doc.line(" \\end{itemize}");
    doc.blank();
}

fn achievements(doc: &mut LatexDocument, resume: &ResumeData) {
    let items: Vec<String> = resume
        .achievements
        .iter()
        .filter(|a| !is_blank(&a.title))
        .map(|a| {
            let mut item = format!("\\textbf{{{}}}", escape_latex(a.title.trim()));
            if !is_blank(&a.description) {
                item.push_str(&format!(": {}", escape_latex(a.description.trim())));
            }
            if !is_blank(&a.date) {
                item.push_str(&format!(" \\hfill \\textit{{{}}}", escape_latex(a.date.trim())));
            }
            item
        })
        .collect();
    if items.is_empty() {
        return;
    }
    doc.line("\\section{Achievements}");
    doc.line(format!("\\begin{{itemize}}{BULLETS}"));
    for item in items {
        doc.line(format!("  \\item {item}"));
    }
    doc.end("itemize");
    doc.blank();
}

fn certifications(doc: &mut LatexDocument, resume: &ResumeData) {
    let items: Vec<String> = resume
        .certifications
        .iter()
        .filter(|c| !is_blank(&c.name))
        .map(|c| {
            let name = if is_blank(&c.url) {
                format!("\\textbf{{{}}}", escape_latex(c.name.trim()))
            } else {
                format!(
                    "\\textbf{{\\href{{{}}}{{{}}}}}",
                    escape_url(&c.url),
                    escape_latex(c.name.trim())
                )
            };
            let mut item = name;
            if !is_blank(&c.issuer) {
                item.push_str(&format!(", {}", escape_latex(c.issuer.trim())));
            }
            if !is_blank(&c.date) {
                item.push_str(&format!(" \\hfill \\textit{{{}}}", escape_latex(c.date.trim())));
            }
            item
        })
        .collect();
    if items.is_empty() {
        return;
    }
    doc.line("\\section{Certifications}");
    doc.line(format!("\\begin{{itemize}}{BULLETS}"));
    for item in items {
        doc.line(format!("  \\item {item}"));
    }
    doc.end("itemize");
    doc.blank();
}
