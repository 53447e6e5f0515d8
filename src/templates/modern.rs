//! Modern template: sans-serif, accent-coloured headings, skills as a
//! two-column table.

use crate::models::{ResumeData, Work};

use super::document::{is_blank, join_escaped, non_blank, LatexDocument};
use super::escape::{display_url, escape_latex, escape_url};
use super::{Template, TemplateCategory, TemplateMetadata};

pub const ID: &str = "modern";

pub fn template() -> Template {
    Template::new(
        ID,
        1,
        TemplateMetadata {
            name: "Modern",
            description: "Sans-serif layout with an accent colour and compact skill table",
            category: TemplateCategory::Modern,
            tags: &["color", "sans-serif", "tech"],
            is_premium: false,
            preview_ref: "/templates/modern.png",
        },
        generate,
    )
}

const PREAMBLE: &str = r"\documentclass[a4paper,10pt]{article}

\usepackage[margin=0.6in]{geometry}
\usepackage[scaled]{helvet}
\renewcommand{\familydefault}{\sfdefault}
\usepackage[T1]{fontenc}
\usepackage{xcolor}
\usepackage{titlesec}
\usepackage{enumitem}
\usepackage{tabularx}
\usepackage[hidelinks]{hyperref}

\definecolor{accent}{HTML}{1F6FEB}
\pagestyle{empty}
\setlength{\parindent}{0pt}

\titleformat{\section}{\color{accent}\large\bfseries\uppercase}{}{0em}{}[{\color{accent}\titlerule[0.8pt]}]
\titlespacing*{\section}{0pt}{10pt}{6pt}

\newcommand{\entry}[4]{%
  \textbf{#1} \hfill {\color{gray}#2} \\
  \textit{#3} \hfill {\color{gray}\small #4} \\[-2pt]
}
";

const BULLETS: &str = "[leftmargin=1.2em, itemsep=1pt, topsep=2pt, label={\\color{accent}\\textbullet}]";

pub fn generate(resume: &ResumeData) -> String {
    let mut doc = LatexDocument::new();
    doc.line(PREAMBLE);
    doc.begin("document");
    doc.blank();

    header(&mut doc, resume);

    if !is_blank(&resume.basics.summary) {
        doc.line("\\section{Profile}");
        doc.line(escape_latex(resume.basics.summary.trim()));
        doc.blank();
    }

    if !resume.work.is_empty() {
        doc.line("\\section{Experience}");
        for job in &resume.work {
            work_entry(&mut doc, job);
        }
        doc.blank();
    }

    if !resume.projects.is_empty() {
        doc.line("\\section{Projects}");
        for project in &resume.projects {
            let mut heading = format!("\\textbf{{{}}}", escape_latex(project.name.trim()));
            if !is_blank(&project.url) {
                heading.push_str(&format!(
                    " \\hfill \\href{{{}}}{{\\color{{accent}}{}}}",
                    escape_url(&project.url),
                    escape_latex(display_url(&project.url))
                ));
            }
            doc.line(format!("{heading} \\\\"));
            if !is_blank(&project.description) {
                doc.line(format!("{} \\\\", escape_latex(project.description.trim())));
            }
            let keywords = non_blank(&project.keywords);
            if !keywords.is_empty() {
                doc.line(format!(
                    "{{\\color{{gray}}\\small {}}} \\\\",
                    join_escaped(&keywords, " \\textbullet{} ")
                ));
            }
            doc.bullet_list(BULLETS, &project.highlights);
            doc.line("\\vspace{4pt}");
        }
        doc.blank();
    }

    if !resume.education.is_empty() {
        doc.line("\\section{Education}");
        for edu in &resume.education {
            doc.line(format!(
                "\\entry{{{}}}{{{}}}{{{}}}{{{}}}",
                escape_latex(edu.institution.trim()),
                escape_latex(&edu.date_range()),
                escape_latex(&edu.degree()),
                escape_latex(edu.score.trim())
            ));
            doc.line("\\vspace{4pt}");
        }
        doc.blank();
    }

    let skill_rows: Vec<String> = resume
        .skills
        .iter()
        .filter(|g| !non_blank(&g.keywords).is_empty())
        .map(|g| {
            format!(
                "\\textbf{{{}}} & {} \\\\",
                escape_latex(g.name.trim()),
                join_escaped(&non_blank(&g.keywords), ", ")
            )
        })
        .collect();
    if !skill_rows.is_empty() {
        doc.line("\\section{Skills}");
        doc.line("\\begin{tabularx}{\\textwidth}{@{}l X@{}}");
        for row in skill_rows {
            doc.line(format!("  {row}"));
        }
        doc.line("\\end{tabularx}");
        doc.blank();
    }

    let achievements: Vec<String> = resume
        .achievements
        .iter()
        .filter(|a| !is_blank(&a.title))
        .map(|a| {
            let detail = join_escaped(&[a.description.as_str(), a.date.as_str()], " -- ");
            if detail.is_empty() {
                format!("\\textbf{{{}}}", escape_latex(a.title.trim()))
            } else {
                format!("\\textbf{{{}}}: {}", escape_latex(a.title.trim()), detail)
            }
        })
        .collect();
    if !achievements.is_empty() {
        doc.line("\\section{Achievements}");
        doc.line(format!("\\begin{{itemize}}{BULLETS}"));
        for item in achievements {
            doc.line(format!("  \\item {item}"));
        }
        doc.end("itemize");
        doc.blank();
    }

    let certifications: Vec<String> = resume
        .certifications
        .iter()
        .filter(|c| !is_blank(&c.name))
        .map(|c| {
            let rest = join_escaped(&[c.issuer.as_str(), c.date.as_str()], ", ");
            let name = escape_latex(c.name.trim());
            match (is_blank(&c.url), rest.is_empty()) {
                (true, true) => name,
                (true, false) => format!("{name} \\hfill {{\\color{{gray}}{rest}}}"),
                (false, true) => format!("\\href{{{}}}{{{name}}}", escape_url(&c.url)),
                (false, false) => format!(
                    "\\href{{{}}}{{{name}}} \\hfill {{\\color{{gray}}{rest}}}",
                    escape_url(&c.url)
                ),
            }
        })
        .collect();
    if !certifications.is_empty() {
        doc.line("\\section{Certifications}");
        doc.line(format!("\\begin{{itemize}}{BULLETS}"));
        for item in certifications {
            doc.line(format!("  \\item {item}"));
        }
        doc.end("itemize");
        doc.blank();
    }

    doc.end("document");
    doc.finish()
}

fn header(doc: &mut LatexDocument, resume: &ResumeData) {
    let basics = &resume.basics;
    if !is_blank(&basics.name) {
        doc.line(format!(
            "{{\\Huge\\bfseries {}}} \\\\[2pt]",
            escape_latex(basics.name.trim())
        ));
    }
    if !is_blank(&basics.title) {
        doc.line(format!(
            "{{\\large\\color{{accent}} {}}} \\\\[4pt]",
            escape_latex(basics.title.trim())
        ));
    }

    let mut contact = Vec::new();
    if !is_blank(&basics.email) {
        contact.push(format!(
            "\\href{{mailto:{}}}{{{}}}",
            escape_url(&basics.email),
            escape_latex(basics.email.trim())
        ));
    }
    for plain in [&basics.phone, &basics.location] {
        if !is_blank(plain) {
            contact.push(escape_latex(plain.trim()));
        }
    }
    let urls = std::iter::once(basics.website.as_str())
        .chain(basics.profiles.iter().map(|p| p.url.as_str()));
    for url in urls.filter(|u| !is_blank(u)) {
        contact.push(format!(
            "\\href{{{}}}{{{}}}",
            escape_url(url),
            escape_latex(display_url(url))
        ));
    }
    if !contact.is_empty() {
        doc.line(format!("{{\\small {}}}", contact.join(" \\quad ")));
    }
    doc.blank();
}

fn work_entry(doc: &mut LatexDocument, job: &Work) {
    doc.line(format!(
        "\\entry{{{}}}{{{}}}{{{}}}{{{}}}",
        escape_latex(job.position.trim()),
        escape_latex(&job.date_range()),
        escape_latex(job.company.trim()),
        escape_latex(job.location.trim())
    ));
    doc.bullet_list(BULLETS, &job.highlights);
    doc.line("\\vspace{4pt}");
}
