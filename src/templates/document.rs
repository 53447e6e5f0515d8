//! Shared building blocks for template generators.

use super::escape::escape_latex;

// == Document Builder ==
/// Line-oriented LaTeX writer.
#[derive(Debug, Default)]
pub(crate) struct LatexDocument {
    out: String,
}

impl LatexDocument {
    pub(crate) fn new() -> Self {
        Self {
            out: String::with_capacity(8 * 1024),
        }
    }

    /// Appends one line of already-escaped LaTeX.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.out.push('\n');
    }

    pub(crate) fn begin(&mut self, env: &str) {
        self.line(format!("\\begin{{{env}}}"));
    }

    pub(crate) fn end(&mut self, env: &str) {
        self.line(format!("\\end{{{env}}}"));
    }

    /// Writes an itemize block of escaped items, or nothing when every item
    /// is blank.
    pub(crate) fn bullet_list(&mut self, env_options: &str, items: &[String]) {
        let items = non_blank(items);
        if items.is_empty() {
            return;
        }
        self.line(format!("\\begin{{itemize}}{env_options}"));
        for item in items {
            self.line(format!("  \\item {}", escape_latex(item)));
        }
        self.end("itemize");
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

// == Helpers ==
/// Items with surrounding whitespace removed, blanks dropped.
pub(crate) fn non_blank(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Escapes each non-blank part and joins them with a LaTeX separator.
pub(crate) fn join_escaped(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(escape_latex)
        .collect::<Vec<_>>()
        .join(separator)
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_list_skips_empty() {
        let mut doc = LatexDocument::new();
        doc.bullet_list("", &["  ".to_string(), String::new()]);
        assert_eq!(doc.finish(), "");
    }

    #[test]
    fn test_bullet_list_escapes_items() {
        let mut doc = LatexDocument::new();
        doc.bullet_list("[leftmargin=*]", &["Cut cost by 30%".to_string()]);
        assert_eq!(
            doc.finish(),
            "\\begin{itemize}[leftmargin=*]\n  \\item Cut cost by 30\\%\n\\end{itemize}\n"
        );
    }

    #[test]
    fn test_join_escaped() {
        assert_eq!(
            join_escaped(&["a@b.c", "", " R&D "], " $|$ "),
            "a@b.c $|$ R\\&D"
        );
    }
}
