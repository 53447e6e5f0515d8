//! LaTeX escaping
//!
//! Every user-supplied string passes through one of these before it is
//! embedded in a generated document.

/// Escapes text so LaTeX typesets it literally.
///
/// Covers the ten control characters `\ & % $ # _ { } ~ ^` plus `<` and `>`,
/// which the default OT1 encoding would otherwise print as other glyphs.
/// Single pass, so replacements are never escaped twice.
pub fn escape_latex(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 8);
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '<' => out.push_str("\\textless{}"),
            '>' => out.push_str("\\textgreater{}"),
            // Stray line breaks would end paragraphs mid-entry
            '\r' => {}
            '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes a URL for the first argument of `\href`.
///
/// hyperref reads most URL characters verbatim; only the ones that would
/// break argument parsing are escaped or percent-encoded.
pub fn escape_url(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.trim().chars() {
        match ch {
            '%' => out.push_str("\\%"),
            '#' => out.push_str("\\#"),
            '&' => out.push_str("\\&"),
            '$' => out.push_str("\\$"),
            '\\' => out.push_str("%5C"),
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            '^' => out.push_str("%5E"),
            ' ' => out.push_str("%20"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Strips the scheme and trailing slash for display, e.g.
/// `https://github.com/ada/` becomes `github.com/ada`.
pub fn display_url(url: &str) -> &str {
    let trimmed = url.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme)
        .trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape_latex("Senior Engineer, 2020 - 2024"), "Senior Engineer, 2020 - 2024");
    }

    #[test]
    fn test_each_control_character() {
        assert_eq!(escape_latex("&"), "\\&");
        assert_eq!(escape_latex("%"), "\\%");
        assert_eq!(escape_latex("$"), "\\$");
        assert_eq!(escape_latex("#"), "\\#");
        assert_eq!(escape_latex("_"), "\\_");
        assert_eq!(escape_latex("{"), "\\{");
        assert_eq!(escape_latex("}"), "\\}");
        assert_eq!(escape_latex("~"), "\\textasciitilde{}");
        assert_eq!(escape_latex("^"), "\\textasciicircum{}");
        assert_eq!(escape_latex("\\"), "\\textbackslash{}");
    }

    #[test]
    fn test_summary_example() {
        assert_eq!(
            escape_latex("50% growth & $2M saved"),
            "50\\% growth \\& \\$2M saved"
        );
    }

    #[test]
    fn test_backslash_not_double_escaped() {
        // The braces emitted for \textbackslash{} must stay unescaped
        assert_eq!(escape_latex("\\{"), "\\textbackslash{}\\{");
    }

    #[test]
    fn test_newlines_collapse() {
        assert_eq!(escape_latex("line one\r\nline two"), "line one line two");
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(escape_latex("Zoë Müller"), "Zoë Müller");
    }

    #[test]
    fn test_escape_url() {
        assert_eq!(
            escape_url(" https://example.com/a b?x=1&y=50%#top "),
            "https://example.com/a%20b?x=1\\&y=50\\%\\#top"
        );
        assert_eq!(escape_url("https://x.io/{id}"), "https://x.io/%7Bid%7D");
    }

    #[test]
    fn test_display_url() {
        assert_eq!(display_url("https://www.github.com/ada/"), "github.com/ada");
        assert_eq!(display_url("linkedin.com/in/ada"), "linkedin.com/in/ada");
    }
}
