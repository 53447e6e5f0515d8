//! Compiler log handling.

use std::collections::BTreeMap;

/// Upper bound on log text returned to callers.
pub const MAX_LOG_CHARS: usize = 5000;

/// Cuts `log` to at most [`MAX_LOG_CHARS`] characters, on a char boundary.
pub fn truncate_log(log: &str) -> String {
    match log.char_indices().nth(MAX_LOG_CHARS) {
        Some((cut, _)) => log[..cut].to_string(),
        None => log.to_string(),
    }
}

/// Flattens the build service's `log_files` map into one truncated string.
///
/// `.log` files come first since they carry the TeX error trace.
pub(crate) fn collect_logs(log_files: &BTreeMap<String, String>) -> Option<String> {
    let (logs, others): (Vec<_>, Vec<_>) = log_files
        .iter()
        .filter(|(_, content)| !content.trim().is_empty())
        .partition(|(name, _)| name.ends_with(".log"));

    let combined = logs
        .into_iter()
        .chain(others)
        .map(|(name, content)| format!("== {name} ==\n{content}"))
        .collect::<Vec<_>>()
        .join("\n");

    if combined.is_empty() {
        None
    } else {
        Some(truncate_log(&combined))
    }
}
