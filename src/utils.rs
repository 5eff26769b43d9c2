//! Small logging helpers.

/// Truncate a string for logging purposes. Long strings keep their first
/// `max` characters with an ellipsis and byte-count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}
