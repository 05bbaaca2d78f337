//! Discord message limits and truncation helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Add embed title and field limits
//! - 1.0.0: Initial truncation helpers

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord embed title limit
pub const EMBED_TITLE_LIMIT: usize = 256;
/// Discord embed field name limit
pub const FIELD_NAME_LIMIT: usize = 256;
/// Discord embed field value limit
pub const FIELD_VALUE_LIMIT: usize = 1024;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Truncate text to at most `limit` bytes, adding an ellipsis if needed (UTF-8 safe)
pub fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    if limit < 3 {
        return ".".repeat(limit);
    }
    // Find a safe UTF-8 boundary
    let mut end = limit - 3; // Room for "..."
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit embed description limit
pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

/// Truncate text to fit message limit
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_embed_short() {
        let text = "short text";
        assert_eq!(truncate_for_embed(text), text);
    }

    #[test]
    fn test_truncate_for_embed_long() {
        let text = "a".repeat(5000);
        let result = truncate_for_embed(&text);
        assert!(result.len() <= EMBED_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_for_message_exactly_at_limit() {
        let text = "a".repeat(MESSAGE_LIMIT);
        assert_eq!(truncate_for_message(&text), text);
    }

    #[test]
    fn test_utf8_safety() {
        let text = "世界".repeat(200);
        let result = truncate_to(&text, FIELD_NAME_LIMIT);
        assert!(result.len() <= FIELD_NAME_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_tiny_limit() {
        assert_eq!(truncate_to("abcdef", 2), "..");
    }
}
