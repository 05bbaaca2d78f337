//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Replace serenity context with messenger + prefix
//! - 1.0.0: Initial implementation with core shared state

use super::messenger::Messenger;

/// Shared, immutable context for all command handlers
///
/// One instance lives for the whole process and is shared behind an `Arc`.
#[derive(Clone)]
pub struct CommandContext {
    pub messenger: Messenger,
    pub prefix: String,
}

impl CommandContext {
    pub fn new(messenger: Messenger, prefix: impl Into<String>) -> Self {
        Self {
            messenger,
            prefix: prefix.into(),
        }
    }

    /// Text following the command token, trimmed
    ///
    /// `"!stats Player One"` yields `"Player One"`.
    pub fn args<'a>(&self, content: &'a str) -> &'a str {
        command_args(&self.prefix, content)
    }
}

/// Split a prefixed message into its command token
///
/// Returns `None` if the prefix is missing or no token directly follows it.
pub fn command_token<'a>(prefix: &str, content: &'a str) -> Option<&'a str> {
    let rest = content.strip_prefix(prefix)?;
    let token = rest.split(char::is_whitespace).next().unwrap_or("");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

pub fn command_args<'a>(prefix: &str, content: &'a str) -> &'a str {
    let Some(rest) = content.strip_prefix(prefix) else {
        return "";
    };
    match rest.find(char::is_whitespace) {
        Some(idx) => rest[idx..].trim(),
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        // CommandContext is shared across concurrent dispatches
        fn assert_clone_send_sync<T: Clone + Send + Sync>() {}
        assert_clone_send_sync::<CommandContext>();
    }

    #[test]
    fn test_command_token() {
        assert_eq!(command_token("!", "!stats PlayerOne"), Some("stats"));
        assert_eq!(command_token("!", "!help"), Some("help"));
        assert_eq!(command_token("!", "!stats\tPlayerOne"), Some("stats"));
        assert_eq!(command_token("?!", "?!help me"), Some("help"));
    }

    #[test]
    fn test_command_token_requires_prefix_and_token() {
        assert_eq!(command_token("!", "stats PlayerOne"), None);
        assert_eq!(command_token("!", "!"), None);
        assert_eq!(command_token("!", "! stats"), None);
        assert_eq!(command_token("!", ""), None);
    }

    #[test]
    fn test_command_args() {
        assert_eq!(command_args("!", "!stats Player One"), "Player One");
        assert_eq!(command_args("!", "!stats   PlayerOne  "), "PlayerOne");
        assert_eq!(command_args("!", "!stats"), "");
        assert_eq!(command_args("!", "no prefix here"), "");
    }
}
