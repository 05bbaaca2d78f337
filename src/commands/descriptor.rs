//! Command metadata and authorization policy
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial descriptor with permission level and channel whitelist

use serenity::model::permissions::Permissions;

pub const DEFAULT_DESCRIPTION: &str = "No description provided";
pub const DEFAULT_USAGE: &str = "No usage provided";

/// Immutable metadata for one command
///
/// Built once when the command is constructed. The builder methods consume
/// `self`, so a descriptor can't change once a handler owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    usage: String,
    required_permissions: Permissions,
    whitelist: Option<Vec<String>>,
}

impl CommandDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            usage: DEFAULT_USAGE.to_string(),
            required_permissions: Permissions::SEND_MESSAGES,
            whitelist: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.required_permissions = permissions;
        self
    }

    /// Restrict the command to the named channels
    pub fn with_whitelist<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = Some(channels.into_iter().map(Into::into).collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn required_permissions(&self) -> Permissions {
        self.required_permissions
    }

    pub fn channel_whitelist(&self) -> Option<&[String]> {
        self.whitelist.as_deref()
    }

    /// Whether the channel passes the whitelist (always true without one)
    pub fn allows_channel(&self, channel_name: &str) -> bool {
        match &self.whitelist {
            Some(channels) => channels.iter().any(|c| c == channel_name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let descriptor = CommandDescriptor::new("ping");
        assert_eq!(descriptor.name(), "ping");
        assert_eq!(descriptor.description(), DEFAULT_DESCRIPTION);
        assert_eq!(descriptor.usage(), DEFAULT_USAGE);
        assert_eq!(descriptor.required_permissions(), Permissions::SEND_MESSAGES);
        assert!(descriptor.channel_whitelist().is_none());
        assert!(descriptor.allows_channel("anywhere"));
    }

    #[test]
    fn test_builder_overrides() {
        let descriptor = CommandDescriptor::new("ban")
            .with_description("Ban a member")
            .with_usage("!ban [member]")
            .with_permissions(Permissions::BAN_MEMBERS)
            .with_whitelist(["mod-log"]);

        assert_eq!(descriptor.description(), "Ban a member");
        assert_eq!(descriptor.usage(), "!ban [member]");
        assert_eq!(descriptor.required_permissions(), Permissions::BAN_MEMBERS);
        assert_eq!(descriptor.channel_whitelist(), Some(&["mod-log".to_string()][..]));
    }

    #[test]
    fn test_whitelist_membership() {
        let descriptor = CommandDescriptor::new("stats").with_whitelist(["halo", "bots"]);
        assert!(descriptor.allows_channel("halo"));
        assert!(descriptor.allows_channel("bots"));
        assert!(!descriptor.allows_channel("general"));
        // Exact match, no case folding
        assert!(!descriptor.allows_channel("Halo"));
    }

    #[test]
    fn test_empty_whitelist_allows_nothing() {
        let descriptor = CommandDescriptor::new("locked").with_whitelist(Vec::<String>::new());
        assert!(!descriptor.allows_channel("general"));
    }
}
