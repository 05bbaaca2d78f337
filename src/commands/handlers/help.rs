//! Help command handler
//!
//! Handles: help
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::commands::context::CommandContext;
use crate::commands::descriptor::CommandDescriptor;
use crate::commands::handler::{Command, RegistryAwareCommand};
use crate::commands::messenger::EmbedOptions;
use crate::commands::registry::CommandRegistry;
use crate::platform::IncomingMessage;

pub const HELP_TITLE: &str = "Available commands";

/// Lists every loaded command; needs the registry to do so
pub struct HelpHandler {
    descriptor: CommandDescriptor,
}

impl HelpHandler {
    pub fn new(prefix: &str) -> Self {
        Self {
            descriptor: CommandDescriptor::new("help")
                .with_description("List all available commands")
                .with_usage(format!("{prefix}help")),
        }
    }
}

#[async_trait]
impl Command for HelpHandler {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn run(&self, _ctx: &CommandContext, _msg: &IncomingMessage) -> Result<bool> {
        Err(anyhow!("help must be dispatched with the command registry"))
    }

    fn as_registry_aware(&self) -> Option<&dyn RegistryAwareCommand> {
        Some(self)
    }
}

#[async_trait]
impl RegistryAwareCommand for HelpHandler {
    async fn run_with_registry(
        &self,
        ctx: &CommandContext,
        msg: &IncomingMessage,
        registry: &CommandRegistry,
    ) -> Result<()> {
        let listing = command_listing(&ctx.prefix, registry);
        ctx.messenger
            .send_success(EmbedOptions::new(&msg.channel, HELP_TITLE).description(listing))
            .await?;
        Ok(())
    }
}

/// One entry per command, in registry order
pub fn command_listing(prefix: &str, registry: &CommandRegistry) -> String {
    registry
        .all()
        .iter()
        .map(|command| {
            let descriptor = command.descriptor();
            format!(
                "**{prefix}{}** - {}\nUsage: `{}`",
                descriptor.name(),
                descriptor.description(),
                descriptor.usage()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::messenger::Messenger;
    use crate::commands::testing::{message, RecordingPlatform};
    use crate::core::SUCCESS_COLOR;
    use std::sync::Arc;

    struct Listed(CommandDescriptor);

    #[async_trait]
    impl Command for Listed {
        fn descriptor(&self) -> &CommandDescriptor {
            &self.0
        }

        async fn run(&self, _ctx: &CommandContext, _msg: &IncomingMessage) -> Result<bool> {
            Ok(true)
        }
    }

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Listed(
            CommandDescriptor::new("stats")
                .with_description("Get stats for a specified gamertag")
                .with_usage("!stats [gamertag]"),
        )));
        registry.register(Arc::new(HelpHandler::new("!")));
        registry.register(Arc::new(Listed(CommandDescriptor::new("ping"))));
        registry
    }

    #[test]
    fn test_listing_in_registry_order() {
        let listing = command_listing("!", &registry());
        assert_eq!(
            listing,
            "**!stats** - Get stats for a specified gamertag\nUsage: `!stats [gamertag]`\n\n\
             **!help** - List all available commands\nUsage: `!help`\n\n\
             **!ping** - No description provided\nUsage: `No usage provided`"
        );
    }

    #[test]
    fn test_listing_empty_registry() {
        assert_eq!(command_listing("!", &CommandRegistry::new()), "");
    }

    #[tokio::test]
    async fn test_run_with_registry_sends_listing() {
        let platform = Arc::new(RecordingPlatform::new());
        let ctx = CommandContext::new(Messenger::new(platform.clone(), None), "!");
        let handler = HelpHandler::new("!");

        handler
            .run_with_registry(&ctx, &message("!help", "general"), &registry())
            .await
            .unwrap();

        let embeds = platform.sent_embeds();
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].title.as_deref(), Some(HELP_TITLE));
        assert_eq!(embeds[0].color, Some(SUCCESS_COLOR));
        assert!(embeds[0].description.as_deref().unwrap().starts_with("**!stats**"));
    }

    #[tokio::test]
    async fn test_plain_run_is_an_error() {
        let platform = Arc::new(RecordingPlatform::new());
        let ctx = CommandContext::new(Messenger::new(platform.clone(), None), "!");
        let handler = HelpHandler::new("!");

        assert!(handler.run(&ctx, &message("!help", "general")).await.is_err());
        assert!(handler.as_registry_aware().is_some());
        assert!(platform.calls().is_empty());
    }
}
