//! Success/fail notice rendering shared by all commands
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial success/fail embeds with delayed auto-delete

use anyhow::Result;
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::core::{Embed, FAIL_COLOR, SUCCESS_COLOR};
use crate::platform::{ChannelRef, ChatPlatform, OutboundMessage, SentMessage};

/// Parameters for a success or fail notice
#[derive(Debug, Clone)]
pub struct EmbedOptions {
    pub channel: ChannelRef,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub deletable: bool,
}

impl EmbedOptions {
    pub fn new(channel: &ChannelRef, title: impl Into<String>) -> Self {
        Self {
            channel: channel.clone(),
            title: title.into(),
            description: None,
            image: None,
            deletable: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Remove the notice after the configured delay
    pub fn deletable(mut self) -> Self {
        self.deletable = true;
        self
    }
}

/// Sends notices through the chat platform
#[derive(Clone)]
pub struct Messenger {
    platform: Arc<dyn ChatPlatform>,
    delete_after: Option<Duration>,
}

impl Messenger {
    /// `delete_after` of `None` or zero disables auto-delete
    pub fn new(platform: Arc<dyn ChatPlatform>, delete_after: Option<Duration>) -> Self {
        Self {
            platform,
            delete_after: delete_after.filter(|d| !d.is_zero()),
        }
    }

    pub fn delete_after(&self) -> Option<Duration> {
        self.delete_after
    }

    /// Send a notice with the success accent
    pub async fn send_success(&self, options: EmbedOptions) -> Result<SentMessage> {
        self.send_notice(options, SUCCESS_COLOR).await
    }

    /// Send a notice with the failure accent
    pub async fn send_fail(&self, options: EmbedOptions) -> Result<SentMessage> {
        self.send_notice(options, FAIL_COLOR).await
    }

    async fn send_notice(&self, options: EmbedOptions, color: u32) -> Result<SentMessage> {
        let mut embed = Embed::new().title(options.title).color(color);
        if let Some(description) = options.description.filter(|d| !d.is_empty()) {
            embed = embed.description(description);
        }
        if let Some(image) = options.image.filter(|i| !i.is_empty()) {
            embed = embed.image(image);
        }

        let sent = self
            .platform
            .send(&options.channel, OutboundMessage::Embed(embed))
            .await?;

        if options.deletable {
            self.schedule_delete(sent);
        }
        Ok(sent)
    }

    /// Delete `message` after the configured delay on a detached task
    ///
    /// Returns `None` when auto-delete is disabled. The caller never waits on
    /// the deletion and its failure is only logged.
    pub fn schedule_delete(&self, message: SentMessage) -> Option<JoinHandle<()>> {
        let delay = self.delete_after?;
        let platform = Arc::clone(&self.platform);
        Some(tokio::spawn(async move {
            sleep(delay).await;
            if let Err(e) = platform.delete(&message).await {
                debug!(
                    "Auto-delete of message {} in channel {} failed: {e}",
                    message.message_id, message.channel_id
                );
            }
        }))
    }

    pub async fn send_text(&self, channel: &ChannelRef, text: impl Into<String>) -> Result<SentMessage> {
        self.platform
            .send(channel, OutboundMessage::Text(text.into()))
            .await
    }

    pub async fn send_embed(&self, channel: &ChannelRef, embed: Embed) -> Result<SentMessage> {
        self.platform.send(channel, OutboundMessage::Embed(embed)).await
    }

    pub async fn delete(&self, message: &SentMessage) -> Result<()> {
        self.platform.delete(message).await
    }
}
