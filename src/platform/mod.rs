//! # Chat Platform
//!
//! The narrow surface the command core needs from the chat platform:
//! inbound message context, outbound sends and deletes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Extract platform trait so dispatch can run without a gateway

pub mod discord;

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::permissions::Permissions;

use crate::core::Embed;

pub use discord::{incoming_from_serenity, DiscordPlatform};

/// A channel a message came from or is sent to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelRef {
    pub id: u64,
    pub name: String,
}

impl ChannelRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Handle to a message the bot has sent, used for later deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentMessage {
    pub channel_id: u64,
    pub message_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    Text(String),
    Embed(Embed),
}

/// Inbound message as seen by the dispatcher
///
/// Borrowed for a single dispatch; nothing holds on to it afterwards.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub content: String,
    pub author_id: u64,
    pub channel: ChannelRef,
    /// Whether the message came from a guild text channel
    pub is_text_channel: bool,
    /// Permissions the author holds in the guild
    pub permissions: Permissions,
    /// Guild owner or holder of ADMINISTRATOR
    pub is_owner_or_admin: bool,
}

/// Outbound side of the chat platform
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send(&self, channel: &ChannelRef, message: OutboundMessage) -> Result<SentMessage>;

    async fn delete(&self, message: &SentMessage) -> Result<()>;
}
