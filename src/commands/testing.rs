//! Test doubles shared by the command tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serenity::model::permissions::Permissions;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::core::Embed;
use crate::platform::{ChannelRef, ChatPlatform, IncomingMessage, OutboundMessage, SentMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Send {
        channel: ChannelRef,
        message: OutboundMessage,
        sent: SentMessage,
    },
    Delete(SentMessage),
}

/// ChatPlatform that records every call in order
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    next_id: AtomicU64,
    fail_sends: bool,
    fail_deletes: bool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Send { message, .. } => Some(message),
                PlatformCall::Delete(_) => None,
            })
            .collect()
    }

    pub fn sent_embeds(&self) -> Vec<Embed> {
        self.sent()
            .into_iter()
            .filter_map(|message| match message {
                OutboundMessage::Embed(embed) => Some(embed),
                OutboundMessage::Text(_) => None,
            })
            .collect()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|message| match message {
                OutboundMessage::Text(text) => Some(text),
                OutboundMessage::Embed(_) => None,
            })
            .collect()
    }

    pub fn sent_channels(&self) -> Vec<ChannelRef> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Send { channel, .. } => Some(channel),
                PlatformCall::Delete(_) => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<SentMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Delete(message) => Some(message),
                PlatformCall::Send { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn send(&self, channel: &ChannelRef, message: OutboundMessage) -> Result<SentMessage> {
        if self.fail_sends {
            return Err(anyhow!("send rejected"));
        }
        let sent = SentMessage {
            channel_id: channel.id,
            message_id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };
        self.calls.lock().unwrap().push(PlatformCall::Send {
            channel: channel.clone(),
            message,
            sent,
        });
        Ok(sent)
    }

    async fn delete(&self, message: &SentMessage) -> Result<()> {
        if self.fail_deletes {
            return Err(anyhow!("Unknown Message"));
        }
        self.calls.lock().unwrap().push(PlatformCall::Delete(*message));
        Ok(())
    }
}

pub fn channel(name: &str) -> ChannelRef {
    let id = name
        .bytes()
        .fold(1000u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    ChannelRef::new(id, name)
}

/// A message from an ordinary member in a guild text channel
pub fn message(content: &str, channel_name: &str) -> IncomingMessage {
    IncomingMessage {
        content: content.to_string(),
        author_id: 7,
        channel: channel(channel_name),
        is_text_channel: true,
        permissions: Permissions::SEND_MESSAGES,
        is_owner_or_admin: false,
    }
}
