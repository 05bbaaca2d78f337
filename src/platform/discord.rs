//! Serenity-backed chat platform
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Resolve guild roles over HTTP when the cache has not caught up
//! - 1.0.0: Initial serenity implementation of ChatPlatform

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use serenity::http::Http;
use serenity::model::channel::{Channel, ChannelType, GuildChannel, Message};
use serenity::model::guild::Role;
use serenity::model::id::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use serenity::prelude::Context;
use std::collections::HashMap;
use std::sync::Arc;

use super::{ChannelRef, ChatPlatform, IncomingMessage, OutboundMessage, SentMessage};
use crate::core::embeds::to_create_embed;
use crate::core::truncate_for_message;

/// ChatPlatform implementation over the serenity HTTP client
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    async fn send(&self, channel: &ChannelRef, message: OutboundMessage) -> Result<SentMessage> {
        let channel_id = ChannelId(channel.id);
        let sent = match message {
            OutboundMessage::Text(text) => {
                channel_id
                    .say(&self.http, truncate_for_message(&text))
                    .await?
            }
            OutboundMessage::Embed(embed) => {
                let embed = to_create_embed(&embed);
                channel_id
                    .send_message(&self.http, |m| m.set_embed(embed))
                    .await?
            }
        };

        Ok(SentMessage {
            channel_id: sent.channel_id.0,
            message_id: sent.id.0,
        })
    }

    async fn delete(&self, message: &SentMessage) -> Result<()> {
        ChannelId(message.channel_id)
            .delete_message(&self.http, MessageId(message.message_id))
            .await?;
        Ok(())
    }
}

/// Look up the guild channel a message was posted in (cache first, then HTTP)
async fn guild_channel(ctx: &Context, channel_id: ChannelId) -> Option<GuildChannel> {
    if let Some(channel) = ctx.cache.guild_channel(channel_id) {
        return Some(channel);
    }
    match ctx.http.get_channel(channel_id.0).await {
        Ok(Channel::Guild(channel)) => Some(channel),
        Ok(_) => None,
        Err(e) => {
            debug!("Failed to fetch channel {channel_id}: {e}");
            None
        }
    }
}

type RolePermissions = HashMap<RoleId, Permissions>;

fn role_permissions(roles: &HashMap<RoleId, Role>) -> RolePermissions {
    roles
        .iter()
        .map(|(id, role)| (*id, role.permissions))
        .collect()
}

/// Owner and role table of a guild (cache first, then HTTP)
async fn guild_roles(ctx: &Context, guild_id: GuildId) -> Option<(UserId, RolePermissions)> {
    if let Some(guild) = ctx.cache.guild(guild_id) {
        return Some((guild.owner_id, role_permissions(&guild.roles)));
    }
    match guild_id.to_partial_guild(&ctx.http).await {
        Ok(guild) => Some((guild.owner_id, role_permissions(&guild.roles))),
        Err(e) => {
            debug!("Failed to fetch guild {guild_id}: {e}");
            None
        }
    }
}

/// Guild-level permissions: @everyone plus every role the member holds
fn member_permissions(
    guild_id: GuildId,
    roles: &RolePermissions,
    member_roles: &[RoleId],
) -> Permissions {
    let everyone = roles
        .get(&RoleId(guild_id.0))
        .copied()
        .unwrap_or_else(Permissions::empty);
    member_roles
        .iter()
        .filter_map(|role_id| roles.get(role_id))
        .fold(everyone, |acc, permissions| acc | *permissions)
}

/// Build the dispatcher's view of a serenity message
///
/// Permissions are the guild-level union of @everyone and the author's roles;
/// channel overwrites are not applied.
pub async fn incoming_from_serenity(ctx: &Context, msg: &Message) -> IncomingMessage {
    let channel = guild_channel(ctx, msg.channel_id).await;
    let (name, is_text_channel) = match &channel {
        Some(gc) => (
            gc.name.clone(),
            matches!(gc.kind, ChannelType::Text | ChannelType::News),
        ),
        None => (String::new(), false),
    };

    let (permissions, is_owner_or_admin) = match msg.guild_id {
        Some(guild_id) => match guild_roles(ctx, guild_id).await {
            Some((owner_id, roles)) => {
                let role_ids = msg.member.as_ref().map(|m| m.roles.as_slice()).unwrap_or(&[]);
                let permissions = member_permissions(guild_id, &roles, role_ids);
                (
                    permissions,
                    owner_id == msg.author.id || permissions.administrator(),
                )
            }
            None => {
                warn!(
                    "⚠️ Could not resolve guild {guild_id} for message {}; treating author as unprivileged",
                    msg.id
                );
                (Permissions::empty(), false)
            }
        },
        None => (Permissions::empty(), false),
    };

    IncomingMessage {
        content: msg.content.clone(),
        author_id: msg.author.id.0,
        channel: ChannelRef::new(msg.channel_id.0, name),
        is_text_channel,
        permissions,
        is_owner_or_admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(guild_id: GuildId) -> RolePermissions {
        HashMap::from([
            (RoleId(guild_id.0), Permissions::SEND_MESSAGES),
            (RoleId(10), Permissions::MANAGE_MESSAGES),
            (RoleId(11), Permissions::BAN_MEMBERS),
        ])
    }

    #[test]
    fn test_everyone_role_always_applies() {
        let guild_id = GuildId(1);
        let permissions = member_permissions(guild_id, &roles(guild_id), &[]);
        assert_eq!(permissions, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_member_roles_are_unioned() {
        let guild_id = GuildId(1);
        let permissions = member_permissions(guild_id, &roles(guild_id), &[RoleId(10), RoleId(11)]);
        assert!(permissions.contains(
            Permissions::SEND_MESSAGES | Permissions::MANAGE_MESSAGES | Permissions::BAN_MEMBERS
        ));
        assert!(!permissions.administrator());
    }

    #[test]
    fn test_unknown_roles_ignored() {
        let guild_id = GuildId(1);
        let permissions = member_permissions(guild_id, &roles(guild_id), &[RoleId(99)]);
        assert_eq!(permissions, Permissions::SEND_MESSAGES);
    }
}
