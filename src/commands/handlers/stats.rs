//! Stats command handler
//!
//! Handles: stats
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Blank record strings render as "None"
//! - 1.1.0: Remove the loading notice when the lookup fails too
//! - 1.0.0: Initial service record embed

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::descriptor::CommandDescriptor;
use crate::commands::handler::Command;
use crate::commands::messenger::EmbedOptions;
use crate::core::Embed;
use crate::features::stats::{ProfileLookup, ProfileRecord, SERVICE_RECORD_BASE_URL};
use crate::platform::IncomingMessage;

pub const LOADING_TEXT: &str = "Loading stats...";
pub const NOT_FOUND_TITLE: &str = "Gamertag not found";

/// Handler for `stats [gamertag]`
pub struct StatsHandler {
    descriptor: CommandDescriptor,
    lookup: Arc<dyn ProfileLookup>,
}

impl StatsHandler {
    pub fn new(prefix: &str, lookup: Arc<dyn ProfileLookup>) -> Self {
        Self {
            descriptor: CommandDescriptor::new("stats")
                .with_description("Get stats for a specified gamertag")
                .with_usage(format!("{prefix}stats [gamertag]")),
            lookup,
        }
    }

    /// Only answer in the named channels
    pub fn restricted_to<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptor = self.descriptor.with_whitelist(channels);
        self
    }
}

#[async_trait]
impl Command for StatsHandler {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn run(&self, ctx: &CommandContext, msg: &IncomingMessage) -> Result<bool> {
        let gamertag = ctx.args(&msg.content);

        if gamertag.is_empty() {
            ctx.messenger
                .send_fail(
                    EmbedOptions::new(&msg.channel, format!("Usage: {}", self.descriptor.usage()))
                        .deletable(),
                )
                .await?;
            return Ok(false);
        }

        info!("📊 Stats requested for '{gamertag}' by user {}", msg.author_id);

        let loading = ctx.messenger.send_text(&msg.channel, LOADING_TEXT).await?;
        let result = self.lookup.lookup(gamertag).await;

        if let Err(e) = ctx.messenger.delete(&loading).await {
            debug!("Failed to delete loading notice: {e}");
        }

        match result {
            Ok(profile) => {
                ctx.messenger
                    .send_embed(&msg.channel, stats_embed(&profile))
                    .await?;
                Ok(true)
            }
            Err(e) => {
                warn!("⚠️ Stats lookup for '{gamertag}' failed: {e}");
                ctx.messenger
                    .send_fail(EmbedOptions::new(&msg.channel, NOT_FOUND_TITLE).deletable())
                    .await?;
                Ok(false)
            }
        }
    }
}

/// Render a service record
pub fn stats_embed(profile: &ProfileRecord) -> Embed {
    let recent = profile.recent_record();
    let display_name = profile.display_name();
    let profile_url = if profile.gamertag.trim().is_empty() {
        None
    } else {
        service_record_url(&profile.gamertag)
    };

    let mut embed = Embed::new()
        .author(or_none(&display_name), profile_url)
        .field("Play time", or_none(&profile.playtime), false)
        .field("Games Played", profile.games_played, false)
        .field("Wins", profile.wins, true)
        .field("Losses", profile.losses, true)
        .field("Win Ratio", format!("{:.2}", profile.win_ratio), false)
        .field("Kills", profile.kills, true)
        .field("Deaths", profile.deaths, true)
        .field("K/D Ratio", format!("{:.2}", profile.kill_death_ratio), false)
        .field("Kills per Game", format!("{:.2}", profile.kills_per_game), true)
        .field("Deaths per Game", format!("{:.2}", profile.deaths_per_game), true)
        .field(
            "Last 20 games",
            format!("{} Wins, {} Losses", recent.wins, recent.losses),
            false,
        )
        .field("Current Streak", or_none(&profile.streak), false);

    if !profile.emblem.trim().is_empty() {
        embed = embed.thumbnail(&profile.emblem);
    }
    embed
}

/// Discord rejects empty field values and author names
fn or_none(value: &str) -> &str {
    if value.trim().is_empty() {
        "None"
    } else {
        value
    }
}

/// Halo Waypoint service record page, gamertag percent-encoded as one path segment
pub fn service_record_url(gamertag: &str) -> Option<String> {
    let mut url = Url::parse(SERVICE_RECORD_BASE_URL).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(gamertag);
    Some(url.to_string())
}
