//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 3.0.0: Prefix commands: StatsHandler, HelpHandler
//! - 1.0.0: Initial extraction from monolithic command handling

pub mod help;
pub mod stats;

use std::sync::Arc;

use super::handler::Command;
use super::registry::CommandEntry;
use crate::core::Config;
use crate::features::stats::HaloStatsClient;

/// Registration table for every built-in command, in load order
///
/// Factories run once at startup; one that fails only loses its own command.
pub fn builtin_commands(config: &Config) -> Vec<CommandEntry> {
    let prefix = config.prefix.clone();
    let stats_prefix = config.prefix.clone();
    let stats_url = config.stats_api_url.clone();
    let stats_token = config.stats_api_token.clone();
    let stats_channels = config.stats_channels.clone();

    vec![
        CommandEntry::new("stats", move || {
            let client = HaloStatsClient::new(&stats_url, stats_token.clone())?;
            let mut handler = stats::StatsHandler::new(&stats_prefix, Arc::new(client));
            if let Some(channels) = &stats_channels {
                handler = handler.restricted_to(channels.iter().cloned());
            }
            Ok(Arc::new(handler) as Arc<dyn Command>)
        }),
        CommandEntry::new("help", move || {
            Ok(Arc::new(help::HelpHandler::new(&prefix)) as Arc<dyn Command>)
        }),
    ]
}
