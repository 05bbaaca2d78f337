//! # Feature: Halo Stats
//!
//! Service record lookup for Halo: The Master Chief Collection players,
//! plus the aggregates shown by the `stats` command.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with HTTP lookup and trailing-window record

pub mod client;
pub mod profile;

pub use client::{HaloStatsClient, LookupError, ProfileLookup};
pub use profile::{GameResult, ProfileRecord, RecentRecord};

/// Public service record page for a gamertag
pub const SERVICE_RECORD_BASE_URL: &str = "https://www.halowaypoint.com/en-us/games/halo-the-master-chief-collection/xbox-one/service-records/players/";
