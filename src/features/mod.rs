//! # Features
//!
//! Domain features backing the built-in commands.

pub mod stats;

pub use stats::{HaloStatsClient, LookupError, ProfileLookup, ProfileRecord};
