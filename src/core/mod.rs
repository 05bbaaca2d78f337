//! # Core Module
//!
//! Configuration, embed model and Discord limits shared by the bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add embeds module with the platform-neutral embed model
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use embeds::{Embed, EmbedAuthor, EmbedField, FAIL_COLOR, SUCCESS_COLOR};
pub use response::{truncate_for_embed, truncate_for_message, EMBED_LIMIT, MESSAGE_LIMIT};
