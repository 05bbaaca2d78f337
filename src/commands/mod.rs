//! # Command System
//!
//! Prefix command (`!name args`) handling for guild text channels.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Prefix dispatch with descriptors, authorization gate and registry-aware handlers
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod descriptor;
pub mod dispatcher;
pub mod gate;
pub mod handler;
pub mod handlers;
pub mod manifest;
pub mod messenger;
pub mod registry;

#[cfg(test)]
mod testing;

// Re-export handler infrastructure
pub use context::{command_args, command_token, CommandContext};
pub use descriptor::CommandDescriptor;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use gate::{Authorization, Denial};
pub use handler::{Command, RegistryAwareCommand};
pub use manifest::CommandManifest;
pub use messenger::{EmbedOptions, Messenger};
pub use registry::{CommandEntry, CommandRegistry};
