//! Command handler traits
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Prefix commands with descriptors and registry-aware capability
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;

use super::context::CommandContext;
use super::descriptor::CommandDescriptor;
use super::registry::CommandRegistry;
use crate::platform::IncomingMessage;

/// Trait for prefix command handlers
///
/// Each handler owns one descriptor and is dispatched by its name.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler {
///     descriptor: CommandDescriptor,
/// }
///
/// #[async_trait]
/// impl Command for PingHandler {
///     fn descriptor(&self) -> &CommandDescriptor {
///         &self.descriptor
///     }
///
///     async fn run(&self, ctx: &CommandContext, msg: &IncomingMessage) -> Result<bool> {
///         ctx.messenger.send_text(&msg.channel, "Pong!").await?;
///         Ok(true)
///     }
/// }
/// ```
#[async_trait]
pub trait Command: Send + Sync {
    fn descriptor(&self) -> &CommandDescriptor;

    fn name(&self) -> &str {
        self.descriptor().name()
    }

    /// Run the command for `msg`
    ///
    /// The returned flag reports whether the command succeeded. The
    /// dispatcher does not act on it.
    async fn run(&self, ctx: &CommandContext, msg: &IncomingMessage) -> Result<bool>;

    /// Registry access capability
    ///
    /// Handlers that need the whole registry (e.g. `help`) return `Some(self)`
    /// and are dispatched through `run_with_registry` instead of `run`.
    fn as_registry_aware(&self) -> Option<&dyn RegistryAwareCommand> {
        None
    }
}

/// Commands that run with a read-only view of every loaded command
#[async_trait]
pub trait RegistryAwareCommand: Command {
    async fn run_with_registry(
        &self,
        ctx: &CommandContext,
        msg: &IncomingMessage,
        registry: &CommandRegistry,
    ) -> Result<()>;
}
