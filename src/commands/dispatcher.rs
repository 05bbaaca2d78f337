//! Prefix command dispatcher
//!
//! Turns one inbound message into at most one handler execution:
//! filter on prefix, resolve the command, authorize, run, and contain
//! whatever the handler does wrong.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial dispatcher with registry-aware execution path

use anyhow::Result;
use log::{debug, error, info};
use std::sync::Arc;
use uuid::Uuid;

use super::context::{command_token, CommandContext};
use super::gate::{self, Authorization, Denial};
use super::handler::Command;
use super::registry::CommandRegistry;
use crate::platform::IncomingMessage;

/// Terminal state of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No prefix, nothing to do
    Ignored,
    /// Prefix present but no command by that name
    UnknownCommand,
    Denied(Denial),
    Completed,
    /// The handler returned an error or panicked; already logged
    Failed,
}

pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    ctx: Arc<CommandContext>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CommandRegistry>, ctx: Arc<CommandContext>) -> Self {
        Self { registry, ctx }
    }

    /// Find the handler a message is addressed to
    pub fn resolve(&self, content: &str) -> Option<Arc<dyn Command>> {
        let token = command_token(&self.ctx.prefix, content)?;
        self.registry.find_by_name(token)
    }

    /// Dispatch one message
    ///
    /// Never returns an error: handler faults are logged here and the
    /// dispatcher stays usable for the next message.
    pub async fn handle(&self, msg: &IncomingMessage) -> DispatchOutcome {
        if !msg.content.starts_with(&self.ctx.prefix) {
            return DispatchOutcome::Ignored;
        }

        let request_id = Uuid::new_v4();

        let Some(command) = self.resolve(&msg.content) else {
            debug!(
                "[{request_id}] ❓ No command for '{}'",
                msg.content.chars().take(50).collect::<String>()
            );
            return DispatchOutcome::UnknownCommand;
        };
        let name = command.name().to_string();

        if let Authorization::Denied(denial) =
            gate::check(&self.ctx.messenger, msg, command.descriptor()).await
        {
            info!(
                "[{request_id}] 🚫 '{name}' denied for user {} in #{}: {denial:?}",
                msg.author_id, msg.channel.name
            );
            return DispatchOutcome::Denied(denial);
        }

        info!(
            "[{request_id}] 🎯 Running '{name}' for user {} in #{}",
            msg.author_id, msg.channel.name
        );

        let registry = Arc::clone(&self.registry);
        let ctx = Arc::clone(&self.ctx);
        let msg = msg.clone();

        // Run on its own task so a panicking handler is contained too
        let execution = tokio::spawn(async move { execute(command, ctx, msg, registry).await });

        match execution.await {
            Ok(Ok(())) => {
                debug!("[{request_id}] ✅ '{name}' completed");
                DispatchOutcome::Completed
            }
            Ok(Err(e)) => {
                error!("[{request_id}] ❌ Error running command '{name}': {e:#}");
                DispatchOutcome::Failed
            }
            Err(e) => {
                error!("[{request_id}] 💥 Command '{name}' panicked: {e}");
                DispatchOutcome::Failed
            }
        }
    }
}

/// Invoke exactly one of the handler's entry points
async fn execute(
    command: Arc<dyn Command>,
    ctx: Arc<CommandContext>,
    msg: IncomingMessage,
    registry: Arc<CommandRegistry>,
) -> Result<()> {
    match command.as_registry_aware() {
        Some(aware) => aware.run_with_registry(&ctx, &msg, &registry).await,
        None => command.run(&ctx, &msg).await.map(|_| ()),
    }
}
