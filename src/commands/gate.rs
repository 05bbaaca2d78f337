//! Per-command authorization gate
//!
//! Checks run in a fixed order and the first failure wins:
//! text channel, channel whitelist, then permissions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::error;

use super::descriptor::CommandDescriptor;
use super::messenger::{EmbedOptions, Messenger};
use crate::platform::IncomingMessage;

pub const CHANNEL_DENIED_TITLE: &str = "This command cannot be used in this channel";
pub const CHANNEL_DENIED_DESCRIPTION: &str = "If you are stuck please message a staff member";
pub const PERMISSION_DENIED_TITLE: &str = "You do not have permission to use this command";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Not sent from a guild text channel; denied without a notice
    NotTextChannel,
    /// Channel is not in the command's whitelist
    ChannelNotAllowed,
    /// Author lacks the required permissions
    MissingPermission,
}

impl Denial {
    /// The fail notice to show, as (title, description)
    pub fn notice(&self) -> Option<(&'static str, Option<&'static str>)> {
        match self {
            Denial::NotTextChannel => None,
            Denial::ChannelNotAllowed => Some((CHANNEL_DENIED_TITLE, Some(CHANNEL_DENIED_DESCRIPTION))),
            Denial::MissingPermission => Some((PERMISSION_DENIED_TITLE, None)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied(Denial),
}

impl Authorization {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Authorization::Allowed)
    }
}

/// Decide whether `msg` may run the command described by `descriptor`
pub fn evaluate(msg: &IncomingMessage, descriptor: &CommandDescriptor) -> Authorization {
    if !msg.is_text_channel {
        return Authorization::Denied(Denial::NotTextChannel);
    }

    if !descriptor.allows_channel(&msg.channel.name) {
        return Authorization::Denied(Denial::ChannelNotAllowed);
    }

    // Guild owners and administrators satisfy every requirement
    if !msg.is_owner_or_admin && !msg.permissions.contains(descriptor.required_permissions()) {
        return Authorization::Denied(Denial::MissingPermission);
    }

    Authorization::Allowed
}

/// Evaluate and, on a visible denial, post the fail notice to the origin channel
pub async fn check(
    messenger: &Messenger,
    msg: &IncomingMessage,
    descriptor: &CommandDescriptor,
) -> Authorization {
    let decision = evaluate(msg, descriptor);

    if let Authorization::Denied(denial) = decision {
        if let Some((title, description)) = denial.notice() {
            let mut options = EmbedOptions::new(&msg.channel, title);
            if let Some(description) = description {
                options = options.description(description);
            }
            if let Err(e) = messenger.send_fail(options).await {
                error!(
                    "Failed to send denial notice for '{}' in channel {}: {e}",
                    descriptor.name(),
                    msg.channel.id
                );
            }
        }
    }

    decision
}
