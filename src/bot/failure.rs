//! One policy for telling users that something went wrong.
//!
//! Text commands always get exactly one reply: user errors echo their own
//! message, platform errors get the command's generic notice. Button presses
//! get an ephemeral notice unless the interaction was already acknowledged.

use crate::bot::commands::Command;
use crate::bot::views::{PERMISSION_DENIED, ROLL_FAILED};
use crate::platform::ChatPlatform;
use crate::types::error::BotError;
use crate::types::event::{ButtonPress, IncomingMessage};
use tracing::{error, warn};

/// How far a button press got before it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RollStage {
    Received,
    RollComputed,
    EditAttempted,
    Acknowledged,
    LogAttempted,
}

impl RollStage {
    pub fn is_acknowledged(self) -> bool {
        self >= RollStage::Acknowledged
    }
}

#[derive(Debug)]
pub struct InteractionFailure {
    pub stage: RollStage,
    pub error: BotError,
}

impl InteractionFailure {
    pub fn new(stage: RollStage, error: BotError) -> Self {
        Self { stage, error }
    }
}

pub fn command_reply(command: &Command, error: &BotError) -> String {
    match error {
        BotError::InvalidInput { message } => message.clone(),
        BotError::MissingPermission { .. } => PERMISSION_DENIED.to_string(),
        _ => command.failure_notice().to_string(),
    }
}

pub async fn report_command_failure(
    platform: &dyn ChatPlatform,
    msg: &IncomingMessage,
    command: &Command,
    error: BotError,
) {
    if error.is_user_error() {
        warn!(
            command = command.name(),
            channel_id = %msg.channel_id,
            user_id = %msg.author.id,
            error = %error,
            "Command rejected"
        );
    } else {
        error!(
            command = command.name(),
            channel_id = %msg.channel_id,
            user_id = %msg.author.id,
            error = ?error,
            "Error handling command"
        );
    }

    let reply = command_reply(command, &error);
    if let Err(e) = platform.reply(msg.channel_id, msg.id, &reply).await {
        error!(
            command = command.name(),
            channel_id = %msg.channel_id,
            error = %e,
            "Failed to report command failure"
        );
    }
}

/// Logs a failed button press and, if Discord is still waiting for a response,
/// sends the presser an ephemeral notice.
///
/// The dice handler cannot fail after acknowledging today since audit logging
/// never errors; the acknowledged branch covers any fallible stage added later.
pub async fn report_interaction_failure(
    platform: &dyn ChatPlatform,
    press: &ButtonPress,
    failure: InteractionFailure,
) {
    error!(
        custom_id = %press.custom_id,
        channel_id = %press.channel_id,
        user_id = %press.user.id,
        stage = ?failure.stage,
        error = ?failure.error,
        "Error handling interaction"
    );

    if failure.stage.is_acknowledged() {
        return;
    }

    if let Err(e) = platform
        .respond_ephemeral(&press.interaction, ROLL_FAILED)
        .await
    {
        error!(
            custom_id = %press.custom_id,
            error = %e,
            "Failed to report interaction failure"
        );
    }
}
