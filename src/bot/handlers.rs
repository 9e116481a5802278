use crate::bot::failure::report_command_failure;
use crate::bot::{BotState, Command};
use crate::platform::ChatPlatform;
use crate::types::event::IncomingMessage;
use std::sync::Arc;
use tracing::debug;

pub mod dice;
pub mod interactions;
pub mod note;
pub mod purge;
pub mod roll;

pub use dice::handle_dice_button;
pub use interactions::dispatch_interaction;
pub use note::handle_note;
pub use purge::handle_purge;
pub use roll::handle_roll;

/// Routes a text message to its command handler.
///
/// Bot authors and unrecognised text are ignored silently. Handler errors go
/// through the shared failure policy so every command reports the same way.
pub async fn dispatch_message(
    platform: Arc<dyn ChatPlatform>,
    msg: IncomingMessage,
    state: Arc<BotState>,
) {
    if msg.is_bot {
        return;
    }

    let Some(command) = Command::parse(&msg.content) else {
        return;
    };
    debug!(
        command = command.name(),
        channel_id = %msg.channel_id,
        sender_id = %msg.author.id,
        "Dispatching command"
    );

    let result = match &command {
        Command::Roll => handle_roll(Arc::clone(&platform), &msg, state).await,
        Command::Purge(amount) => handle_purge(Arc::clone(&platform), &msg, *amount, state).await,
        Command::Note(text) => handle_note(Arc::clone(&platform), &msg, text, state).await,
    };

    if let Err(e) = result {
        report_command_failure(platform.as_ref(), &msg, &command, e).await;
    }
}
