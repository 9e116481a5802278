//! !roll command handler
//!
//! Posts a fresh dice prompt, remembers it as the channel's active prompt and
//! removes the triggering message.

use crate::bot::views::roll_prompt;
use crate::bot::BotState;
use crate::platform::ChatPlatform;
use crate::types::audit::AuditRecord;
use crate::types::error::Result;
use crate::types::event::IncomingMessage;
use std::sync::Arc;
use tracing::{debug, warn};

pub async fn handle_roll(
    platform: Arc<dyn ChatPlatform>,
    msg: &IncomingMessage,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel_id = %msg.channel_id,
        guild_id = ?msg.guild_id,
        sender_id = %msg.author.id,
        "Handling !roll"
    );

    let prompt_id = platform
        .send_message(msg.channel_id, roll_prompt(&msg.author))
        .await?;
    state.prompts.set(msg.channel_id, prompt_id).await;
    debug!(channel_id = %msg.channel_id, prompt_id = %prompt_id, "Dice prompt posted");

    // The prompt is already live, so a leftover command message is not a failure.
    if let Err(e) = platform.delete_message(msg.channel_id, msg.id).await {
        warn!(
            channel_id = %msg.channel_id,
            message_id = %msg.id,
            error = %e,
            "Failed to delete !roll command message"
        );
    }

    state
        .audit
        .log(
            platform.as_ref(),
            msg.guild_id,
            AuditRecord::roll_command(&msg.author, msg.channel_id),
        )
        .await;

    Ok(())
}
