//! !purge command handler

use crate::bot::views::{purge_confirmation, PURGE_RANGE};
use crate::bot::BotState;
use crate::platform::{ChatPlatform, Permission};
use crate::types::audit::AuditRecord;
use crate::types::error::{BotError, Result};
use crate::types::event::IncomingMessage;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const MAX_PURGE: i64 = 100;

/// Accepts 1..=100, anything else is a range error.
fn validate_amount(amount: Option<i64>) -> Result<u8> {
    match amount {
        Some(n) if (1..=MAX_PURGE).contains(&n) => Ok(n as u8),
        _ => Err(BotError::invalid_input(PURGE_RANGE)),
    }
}

pub async fn handle_purge(
    platform: Arc<dyn ChatPlatform>,
    msg: &IncomingMessage,
    amount: Option<i64>,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel_id = %msg.channel_id,
        guild_id = ?msg.guild_id,
        sender_id = %msg.author.id,
        requested = ?amount,
        "Handling !purge"
    );

    let permitted = match msg.guild_id {
        Some(guild_id) => {
            platform
                .has_permission(
                    guild_id,
                    msg.channel_id,
                    msg.author.id,
                    Permission::ManageMessages,
                )
                .await?
        }
        None => false,
    };
    if !permitted {
        return Err(BotError::missing_permission(
            Permission::ManageMessages.to_string(),
        ));
    }

    let amount = validate_amount(amount)?;

    let deleted = platform.bulk_delete(msg.channel_id, msg.id, amount).await?;
    debug!(
        channel_id = %msg.channel_id,
        requested = amount,
        deleted = deleted,
        "Messages purged"
    );

    let confirmation = platform
        .send_message(msg.channel_id, purge_confirmation(amount))
        .await?;
    delete_after(
        Arc::clone(&platform),
        msg.channel_id,
        confirmation,
        state.config.purge_confirmation_ttl,
    );

    state
        .audit
        .log(
            platform.as_ref(),
            msg.guild_id,
            AuditRecord::purge_command(&msg.author, msg.channel_id, amount),
        )
        .await;

    Ok(())
}

/// Removes a message after `ttl` in a detached task. Failures are ignored.
fn delete_after(
    platform: Arc<dyn ChatPlatform>,
    channel_id: ChannelId,
    message_id: MessageId,
    ttl: Duration,
) {
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        if let Err(e) = platform.delete_message(channel_id, message_id).await {
            debug!(
                channel_id = %channel_id,
                message_id = %message_id,
                error = %e,
                "Purge confirmation already gone"
            );
        }
    });
}
