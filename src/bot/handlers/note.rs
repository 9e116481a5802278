//! !note command handler
//!
//! Moves a note from the current channel into the notes channel. The original
//! message is only removed once the note has been posted.

use crate::bot::views::{self, EMPTY_NOTE};
use crate::bot::BotState;
use crate::platform::ChatPlatform;
use crate::types::audit::AuditRecord;
use crate::types::error::{BotError, Result};
use crate::types::event::IncomingMessage;
use std::sync::Arc;
use tracing::{debug, warn};

pub async fn handle_note(
    platform: Arc<dyn ChatPlatform>,
    msg: &IncomingMessage,
    text: &str,
    state: Arc<BotState>,
) -> Result<()> {
    debug!(
        channel_id = %msg.channel_id,
        guild_id = ?msg.guild_id,
        sender_id = %msg.author.id,
        note_len = text.len(),
        "Handling !note"
    );

    if text.is_empty() {
        return Err(BotError::invalid_input(EMPTY_NOTE));
    }

    let notes_channel = state.config.notes_channel_id;
    let guild_id = msg
        .guild_id
        .ok_or_else(|| BotError::channel_unavailable(notes_channel))?;
    if !platform.is_text_channel_in(guild_id, notes_channel).await? {
        return Err(BotError::channel_unavailable(notes_channel));
    }

    let note_id = platform
        .send_message(notes_channel, views::note(&msg.author, text))
        .await?;
    debug!(notes_channel = %notes_channel, message_id = %note_id, "Note posted");

    if let Err(e) = platform.delete_message(msg.channel_id, msg.id).await {
        warn!(
            channel_id = %msg.channel_id,
            message_id = %msg.id,
            error = %e,
            "Note posted but original message could not be deleted"
        );
    }

    state
        .audit
        .log(
            platform.as_ref(),
            msg.guild_id,
            AuditRecord::note_command(&msg.author, msg.channel_id, text),
        )
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::state::test_support::*;
    use crate::platform::mock::MockPlatform;
    use serenity::model::id::ChannelId;

    fn platform_with_channels() -> MockPlatform {
        MockPlatform::new()
            .with_text_channel(ChannelId::new(NOTES_CHANNEL))
            .with_text_channel(ChannelId::new(LOG_CHANNEL))
    }

    #[tokio::test]
    async fn test_note_posted_and_original_removed() {
        let platform = Arc::new(platform_with_channels());
        let msg = message("!note bring the map");

        handle_note(platform.clone(), &msg, "bring the map", test_state())
            .await
            .unwrap();

        let notes = platform.sent_to(ChannelId::new(NOTES_CHANNEL));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].embeds[0].description.as_deref(), Some("bring the map"));
        assert_eq!(platform.deletions(), 1);

        let logged = platform.sent_to(ChannelId::new(LOG_CHANNEL));
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].embeds[0].fields[0].value, "bring the map");
    }

    #[tokio::test]
    async fn test_empty_note_rejected() {
        let platform = Arc::new(platform_with_channels());

        let err = handle_note(platform.clone(), &message("!note   "), "", test_state())
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::InvalidInput { .. }));
        assert_eq!(err.to_string(), EMPTY_NOTE);
        assert!(platform.recorded_actions().is_empty());
    }

    #[tokio::test]
    async fn test_missing_notes_channel_keeps_original() {
        let platform = Arc::new(MockPlatform::new());

        let err = handle_note(platform.clone(), &message("!note hi"), "hi", test_state())
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::ChannelUnavailable { .. }));
        assert!(platform.sent_to(ChannelId::new(NOTES_CHANNEL)).is_empty());
        assert_eq!(platform.deletions(), 0);
    }

    #[tokio::test]
    async fn test_post_failure_keeps_original() {
        let platform = Arc::new(
            platform_with_channels().with_send_result(Err("Missing Access".to_string())),
        );

        let err = handle_note(platform.clone(), &message("!note hi"), "hi", test_state())
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::Platform { .. }));
        assert_eq!(platform.deletions(), 0);
    }

    #[tokio::test]
    async fn test_note_outside_guild_fails() {
        let platform = Arc::new(platform_with_channels());
        let mut msg = message("!note hi");
        msg.guild_id = None;

        let err = handle_note(platform.clone(), &msg, "hi", test_state())
            .await
            .unwrap_err();

        assert!(matches!(err, BotError::ChannelUnavailable { .. }));
        assert!(platform.recorded_actions().is_empty());
    }
}
