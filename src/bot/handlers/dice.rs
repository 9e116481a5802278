//! Dice button handler
//!
//! Rolls the pressed die and rewrites the channel's active prompt with the
//! result, keeping the buttons so the prompt can be reused.

use crate::bot::failure::{InteractionFailure, RollStage};
use crate::bot::views::roll_result;
use crate::bot::BotState;
use crate::platform::ChatPlatform;
use crate::types::audit::AuditRecord;
use crate::types::dice::{DieSpec, RollOutcome};
use crate::types::event::ButtonPress;
use std::sync::Arc;
use tracing::{debug, warn};

pub async fn handle_dice_button(
    platform: Arc<dyn ChatPlatform>,
    press: &ButtonPress,
    die: DieSpec,
    state: Arc<BotState>,
) -> std::result::Result<RollOutcome, InteractionFailure> {
    let mut stage = RollStage::Received;
    debug!(
        channel_id = %press.channel_id,
        user_id = %press.user.id,
        die = %die,
        stage = ?stage,
        "Handling dice button"
    );

    let outcome = state.roll(die);
    stage = RollStage::RollComputed;
    debug!(
        value = outcome.value,
        critical = outcome.critical,
        stage = ?stage,
        "Roll computed"
    );

    match state.prompts.get(press.channel_id).await {
        Some(prompt_id) => {
            stage = RollStage::EditAttempted;
            platform
                .edit_message(
                    press.channel_id,
                    prompt_id,
                    roll_result(&press.user, &outcome),
                )
                .await
                .map_err(|e| InteractionFailure::new(stage, e))?;
        }
        None => {
            warn!(
                channel_id = %press.channel_id,
                "No active dice prompt recorded for channel, result not shown"
            );
        }
    }

    platform
        .acknowledge_interaction(&press.interaction)
        .await
        .map_err(|e| InteractionFailure::new(stage, e))?;
    stage = RollStage::Acknowledged;
    debug!(stage = ?stage, "Interaction acknowledged");

    state
        .audit
        .log(
            platform.as_ref(),
            press.guild_id,
            AuditRecord::dice_rolled(&press.user, press.channel_id, &outcome),
        )
        .await;
    stage = RollStage::LogAttempted;
    debug!(stage = ?stage, "Dice button handled");

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::state::test_support::*;
    use crate::platform::mock::{MockPlatform, PlatformAction};
    use serenity::model::id::{ChannelId, MessageId};

    #[tokio::test]
    async fn test_cached_prompt_edited_in_place() {
        let platform = Arc::new(MockPlatform::new());
        let state = test_state();
        state
            .prompts
            .set(ChannelId::new(PLAY_CHANNEL), MessageId::new(4242))
            .await;

        let outcome = handle_dice_button(platform.clone(), &button("d20"), DieSpec::D20, state)
            .await
            .unwrap();

        let actions = platform.recorded_actions();
        let edits: Vec<&PlatformAction> = actions
            .iter()
            .filter(|a| matches!(a, PlatformAction::EditMessage { .. }))
            .collect();
        assert_eq!(edits.len(), 1);
        match edits[0] {
            PlatformAction::EditMessage {
                channel_id,
                message_id,
                message,
            } => {
                assert_eq!(*channel_id, ChannelId::new(PLAY_CHANNEL));
                assert_eq!(*message_id, MessageId::new(4242));
                assert_eq!(message.button_count(), 4);
                assert_eq!(message.embeds[0].color, Some(outcome.color()));
            }
            _ => unreachable!(),
        }
        assert!(platform.sent_to(ChannelId::new(PLAY_CHANNEL)).is_empty());
    }

    #[tokio::test]
    async fn test_cache_miss_still_acknowledges() {
        let platform = Arc::new(MockPlatform::new());

        let result = handle_dice_button(platform.clone(), &button("d6"), DieSpec::D6, test_state()).await;

        assert!(result.is_ok());
        let actions = platform.recorded_actions();
        assert!(!actions
            .iter()
            .any(|a| matches!(a, PlatformAction::EditMessage { .. })));
        assert!(actions
            .iter()
            .any(|a| matches!(a, PlatformAction::Acknowledge { .. })));
    }

    #[tokio::test]
    async fn test_edit_failure_reported_before_ack() {
        let platform = Arc::new(MockPlatform::new().with_edit_result(Err("Unknown Message".to_string())));
        let state = test_state();
        state
            .prompts
            .set(ChannelId::new(PLAY_CHANNEL), MessageId::new(1))
            .await;

        let failure = handle_dice_button(platform.clone(), &button("d8"), DieSpec::D8, state)
            .await
            .unwrap_err();

        assert_eq!(failure.stage, RollStage::EditAttempted);
        assert!(!failure.stage.is_acknowledged());
        assert!(!platform
            .recorded_actions()
            .iter()
            .any(|a| matches!(a, PlatformAction::Acknowledge { .. })));
    }

    #[tokio::test]
    async fn test_ack_failure_on_cache_miss() {
        let platform = Arc::new(
            MockPlatform::new().with_acknowledge_result(Err("Unknown interaction".to_string())),
        );

        let failure = handle_dice_button(platform.clone(), &button("d4"), DieSpec::D4, test_state())
            .await
            .unwrap_err();

        assert_eq!(failure.stage, RollStage::RollComputed);
    }

    #[tokio::test]
    async fn test_roll_is_audited() {
        let platform = Arc::new(MockPlatform::new().with_text_channel(ChannelId::new(LOG_CHANNEL)));

        let outcome = handle_dice_button(platform.clone(), &button("d20"), DieSpec::D20, test_state())
            .await
            .unwrap();

        let logged = platform.sent_to(ChannelId::new(LOG_CHANNEL));
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].embeds[0].title.as_deref(), Some("🎲 Dice Rolled"));
        assert_eq!(
            logged[0].embeds[0].description.as_deref(),
            Some(
                format!(
                    "**gandalf#0001** rolled a **{}** on a **D20** in <#10>",
                    outcome.value
                )
                .as_str()
            )
        );
    }
}
