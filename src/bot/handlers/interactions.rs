use crate::bot::failure::report_interaction_failure;
use crate::bot::handlers::handle_dice_button;
use crate::bot::views::UNKNOWN_ACTION;
use crate::bot::BotState;
use crate::platform::ChatPlatform;
use crate::types::dice::DieSpec;
use crate::types::event::ButtonPress;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Routes a button press. Only the dice buttons are known; anything else is
/// refused with an ephemeral notice rather than rolled as a default die.
pub async fn dispatch_interaction(
    platform: Arc<dyn ChatPlatform>,
    press: ButtonPress,
    state: Arc<BotState>,
) {
    debug!(custom_id = %press.custom_id, "Dispatching button press");

    let Some(die) = DieSpec::from_custom_id(&press.custom_id) else {
        warn!(custom_id = %press.custom_id, "Unknown button id");
        if let Err(e) = platform
            .respond_ephemeral(&press.interaction, UNKNOWN_ACTION)
            .await
        {
            error!(custom_id = %press.custom_id, error = %e, "Failed to reject unknown button");
        }
        return;
    };

    if let Err(failure) = handle_dice_button(Arc::clone(&platform), &press, die, state).await {
        report_interaction_failure(platform.as_ref(), &press, failure).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::state::test_support::*;
    use crate::bot::views::ROLL_FAILED;
    use crate::platform::mock::{MockPlatform, PlatformAction};
    use serenity::model::id::{ChannelId, MessageId};

    #[tokio::test]
    async fn test_unknown_button_rejected() {
        let platform = Arc::new(MockPlatform::new());
        let state = test_state();
        state
            .prompts
            .set(ChannelId::new(PLAY_CHANNEL), MessageId::new(1))
            .await;

        dispatch_interaction(platform.clone(), button("d12"), state).await;

        assert_eq!(
            platform.recorded_actions(),
            vec![PlatformAction::RespondEphemeral {
                interaction_id: button("d12").interaction.id,
                content: UNKNOWN_ACTION.to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_known_button_acknowledged() {
        let platform = Arc::new(MockPlatform::new());

        dispatch_interaction(platform.clone(), button("d4"), test_state()).await;

        assert!(platform
            .recorded_actions()
            .iter()
            .any(|a| matches!(a, PlatformAction::Acknowledge { .. })));
        assert!(platform.ephemeral_responses().is_empty());
    }

    #[tokio::test]
    async fn test_edit_failure_gets_ephemeral_notice() {
        let platform =
            Arc::new(MockPlatform::new().with_edit_result(Err("Unknown Message".to_string())));
        let state = test_state();
        state
            .prompts
            .set(ChannelId::new(PLAY_CHANNEL), MessageId::new(1))
            .await;

        dispatch_interaction(platform.clone(), button("d20"), state).await;

        assert_eq!(platform.ephemeral_responses(), vec![ROLL_FAILED.to_string()]);
    }
}
