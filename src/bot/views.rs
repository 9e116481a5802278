//! Message layouts shared by the command and button handlers.

use crate::platform::{Button, ButtonRow, ButtonStyle, Embed, EmbedFooter, OutgoingMessage};
use crate::types::audit::{NOTE_COMMAND_COLOR, ROLL_COMMAND_COLOR};
use crate::types::dice::{DieSpec, RollOutcome};
use crate::types::event::Requester;
use chrono::Utc;

pub const PERMISSION_DENIED: &str = "❌ You do not have permission to use this command.";
pub const PURGE_RANGE: &str = "⚠️ Please provide a number between 1 and 100.";
pub const EMPTY_NOTE: &str = "📝 You must provide some text for the note.";
pub const ROLL_FAILED: &str = "❌ Error processing the roll.";
pub const UNKNOWN_ACTION: &str = "❓ Unknown action.";

/// Four roll buttons in two rows of two; the d20 stands out.
pub fn dice_controls() -> Vec<ButtonRow> {
    let buttons: Vec<Button> = DieSpec::ALL
        .into_iter()
        .map(|die| Button {
            custom_id: die.custom_id().to_string(),
            label: format!("Roll {}", die.custom_id()),
            style: if die == DieSpec::D20 {
                ButtonStyle::Success
            } else {
                ButtonStyle::Primary
            },
        })
        .collect();

    buttons.chunks(2).map(<[Button]>::to_vec).collect()
}

pub fn roll_prompt(requester: &Requester) -> OutgoingMessage {
    let embed = Embed {
        title: Some("🎲 D&D Dice Roller".to_string()),
        description: Some("Select a die to roll from below:".to_string()),
        color: Some(ROLL_COMMAND_COLOR),
        footer: Some(EmbedFooter::with_icon(
            format!("Requested by {}", requester.tag),
            &requester.avatar_url,
        )),
        ..Embed::default()
    };
    OutgoingMessage::embed(embed).with_components(dice_controls())
}

pub fn roll_result(requester: &Requester, outcome: &RollOutcome) -> OutgoingMessage {
    let embed = Embed {
        title: Some(outcome.headline()),
        description: Some(format!(
            "**{}** rolled a **{}** on a **{}**.",
            requester.name, outcome.value, outcome.die
        )),
        color: Some(outcome.color()),
        thumbnail: Some(requester.avatar_url.clone()),
        footer: Some(EmbedFooter::with_icon(
            format!("Rolled by {}", requester.tag),
            &requester.avatar_url,
        )),
        timestamp: Some(Utc::now()),
        ..Embed::default()
    };
    OutgoingMessage::embed(embed).with_components(dice_controls())
}

pub fn note(requester: &Requester, text: &str) -> OutgoingMessage {
    OutgoingMessage::embed(Embed {
        title: Some("📒 New Note".to_string()),
        description: Some(text.to_string()),
        color: Some(NOTE_COMMAND_COLOR),
        footer: Some(EmbedFooter::with_icon(
            format!("By {}", requester.tag),
            &requester.avatar_url,
        )),
        timestamp: Some(Utc::now()),
        ..Embed::default()
    })
}

pub fn purge_confirmation(amount: u8) -> OutgoingMessage {
    OutgoingMessage::text(format!("🧹 Deleted {} messages.", amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::state::test_support::requester;

    #[test]
    fn test_dice_controls_layout() {
        let rows = dice_controls();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 2));

        let labels: Vec<&str> = rows.iter().flatten().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Roll d4", "Roll d6", "Roll d8", "Roll d20"]);

        let ids: Vec<&str> = rows
            .iter()
            .flatten()
            .map(|b| b.custom_id.as_str())
            .collect();
        assert_eq!(ids, ["d4", "d6", "d8", "d20"]);
    }

    #[test]
    fn test_only_d20_is_success_styled() {
        for button in dice_controls().iter().flatten() {
            let expected = if button.custom_id == "d20" {
                ButtonStyle::Success
            } else {
                ButtonStyle::Primary
            };
            assert_eq!(button.style, expected);
        }
    }

    #[test]
    fn test_roll_prompt_attributes_requester() {
        let prompt = roll_prompt(&requester());
        assert_eq!(prompt.button_count(), 4);
        let footer = prompt.embeds[0].footer.clone().unwrap();
        assert_eq!(footer.text, "Requested by gandalf#0001");
        assert_eq!(
            footer.icon_url.as_deref(),
            Some("https://cdn.example/avatar.png")
        );
    }

    #[test]
    fn test_roll_result_keeps_controls() {
        let outcome = RollOutcome::new(DieSpec::D20, 20);
        let result = roll_result(&requester(), &outcome);
        assert_eq!(result.button_count(), 4);

        let embed = &result.embeds[0];
        assert_eq!(embed.title.as_deref(), Some("🎲 💥 NATURAL 20!"));
        assert_eq!(
            embed.description.as_deref(),
            Some("**gandalf** rolled a **20** on a **D20**.")
        );
        assert_eq!(embed.color, Some(outcome.color()));
        assert_eq!(
            embed.thumbnail.as_deref(),
            Some("https://cdn.example/avatar.png")
        );
    }

    #[test]
    fn test_note_embed() {
        let note = note(&requester(), "the lich is weak to fire");
        let embed = &note.embeds[0];
        assert_eq!(embed.title.as_deref(), Some("📒 New Note"));
        assert_eq!(embed.description.as_deref(), Some("the lich is weak to fire"));
        assert_eq!(embed.footer.as_ref().unwrap().text, "By gandalf#0001");
        assert!(note.components.is_empty());
    }

    #[test]
    fn test_purge_confirmation_text() {
        assert_eq!(
            purge_confirmation(5).content.as_deref(),
            Some("🧹 Deleted 5 messages.")
        );
    }
}
