use chrono::{DateTime, Utc};
use serde::Serialize;
use serenity::model::id::{ChannelId, UserId};

use crate::platform::{Embed, EmbedField, EmbedFooter};
use crate::types::dice::RollOutcome;
use crate::types::event::Requester;

pub const ROLL_COMMAND_COLOR: u32 = 0x9B59B6;
pub const PURGE_COMMAND_COLOR: u32 = 0xE67E22;
pub const NOTE_COMMAND_COLOR: u32 = 0xF1C40F;

/// Who performed an audited action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    pub id: UserId,
    pub tag: String,
}

impl From<&Requester> for Actor {
    fn from(requester: &Requester) -> Self {
        Self {
            id: requester.id,
            tag: requester.tag.clone(),
        }
    }
}

/// A completed command or interaction, bound for the command-log channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub title: String,
    pub description: String,
    pub actor: Actor,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub channel_id: ChannelId,
    pub fields: Vec<(String, String)>,
}

impl AuditRecord {
    fn new(
        title: impl Into<String>,
        description: String,
        requester: &Requester,
        color: u32,
        channel_id: ChannelId,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            actor: Actor::from(requester),
            color,
            timestamp: Utc::now(),
            channel_id,
            fields: Vec::new(),
        }
    }

    pub fn roll_command(requester: &Requester, channel_id: ChannelId) -> Self {
        Self::new(
            "🧙 Command Used: !roll",
            format!("**{}** used `!roll` in <#{}>", requester.tag, channel_id),
            requester,
            ROLL_COMMAND_COLOR,
            channel_id,
        )
    }

    pub fn purge_command(requester: &Requester, channel_id: ChannelId, amount: u8) -> Self {
        Self::new(
            "🧹 Command Used: !purge",
            format!(
                "**{}** purged **{}** messages in <#{}>",
                requester.tag, amount, channel_id
            ),
            requester,
            PURGE_COMMAND_COLOR,
            channel_id,
        )
    }

    pub fn note_command(requester: &Requester, channel_id: ChannelId, note: &str) -> Self {
        let mut record = Self::new(
            "📒 Command Used: !note",
            format!("**{}** submitted a note in <#{}>", requester.tag, channel_id),
            requester,
            NOTE_COMMAND_COLOR,
            channel_id,
        );
        record.fields.push(("Note:".to_string(), note.to_string()));
        record
    }

    pub fn dice_rolled(requester: &Requester, channel_id: ChannelId, outcome: &RollOutcome) -> Self {
        Self::new(
            "🎲 Dice Rolled",
            format!(
                "**{}** rolled a **{}** on a **{}** in <#{}>",
                requester.tag, outcome.value, outcome.die, channel_id
            ),
            requester,
            outcome.color(),
            channel_id,
        )
    }

    pub fn to_embed(&self) -> Embed {
        Embed {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            color: Some(self.color),
            footer: Some(EmbedFooter::text(format!("User ID: {}", self.actor.id))),
            fields: self
                .fields
                .iter()
                .map(|(name, value)| EmbedField::new(name, value))
                .collect(),
            timestamp: Some(self.timestamp),
            ..Embed::default()
        }
    }
}
