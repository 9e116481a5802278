mod message;

pub use message::{Button, ButtonRow, ButtonStyle, Embed, EmbedField, EmbedFooter, OutgoingMessage};

use crate::types::error::Result;
use crate::types::event::InteractionRef;
use async_trait::async_trait;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use std::fmt;

/// Permissions the bot checks before running privileged commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ManageMessages,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::ManageMessages => write!(f, "MANAGE_MESSAGES"),
        }
    }
}

/// Outbound operations against the chat platform.
///
/// Every handler talks to Discord through this trait so the request/response
/// flow can be exercised against [`mock::MockPlatform`] in tests.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    async fn send_message(&self, channel_id: ChannelId, message: OutgoingMessage)
        -> Result<MessageId>;

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<()>;

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()>;

    /// Deletes `up_to` together with the `count` messages posted right before
    /// it. Messages outside the platform's bulk-delete window are skipped.
    /// Returns how many messages were removed.
    async fn bulk_delete(&self, channel_id: ChannelId, up_to: MessageId, count: u8)
        -> Result<usize>;

    async fn reply(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<MessageId>;

    /// True if `channel_id` exists inside `guild_id` and can hold text messages.
    async fn is_text_channel_in(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<bool>;

    async fn has_permission(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
        permission: Permission,
    ) -> Result<bool>;

    /// Acknowledges a component interaction without a visible response.
    async fn acknowledge_interaction(&self, interaction: &InteractionRef) -> Result<()>;

    /// Replies to an interaction with a message only the presser can see.
    async fn respond_ephemeral(&self, interaction: &InteractionRef, content: &str) -> Result<()>;
}
