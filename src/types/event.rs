//! Platform-neutral inbound events.
//!
//! The Discord adapter converts gateway payloads into these before handing
//! them to the bot, which keeps handlers testable without a live gateway.

use serde::Serialize;
use serenity::model::id::{ChannelId, GuildId, InteractionId, MessageId, UserId};

/// The user behind a message or button press.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requester {
    pub id: UserId,
    /// Bare username.
    pub name: String,
    /// `name#discriminator` for legacy accounts, otherwise the username.
    pub tag: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub author: Requester,
    pub content: String,
    pub is_bot: bool,
}

/// Identifies an interaction so it can be acknowledged or answered.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRef {
    pub id: InteractionId,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct ButtonPress {
    pub interaction: InteractionRef,
    pub custom_id: String,
    pub user: Requester,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}
