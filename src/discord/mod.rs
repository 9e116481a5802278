//! Serenity gateway client and the [`ChatPlatform`](crate::platform::ChatPlatform)
//! implementation behind it.

mod convert;
mod handler;
mod platform;

pub use handler::Handler;

use crate::bot::BotState;
use crate::config::Config;
use anyhow::{Context as _, Result};
use serenity::prelude::{Client, GatewayIntents};
use std::sync::Arc;

/// Intents needed to read prefix commands and receive button clicks.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

pub async fn build_client(config: &Config, state: Arc<BotState>) -> Result<Client> {
    Client::builder(&config.discord_token, intents())
        .event_handler(Handler::new(state))
        .await
        .context("Failed to build Discord client")
}
