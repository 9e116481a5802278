use anyhow::{anyhow, Result};
use serenity::model::id::ChannelId;
use std::time::Duration;
use tracing::debug;

/// Channel that receives an audit embed for every completed command.
pub const COMMAND_LOG_CHANNEL_ID: u64 = 1370284558355791882;

/// Channel that `!note` posts into.
pub const NOTES_CHANNEL_ID: u64 = 1370285445245567068;

/// How long the `!purge` confirmation stays visible.
pub const PURGE_CONFIRMATION_TTL: Duration = Duration::from_secs(3);

/// Configuration for dice-warden.
///
/// Only the bot token comes from the environment; channel ids are compiled in
/// and copied here so tests can point the bot elsewhere.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_log_channel_id: ChannelId,
    pub notes_channel_id: ChannelId,
    pub purge_confirmation_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_inner(true)
    }

    #[cfg(test)]
    pub fn from_env_no_dotenv() -> Result<Self> {
        Self::from_env_inner(false)
    }

    fn from_env_inner(load_dotenv: bool) -> Result<Self> {
        if load_dotenv {
            dotenvy::dotenv().ok();
        }

        let discord_token = std::env::var("DISCORD_TOKEN")
            .map_err(|_| anyhow!("DISCORD_TOKEN is required but not set"))?;
        if discord_token.trim().is_empty() {
            return Err(anyhow!("DISCORD_TOKEN must not be empty"));
        }

        let config = Config {
            discord_token,
            command_log_channel_id: ChannelId::new(COMMAND_LOG_CHANNEL_ID),
            notes_channel_id: ChannelId::new(NOTES_CHANNEL_ID),
            purge_confirmation_ttl: PURGE_CONFIRMATION_TTL,
        };

        debug!(
            command_log_channel = %config.command_log_channel_id,
            notes_channel = %config.notes_channel_id,
            purge_confirmation_ttl_ms = config.purge_confirmation_ttl.as_millis() as u64,
            "Config resolved from environment"
        );

        Ok(config)
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Config {{\n  discord_token: ***MASKED***,\n  command_log_channel_id: {},\n  notes_channel_id: {},\n  purge_confirmation_ttl: {:?},\n}}",
            self.command_log_channel_id, self.notes_channel_id, self.purge_confirmation_ttl,
        )
    }
}
