use crate::bot::audit::AuditLogger;
use crate::config::Config;
use crate::types::dice::{DieSpec, RollOutcome};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serenity::model::id::{ChannelId, MessageId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Remembers the latest dice prompt posted in each channel.
///
/// Button presses edit whatever message this points at. Entries are only ever
/// overwritten; a stale id simply makes the next edit fail.
#[async_trait]
pub trait PromptStore: Send + Sync {
    async fn get(&self, channel_id: ChannelId) -> Option<MessageId>;
    async fn set(&self, channel_id: ChannelId, message_id: MessageId);
}

/// Process-local [`PromptStore`]. Lost on restart.
#[derive(Default)]
pub struct InMemoryPromptStore {
    prompts: Mutex<HashMap<ChannelId, MessageId>>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn get(&self, channel_id: ChannelId) -> Option<MessageId> {
        let prompts = self.prompts.lock().unwrap_or_else(|p| p.into_inner());
        prompts.get(&channel_id).copied()
    }

    async fn set(&self, channel_id: ChannelId, message_id: MessageId) {
        let mut prompts = self.prompts.lock().unwrap_or_else(|p| p.into_inner());
        let previous = prompts.insert(channel_id, message_id);
        debug!(
            channel_id = %channel_id,
            message_id = %message_id,
            replaced = ?previous,
            "Prompt recorded"
        );
    }
}

pub struct BotState {
    pub prompts: Arc<dyn PromptStore>,
    pub config: Arc<Config>,
    pub audit: AuditLogger,
    rng: Mutex<StdRng>,
}

impl BotState {
    pub fn new(config: Config) -> Self {
        Self::with_parts(
            config,
            Arc::new(InMemoryPromptStore::new()),
            StdRng::from_entropy(),
        )
    }

    pub fn with_parts(config: Config, prompts: Arc<dyn PromptStore>, rng: StdRng) -> Self {
        let audit = AuditLogger::new(config.command_log_channel_id);
        Self {
            prompts,
            config: Arc::new(config),
            audit,
            rng: Mutex::new(rng),
        }
    }

    pub fn roll(&self, die: DieSpec) -> RollOutcome {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        die.roll(&mut *rng)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::types::event::{ButtonPress, IncomingMessage, InteractionRef, Requester};
    use serenity::model::id::{GuildId, InteractionId, UserId};
    use std::time::Duration;

    pub const GUILD: u64 = 900;
    pub const PLAY_CHANNEL: u64 = 10;
    pub const LOG_CHANNEL: u64 = 20;
    pub const NOTES_CHANNEL: u64 = 30;

    pub fn test_config() -> Config {
        Config {
            discord_token: "test_token".to_string(),
            command_log_channel_id: ChannelId::new(LOG_CHANNEL),
            notes_channel_id: ChannelId::new(NOTES_CHANNEL),
            purge_confirmation_ttl: Duration::from_secs(3),
        }
    }

    pub fn test_state() -> Arc<BotState> {
        Arc::new(BotState::with_parts(
            test_config(),
            Arc::new(InMemoryPromptStore::new()),
            StdRng::seed_from_u64(42),
        ))
    }

    pub fn requester() -> Requester {
        Requester {
            id: UserId::new(77),
            name: "gandalf".to_string(),
            tag: "gandalf#0001".to_string(),
            avatar_url: "https://cdn.example/avatar.png".to_string(),
        }
    }

    pub fn message(content: &str) -> IncomingMessage {
        IncomingMessage {
            id: MessageId::new(500),
            channel_id: ChannelId::new(PLAY_CHANNEL),
            guild_id: Some(GuildId::new(GUILD)),
            author: requester(),
            content: content.to_string(),
            is_bot: false,
        }
    }

    pub fn button(custom_id: &str) -> ButtonPress {
        ButtonPress {
            interaction: InteractionRef {
                id: InteractionId::new(600),
                token: "interaction-token".to_string(),
            },
            custom_id: custom_id.to_string(),
            user: requester(),
            channel_id: ChannelId::new(PLAY_CHANNEL),
            guild_id: Some(GuildId::new(GUILD)),
        }
    }
}
