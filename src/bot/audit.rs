use crate::platform::{ChatPlatform, OutgoingMessage};
use crate::types::audit::AuditRecord;
use serenity::model::id::{ChannelId, GuildId};
use tracing::{debug, error, warn};

/// Delivers [`AuditRecord`]s to the command-log channel.
///
/// Never fails: anything that goes wrong is written to the process log
/// together with the record so the action is not lost entirely.
pub struct AuditLogger {
    channel_id: ChannelId,
}

impl AuditLogger {
    pub fn new(channel_id: ChannelId) -> Self {
        Self { channel_id }
    }

    pub async fn log(
        &self,
        platform: &dyn ChatPlatform,
        guild_id: Option<GuildId>,
        record: AuditRecord,
    ) {
        let Some(guild_id) = guild_id else {
            warn!(
                record = %record_json(&record),
                "Audit record outside a guild, not delivered"
            );
            return;
        };

        match platform.is_text_channel_in(guild_id, self.channel_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    guild_id = %guild_id,
                    log_channel = %self.channel_id,
                    record = %record_json(&record),
                    "Command log channel missing or not text-based"
                );
                return;
            }
            Err(e) => {
                error!(
                    guild_id = %guild_id,
                    log_channel = %self.channel_id,
                    error = %e,
                    record = %record_json(&record),
                    "Failed to resolve command log channel"
                );
                return;
            }
        }

        let message = OutgoingMessage::embed(record.to_embed());
        match platform.send_message(self.channel_id, message).await {
            Ok(message_id) => {
                debug!(
                    log_channel = %self.channel_id,
                    message_id = %message_id,
                    title = %record.title,
                    "Audit record delivered"
                );
            }
            Err(e) => {
                error!(
                    log_channel = %self.channel_id,
                    error = %e,
                    record = %record_json(&record),
                    "Failed to log command"
                );
            }
        }
    }
}

fn record_json(record: &AuditRecord) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| format!("{:?}", record))
}
