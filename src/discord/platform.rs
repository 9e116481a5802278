use super::convert::{create_message, edit_message};
use crate::platform::{ChatPlatform, OutgoingMessage, Permission};
use crate::types::error::{BotError, Result};
use crate::types::event::InteractionRef;
use async_trait::async_trait;
use chrono::Utc;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage, GetMessages,
};
use serenity::cache::Cache;
use serenity::client::Context;
use serenity::http::Http;
use serenity::model::channel::Channel;
use serenity::model::id::{ChannelId, GuildId, MessageId, UserId};
use serenity::model::Permissions;
use std::sync::Arc;
use tracing::debug;

/// Discord refuses bulk deletes for messages older than two weeks.
const BULK_DELETE_WINDOW_SECS: i64 = 14 * 24 * 60 * 60;

/// Discord accepts at most this many ids per bulk-delete call.
const BULK_DELETE_CHUNK: usize = 100;

/// [`ChatPlatform`] backed by serenity's HTTP client and gateway cache.
pub struct SerenityPlatform {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityPlatform {
    pub fn new(ctx: &Context) -> Self {
        Self {
            http: Arc::clone(&ctx.http),
            cache: Arc::clone(&ctx.cache),
        }
    }
}

fn platform_error(operation: &str) -> impl FnOnce(serenity::Error) -> BotError + '_ {
    move |e| BotError::platform(operation, e.to_string())
}

/// Drops ids outside the bulk-delete window and groups the rest into
/// request-sized batches. A batch of one is deleted individually.
fn plan_bulk_delete(mut ids: Vec<MessageId>, now_unix: i64) -> Vec<Vec<MessageId>> {
    let cutoff = now_unix - BULK_DELETE_WINDOW_SECS;
    ids.retain(|id| id.created_at().unix_timestamp() > cutoff);
    ids.chunks(BULK_DELETE_CHUNK).map(<[MessageId]>::to_vec).collect()
}

fn to_permissions(permission: Permission) -> Permissions {
    match permission {
        Permission::ManageMessages => Permissions::MANAGE_MESSAGES,
    }
}

#[async_trait]
impl ChatPlatform for SerenityPlatform {
    async fn send_message(
        &self,
        channel_id: ChannelId,
        message: OutgoingMessage,
    ) -> Result<MessageId> {
        let sent = channel_id
            .send_message(self.http.as_ref(), create_message(&message))
            .await
            .map_err(platform_error("send_message"))?;
        Ok(sent.id)
    }

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<()> {
        channel_id
            .edit_message(self.http.as_ref(), message_id, edit_message(&message))
            .await
            .map_err(platform_error("edit_message"))?;
        Ok(())
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        channel_id
            .delete_message(self.http.as_ref(), message_id)
            .await
            .map_err(platform_error("delete_message"))
    }

    async fn bulk_delete(
        &self,
        channel_id: ChannelId,
        up_to: MessageId,
        count: u8,
    ) -> Result<usize> {
        let mut ids = vec![up_to];
        if count > 0 {
            let history = channel_id
                .messages(self.http.as_ref(), GetMessages::new().before(up_to).limit(count))
                .await
                .map_err(platform_error("bulk_delete"))?;
            ids.extend(history.iter().map(|m| m.id));
        }

        let fetched = ids.len();
        let batches = plan_bulk_delete(ids, Utc::now().timestamp());
        let planned: usize = batches.iter().map(Vec::len).sum();
        if planned < fetched {
            debug!(
                channel_id = %channel_id,
                skipped = fetched - planned,
                "Skipping messages outside the bulk delete window"
            );
        }

        for batch in &batches {
            if let [single] = batch.as_slice() {
                channel_id
                    .delete_message(self.http.as_ref(), *single)
                    .await
                    .map_err(platform_error("bulk_delete"))?;
            } else {
                channel_id
                    .delete_messages(self.http.as_ref(), batch)
                    .await
                    .map_err(platform_error("bulk_delete"))?;
            }
        }

        Ok(planned)
    }

    async fn reply(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<MessageId> {
        let builder = CreateMessage::new()
            .content(content)
            .reference_message((channel_id, message_id));
        let sent = channel_id
            .send_message(self.http.as_ref(), builder)
            .await
            .map_err(platform_error("reply"))?;
        Ok(sent.id)
    }

    async fn is_text_channel_in(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<bool> {
        let channel = channel_id
            .to_channel(self.http.as_ref())
            .await
            .map_err(platform_error("resolve_channel"))?;
        Ok(match channel {
            Channel::Guild(gc) => gc.guild_id == guild_id && gc.is_text_based(),
            _ => false,
        })
    }

    async fn has_permission(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
        permission: Permission,
    ) -> Result<bool> {
        let member = guild_id
            .member(self.http.as_ref(), user_id)
            .await
            .map_err(platform_error("has_permission"))?;

        let granted = {
            let guild = self.cache.guild(guild_id).ok_or_else(|| {
                BotError::platform("has_permission", format!("guild {} is not cached", guild_id))
            })?;
            // Threads inherit their overwrites from the parent channel.
            let channel = guild.channels.get(&channel_id).or_else(|| {
                guild
                    .threads
                    .iter()
                    .find(|t| t.id == channel_id)
                    .and_then(|t| t.parent_id)
                    .and_then(|parent| guild.channels.get(&parent))
            });
            let channel = channel.ok_or_else(|| {
                BotError::platform(
                    "has_permission",
                    format!("channel {} is not cached", channel_id),
                )
            })?;
            guild.user_permissions_in(channel, &member)
        };

        Ok(granted.contains(to_permissions(permission)))
    }

    async fn acknowledge_interaction(&self, interaction: &InteractionRef) -> Result<()> {
        self.http
            .create_interaction_response(
                interaction.id,
                &interaction.token,
                &CreateInteractionResponse::Acknowledge,
                Vec::new(),
            )
            .await
            .map_err(platform_error("acknowledge_interaction"))
    }

    async fn respond_ephemeral(&self, interaction: &InteractionRef, content: &str) -> Result<()> {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        );
        self.http
            .create_interaction_response(interaction.id, &interaction.token, &response, Vec::new())
            .await
            .map_err(platform_error("respond_ephemeral"))
    }
}
