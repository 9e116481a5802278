use super::convert::{button_press, incoming_message};
use super::platform::SerenityPlatform;
use crate::bot::{dispatch_interaction, dispatch_message, BotState};
use crate::platform::ChatPlatform;
use async_trait::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::model::application::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Gateway event handler. Each event runs on its own task so a panic in one
/// command never takes down the shard.
pub struct Handler {
    state: Arc<BotState>,
}

impl Handler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {}!", ready.user.tag());
        debug!(guilds = ready.guilds.len(), "Gateway ready");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let platform: Arc<dyn ChatPlatform> = Arc::new(SerenityPlatform::new(&ctx));
        let incoming = incoming_message(&msg);
        isolate(
            "message",
            dispatch_message(platform, incoming, Arc::clone(&self.state)),
        )
        .await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Component(component) = interaction else {
            return;
        };
        let Some(press) = button_press(&component) else {
            debug!(custom_id = %component.data.custom_id, "Ignoring non-button component");
            return;
        };
        let platform: Arc<dyn ChatPlatform> = Arc::new(SerenityPlatform::new(&ctx));
        isolate(
            "interaction",
            dispatch_interaction(platform, press, Arc::clone(&self.state)),
        )
        .await;
    }
}

/// Runs `task` on a fresh tokio task and logs it if it panics.
async fn isolate<F>(event: &'static str, task: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Err(e) = tokio::spawn(task).await {
        if e.is_panic() {
            error!(event, "Event handler panicked");
        } else {
            error!(event, error = %e, "Event handler task was cancelled");
        }
    }
}
