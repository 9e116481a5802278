mod bot;
mod config;
mod discord;
mod platform;
mod types;

use anyhow::Result;
use bot::BotState;
use config::Config;
use std::sync::Arc;
use tokio::signal;
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dice_warden=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
    debug!("Tracing subscriber initialized");
    debug!("{}", config);

    let version = env!("CARGO_PKG_VERSION");
    info!("dice-warden v{}", version);
    info!("Starting Discord bot...");

    let bot_state = Arc::new(BotState::new(config.clone()));
    debug!("Bot state initialized");

    let mut client = discord::build_client(&config, Arc::clone(&bot_state)).await?;
    let shard_manager = Arc::clone(&client.shard_manager);

    info!("Bot connecting. Press Ctrl+C to stop.");

    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                error!("Discord client stopped with error: {:?}", e);
            } else {
                info!("Discord client stopped");
            }
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    info!("Closing gateway connections...");
    shard_manager.shutdown_all().await;

    info!("Shutdown complete.");
    Ok(())
}
