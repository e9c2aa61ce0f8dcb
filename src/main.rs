mod config;
mod error;
mod notify;
mod practicum;
mod review;
mod watcher;

use anyhow::Result;
use teloxide::types::Recipient;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::notify::TelegramNotifier;
use crate::practicum::PracticumClient;
use crate::watcher::WatchState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hwwatch=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A .env file is optional; real environment variables win
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Cannot start: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration loaded successfully");
    match &config.recipient {
        Recipient::Id(id) => info!("  Notifying chat {}", id),
        Recipient::ChannelUsername(name) => info!("  Notifying channel {}", name),
    }
    info!("  Poll interval: {}s", config::POLL_INTERVAL.as_secs());

    let client = PracticumClient::new(config.practicum_token.clone());
    let notifier = TelegramNotifier::new(&config.telegram_token, config.recipient.clone());
    let state = WatchState::starting_now();

    info!("Watcher is starting...");
    watcher::run(&client, &notifier, state).await
}
