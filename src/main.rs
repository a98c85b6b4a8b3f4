mod bot;
mod config;
mod data;
mod error;
mod model;
mod platform;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::Config,
    error::AppError,
    platform::{ClubDirectory, CommunityPlatform, NotificationFeed},
    service::{
        media::MediaStager,
        notification::{transport::SerenityTransport, NotificationDispatcher},
        subscription::SubscriptionService,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await;
    let http_client = startup::setup_reqwest_client()?;

    // The UCube client writes clubs and posts into the directory and pushes new
    // notifications through the feed.
    let directory = ClubDirectory::new();
    let platform: Arc<dyn CommunityPlatform> = Arc::new(directory.clone());
    let (feed, receiver) = NotificationFeed::channel(config.notification_queue_capacity);

    let subscriptions = SubscriptionService::new(db);
    subscriptions.load().await;
    if config.rebuild_subscriptions {
        subscriptions.rebuild_store().await?;
    }

    let translator = startup::setup_translator(&config, http_client.clone());
    let stager = Arc::new(MediaStager::from_config(http_client, &config));

    let state = AppState::new(
        subscriptions.clone(),
        platform.clone(),
        feed,
        config.command_prefix.clone(),
    );
    let (bot_client, discord_http) = bot::start::init_bot(&config, state).await?;
    let discord_cache = bot_client.cache.clone();

    let dispatcher = NotificationDispatcher::new(
        platform,
        subscriptions,
        Arc::new(SerenityTransport::new(discord_cache, discord_http)),
        translator,
        stager,
        config.send_delay,
    );
    tokio::spawn(dispatcher.run(receiver));

    bot::start::start_bot(bot_client).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
