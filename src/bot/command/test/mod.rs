use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    bot::command::{execute, parse, Command},
    error::AppError,
    model::platform::{Club, Notification, Post},
    platform::{feed::NotificationBatch, ClubDirectory, NotificationFeed},
    service::subscription::SubscriptionService,
    state::AppState,
};
use test_utils::builder::TestBuilder;

mod follow;

const CHANNEL_ID: u64 = 555;

struct Harness {
    state: AppState,
    directory: ClubDirectory,
    receiver: mpsc::Receiver<NotificationBatch>,
}

impl Harness {
    /// State with the clubs "CLC" and "Weki Meki" known upstream.
    async fn new() -> Self {
        let test = TestBuilder::new()
            .with_subscription_tables()
            .build()
            .await
            .unwrap();

        let directory = ClubDirectory::new();
        for (slug, name) in [("c1", "CLC"), ("c2", "Weki Meki")] {
            directory
                .ingest_club(Club {
                    slug: slug.to_string(),
                    name: name.to_string(),
                })
                .await;
        }

        let (feed, receiver) = NotificationFeed::channel(4);
        let state = AppState::new(
            SubscriptionService::new(test.db.unwrap()),
            Arc::new(directory.clone()),
            feed,
            "!".to_string(),
        );

        Self {
            state,
            directory,
            receiver,
        }
    }

    async fn run(&self, content: &str) -> Result<String, AppError> {
        let command = parse(content, &self.state.command_prefix).unwrap();
        execute(&self.state, CHANNEL_ID, command).await
    }
}
