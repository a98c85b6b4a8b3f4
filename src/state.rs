//! State shared by the Discord event handlers.

use std::sync::Arc;

use crate::{
    platform::{CommunityPlatform, NotificationFeed},
    service::subscription::SubscriptionService,
};

/// Shared resources for command handling.
///
/// All fields are cheap to clone: the subscription service and feed share their
/// underlying cache and queue, and the platform is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Subscription cache paired with the subscription table.
    pub subscriptions: SubscriptionService,

    /// Live upstream clubs, posts and notifications.
    pub platform: Arc<dyn CommunityPlatform>,

    /// Queue replayed notifications are pushed onto.
    pub feed: NotificationFeed,

    /// Prefix text commands start with.
    pub command_prefix: String,
}

impl AppState {
    pub fn new(
        subscriptions: SubscriptionService,
        platform: Arc<dyn CommunityPlatform>,
        feed: NotificationFeed,
        command_prefix: String,
    ) -> Self {
        Self {
            subscriptions,
            platform,
            feed,
            command_prefix,
        }
    }
}
