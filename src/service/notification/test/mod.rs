use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use url::Url;

use crate::{
    error::delivery::DeliveryError,
    model::platform::{Club, Notification, Post},
    platform::ClubDirectory,
    service::{
        media::MediaStager,
        notification::{
            delivery::{DeliveryAdapter, DeliveryOutcome},
            payload::{build_pages, NotificationPayload},
            transport::{ChannelHandle, ChatTransport, OutgoingMessage, SentMessage},
            NotificationDispatcher,
        },
        subscription::SubscriptionService,
        translation::NoTranslator,
    },
};
use test_utils::builder::TestBuilder;

mod dispatch_batch;

/// Transport that records every message instead of talking to Discord.
#[derive(Default)]
struct RecordingTransport {
    /// Channels whose resolution fails.
    unresolvable: HashSet<u64>,
    /// Channels where sending is forbidden.
    forbidden: HashSet<u64>,
    /// Channels where sending fails transiently.
    flaky: HashSet<u64>,
    /// Channels where sending fails with the given HTTP status.
    failing_status: HashMap<u64, u16>,
    /// Announcement channels.
    announcement: HashSet<u64>,
    failing_publish: bool,
    sent: Mutex<Vec<(u64, OutgoingMessage)>>,
    published: Mutex<Vec<SentMessage>>,
    next_message_id: AtomicU64,
    churn: Mutex<Option<Churn>>,
}

/// Subscription changes applied the first time a given channel is sent to.
struct Churn {
    trigger: u64,
    subscriptions: SubscriptionService,
    unfollow: Vec<u64>,
    follow: Vec<u64>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self::default()
    }

    fn unresolvable(mut self, channel_id: u64) -> Self {
        self.unresolvable.insert(channel_id);
        self
    }

    fn forbidden(mut self, channel_id: u64) -> Self {
        self.forbidden.insert(channel_id);
        self
    }

    fn flaky(mut self, channel_id: u64) -> Self {
        self.flaky.insert(channel_id);
        self
    }

    fn failing_with(mut self, channel_id: u64, status: u16) -> Self {
        self.failing_status.insert(channel_id, status);
        self
    }

    fn announcement(mut self, channel_id: u64) -> Self {
        self.announcement.insert(channel_id);
        self
    }

    fn failing_publish(mut self) -> Self {
        self.failing_publish = true;
        self
    }

    /// Unfollows and follows channels of "CLC" while `trigger` is being sent to.
    fn churn_on_send(
        &self,
        trigger: u64,
        subscriptions: SubscriptionService,
        unfollow: &[u64],
        follow: &[u64],
    ) {
        *self.churn.lock().unwrap() = Some(Churn {
            trigger,
            subscriptions,
            unfollow: unfollow.to_vec(),
            follow: follow.to_vec(),
        });
    }

    async fn apply_churn(&self, channel_id: u64) {
        let churn = {
            let mut guard = self.churn.lock().unwrap();
            if guard.as_ref().is_some_and(|churn| churn.trigger == channel_id) {
                guard.take()
            } else {
                None
            }
        };

        if let Some(churn) = churn {
            for channel_id in churn.unfollow {
                churn.subscriptions.unfollow(channel_id, "CLC").await.unwrap();
            }
            for channel_id in churn.follow {
                churn.subscriptions.follow(channel_id, "CLC").await.unwrap();
            }
        }
    }

    fn sent(&self) -> Vec<(u64, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    /// Distinct channels that received at least one message, in first-send order.
    fn channels_sent_to(&self) -> Vec<u64> {
        let mut channels = Vec::new();
        for (channel_id, _) in self.sent() {
            if !channels.contains(&channel_id) {
                channels.push(channel_id);
            }
        }
        channels
    }

    fn published(&self) -> Vec<SentMessage> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn resolve(&self, channel_id: u64) -> Result<ChannelHandle, DeliveryError> {
        if self.unresolvable.contains(&channel_id) {
            return Err(DeliveryError::NotFound("Unknown Channel".to_string()));
        }

        Ok(ChannelHandle {
            channel_id,
            announcement: self.announcement.contains(&channel_id),
        })
    }

    async fn send(
        &self,
        channel: &ChannelHandle,
        message: OutgoingMessage,
    ) -> Result<SentMessage, DeliveryError> {
        if self.forbidden.contains(&channel.channel_id) {
            return Err(DeliveryError::PermissionDenied("Missing Access".to_string()));
        }
        if self.flaky.contains(&channel.channel_id) {
            return Err(DeliveryError::Transient("connection reset".to_string()));
        }
        if let Some(status) = self.failing_status.get(&channel.channel_id) {
            return Err(DeliveryError::from_status(*status, format!("HTTP {}", status)));
        }

        self.apply_churn(channel.channel_id).await;

        self.sent
            .lock()
            .unwrap()
            .push((channel.channel_id, message));

        Ok(SentMessage {
            channel_id: channel.channel_id,
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1,
        })
    }

    async fn publish(
        &self,
        _channel: &ChannelHandle,
        message: &SentMessage,
    ) -> Result<(), DeliveryError> {
        if self.failing_publish {
            return Err(DeliveryError::Transient("Cannot crosspost".to_string()));
        }

        self.published.lock().unwrap().push(*message);
        Ok(())
    }
}

const CLUB_SLUG: &str = "club-clc";
const POST_SLUG: &str = "post-1";

fn notification() -> Notification {
    Notification {
        slug: "notification-1".to_string(),
        post_slug: POST_SLUG.to_string(),
        club_slug: CLUB_SLUG.to_string(),
        club_name: "CLC".to_string(),
        user_name: "Seungyeon".to_string(),
    }
}

fn post(content: &str) -> Post {
    Post {
        slug: POST_SLUG.to_string(),
        content: content.to_string(),
        user_name: "Seungyeon".to_string(),
        images: Vec::new(),
        videos: Vec::new(),
    }
}

/// Dispatcher wired to an in-memory directory and database.
struct Harness {
    dispatcher: NotificationDispatcher,
    subscriptions: SubscriptionService,
    directory: ClubDirectory,
    transport: Arc<RecordingTransport>,
}

impl Harness {
    async fn new(transport: RecordingTransport) -> Self {
        Self::with_post(transport, post("새로운 소식")).await
    }

    async fn with_post(transport: RecordingTransport, post: Post) -> Self {
        Self::build(transport, post, Duration::ZERO).await
    }

    async fn with_delay(transport: RecordingTransport, send_delay: Duration) -> Self {
        Self::build(transport, post("새로운 소식"), send_delay).await
    }

    async fn build(transport: RecordingTransport, post: Post, send_delay: Duration) -> Self {
        let test = TestBuilder::new()
            .with_subscription_tables()
            .build()
            .await
            .unwrap();
        let subscriptions = SubscriptionService::new(test.db.unwrap());

        let directory = ClubDirectory::new();
        directory
            .ingest_club(Club {
                slug: CLUB_SLUG.to_string(),
                name: "CLC".to_string(),
            })
            .await;
        directory.ingest_post(post).await;

        let transport = Arc::new(transport);
        let stager = MediaStager::new(
            reqwest::Client::new(),
            std::env::temp_dir().join("ucube-relay-dispatch"),
            Url::parse("https://images.irenebot.com/ucube/").unwrap(),
            false,
        );

        let dispatcher = NotificationDispatcher::new(
            Arc::new(directory.clone()),
            subscriptions.clone(),
            transport.clone(),
            Arc::new(NoTranslator),
            Arc::new(stager),
            send_delay,
        );

        Self {
            dispatcher,
            subscriptions,
            directory,
            transport,
        }
    }

    async fn follow(&self, channel_ids: &[u64]) {
        for channel_id in channel_ids {
            self.subscriptions.follow(*channel_id, "CLC").await.unwrap();
        }
    }
}
