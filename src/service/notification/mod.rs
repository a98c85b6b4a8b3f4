//! Notification fan-out.
//!
//! The dispatcher consumes notification batches from the feed one at a time. For each
//! notification it resolves the post and club, snapshots the destinations following
//! the club, renders one shared payload and delivers it to each destination in turn,
//! waiting the configured delay before every destination. A failing notification
//! never stops the rest of its batch and a failing destination never stops the rest
//! of its notification.

pub mod delivery;
pub mod payload;
pub mod transport;

#[cfg(test)]
mod test;

use std::{sync::Arc, time::Duration};

use tokio::sync::mpsc;

use crate::{
    error::AppError,
    model::{platform::Notification, subscription::community_key},
    platform::{feed::NotificationBatch, CommunityPlatform},
    service::{
        media::MediaStager,
        subscription::{PostMark, SubscriptionService},
        translation::Translator,
    },
};

use delivery::{DeliveryAdapter, DeliveryOutcome};
use payload::PayloadBuilder;
use transport::ChatTransport;

/// Counts for one dispatched batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Notifications fanned out, including ones nobody follows.
    pub handled: usize,
    /// Notifications that failed before fan-out.
    pub failed: usize,
}

/// Per-destination counts for one notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationReport {
    pub delivered: usize,
    /// Destinations that already had the post.
    pub skipped: usize,
    pub evicted: usize,
    pub failed: usize,
}

/// Single consumer of the notification feed.
pub struct NotificationDispatcher {
    platform: Arc<dyn CommunityPlatform>,
    subscriptions: SubscriptionService,
    transport: Arc<dyn ChatTransport>,
    translator: Arc<dyn Translator>,
    stager: Arc<MediaStager>,
    send_delay: Duration,
}

impl NotificationDispatcher {
    /// Creates a dispatcher.
    ///
    /// # Arguments
    /// - `platform` - Keyed lookups of posts and clubs
    /// - `subscriptions` - Subscription service sharing the command handlers' cache
    /// - `transport` - Chat transport messages are sent through
    /// - `translator` - Translator for post content
    /// - `stager` - Media stager for post images and videos
    /// - `send_delay` - Wait before each destination of a notification
    pub fn new(
        platform: Arc<dyn CommunityPlatform>,
        subscriptions: SubscriptionService,
        transport: Arc<dyn ChatTransport>,
        translator: Arc<dyn Translator>,
        stager: Arc<MediaStager>,
        send_delay: Duration,
    ) -> Self {
        Self {
            platform,
            subscriptions,
            transport,
            translator,
            stager,
            send_delay,
        }
    }

    /// Dispatches batches until every feed handle is dropped.
    pub async fn run(self, mut receiver: mpsc::Receiver<NotificationBatch>) {
        tracing::info!("Notification dispatcher started");

        while let Some(batch) = receiver.recv().await {
            let report = self.dispatch_batch(&batch).await;
            tracing::info!(
                "Dispatched batch of {} notifications ({} failed)",
                batch.len(),
                report.failed
            );
        }

        tracing::info!("Notification feed closed, dispatcher stopping");
    }

    /// Dispatches every notification of a batch, one after another.
    pub async fn dispatch_batch(&self, batch: &[Notification]) -> BatchReport {
        let mut report = BatchReport::default();

        for notification in batch {
            match self.dispatch_notification(notification).await {
                Ok(_) => report.handled += 1,
                Err(e) => {
                    tracing::error!(
                        "Notification {} for {} [{}] failed to send: {}",
                        notification.slug,
                        notification.club_name,
                        notification.club_slug,
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Fans one notification out to every channel following its club.
    ///
    /// # Returns
    /// - `Ok(NotificationReport)` - Per-destination results
    /// - `Err(AppError::NotFound)` - The post or club is unknown to the platform
    pub async fn dispatch_notification(
        &self,
        notification: &Notification,
    ) -> Result<NotificationReport, AppError> {
        let post = self
            .platform
            .post(&notification.post_slug)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Post {} not found", notification.post_slug))
            })?;
        let club = self
            .platform
            .club(&notification.club_slug)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Club {} not found", notification.club_slug))
            })?;

        let mut report = NotificationReport::default();

        let destinations = self.subscriptions.snapshot(&club.name).await;
        if destinations.is_empty() {
            tracing::info!("{} has no channels to send post {} to", club.name, post.slug);
            return Ok(report);
        }

        let payload = PayloadBuilder::new(self.translator.as_ref(), &self.stager)
            .build(&club, &post)
            .await;

        let community_name = community_key(&club.name);
        let adapter = DeliveryAdapter::new(self.transport.as_ref(), &self.subscriptions);

        for destination in &destinations {
            if !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }

            if destination.has_posted(&post.slug) {
                report.skipped += 1;
                continue;
            }

            match self
                .subscriptions
                .mark_posted(&community_name, destination.channel_id, &post.slug)
                .await
            {
                PostMark::AlreadyPosted => {
                    report.skipped += 1;
                    continue;
                }
                PostMark::NotCached => tracing::debug!(
                    "Channel {} unfollowed {} during dispatch; delivering anyway",
                    destination.channel_id,
                    community_name
                ),
                PostMark::Marked => {}
            }

            tracing::debug!(
                "Sending post {} to channel {}",
                post.slug,
                destination.channel_id
            );

            match adapter
                .deliver(destination, &community_name, &payload)
                .await
            {
                DeliveryOutcome::Delivered { .. } => report.delivered += 1,
                DeliveryOutcome::Evicted(_) => report.evicted += 1,
                DeliveryOutcome::Failed(_) => report.failed += 1,
            }
        }

        Ok(report)
    }
}
