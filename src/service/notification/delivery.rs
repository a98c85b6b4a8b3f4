//! Delivery of one notification payload to one destination.

use crate::{
    error::delivery::DeliveryError,
    model::subscription::Destination,
    service::subscription::SubscriptionService,
};

use super::{
    payload::NotificationPayload,
    transport::{ChannelHandle, ChatTransport, OutgoingMessage, SentMessage},
};

/// How delivery to one destination ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Every message was sent.
    Delivered { messages: usize },
    /// The destination failed permanently and was removed.
    Evicted(DeliveryError),
    /// The destination failed transiently and stays subscribed.
    Failed(DeliveryError),
}

/// Sends payloads over a chat transport and evicts destinations that fail permanently.
pub struct DeliveryAdapter<'a> {
    transport: &'a dyn ChatTransport,
    subscriptions: &'a SubscriptionService,
}

impl<'a> DeliveryAdapter<'a> {
    pub fn new(transport: &'a dyn ChatTransport, subscriptions: &'a SubscriptionService) -> Self {
        Self {
            transport,
            subscriptions,
        }
    }

    /// Delivers a payload to one destination.
    ///
    /// Sends each embed page as its own message, mentioning the destination's role on
    /// the first one, then one trailing message with media links and attachments.
    /// Messages in announcement channels are published; publish failures are only
    /// logged.
    ///
    /// # Arguments
    /// - `destination` - Snapshot of the destination
    /// - `community_name` - Lower-cased community the destination follows
    /// - `payload` - Rendered notification
    ///
    /// # Returns
    /// - `DeliveryOutcome::Delivered` - All messages sent
    /// - `DeliveryOutcome::Evicted` - Channel unresolvable, or sending was forbidden; removed
    /// - `DeliveryOutcome::Failed` - Any other send failure, including 401 and 404; kept
    pub async fn deliver(
        &self,
        destination: &Destination,
        community_name: &str,
        payload: &NotificationPayload,
    ) -> DeliveryOutcome {
        let channel = match self.transport.resolve(destination.channel_id).await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::warn!(
                    "Removing channel {} from {} since it could not be resolved: {}",
                    destination.channel_id,
                    community_name,
                    e
                );
                self.evict(destination.channel_id, community_name).await;
                return DeliveryOutcome::Evicted(e);
            }
        };

        let sent = match self.send_all(&channel, destination, payload).await {
            Ok(sent) => sent,
            Err(e) if e.is_permanent() => {
                tracing::warn!(
                    "Removing channel {} from {} since the bot may not post there: {}",
                    destination.channel_id,
                    community_name,
                    e
                );
                self.evict(destination.channel_id, community_name).await;
                return DeliveryOutcome::Evicted(e);
            }
            Err(e) => {
                tracing::error!(
                    "Post for {} failed in channel {}: {}",
                    community_name,
                    destination.channel_id,
                    e
                );
                return DeliveryOutcome::Failed(e);
            }
        };

        tracing::info!(
            "Post for {} sent to channel {}",
            community_name,
            destination.channel_id
        );

        if channel.announcement {
            self.publish_all(&channel, &sent).await;
        }

        DeliveryOutcome::Delivered {
            messages: sent.len(),
        }
    }

    async fn send_all(
        &self,
        channel: &ChannelHandle,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<Vec<SentMessage>, DeliveryError> {
        let mut sent = Vec::with_capacity(payload.pages.len() + 1);

        for (i, page) in payload.pages.iter().enumerate() {
            let message = OutgoingMessage {
                content: if i == 0 { destination.mention() } else { None },
                embed: Some(page.clone()),
                files: Vec::new(),
            };
            sent.push(self.transport.send(channel, message).await?);
        }

        if payload.has_trailing_message() {
            let message = OutgoingMessage {
                content: payload.message_text.clone(),
                embed: None,
                files: payload.media_files.clone(),
            };
            sent.push(self.transport.send(channel, message).await?);
        }

        Ok(sent)
    }

    async fn publish_all(&self, channel: &ChannelHandle, sent: &[SentMessage]) {
        for message in sent {
            if let Err(e) = self.transport.publish(channel, message).await {
                tracing::warn!(
                    "Failed to publish message {} in channel {}: {}",
                    message.message_id,
                    channel.channel_id,
                    e
                );
            }
        }
    }

    async fn evict(&self, channel_id: u64, community_name: &str) {
        if let Err(e) = self.subscriptions.evict(channel_id, community_name).await {
            tracing::error!(
                "Failed to remove channel {} from {} in the database: {}",
                channel_id,
                community_name,
                e
            );
        }
    }
}
