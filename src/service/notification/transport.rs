//! Chat transport boundary and its Discord implementation.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serenity::{
    all::{
        ChannelId, ChannelType, CreateAttachment, CreateEmbed, CreateEmbedAuthor,
        CreateEmbedFooter, CreateMessage, MessageId, Timestamp,
    },
    cache::Cache,
    http::Http,
};

use crate::error::{delivery::DeliveryError, internal::InternalError};

use super::payload::{EmbedPage, EMBED_AUTHOR, EMBED_FOOTER};

/// A channel that resolved successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelHandle {
    pub channel_id: u64,
    /// Announcement (news) channels publish every message sent to them.
    pub announcement: bool,
}

/// One message to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub content: Option<String>,
    pub embed: Option<EmbedPage>,
    pub files: Vec<PathBuf>,
}

/// A message that was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Sends messages to chat channels.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Looks up a channel the bot can post in.
    async fn resolve(&self, channel_id: u64) -> Result<ChannelHandle, DeliveryError>;

    async fn send(
        &self,
        channel: &ChannelHandle,
        message: OutgoingMessage,
    ) -> Result<SentMessage, DeliveryError>;

    /// Publishes a message sent to an announcement channel to its followers.
    async fn publish(
        &self,
        channel: &ChannelHandle,
        message: &SentMessage,
    ) -> Result<(), DeliveryError>;
}

/// Discord transport over serenity's gateway cache and HTTP client.
pub struct SerenityTransport {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityTransport {
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }
}

/// Looks a guild channel up in the gateway cache.
fn cached_channel(cache: &Cache, channel_id: u64) -> Option<ChannelHandle> {
    let kind = cache.channel(ChannelId::new(channel_id))?.kind;

    Some(ChannelHandle {
        channel_id,
        announcement: kind == ChannelType::News,
    })
}

/// Converts an embed page into a Discord embed.
///
/// # Returns
/// - `Ok(CreateEmbed)` - Discord embed ready for posting
/// - `Err(InternalError::InvalidDiscordTimestamp)` - Page timestamp out of range
pub fn render_embed(page: &EmbedPage) -> Result<CreateEmbed, InternalError> {
    let timestamp = Timestamp::from_unix_timestamp(page.timestamp).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: page.timestamp,
            reason: e.to_string(),
        }
    })?;

    Ok(CreateEmbed::new()
        .title(&page.title)
        .description(&page.description)
        .color(page.color)
        .author(CreateEmbedAuthor::new(EMBED_AUTHOR))
        .footer(CreateEmbedFooter::new(EMBED_FOOTER))
        .timestamp(timestamp))
}

#[async_trait]
impl ChatTransport for SerenityTransport {
    async fn resolve(&self, channel_id: u64) -> Result<ChannelHandle, DeliveryError> {
        if let Some(handle) = cached_channel(&self.cache, channel_id) {
            return Ok(handle);
        }

        let channel = ChannelId::new(channel_id).to_channel(&self.http).await?;

        let Some(guild_channel) = channel.guild() else {
            return Err(DeliveryError::NotFound(format!(
                "Channel {} is not a guild channel",
                channel_id
            )));
        };

        Ok(ChannelHandle {
            channel_id,
            announcement: guild_channel.kind == ChannelType::News,
        })
    }

    async fn send(
        &self,
        channel: &ChannelHandle,
        message: OutgoingMessage,
    ) -> Result<SentMessage, DeliveryError> {
        let mut builder = CreateMessage::new();

        if let Some(content) = message.content {
            builder = builder.content(content);
        }

        if let Some(page) = &message.embed {
            let embed = render_embed(page).map_err(|e| DeliveryError::Transient(e.to_string()))?;
            builder = builder.embed(embed);
        }

        let mut attachments = Vec::with_capacity(message.files.len());
        for path in &message.files {
            let attachment = CreateAttachment::path(path).await.map_err(|e| {
                DeliveryError::Transient(format!("Failed to attach {}: {}", path.display(), e))
            })?;
            attachments.push(attachment);
        }
        if !attachments.is_empty() {
            builder = builder.add_files(attachments);
        }

        let sent = ChannelId::new(channel.channel_id)
            .send_message(&self.http, builder)
            .await?;

        Ok(SentMessage {
            channel_id: channel.channel_id,
            message_id: sent.id.get(),
        })
    }

    async fn publish(
        &self,
        channel: &ChannelHandle,
        message: &SentMessage,
    ) -> Result<(), DeliveryError> {
        ChannelId::new(channel.channel_id)
            .crosspost(&self.http, MessageId::new(message.message_id))
            .await?;

        Ok(())
    }
}
