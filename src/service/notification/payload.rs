//! Message payload shared by every destination of one notification.

use std::path::PathBuf;

use rand::Rng;

use crate::{
    model::platform::{Club, Post},
    service::{media::MediaStager, translation::Translator},
};

/// Maximum number of characters in one embed description.
pub const EMBED_CAP: usize = 1600;

pub const EMBED_AUTHOR: &str = "UCube";
pub const EMBED_FOOTER: &str = "Thanks for using UCubeBot!";

/// One embed message of a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedPage {
    pub title: String,
    pub description: String,
    /// RGB color, random per page.
    pub color: u32,
    /// Unix timestamp (seconds) shown on the embed.
    pub timestamp: i64,
}

/// Everything sent to each destination for one notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPayload {
    pub pages: Vec<EmbedPage>,
    /// Local files attached to the trailing message.
    pub media_files: Vec<PathBuf>,
    /// Remote media URLs, one per line, sent in the trailing message.
    pub message_text: Option<String>,
}

impl NotificationPayload {
    /// Whether a trailing message with text or files follows the embeds.
    pub fn has_trailing_message(&self) -> bool {
        self.message_text.is_some() || !self.media_files.is_empty()
    }
}

pub fn embed_title(club_name: &str, user_name: &str) -> String {
    format!("New [{}] {} Notification!", club_name, user_name)
}

/// Embed description with the original content and, if available, its translation.
pub fn describe(content: &str, translation: Option<&str>) -> String {
    match translation {
        Some(translation) => format!(
            "Content: **{}**\nTranslated Content: **{}**",
            content, translation
        ),
        None => format!("Content: **{}**", content),
    }
}

/// Splits text into chunks of at most `cap` characters.
///
/// Splits on character boundaries, never inside a multi-byte character.
pub fn split_description(description: &str, cap: usize) -> Vec<String> {
    let cap = cap.max(1);
    let chars: Vec<char> = description.chars().collect();

    chars
        .chunks(cap)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Builds the numbered embed pages for a description.
pub fn build_pages(title: &str, description: &str, timestamp: i64) -> Vec<EmbedPage> {
    let chunks = split_description(description, EMBED_CAP);
    let total = chunks.len();
    let mut rng = rand::rng();

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| EmbedPage {
            title: format!("{} - Post #{}/{}", title, i + 1, total),
            description: chunk,
            color: rng.random_range(0..=0xFF_FF_FF),
            timestamp,
        })
        .collect()
}

/// Renders posts into notification payloads.
pub struct PayloadBuilder<'a> {
    translator: &'a dyn Translator,
    stager: &'a MediaStager,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new(translator: &'a dyn Translator, stager: &'a MediaStager) -> Self {
        Self { translator, stager }
    }

    /// Translates the post, pages its description and stages its media.
    pub async fn build(&self, club: &Club, post: &Post) -> NotificationPayload {
        let title = embed_title(&club.name, &post.user_name);
        let translation = self.translator.translate(&post.content, "ko", "en").await;
        let description = describe(&post.content, translation.as_deref());
        let pages = build_pages(&title, &description, chrono::Utc::now().timestamp());

        let media = self.stager.stage_post(post).await;

        NotificationPayload {
            pages,
            message_text: media.message_text(),
            media_files: media.media_files,
        }
    }
}
