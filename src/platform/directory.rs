//! In-memory directory of upstream clubs, posts and notifications.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    model::platform::{Club, Notification, Post},
};

use super::CommunityPlatform;

/// Notifications kept per club for replays.
const RECENT_NOTIFICATIONS_PER_CLUB: usize = 50;

#[derive(Default)]
struct Directory {
    clubs: HashMap<String, Club>,
    posts: HashMap<String, Post>,
    /// Newest at the front.
    notifications: HashMap<String, VecDeque<Notification>>,
}

/// Shared, slug-keyed store the platform client writes into.
///
/// Cloning is cheap; clones share the same directory.
#[derive(Clone, Default)]
pub struct ClubDirectory {
    inner: Arc<RwLock<Directory>>,
}

impl ClubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a club.
    pub async fn ingest_club(&self, club: Club) {
        self.inner
            .write()
            .await
            .clubs
            .insert(club.slug.clone(), club);
    }

    /// Adds or replaces a materialized post.
    pub async fn ingest_post(&self, post: Post) {
        self.inner
            .write()
            .await
            .posts
            .insert(post.slug.clone(), post);
    }

    /// Records a notification so it can be replayed later.
    pub async fn record_notification(&self, notification: Notification) {
        let mut directory = self.inner.write().await;
        let recent = directory
            .notifications
            .entry(notification.club_slug.clone())
            .or_default();

        recent.push_front(notification);
        recent.truncate(RECENT_NOTIFICATIONS_PER_CLUB);
    }
}

#[async_trait]
impl CommunityPlatform for ClubDirectory {
    async fn post(&self, post_slug: &str) -> Option<Post> {
        self.inner.read().await.posts.get(post_slug).cloned()
    }

    async fn club(&self, club_slug: &str) -> Option<Club> {
        self.inner.read().await.clubs.get(club_slug).cloned()
    }

    async fn clubs(&self) -> Vec<Club> {
        self.inner.read().await.clubs.values().cloned().collect()
    }

    async fn fetch_post(&self, post_slug: &str) -> Result<Post, AppError> {
        self.post(post_slug)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!("Post {} has not been fetched", post_slug))
            })
    }

    async fn recent_notifications(
        &self,
        club_slug: &str,
        limit: usize,
    ) -> Result<Vec<Notification>, AppError> {
        let directory = self.inner.read().await;
        if !directory.clubs.contains_key(club_slug) {
            return Err(AppError::NotFound(format!("Club {} not found", club_slug)));
        }

        Ok(directory
            .notifications
            .get(club_slug)
            .map(|recent| recent.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}
