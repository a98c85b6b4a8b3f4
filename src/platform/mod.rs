//! Boundary to the upstream UCube platform client.
//!
//! The platform client polls UCube on its own schedule and writes what it finds into
//! a [`ClubDirectory`], then publishes each batch of new notifications through a
//! [`NotificationFeed`]. The relay only reads from the directory through the
//! [`CommunityPlatform`] trait and never polls upstream itself.

pub mod directory;
pub mod feed;

use async_trait::async_trait;

use crate::{
    error::AppError,
    model::platform::{Club, Notification, Post},
};

pub use directory::ClubDirectory;
pub use feed::NotificationFeed;

/// Keyed read access to clubs, posts and notifications already fetched upstream.
#[async_trait]
pub trait CommunityPlatform: Send + Sync {
    /// Looks up a materialized post by slug.
    async fn post(&self, post_slug: &str) -> Option<Post>;

    /// Looks up a club by slug.
    async fn club(&self, club_slug: &str) -> Option<Club>;

    /// Every club currently known upstream, followed or not.
    async fn clubs(&self) -> Vec<Club>;

    /// Forces a post's content and media to be materialized and returns it.
    async fn fetch_post(&self, post_slug: &str) -> Result<Post, AppError>;

    /// Most recent notifications of a club, newest first.
    async fn recent_notifications(
        &self,
        club_slug: &str,
        limit: usize,
    ) -> Result<Vec<Notification>, AppError>;

    /// Lower-cased names of every known club, sorted.
    async fn community_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .clubs()
            .await
            .into_iter()
            .map(|club| club.name.to_lowercase())
            .collect();
        names.sort();
        names
    }

    /// Finds a club by name, ignoring case.
    async fn club_by_name(&self, name: &str) -> Option<Club> {
        let name = name.to_lowercase();
        self.clubs()
            .await
            .into_iter()
            .find(|club| club.name.to_lowercase() == name)
    }
}
