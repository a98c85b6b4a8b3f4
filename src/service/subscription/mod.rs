//! Channel subscription service.
//!
//! Owns the shared [`SubscriptionCache`] and pairs every cache mutation with the
//! matching write to the subscription table. The cache is updated first inside a
//! short critical section; the store write happens after the lock is released. A
//! failed store write is returned to the caller and leaves the cache ahead of the
//! store until the next successful write or rebuild.

pub mod index;

#[cfg(test)]
mod test;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use tokio::sync::RwLock;

use crate::{
    data::subscription::SubscriptionRepository, model::subscription::Destination,
    util::backoff::{retry_forever, ExponentialBackoff},
};

pub use index::{PostMark, SubscriptionIndex};

/// Subscription index shared between the dispatcher and the command handlers.
pub type SubscriptionCache = Arc<RwLock<SubscriptionIndex>>;

/// Result of toggling a channel's mention role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    /// The role will be mentioned from now on.
    Mentioned,
    /// The role was already mentioned and has been cleared.
    Cleared,
    /// The channel does not follow the community.
    NotFollowing,
}

/// Service pairing the subscription index with the subscription table.
///
/// Cloning is cheap; clones share the same cache and connection pool.
#[derive(Clone)]
pub struct SubscriptionService {
    db: DatabaseConnection,
    cache: SubscriptionCache,
}

impl SubscriptionService {
    /// Creates a service with an empty cache.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    ///
    /// # Returns
    /// - `SubscriptionService` - New service instance; call [`Self::load`] to fill the cache
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            cache: Arc::new(RwLock::new(SubscriptionIndex::new())),
        }
    }

    pub fn cache(&self) -> SubscriptionCache {
        self.cache.clone()
    }

    /// Fills the cache from the subscription table.
    ///
    /// Waits, retrying with exponential backoff, until the database answers and the
    /// table can be read. Replaces whatever the cache held before.
    ///
    /// # Returns
    /// - `usize` - Number of destinations loaded
    pub async fn load(&self) -> usize {
        let repo = SubscriptionRepository::new(&self.db);
        let repo = &repo;

        let subscriptions = retry_forever(
            "Subscription load",
            ExponentialBackoff::new(),
            move || async move {
                if !repo.is_connected().await {
                    return Err(DbErr::Custom("Database is not reachable yet".to_string()));
                }
                repo.fetch_all().await
            },
        )
        .await;

        let mut index = self.cache.write().await;
        index.clear();
        for subscription in &subscriptions {
            index.add(
                &subscription.community_name,
                subscription.channel_id,
                subscription.role_id,
            );
        }

        tracing::info!(
            "Loaded {} subscriptions from {} rows",
            index.len(),
            subscriptions.len()
        );

        index.len()
    }

    /// Rewrites the subscription table from the cache.
    ///
    /// Drops and recreates the table, then inserts one row per cached destination and
    /// restores its role. Running it twice yields the same rows as running it once.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of rows written
    /// - `Err(DbErr)` - Database error; the table may be partially seeded
    pub async fn rebuild_store(&self) -> Result<usize, DbErr> {
        let entries: Vec<(String, u64, Option<u64>)> = {
            let index = self.cache.read().await;
            index
                .entries()
                .map(|(name, destination)| {
                    (name.to_string(), destination.channel_id, destination.role_id)
                })
                .collect()
        };

        let repo = SubscriptionRepository::new(&self.db);
        repo.recreate().await?;

        for (community_name, channel_id, role_id) in &entries {
            repo.insert(*channel_id, community_name).await?;
            if role_id.is_some() {
                repo.update_role(*channel_id, community_name, *role_id)
                    .await?;
            }
        }

        tracing::info!("Rebuilt subscription table with {} rows", entries.len());

        Ok(entries.len())
    }

    /// Subscribes a channel to a community.
    ///
    /// # Returns
    /// - `Ok(true)` - Subscription created
    /// - `Ok(false)` - Channel already followed the community; nothing written
    /// - `Err(DbErr)` - Store write failed; the cache already holds the subscription
    pub async fn follow(&self, channel_id: u64, community_name: &str) -> Result<bool, DbErr> {
        let added = {
            let mut index = self.cache.write().await;
            if index.is_subscribed(community_name, channel_id) {
                false
            } else {
                index.add(community_name, channel_id, None);
                true
            }
        };

        if added {
            SubscriptionRepository::new(&self.db)
                .insert(channel_id, community_name)
                .await?;
        }

        Ok(added)
    }

    /// Unsubscribes a channel from a community.
    ///
    /// The store row is deleted even when the cache had no entry.
    ///
    /// # Returns
    /// - `Ok(bool)` - Whether the cache held the subscription
    /// - `Err(DbErr)` - Store delete failed; the cache entry is already gone
    pub async fn unfollow(&self, channel_id: u64, community_name: &str) -> Result<bool, DbErr> {
        let removed = self.cache.write().await.remove(channel_id, community_name);

        SubscriptionRepository::new(&self.db)
            .delete(channel_id, community_name)
            .await?;

        Ok(removed)
    }

    /// Follows a community if the channel does not yet, otherwise unfollows it.
    ///
    /// # Returns
    /// - `Ok(true)` - The channel now follows the community
    /// - `Ok(false)` - The channel no longer follows the community
    /// - `Err(DbErr)` - Store write failed
    pub async fn toggle_follow(
        &self,
        channel_id: u64,
        community_name: &str,
    ) -> Result<bool, DbErr> {
        let now_following = {
            let mut index = self.cache.write().await;
            if index.remove(channel_id, community_name) {
                false
            } else {
                index.add(community_name, channel_id, None);
                true
            }
        };

        let repo = SubscriptionRepository::new(&self.db);
        if now_following {
            repo.insert(channel_id, community_name).await?;
        } else {
            repo.delete(channel_id, community_name).await?;
        }

        Ok(now_following)
    }

    /// Sets the mention role of a subscription, or clears it when it is already that role.
    pub async fn toggle_role(
        &self,
        channel_id: u64,
        community_name: &str,
        role_id: u64,
    ) -> Result<RoleChange, DbErr> {
        let (change, new_role) = {
            let mut index = self.cache.write().await;
            let change = match index.get(community_name, channel_id) {
                None => return Ok(RoleChange::NotFollowing),
                Some(destination) if destination.role_id == Some(role_id) => RoleChange::Cleared,
                Some(_) => RoleChange::Mentioned,
            };

            let new_role = (change == RoleChange::Mentioned).then_some(role_id);
            index.set_role(community_name, channel_id, new_role);
            (change, new_role)
        };

        SubscriptionRepository::new(&self.db)
            .update_role(channel_id, community_name, new_role)
            .await?;

        Ok(change)
    }

    /// Removes a destination that can no longer receive notifications.
    pub async fn evict(&self, channel_id: u64, community_name: &str) -> Result<(), DbErr> {
        let removed = self.unfollow(channel_id, community_name).await?;

        tracing::warn!(
            "Evicted channel {} from {} (cached: {})",
            channel_id,
            community_name,
            removed
        );

        Ok(())
    }

    pub async fn is_subscribed(&self, community_name: &str, channel_id: u64) -> bool {
        self.cache
            .read()
            .await
            .is_subscribed(community_name, channel_id)
    }

    pub async fn get(&self, community_name: &str, channel_id: u64) -> Option<Destination> {
        self.cache
            .read()
            .await
            .get(community_name, channel_id)
            .cloned()
    }

    /// Point-in-time copy of the destinations following a community.
    pub async fn snapshot(&self, community_name: &str) -> Vec<Destination> {
        self.cache.read().await.snapshot(community_name)
    }

    /// Records a post slug on the live cache entry of a destination.
    pub async fn mark_posted(
        &self,
        community_name: &str,
        channel_id: u64,
        post_slug: &str,
    ) -> PostMark {
        self.cache
            .write()
            .await
            .mark_posted(community_name, channel_id, post_slug)
    }

    /// Filters `community_names` down to the ones a channel follows, keeping their order.
    pub async fn followed_communities(
        &self,
        channel_id: u64,
        community_names: &[String],
    ) -> Vec<String> {
        let index = self.cache.read().await;
        community_names
            .iter()
            .filter(|name| index.is_subscribed(name, channel_id))
            .cloned()
            .collect()
    }
}
