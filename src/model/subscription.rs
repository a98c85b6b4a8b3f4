//! Domain models for channel subscriptions.

/// Lower-cases a community name into the key used by the store and the cache.
pub fn community_key(community_name: &str) -> String {
    community_name.to_lowercase()
}

/// A durable subscription row.
///
/// Discord snowflakes are stored as signed 64-bit integers; they always fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Surrogate key of the row.
    pub id: i32,
    /// Discord text channel ID.
    pub channel_id: u64,
    /// Lower-cased community name.
    pub community_name: String,
    /// Role mentioned on the first message of each notification.
    pub role_id: Option<u64>,
}

impl Subscription {
    /// Converts an entity model to a subscription domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Subscription` - The converted domain model
    pub fn from_entity(entity: entity::subscription::Model) -> Self {
        Self {
            id: entity.id,
            channel_id: entity.channel_id as u64,
            community_name: entity.community_name,
            role_id: entity.role_id.map(|id| id as u64),
        }
    }
}

/// A channel subscribed to one community, as held by the subscription index.
///
/// Unique per (channel, community) pair: a channel following two communities has
/// two `Destination` records with the same `channel_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Discord text channel ID.
    pub channel_id: u64,
    /// Role mentioned on the first message of each notification.
    pub role_id: Option<u64>,
    /// Slugs of posts already sent to this channel since the entry was loaded.
    pub already_posted: Vec<String>,
}

impl Destination {
    pub fn new(channel_id: u64, role_id: Option<u64>) -> Self {
        Self {
            channel_id,
            role_id,
            already_posted: Vec::new(),
        }
    }

    /// Returns true if `post_slug` has already been sent to this channel.
    pub fn has_posted(&self, post_slug: &str) -> bool {
        self.already_posted.iter().any(|slug| slug == post_slug)
    }

    /// Formats the role mention prefix, if a role is configured.
    pub fn mention(&self) -> Option<String> {
        self.role_id.map(|role_id| format!("<@&{}>", role_id))
    }
}
