//! Subscription factory for inserting test subscription rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test subscription rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::subscription::SubscriptionFactory;
///
/// let row = SubscriptionFactory::new(&db)
///     .channel_id(123)
///     .community_name("clc")
///     .build()
///     .await?;
/// ```
pub struct SubscriptionFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: i64,
    community_name: String,
    role_id: Option<i64>,
}

impl<'a> SubscriptionFactory<'a> {
    /// Creates a new SubscriptionFactory with default values.
    ///
    /// Defaults:
    /// - channel_id: auto-incremented
    /// - community_name: `"community {id}"`
    /// - role_id: `None`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `SubscriptionFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            channel_id: id as i64,
            community_name: format!("community {}", id),
            role_id: None,
        }
    }

    /// Sets the channel ID.
    pub fn channel_id(mut self, channel_id: i64) -> Self {
        self.channel_id = channel_id;
        self
    }

    /// Sets the community name. Stored exactly as given.
    pub fn community_name(mut self, community_name: impl Into<String>) -> Self {
        self.community_name = community_name.into();
        self
    }

    /// Sets the mention role ID.
    pub fn role_id(mut self, role_id: Option<i64>) -> Self {
        self.role_id = role_id;
        self
    }

    /// Inserts the subscription row.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::subscription::Model, DbErr> {
        entity::subscription::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(self.channel_id),
            community_name: ActiveValue::Set(self.community_name),
            role_id: ActiveValue::Set(self.role_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a subscription row with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(Model)` - The inserted row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_subscription(
    db: &DatabaseConnection,
) -> Result<entity::subscription::Model, DbErr> {
    SubscriptionFactory::new(db).build().await
}

/// Creates a subscription row for a specific channel and community.
///
/// # Arguments
/// - `db` - Database connection
/// - `channel_id` - Discord channel ID
/// - `community_name` - Community name, stored as given
///
/// # Returns
/// - `Ok(Model)` - The inserted row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_subscription_for(
    db: &DatabaseConnection,
    channel_id: i64,
    community_name: &str,
) -> Result<entity::subscription::Model, DbErr> {
    SubscriptionFactory::new(db)
        .channel_id(channel_id)
        .community_name(community_name)
        .build()
        .await
}
