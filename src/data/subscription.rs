//! Subscription data repository for database operations.
//!
//! This module provides the `SubscriptionRepository`, the durable side of the channel
//! subscription cache. Rows are keyed by (channel id, lower-cased community name).
//! Uniqueness of that pair is not enforced here; the subscription index owns it.

use sea_orm::{
    sea_query::{Expr, Table},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Schema,
};

use crate::model::subscription::{community_key, Subscription};

/// Repository providing database operations for channel subscriptions.
pub struct SubscriptionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriptionRepository<'a> {
    /// Creates a new SubscriptionRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `SubscriptionRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks whether the database currently accepts queries.
    pub async fn is_connected(&self) -> bool {
        self.db.ping().await.is_ok()
    }

    /// Inserts a subscription row with no mention role.
    ///
    /// The community name is lower-cased before writing.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    /// - `community_name` - Community name in any case
    ///
    /// # Returns
    /// - `Ok(Subscription)` - The inserted row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn insert(
        &self,
        channel_id: u64,
        community_name: &str,
    ) -> Result<Subscription, DbErr> {
        let entity = entity::subscription::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(channel_id as i64),
            community_name: ActiveValue::Set(community_key(community_name)),
            role_id: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(Subscription::from_entity(entity))
    }

    /// Deletes every row for a channel and community.
    ///
    /// Deleting a subscription that does not exist is not an error.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, channel_id: u64, community_name: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Subscription::delete_many()
            .filter(entity::subscription::Column::ChannelId.eq(channel_id as i64))
            .filter(entity::subscription::Column::CommunityName.eq(community_key(community_name)))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Sets or clears the mention role of a subscription.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID
    /// - `community_name` - Community name in any case
    /// - `role_id` - New role, or `None` to stop mentioning
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows updated
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_role(
        &self,
        channel_id: u64,
        community_name: &str,
        role_id: Option<u64>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Subscription::update_many()
            .col_expr(
                entity::subscription::Column::RoleId,
                Expr::value(role_id.map(|id| id as i64)),
            )
            .filter(entity::subscription::Column::ChannelId.eq(channel_id as i64))
            .filter(entity::subscription::Column::CommunityName.eq(community_key(community_name)))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Returns every subscription row, oldest first.
    pub async fn fetch_all(&self) -> Result<Vec<Subscription>, DbErr> {
        let entities = entity::prelude::Subscription::find()
            .order_by_asc(entity::subscription::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Subscription::from_entity).collect())
    }

    /// Drops the subscription table and creates it again from the entity definition.
    ///
    /// Destroys every row. Not atomic: no reads may run against the table until this
    /// returns.
    pub async fn recreate(&self) -> Result<(), DbErr> {
        let schema = Schema::new(self.db.get_database_backend());

        self.db
            .execute(
                &Table::drop()
                    .table(entity::prelude::Subscription)
                    .if_exists()
                    .to_owned(),
            )
            .await?;

        self.db
            .execute(
                &schema
                    .create_table_from_entity(entity::prelude::Subscription)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
