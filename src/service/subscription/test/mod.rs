use crate::{
    data::subscription::SubscriptionRepository,
    service::subscription::{RoleChange, SubscriptionService},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod evict;

/// Builds a service over a fresh in-memory database with the subscription table.
async fn service() -> SubscriptionService {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();

    SubscriptionService::new(test.db.unwrap())
}
