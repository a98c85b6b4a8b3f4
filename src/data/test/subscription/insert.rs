use super::*;

/// Tests inserting a new subscription row.
///
/// Verifies that the repository stores the channel and community with no role.
///
/// Expected: Ok with row created
#[tokio::test]
async fn creates_row_without_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    let subscription = repo.insert(123456789, "clc").await?;

    assert_eq!(subscription.channel_id, 123456789);
    assert_eq!(subscription.community_name, "clc");
    assert!(subscription.role_id.is_none());

    let stored = entity::prelude::Subscription::find_by_id(subscription.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.channel_id, 123456789);
    assert!(stored.role_id.is_none());

    Ok(())
}

/// Tests that community names are lower-cased on insert.
///
/// Expected: Ok with stored name lower-cased
#[tokio::test]
async fn lowercases_community_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    repo.insert(1, "MyClub").await?;

    let count = entity::prelude::Subscription::find()
        .filter(entity::subscription::Column::CommunityName.eq("myclub"))
        .count(db)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that large Discord snowflakes survive the signed column.
///
/// Expected: Ok with the same channel id read back
#[tokio::test]
async fn stores_full_size_snowflakes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let channel_id = 1_234_567_890_123_456_789u64;
    let repo = SubscriptionRepository::new(db);
    repo.insert(channel_id, "clc").await?;

    let all = repo.fetch_all().await?;
    assert_eq!(all[0].channel_id, channel_id);

    Ok(())
}
