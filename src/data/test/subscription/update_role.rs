use super::*;

/// Tests setting a mention role.
///
/// Expected: Ok with role stored
#[tokio::test]
async fn sets_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    repo.insert(10, "clc").await?;

    let updated = repo.update_role(10, "CLC", Some(555)).await?;

    assert_eq!(updated, 1);
    let stored = repo.fetch_all().await?;
    assert_eq!(stored[0].role_id, Some(555));

    Ok(())
}

/// Tests clearing a mention role.
///
/// Expected: Ok with role set back to null
#[tokio::test]
async fn clears_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::subscription::SubscriptionFactory::new(db)
        .channel_id(10)
        .community_name("clc")
        .role_id(Some(555))
        .build()
        .await?;

    let repo = SubscriptionRepository::new(db);
    repo.update_role(10, "clc", None).await?;

    let stored = entity::prelude::Subscription::find()
        .filter(entity::subscription::Column::ChannelId.eq(10i64))
        .one(db)
        .await?
        .unwrap();
    assert!(stored.role_id.is_none());

    Ok(())
}

/// Tests that other channels' roles are untouched.
///
/// Expected: Ok with only the targeted row updated
#[tokio::test]
async fn leaves_other_subscriptions_untouched() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    repo.insert(10, "clc").await?;
    repo.insert(11, "clc").await?;
    repo.insert(10, "weki meki").await?;

    repo.update_role(10, "clc", Some(1)).await?;

    let with_role = entity::prelude::Subscription::find()
        .filter(entity::subscription::Column::RoleId.is_not_null())
        .count(db)
        .await?;
    assert_eq!(with_role, 1);

    Ok(())
}
