use super::*;

/// Tests deleting an existing subscription.
///
/// Expected: Ok with the row removed and other rows untouched
#[tokio::test]
async fn removes_matching_row_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_subscription_for(db, 1, "clc").await?;
    factory::create_subscription_for(db, 1, "weki meki").await?;
    factory::create_subscription_for(db, 2, "clc").await?;

    let repo = SubscriptionRepository::new(db);
    let removed = repo.delete(1, "clc").await?;

    assert_eq!(removed, 1);
    let remaining = repo.fetch_all().await?;
    assert_eq!(remaining.len(), 2);
    assert!(!remaining
        .iter()
        .any(|s| s.channel_id == 1 && s.community_name == "clc"));

    Ok(())
}

/// Tests that the community name is matched case-insensitively.
///
/// Expected: Ok with the row removed
#[tokio::test]
async fn matches_community_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    repo.insert(7, "clc").await?;

    let removed = repo.delete(7, "CLC").await?;

    assert_eq!(removed, 1);
    assert_eq!(entity::prelude::Subscription::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting a subscription that does not exist.
///
/// Expected: Ok with zero rows removed
#[tokio::test]
async fn missing_row_is_not_an_error() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    let removed = repo.delete(999, "nobody").await?;

    assert_eq!(removed, 0);

    Ok(())
}

/// Tests that duplicate rows for the same pair are all removed.
///
/// Expected: Ok with both duplicates removed
#[tokio::test]
async fn removes_duplicate_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_subscription_for(db, 5, "clc").await?;
    factory::create_subscription_for(db, 5, "clc").await?;

    let repo = SubscriptionRepository::new(db);
    let removed = repo.delete(5, "clc").await?;

    assert_eq!(removed, 2);

    Ok(())
}
