use super::*;

/// Tests fetching from an empty table.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_when_no_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    assert!(repo.fetch_all().await?.is_empty());

    Ok(())
}

/// Tests fetching every row with its role.
///
/// Expected: Ok with all rows in insertion order
#[tokio::test]
async fn returns_all_rows_in_insertion_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_subscription_for(db, 1, "clc").await?;
    factory::subscription::SubscriptionFactory::new(db)
        .channel_id(2)
        .community_name("weki meki")
        .role_id(Some(99))
        .build()
        .await?;

    let repo = SubscriptionRepository::new(db);
    let all = repo.fetch_all().await?;

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].channel_id, 1);
    assert_eq!(all[0].community_name, "clc");
    assert_eq!(all[1].channel_id, 2);
    assert_eq!(all[1].role_id, Some(99));

    Ok(())
}
