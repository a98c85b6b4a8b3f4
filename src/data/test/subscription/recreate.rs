use super::*;

/// Tests that recreating the table removes every row.
///
/// Expected: Ok with empty table afterwards
#[tokio::test]
async fn drops_all_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_subscription(db).await?;
    factory::create_subscription(db).await?;

    let repo = SubscriptionRepository::new(db);
    repo.recreate().await?;

    assert_eq!(entity::prelude::Subscription::find().count(db).await?, 0);

    Ok(())
}

/// Tests that the recreated table accepts inserts.
///
/// Expected: Ok with insert succeeding after recreate
#[tokio::test]
async fn table_is_usable_after_recreate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_subscription_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SubscriptionRepository::new(db);
    repo.recreate().await?;
    repo.insert(42, "clc").await?;

    assert_eq!(repo.fetch_all().await?.len(), 1);

    Ok(())
}

/// Tests recreating when the table does not exist yet.
///
/// Expected: Ok with table created
#[tokio::test]
async fn creates_missing_table() -> Result<(), DbErr> {
    let mut test = TestBuilder::new().build().await.unwrap();
    let db = test.database().await.unwrap();

    let repo = SubscriptionRepository::new(db);
    repo.recreate().await?;

    assert!(repo.fetch_all().await?.is_empty());

    Ok(())
}
