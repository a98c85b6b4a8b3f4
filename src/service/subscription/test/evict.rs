use super::*;

/// Tests evicting a destination.
///
/// Verifies that only the evicted (channel, community) pair is removed.
///
/// Expected: Ok with other subscriptions of the same channel kept
#[tokio::test]
async fn removes_only_that_subscription() -> Result<(), DbErr> {
    let service = service().await;
    service.follow(10, "clc").await?;
    service.follow(10, "weki meki").await?;
    service.follow(20, "clc").await?;

    service.evict(10, "CLC").await?;

    assert!(!service.is_subscribed("clc", 10).await);
    assert!(service.is_subscribed("weki meki", 10).await);
    assert!(service.is_subscribed("clc", 20).await);
    let rows = SubscriptionRepository::new(&service.db).fetch_all().await?;
    assert_eq!(rows.len(), 2);

    Ok(())
}

/// Tests evicting a destination that is already gone.
///
/// Expected: Ok
#[tokio::test]
async fn tolerates_missing_destination() -> Result<(), DbErr> {
    let service = service().await;

    service.evict(10, "clc").await?;

    Ok(())
}
