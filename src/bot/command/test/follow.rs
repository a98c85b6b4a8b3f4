use super::*;

/// Tests the command without a community name.
///
/// Expected: list of available communities
#[tokio::test]
async fn without_name_lists_communities() {
    let harness = Harness::new().await;

    let reply = harness.run("!ucube").await.unwrap();

    assert_eq!(reply, "The communities available are: ``clc, weki meki``.");
}

/// Tests following an unknown community.
///
/// Expected: Err(BadRequest) naming the options
#[tokio::test]
async fn unknown_community_is_rejected() {
    let harness = Harness::new().await;

    let result = harness.run("!ucube nobody").await;

    match result {
        Err(AppError::BadRequest(message)) => assert!(message.contains("``clc, weki meki``")),
        other => panic!("expected BadRequest, got {:?}", other),
    }
    assert!(!harness.state.subscriptions.is_subscribed("nobody", CHANNEL_ID).await);
}

/// Tests toggling a follow with the alias and mixed case.
///
/// Expected: follow then unfollow replies
#[tokio::test]
async fn toggles_follow() {
    let harness = Harness::new().await;

    let followed = harness.run("!updates Weki MEKI").await.unwrap();
    assert_eq!(followed, "You are now following Weki Meki.");
    assert!(harness.state.subscriptions.is_subscribed("weki meki", CHANNEL_ID).await);

    let unfollowed = harness.run("!ucube weki meki").await.unwrap();
    assert_eq!(unfollowed, "You are no longer following weki meki.");
    assert!(!harness.state.subscriptions.is_subscribed("weki meki", CHANNEL_ID).await);
}
