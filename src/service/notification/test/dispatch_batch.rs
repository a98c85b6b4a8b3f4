use super::*;
use crate::platform::NotificationFeed;

/// Tests that one failing notification does not stop its batch.
///
/// Expected: one handled, one failed, valid notification delivered
#[tokio::test]
async fn failing_notification_does_not_stop_batch() {
    let harness = Harness::new(RecordingTransport::new()).await;
    harness.follow(&[10]).await;
    let mut broken = notification();
    broken.club_slug = "unknown-club".to_string();

    let report = harness
        .dispatcher
        .dispatch_batch(&[broken, notification()])
        .await;

    assert_eq!(report.handled, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(harness.transport.channels_sent_to(), vec![10]);
}

/// Tests that the consumer loop drains the feed and stops once it closes.
///
/// Expected: queued notification delivered and the task finishes
#[tokio::test]
async fn run_consumes_feed_until_closed() {
    let harness = Harness::new(RecordingTransport::new()).await;
    harness.follow(&[10]).await;
    harness
        .directory
        .record_notification(notification())
        .await;

    let Harness {
        dispatcher,
        transport,
        ..
    } = harness;
    let (feed, receiver) = NotificationFeed::channel(4);
    let task = tokio::spawn(dispatcher.run(receiver));

    feed.publish(vec![notification()]).await.unwrap();
    drop(feed);
    task.await.unwrap();

    assert_eq!(transport.channels_sent_to(), vec![10]);
}
