//! Bounded queue between the platform client and the notification dispatcher.
//!
//! The platform client publishes whole batches; the dispatcher consumes one batch
//! at a time. When the dispatcher falls behind, `publish` waits for room instead of
//! buffering without bound.

use tokio::sync::mpsc;

use crate::{error::internal::InternalError, error::AppError, model::platform::Notification};

/// A batch of notifications detected in one upstream poll.
pub type NotificationBatch = Vec<Notification>;

/// Producer side of the notification queue.
#[derive(Clone)]
pub struct NotificationFeed {
    sender: mpsc::Sender<NotificationBatch>,
}

impl NotificationFeed {
    /// Creates a feed and the receiver the dispatcher consumes.
    ///
    /// # Arguments
    /// - `capacity` - Maximum number of batches waiting to be dispatched
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NotificationBatch>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Enqueues a batch, waiting while the queue is full.
    ///
    /// # Returns
    /// - `Ok(())` - Batch queued
    /// - `Err(AppError::InternalErr)` - The dispatcher has stopped
    pub async fn publish(&self, batch: NotificationBatch) -> Result<(), AppError> {
        if batch.is_empty() {
            return Ok(());
        }

        self.sender
            .send(batch)
            .await
            .map_err(|_| InternalError::FeedClosed)?;

        Ok(())
    }
}
