use crate::{error::AppError, state::AppState};

/// Club replayed when none is named.
pub const DEFAULT_REPLAY_CLUB: &str = "clc";

/// Notifications replayed per invocation.
pub const REPLAY_LIMIT: usize = 5;

/// Queues the most recent notifications of a club for delivery again.
///
/// Each post is fetched first so the dispatcher can resolve it. Notifications whose
/// post cannot be fetched are logged and left out.
///
/// # Returns
/// - `Ok(String)` - Reply with the number of notifications queued
/// - `Err(AppError::NotFound)` - The club does not exist upstream
/// - `Err(AppError::InternalErr)` - The dispatcher has stopped
pub async fn replay(state: &AppState, club_name: Option<&str>) -> Result<String, AppError> {
    let club_name = club_name.unwrap_or(DEFAULT_REPLAY_CLUB);
    let club = state
        .platform
        .club_by_name(club_name)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Club {} not found.", club_name)))?;

    let notifications = state
        .platform
        .recent_notifications(&club.slug, REPLAY_LIMIT)
        .await?;

    let mut ready = Vec::with_capacity(notifications.len());
    for notification in notifications {
        match state.platform.fetch_post(&notification.post_slug).await {
            Ok(_) => ready.push(notification),
            Err(e) => tracing::warn!(
                "Skipping replay of notification {}: {}",
                notification.slug,
                e
            ),
        }
    }

    let queued = ready.len();
    state.feed.publish(ready).await?;

    tracing::info!("Queued {} notifications of {} for replay", queued, club.name);

    Ok(format!(
        "Queued {} notifications from {}.",
        queued, club.name
    ))
}
