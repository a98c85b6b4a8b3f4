use crate::{error::AppError, state::AppState};

use super::communities_available;

/// Follows or unfollows a community for a channel.
///
/// Without a community name, lists the communities available instead.
///
/// # Returns
/// - `Ok(String)` - Reply describing the new state
/// - `Err(AppError::BadRequest)` - The community does not exist upstream
/// - `Err(AppError::DbErr)` - Store write failed
pub async fn toggle(
    state: &AppState,
    channel_id: u64,
    community_name: Option<&str>,
) -> Result<String, AppError> {
    let Some(community_name) = community_name else {
        return Ok(communities_available(state).await);
    };

    let Some(club) = state.platform.club_by_name(community_name).await else {
        return Err(AppError::BadRequest(format!(
            "The UCube Community Name you have entered does not exist. Your options are ``{}``.",
            state.platform.community_names().await.join(", ")
        )));
    };

    let now_following = state
        .subscriptions
        .toggle_follow(channel_id, &club.name)
        .await?;

    if now_following {
        tracing::info!("Channel {} followed {}", channel_id, club.name);
        Ok(format!("You are now following {}.", club.name))
    } else {
        tracing::info!("Channel {} unfollowed {}", channel_id, club.name);
        Ok(format!(
            "You are no longer following {}.",
            community_name.to_lowercase()
        ))
    }
}
