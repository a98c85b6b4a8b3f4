use crate::{error::AppError, state::AppState};

/// Lists the communities a channel follows, in upstream order.
pub async fn list(state: &AppState, channel_id: u64) -> Result<String, AppError> {
    let community_names = state.platform.community_names().await;
    let followed = state
        .subscriptions
        .followed_communities(channel_id, &community_names)
        .await;

    Ok(format!(
        "You are currently following `{}`.",
        followed.join(", ")
    ))
}
