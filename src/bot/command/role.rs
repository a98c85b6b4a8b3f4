use crate::{
    error::AppError, service::subscription::RoleChange, state::AppState,
    util::parse::parse_role_id,
};

use super::communities_available;

const USAGE: &str = "Usage: `role <@role> <community>`";

/// Toggles the role mentioned on a channel's notifications for a community.
///
/// # Arguments
/// - `args` - Role mention or ID followed by the community name
///
/// # Returns
/// - `Ok(String)` - Reply describing the new state
/// - `Err(AppError::BadRequest)` - Missing or invalid arguments
/// - `Err(AppError::DbErr)` - Store write failed
pub async fn toggle(state: &AppState, channel_id: u64, args: &str) -> Result<String, AppError> {
    let Some((role, community_name)) = args.trim().split_once(char::is_whitespace) else {
        return Err(AppError::BadRequest(USAGE.to_string()));
    };
    let role_id = parse_role_id(role)?;
    let community_name = community_name.trim().to_lowercase();

    if state.platform.club_by_name(&community_name).await.is_none() {
        return Ok(communities_available(state).await);
    }

    let reply = match state
        .subscriptions
        .toggle_role(channel_id, &community_name, role_id)
        .await?
    {
        RoleChange::Mentioned => "That role will now receive notifications.".to_string(),
        RoleChange::Cleared => "This role will no longer be mentioned.".to_string(),
        RoleChange::NotFollowing => format!(
            "This channel is not currently following {}.",
            community_name
        ),
    };

    Ok(reply)
}
