use crate::error::AppError;

/// Parses a role from either a mention (`<@&123>`) or a raw ID.
///
/// # Arguments
/// - `value` - Command argument naming the role
///
/// # Returns
/// - `Ok(u64)` - Role ID
/// - `Err(AppError::BadRequest)` - Argument is neither a role mention nor a numeric ID
pub fn parse_role_id(value: &str) -> Result<u64, AppError> {
    let trimmed = value.trim();
    let id = trimmed
        .strip_prefix("<@&")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(trimmed);

    id.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| AppError::BadRequest(format!("`{}` is not a valid role.", value)))
}
