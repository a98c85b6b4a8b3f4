//! Prefix text commands.
//!
//! Each command returns the reply to post in the invoking channel. Parsing and
//! execution are separate from Discord so the commands can run against an in-memory
//! platform and database.

pub mod follow;
pub mod list;
pub mod replay;
pub mod role;

#[cfg(test)]
mod test;

use crate::{error::AppError, state::AppState};

/// A recognized command and its raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `list`
    List,
    /// `ucube [community]` or `updates [community]`
    Follow(Option<String>),
    /// `role <role> <community>`
    Role(String),
    /// `testucube [club]`
    Replay(Option<String>),
}

impl Command {
    /// Whether the invoking member needs the Manage Messages permission.
    pub fn requires_manage_messages(&self) -> bool {
        !matches!(self, Command::Replay(_))
    }

    /// Whether only the bot owner may run the command.
    pub fn owner_only(&self) -> bool {
        matches!(self, Command::Replay(_))
    }
}

/// Parses a message into a command.
///
/// # Returns
/// - `Some(Command)` - The message starts with the prefix and names a known command
/// - `None` - Any other message
pub fn parse(content: &str, prefix: &str) -> Option<Command> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };
    let args = (!args.is_empty()).then(|| args.to_string());

    match name.to_lowercase().as_str() {
        "list" => Some(Command::List),
        "ucube" | "updates" => Some(Command::Follow(args)),
        "role" => Some(Command::Role(args.unwrap_or_default())),
        "testucube" => Some(Command::Replay(args)),
        _ => None,
    }
}

/// Runs a command for a channel and returns the reply.
pub async fn execute(
    state: &AppState,
    channel_id: u64,
    command: Command,
) -> Result<String, AppError> {
    match command {
        Command::List => list::list(state, channel_id).await,
        Command::Follow(community_name) => {
            follow::toggle(state, channel_id, community_name.as_deref()).await
        }
        Command::Role(args) => role::toggle(state, channel_id, &args).await,
        Command::Replay(club_name) => replay::replay(state, club_name.as_deref()).await,
    }
}

/// Lists every community available upstream.
pub(crate) async fn communities_available(state: &AppState) -> String {
    format!(
        "The communities available are: ``{}``.",
        state.platform.community_names().await.join(", ")
    )
}
