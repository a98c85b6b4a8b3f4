//! Message event handler running prefix commands.

use serenity::all::{Context, Message};

use crate::{
    bot::command::{self, Command},
    error::AppError,
    state::AppState,
};

/// Parses and runs a command, replying in the invoking channel.
///
/// Commands only run in guild channels. Owner-only commands are ignored for anyone
/// else; the rest require the Manage Messages permission.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some(command) = command::parse(&message.content, &state.command_prefix) else {
        return;
    };

    if message.guild_id.is_none() {
        reply(&ctx, &message, "This command can not be used in DMs.").await;
        return;
    }

    if !is_allowed(&ctx, &message, &command).await {
        if command.requires_manage_messages() {
            reply(
                &ctx,
                &message,
                "You need the Manage Messages permission to use this command.",
            )
            .await;
        }
        return;
    }

    tracing::debug!(
        "Running {:?} in channel {} for {}",
        command,
        message.channel_id,
        message.author.name
    );

    let content = match command::execute(state, message.channel_id.get(), command).await {
        Ok(content) => content,
        Err(AppError::BadRequest(content)) | Err(AppError::NotFound(content)) => content,
        Err(e) => {
            tracing::error!(
                "Command failed in channel {}: {}",
                message.channel_id,
                e
            );
            "Something went wrong while running that command.".to_string()
        }
    };

    reply(&ctx, &message, &content).await;
}

async fn is_allowed(ctx: &Context, message: &Message, command: &Command) -> bool {
    if command.owner_only() && !is_owner(ctx, message).await {
        return false;
    }

    if command.requires_manage_messages() && !has_manage_messages(ctx, message).await {
        return false;
    }

    true
}

/// Checks the author against the application owner and team.
async fn is_owner(ctx: &Context, message: &Message) -> bool {
    let info = match ctx.http.get_current_application_info().await {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!("Failed to fetch application info: {}", e);
            return false;
        }
    };

    let author = message.author.id;
    let is_owner = info.owner.as_ref().is_some_and(|owner| owner.id == author);
    let in_team = info
        .team
        .as_ref()
        .is_some_and(|team| team.members.iter().any(|member| member.user.id == author));

    is_owner || in_team
}

/// Checks the author's guild-wide Manage Messages permission.
async fn has_manage_messages(ctx: &Context, message: &Message) -> bool {
    let Some(guild_id) = message.guild_id else {
        return false;
    };

    let member = match message.member(ctx).await {
        Ok(member) => member,
        Err(e) => {
            tracing::warn!("Failed to fetch member {}: {}", message.author.id, e);
            return false;
        }
    };

    ctx.cache
        .guild(guild_id)
        .map(|guild| guild.member_permissions(&member).manage_messages())
        .unwrap_or(false)
}

async fn reply(ctx: &Context, message: &Message, content: &str) {
    if let Err(e) = message.channel_id.say(&ctx.http, content).await {
        tracing::warn!(
            "Failed to reply in channel {}: {}",
            message.channel_id,
            e
        );
    }
}
