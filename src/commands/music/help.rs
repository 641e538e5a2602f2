use super::*;
use crate::commands::music::utils::embedded_messages;
use poise::CreateReply;

/// Show help for the music commands
#[poise::command(slash_command, prefix_command, rename = "music-help", category = "Music")]
pub async fn help(ctx: Context<'_>) -> CommandResult {
    ctx.send(CreateReply::default().embed(embedded_messages::help()))
        .await?;

    Ok(())
}
