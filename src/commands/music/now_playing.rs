use super::*;
use crate::commands::music::utils::{embedded_messages, music_manager::MusicError};
use poise::CreateReply;

/// Show info about the currently playing song
#[poise::command(
    slash_command,
    prefix_command,
    rename = "music-nowplaying",
    category = "Music"
)]
pub async fn now_playing(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    match ctx.data().now_playing.get(guild_id) {
        Some(entry) => {
            ctx.send(CreateReply::default().embed(embedded_messages::now_playing(&entry)))
                .await?
        }
        None => {
            ctx.send(embedded_messages::plain("❌ No song is currently playing."))
                .await?
        }
    };

    Ok(())
}
