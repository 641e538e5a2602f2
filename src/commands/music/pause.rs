use super::*;
use crate::commands::music::utils::{
    embedded_messages, music_manager::MusicError, playback::PlaybackError,
};

/// Pause the current song
#[poise::command(slash_command, prefix_command, rename = "music-pause", category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    match ctx.data().playback.pause(guild_id).await {
        Ok(()) => {
            ctx.send(embedded_messages::plain("⏸️ Paused the current song."))
                .await?
        }
        Err(PlaybackError::NotPlaying) => {
            ctx.send(embedded_messages::plain("❌ No song is currently playing."))
                .await?
        }
        Err(err) => ctx.send(embedded_messages::plain(format!("❌ {err}"))).await?,
    };

    Ok(())
}
