use super::*;
use crate::commands::music::utils::{
    embedded_messages, music_manager::MusicError, playback::PlaybackError,
};

/// Skip the current song
#[poise::command(slash_command, prefix_command, rename = "music-skip", category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    // Skip stops the stream but does not start another; the next
    // music-play supplies the next track.
    match ctx.data().playback.skip(guild_id).await {
        Ok(()) => {
            ctx.send(embedded_messages::plain("⏭️ Skipped the current song."))
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
