use super::*;
use crate::commands::music::utils::{
    embedded_messages, music_manager::MusicError, playback::PlaybackError,
};

/// Resume playback
#[poise::command(slash_command, prefix_command, rename = "music-resume", category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    match ctx.data().playback.resume(guild_id).await {
        Ok(()) => ctx.send(embedded_messages::plain("▶️ Resumed playback.")).await?,
        Err(PlaybackError::NotPaused) => {
            ctx.send(embedded_messages::plain("❌ No song is currently paused."))
                .await?
        }
        Err(err) => ctx.send(embedded_messages::plain(format!("❌ {err}"))).await?,
    };

    Ok(())
}
