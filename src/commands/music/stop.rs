use super::*;
use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
};
use tracing::warn;

/// Stop playback and leave the voice channel
#[poise::command(slash_command, prefix_command, rename = "music-stop", category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    // Stop requires a live voice connection, even when nothing is playing
    if MusicManager::get_call(ctx.serenity_context(), guild_id)
        .await
        .is_err()
    {
        ctx.send(embedded_messages::plain(
            "❌ I am not connected to a voice channel.",
        ))
        .await?;
        return Ok(());
    }

    let data = ctx.data();
    data.playback.stop(guild_id).await;

    if let Err(err) = MusicManager::disconnect(ctx.serenity_context(), guild_id).await {
        // The main goal (stopping) is achieved, so log and continue
        warn!("Failed to leave voice channel during stop: {}", err);
    }

    data.now_playing.clear(guild_id);

    ctx.send(embedded_messages::plain(
        "⏹️ Stopped playback and disconnected.",
    ))
    .await?;

    Ok(())
}
