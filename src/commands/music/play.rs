use super::*;
use crate::commands::music::utils::{
    embedded_messages,
    music_manager::{MusicError, MusicManager},
    now_playing::NowPlayingEntry,
    playback::PlaybackError,
};
use poise::CreateReply;
use tracing::{error, info};

/// Play a song from YouTube by title or link
#[poise::command(slash_command, prefix_command, rename = "music-play", category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[rest]
    #[description = "URL or search query"]
    query: String,
) -> CommandResult {
    info!("Received play command with query: {}", query);
    let guild_id = ctx.guild_id().ok_or_else(|| {
        Box::new(MusicError::NotInGuild) as Box<dyn std::error::Error + Send + Sync>
    })?;

    // Get the user's voice channel
    let user_id = ctx.author().id;
    let channel_id =
        match MusicManager::get_user_voice_channel(ctx.serenity_context(), guild_id, user_id) {
            Ok(channel_id) => channel_id,
            Err(_) => {
                ctx.send(embedded_messages::plain(
                    "❌ Please join a voice channel first!",
                ))
                .await?;
                return Ok(());
            }
        };

    // Defer the response since resolution and extraction take time
    ctx.defer().await?;

    // Join the user's channel, or relocate to it if connected elsewhere
    let call =
        match MusicManager::ensure_connected(ctx.serenity_context(), guild_id, channel_id).await {
            Ok(call) => call,
            Err(err) => {
                let reason = match err {
                    MusicError::JoinFailed(reason) => reason,
                    other => other.to_string(),
                };
                ctx.send(embedded_messages::plain(format!(
                    "❌ Could not join voice channel: {reason}"
                )))
                .await?;
                return Ok(());
            }
        };

    let data = ctx.data();

    let track = match data.resolver.resolve(&query).await {
        Ok(track) => track,
        Err(err) => {
            error!("Failed to resolve \"{}\": {}", query, err);
            ctx.send(embedded_messages::plain(format!(
                "❌ Could not find or play \"{query}\": {err}"
            )))
            .await?;
            return Ok(());
        }
    };

    if let Err(err) = data
        .playback
        .play(data.http_client.clone(), call, guild_id, &track.stream_url)
        .await
    {
        error!("Playback failed for guild {}: {}", guild_id, err);
        let message = match &err {
            PlaybackError::Decode(reason) => format!("❌ Error preparing audio: {reason}"),
            other => format!("❌ Error playing audio: {other}"),
        };
        ctx.send(embedded_messages::plain(message)).await?;
        return Ok(());
    }

    let entry = NowPlayingEntry {
        track,
        requested_by: ctx.author().display_name().to_string(),
        requester_avatar: ctx.author().face(),
    };
    data.now_playing.set(guild_id, entry.clone());

    ctx.send(CreateReply::default().embed(embedded_messages::now_playing(&entry)))
        .await?;

    Ok(())
}
