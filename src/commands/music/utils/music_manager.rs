use poise::serenity_prelude as serenity;
use serenity::client::Context;
use serenity::model::id::{ChannelId, GuildId};
use serenity::prelude::Mutex as SerenityMutex;
use songbird::{Call, Songbird};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur during music operations
#[derive(Error, Debug)]
pub enum MusicError {
    #[error("Not in a guild")]
    NotInGuild,

    #[error("Failed to get voice manager")]
    NoVoiceManager,

    #[error("User is not in a voice channel")]
    NotInVoice,

    #[error("Failed to join voice channel: {0}")]
    JoinFailed(String),

    #[error("Not connected to a voice channel")]
    NotConnected,

    #[error("No results found: {0}")]
    NotFound(String),

    #[error("Audio extraction failed: {0}")]
    Extraction(String),
}

/// Result type for music operations
pub type MusicResult<T> = Result<T, MusicError>;

/// Manages Songbird voice connections, at most one per guild.
pub struct MusicManager;

impl MusicManager {
    /// Get the Songbird voice client from the context
    pub async fn get_songbird(ctx: &Context) -> MusicResult<Arc<Songbird>> {
        songbird::get(ctx).await.ok_or(MusicError::NoVoiceManager)
    }

    /// Get the current voice channel call handle
    pub async fn get_call(
        ctx: &Context,
        guild_id: GuildId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let songbird = Self::get_songbird(ctx).await?;
        songbird.get(guild_id).ok_or(MusicError::NotConnected)
    }

    /// Get the voice channel ID that the user is currently in
    pub fn get_user_voice_channel(
        ctx: &Context,
        guild_id: GuildId,
        user_id: serenity::UserId,
    ) -> MusicResult<ChannelId> {
        let guild = ctx.cache.guild(guild_id).ok_or(MusicError::NotInGuild)?;

        let voice_state = guild
            .voice_states
            .get(&user_id)
            .ok_or(MusicError::NotInVoice)?;

        voice_state.channel_id.ok_or(MusicError::NotInVoice)
    }

    /// Ensure a live connection to `channel_id` for this guild.
    ///
    /// No-op when already connected to that channel; relocates when
    /// connected elsewhere (preempting any in-progress audio); joins fresh
    /// otherwise. Never retried on failure.
    pub async fn ensure_connected(
        ctx: &Context,
        guild_id: GuildId,
        channel_id: ChannelId,
    ) -> MusicResult<Arc<SerenityMutex<Call>>> {
        let songbird = Self::get_songbird(ctx).await?;

        if let Some(call) = songbird.get(guild_id) {
            let current = call.lock().await.current_channel();
            if current == Some(channel_id.into()) {
                return Ok(call);
            }
            info!(
                "Relocating voice connection for guild {} to channel {}",
                guild_id, channel_id
            );
        }

        // Songbird's join handles both a fresh connect and a move.
        songbird.join(guild_id, channel_id).await.map_err(|err| {
            error!(
                "Failed to join voice channel {} for guild {}: {}",
                channel_id, guild_id, err
            );
            MusicError::JoinFailed(err.to_string())
        })
    }

    /// Tear down the guild's voice connection. Idempotent no-op when not
    /// connected.
    pub async fn disconnect(ctx: &Context, guild_id: GuildId) -> MusicResult<()> {
        let songbird = Self::get_songbird(ctx).await?;

        if songbird.get(guild_id).is_none() {
            return Ok(());
        }

        songbird
            .remove(guild_id)
            .await
            .map_err(|e| MusicError::JoinFailed(format!("Failed to leave voice channel: {e}")))
    }
}
