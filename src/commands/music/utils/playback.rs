//! Per-guild playback state machine: `Idle → Playing → {Paused ⇄ Playing}
//! → Idle`. One active stream per guild, never two concurrent decodes —
//! the transport permits only one audio sink per connection.

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::model::id::GuildId;
use serenity::prelude::Mutex as SerenityMutex;
use songbird::input::HttpRequest;
use songbird::tracks::{PlayMode, Track, TrackHandle};
use songbird::{Call, Event, EventContext, TrackEvent};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors that can occur while driving playback
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("No song is currently playing")]
    NotPlaying,

    #[error("No song is currently paused")]
    NotPaused,

    #[error("Failed to prepare audio stream: {0}")]
    Decode(String),

    #[error("Failed to start playback: {0}")]
    Play(String),

    #[error("Track control failed: {0}")]
    Control(String),
}

/// Playback state of one guild. Illegal transitions are typed errors
/// rather than booleans inferred from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    /// `Playing → Paused`; anything else is an error and leaves the state
    /// untouched.
    pub fn pause(self) -> Result<PlaybackState, PlaybackError> {
        match self {
            PlaybackState::Playing => Ok(PlaybackState::Paused),
            _ => Err(PlaybackError::NotPlaying),
        }
    }

    /// `Paused → Playing`.
    pub fn resume(self) -> Result<PlaybackState, PlaybackError> {
        match self {
            PlaybackState::Paused => Ok(PlaybackState::Playing),
            _ => Err(PlaybackError::NotPaused),
        }
    }

    /// `Playing → Idle`. Skip stops the current stream but does not start
    /// a new one; the next play command supplies the next track.
    pub fn skip(self) -> Result<PlaybackState, PlaybackError> {
        match self {
            PlaybackState::Playing => Ok(PlaybackState::Idle),
            _ => Err(PlaybackError::NotPlaying),
        }
    }
}

#[derive(Default)]
struct GuildPlayback {
    state: PlaybackState,
    handle: Option<TrackHandle>,
}

/// Drives the voice connection with a decoded audio stream for exactly one
/// track at a time per guild.
///
/// Each guild gets its own lock slot; the shared map is only touched for
/// slot lookup, so a guild suspended on a network await (stream probing,
/// the voice call) never blocks another guild's commands.
#[derive(Clone, Default)]
pub struct PlaybackController {
    guilds: Arc<DashMap<GuildId, Arc<Mutex<GuildPlayback>>>>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, guild_id: GuildId) -> Arc<Mutex<GuildPlayback>> {
        self.guilds.entry(guild_id).or_default().value().clone()
    }

    fn existing_slot(&self, guild_id: GuildId) -> Option<Arc<Mutex<GuildPlayback>>> {
        self.guilds.get(&guild_id).map(|s| s.value().clone())
    }

    /// Current state for the guild; `Idle` when the guild has never played.
    pub async fn state(&self, guild_id: GuildId) -> PlaybackState {
        match self.existing_slot(guild_id) {
            Some(slot) => slot.lock().await.state,
            None => PlaybackState::Idle,
        }
    }

    /// Start streaming `stream_url` into the guild's voice connection.
    ///
    /// Any in-progress track is hard-preempted first (stopped, not faded).
    /// The HTTP input reconnects on transient source hiccups on its own;
    /// there is no application-level retry.
    pub async fn play(
        &self,
        http_client: reqwest::Client,
        call: Arc<SerenityMutex<Call>>,
        guild_id: GuildId,
        stream_url: &str,
    ) -> Result<(), PlaybackError> {
        let slot = self.slot(guild_id);
        let mut playback = slot.lock().await;

        if let Some(previous) = playback.handle.take() {
            debug!("Preempting current track for guild {}", guild_id);
            let _ = previous.stop();
        }
        playback.state = PlaybackState::Idle;

        // Hand the track to the driver paused, so the end-of-track
        // notifier is installed before any audio can finish or fail.
        let input = HttpRequest::new(http_client, stream_url.to_string());
        let mut track = Track::from(input);
        track.playing = PlayMode::Pause;
        let handle = call.lock().await.play(track);

        handle
            .add_event(
                Event::Track(TrackEvent::End),
                TrackEndNotifier {
                    controller: self.clone(),
                    guild_id,
                },
            )
            .map_err(|e| PlaybackError::Play(e.to_string()))?;

        if let Err(e) = handle.make_playable_async().await {
            let _ = handle.stop();
            return Err(PlaybackError::Decode(e.to_string()));
        }
        if let Err(e) = handle.play() {
            let _ = handle.stop();
            return Err(PlaybackError::Play(e.to_string()));
        }

        info!("Started playback for guild {}", guild_id);
        playback.handle = Some(handle);
        playback.state = PlaybackState::Playing;

        Ok(())
    }

    /// Pause the current track. Valid only from `Playing`.
    pub async fn pause(&self, guild_id: GuildId) -> Result<(), PlaybackError> {
        let slot = self
            .existing_slot(guild_id)
            .ok_or(PlaybackError::NotPlaying)?;
        let mut playback = slot.lock().await;

        let next = playback.state.pause()?;
        if let Some(handle) = &playback.handle {
            handle
                .pause()
                .map_err(|e| PlaybackError::Control(e.to_string()))?;
        }
        playback.state = next;

        Ok(())
    }

    /// Resume a paused track. Valid only from `Paused`.
    pub async fn resume(&self, guild_id: GuildId) -> Result<(), PlaybackError> {
        let slot = self
            .existing_slot(guild_id)
            .ok_or(PlaybackError::NotPaused)?;
        let mut playback = slot.lock().await;

        let next = playback.state.resume()?;
        if let Some(handle) = &playback.handle {
            handle
                .play()
                .map_err(|e| PlaybackError::Control(e.to_string()))?;
        }
        playback.state = next;

        Ok(())
    }

    /// Stop the current stream without starting a new one. Valid only from
    /// `Playing`.
    pub async fn skip(&self, guild_id: GuildId) -> Result<(), PlaybackError> {
        let slot = self
            .existing_slot(guild_id)
            .ok_or(PlaybackError::NotPlaying)?;
        let mut playback = slot.lock().await;

        let next = playback.state.skip()?;
        if let Some(handle) = playback.handle.take() {
            let _ = handle.stop();
        }
        playback.state = next;

        Ok(())
    }

    /// Stop playback and return to `Idle`. Valid from any state.
    pub async fn stop(&self, guild_id: GuildId) {
        let Some(slot) = self.existing_slot(guild_id) else {
            return;
        };
        let mut playback = slot.lock().await;

        if let Some(handle) = playback.handle.take() {
            let _ = handle.stop();
        }
        playback.state = PlaybackState::Idle;
    }

    /// Transition `Playing → Idle` when the transport reports the current
    /// track finished on its own. A preempted track's end event is ignored:
    /// only the handle that is still current may idle the guild. The
    /// now-playing entry is left in place for the nowplaying command.
    async fn on_track_end(&self, guild_id: GuildId, ended: &TrackHandle) {
        let Some(slot) = self.existing_slot(guild_id) else {
            return;
        };
        let mut playback = slot.lock().await;

        if playback
            .handle
            .as_ref()
            .is_some_and(|h| h.uuid() == ended.uuid())
        {
            info!("Track ended for guild {}", guild_id);
            playback.handle = None;
            playback.state = PlaybackState::Idle;
        }
    }

    #[cfg(test)]
    async fn seed_state(&self, guild_id: GuildId, state: PlaybackState) {
        self.slot(guild_id).lock().await.state = state;
    }
}

/// Event handler for when a track ends
struct TrackEndNotifier {
    controller: PlaybackController,
    guild_id: GuildId,
}

#[serenity::async_trait]
impl songbird::EventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<Event> {
        if let EventContext::Track(tracks) = ctx {
            for (_, handle) in *tracks {
                self.controller.on_track_end(self.guild_id, handle).await;
            }
        }
        None
    }
}
