use std::sync::Arc;

pub mod commands;

use commands::music::audio_sources::{TrackResolver, ytdlp::YtDlp};
use commands::music::utils::now_playing::NowPlayingRegistry;
use commands::music::utils::playback::PlaybackController;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// Shared bot state, stored in the poise framework and accessible from
/// every command invocation. Constructed once at startup, dropped at
/// shutdown.
pub struct Data {
    /// Per-guild playback state machine.
    pub playback: PlaybackController,
    /// Process-wide "what is each guild hearing" mapping.
    pub now_playing: NowPlayingRegistry,
    /// Resolves queries/URLs into playable track descriptors.
    pub resolver: Arc<dyn TrackResolver>,
    /// Shared HTTP client feeding the songbird audio input.
    pub http_client: reqwest::Client,
}

impl Data {
    pub fn new() -> Self {
        Self {
            playback: PlaybackController::new(),
            now_playing: NowPlayingRegistry::new(),
            resolver: Arc::new(YtDlp),
            http_client: reqwest::Client::new(),
        }
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::new()
    }
}
