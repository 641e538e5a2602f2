//! Process-wide mapping from guild to the currently playing track plus
//! requester metadata. No persistence; entries do not survive a restart.

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use serenity::model::id::GuildId;

use crate::commands::music::audio_sources::track_descriptor::TrackDescriptor;

/// What a given guild is currently hearing.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingEntry {
    pub track: TrackDescriptor,
    /// Display name of the user who requested the track.
    pub requested_by: String,
    /// Avatar link of the requester, shown in the embed footer.
    pub requester_avatar: String,
}

/// Registry of now-playing entries, keyed per guild. Overwritten when
/// playback starts, cleared on explicit stop; skip and pause/resume leave
/// the entry untouched.
#[derive(Default)]
pub struct NowPlayingRegistry {
    entries: DashMap<GuildId, NowPlayingEntry>,
}

impl NowPlayingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, guild_id: GuildId, entry: NowPlayingEntry) {
        self.entries.insert(guild_id, entry);
    }

    pub fn get(&self, guild_id: GuildId) -> Option<NowPlayingEntry> {
        self.entries.get(&guild_id).map(|e| e.value().clone())
    }

    pub fn clear(&self, guild_id: GuildId) {
        self.entries.remove(&guild_id);
    }
}
