//! Integration tests for the playback controller, the now-playing
//! registry, and the resolver contract.

use assert_matches::assert_matches;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rstest::*;

use cadence::commands::music::audio_sources::TrackResolver;
use cadence::commands::music::audio_sources::track_descriptor::TrackDescriptor;
use cadence::commands::music::utils::music_manager::MusicError;
use cadence::commands::music::utils::now_playing::{NowPlayingEntry, NowPlayingRegistry};
use cadence::commands::music::utils::playback::{
    PlaybackController, PlaybackError, PlaybackState,
};
use poise::serenity_prelude::GuildId;

/// Resolver stub answering like the real backend without shelling out.
struct StubResolver;

#[async_trait]
impl TrackResolver for StubResolver {
    async fn resolve(&self, query: &str) -> Result<TrackDescriptor, MusicError> {
        if query.trim().is_empty() {
            return Err(MusicError::NotFound("empty query".to_string()));
        }
        Ok(TrackDescriptor {
            title: query.to_string(),
            page_url: Some("https://www.youtube.com/watch?v=jfKfPfyJRdk".to_string()),
            stream_url: "https://cdn.example.com/audio?expire=9999".to_string(),
            thumbnail: Some("https://i.ytimg.com/vi/jfKfPfyJRdk/hq720.jpg".to_string()),
        })
    }
}

#[fixture]
fn entry() -> NowPlayingEntry {
    NowPlayingEntry {
        track: TrackDescriptor {
            title: "lofi hip hop radio".to_string(),
            page_url: Some("https://www.youtube.com/watch?v=jfKfPfyJRdk".to_string()),
            stream_url: "https://cdn.example.com/audio?expire=9999".to_string(),
            thumbnail: None,
        },
        requested_by: "listener".to_string(),
        requester_avatar: "https://cdn.example.com/avatar.png".to_string(),
    }
}

#[rstest]
fn registry_round_trips_per_guild(entry: NowPlayingEntry) {
    let registry = NowPlayingRegistry::new();
    let guild = GuildId::new(1);

    assert_eq!(registry.get(guild), None);

    registry.set(guild, entry.clone());
    assert_eq!(registry.get(guild), Some(entry));

    registry.clear(guild);
    assert_eq!(registry.get(guild), None);
}

#[rstest]
fn registry_guilds_are_independent(entry: NowPlayingEntry) {
    let registry = NowPlayingRegistry::new();
    let guild_a = GuildId::new(1);
    let guild_b = GuildId::new(2);

    let mut entry_b = entry.clone();
    entry_b.requested_by = "someone else".to_string();

    registry.set(guild_a, entry.clone());
    registry.set(guild_b, entry_b.clone());

    assert_eq!(registry.get(guild_a), Some(entry));
    assert_eq!(registry.get(guild_b), Some(entry_b.clone()));

    // Clearing one guild must not touch the other
    registry.clear(guild_a);
    assert_eq!(registry.get(guild_a), None);
    assert_eq!(registry.get(guild_b), Some(entry_b));
}

#[rstest]
fn overwriting_an_entry_replaces_it(entry: NowPlayingEntry) {
    let registry = NowPlayingRegistry::new();
    let guild = GuildId::new(1);

    registry.set(guild, entry.clone());

    let mut next = entry;
    next.track.title = "another song".to_string();
    registry.set(guild, next.clone());

    assert_eq!(registry.get(guild), Some(next));
}

#[tokio::test]
async fn controller_starts_idle() {
    let controller = PlaybackController::new();
    assert_eq!(controller.state(GuildId::new(1)).await, PlaybackState::Idle);
}

#[tokio::test]
async fn pause_and_resume_from_idle_fail_and_never_mutate_state() {
    let controller = PlaybackController::new();
    let guild = GuildId::new(1);

    assert_matches!(controller.pause(guild).await, Err(PlaybackError::NotPlaying));
    assert_eq!(controller.state(guild).await, PlaybackState::Idle);

    assert_matches!(controller.resume(guild).await, Err(PlaybackError::NotPaused));
    assert_eq!(controller.state(guild).await, PlaybackState::Idle);
}

#[tokio::test]
async fn skip_from_idle_fails_with_no_state_change() {
    let controller = PlaybackController::new();
    let guild = GuildId::new(1);

    assert_matches!(controller.skip(guild).await, Err(PlaybackError::NotPlaying));
    assert_eq!(controller.state(guild).await, PlaybackState::Idle);
}

#[tokio::test]
async fn stop_from_idle_is_valid_and_lands_in_idle() {
    let controller = PlaybackController::new();
    let guild = GuildId::new(1);

    controller.stop(guild).await;
    assert_eq!(controller.state(guild).await, PlaybackState::Idle);
}

#[tokio::test]
async fn guild_states_are_isolated() {
    let controller = PlaybackController::new();
    let guild_a = GuildId::new(1);
    let guild_b = GuildId::new(2);

    controller.stop(guild_a).await;
    assert_matches!(
        controller.pause(guild_b).await,
        Err(PlaybackError::NotPlaying)
    );
    assert_eq!(controller.state(guild_a).await, PlaybackState::Idle);
    assert_eq!(controller.state(guild_b).await, PlaybackState::Idle);
}

#[tokio::test]
async fn resolved_query_populates_the_registry_with_matching_title() {
    let resolver = StubResolver;
    let registry = NowPlayingRegistry::new();
    let guild = GuildId::new(1);

    let track = resolver.resolve("lofi hip hop radio").await.unwrap();
    assert!(!track.title.is_empty());
    assert!(!track.stream_url.is_empty());

    registry.set(
        guild,
        NowPlayingEntry {
            track,
            requested_by: "listener".to_string(),
            requester_avatar: "https://cdn.example.com/avatar.png".to_string(),
        },
    );

    let stored = registry.get(guild).unwrap();
    assert_eq!(stored.track.title, "lofi hip hop radio");
}

#[tokio::test]
async fn empty_query_is_not_found_and_leaves_everything_untouched() {
    let resolver = StubResolver;
    let controller = PlaybackController::new();
    let registry = NowPlayingRegistry::new();
    let guild = GuildId::new(1);

    assert_matches!(
        resolver.resolve("").await,
        Err(MusicError::NotFound(_))
    );

    // Resolution failed before the controller was ever involved
    assert_eq!(controller.state(guild).await, PlaybackState::Idle);
    assert_eq!(registry.get(guild), None);
}

#[test]
fn user_facing_error_strings() {
    assert_eq!(
        PlaybackError::NotPlaying.to_string(),
        "No song is currently playing"
    );
    assert_eq!(
        PlaybackError::NotPaused.to_string(),
        "No song is currently paused"
    );
    assert_eq!(
        MusicError::NotInVoice.to_string(),
        "User is not in a voice channel"
    );
    assert_eq!(
        MusicError::NotConnected.to_string(),
        "Not connected to a voice channel"
    );
}
