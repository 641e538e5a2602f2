//! Defines the `TrackDescriptor` struct, the unified representation of one
//! resolved playable item, and the parsing of `yt-dlp` JSON output.

use serde_json::Value;

use crate::commands::music::utils::music_manager::MusicError;

/// One resolved playable item. Immutable once created; discarded when a
/// new track begins.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDescriptor {
    /// Display title of the track.
    pub title: String,
    /// Canonical human-navigable link to the source content.
    pub page_url: Option<String>,
    /// Time-limited direct audio locator. Used only to start playback and
    /// never persisted beyond the current playback session.
    pub stream_url: String,
    /// Thumbnail image link, if the source provides one.
    pub thumbnail: Option<String>,
}

/// Display metadata from the flat search phase, plus the locator the full
/// extraction phase re-queries. A flat search result frequently lacks a
/// direct audio locator, hence the second phase.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    /// Locator handed to the extraction phase.
    pub target_url: String,
    pub page_url: String,
    pub thumbnail: Option<String>,
}

impl SearchHit {
    /// Parse the JSON printed by `yt-dlp -j --flat-playlist`.
    pub fn from_flat_json(raw: &str) -> Result<Self, MusicError> {
        let mut info: Value = serde_json::from_str(raw.trim()).map_err(|e| {
            MusicError::Extraction(format!("Failed to parse search metadata: {e}"))
        })?;

        // Search backends wrap results in an `entries` array; unwrap to the
        // first hit.
        if let Some(first) = info.get_mut("entries").and_then(|e| e.get_mut(0)) {
            info = first.take();
        }

        let target_url = info["url"]
            .as_str()
            .or_else(|| info["webpage_url"].as_str())
            .map(str::to_string)
            .ok_or_else(|| MusicError::NotFound("search result has no URL".to_string()))?;

        let title = info["title"]
            .as_str()
            .unwrap_or("Unknown Title")
            .to_string();

        // Fall back to the locator when the backend gives no canonical page.
        let page_url = info["webpage_url"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| target_url.clone());

        let thumbnail = info["thumbnail"].as_str().map(str::to_string);

        Ok(Self {
            title,
            target_url,
            page_url,
            thumbnail,
        })
    }

    /// Combine this hit with the full-extraction JSON into a descriptor.
    /// Fails if the extraction output carries no direct audio locator.
    pub fn into_descriptor(self, raw: &str) -> Result<TrackDescriptor, MusicError> {
        let info: Value = serde_json::from_str(raw.trim()).map_err(|e| {
            MusicError::Extraction(format!("Failed to parse audio metadata: {e}"))
        })?;

        let stream_url = info["url"]
            .as_str()
            .ok_or_else(|| {
                MusicError::Extraction("no audio stream URL in extraction output".to_string())
            })?
            .to_string();

        Ok(TrackDescriptor {
            title: self.title,
            page_url: Some(self.page_url),
            stream_url,
            thumbnail: self.thumbnail,
        })
    }
}
