//! Two-phase track resolution through the `yt-dlp` command-line tool.

use serenity::async_trait;
use tokio::process::Command;
use tracing::info;

use super::track_descriptor::{SearchHit, TrackDescriptor};
use super::{AudioSource, TrackResolver};
use crate::commands::music::utils::music_manager::MusicError;

/// Resolver backed by the `yt-dlp` binary.
pub struct YtDlp;

#[async_trait]
impl TrackResolver for YtDlp {
    async fn resolve(&self, query: &str) -> Result<TrackDescriptor, MusicError> {
        if query.trim().is_empty() {
            return Err(MusicError::NotFound("empty query".to_string()));
        }

        let hit = Self::search(query).await?;
        Self::extract(hit).await
    }
}

impl YtDlp {
    /// Phase 1: flat search for display metadata and a canonical locator.
    /// Free text goes through the `ytsearch:` prefix; only the first
    /// result is used.
    async fn search(query: &str) -> Result<SearchHit, MusicError> {
        let target = if AudioSource::is_url(query) {
            query.to_string()
        } else {
            format!("ytsearch:{query}")
        };

        info!("Searching for track: {}", target);

        let output = Command::new("yt-dlp")
            .args(["-j", "--no-playlist", "--flat-playlist", &target])
            .output()
            .await
            .map_err(|e| MusicError::Extraction(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            return Err(MusicError::NotFound(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        SearchHit::from_flat_json(&String::from_utf8_lossy(&output.stdout))
    }

    /// Phase 2: re-query the canonical URL with full extraction to obtain
    /// the time-limited audio stream URL.
    async fn extract(hit: SearchHit) -> Result<TrackDescriptor, MusicError> {
        info!("Extracting audio stream for: {}", hit.target_url);

        let output = Command::new("yt-dlp")
            .args(["-j", "--no-playlist", "-f", "bestaudio/best", &hit.target_url])
            .output()
            .await
            .map_err(|e| MusicError::Extraction(format!("Failed to run yt-dlp: {e}")))?;

        if !output.status.success() {
            return Err(MusicError::Extraction(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        hit.into_descriptor(&String::from_utf8_lossy(&output.stdout))
    }
}
