//! Resolution of user queries into playable track descriptors.
//! A query is either a direct content URL or free text; free text is
//! interpreted as a search against the default provider and only the first
//! result is used.

pub mod track_descriptor;
pub mod ytdlp;

use crate::commands::music::utils::music_manager::MusicError;
use serenity::async_trait;
use track_descriptor::TrackDescriptor;
use url::Url;

/// Trait defining the common interface for track resolution backends.
/// Requires `Send + Sync` to be safely used across async tasks.
#[async_trait]
pub trait TrackResolver: Send + Sync {
    /// Resolve a free-text query or URL into a playable track descriptor.
    ///
    /// A descriptor is only ever constructed after a successful resolve;
    /// failures surface as `NotFound` or `Extraction` errors, never as a
    /// partial descriptor.
    async fn resolve(&self, query: &str) -> Result<TrackDescriptor, MusicError>;
}

/// A utility struct providing general helper functions related to audio sources.
pub struct AudioSource;

impl AudioSource {
    /// Performs a basic check if the input string can be parsed as a URL.
    /// Does not validate if the URL is actually reachable.
    pub fn is_url(input: &str) -> bool {
        Url::parse(input).is_ok()
    }
}
