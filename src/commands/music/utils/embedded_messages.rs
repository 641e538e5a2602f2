use poise::{CreateReply, serenity_prelude as serenity};
use serenity::all::{CreateEmbed, CreateEmbedFooter};

use crate::commands::music::utils::now_playing::NowPlayingEntry;

const EMBED_COLOR: u32 = 0x1DB954;

/// Create the "Now Playing" embed: linked title, optional thumbnail,
/// requester name and avatar as footer.
pub fn now_playing(entry: &NowPlayingEntry) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("Now Playing")
        .description(format!(
            "[{}]({})",
            entry.track.title,
            entry.track.page_url.as_deref().unwrap_or("#")
        ))
        .footer(
            CreateEmbedFooter::new(format!("Requested by {}", entry.requested_by))
                .icon_url(&entry.requester_avatar),
        )
        .color(EMBED_COLOR);

    if let Some(thumbnail) = &entry.track.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }

    embed
}

/// Create the help embed listing all music commands
pub fn help() -> CreateEmbed {
    CreateEmbed::new()
        .title("Music Bot Help")
        .field(
            "?music-play [title or link]",
            "Play a song by title or link.",
            false,
        )
        .field("?music-skip", "Skip the current song.", false)
        .field("?music-pause", "Pause the current song.", false)
        .field("?music-resume", "Resume playback.", false)
        .field("?music-stop", "Stop playback and disconnect.", false)
        .field(
            "?music-nowplaying",
            "Show info about the currently playing song.",
            false,
        )
        .footer(CreateEmbedFooter::new("Use ?music-play to get started!"))
        .color(EMBED_COLOR)
}

/// Plain-text reply used for error and confirmation messages
pub fn plain(text: impl Into<String>) -> CreateReply {
    CreateReply::default().content(text.into())
}
