pub mod embedded_messages;
pub mod music_manager;
pub mod now_playing;
pub mod playback;
