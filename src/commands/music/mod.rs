pub mod help;
pub mod now_playing;
pub mod pause;
pub mod play;
pub mod resume;
pub mod skip;
pub mod stop;

pub mod audio_sources;
pub mod utils;

use crate::{CommandResult, Context};
