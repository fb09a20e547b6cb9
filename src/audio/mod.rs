//! Audio module - chase music switching and one-shot sound cues.

mod chase_music;
mod plugin;

pub use chase_music::*;
pub use plugin::{AudioCuesPlugin, EffectsChannel, LiftChannel, MusicChannel};
