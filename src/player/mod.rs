//! Player module - player entity, input, dash, and the download goal.

mod components;
mod dash;
mod download;
mod movement;
mod plugin;

pub use components::*;
pub use dash::{Dash, DashGhost, DashOutcome};
pub use download::pull_data;
pub use movement::{movement_command, spawn_player};
pub use plugin::PlayerPlugin;
