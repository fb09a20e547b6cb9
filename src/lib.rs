//! Dead Zone - a side-on stealth prototype in Bevy.
//!
//! Sneak through an office block, download data from wifi hotspots, and
//! stay out of the guards' sight.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, session outcome, shared locomotion
//! - **Enemies**: Guard perception, patrol, and chase state machine
//! - **Player**: Input, dash, hiding, hotspot download
//! - **World**: Levels, floors, zones, doors, elevators, hotspots
//! - **Audio**: Background/chase music and sound cues
//! - **UI**: Menus, end screens, HUD

pub mod audio;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct DeadZonePlugin;

impl Plugin for DeadZonePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Music and sound cues
            .add_plugins(audio::AudioCuesPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
