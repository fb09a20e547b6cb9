//! Player plugin - input, dash, download, and player visuals.

use bevy::prelude::*;

use super::components::load_player_config;
use super::dash::{fade_dash_ghosts, spawn_dash_ghosts};
use super::download::{download_data, handle_connect_input};
use super::movement::{player_input, show_concealment};
use crate::core::GameplaySet;

/// Player plugin - handles player input, dashing, and downloading.
///
/// The player entity itself is spawned by the world plugin when a level is built.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_player_config)
            .add_systems(
                Update,
                (player_input, spawn_dash_ghosts, handle_connect_input)
                    .chain()
                    .in_set(GameplaySet::Input),
            )
            .add_systems(Update, download_data.in_set(GameplaySet::Devices))
            .add_systems(
                Update,
                (fade_dash_ghosts, show_concealment).in_set(GameplaySet::Presentation),
            );
    }
}
