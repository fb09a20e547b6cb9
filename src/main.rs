//! Dead Zone - Entry Point
//!
//! Controls:
//! - A/D or Left/Right: Move
//! - L: Dash
//! - Q: Whistle (hold)
//! - E: Hide / open doors / call elevator
//! - C: Connect to or disconnect from a hotspot
//! - Up/Down: Ride an elevator
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dead Zone".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio backend
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(dead_zone::DeadZonePlugin)

        .run();
}
