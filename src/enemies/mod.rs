//! Enemies module - guard behavior state machine, data, and spawning.
//!
//! The behavior itself (perception, patrol, chase) is plain Rust over the
//! collaborator traits in `probe`, `crate::core` and `crate::audio`, so it
//! runs and tests without an engine. `ai` wires it into Bevy.

mod ai;
mod components;
mod controller;
pub mod data;
mod error;
mod perception;
mod plugin;
mod probe;
mod pursuit;
mod spawning;
mod wander;

#[cfg(test)]
mod test_support;

pub use components::*;
pub use controller::{EnemyWorld, TickReport};
pub use data::EnemyRegistry;
pub use error::SpawnError;
pub use perception::{perceive, Perception};
pub use plugin::EnemyPlugin;
pub use probe::*;
pub use spawning::{spawn_enemy, EnemyPalette};
pub use wander::pick_idle_target;
