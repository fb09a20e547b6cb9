//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use crate::core::{GameState, GameplaySet};

/// Enemy plugin - handles enemy definitions, AI and alert tints.
///
/// Guards themselves are spawned by the world builder from level data.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            .add_systems(Update, ai::enemy_behavior.in_set(GameplaySet::Enemies))
            .add_systems(Update, ai::tint_alerted_enemies.in_set(GameplaySet::Presentation))
            .add_systems(OnExit(GameState::InGame), ai::retire_enemies);
    }
}
