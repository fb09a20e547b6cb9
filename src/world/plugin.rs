//! World plugin - level loading, camera, and interactables.

use bevy::prelude::*;

use crate::core::{GameState, GameplaySet};
use crate::enemies::EnemyRegistry;
use crate::player::{spawn_player, Player, PlayerConfig, PlayerStatus};

use super::builder::{build_level_from_data, LevelEntity};
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};
use super::door::operate_doors;
use super::elevator::{call_elevators, ride_elevators, sync_landing_doors};
use super::hideable::track_hideables;
use super::hotspot::pulse_hotspot_rings;
use super::level::Level;
use super::zones::update_trigger_zones;

/// World units across one screen pixel.
const CAMERA_SCALE: f32 = 1.0 / 48.0;
/// How quickly the camera catches up with the player.
const CAMERA_FOLLOW_RATE: f32 = 6.0;

/// Marker for the gameplay camera.
#[derive(Component)]
pub struct GameCamera;

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<CurrentLevel>()
            .init_resource::<Level>()
            .add_systems(OnEnter(GameState::Loading), load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level)
            .add_systems(
                Update,
                (update_trigger_zones, track_hideables, track_player_floor)
                    .chain()
                    .in_set(GameplaySet::Zones),
            )
            .add_systems(
                Update,
                (operate_doors, call_elevators, ride_elevators, sync_landing_doors)
                    .chain()
                    .in_set(GameplaySet::Devices),
            )
            .add_systems(Update, pulse_hotspot_rings.in_set(GameplaySet::Presentation))
            .add_systems(Update, follow_player.run_if(in_state(GameState::InGame)));
    }
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    enemy_registry: Res<EnemyRegistry>,
    player_config: Res<PlayerConfig>,
) {
    let level = match level_registry.require(&current_level.name) {
        Ok(level) => level,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    info!("Building level: {}", level.name);

    let player_start = build_level_from_data(
        &mut commands,
        &mut meshes,
        &mut materials,
        level,
        &enemy_registry,
    );

    spawn_player(&mut commands, player_start, &player_config, level.data_to_download);

    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation(player_start.extend(10.0)),
        GameCamera,
        LevelEntity,
    ));
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, With<LevelEntity>>,
    player_query: Query<Entity, With<Player>>,
) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in player_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Keep the player's floor index current.
fn track_player_floor(level: Res<Level>, mut player_query: Query<(&Transform, &mut PlayerStatus), With<Player>>) {
    let Ok((transform, mut status)) = player_query.get_single_mut() else {
        return;
    };
    let floor = level.floor_of(transform.translation.truncate());
    if status.floor != floor {
        status.floor = floor;
        debug!("Player on floor {}", floor);
    }
}

/// Ease the camera toward the player.
fn follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<GameCamera>)>,
    mut camera_query: Query<&mut Transform, With<GameCamera>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    let target = player.translation.truncate();
    let current = camera.translation.truncate();
    let t = (CAMERA_FOLLOW_RATE * time.delta_secs()).min(1.0);
    let next = current.lerp(target, t);
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
