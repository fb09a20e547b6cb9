//! Level construction from data definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::{DoorDef, ElevatorDef, HideableDef, HotspotDef, LevelDefinition, WallDef};
use super::door::Door;
use super::elevator::{Elevator, LandingDoor, ShaftCall};
use super::hideable::Hideable;
use super::hotspot::{Hotspot, PulseRing};
use super::level::Level;
use super::probe::collision_groups;
use super::zones::TriggerZone;
use crate::core::TimedProgress;
use crate::enemies::{spawn_enemy, EnemyId, EnemyRegistry, LayerMask};

/// Marker for everything spawned for the current level, cleaned up on exit.
#[derive(Component)]
pub struct LevelEntity;

/// Rings drawn around each hotspot, staggered in phase.
const PULSE_RINGS: usize = 3;
/// Phase offset between consecutive rings.
const PULSE_RING_OFFSET: f32 = 0.3;
const SLAB_THICKNESS: f32 = 0.2;

const WALL_COLOR: Color = Color::srgb(0.22, 0.22, 0.26);
const SLAB_COLOR: Color = Color::srgb(0.16, 0.16, 0.19);
const HIDEABLE_COLOR: Color = Color::srgb(0.35, 0.25, 0.15);
const DOOR_COLOR: Color = Color::srgb(0.45, 0.32, 0.2);
const CABIN_COLOR: Color = Color::srgb(0.5, 0.5, 0.55);
const LANDING_DOOR_COLOR: Color = Color::srgb(0.3, 0.3, 0.34);
const HOTSPOT_COLOR: Color = Color::srgb(0.8, 0.8, 0.9);

/// Build a level from a level definition. Returns the player start position.
pub fn build_level_from_data(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
) -> Vec2 {
    let layout = Level::new(level.floor_height);
    commands.insert_resource(layout);

    spawn_floor_slabs(commands, level, &layout);

    for wall in &level.walls {
        spawn_wall(commands, wall);
    }
    for hideable in &level.hideables {
        spawn_hideable(commands, hideable);
    }
    for door in &level.doors {
        spawn_door(commands, door);
    }
    for hotspot in &level.hotspots {
        spawn_hotspot(commands, meshes, materials, hotspot, &layout);
    }
    for elevator in &level.elevators {
        spawn_elevator(commands, elevator, &layout);
    }

    // Guards are numbered in spawn order; a bad entry is logged and skipped
    for (index, spawn) in level.enemies.iter().enumerate() {
        if let Err(e) = spawn_enemy(commands, enemy_registry, spawn, EnemyId(index as u64)) {
            error!("Skipping enemy #{} ({}): {}", index, spawn.kind, e);
        }
    }

    Vec2::new(level.player_start.0, level.player_start.1)
}

/// Solid slab whose top surface sits at `floor_y`.
///
/// Slabs live on the wall layer so sight rays between storeys are blocked.
pub(super) fn floor_slab(center_x: f32, floor_y: f32, width: f32) -> impl Bundle {
    (
        Sprite::from_color(SLAB_COLOR, Vec2::new(width, SLAB_THICKNESS)),
        Transform::from_xyz(center_x, floor_y - SLAB_THICKNESS / 2.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(width / 2.0, SLAB_THICKNESS / 2.0),
        collision_groups(LayerMask::WALLS),
        LevelEntity,
    )
}

fn spawn_floor_slabs(commands: &mut Commands, level: &LevelDefinition, layout: &Level) {
    let (left, right) = level.extent;
    let width = right - left;
    let center_x = (left + right) / 2.0;

    for floor in 0..level.floors {
        commands.spawn(floor_slab(center_x, layout.floor_y(floor), width));
    }
}

fn spawn_wall(commands: &mut Commands, wall: &WallDef) {
    let size = Vec2::new(wall.size.0, wall.size.1);
    commands.spawn((
        Sprite::from_color(WALL_COLOR, size),
        Transform::from_xyz(wall.position.0, wall.position.1, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        collision_groups(LayerMask::WALLS),
        LevelEntity,
    ));
}

fn spawn_hideable(commands: &mut Commands, hideable: &HideableDef) {
    let size = Vec2::new(hideable.size.0, hideable.size.1);
    commands.spawn((
        Hideable,
        TriggerZone::new(size / 2.0),
        Sprite::from_color(HIDEABLE_COLOR, size),
        Transform::from_xyz(hideable.position.0, hideable.position.1, 0.1),
        LevelEntity,
    ));
}

fn spawn_door(commands: &mut Commands, door: &DoorDef) {
    let size = Vec2::new(door.size.0, door.size.1);
    commands.spawn((
        Door::default(),
        TriggerZone::new(Vec2::new(size.x / 2.0 + door.reach, size.y / 2.0)),
        Sprite::from_color(DOOR_COLOR, size),
        Transform::from_xyz(door.position.0, door.position.1, 0.2),
        Visibility::default(),
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        collision_groups(LayerMask::WALLS),
        LevelEntity,
    ));
}

fn spawn_hotspot(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    definition: &HotspotDef,
    layout: &Level,
) {
    let position = Vec2::new(definition.position.0, definition.position.1);
    let hotspot = Hotspot::new(
        definition.range,
        definition.floor_penalty,
        definition.curve.clone(),
        definition.bandwidth,
        definition.available_data,
        layout.floor_of(position),
    );
    let ring_color = hotspot.bandwidth_color();
    let range = hotspot.range;

    // Unit ring, scaled up to the hotspot's range by the pulse system
    let ring_mesh = meshes.add(Annulus::new(0.95, 1.0));

    commands
        .spawn((
            hotspot,
            Sprite::from_color(HOTSPOT_COLOR, Vec2::splat(0.3)),
            Transform::from_translation(position.extend(0.3)),
            LevelEntity,
        ))
        .with_children(|parent| {
            for ring in 0..PULSE_RINGS {
                parent.spawn((
                    PulseRing {
                        progress: TimedProgress::new(definition.pulse_period)
                            .with_offset(PULSE_RING_OFFSET * ring as f32),
                        max_radius: range,
                    },
                    Mesh2d(ring_mesh.clone()),
                    MeshMaterial2d(materials.add(ColorMaterial::from(ring_color))),
                    Transform::from_scale(Vec3::ZERO),
                ));
            }
        });

    info!("Spawned hotspot at ({}, {})", position.x, position.y);
}

/// Cabin, then one landing door and one call point per floor.
fn spawn_elevator(commands: &mut Commands, definition: &ElevatorDef, layout: &Level) {
    let size = Vec2::new(definition.size.0, definition.size.1);
    let cabin_y = |floor: i32| layout.floor_y(floor) + size.y / 2.0;

    let cabin = commands
        .spawn((
            Elevator::new(
                definition.start_floor,
                definition.min_floor,
                definition.max_floor,
                layout.floor_height,
                definition.travel_time,
            ),
            TriggerZone::new(size / 2.0),
            Sprite::from_color(CABIN_COLOR, size),
            Transform::from_xyz(definition.x, cabin_y(definition.start_floor), 0.05),
            LevelEntity,
        ))
        .id();

    for floor in definition.min_floor..=definition.max_floor {
        commands.spawn((
            LandingDoor {
                elevator: cabin,
                floor,
            },
            Sprite::from_color(LANDING_DOOR_COLOR, size),
            Transform::from_xyz(definition.x, cabin_y(floor), 0.4),
            Visibility::default(),
            RigidBody::Fixed,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            collision_groups(LayerMask::WALLS),
            LevelEntity,
        ));

        commands.spawn((
            ShaftCall { elevator: cabin },
            TriggerZone::new(Vec2::new(size.x / 2.0 + 1.0, size.y / 2.0)),
            Transform::from_xyz(definition.x, cabin_y(floor), 0.0),
            LevelEntity,
        ));
    }
}
