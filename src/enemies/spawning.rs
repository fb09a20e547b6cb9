//! Enemy spawning from level data.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyBrain, EnemyId, EnemyType};
use super::data::{EnemyDefinition, EnemyRegistry};
use super::error::SpawnError;
use super::probe::LayerMask;
use crate::core::Agent;
use crate::world::{collision_groups, EnemySpawn, LevelEntity};

/// Sprite tints for calm and alerted guards.
#[derive(Component, Clone, Copy)]
pub struct EnemyPalette {
    pub calm: Color,
    pub alert: Color,
}

impl EnemyPalette {
    fn from_definition(definition: &EnemyDefinition) -> Self {
        let (r, g, b) = definition.color;
        let (ar, ag, ab) = definition.alert_color;
        Self {
            calm: Color::srgb(r, g, b),
            alert: Color::srgb(ar, ag, ab),
        }
    }
}

/// Build the brain for a level spawn without touching the world.
pub fn prepare_enemy<'a>(
    registry: &'a EnemyRegistry,
    spawn: &EnemySpawn,
    id: EnemyId,
) -> Result<(EnemyBrain, &'a EnemyDefinition), SpawnError> {
    let definition = registry
        .get(&spawn.kind)
        .ok_or_else(|| SpawnError::UnknownKind(spawn.kind.clone()))?;
    let brain = EnemyBrain::new(id, definition.to_config())?;
    Ok((brain, definition))
}

/// Spawn one guard. Fails before spawning anything if the data is bad.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    spawn: &EnemySpawn,
    id: EnemyId,
) -> Result<Entity, SpawnError> {
    let (brain, definition) = prepare_enemy(registry, spawn, id)?;
    let (width, height) = definition.size;
    let palette = EnemyPalette::from_definition(definition);
    let position = Vec2::new(spawn.position.0, spawn.position.1);

    let entity = commands
        .spawn((
            Enemy,
            EnemyType(spawn.kind.clone()),
            brain,
            palette,
            Agent {
                facing_right: spawn.facing_right,
                ..Agent::new(definition.move_speed)
            },
            Sprite::from_color(palette.calm, Vec2::new(width, height)),
            Transform::from_translation(position.extend(1.0)),
            LevelEntity,
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::cuboid(width / 2.0, height / 2.0),
            collision_groups(LayerMask::ENEMIES),
            KinematicCharacterController {
                filter_groups: Some(CollisionGroups::new(Group::ALL, Group::GROUP_1)),
                ..default()
            },
        ))
        .id();

    info!("Spawned {} at ({}, {})", definition.name, position.x, position.y);
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyState;

    fn guard(detection_range: f32) -> EnemyDefinition {
        EnemyDefinition {
            name: "Guard".to_string(),
            move_speed: 5.0,
            detection_range,
            catch_range: 1.0,
            waiting_time: 3.0,
            idle_speed: 0.5,
            chase_speed: 1.0,
            fallback_wander_radius: 3.0,
            size: (0.6, 1.6),
            color: (0.3, 0.3, 0.6),
            alert_color: (0.9, 0.2, 0.2),
        }
    }

    fn spawn(kind: &str) -> EnemySpawn {
        EnemySpawn {
            kind: kind.to_string(),
            position: (2.0, 0.8),
            facing_right: true,
        }
    }

    #[test]
    fn test_prepare_known_enemy() {
        let mut registry = EnemyRegistry::default();
        registry.definitions.insert("guard".to_string(), guard(5.0));

        let (brain, definition) = prepare_enemy(&registry, &spawn("guard"), EnemyId(0)).unwrap();
        assert_eq!(brain.state(), EnemyState::Idling);
        assert_eq!(definition.name, "Guard");
    }

    #[test]
    fn test_unknown_kind_fails_fast() {
        let registry = EnemyRegistry::default();
        let err = prepare_enemy(&registry, &spawn("ghost"), EnemyId(0)).unwrap_err();
        assert_eq!(err, SpawnError::UnknownKind("ghost".to_string()));
    }

    #[test]
    fn test_bad_definition_fails_fast() {
        let mut registry = EnemyRegistry::default();
        registry.definitions.insert("guard".to_string(), guard(-1.0));

        let err = prepare_enemy(&registry, &spawn("guard"), EnemyId(0)).unwrap_err();
        assert!(matches!(err, SpawnError::InvalidConfig { field: "detection_range", .. }));
    }
}
