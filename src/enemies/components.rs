//! Enemy-related components.

use bevy::prelude::*;

use super::error::SpawnError;
use super::probe::LayerMask;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches RON file name).
#[derive(Component, Clone)]
pub struct EnemyType(pub String);

/// Stable identity handed to the chase tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u64);

/// Behavior state of a guard.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum EnemyState {
    /// Patrolling its floor, waiting between waypoints.
    #[default]
    Idling,
    /// Running at the player.
    Chasing,
}

/// Per-guard tunables, fixed once the guard is spawned.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyConfig {
    /// How far the guard can see.
    pub detection_range: f32,
    /// Distance at which the guard catches the player. Also the arrival
    /// radius for patrol waypoints.
    pub catch_range: f32,
    /// Seconds spent standing at a waypoint before picking the next one.
    pub waiting_time: f32,
    /// Movement command magnitude while patrolling.
    pub idle_speed: f32,
    /// Movement command magnitude while chasing.
    pub chase_speed: f32,
    /// How far left/right to look for the ends of the walkable strip.
    pub boundary_probe_distance: f32,
    /// Half-width of the patrol strip when a boundary probe finds nothing.
    pub fallback_wander_radius: f32,
    /// Layers that can block or answer the line-of-sight ray.
    pub detection_mask: LayerMask,
    /// Layers that bound the patrol strip.
    pub boundary_mask: LayerMask,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            detection_range: 5.0,
            catch_range: 1.0,
            waiting_time: 3.0,
            idle_speed: 0.5,
            chase_speed: 1.0,
            boundary_probe_distance: 100.0,
            fallback_wander_radius: 3.0,
            detection_mask: LayerMask::WALLS
                .union(LayerMask::PLAYER)
                .union(LayerMask::ENEMIES),
            boundary_mask: LayerMask::WALLS,
        }
    }
}

impl EnemyConfig {
    /// Reject configurations that would make the state machine meaningless.
    pub fn validate(&self) -> Result<(), SpawnError> {
        let positive = [
            ("detection_range", self.detection_range),
            ("boundary_probe_distance", self.boundary_probe_distance),
        ];
        let non_negative = [
            ("catch_range", self.catch_range),
            ("waiting_time", self.waiting_time),
            ("idle_speed", self.idle_speed),
            ("chase_speed", self.chase_speed),
            ("fallback_wander_radius", self.fallback_wander_radius),
        ];

        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpawnError::InvalidConfig { field, value });
            }
        }
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SpawnError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

/// Behavior state of one guard: the state machine plus its patrol memory.
#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    pub(super) id: EnemyId,
    pub(super) config: EnemyConfig,
    pub(super) state: EnemyState,
    /// Current patrol waypoint; `None` forces a new pick.
    pub(super) idle_target: Option<Vec2>,
    pub(super) idle_timer: f32,
}

impl EnemyBrain {
    /// Build a brain for a freshly spawned guard.
    ///
    /// The idle timer starts at the waiting time so the first tick picks a
    /// waypoint straight away.
    pub fn new(id: EnemyId, config: EnemyConfig) -> Result<Self, SpawnError> {
        config.validate()?;
        Ok(Self {
            id,
            idle_timer: config.waiting_time,
            config,
            state: EnemyState::Idling,
            idle_target: None,
        })
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn idle_target(&self) -> Option<Vec2> {
        self.idle_target
    }

    pub fn idle_timer(&self) -> f32 {
        self.idle_timer
    }
}

/// What an enemy can know about the player in one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub facing_right: bool,
    /// Hidden in a hideable object
    pub concealed: bool,
    /// Whistling; nearby guards turn toward the sound
    pub signaling: bool,
    /// Dashing; guards cannot catch the player
    pub evasive: bool,
}

impl PlayerSnapshot {
    /// A visible, idle player at `position`.
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            facing_right: true,
            concealed: false,
            signaling: false,
            evasive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brain_starts_idle_and_ready_to_pick() {
        let brain = EnemyBrain::new(EnemyId(7), EnemyConfig::default()).unwrap();
        assert_eq!(brain.state(), EnemyState::Idling);
        assert_eq!(brain.idle_target(), None);
        assert!(brain.idle_timer() >= brain.config().waiting_time);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EnemyConfig {
            detection_range: 0.0,
            ..default()
        };
        assert_eq!(
            EnemyBrain::new(EnemyId(1), config).unwrap_err(),
            SpawnError::InvalidConfig {
                field: "detection_range",
                value: 0.0
            }
        );

        let config = EnemyConfig {
            waiting_time: f32::NAN,
            ..default()
        };
        assert!(config.validate().is_err());
    }
}
