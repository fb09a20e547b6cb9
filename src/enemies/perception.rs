//! Line-of-sight detection of the player.

use super::components::{EnemyBrain, EnemyState, PlayerSnapshot};
use super::probe::{HitTag, RaycastProbe};
use crate::core::Locomotion;

/// Result of one perception pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perception {
    pub state: EnemyState,
    /// Another guard stands in the line of sight; drop the patrol waypoint.
    pub clear_idle_target: bool,
}

impl Perception {
    fn idle() -> Self {
        Self {
            state: EnemyState::Idling,
            clear_idle_target: false,
        }
    }
}

/// Decide whether the guard sees the player this tick.
///
/// A whistling player turns the guard toward them before anything else is
/// checked. After that the gates short-circuit in order: concealment,
/// distance, facing, then the sight ray. The player is detectable at exactly
/// `detection_range`.
pub fn perceive<L, P>(
    brain: &EnemyBrain,
    body: &mut L,
    player: &PlayerSnapshot,
    probe: &P,
) -> Perception
where
    L: Locomotion + ?Sized,
    P: RaycastProbe + ?Sized,
{
    let position = body.position();
    let player_on_right = player.position.x > position.x;

    if player.signaling && body.facing_right() != player_on_right {
        body.face(player_on_right);
    }

    if player.concealed {
        return Perception::idle();
    }

    let range = brain.config.detection_range;
    if position.distance(player.position) > range {
        return Perception::idle();
    }

    if body.facing_right() != player_on_right {
        return Perception::idle();
    }

    let look_direction = player.position - position;
    match probe.cast(position, look_direction, range, brain.config.detection_mask) {
        Some(hit) if hit.tag == HitTag::Player => Perception {
            state: EnemyState::Chasing,
            clear_idle_target: false,
        },
        Some(hit) if hit.tag == HitTag::Enemy => Perception {
            state: EnemyState::Idling,
            clear_idle_target: true,
        },
        _ => Perception::idle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::components::{EnemyConfig, EnemyId};
    use crate::enemies::probe::{LayerMask, RayHit};
    use crate::enemies::test_support::*;
    use bevy::prelude::*;

    fn brain(detection_range: f32) -> EnemyBrain {
        let config = EnemyConfig {
            detection_range,
            catch_range: 1.0,
            ..default()
        };
        EnemyBrain::new(EnemyId(1), config).unwrap()
    }

    #[test]
    fn test_sees_player_just_inside_range() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot::at(Vec2::new(4.9, 0.0));

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Player));
        assert_eq!(result.state, EnemyState::Chasing);
        assert!(!result.clear_idle_target);
    }

    #[test]
    fn test_misses_player_just_outside_range() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot::at(Vec2::new(5.1, 0.0));

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Player));
        assert_eq!(result.state, EnemyState::Idling);
    }

    #[test]
    fn test_range_boundary_is_detectable() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot::at(Vec2::new(5.0, 0.0));

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Player));
        assert_eq!(result.state, EnemyState::Chasing);
    }

    #[test]
    fn test_concealed_player_never_seen() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot {
            concealed: true,
            ..PlayerSnapshot::at(Vec2::new(1.0, 0.0))
        };

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Player));
        assert_eq!(result.state, EnemyState::Idling);
    }

    #[test]
    fn test_facing_away_blocks_detection() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, false);
        let player = PlayerSnapshot::at(Vec2::new(2.0, 0.0));

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Player));
        assert_eq!(result.state, EnemyState::Idling);
        assert!(!body.facing_right);
    }

    #[test]
    fn test_whistle_turns_guard_before_other_gates() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, false);
        let player = PlayerSnapshot {
            signaling: true,
            concealed: true,
            ..PlayerSnapshot::at(Vec2::new(20.0, 0.0))
        };

        let result = perceive(&brain, &mut body, &player, &never_hits);
        assert!(body.facing_right);
        assert_eq!(result.state, EnemyState::Idling);
        assert!(body.moves.is_empty());
    }

    #[test]
    fn test_whistle_then_sight() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, false);
        let player = PlayerSnapshot {
            signaling: true,
            ..PlayerSnapshot::at(Vec2::new(3.0, 0.0))
        };

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Player));
        assert_eq!(result.state, EnemyState::Chasing);
    }

    #[test]
    fn test_wall_blocks_sight() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot::at(Vec2::new(3.0, 0.0));

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Obstacle));
        assert_eq!(result.state, EnemyState::Idling);

        let result = perceive(&brain, &mut body, &player, &never_hits);
        assert_eq!(result.state, EnemyState::Idling);
    }

    #[test]
    fn test_other_guard_in_the_way_clears_waypoint() {
        let brain = brain(5.0);
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot::at(Vec2::new(3.0, 0.0));

        let result = perceive(&brain, &mut body, &player, &always_hits(HitTag::Enemy));
        assert_eq!(result.state, EnemyState::Idling);
        assert!(result.clear_idle_target);
    }

    #[test]
    fn test_sight_ray_limited_to_detection_range() {
        let brain = brain(4.0);
        let mut body = FakeBody::at(1.0, true);
        let player = PlayerSnapshot::at(Vec2::new(3.0, 0.0));
        let probe = |origin: Vec2, direction: Vec2, max: f32, mask: LayerMask| {
            assert_eq!(origin, Vec2::new(1.0, 0.0));
            assert!(direction.x > 0.0);
            assert_eq!(max, 4.0);
            assert!(mask.contains(LayerMask::PLAYER));
            Some(RayHit::new(Vec2::new(3.0, 0.0), HitTag::Player))
        };

        let result = perceive(&brain, &mut body, &player, &probe);
        assert_eq!(result.state, EnemyState::Chasing);
    }
}
