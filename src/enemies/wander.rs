//! Idle patrol: wait at a waypoint, pick a new one on the walkable strip, walk to it.

use bevy::prelude::*;
use rand::Rng;

use super::components::{EnemyBrain, EnemyConfig};
use super::probe::RaycastProbe;
use crate::core::{lerp, Locomotion};

/// Gap kept between a patrol waypoint and the wall that bounds the strip.
const WALL_MARGIN: f32 = 1.0;

impl EnemyBrain {
    /// Advance the patrol by one frame.
    ///
    /// While the guard stands at its waypoint (or has none) it waits out
    /// `waiting_time`, then commits a new waypoint and starts walking.
    pub fn wander<L, P, R>(&mut self, body: &mut L, probe: &P, rng: &mut R, delta_secs: f32)
    where
        L: Locomotion + ?Sized,
        P: RaycastProbe + ?Sized,
        R: Rng,
    {
        let position = body.position();
        let arrived = match self.idle_target {
            None => true,
            Some(target) => position.distance(target) < self.config.catch_range,
        };

        if arrived {
            if self.idle_timer >= self.config.waiting_time {
                self.idle_timer = 0.0;
                let fraction = rng.gen_range(0.0..=1.0);
                self.idle_target = Some(pick_idle_target(position, probe, &self.config, fraction));
            } else {
                self.idle_timer += delta_secs;
                body.move_by(0.0);
                return;
            }
        }

        let Some(target) = self.idle_target else {
            return;
        };
        let direction = if target.x > position.x { 1.0 } else { -1.0 };
        body.move_by(direction * self.config.idle_speed * delta_secs);
    }
}

/// Choose a waypoint on the strip between the nearest walls left and right.
///
/// Each side probes up to `boundary_probe_distance`. A side that finds no
/// wall falls back to `fallback_wander_radius` around the guard. A strip
/// narrower than the wall margins collapses onto the guard's position.
pub fn pick_idle_target<P>(origin: Vec2, probe: &P, config: &EnemyConfig, fraction: f32) -> Vec2
where
    P: RaycastProbe + ?Sized,
{
    let reach = config.boundary_probe_distance;
    let mask = config.boundary_mask;

    let left = probe
        .cast(origin, Vec2::NEG_X, reach, mask)
        .map(|hit| hit.point.x + WALL_MARGIN)
        .unwrap_or(origin.x - config.fallback_wander_radius);
    let right = probe
        .cast(origin, Vec2::X, reach, mask)
        .map(|hit| hit.point.x - WALL_MARGIN)
        .unwrap_or(origin.x + config.fallback_wander_radius);

    if left > right {
        return origin;
    }

    Vec2::new(lerp(left, right, fraction), origin.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::components::EnemyId;
    use crate::enemies::probe::{HitTag, LayerMask, RayHit};
    use crate::enemies::test_support::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn brain() -> EnemyBrain {
        EnemyBrain::new(EnemyId(3), EnemyConfig::default()).unwrap()
    }

    #[test]
    fn test_midpoint_of_corridor() {
        let config = EnemyConfig::default();
        let target = pick_idle_target(Vec2::new(4.0, 2.0), &corridor(0.0, 10.0), &config, 0.5);
        assert_eq!(target, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn test_corridor_ends_respect_wall_margin() {
        let config = EnemyConfig::default();
        let probe = corridor(0.0, 10.0);
        assert_eq!(pick_idle_target(Vec2::new(4.0, 0.0), &probe, &config, 0.0).x, 1.0);
        assert_eq!(pick_idle_target(Vec2::new(4.0, 0.0), &probe, &config, 1.0).x, 9.0);
    }

    #[test]
    fn test_missing_walls_fall_back_to_radius() {
        let config = EnemyConfig {
            fallback_wander_radius: 2.0,
            ..default()
        };
        let origin = Vec2::new(10.0, 0.0);
        assert_eq!(pick_idle_target(origin, &never_hits, &config, 0.0).x, 8.0);
        assert_eq!(pick_idle_target(origin, &never_hits, &config, 1.0).x, 12.0);
    }

    #[test]
    fn test_one_sided_miss() {
        let config = EnemyConfig {
            fallback_wander_radius: 2.0,
            ..default()
        };
        let probe = |_: Vec2, direction: Vec2, _: f32, _: LayerMask| {
            (direction.x < 0.0).then(|| RayHit::new(Vec2::new(5.0, 0.0), HitTag::Obstacle))
        };
        let origin = Vec2::new(7.0, 0.0);
        assert_eq!(pick_idle_target(origin, &probe, &config, 0.0).x, 6.0);
        assert_eq!(pick_idle_target(origin, &probe, &config, 1.0).x, 9.0);
    }

    #[test]
    fn test_narrow_strip_collapses_to_origin() {
        let config = EnemyConfig::default();
        let origin = Vec2::new(1.0, 0.0);
        assert_eq!(pick_idle_target(origin, &corridor(0.5, 1.5), &config, 0.7), origin);
    }

    #[test]
    fn test_first_tick_picks_target_and_walks() {
        let mut brain = brain();
        let mut body = FakeBody::at(4.0, true);
        let mut rng = StdRng::seed_from_u64(11);

        brain.wander(&mut body, &corridor(0.0, 10.0), &mut rng, 0.1);

        let target = brain.idle_target().unwrap();
        assert!((1.0..=9.0).contains(&target.x));
        assert_eq!(brain.idle_timer(), 0.0);
        assert_eq!(body.moves.len(), 1);
        let expected = if target.x > 4.0 { 0.05 } else { -0.05 };
        assert!((body.moves[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_waiting_at_waypoint_only_accumulates_timer() {
        let mut brain = brain();
        brain.idle_target = Some(Vec2::new(4.5, 0.0));
        brain.idle_timer = 0.0;
        let mut body = FakeBody::at(4.0, true);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            brain.wander(&mut body, &corridor(0.0, 10.0), &mut rng, 0.1);
        }

        assert_eq!(brain.idle_target(), Some(Vec2::new(4.5, 0.0)));
        assert!((brain.idle_timer() - 1.0).abs() < 1e-5);
        assert!(body.moves.iter().all(|m| *m == 0.0));
    }

    #[test]
    fn test_walks_toward_distant_waypoint_without_waiting() {
        let mut brain = brain();
        brain.idle_target = Some(Vec2::new(0.0, 0.0));
        brain.idle_timer = 0.0;
        let mut body = FakeBody::at(6.0, true);
        let mut rng = StdRng::seed_from_u64(1);

        brain.wander(&mut body, &corridor(-10.0, 10.0), &mut rng, 0.2);

        assert_eq!(body.moves, vec![-0.1]);
        assert!(!body.facing_right);
        assert_eq!(brain.idle_target(), Some(Vec2::ZERO));
    }
}
