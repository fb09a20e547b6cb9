//! Chase: run at the player and catch them inside the catch range.

use super::components::{EnemyBrain, PlayerSnapshot};
use crate::core::Locomotion;

impl EnemyBrain {
    /// Advance the chase by one frame. Returns true when the player is caught.
    ///
    /// A dashing player suspends the chase for the frame without resetting it.
    /// The patrol waypoint follows the player so that a lost chase resumes
    /// from the last known position.
    pub fn pursue<L>(&mut self, body: &mut L, player: &PlayerSnapshot, delta_secs: f32) -> bool
    where
        L: Locomotion + ?Sized,
    {
        if player.evasive {
            return false;
        }

        let direction = if player.position.x > body.position().x { 1.0 } else { -1.0 };
        body.move_by(direction * self.config.chase_speed * delta_secs);

        self.idle_target = Some(player.position);

        body.position().distance(player.position) < self.config.catch_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::components::{EnemyConfig, EnemyId};
    use crate::enemies::test_support::*;
    use bevy::prelude::*;

    fn brain() -> EnemyBrain {
        EnemyBrain::new(EnemyId(5), EnemyConfig::default()).unwrap()
    }

    #[test]
    fn test_runs_toward_player() {
        let mut brain = brain();
        let mut body = FakeBody::at(0.0, false);
        let player = PlayerSnapshot::at(Vec2::new(3.0, 0.0));

        let caught = brain.pursue(&mut body, &player, 0.5);

        assert!(!caught);
        assert_eq!(body.moves, vec![0.5]);
        assert!(body.facing_right);
        assert_eq!(brain.idle_target(), Some(Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_catches_inside_range() {
        let mut brain = brain();
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot::at(Vec2::new(-0.9, 0.0));

        assert!(brain.pursue(&mut body, &player, 0.1));
        assert_eq!(body.moves, vec![-0.1]);
    }

    #[test]
    fn test_dash_suspends_chase() {
        let mut brain = brain();
        brain.idle_target = Some(Vec2::new(8.0, 0.0));
        let mut body = FakeBody::at(0.0, true);
        let player = PlayerSnapshot {
            evasive: true,
            ..PlayerSnapshot::at(Vec2::new(0.5, 0.0))
        };

        assert!(!brain.pursue(&mut body, &player, 0.1));
        assert!(body.moves.is_empty());
        assert_eq!(brain.idle_target(), Some(Vec2::new(8.0, 0.0)));
    }

    #[test]
    fn test_catch_checked_after_moving() {
        let mut brain = brain();
        let mut body = FakeBody::at(0.0, true);
        body.speed = 5.0;
        let player = PlayerSnapshot::at(Vec2::new(1.3, 0.0));

        // One chase step of 0.1 * 5 closes the gap to 0.8
        assert!(brain.pursue(&mut body, &player, 0.1));
    }
}
