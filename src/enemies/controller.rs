//! Per-tick state machine driving perception, patrol and chase.

use bevy::prelude::*;
use rand::Rng;

use super::components::{EnemyBrain, EnemyState, PlayerSnapshot};
use super::perception::perceive;
use super::probe::RaycastProbe;
use crate::audio::ChaseAudioTracker;
use crate::core::{GameOverSignal, Locomotion};

/// Shared collaborators an enemy needs for one tick.
pub struct EnemyWorld<'a> {
    pub probe: &'a dyn RaycastProbe,
    pub chase_audio: &'a mut dyn ChaseAudioTracker,
    pub game: &'a mut dyn GameOverSignal,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub state: EnemyState,
    /// The state differs from the previous tick.
    pub changed: bool,
    /// This tick caught the player.
    pub caught: bool,
}

impl EnemyBrain {
    /// Run one frame of behavior.
    ///
    /// Returns `None` when the game is already over; nothing is evaluated or
    /// moved in that case. Otherwise perception picks the state, the chase
    /// tracker hears about transitions, and the matching behavior runs.
    pub fn tick<L, R>(
        &mut self,
        body: &mut L,
        player: &PlayerSnapshot,
        world: &mut EnemyWorld<'_>,
        rng: &mut R,
        delta_secs: f32,
    ) -> Option<TickReport>
    where
        L: Locomotion + ?Sized,
        R: Rng,
    {
        if world.game.is_game_over() {
            return None;
        }

        let perception = perceive(self, body, player, world.probe);
        if perception.clear_idle_target {
            self.idle_target = None;
        }

        let previous = self.state;
        self.state = perception.state;
        let changed = previous != self.state;
        if changed {
            match self.state {
                EnemyState::Chasing => world.chase_audio.register(self.id),
                EnemyState::Idling => world.chase_audio.unregister(self.id),
            }
            debug!("Enemy {:?}: {:?} -> {:?}", self.id, previous, self.state);
        }

        let mut caught = false;
        match self.state {
            EnemyState::Idling => self.wander(body, world.probe, rng, delta_secs),
            EnemyState::Chasing => {
                caught = self.pursue(body, player, delta_secs);
                if caught {
                    world.game.trigger_game_over();
                }
            }
        }

        Some(TickReport {
            state: self.state,
            changed,
            caught,
        })
    }

    /// Take a despawned guard out of the chase tracker.
    pub fn retire(&mut self, chase_audio: &mut dyn ChaseAudioTracker) {
        if self.state == EnemyState::Chasing {
            chase_audio.unregister(self.id);
        }
        self.state = EnemyState::Idling;
    }
}
