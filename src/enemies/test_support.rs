//! Fake collaborators for enemy behavior tests.

use bevy::prelude::*;

use super::components::EnemyId;
use super::probe::{HitTag, LayerMask, RayHit};
use crate::audio::ChaseAudioTracker;
use crate::core::{GameOverSignal, Locomotion};

/// Locomotion that records every command. It only moves when `speed` is non-zero.
#[derive(Debug, Clone)]
pub struct FakeBody {
    pub position: Vec2,
    pub facing_right: bool,
    pub speed: f32,
    pub moves: Vec<f32>,
}

impl FakeBody {
    pub fn at(x: f32, facing_right: bool) -> Self {
        Self {
            position: Vec2::new(x, 0.0),
            facing_right,
            speed: 0.0,
            moves: Vec::new(),
        }
    }
}

impl Locomotion for FakeBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn facing_right(&self) -> bool {
        self.facing_right
    }

    fn face(&mut self, right: bool) {
        self.facing_right = right;
    }

    fn move_by(&mut self, direction: f32) {
        self.moves.push(direction);
        if direction != 0.0 {
            self.facing_right = direction > 0.0;
        }
        self.position.x += direction * self.speed;
    }
}

/// Tracker that remembers registrations in call order.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    pub calls: Vec<(EnemyId, bool)>,
}

impl ChaseAudioTracker for RecordingTracker {
    fn register(&mut self, enemy: EnemyId) {
        self.calls.push((enemy, true));
    }

    fn unregister(&mut self, enemy: EnemyId) {
        self.calls.push((enemy, false));
    }
}

/// Game-over flag that counts how often it was raised.
#[derive(Debug, Default)]
pub struct CountingGame {
    pub game_over: bool,
    pub triggers: u32,
}

impl GameOverSignal for CountingGame {
    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn trigger_game_over(&mut self) -> bool {
        self.triggers += 1;
        let first = !self.game_over;
        self.game_over = true;
        first
    }
}

/// Probe that answers every ray with the same hit, placed at the ray's reach.
pub fn always_hits(tag: HitTag) -> impl Fn(Vec2, Vec2, f32, LayerMask) -> Option<RayHit> {
    move |origin: Vec2, direction: Vec2, max: f32, _: LayerMask| {
        Some(RayHit::new(origin + direction.normalize_or_zero() * max, tag))
    }
}

/// Probe for a corridor with walls at `left` and `right`.
pub fn corridor(left: f32, right: f32) -> impl Fn(Vec2, Vec2, f32, LayerMask) -> Option<RayHit> {
    move |origin: Vec2, direction: Vec2, _: f32, _: LayerMask| {
        let x = if direction.x < 0.0 { left } else { right };
        Some(RayHit::new(Vec2::new(x, origin.y), HitTag::Obstacle))
    }
}

/// Probe over an empty scene.
pub fn never_hits(_: Vec2, _: Vec2, _: f32, _: LayerMask) -> Option<RayHit> {
    None
}
