//! Horizontal locomotion shared by the player and the guards.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Movement capability consumed by behavior code.
///
/// Behavior never touches transforms directly; it reads the position and
/// facing and issues signed movement commands scaled by the frame delta.
pub trait Locomotion {
    fn position(&self) -> Vec2;
    fn facing_right(&self) -> bool;
    /// Turn to face a side without moving.
    fn face(&mut self, right: bool);
    /// Apply a signed horizontal movement command. The sign picks the direction,
    /// the magnitude is scaled by the agent's speed.
    fn move_by(&mut self, direction: f32);
}

/// Animation the agent's sprite should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentAnimation {
    #[default]
    Idle,
    Walk,
}

/// Walking body: speed, facing and current animation.
#[derive(Component, Debug, Clone)]
pub struct Agent {
    /// Units per second for a movement command of magnitude 1 per second
    pub speed: f32,
    pub facing_right: bool,
    pub animation: AgentAnimation,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            speed: 5.0,
            facing_right: true,
            animation: AgentAnimation::Idle,
        }
    }
}

impl Agent {
    pub fn new(speed: f32) -> Self {
        Self { speed, ..default() }
    }

    /// Resolve a movement command into a displacement.
    ///
    /// A zero command keeps the current facing and switches to idle.
    pub fn step(&mut self, direction: f32) -> f32 {
        if direction != 0.0 {
            self.facing_right = direction > 0.0;
            self.animation = AgentAnimation::Walk;
        } else {
            self.animation = AgentAnimation::Idle;
        }
        direction * self.speed
    }
}

/// Bevy-side locomotion: an `Agent` plus the entity's transform and,
/// when present, its character controller.
///
/// With a controller the frame's displacement is handed to Rapier so walls
/// and closed doors block it; without one the transform moves directly.
pub struct AgentBody<'a> {
    pub agent: &'a mut Agent,
    pub transform: &'a mut Transform,
    pub controller: Option<&'a mut KinematicCharacterController>,
}

impl<'a> AgentBody<'a> {
    pub fn new(
        agent: &'a mut Agent,
        transform: &'a mut Transform,
        controller: Option<&'a mut KinematicCharacterController>,
    ) -> Self {
        Self {
            agent,
            transform,
            controller,
        }
    }
}

impl Locomotion for AgentBody<'_> {
    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn facing_right(&self) -> bool {
        self.agent.facing_right
    }

    fn face(&mut self, right: bool) {
        self.agent.facing_right = right;
    }

    fn move_by(&mut self, direction: f32) {
        let dx = self.agent.step(direction);
        match self.controller.as_deref_mut() {
            Some(controller) => controller.translation = Some(Vec2::new(dx, 0.0)),
            None => self.transform.translation.x += dx,
        }
    }
}

/// Mirror sprites to match the agent's facing.
pub fn sync_agent_sprites(mut query: Query<(&Agent, &mut Sprite), Changed<Agent>>) {
    for (agent, mut sprite) in query.iter_mut() {
        sprite.flip_x = !agent.facing_right;
    }
}
