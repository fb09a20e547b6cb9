//! Dash: a short evasive burst with a cooldown and an after-image trail.

use bevy::prelude::*;

use super::components::{Player, PlayerConfig};
use crate::core::{lerp, Agent, TimedProgress};
use crate::world::LevelEntity;

/// Starting opacity of a dash-trail ghost.
const GHOST_ALPHA: f32 = 0.5;

/// Result of pressing the dash key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashOutcome {
    Started,
    /// Still cooling down from the last dash
    Denied,
    /// Already dashing
    Busy,
}

/// Dash timers for the player.
#[derive(Component, Debug, Clone, Default)]
pub struct Dash {
    active: Option<TimedProgress>,
    cooldown: f32,
    ghost_timer: f32,
}

impl Dash {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    pub fn try_start(&mut self, duration: f32) -> DashOutcome {
        if self.is_active() {
            return DashOutcome::Busy;
        }
        if self.cooldown > 0.0 {
            return DashOutcome::Denied;
        }
        self.active = Some(TimedProgress::new(duration));
        self.ghost_timer = 0.0;
        DashOutcome::Started
    }

    /// Advance the dash or its cooldown. Returns true on the frame the dash ends.
    pub fn update(&mut self, delta_secs: f32, cooldown: f32) -> bool {
        let Some(progress) = self.active.as_mut() else {
            self.cooldown = (self.cooldown - delta_secs).max(0.0);
            return false;
        };

        progress.advance(delta_secs);
        if !progress.is_complete() {
            return false;
        }
        self.active = None;
        self.cooldown = cooldown;
        true
    }

    /// Trail clock. Returns true when a ghost should be dropped this frame.
    pub fn ghost_due(&mut self, delta_secs: f32, spawn_delay: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        let due = self.ghost_timer >= spawn_delay;
        if due {
            self.ghost_timer = 0.0;
        }
        self.ghost_timer += delta_secs;
        due
    }
}

/// Fading after-image left behind while dashing.
#[derive(Component, Debug, Clone)]
pub struct DashGhost {
    pub life: TimedProgress,
}

/// Drop ghosts at the player's position while a dash is active.
pub fn spawn_dash_ghosts(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&Transform, &Agent, &Sprite, &mut Dash), With<Player>>,
) {
    let Ok((transform, agent, sprite, mut dash)) = player_query.get_single_mut() else {
        return;
    };
    if !dash.ghost_due(time.delta_secs(), config.ghost_spawn_delay) {
        return;
    }

    let mut ghost = sprite.clone();
    ghost.color = sprite.color.with_alpha(GHOST_ALPHA);
    ghost.flip_x = !agent.facing_right;

    commands.spawn((
        DashGhost {
            life: TimedProgress::new(config.ghost_display_time),
        },
        ghost,
        Transform::from_translation(transform.translation - Vec3::Z * 0.1),
        LevelEntity,
    ));
}

/// Fade ghosts out and remove them once their display time is up.
pub fn fade_dash_ghosts(
    mut commands: Commands,
    time: Res<Time>,
    mut ghosts: Query<(Entity, &mut DashGhost, &mut Sprite)>,
) {
    for (entity, mut ghost, mut sprite) in ghosts.iter_mut() {
        let t = ghost.life.advance(time.delta_secs());
        if ghost.life.is_complete() {
            commands.entity(entity).despawn();
            continue;
        }
        sprite.color.set_alpha(lerp(GHOST_ALPHA, 0.0, t));
    }
}
