//! Side-on player movement, whistle, hiding, and player spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::dash::{Dash, DashOutcome};
use crate::core::{Agent, AgentBody, Locomotion, SoundCue, SoundEvent};
use crate::enemies::LayerMask;
use crate::world::collision_groups;

/// Horizontal input in [-1, 1] from A/D and the arrow keys.
fn horizontal_axis(keyboard: &ButtonInput<KeyCode>) -> f32 {
    let mut axis = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }
    axis
}

/// Movement command for this frame. A dash always moves, along the input
/// or, without input, the way the player faces.
pub fn movement_command(axis: f32, facing_right: bool, dashing: bool, dash_multiplier: f32) -> f32 {
    if !dashing {
        return axis;
    }
    let direction = if axis != 0.0 {
        axis.signum()
    } else if facing_right {
        1.0
    } else {
        -1.0
    };
    direction * dash_multiplier
}

/// Handle walking, dashing, whistling and hiding.
///
/// Uses Rapier's KinematicCharacterController so walls and closed doors block movement.
#[allow(clippy::type_complexity)]
pub fn player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut sounds: EventWriter<SoundEvent>,
    mut player_query: Query<
        (
            &mut Agent,
            &mut Transform,
            Option<&mut KinematicCharacterController>,
            &mut PlayerStatus,
            &mut Dash,
        ),
        With<Player>,
    >,
) {
    let Ok((mut agent, mut transform, controller, mut status, mut dash)) =
        player_query.get_single_mut()
    else {
        return;
    };
    let delta = time.delta_secs();

    // Elevator riders can't do anything until they arrive
    if status.frozen {
        status.signaling = false;
        return;
    }

    status.signaling = keyboard.pressed(KeyCode::KeyQ);

    if keyboard.just_pressed(KeyCode::KeyL) {
        match dash.try_start(config.dash_duration) {
            DashOutcome::Started => {
                sounds.send(SoundEvent::new(SoundCue::Dash));
                debug!("Dash started");
            }
            DashOutcome::Denied => {
                sounds.send(SoundEvent::new(SoundCue::DashDenied));
            }
            DashOutcome::Busy => {}
        }
    }

    if keyboard.just_pressed(KeyCode::KeyE) && status.toggle_hidden() {
        info!("Player {}", if status.concealed { "hidden" } else { "revealed" });
    }

    let command = movement_command(
        horizontal_axis(&keyboard),
        agent.facing_right,
        dash.is_active(),
        config.dash_multiplier,
    );
    let mut body = AgentBody::new(&mut *agent, &mut *transform, controller.map(|c| c.into_inner()));
    body.move_by(command * delta);

    dash.update(delta, config.dash_cooldown);
    status.evasive = dash.is_active();
}

/// Swap the player's tint when hiding or coming out.
pub fn show_concealment(
    config: Res<PlayerConfig>,
    mut player_query: Query<(&PlayerStatus, &mut Sprite), (With<Player>, Changed<PlayerStatus>)>,
) {
    for (status, mut sprite) in player_query.iter_mut() {
        sprite.color = if status.concealed {
            config.concealed_color()
        } else {
            config.visible_color()
        };
    }
}

/// Spawn the player entity.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    config: &PlayerConfig,
    data_to_download: f32,
) -> Entity {
    let size = Vec2::new(config.size.0, config.size.1);

    commands
        .spawn((
            Player,
            PlayerStatus::default(),
            Dash::default(),
            DownloadProgress::new(data_to_download),
            Agent::new(config.move_speed),
            Sprite::from_color(config.visible_color(), size),
            Transform::from_translation(position.extend(2.0)),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::cuboid(size.x / 2.0, size.y / 2.0),
            collision_groups(LayerMask::PLAYER),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                // Only walls and closed doors block the player
                filter_groups: Some(CollisionGroups::new(Group::ALL, Group::GROUP_1)),
                ..default()
            },
        ))
        .id()
}
