//! Enemy AI behavior systems.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Enemy, EnemyBrain, EnemyState};
use super::controller::EnemyWorld;
use super::spawning::EnemyPalette;
use crate::audio::ChaseMusic;
use crate::core::{Agent, AgentBody, ChaseChangedEvent, GameSession};
use crate::player::{Player, PlayerStatus};
use crate::world::{ActorTags, RapierProbe};

/// Tick every guard: perception, then patrol or chase, then audio side effects.
#[allow(clippy::type_complexity)]
pub fn enemy_behavior(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut chase_music: ResMut<ChaseMusic>,
    mut chase_events: EventWriter<ChaseChangedEvent>,
    rapier_context: Query<&RapierContext>,
    actors: Query<ActorTags>,
    player_query: Query<(&Transform, &Agent, &PlayerStatus), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (
            Entity,
            &mut EnemyBrain,
            &mut Agent,
            &mut Transform,
            Option<&mut KinematicCharacterController>,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let Ok((player_transform, player_agent, status)) = player_query.get_single() else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let player = status.snapshot(player_transform, player_agent);
    let delta = time.delta_secs();
    let mut rng = rand::thread_rng();

    for (entity, mut brain, mut agent, mut transform, controller) in enemy_query.iter_mut() {
        let probe = RapierProbe::new(context, &actors, entity);
        let mut world = EnemyWorld {
            probe: &probe,
            chase_audio: &mut *chase_music,
            game: &mut *session,
        };
        let mut body = AgentBody::new(
            &mut *agent,
            &mut *transform,
            controller.map(|c| c.into_inner()),
        );

        // Game over: every remaining guard is suspended too
        let Some(report) = brain.tick(&mut body, &player, &mut world, &mut rng, delta) else {
            break;
        };

        if report.changed {
            chase_events.send(ChaseChangedEvent {
                enemy: entity,
                chasing: report.state == EnemyState::Chasing,
            });
        }
        if report.caught {
            info!("Enemy {:?} caught the player", entity);
        }
    }
}

/// Switch guard sprites between their calm and alert tints.
pub fn tint_alerted_enemies(
    mut events: EventReader<ChaseChangedEvent>,
    mut query: Query<(&EnemyPalette, &mut Sprite), With<Enemy>>,
) {
    for event in events.read() {
        if let Ok((palette, mut sprite)) = query.get_mut(event.enemy) {
            sprite.color = if event.chasing { palette.alert } else { palette.calm };
        }
    }
}

/// Take guards out of the chase tracker before the level is torn down.
pub fn retire_enemies(
    mut chase_music: ResMut<ChaseMusic>,
    mut query: Query<&mut EnemyBrain, With<Enemy>>,
) {
    for mut brain in query.iter_mut() {
        brain.retire(&mut *chase_music);
    }
}
