//! Closets and other cover the player can hide in.

use bevy::prelude::*;

use super::zones::{TriggerZone, ZoneTransition};
use crate::player::{Player, PlayerStatus};

/// Marker for a hideable object. Its `TriggerZone` is the area the player
/// must stand in to use it.
#[derive(Component, Debug, Default)]
pub struct Hideable;

/// Keep the player's nearby hideable in sync with zone edges.
///
/// Exits are applied before entries so stepping from one closet straight
/// into the next keeps the new one.
pub fn track_hideables(
    zones: Query<(Entity, &TriggerZone), With<Hideable>>,
    mut player_query: Query<&mut PlayerStatus, With<Player>>,
) {
    let Ok(mut status) = player_query.get_single_mut() else {
        return;
    };

    for (_, zone) in zones.iter() {
        if zone.transition == Some(ZoneTransition::Exited) {
            status.leave_hideable();
        }
    }
    for (entity, zone) in zones.iter() {
        if zone.transition == Some(ZoneTransition::Entered) {
            status.approach_hideable(entity);
        }
    }
}
