//! Doors the player can open and close.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::zones::{activate_target, ActivateTarget, TriggerZone};
use crate::player::{Player, PlayerStatus};

/// A door that blocks walls-layer movement and sight while closed.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Door {
    open: bool,
}

impl Door {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip open/closed and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

/// Toggle the door the player is standing at when Activate (E) is pressed.
pub fn operate_doors(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    player_query: Query<&PlayerStatus, With<Player>>,
    mut doors: Query<(Entity, &TriggerZone, &mut Door, &mut Visibility)>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Ok(status) = player_query.get_single() else {
        return;
    };
    if status.frozen {
        return;
    }
    let at_door = doors.iter().any(|(_, zone, _, _)| zone.is_occupied());
    if activate_target(status.nearby_hideable.is_some(), at_door, false)
        != Some(ActivateTarget::Door)
    {
        return;
    }

    for (entity, zone, mut door, mut visibility) in doors.iter_mut() {
        if !zone.is_occupied() {
            continue;
        }

        if door.toggle() {
            commands.entity(entity).insert(ColliderDisabled);
            *visibility = Visibility::Hidden;
        } else {
            commands.entity(entity).remove::<ColliderDisabled>();
            *visibility = Visibility::Inherited;
        }
        debug!("Door {:?} open: {}", entity, door.is_open());
    }
}
