//! Trigger zones: axis-aligned areas that notice the player walking in and out.
//!
//! Hideables, doors, elevator cabins and shaft call points all carry a
//! `TriggerZone`. Occupancy is recomputed once per frame from the player's
//! position and the edge (if any) is kept on the zone for that frame.

use bevy::prelude::*;

use crate::player::Player;

/// Edge reported when occupancy changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTransition {
    Entered,
    Exited,
}

/// Edge detector over a per-frame "inside" flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneOccupancy {
    occupied: bool,
}

impl ZoneOccupancy {
    /// Feed this frame's containment test. Returns the edge, if one happened.
    pub fn update(&mut self, inside: bool) -> Option<ZoneTransition> {
        if inside == self.occupied {
            return None;
        }
        self.occupied = inside;
        Some(if inside {
            ZoneTransition::Entered
        } else {
            ZoneTransition::Exited
        })
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }
}

/// What one Activate (E) press operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivateTarget {
    Hideable,
    Door,
    ElevatorCall,
}

/// Resolve overlapping zones to a single target: hideable, then door, then
/// elevator call point.
pub fn activate_target(
    near_hideable: bool,
    at_door: bool,
    at_call: bool,
) -> Option<ActivateTarget> {
    if near_hideable {
        Some(ActivateTarget::Hideable)
    } else if at_door {
        Some(ActivateTarget::Door)
    } else if at_call {
        Some(ActivateTarget::ElevatorCall)
    } else {
        None
    }
}

/// Rectangular area centred on the entity's transform.
#[derive(Component, Debug, Clone)]
pub struct TriggerZone {
    pub half_extents: Vec2,
    occupancy: ZoneOccupancy,
    /// Edge seen during the current frame
    pub transition: Option<ZoneTransition>,
}

impl TriggerZone {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents,
            occupancy: ZoneOccupancy::default(),
            transition: None,
        }
    }

    /// Whether `point` lies inside the zone centred at `center`. Edges count as inside.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let offset = (point - center).abs();
        offset.x <= self.half_extents.x && offset.y <= self.half_extents.y
    }

    pub fn is_occupied(&self) -> bool {
        self.occupancy.is_occupied()
    }

    /// Recompute occupancy for this frame.
    pub fn refresh(&mut self, center: Vec2, player: Vec2) {
        let inside = self.contains(center, player);
        self.transition = self.occupancy.update(inside);
    }
}

/// Refresh every zone against the player's position.
pub fn update_trigger_zones(
    player_query: Query<&Transform, With<Player>>,
    mut zones: Query<(&Transform, &mut TriggerZone), Without<Player>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let player_position = player.translation.truncate();

    for (transform, mut zone) in zones.iter_mut() {
        zone.refresh(transform.translation.truncate(), player_position);
    }
}
