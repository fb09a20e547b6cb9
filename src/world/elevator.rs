//! Elevators, their landing doors, and the call points on each floor.

use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::door::Door;
use super::zones::{activate_target, ActivateTarget, TriggerZone};
use crate::core::{lerp, SoundCue, SoundEvent, TimedProgress};
use crate::player::{Player, PlayerStatus};

/// One floor of vertical travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorTravel {
    from: f32,
    to: f32,
    up: bool,
    progress: TimedProgress,
}

impl ElevatorTravel {
    pub fn new(from: f32, up: bool, distance: f32, travel_time: f32) -> Self {
        let to = if up { from + distance } else { from - distance };
        Self {
            from,
            to,
            up,
            progress: TimedProgress::new(travel_time),
        }
    }

    /// Advance one frame and return the cabin height. Lands exactly on the destination.
    pub fn step(&mut self, delta_secs: f32) -> f32 {
        let t = self.progress.advance(delta_secs);
        if self.progress.is_complete() {
            self.to
        } else {
            lerp(self.from, self.to, t)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }
}

/// What the elevator did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElevatorStep {
    Idle,
    /// A queued move just started; the cabin has not moved yet
    Departed,
    Moving { y: f32 },
    Arrived { y: f32 },
}

/// Elevator cabin. Moves one floor at a time; further moves wait in a queue.
#[derive(Component, Debug, Clone)]
pub struct Elevator {
    pub floor: i32,
    pub min_floor: i32,
    pub max_floor: i32,
    pub floor_distance: f32,
    /// Seconds per floor
    pub travel_time: f32,
    travel: Option<ElevatorTravel>,
    pending: VecDeque<bool>,
    rider_offset: Option<f32>,
}

impl Elevator {
    pub fn new(floor: i32, min_floor: i32, max_floor: i32, floor_distance: f32, travel_time: f32) -> Self {
        Self {
            floor,
            min_floor,
            max_floor,
            floor_distance,
            travel_time,
            travel: None,
            pending: VecDeque::new(),
            rider_offset: None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.travel.is_some()
    }

    /// Moving, or with moves still queued.
    pub fn is_busy(&self) -> bool {
        self.is_moving() || !self.pending.is_empty()
    }

    pub fn pending_moves(&self) -> usize {
        self.pending.len()
    }

    /// Ask for a one-floor move. Ignored while busy or at the end of the shaft.
    pub fn request(&mut self, up: bool) -> bool {
        let destination = if up { self.floor + 1 } else { self.floor - 1 };
        if self.is_busy() || destination < self.min_floor || destination > self.max_floor {
            return false;
        }
        self.pending.push_back(up);
        true
    }

    /// Queue the one-floor moves that bring the cabin to `floor`.
    /// Returns how many were queued.
    pub fn call_to(&mut self, floor: i32) -> usize {
        if self.is_busy() {
            return 0;
        }
        let target = floor.clamp(self.min_floor, self.max_floor);
        let difference = self.floor - target;
        let up = difference < 0;
        for _ in 0..difference.unsigned_abs() {
            self.pending.push_back(up);
        }
        difference.unsigned_abs() as usize
    }

    /// Advance by one frame from cabin height `y`.
    pub fn advance(&mut self, y: f32, delta_secs: f32) -> ElevatorStep {
        let Some(travel) = self.travel.as_mut() else {
            let Some(up) = self.pending.pop_front() else {
                return ElevatorStep::Idle;
            };
            self.travel = Some(ElevatorTravel::new(y, up, self.floor_distance, self.travel_time));
            return ElevatorStep::Departed;
        };

        let y = travel.step(delta_secs);
        if !travel.is_complete() {
            return ElevatorStep::Moving { y };
        }

        self.floor += if travel.up { 1 } else { -1 };
        self.travel = None;
        ElevatorStep::Arrived { y }
    }

    /// Take the player on board, keeping their height above the cabin.
    pub fn board(&mut self, offset: f32) {
        self.rider_offset = Some(offset);
    }

    pub fn rider_offset(&self) -> Option<f32> {
        self.rider_offset
    }

    /// Let the rider off. Returns whether anyone was aboard.
    pub fn release(&mut self) -> bool {
        self.rider_offset.take().is_some()
    }
}

/// Blocks the shaft on floors where the cabin isn't.
#[derive(Component, Debug, Clone, Copy)]
pub struct LandingDoor {
    pub elevator: Entity,
    pub floor: i32,
}

/// Call point on one floor of a shaft.
#[derive(Component, Debug, Clone, Copy)]
pub struct ShaftCall {
    pub elevator: Entity,
}

/// Activate (E) at a call point brings the cabin to the player's floor.
pub fn call_elevators(
    keyboard: Res<ButtonInput<KeyCode>>,
    player_query: Query<&PlayerStatus, With<Player>>,
    calls: Query<(&ShaftCall, &TriggerZone)>,
    doors: Query<&TriggerZone, With<Door>>,
    mut elevators: Query<&mut Elevator>,
) {
    if !keyboard.just_pressed(KeyCode::KeyE) {
        return;
    }
    let Ok(status) = player_query.get_single() else {
        return;
    };
    let at_door = doors.iter().any(TriggerZone::is_occupied);
    let at_call = calls.iter().any(|(_, zone)| zone.is_occupied());
    let target = activate_target(status.nearby_hideable.is_some(), at_door, at_call);
    if target != Some(ActivateTarget::ElevatorCall) {
        return;
    }

    for (call, zone) in calls.iter() {
        if !zone.is_occupied() {
            continue;
        }
        let Ok(mut elevator) = elevators.get_mut(call.elevator) else {
            continue;
        };
        let moves = elevator.call_to(status.floor);
        if moves > 0 {
            info!("Elevator called to floor {} ({} moves)", status.floor, moves);
        }
    }
}

/// Run elevator travel: rider input, carrying the rider, sound cues.
pub fn ride_elevators(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sounds: EventWriter<SoundEvent>,
    mut elevators: Query<(&mut Elevator, &mut Transform, &TriggerZone), Without<Player>>,
    mut player_query: Query<(&mut Transform, &mut PlayerStatus), With<Player>>,
) {
    let Ok((mut player_transform, mut status)) = player_query.get_single_mut() else {
        return;
    };
    let delta = time.delta_secs();

    for (mut elevator, mut transform, zone) in elevators.iter_mut() {
        if zone.is_occupied() {
            if keyboard.just_pressed(KeyCode::ArrowUp) {
                elevator.request(true);
            } else if keyboard.just_pressed(KeyCode::ArrowDown) {
                elevator.request(false);
            }
        }

        match elevator.advance(transform.translation.y, delta) {
            ElevatorStep::Idle => {}
            ElevatorStep::Departed => {
                if zone.is_occupied() {
                    elevator.board(player_transform.translation.y - transform.translation.y);
                    status.frozen = true;
                }
                sounds.send(SoundEvent::new(SoundCue::ElevatorDeparted));
            }
            ElevatorStep::Moving { y } => {
                transform.translation.y = y;
                if let Some(offset) = elevator.rider_offset() {
                    player_transform.translation.y = y + offset;
                }
            }
            ElevatorStep::Arrived { y } => {
                transform.translation.y = y;
                if let Some(offset) = elevator.rider_offset() {
                    player_transform.translation.y = y + offset;
                }
                if elevator.release() {
                    status.frozen = false;
                }
                sounds.send(SoundEvent::new(SoundCue::ElevatorArrived));
                info!("Elevator arrived at floor {}", elevator.floor);
            }
        }
    }
}

/// Open the landing door on the cabin's floor and close all the others.
pub fn sync_landing_doors(
    mut commands: Commands,
    elevators: Query<&Elevator>,
    mut doors: Query<(Entity, &LandingDoor, Has<ColliderDisabled>, &mut Visibility)>,
) {
    for (entity, door, disabled, mut visibility) in doors.iter_mut() {
        let Ok(elevator) = elevators.get(door.elevator) else {
            continue;
        };
        let open = elevator.floor == door.floor;
        if open == disabled {
            continue;
        }

        if open {
            commands.entity(entity).insert(ColliderDisabled);
            *visibility = Visibility::Hidden;
        } else {
            commands.entity(entity).remove::<ColliderDisabled>();
            *visibility = Visibility::Inherited;
        }
    }
}
