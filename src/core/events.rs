//! Global events used for cross-system communication.
//!
//! Gameplay systems never talk to the audio backend directly. They send a
//! `SoundEvent` and the audio plugin decides which channel plays it.

use bevy::prelude::*;

/// One-shot sound cues raised by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player started a dash
    Dash,
    /// Player tried to dash during the cooldown
    DashDenied,
    /// An elevator left its floor (starts the lift music)
    ElevatorDeparted,
    /// An elevator reached its floor (stops the lift music, plays the chime)
    ElevatorArrived,
}

/// Sent when gameplay wants a sound played.
#[derive(Event, Debug, Clone, Copy)]
pub struct SoundEvent {
    pub cue: SoundCue,
}

impl SoundEvent {
    pub fn new(cue: SoundCue) -> Self {
        Self { cue }
    }
}

/// Sent when an enemy starts or stops chasing the player.
///
/// Enemy sprites switch to their alert tint on this; music switching goes
/// through the chase tracker instead.
#[derive(Event, Debug, Clone, Copy)]
pub struct ChaseChangedEvent {
    /// Enemy whose state changed
    pub enemy: Entity,
    /// True when the enemy started chasing
    pub chasing: bool,
}
