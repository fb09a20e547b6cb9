//! Tracks which guards are chasing so the background music can follow.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::enemies::EnemyId;

/// Collaborator told about guards that start or stop chasing.
///
/// Both calls are idempotent.
pub trait ChaseAudioTracker {
    fn register(&mut self, enemy: EnemyId);
    fn unregister(&mut self, enemy: EnemyId);
}

/// Which looping track should be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MusicTrack {
    #[default]
    Background,
    Chase,
}

/// Set of chasing guards and the track that follows from it.
#[derive(Resource, Debug, Default)]
pub struct ChaseMusic {
    chasing: HashSet<EnemyId>,
}

impl ChaseMusic {
    /// Chase music while anyone is chasing.
    pub fn track(&self) -> MusicTrack {
        if self.chasing.is_empty() {
            MusicTrack::Background
        } else {
            MusicTrack::Chase
        }
    }

    pub fn chasing_count(&self) -> usize {
        self.chasing.len()
    }
}

impl ChaseAudioTracker for ChaseMusic {
    fn register(&mut self, enemy: EnemyId) {
        if self.chasing.insert(enemy) && self.chasing.len() == 1 {
            debug!("Chase music on");
        }
    }

    fn unregister(&mut self, enemy: EnemyId) {
        if self.chasing.remove(&enemy) && self.chasing.is_empty() {
            debug!("Chase music off");
        }
    }
}
