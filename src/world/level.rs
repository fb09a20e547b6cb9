//! Floor layout of the current level.

use bevy::prelude::*;

/// Vertical layout shared by everything that cares about floors.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Level {
    /// Height of one storey in world units
    pub floor_height: f32,
}

impl Default for Level {
    fn default() -> Self {
        Self { floor_height: 3.0 }
    }
}

impl Level {
    pub fn new(floor_height: f32) -> Self {
        Self { floor_height }
    }

    /// Floor index of a world position. Positions below zero floor downward.
    pub fn floor_of(&self, position: Vec2) -> i32 {
        (position.y / self.floor_height).floor() as i32
    }

    /// Height of a floor's walking surface.
    pub fn floor_y(&self, floor: i32) -> f32 {
        floor as f32 * self.floor_height
    }
}
