//! Raycast collaborator used by perception and idle wandering.

use bevy::prelude::*;
use serde::Deserialize;

/// Set of collision layers a ray is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    /// Walls, floors and closed doors
    pub const WALLS: LayerMask = LayerMask(1 << 0);
    pub const PLAYER: LayerMask = LayerMask(1 << 1);
    pub const ENEMIES: LayerMask = LayerMask(1 << 2);

    pub const fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }

    pub const fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 == other.0
    }
}

/// What a ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTag {
    Player,
    Enemy,
    Obstacle,
}

/// First blocking surface along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub tag: HitTag,
}

impl RayHit {
    pub fn new(point: Vec2, tag: HitTag) -> Self {
        Self { point, tag }
    }
}

/// Cast a ray and report the first blocking surface.
pub trait RaycastProbe {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit>;
}

/// Any closure with the right shape is a probe; handy for scripted scenes.
impl<F> RaycastProbe for F
where
    F: Fn(Vec2, Vec2, f32, LayerMask) -> Option<RayHit>,
{
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerMask,
    ) -> Option<RayHit> {
        self(origin, direction, max_distance, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_union() {
        let sight = LayerMask::WALLS.union(LayerMask::PLAYER);
        assert!(sight.contains(LayerMask::PLAYER));
        assert!(!sight.contains(LayerMask::ENEMIES));
        assert!(sight.contains(LayerMask::NONE));
    }

    #[test]
    fn test_closure_probe() {
        let probe = |origin: Vec2, direction: Vec2, max: f32, _: LayerMask| {
            Some(RayHit::new(origin + direction * max, HitTag::Obstacle))
        };
        let hit = probe.cast(Vec2::ZERO, Vec2::X, 3.0, LayerMask::WALLS);
        assert_eq!(hit, Some(RayHit::new(Vec2::new(3.0, 0.0), HitTag::Obstacle)));
    }
}
