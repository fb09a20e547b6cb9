//! Wifi hotspots: signal strength, data transfer, and the pulsing range rings.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{lerp, TimedProgress};

/// Converts `bandwidth` into data per second at full signal.
pub const BANDWIDTH_SCALE: f32 = 6.0;

/// Signal strength below which a connection drops.
pub const MIN_SIGNAL: f32 = 0.001;

/// Piecewise-linear curve mapping normalised closeness (0 at the edge of
/// range, 1 on top of the hotspot) to raw signal strength.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalCurve {
    /// (closeness, strength) keys sorted by closeness
    pub keys: Vec<(f32, f32)>,
}

impl Default for SignalCurve {
    fn default() -> Self {
        Self {
            keys: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }
}

impl SignalCurve {
    pub fn evaluate(&self, t: f32) -> f32 {
        let Some(&(first_t, first_v)) = self.keys.first() else {
            return t;
        };
        if t <= first_t {
            return first_v;
        }

        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if t <= t1 {
                if t1 <= t0 {
                    return v1;
                }
                return lerp(v0, v1, (t - t0) / (t1 - t0));
            }
        }

        self.keys.last().map_or(t, |&(_, v)| v)
    }
}

/// A wifi access point the player downloads from.
#[derive(Component, Debug, Clone)]
pub struct Hotspot {
    pub range: f32,
    /// Strength lost per floor between the hotspot and the player
    pub floor_penalty: f32,
    pub curve: SignalCurve,
    /// Normalised transfer speed in [0, 1]
    pub bandwidth: f32,
    /// Floor the hotspot sits on
    pub floor: i32,
    available: f32,
    drained: bool,
}

impl Hotspot {
    pub fn new(range: f32, floor_penalty: f32, curve: SignalCurve, bandwidth: f32, available: f32, floor: i32) -> Self {
        if !(0.0..=1.0).contains(&bandwidth) {
            warn!("Hotspot bandwidth should be normalised, got {}", bandwidth);
        }
        Self {
            range,
            floor_penalty,
            curve,
            bandwidth,
            floor,
            available,
            drained: available <= 0.0,
        }
    }

    pub fn available(&self) -> f32 {
        self.available
    }

    pub fn is_drained(&self) -> bool {
        self.drained
    }

    pub fn in_range(&self, hotspot_position: Vec2, player_position: Vec2) -> bool {
        hotspot_position.distance(player_position) <= self.range
    }

    /// Strength in [0, 1] seen by a player at `player_position` on `player_floor`.
    pub fn signal_strength(&self, hotspot_position: Vec2, player_position: Vec2, player_floor: i32) -> f32 {
        let distance = hotspot_position.distance(player_position);
        if distance > self.range {
            return 0.0;
        }

        let closeness = (self.range - distance) / self.range;
        let floors_apart = (player_floor - self.floor).abs() as f32;
        (self.curve.evaluate(closeness) - floors_apart * self.floor_penalty).clamp(0.0, 1.0)
    }

    /// Send one frame's worth of data at `strength`. Never sends more than is left.
    pub fn transfer(&mut self, strength: f32, delta_secs: f32) -> f32 {
        let wanted = strength * self.bandwidth * BANDWIDTH_SCALE * delta_secs;
        let sent = wanted.min(self.available).max(0.0);
        self.available -= sent;
        self.drained = self.available <= 0.0;
        sent
    }

    /// Ring tint between red (slow) and green (fast).
    pub fn bandwidth_color(&self) -> Color {
        let b = self.bandwidth.clamp(0.0, 1.0);
        Color::srgb(1.0 - b, b, 0.0)
    }
}

/// Strongest non-drained hotspot in range of the player.
///
/// Ties keep the first candidate seen.
pub fn best_available<'a, I>(hotspots: I, player_position: Vec2, player_floor: i32) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Vec2, &'a Hotspot)>,
{
    let mut best: Option<(Entity, f32)> = None;
    for (entity, position, hotspot) in hotspots {
        if hotspot.is_drained() || !hotspot.in_range(position, player_position) {
            continue;
        }
        let strength = hotspot.signal_strength(position, player_position, player_floor);
        match best {
            Some((_, best_strength)) if strength <= best_strength => {}
            _ => best = Some((entity, strength)),
        }
    }
    best.map(|(entity, _)| entity)
}

/// Icon tier for a signal strength: 0 (no signal) to 3 (full bars).
pub fn signal_tier(strength: f32) -> u8 {
    if strength.abs() < 0.01 {
        0
    } else if strength < 0.33 {
        1
    } else if strength < 0.66 {
        2
    } else {
        3
    }
}

/// One expanding ring around a hotspot. Grows to the hotspot's range while fading out.
#[derive(Component, Debug, Clone)]
pub struct PulseRing {
    pub progress: TimedProgress,
    pub max_radius: f32,
}

/// Grow and fade the pulse rings.
pub fn pulse_hotspot_rings(
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rings: Query<(&mut PulseRing, &mut Transform, &MeshMaterial2d<ColorMaterial>)>,
) {
    let delta = time.delta_secs();
    for (mut ring, mut transform, material) in rings.iter_mut() {
        let t = ring.progress.advance_looping(delta);
        let radius = lerp(0.0, ring.max_radius, t);
        transform.scale = Vec3::new(radius, radius, 1.0);

        if let Some(material) = materials.get_mut(&material.0) {
            material.color.set_alpha(lerp(1.0, 0.0, t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotspot(available: f32) -> Hotspot {
        Hotspot::new(5.0, 0.4, SignalCurve::default(), 0.5, available, 0)
    }

    #[test]
    fn test_signal_falls_off_linearly_and_stops_at_range() {
        let hotspot = hotspot(1.0);
        let origin = Vec2::ZERO;
        assert!((hotspot.signal_strength(origin, Vec2::ZERO, 0) - 1.0).abs() < 1e-6);
        assert!((hotspot.signal_strength(origin, Vec2::new(2.5, 0.0), 0) - 0.5).abs() < 1e-6);
        assert_eq!(hotspot.signal_strength(origin, Vec2::new(5.1, 0.0), 0), 0.0);
    }

    #[test]
    fn test_floor_penalty_per_floor() {
        let hotspot = hotspot(1.0);
        let player = Vec2::new(0.0, 0.5);
        let same = hotspot.signal_strength(Vec2::ZERO, player, 0);
        let one_up = hotspot.signal_strength(Vec2::ZERO, player, 1);
        let three_up = hotspot.signal_strength(Vec2::ZERO, player, 3);
        assert!((same - one_up - 0.4).abs() < 1e-6);
        assert_eq!(three_up, 0.0);
    }

    #[test]
    fn test_transfer_capped_and_drains() {
        let mut hotspot = hotspot(0.5);
        // 1.0 * 0.5 * 6.0 * 0.1 = 0.3 per call
        assert!((hotspot.transfer(1.0, 0.1) - 0.3).abs() < 1e-6);
        assert!(!hotspot.is_drained());
        assert!((hotspot.transfer(1.0, 0.1) - 0.2).abs() < 1e-6);
        assert!(hotspot.is_drained());
        assert_eq!(hotspot.transfer(1.0, 0.1), 0.0);
    }

    #[test]
    fn test_best_available_skips_drained_and_far() {
        let strong_but_drained = hotspot(0.0);
        let weak = hotspot(1.0);
        let far = hotspot(1.0);
        let e1 = Entity::from_raw(1);
        let e2 = Entity::from_raw(2);
        let e3 = Entity::from_raw(3);
        let player = Vec2::ZERO;

        let candidates = vec![
            (e1, Vec2::new(0.5, 0.0), &strong_but_drained),
            (e2, Vec2::new(3.0, 0.0), &weak),
            (e3, Vec2::new(20.0, 0.0), &far),
        ];
        assert_eq!(best_available(candidates, player, 0), Some(e2));
    }

    #[test]
    fn test_best_available_prefers_strongest() {
        let a = hotspot(1.0);
        let b = hotspot(1.0);
        let e1 = Entity::from_raw(1);
        let e2 = Entity::from_raw(2);
        let candidates = vec![(e1, Vec2::new(4.0, 0.0), &a), (e2, Vec2::new(1.0, 0.0), &b)];
        assert_eq!(best_available(candidates, Vec2::ZERO, 0), Some(e2));
        assert_eq!(best_available(Vec::<(Entity, Vec2, &Hotspot)>::new(), Vec2::ZERO, 0), None);
    }

    #[test]
    fn test_curve_clamps_and_interpolates() {
        let curve = SignalCurve {
            keys: vec![(0.0, 0.2), (0.5, 0.6), (1.0, 1.0)],
        };
        assert_eq!(curve.evaluate(-1.0), 0.2);
        assert!((curve.evaluate(0.25) - 0.4).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.8).abs() < 1e-6);
        assert_eq!(curve.evaluate(2.0), 1.0);
    }

    #[test]
    fn test_signal_tiers() {
        assert_eq!(signal_tier(0.0), 0);
        assert_eq!(signal_tier(0.005), 0);
        assert_eq!(signal_tier(0.2), 1);
        assert_eq!(signal_tier(0.5), 2);
        assert_eq!(signal_tier(0.66), 3);
        assert_eq!(signal_tier(1.0), 3);
    }
}
