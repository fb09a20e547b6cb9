//! Frame-sliced progress for timed animations.
//!
//! Elevator travel, dashes, dash-trail ghosts and hotspot pulse rings are all
//! driven by a `TimedProgress` that is advanced once per frame with the frame
//! delta until it completes (or wraps, for looping effects).

/// Normalized progress through a fixed-duration animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedProgress {
    progress: f32,
    rate: f32,
}

impl TimedProgress {
    /// Progress that completes after `duration` seconds.
    ///
    /// A non-positive duration completes on the first advance.
    pub fn new(duration: f32) -> Self {
        let rate = if duration > 0.0 { 1.0 / duration } else { f32::INFINITY };
        Self { progress: 0.0, rate }
    }

    /// Start part-way through, e.g. to stagger pulse rings.
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.progress = offset.max(0.0);
        self
    }

    /// Advance by one frame and return the clamped fraction.
    pub fn advance(&mut self, delta_secs: f32) -> f32 {
        if !self.is_complete() && delta_secs > 0.0 {
            self.progress += delta_secs * self.rate;
        }
        self.fraction()
    }

    /// Advance and wrap back to the start whenever a cycle completes.
    pub fn advance_looping(&mut self, delta_secs: f32) -> f32 {
        if delta_secs <= 0.0 {
            return self.fraction();
        }
        self.progress += delta_secs * self.rate;
        if self.progress >= 1.0 {
            self.progress = if self.rate.is_finite() { self.progress.fract() } else { 0.0 };
        }
        self.fraction()
    }

    /// Progress clamped to [0, 1].
    pub fn fraction(&self) -> f32 {
        self.progress.clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_completes_after_duration() {
        let mut progress = TimedProgress::new(2.0);
        assert_eq!(progress.advance(0.5), 0.25);
        assert!(!progress.is_complete());

        progress.advance(1.5);
        assert!(progress.is_complete());
        assert_eq!(progress.fraction(), 1.0);

        // Completed progress stays put
        progress.advance(10.0);
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut progress = TimedProgress::new(0.0);
        progress.advance(0.016);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_looping_wraps() {
        let mut pulse = TimedProgress::new(1.0).with_offset(0.9);
        let t = pulse.advance_looping(0.2);
        assert!((t - 0.1).abs() < 1e-5);
        assert!(!pulse.is_complete());
    }

    #[test]
    fn test_lerp_clamps() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.5), 10.0);
        assert_eq!(lerp(4.0, 2.0, -1.0), 4.0);
    }
}
