//! Vertical hand velocity
//!
//! Keeps a short ring of hand Y samples; velocity is the frame-to-frame
//! difference divided by the elapsed time.

use std::collections::VecDeque;

/// Default number of hand-Y samples kept
pub const VELOCITY_SAMPLES: usize = 10;

/// Hand vertical velocity tracker (px/s, positive = moving down)
pub struct VerticalVelocity {
    /// Ring buffer of recent hand Y positions
    history: VecDeque<f32>,
    capacity: usize,
}

impl VerticalVelocity {
    pub fn new() -> Self {
        Self::with_capacity(VELOCITY_SAMPLES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Record `y` and return the velocity against the previous sample
    ///
    /// Returns 0 with no previous sample or a non-positive `dt`.
    pub fn update(&mut self, y: f32, dt: f32) -> f32 {
        let velocity = match self.history.back() {
            Some(&prev) if dt > 0.0 => (y - prev) / dt,
            _ => 0.0,
        };

        self.history.push_back(y);
        if self.history.len() > self.capacity {
            self.history.pop_front();
        }

        velocity
    }

    /// Clear history (on engine reset)
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for VerticalVelocity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_zero() {
        let mut v = VerticalVelocity::new();
        assert_eq!(v.update(250.0, 0.033), 0.0);
    }

    #[test]
    fn test_velocity_from_previous_sample() {
        let mut v = VerticalVelocity::new();
        v.update(250.0, 0.0);
        let vel = v.update(245.0, 0.05);
        assert!((vel + 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_zero() {
        let mut v = VerticalVelocity::new();
        v.update(250.0, 0.0);
        assert_eq!(v.update(300.0, 0.0), 0.0);
    }

    #[test]
    fn test_ring_is_bounded() {
        let mut v = VerticalVelocity::with_capacity(10);
        for i in 0..25 {
            v.update(i as f32, 0.033);
        }
        assert_eq!(v.history.len(), 10);
        assert_eq!(v.history.front(), Some(&15.0));
        v.clear();
        assert_eq!(v.update(100.0, 0.033), 0.0);
    }
}
