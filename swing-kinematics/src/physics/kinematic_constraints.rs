//! Kinematic constraints - per-frame angle change limits and adaptive smoothing
//!
//! A joint cannot physically swing more than a few degrees between frames
//! except in the fast phases, so larger jumps are detector noise. The
//! limit and the EMA weight both depend on the current swing phase.

use crate::config::KinematicsConfig;

use super::phase::SwingPhase;

/// Limit `raw` to within `max_delta` of the previous smoothed value
///
/// Without a finite previous value the raw reading passes through. The
/// sign of `max_delta` is ignored.
pub fn clamp_delta(previous: Option<f32>, raw: f32, max_delta: f32) -> f32 {
    let limit = max_delta.abs();
    match previous {
        Some(prev) if prev.is_finite() && !limit.is_nan() => raw.clamp(prev - limit, prev + limit),
        _ => raw,
    }
}

/// Phase-dependent outlier limits and EMA weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingPolicy {
    fast_max_delta: f32,
    max_delta: f32,
    alpha_static: f32,
    alpha_fast: f32,
    alpha_default: f32,
}

impl SmoothingPolicy {
    pub fn new() -> Self {
        Self::from_config(&KinematicsConfig::default())
    }

    pub fn from_config(config: &KinematicsConfig) -> Self {
        Self {
            fast_max_delta: config.fast_max_delta,
            max_delta: config.max_delta,
            alpha_static: config.alpha_static,
            alpha_fast: config.alpha_fast,
            alpha_default: config.alpha_default,
        }
    }

    /// Max per-frame angle change (degrees)
    pub fn max_delta(&self, phase: SwingPhase) -> f32 {
        if phase.is_fast() {
            self.fast_max_delta
        } else {
            self.max_delta
        }
    }

    /// EMA weight of the new sample
    pub fn alpha(&self, phase: SwingPhase) -> f32 {
        if phase.is_static() {
            self.alpha_static
        } else if phase.is_fast() {
            self.alpha_fast
        } else {
            self.alpha_default
        }
    }

    /// Outlier clamp followed by EMA against the previous smoothed value
    pub fn apply(&self, phase: SwingPhase, previous: Option<f32>, raw: f32) -> f32 {
        let clamped = clamp_delta(previous, raw, self.max_delta(phase));
        super::geometry::ema(clamped, previous, self.alpha(phase))
    }
}

impl Default for SmoothingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(None, 170.0, 20.0), 170.0);
        assert_eq!(clamp_delta(Some(90.0), 170.0, 20.0), 110.0);
        assert_eq!(clamp_delta(Some(90.0), 10.0, 20.0), 70.0);
        assert_eq!(clamp_delta(Some(90.0), 95.0, 20.0), 95.0);
    }

    #[test]
    fn test_clamp_delta_bad_inputs() {
        // Negative limit behaves like its magnitude
        assert_eq!(clamp_delta(Some(90.0), 170.0, -20.0), 110.0);
        assert_eq!(clamp_delta(Some(f32::NAN), 95.0, 20.0), 95.0);
        assert_eq!(clamp_delta(Some(90.0), 95.0, f32::NAN), 95.0);
        assert!(clamp_delta(Some(90.0), f32::NAN, 20.0).is_nan());
    }

    #[test]
    fn test_phase_limits() {
        let policy = SmoothingPolicy::new();
        assert_eq!(policy.max_delta(SwingPhase::Downswing), 60.0);
        assert_eq!(policy.max_delta(SwingPhase::Impact), 60.0);
        assert_eq!(policy.max_delta(SwingPhase::Backswing), 20.0);

        assert_eq!(policy.alpha(SwingPhase::Address), 0.2);
        assert_eq!(policy.alpha(SwingPhase::Finish), 0.2);
        assert_eq!(policy.alpha(SwingPhase::Impact), 0.7);
        assert_eq!(policy.alpha(SwingPhase::Idle), 0.5);
        assert_eq!(policy.alpha(SwingPhase::Top), 0.5);
    }

    #[test]
    fn test_apply_clamps_then_smooths() {
        let policy = SmoothingPolicy::new();
        // 90 -> 170 clamped to 110, then 0.5 * 110 + 0.5 * 90
        let smoothed = policy.apply(SwingPhase::Idle, Some(90.0), 170.0);
        assert!((smoothed - 100.0).abs() < 1e-4);

        // Downswing allows 60 degrees: 150, then 0.7 * 150 + 0.3 * 90
        let smoothed = policy.apply(SwingPhase::Downswing, Some(90.0), 170.0);
        assert!((smoothed - 132.0).abs() < 1e-3);
    }
}
