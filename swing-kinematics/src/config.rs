//! Tuning constants for the engine and the swing tracker
//!
//! Defaults are the values the capture app ships with. The JS bridge may
//! pass a partial object; missing fields fall back to these defaults.

use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};

/// Engine configuration (thresholds in pixels, milliseconds or degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KinematicsConfig {
    /// Shoulder + hip confidence for the body-visibility gate
    pub body_confidence: f32,
    /// Landmark confidence for joint angles, segment lengths and IK
    pub joint_confidence: f32,
    /// Wrist confidence for the hand position
    pub hand_confidence: f32,
    /// Wrist/elbow confidence for the club estimate
    pub club_confidence: f32,

    /// Samples kept per joint history
    pub history_len: usize,
    /// Samples kept in the hand trail
    pub hand_path_len: usize,
    /// Hand-Y samples kept for vertical velocity
    pub velocity_samples: usize,

    /// Hand vertical velocity threshold (px/s)
    pub velocity_threshold: f32,
    /// Stable frames required in IDLE before Address
    pub idle_stable_frames: u32,
    /// Stable Address frames required before a Backswing can start
    pub address_ready_frames: u32,
    /// Hands below this y (px) let Finish return to Address
    pub finish_address_y: f32,

    /// Max age of a reused joint sample (ms)
    pub persistence_ms: f64,
    /// Same, while in Finish
    pub finish_persistence_ms: f64,

    /// Max per-frame angle change during Downswing/Impact (deg)
    pub fast_max_delta: f32,
    /// Max per-frame angle change otherwise (deg)
    pub max_delta: f32,

    /// EMA alpha in Address/Finish
    pub alpha_static: f32,
    /// EMA alpha in Downswing/Impact
    pub alpha_fast: f32,
    /// EMA alpha otherwise
    pub alpha_default: f32,

    /// Club length as a multiple of the mean forearm length
    pub club_length_ratio: f32,
    /// Shortest usable combined forearm vector (px)
    pub club_min_direction_px: f32,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            body_confidence: 0.2,
            joint_confidence: 0.3,
            hand_confidence: 0.3,
            club_confidence: 0.4,
            history_len: 120,
            hand_path_len: 50,
            velocity_samples: 10,
            velocity_threshold: 80.0,
            idle_stable_frames: 30,
            address_ready_frames: 15, // ~0.5s at 30fps
            finish_address_y: 300.0,
            persistence_ms: 500.0,
            finish_persistence_ms: 1000.0,
            fast_max_delta: 60.0,
            max_delta: 20.0,
            alpha_static: 0.2,
            alpha_fast: 0.7,
            alpha_default: 0.5,
            club_length_ratio: 2.5,
            club_min_direction_px: 10.0,
        }
    }
}

impl KinematicsConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("bodyConfidence", self.body_confidence),
            ("jointConfidence", self.joint_confidence),
            ("handConfidence", self.hand_confidence),
            ("clubConfidence", self.club_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        for (name, value) in [
            ("alphaStatic", self.alpha_static),
            ("alphaFast", self.alpha_fast),
            ("alphaDefault", self.alpha_default),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(format!("{name} must be within (0, 1], got {value}")));
            }
        }

        for (name, value) in [
            ("historyLen", self.history_len),
            ("handPathLen", self.hand_path_len),
            ("velocitySamples", self.velocity_samples),
        ] {
            if value == 0 {
                return Err(invalid(format!("{name} must be positive")));
            }
        }

        for (name, value) in [
            ("velocityThreshold", self.velocity_threshold),
            ("fastMaxDelta", self.fast_max_delta),
            ("maxDelta", self.max_delta),
            ("clubLengthRatio", self.club_length_ratio),
            ("clubMinDirectionPx", self.club_min_direction_px),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!("{name} must be a non-negative number, got {value}")));
            }
        }

        if self.persistence_ms < 0.0 || self.finish_persistence_ms < 0.0 {
            return Err(invalid("persistence windows must be non-negative".to_string()));
        }

        Ok(())
    }
}

/// Swing tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Consecutive Finish frames that complete a swing (~0.5s at 30fps)
    pub finish_stable_frames: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            finish_stable_frames: 15,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.finish_stable_frames == 0 {
            return Err(invalid("finishStableFrames must be positive".to_string()));
        }
        Ok(())
    }
}

/// Combined settings accepted by the JS session constructor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub kinematics: KinematicsConfig,
    pub tracker: TrackerConfig,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        self.kinematics.validate()?;
        self.tracker.validate()
    }
}

fn invalid(message: String) -> KinematicsError {
    KinematicsError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(KinematicsConfig::default().validate().is_ok());
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_alpha() {
        let config = KinematicsConfig {
            alpha_fast: 0.0,
            ..KinematicsConfig::default()
        };
        assert!(matches!(config.validate(), Err(KinematicsError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: KinematicsConfig =
            serde_json::from_str(r#"{ "velocityThreshold": 120.0 }"#).unwrap();
        assert_eq!(config.velocity_threshold, 120.0);
        assert_eq!(config.history_len, 120);
        assert_eq!(config.persistence_ms, 500.0);
    }

    #[test]
    fn test_session_config_sections() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "tracker": { "finishStableFrames": 0 } }"#).unwrap();
        assert_eq!(config.kinematics, KinematicsConfig::default());
        assert!(matches!(config.validate(), Err(KinematicsError::InvalidConfig(_))));
    }
}
