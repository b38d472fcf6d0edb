//! Per-frame kinematic output - what the renderer and tracker consume

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::physics::{ClubEstimate, IkResult, SwingPhase};
use crate::pose::{JointId, Point};

/// Smoothed angle of one joint for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointAngleSample {
    pub joint: JointId,
    /// Degrees, in [0, 180]
    pub angle_deg: f32,
    pub angular_velocity_deg_per_s: f32,
    pub angular_acceleration_deg_per_s2: f32,
    /// Min over the joint's history
    pub min: f32,
    /// Max over the joint's history
    pub max: f32,
}

/// Mean limb segment lengths in pixels (0 when not measurable this frame)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentLengths {
    pub upper_arm: f32,
    pub forearm: f32,
    pub thigh: f32,
    pub shin: f32,
}

/// Engine output for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KinematicsState {
    pub joints: BTreeMap<JointId, JointAngleSample>,
    pub segment_lengths: SegmentLengths,
    pub ik: Option<IkResult>,
    pub club: Option<ClubEstimate>,
    pub phase: SwingPhase,
    pub hand_pos: Option<Point>,
    /// Snapshot of each joint's smoothed-angle history, oldest first
    pub history: BTreeMap<JointId, Vec<f32>>,
    /// Snapshot of the hand trail, oldest first
    pub hand_path: Vec<Point>,
    pub timestamp: f64,
}

impl KinematicsState {
    /// State for a frame rejected by the visibility gate
    pub fn empty(history: BTreeMap<JointId, Vec<f32>>, timestamp: f64) -> Self {
        Self {
            joints: BTreeMap::new(),
            segment_lengths: SegmentLengths::default(),
            ik: None,
            club: None,
            phase: SwingPhase::Idle,
            hand_pos: None,
            history,
            hand_path: Vec::new(),
            timestamp,
        }
    }

    pub fn joint(&self, joint: JointId) -> Option<&JointAngleSample> {
        self.joints.get(&joint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_keeps_history() {
        let mut history = BTreeMap::new();
        history.insert(JointId::LeftKnee, vec![170.0, 171.0]);
        let state = KinematicsState::empty(history, 42.0);

        assert!(state.joints.is_empty());
        assert!(state.ik.is_none());
        assert_eq!(state.phase, SwingPhase::Idle);
        assert_eq!(state.segment_lengths, SegmentLengths::default());
        assert_eq!(state.history[&JointId::LeftKnee].len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let state = KinematicsState::empty(BTreeMap::new(), 0.0);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "IDLE");
        assert!(json.get("segmentLengths").is_some());
        assert!(json.get("handPath").is_some());
        assert!(json["ik"].is_null());
    }
}
