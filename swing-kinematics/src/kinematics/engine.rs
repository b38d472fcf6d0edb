//! Kinematics engine - turns raw pose frames into a stable kinematic state
//!
//! Pipeline per frame:
//! 1. Body-visibility gate (bypassed mid-swing)
//! 2. Hand position + hand trail
//! 3. Joint angles: outlier clamp → adaptive EMA → history, or last-valid reuse
//! 4. Segment lengths, right-arm IK, club estimate
//! 5. Phase update from the hand's vertical velocity

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};

use crate::config::KinematicsConfig;
use crate::error::{KinematicsError, Result};
use crate::physics::{
    angle_at, distance, midpoint, ArmIk, ClubEstimator, ConfidenceGate, PhaseDetector,
    SmoothingPolicy, SwingPhase,
};
use crate::pose::{JointId, LandmarkName, Point, PoseFrame};

use super::state::{JointAngleSample, KinematicsState, SegmentLengths};

/// Per-joint filter memory
#[derive(Default)]
struct JointTrack {
    /// Previous smoothed angle
    smoothed: Option<f32>,
    /// Previous angular velocity
    velocity: Option<f32>,
    /// Ring buffer of smoothed angles
    history: VecDeque<f32>,
    /// Last valid sample for dropout bridging
    gate: ConfidenceGate<JointAngleSample>,
}

/// Stateful per-session kinematics processor
///
/// One engine per camera session; frames must arrive in timestamp order.
pub struct KinematicsEngine {
    config: KinematicsConfig,
    policy: SmoothingPolicy,
    club: ClubEstimator,
    phase: PhaseDetector,
    joints: BTreeMap<JointId, JointTrack>,
    hand_path: VecDeque<Point>,
    /// Timestamp of the last accepted frame (ms)
    last_timestamp: Option<f64>,
}

impl KinematicsEngine {
    pub fn new() -> Self {
        Self::with_config(KinematicsConfig::default())
    }

    pub fn with_config(config: KinematicsConfig) -> Self {
        Self {
            policy: SmoothingPolicy::from_config(&config),
            club: ClubEstimator::from_config(&config),
            phase: PhaseDetector::from_config(&config),
            joints: BTreeMap::new(),
            hand_path: VecDeque::with_capacity(config.hand_path_len + 1),
            last_timestamp: None,
            config,
        }
    }

    // ========================================================================
    // FRAME PROCESSING
    // ========================================================================

    /// Validate the frame, then process it
    ///
    /// Fails when a landmark used by any joint definition is absent from the
    /// frame, or when the timestamp goes backwards.
    pub fn try_process(&mut self, frame: &PoseFrame, timestamp: f64) -> Result<KinematicsState> {
        for name in JointId::required_landmarks() {
            frame.require(name)?;
        }

        if let Some(previous) = self.last_timestamp {
            if timestamp < previous {
                return Err(KinematicsError::NonMonotonicTimestamp {
                    previous,
                    current: timestamp,
                });
            }
        }

        Ok(self.process(frame, timestamp))
    }

    /// Process one frame; never fails, degrades on bad input
    pub fn process(&mut self, frame: &PoseFrame, timestamp: f64) -> KinematicsState {
        let phase = self.phase.phase();

        // 1. Visibility gate
        if !phase.is_active_swing() && !self.body_visible(frame) {
            trace!("frame at {:.1}ms rejected: body not visible", timestamp);
            self.phase.force_idle();
            return KinematicsState::empty(self.history(), timestamp);
        }

        // 2. Timing and hand trail
        let dt = match self.last_timestamp {
            Some(last) => ((timestamp - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp);

        let hand_pos = self.hand_position(frame);
        if let Some(pos) = hand_pos {
            if phase == SwingPhase::Address {
                self.hand_path.clear();
            } else {
                self.hand_path.push_back(pos);
                while self.hand_path.len() > self.config.hand_path_len {
                    self.hand_path.pop_front();
                }
            }
        }

        // 3. Joint angles
        let mut joints = BTreeMap::new();
        for joint in JointId::ALL {
            if let Some(sample) = self.measure_joint(frame, joint, phase, dt, timestamp) {
                joints.insert(joint, sample);
            }
        }

        // 4. Derived geometry
        let segment_lengths = self.segment_lengths(frame);
        let ik = self.solve_right_arm(frame);
        let club = self.club.estimate(frame);

        // 5. Phase
        let phase = match hand_pos {
            Some(pos) => self.phase.update(pos, dt),
            None => phase,
        };

        KinematicsState {
            joints,
            segment_lengths,
            ik,
            club,
            phase,
            hand_pos,
            history: self.history(),
            hand_path: self.hand_path(),
            timestamp,
        }
    }

    /// Clear all session state; the next frame is treated as the first
    pub fn reset(&mut self) {
        debug!("kinematics engine reset");
        self.phase.reset();
        self.joints.clear();
        self.hand_path.clear();
        self.last_timestamp = None;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn phase(&self) -> SwingPhase {
        self.phase.phase()
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    /// Copy of every joint's smoothed-angle history, oldest first
    pub fn history(&self) -> BTreeMap<JointId, Vec<f32>> {
        self.joints
            .iter()
            .filter(|(_, track)| !track.history.is_empty())
            .map(|(joint, track)| (*joint, track.history.iter().copied().collect()))
            .collect()
    }

    /// Copy of the hand trail, oldest first
    pub fn hand_path(&self) -> Vec<Point> {
        self.hand_path.iter().copied().collect()
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    /// Shoulder and hip of at least one side are visible
    fn body_visible(&self, frame: &PoseFrame) -> bool {
        let min = self.config.body_confidence;
        let side = |shoulder, hip| frame.confidence(shoulder) >= min && frame.confidence(hip) >= min;

        side(LandmarkName::LeftShoulder, LandmarkName::LeftHip)
            || side(LandmarkName::RightShoulder, LandmarkName::RightHip)
    }

    /// Wrist midpoint when both wrists are confident
    fn hand_position(&self, frame: &PoseFrame) -> Option<Point> {
        let min = self.config.hand_confidence;
        let left = frame.confident(LandmarkName::LeftWrist, min)?;
        let right = frame.confident(LandmarkName::RightWrist, min)?;
        Some(midpoint(left, right))
    }

    fn measure_joint(
        &mut self,
        frame: &PoseFrame,
        joint: JointId,
        phase: SwingPhase,
        dt: f32,
        timestamp: f64,
    ) -> Option<JointAngleSample> {
        let min = self.config.joint_confidence;
        let (a, b, c) = joint.landmarks();
        let points = (
            frame.confident(a, min),
            frame.confident(b, min),
            frame.confident(c, min),
        );

        let track = self.joints.entry(joint).or_default();

        let raw = match points {
            (Some(a), Some(b), Some(c)) => Some(angle_at(a, b, c)).filter(|raw| raw.is_finite()),
            _ => None,
        };
        let Some(raw) = raw else {
            let window = if phase == SwingPhase::Finish {
                self.config.finish_persistence_ms
            } else {
                self.config.persistence_ms
            };
            return track.gate.recall(timestamp, window);
        };

        let previous = track.smoothed;
        let smoothed = self.policy.apply(phase, previous, raw);

        let velocity = match previous {
            Some(prev) if dt > 0.0 => (smoothed - prev) / dt,
            _ => 0.0,
        };
        let acceleration = match track.velocity {
            Some(prev) if dt > 0.0 => (velocity - prev) / dt,
            _ => 0.0,
        };

        track.smoothed = Some(smoothed);
        track.velocity = Some(velocity);
        track.history.push_back(smoothed);
        while track.history.len() > self.config.history_len {
            track.history.pop_front();
        }

        let (min, max) = track
            .history
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        let sample = JointAngleSample {
            joint,
            angle_deg: smoothed,
            angular_velocity_deg_per_s: velocity,
            angular_acceleration_deg_per_s2: acceleration,
            min,
            max,
        };
        track.gate.store(sample, timestamp);

        Some(sample)
    }

    /// Left/right mean per segment; 0 unless all four endpoints are confident
    fn segment_lengths(&self, frame: &PoseFrame) -> SegmentLengths {
        use LandmarkName::*;

        let min = self.config.joint_confidence;
        let side = |(from, to): (LandmarkName, LandmarkName)| -> Option<f32> {
            Some(distance(frame.confident(from, min)?, frame.confident(to, min)?))
        };
        let mean_length = |[left, right]: [(LandmarkName, LandmarkName); 2]| -> f32 {
            match (side(left), side(right)) {
                (Some(l), Some(r)) => (l + r) / 2.0,
                _ => 0.0,
            }
        };

        SegmentLengths {
            upper_arm: mean_length([(LeftShoulder, LeftElbow), (RightShoulder, RightElbow)]),
            forearm: mean_length([(LeftElbow, LeftWrist), (RightElbow, RightWrist)]),
            thigh: mean_length([(LeftHip, LeftKnee), (RightHip, RightKnee)]),
            shin: mean_length([(LeftKnee, LeftAnkle), (RightKnee, RightAnkle)]),
        }
    }

    /// Reconstruct the right arm towards the measured wrist
    fn solve_right_arm(&self, frame: &PoseFrame) -> Option<crate::physics::IkResult> {
        let min = self.config.joint_confidence;
        let shoulder = frame.confident(LandmarkName::RightShoulder, min)?;
        let elbow = frame.confident(LandmarkName::RightElbow, min)?;
        let wrist = frame.confident(LandmarkName::RightWrist, min)?;

        ArmIk::from_landmarks(shoulder, elbow, wrist).solve(shoulder, wrist, elbow)
    }
}

impl Default for KinematicsEngine {
    fn default() -> Self {
        Self::new()
    }
}
