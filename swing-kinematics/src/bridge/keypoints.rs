//! Keypoint conversion - detector output to `PoseFrame`
//!
//! Two input shapes arrive from JavaScript:
//! - a keypoint array `[{x, y, score?, name?}, ...]`
//! - a flat Float32Array of 99 values (33 landmarks × x, y, score)

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{KinematicsError, Result};
use crate::pose::{Landmark, LandmarkName, PoseFrame, LANDMARK_COUNT};

/// Values per landmark in the flat layout
pub const FLAT_STRIDE: usize = 3;

/// One keypoint as produced by the pose detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawKeypoint {
    pub x: f32,
    pub y: f32,
    /// Missing score counts as zero confidence
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Build a frame from detector keypoints
///
/// Unnamed keypoints take the landmark name of their array index.
/// Keypoints with unknown names are skipped.
pub fn pose_from_keypoints(keypoints: &[RawKeypoint]) -> PoseFrame {
    keypoints
        .iter()
        .enumerate()
        .filter_map(|(i, kp)| {
            let name = match &kp.name {
                Some(name) => match name.parse::<LandmarkName>() {
                    Ok(name) => name,
                    Err(err) => {
                        debug!("skipping keypoint {}: {}", i, err);
                        return None;
                    }
                },
                None => LandmarkName::from_index(i)?,
            };
            Some(Landmark::new(name, kp.x, kp.y, kp.score.unwrap_or(0.0)))
        })
        .collect()
}

/// Build a frame from the flat layout (x, y, score per landmark)
pub fn pose_from_flat(data: &[f32]) -> Result<PoseFrame> {
    let expected = LANDMARK_COUNT * FLAT_STRIDE;
    if data.len() != expected {
        warn!("Invalid landmark data length: {} (expected {})", data.len(), expected);
        return Err(KinematicsError::InvalidFrameLength {
            expected,
            actual: data.len(),
        });
    }

    Ok(data
        .chunks_exact(FLAT_STRIDE)
        .zip(LandmarkName::ALL)
        .map(|(values, name)| Landmark::new(name, values[0], values[1], values[2]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_layout_maps_by_index() {
        let mut data = vec![0.0; 99];
        // right_wrist = index 16
        data[16 * 3] = 120.0;
        data[16 * 3 + 1] = 340.0;
        data[16 * 3 + 2] = 0.8;

        let frame = pose_from_flat(&data).unwrap();
        assert_eq!(frame.len(), LANDMARK_COUNT);
        let wrist = frame.get(LandmarkName::RightWrist).unwrap();
        assert_eq!((wrist.x, wrist.y), (120.0, 340.0));
        assert!((wrist.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_flat_layout_rejects_bad_length() {
        match pose_from_flat(&[0.0; 98]) {
            Err(KinematicsError::InvalidFrameLength { expected, actual }) => {
                assert_eq!(expected, 99);
                assert_eq!(actual, 98);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_keypoints_by_name_and_index() {
        let keypoints: Vec<RawKeypoint> = serde_json::from_str(
            r#"[
                {"x": 1.0, "y": 2.0, "score": 0.9},
                {"x": 3.0, "y": 4.0, "score": 0.7, "name": "left_hip"},
                {"x": 5.0, "y": 6.0, "name": "tail"},
                {"x": 7.0, "y": 8.0, "name": "right_knee"}
            ]"#,
        )
        .unwrap();

        let frame = pose_from_keypoints(&keypoints);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.get(LandmarkName::Nose).map(|lm| lm.x), Some(1.0));
        assert_eq!(frame.get(LandmarkName::LeftHip).map(|lm| lm.confidence), Some(0.7));
        // No score means zero confidence
        assert_eq!(frame.confidence(LandmarkName::RightKnee), 0.0);
        assert!(frame.get(LandmarkName::RightKnee).is_some());
    }

    #[test]
    fn test_extra_unnamed_keypoints_ignored() {
        let keypoints: Vec<RawKeypoint> = (0..40)
            .map(|i| RawKeypoint { x: i as f32, y: 0.0, score: Some(1.0), name: None })
            .collect();
        assert_eq!(pose_from_keypoints(&keypoints).len(), LANDMARK_COUNT);
    }
}
