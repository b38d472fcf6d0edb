//! Joint definitions - fixed landmark triples for the six tracked joints

use std::fmt;

use serde::{Deserialize, Serialize};

use super::landmarks::LandmarkName;

/// Tracked hinge joint; the angle is measured at the middle landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JointId {
    #[serde(rename = "Right Elbow")]
    RightElbow,
    #[serde(rename = "Left Elbow")]
    LeftElbow,
    #[serde(rename = "Right Knee")]
    RightKnee,
    #[serde(rename = "Left Knee")]
    LeftKnee,
    #[serde(rename = "Right Shoulder")]
    RightShoulder,
    #[serde(rename = "Left Shoulder")]
    LeftShoulder,
}

impl JointId {
    pub const ALL: [JointId; 6] = [
        JointId::RightElbow,
        JointId::LeftElbow,
        JointId::RightKnee,
        JointId::LeftKnee,
        JointId::RightShoulder,
        JointId::LeftShoulder,
    ];

    /// (proximal, hinge, distal)
    pub const fn landmarks(&self) -> (LandmarkName, LandmarkName, LandmarkName) {
        use LandmarkName::*;
        match self {
            JointId::RightElbow => (RightShoulder, RightElbow, RightWrist),
            JointId::LeftElbow => (LeftShoulder, LeftElbow, LeftWrist),
            JointId::RightKnee => (RightHip, RightKnee, RightAnkle),
            JointId::LeftKnee => (LeftHip, LeftKnee, LeftAnkle),
            JointId::RightShoulder => (RightHip, RightShoulder, RightElbow),
            JointId::LeftShoulder => (LeftHip, LeftShoulder, LeftElbow),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            JointId::RightElbow => "Right Elbow",
            JointId::LeftElbow => "Left Elbow",
            JointId::RightKnee => "Right Knee",
            JointId::LeftKnee => "Left Knee",
            JointId::RightShoulder => "Right Shoulder",
            JointId::LeftShoulder => "Left Shoulder",
        }
    }

    /// Every landmark referenced by any joint definition
    pub fn required_landmarks() -> Vec<LandmarkName> {
        let mut names: Vec<LandmarkName> = Self::ALL
            .iter()
            .flat_map(|joint| {
                let (a, b, c) = joint.landmarks();
                [a, b, c]
            })
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_landmarks_cover_limbs() {
        let names = JointId::required_landmarks();
        // shoulders, elbows, wrists, hips, knees, ankles
        assert_eq!(names.len(), 12);
        assert!(names.contains(&LandmarkName::LeftAnkle));
        assert!(!names.contains(&LandmarkName::Nose));
    }

    #[test]
    fn test_serialized_key_is_display_name() {
        let json = serde_json::to_string(&JointId::RightShoulder).unwrap();
        assert_eq!(json, "\"Right Shoulder\"");
        assert_eq!(JointId::LeftKnee.to_string(), "Left Knee");
    }
}
