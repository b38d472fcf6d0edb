//! Landmark vocabulary and point types
//!
//! Names follow the BlazePose keypoint set (33 total) in detector index
//! order, so a flat array from the detector maps onto names by index.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;

// ============================================================================
// POINT
// ============================================================================

/// 2D position in pixels (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vector(self) -> Vector2<f32> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f32>> for Point {
    fn from(v: Vector2<f32>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for Vector2<f32> {
    fn from(p: Point) -> Self {
        p.to_vector()
    }
}

// ============================================================================
// LANDMARK NAMES (BlazePose - 33 total)
// ============================================================================

/// Number of landmarks emitted by the pose detector per frame
pub const LANDMARK_COUNT: usize = 33;

macro_rules! landmark_names {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// One anatomical point in the detector vocabulary
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum LandmarkName {
            $($variant),+
        }

        impl LandmarkName {
            /// All names in detector index order
            pub const ALL: [LandmarkName; LANDMARK_COUNT] = [$(LandmarkName::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(LandmarkName::$variant => $name),+
                }
            }
        }

        impl FromStr for LandmarkName {
            type Err = KinematicsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(LandmarkName::$variant),)+
                    other => Err(KinematicsError::UnknownLandmark(other.to_string())),
                }
            }
        }
    };
}

landmark_names! {
    Nose => "nose",
    LeftEyeInner => "left_eye_inner",
    LeftEye => "left_eye",
    LeftEyeOuter => "left_eye_outer",
    RightEyeInner => "right_eye_inner",
    RightEye => "right_eye",
    RightEyeOuter => "right_eye_outer",
    LeftEar => "left_ear",
    RightEar => "right_ear",
    MouthLeft => "mouth_left",
    MouthRight => "mouth_right",
    LeftShoulder => "left_shoulder",
    RightShoulder => "right_shoulder",
    LeftElbow => "left_elbow",
    RightElbow => "right_elbow",
    LeftWrist => "left_wrist",
    RightWrist => "right_wrist",
    LeftPinky => "left_pinky",
    RightPinky => "right_pinky",
    LeftIndex => "left_index",
    RightIndex => "right_index",
    LeftThumb => "left_thumb",
    RightThumb => "right_thumb",
    LeftHip => "left_hip",
    RightHip => "right_hip",
    LeftKnee => "left_knee",
    RightKnee => "right_knee",
    LeftAnkle => "left_ankle",
    RightAnkle => "right_ankle",
    LeftHeel => "left_heel",
    RightHeel => "right_heel",
    LeftFootIndex => "left_foot_index",
    RightFootIndex => "right_foot_index",
}

impl LandmarkName {
    /// Name for a detector output index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LANDMARK
// ============================================================================

/// A single tracked point with detector confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: LandmarkName,
    pub x: f32,
    pub y: f32,
    /// Always within [0, 1]
    pub confidence: f32,
}

impl Landmark {
    /// Confidence is clamped into [0, 1]; a NaN confidence or a
    /// non-finite coordinate counts as absent (0)
    pub fn new(name: LandmarkName, x: f32, y: f32, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() || !x.is_finite() || !y.is_finite() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self { name, x, y, confidence }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
