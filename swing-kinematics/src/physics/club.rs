//! Club estimate - implement line projected from both forearms
//!
//! Grip at the wrist midpoint, direction from the mean elbow→wrist vector.
//! The club is never detected directly, so this is a proxy only.

use serde::{Deserialize, Serialize};

use crate::config::KinematicsConfig;
use crate::pose::{LandmarkName, Point, PoseFrame};

use super::geometry::{distance, midpoint};

/// Estimated club line for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubEstimate {
    pub grip: Point,
    pub head: Point,
    /// Bearing of the club line in degrees (atan2, screen space)
    pub angle_deg: f32,
}

/// Projects the club from forearm landmarks
pub struct ClubEstimator {
    min_confidence: f32,
    length_ratio: f32,
    min_direction_px: f32,
}

impl ClubEstimator {
    pub fn new() -> Self {
        Self::from_config(&KinematicsConfig::default())
    }

    pub fn from_config(config: &KinematicsConfig) -> Self {
        Self {
            min_confidence: config.club_confidence,
            length_ratio: config.club_length_ratio,
            min_direction_px: config.club_min_direction_px,
        }
    }

    fn point(&self, frame: &PoseFrame, name: LandmarkName) -> Option<Point> {
        frame
            .get(name)
            .filter(|lm| lm.confidence >= self.min_confidence && lm.is_finite())
            .map(|lm| lm.position())
    }

    /// None when a wrist or elbow is missing/unconfident or the forearms
    /// give no usable direction
    pub fn estimate(&self, frame: &PoseFrame) -> Option<ClubEstimate> {
        let left_wrist = self.point(frame, LandmarkName::LeftWrist)?;
        let right_wrist = self.point(frame, LandmarkName::RightWrist)?;
        let left_elbow = self.point(frame, LandmarkName::LeftElbow)?;
        let right_elbow = self.point(frame, LandmarkName::RightElbow)?;

        let grip = midpoint(left_wrist, right_wrist);

        let left_dir = left_wrist.to_vector() - left_elbow.to_vector();
        let right_dir = right_wrist.to_vector() - right_elbow.to_vector();
        let direction = (left_dir + right_dir) / 2.0;

        let magnitude = direction.norm();
        if magnitude < self.min_direction_px || magnitude == 0.0 {
            return None;
        }

        let forearm = (distance(left_elbow, left_wrist) + distance(right_elbow, right_wrist)) / 2.0;
        let length = forearm * self.length_ratio;
        let head = grip.to_vector() + direction / magnitude * length;

        Some(ClubEstimate {
            grip,
            head: head.into(),
            angle_deg: direction.y.atan2(direction.x).to_degrees(),
        })
    }
}

impl Default for ClubEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;

    fn arms(confidence: f32, left_elbow: Point, right_elbow: Point) -> PoseFrame {
        [
            Landmark::new(LandmarkName::LeftWrist, 190.0, 300.0, confidence),
            Landmark::new(LandmarkName::RightWrist, 210.0, 300.0, confidence),
            Landmark::new(LandmarkName::LeftElbow, left_elbow.x, left_elbow.y, confidence),
            Landmark::new(LandmarkName::RightElbow, right_elbow.x, right_elbow.y, confidence),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_club_points_down_along_forearms() {
        let frame = arms(0.9, Point::new(190.0, 240.0), Point::new(210.0, 240.0));
        let club = ClubEstimator::new().estimate(&frame).unwrap();

        assert_eq!(club.grip, Point::new(200.0, 300.0));
        // forearm 60px * 2.5 = 150px straight down
        assert!((club.head.x - 200.0).abs() < 1e-3);
        assert!((club.head.y - 450.0).abs() < 1e-3);
        assert!((club.angle_deg - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_low_confidence_rejected() {
        let frame = arms(0.39, Point::new(190.0, 240.0), Point::new(210.0, 240.0));
        assert!(ClubEstimator::new().estimate(&frame).is_none());

        // Exactly at the threshold is accepted
        let frame = arms(0.4, Point::new(190.0, 240.0), Point::new(210.0, 240.0));
        assert!(ClubEstimator::new().estimate(&frame).is_some());
    }

    #[test]
    fn test_short_direction_rejected() {
        // Opposing forearms cancel out
        let frame = arms(0.9, Point::new(190.0, 240.0), Point::new(210.0, 360.0));
        assert!(ClubEstimator::new().estimate(&frame).is_none());
    }

    #[test]
    fn test_missing_elbow_rejected() {
        let frame: PoseFrame = [
            Landmark::new(LandmarkName::LeftWrist, 190.0, 300.0, 0.9),
            Landmark::new(LandmarkName::RightWrist, 210.0, 300.0, 0.9),
            Landmark::new(LandmarkName::LeftElbow, 190.0, 240.0, 0.9),
        ]
        .into_iter()
        .collect();
        assert!(ClubEstimator::new().estimate(&frame).is_none());
    }
}
