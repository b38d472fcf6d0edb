//! Pose frame - one instant of landmarks from the detector

use crate::error::{KinematicsError, Result};

use super::landmarks::{Landmark, LandmarkName, Point};

/// Ordered landmark set for one video frame
///
/// Input only: the engine reads it during `process()` and keeps nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Add or replace a landmark (last write wins)
    pub fn insert(&mut self, landmark: Landmark) {
        match self.landmarks.iter_mut().find(|lm| lm.name == landmark.name) {
            Some(existing) => *existing = landmark,
            None => self.landmarks.push(landmark),
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn get(&self, name: LandmarkName) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.name == name)
    }

    /// Like `get`, but a missing name is an error for the caller
    pub fn require(&self, name: LandmarkName) -> Result<&Landmark> {
        self.get(name).ok_or(KinematicsError::MissingLandmark(name))
    }

    /// Confidence of a landmark, 0 when absent
    pub fn confidence(&self, name: LandmarkName) -> f32 {
        self.get(name).map_or(0.0, |lm| lm.confidence)
    }

    /// Landmark position if present, finite, and with confidence strictly above `min`
    pub fn confident(&self, name: LandmarkName, min: f32) -> Option<Point> {
        self.get(name)
            .filter(|lm| lm.confidence > min && lm.is_finite())
            .map(Landmark::position)
    }
}

impl FromIterator<Landmark> for PoseFrame {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        let mut frame = PoseFrame::default();
        for landmark in iter {
            frame.insert(landmark);
        }
        frame
    }
}
