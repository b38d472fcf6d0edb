//! Swing record - one completed swing, immutable once emitted

use serde::{Deserialize, Serialize};

use crate::physics::SwingPhase;
use crate::pose::Point;

/// A segmented swing from Address→Backswing through a settled Finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingRecord {
    id: u32,
    start_time: f64,
    end_time: f64,
    /// Seconds
    duration: f64,
    hand_path: Vec<Point>,
    peak_phase: SwingPhase,
}

impl SwingRecord {
    pub(crate) fn new(id: u32, start_time: f64, end_time: f64, hand_path: Vec<Point>) -> Self {
        Self {
            id,
            start_time,
            end_time,
            duration: (end_time - start_time) / 1000.0,
            hand_path,
            peak_phase: SwingPhase::Finish,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Timestamp of the Backswing frame (ms)
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Timestamp of the frame that settled the Finish (ms)
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn hand_path(&self) -> &[Point] {
        &self.hand_path
    }

    pub fn peak_phase(&self) -> SwingPhase {
        self.peak_phase
    }
}
