//! Swing segmentation - cut the phase stream into discrete swings
//!
//! A swing starts on Address → Backswing, accumulates the hand trail, and
//! completes after the Finish phase has held for a number of consecutive
//! frames. Falling back to IDLE/Address straight out of Downswing or
//! FollowThrough discards it.

use log::{info, warn};

use crate::config::TrackerConfig;
use crate::physics::SwingPhase;
use crate::pose::Point;

use super::record::SwingRecord;

/// Swing tracker fed once per frame with the engine's phase
pub struct SwingTracker {
    history: Vec<SwingRecord>,
    /// Id of the most recently started swing
    swing_id: u32,
    is_swinging: bool,
    start_time: f64,
    hand_path: Vec<Point>,
    last_phase: SwingPhase,
    /// Consecutive Finish frames of the current swing
    finish_counter: u32,
    finish_stable_frames: u32,
}

impl SwingTracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            history: Vec::new(),
            swing_id: 0,
            is_swinging: false,
            start_time: 0.0,
            hand_path: Vec::new(),
            last_phase: SwingPhase::Idle,
            finish_counter: 0,
            finish_stable_frames: config.finish_stable_frames,
        }
    }

    /// Feed one frame; returns the record when this frame completes a swing
    pub fn process_phase(
        &mut self,
        phase: SwingPhase,
        hand_pos: Option<Point>,
        timestamp: f64,
    ) -> Option<SwingRecord> {
        let mut completed = None;

        // Start
        if !self.is_swinging
            && self.last_phase == SwingPhase::Address
            && phase == SwingPhase::Backswing
        {
            self.swing_id += 1;
            self.is_swinging = true;
            self.start_time = timestamp;
            self.hand_path.clear();
            self.finish_counter = 0;
            info!("swing {} started at {:.1}ms", self.swing_id, timestamp);
        }

        // Accumulate
        if self.is_swinging {
            if let Some(pos) = hand_pos {
                self.hand_path.push(pos);
            }
        }

        // Complete
        if self.is_swinging {
            if phase == SwingPhase::Finish {
                self.finish_counter += 1;
                if self.finish_counter >= self.finish_stable_frames {
                    let record = SwingRecord::new(
                        self.swing_id,
                        self.start_time,
                        timestamp,
                        std::mem::take(&mut self.hand_path),
                    );
                    info!(
                        "swing {} completed: {:.2}s, {} hand samples",
                        record.id(),
                        record.duration(),
                        record.hand_path().len()
                    );
                    self.history.push(record.clone());
                    self.is_swinging = false;
                    self.finish_counter = 0;
                    completed = Some(record);
                }
            } else {
                self.finish_counter = 0;
            }
        }

        // Abort
        if self.is_swinging
            && matches!(phase, SwingPhase::Idle | SwingPhase::Address)
            && matches!(self.last_phase, SwingPhase::Downswing | SwingPhase::FollowThrough)
        {
            warn!(
                "swing {} aborted: {} -> {} before a settled Finish",
                self.swing_id, self.last_phase, phase
            );
            self.abort();
        }

        self.last_phase = phase;
        completed
    }

    /// Discard the swing in progress without a record; history is kept
    pub fn cancel_swing(&mut self) {
        if self.is_swinging {
            warn!("swing {} cancelled", self.swing_id);
        }
        self.abort();
        self.last_phase = SwingPhase::Idle;
    }

    fn abort(&mut self) {
        self.is_swinging = false;
        self.finish_counter = 0;
        self.hand_path.clear();
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Copy of every completed swing, oldest first
    pub fn history(&self) -> Vec<SwingRecord> {
        self.history.clone()
    }

    pub fn records(&self) -> &[SwingRecord] {
        &self.history
    }

    pub fn swing(&self, id: u32) -> Option<&SwingRecord> {
        self.history.iter().find(|record| record.id() == id)
    }

    /// Id of the swing in progress, 0 when not swinging
    pub fn current_swing_id(&self) -> u32 {
        if self.is_swinging {
            self.swing_id
        } else {
            0
        }
    }

    pub fn is_swinging(&self) -> bool {
        self.is_swinging
    }

    pub fn last_phase(&self) -> SwingPhase {
        self.last_phase
    }

    /// Drop all records, restart ids at 1 and discard any swing in progress
    pub fn clear_history(&mut self) {
        if self.is_swinging {
            warn!("swing {} discarded by history clear", self.swing_id);
        }
        self.history.clear();
        self.swing_id = 0;
        self.abort();
    }
}

impl Default for SwingTracker {
    fn default() -> Self {
        Self::new()
    }
}
