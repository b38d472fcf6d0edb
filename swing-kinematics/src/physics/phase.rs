//! Swing phase detection from hand vertical velocity
//!
//! Replaces pose classification with simple velocity rules on the hand
//! midpoint. Screen y grows downward: negative velocity = hands rising.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::KinematicsConfig;
use crate::pose::Point;

use super::velocity::VerticalVelocity;

/// Golf swing phases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwingPhase {
    #[serde(rename = "IDLE")]
    Idle,
    Address,
    Backswing,
    Top,
    Downswing,
    Impact,
    FollowThrough,
    Finish,
}

impl SwingPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SwingPhase::Idle => "IDLE",
            SwingPhase::Address => "Address",
            SwingPhase::Backswing => "Backswing",
            SwingPhase::Top => "Top",
            SwingPhase::Downswing => "Downswing",
            SwingPhase::Impact => "Impact",
            SwingPhase::FollowThrough => "FollowThrough",
            SwingPhase::Finish => "Finish",
        }
    }

    /// Anything past Address; the visibility gate is bypassed in these
    pub fn is_active_swing(&self) -> bool {
        !matches!(self, SwingPhase::Idle | SwingPhase::Address)
    }

    /// Downswing and Impact move fast enough to need looser smoothing
    pub fn is_fast(&self) -> bool {
        matches!(self, SwingPhase::Downswing | SwingPhase::Impact)
    }

    pub fn is_static(&self) -> bool {
        matches!(self, SwingPhase::Address | SwingPhase::Finish)
    }
}

impl Default for SwingPhase {
    fn default() -> Self {
        SwingPhase::Idle
    }
}

impl fmt::Display for SwingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase state machine driven by hand vertical velocity
pub struct PhaseDetector {
    phase: SwingPhase,
    velocity: VerticalVelocity,
    /// Consecutive still frames while in IDLE
    idle_counter: u32,
    /// Consecutive settled frames while in Address
    address_counter: u32,
    /// Velocity threshold V (px/s)
    threshold: f32,
    idle_stable_frames: u32,
    address_ready_frames: u32,
    finish_address_y: f32,
}

impl PhaseDetector {
    pub fn new() -> Self {
        Self::from_config(&KinematicsConfig::default())
    }

    pub fn from_config(config: &KinematicsConfig) -> Self {
        Self {
            phase: SwingPhase::Idle,
            velocity: VerticalVelocity::with_capacity(config.velocity_samples),
            idle_counter: 0,
            address_counter: 0,
            threshold: config.velocity_threshold,
            idle_stable_frames: config.idle_stable_frames,
            address_ready_frames: config.address_ready_frames,
            finish_address_y: config.finish_address_y,
        }
    }

    /// Advance the machine with this frame's hand position
    pub fn update(&mut self, hand_pos: Point, dt: f32) -> SwingPhase {
        let v = self.velocity.update(hand_pos.y, dt);

        let threshold = self.threshold;
        let previous = self.phase;

        self.phase = match previous {
            SwingPhase::Idle => {
                if v.abs() < threshold / 3.0 {
                    self.idle_counter += 1;
                } else {
                    self.idle_counter = 0;
                }
                if self.idle_counter > self.idle_stable_frames {
                    self.idle_counter = 0;
                    self.address_counter = 0;
                    SwingPhase::Address
                } else {
                    SwingPhase::Idle
                }
            }
            SwingPhase::Address => {
                // Counter reflects the frames before this one
                if v < -1.2 * threshold && self.address_counter > self.address_ready_frames {
                    self.address_counter = 0;
                    SwingPhase::Backswing
                } else {
                    if v.abs() < threshold {
                        self.address_counter += 1;
                    } else {
                        self.address_counter = 0;
                    }
                    SwingPhase::Address
                }
            }
            SwingPhase::Backswing if v >= 0.0 => SwingPhase::Top,
            SwingPhase::Top if v > 2.0 * threshold => SwingPhase::Downswing,
            SwingPhase::Downswing if v < 0.0 => SwingPhase::Impact,
            SwingPhase::Impact => SwingPhase::FollowThrough,
            SwingPhase::FollowThrough if v.abs() < threshold => SwingPhase::Finish,
            SwingPhase::Finish if hand_pos.y > self.finish_address_y && v.abs() < threshold => {
                self.address_counter = 0;
                SwingPhase::Address
            }
            unchanged => unchanged,
        };

        if self.phase != previous {
            debug!("swing phase {} -> {} (vy {:.1} px/s)", previous, self.phase, v);
        }

        self.phase
    }

    /// Visibility gate failed: drop to IDLE and restart the stability counts
    pub fn force_idle(&mut self) {
        if self.phase != SwingPhase::Idle {
            debug!("swing phase {} -> IDLE (body not visible)", self.phase);
        }
        self.phase = SwingPhase::Idle;
        self.idle_counter = 0;
        self.address_counter = 0;
    }

    pub fn phase(&self) -> SwingPhase {
        self.phase
    }

    /// Reset detector state
    pub fn reset(&mut self) {
        self.phase = SwingPhase::Idle;
        self.velocity.clear();
        self.idle_counter = 0;
        self.address_counter = 0;
    }
}

impl Default for PhaseDetector {
    fn default() -> Self {
        Self::new()
    }
}
