//! Kinematics module - per-frame engine and its output state
//!
//! Re-exports only. All logic in submodules.

mod engine;
mod state;

pub use engine::KinematicsEngine;
pub use state::{JointAngleSample, KinematicsState, SegmentLengths};
