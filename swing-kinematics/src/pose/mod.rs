//! Pose module - landmark input types
//!
//! Re-exports only. All logic in submodules.

mod frame;
mod joints;
mod landmarks;

pub use frame::PoseFrame;
pub use joints::JointId;
pub use landmarks::{Landmark, LandmarkName, Point, LANDMARK_COUNT};
