//! Physics module - geometry, IK and swing phase detection
//!
//! Re-exports only. All logic in submodules.

mod geometry;
mod arm_ik;
mod club;
mod kinematic_constraints;
mod confidence_gate;
mod velocity;
mod phase;

pub use geometry::{angle_at, distance, ema, midpoint};
pub use arm_ik::{solve, solve_chain, ArmIk, BendDirection, ChainPose, IkAngles, IkResult};
pub use club::{ClubEstimate, ClubEstimator};
pub use kinematic_constraints::{clamp_delta, SmoothingPolicy};
pub use confidence_gate::ConfidenceGate;
pub use velocity::{VerticalVelocity, VELOCITY_SAMPLES};
pub use phase::{PhaseDetector, SwingPhase};
