//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod keypoints;
mod session;

pub use keypoints::{pose_from_flat, pose_from_keypoints, RawKeypoint, FLAT_STRIDE};
pub use session::SwingSession;
