//! Swing Kinematics - per-frame golf swing analysis from 2D pose landmarks
//!
//! Entry point for the WASM module and the native library. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

pub mod bridge;
pub mod config;
pub mod error;
pub mod export;
pub mod kinematics;
pub mod physics;
pub mod pose;
pub mod segmentation;

use wasm_bindgen::prelude::*;

pub use bridge::SwingSession;
pub use config::{KinematicsConfig, SessionConfig, TrackerConfig};
pub use error::{KinematicsError, Result};
pub use kinematics::{JointAngleSample, KinematicsEngine, KinematicsState, SegmentLengths};
pub use physics::{ClubEstimate, IkResult, SwingPhase};
pub use pose::{JointId, Landmark, LandmarkName, Point, PoseFrame};
pub use segmentation::{SwingRecord, SwingTracker};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// Level is one of "trace", "debug", "info", "warn", "error" (default info).
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("swing kinematics logging at {}", level);
}
