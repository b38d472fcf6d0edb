//! Segmentation module - discrete swings from the per-frame phase stream
//!
//! Re-exports only. All logic in submodules.

mod record;
mod tracker;

pub use record::SwingRecord;
pub use tracker::SwingTracker;
