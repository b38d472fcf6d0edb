//! Swing session - JS-facing owner of one engine and one tracker
//!
//! Called once per video frame from the capture loop. Each camera session
//! gets its own `SwingSession`; nothing is shared between instances.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::error::KinematicsError;
use crate::export::{history_to_csv, swings_to_csv};
use crate::kinematics::{KinematicsEngine, KinematicsState};
use crate::pose::PoseFrame;
use crate::segmentation::{SwingRecord, SwingTracker};

use super::keypoints::{pose_from_flat, pose_from_keypoints, RawKeypoint};

impl From<KinematicsError> for JsValue {
    fn from(err: KinematicsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result of one frame as seen by JavaScript
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameOutput<'a> {
    state: &'a KinematicsState,
    completed_swing: Option<SwingRecord>,
}

/// Maps become plain objects and `None` becomes `null`
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

#[wasm_bindgen]
pub struct SwingSession {
    engine: KinematicsEngine,
    tracker: SwingTracker,
}

#[wasm_bindgen]
impl SwingSession {
    /// `config` may be undefined, or a partial `{kinematics, tracker}` object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SwingSession, JsValue> {
        let config: SessionConfig = if config.is_undefined() || config.is_null() {
            SessionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        config.validate()?;

        log::info!("swing session created");
        Ok(SwingSession {
            engine: KinematicsEngine::with_config(config.kinematics),
            tracker: SwingTracker::with_config(config.tracker),
        })
    }

    /// Process a detector keypoint array `[{x, y, score?, name?}, ...]`
    pub fn process_keypoints(&mut self, keypoints: JsValue, timestamp: f64) -> Result<JsValue, JsValue> {
        let keypoints: Vec<RawKeypoint> = serde_wasm_bindgen::from_value(keypoints)?;
        let frame = pose_from_keypoints(&keypoints);
        self.step(&frame, timestamp)
    }

    /// Process a flat Float32Array of 99 values (33 × x, y, score)
    pub fn process_flat(&mut self, data: &[f32], timestamp: f64) -> Result<JsValue, JsValue> {
        let frame = pose_from_flat(data)?;
        self.step(&frame, timestamp)
    }

    pub fn phase(&self) -> String {
        self.engine.phase().name().to_string()
    }

    pub fn swing_history(&self) -> Result<JsValue, JsValue> {
        to_js(self.tracker.records())
    }

    pub fn current_swing_id(&self) -> u32 {
        self.tracker.current_swing_id()
    }

    pub fn is_swinging(&self) -> bool {
        self.tracker.is_swinging()
    }

    pub fn clear_history(&mut self) {
        self.tracker.clear_history();
    }

    /// Clear engine state and drop any swing in progress; completed swings are kept
    pub fn reset(&mut self) {
        self.engine.reset();
        self.tracker.cancel_swing();
    }

    /// Joint-angle history as CSV
    pub fn export_history_csv(&self) -> Result<String, JsValue> {
        Ok(history_to_csv(&self.engine.history())?)
    }

    /// Completed swings as CSV
    pub fn export_swings_csv(&self) -> Result<String, JsValue> {
        Ok(swings_to_csv(self.tracker.records())?)
    }
}

impl SwingSession {
    fn step(&mut self, frame: &PoseFrame, timestamp: f64) -> Result<JsValue, JsValue> {
        let state = self.engine.process(frame, timestamp);
        let completed_swing = self.tracker.process_phase(state.phase, state.hand_pos, timestamp);

        to_js(&FrameOutput {
            state: &state,
            completed_swing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_output_keys_are_camel_case() {
        let state = KinematicsState::empty(Default::default(), 0.0);
        let output = FrameOutput {
            state: &state,
            completed_swing: None,
        };
        let json = serde_json::to_value(&output).unwrap();

        assert!(json["completedSwing"].is_null());
        assert!(json.get("completed_swing").is_none());
        assert!(json["state"].get("handPath").is_some());
    }
}
