//! Error types for the kinematics core
//!
//! The per-frame path degrades instead of failing; these errors only
//! surface from input validation, configuration and export.

use thiserror::Error;

use crate::pose::LandmarkName;

/// Errors surfaced to the caller that owns frame delivery
#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("required landmark `{0}` missing from pose frame")]
    MissingLandmark(LandmarkName),

    #[error("unknown landmark name `{0}`")]
    UnknownLandmark(String),

    #[error("invalid landmark data length: {actual} (expected {expected})")]
    InvalidFrameLength { expected: usize, actual: usize },

    #[error("timestamp {current}ms is earlier than previous frame {previous}ms")]
    NonMonotonicTimestamp { previous: f64, current: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, KinematicsError>;
