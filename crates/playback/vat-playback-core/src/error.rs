//! Error types.
//!
//! Play commands reject invalid input with a [`CommandError`] and leave state
//! untouched. Controllers log and drop these; they never reach a real-time caller
//! as a fault.

use thiserror::Error;

/// Why a play command was ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("clip index {index} out of range for catalog of {len} clips")]
    InvalidIndex { index: i32, len: usize },
    #[error("no clip named '{0}'")]
    UnresolvedName(String),
    #[error("invalid sequence range {min}..={max} for catalog of {len} clips")]
    InvalidSequenceRange { min: i32, max: i32, len: usize },
    #[error("state machine is already initialized")]
    DoubleInitialize,
    #[error("state machine has no catalog")]
    Uninitialized,
    #[error("catalog is empty")]
    EmptyCatalog,
}

/// Errors produced while loading a clip catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("clip '{name}' has frame end {end} before frame start {start}")]
    InvalidFrameRange { name: String, start: i32, end: i32 },
    #[error("clip '{name}' has invalid framerate {framerate}")]
    InvalidFramerate { name: String, framerate: f32 },
}

/// Errors produced while loading controller configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("controller config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
