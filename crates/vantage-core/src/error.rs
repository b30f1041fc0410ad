//! Error types for the VANTAGE engine
//!
//! The per-tick path is infallible by design; errors only surface at the
//! configuration and manual-override boundaries.

use thiserror::Error;

/// Engine errors
#[derive(Error, Debug)]
pub enum VantageError {
    #[error("configuration value out of range: {field} = {value} (allowed {min}..{max})")]
    ConfigOutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("unknown camera mode: {0}")]
    UnknownMode(String),
}

/// Result type for VANTAGE operations
pub type VantageResult<T> = Result<T, VantageError>;
