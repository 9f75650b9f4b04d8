//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! into them via `#[from]` or keep it as a wrapped variant.  Both patterns
//! are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// Errors produced by `tour-core` validation and parsing helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("time window start {start_s} is after end {end_s}")]
    InvalidWindow { start_s: u32, end_s: u32 },

    #[error("time window [{start_s}, {end_s}) cannot fit a {service_s}s service")]
    WindowTooShort { start_s: u32, end_s: u32, service_s: u32 },

    #[error("invalid time of day {0:?}: expected h:m:s or plain seconds")]
    TimeSyntax(String),
}

/// Shorthand result type for `tour-core`.
pub type CoreResult<T> = Result<T, CoreError>;
