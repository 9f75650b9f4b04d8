//! Map-subsystem error type.
//!
//! Everything here is a **structural** error: it indicates a malformed map
//! or an impossible routing request, is detected before any tour search
//! begins, and is never retried automatically.

use thiserror::Error;

use tour_core::IntersectionId;

/// Errors produced by `tour-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("street segment may not loop from {0} back onto itself")]
    SelfLoop(IntersectionId),

    #[error("duplicate street segment from {from} to {to}")]
    DuplicateSegment { from: IntersectionId, to: IntersectionId },

    #[error("street segment references unknown intersection {0}")]
    UnknownIntersection(IntersectionId),

    #[error("street segment from {from} to {to} has zero speed")]
    ZeroSpeed { from: IntersectionId, to: IntersectionId },

    #[error("duplicate intersection id {0} in map file")]
    DuplicateId(i64),

    #[error("unknown intersection id {0} in map file")]
    UnknownId(i64),

    #[error("no route from {from} to {to}")]
    NoRoute { from: IntersectionId, to: IntersectionId },

    #[error("map parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MapResult<T> = Result<T, MapError>;
