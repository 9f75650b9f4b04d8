//! Delivery-subsystem error type.

use thiserror::Error;

use tour_core::{CoreError, IntersectionId};
use tour_map::MapError;

/// Errors produced by `tour-delivery`.
///
/// Everything except `Window` is structural: a malformed request or an
/// unreachable waypoint aborts graph construction before any solve starts.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("delivery request has no delivery addresses")]
    EmptyRequest,

    #[error("delivery request has no warehouse")]
    NoWarehouse,

    #[error("delivery request has more than one warehouse")]
    MultipleWarehouses,

    #[error("two waypoints share intersection {0}")]
    DuplicateWaypoint(IntersectionId),

    #[error("expected a {expected} waypoint at {at}")]
    WrongKind { expected: &'static str, at: IntersectionId },

    #[error(transparent)]
    Window(#[from] CoreError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("request parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DeliveryResult<T> = Result<T, DeliveryError>;
