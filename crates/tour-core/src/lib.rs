//! `tour-core` — foundational types for the `rust_tourplan` delivery planner.
//!
//! This crate is a dependency of every other `tour-*` crate.  It intentionally
//! has no `tour-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `IntersectionId`, `SegmentId`                         |
//! | [`geo`]     | `Point` (integer planar coordinates)                  |
//! | [`time`]    | `TimeWindow`, seconds-of-day helpers                  |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{IntersectionId, SegmentId};
pub use time::{format_time_of_day, parse_time_of_day, TimeWindow, SECONDS_PER_DAY};
