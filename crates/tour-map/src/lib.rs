//! `tour-map` — road map graph, spatial indexing, and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`network`]  | `RoadMap` (CSR + R-tree), `RoadMapBuilder`                 |
//! | [`router`]   | `Router` trait, `Path`, `DijkstraRouter`                   |
//! | [`loader`]   | CSV intersection/segment loading with external-ID mapping  |
//! | [`error`]    | `MapError`, `MapResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use loader::{load_map_csv, load_map_readers, IntersectionIndex};
pub use network::{RoadMap, RoadMapBuilder};
pub use router::{DijkstraRouter, Path, Router};
