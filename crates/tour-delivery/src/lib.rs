//! `tour-delivery` — waypoints, delivery requests, and the delivery graph.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`waypoint`] | `Waypoint`, `WaypointKind`, `DeliveryRequest`             |
//! | [`graph`]    | `Route`, `DeliveryGraph` (dense pairwise route matrix)    |
//! | [`builder`]  | `build_delivery_graph` — one Dijkstra run per waypoint    |
//! | [`loader`]   | CSV delivery-request loading                              |
//! | [`error`]    | `DeliveryError`, `DeliveryResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Builds the route matrix on Rayon's thread pool.           |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod builder;
pub mod error;
pub mod graph;
pub mod loader;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use builder::build_delivery_graph;
pub use error::{DeliveryError, DeliveryResult};
pub use graph::{DeliveryGraph, Route, WAREHOUSE};
pub use loader::{load_request_csv, load_request_reader};
pub use waypoint::{DeliveryRequest, Waypoint, WaypointKind};
