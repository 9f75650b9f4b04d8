//! `tour-solver` — branch-and-bound tour planning over a delivery graph.
//!
//! Takes a complete [`DeliveryGraph`](tour_delivery::DeliveryGraph) and
//! finds the cheapest warehouse-to-warehouse visiting order, accounting for
//! per-stop service durations and time windows.  Solves run synchronously
//! via [`solve`] or on a background thread via [`spawn_solve`], with
//! cooperative cancellation through a [`CancelToken`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`solver`]   | `solve`, `SolveOptions`, `SolveReport` (the search)      |
//! | [`planning`] | `Planning`, `Leg` (the finished, timed tour)             |
//! | [`worker`]   | `spawn_solve`, `SolverHandle` (background execution)     |
//! | [`cancel`]   | `CancelToken`                                            |
//! | [`error`]    | `SolverError`, `SolverResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the planning types.      |

pub mod cancel;
pub mod error;
pub mod planning;
pub mod solver;
pub mod worker;


pub use cancel::CancelToken;
pub use error::{SolverError, SolverResult};
pub use planning::{Leg, Planning};
pub use solver::{solve, SolveOptions, SolveReport};
pub use worker::{spawn_solve, SolverHandle};
