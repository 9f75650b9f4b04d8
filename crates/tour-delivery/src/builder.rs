//! Delivery-graph construction: one shortest-path run per point of interest.
//!
//! Street directions matter and weights are asymmetric, so the pairwise
//! matrix cannot be derived from a single run — every waypoint is a
//! Dijkstra source once, with all other waypoints as targets.  The runs are
//! independent, so the `parallel` Cargo feature fans them out across
//! Rayon's thread pool.

use tour_map::{Path, RoadMap, Router};

use crate::graph::{DeliveryGraph, Route};
use crate::waypoint::{DeliveryRequest, Waypoint};
use crate::{DeliveryError, DeliveryResult};

/// Build the complete delivery graph for `request` over `map`.
///
/// # Errors
///
/// - [`DeliveryError::EmptyRequest`] if the request has no deliveries;
/// - [`DeliveryError::DuplicateWaypoint`] if two waypoints share an
///   intersection (the dense matrix has no self-entries to hold them);
/// - [`DeliveryError::Map`] wrapping [`tour_map::MapError::NoRoute`] if any
///   waypoint cannot reach any other — a structural configuration error,
///   surfaced before any solve is attempted.
pub fn build_delivery_graph<R: Router>(
    map: &RoadMap,
    router: &R,
    request: &DeliveryRequest,
) -> DeliveryResult<DeliveryGraph> {
    if request.deliveries.is_empty() {
        return Err(DeliveryError::EmptyRequest);
    }

    let waypoints: Vec<Waypoint> = request.waypoints().copied().collect();
    let n = waypoints.len();

    let mut seen = rustc_hash::FxHashSet::default();
    for wp in &waypoints {
        if !seen.insert(wp.intersection) {
            return Err(DeliveryError::DuplicateWaypoint(wp.intersection));
        }
    }

    // ── One multi-target shortest-path run per source waypoint ────────────
    //
    // Row i holds the paths from waypoint i to every waypoint j ≠ i, in
    // ascending-j order.
    let rows = source_rows(map, router, &waypoints)?;

    // ── Assemble the dense n×n matrix, None on the diagonal ───────────────
    let mut routes: Vec<Option<Route>> = vec![None; n * n];
    for (i, row) in rows.into_iter().enumerate() {
        // Ordering invariant: targets were passed in ascending-j order.
        let js = (0..n).filter(|&j| j != i);
        for (j, path) in js.zip(row) {
            routes[i * n + j] = Some(Route {
                start:      waypoints[i],
                end:        waypoints[j],
                segments:   path.segments,
                duration_s: path.duration_s,
            });
        }
    }

    Ok(DeliveryGraph::new(waypoints, routes, request.departure_s))
}

/// Compute all per-source path rows, sequentially or on Rayon.
fn source_rows<R: Router>(
    map: &RoadMap,
    router: &R,
    waypoints: &[Waypoint],
) -> DeliveryResult<Vec<Vec<Path>>> {
    let targets_of = |i: usize| -> Vec<_> {
        waypoints
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, wp)| wp.intersection)
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    {
        (0..waypoints.len())
            .map(|i| {
                router
                    .paths(map, waypoints[i].intersection, &targets_of(i))
                    .map_err(DeliveryError::Map)
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..waypoints.len())
            .into_par_iter()
            .map(|i| {
                router
                    .paths(map, waypoints[i].intersection, &targets_of(i))
                    .map_err(DeliveryError::Map)
            })
            .collect()
    }
}
