//! The complete delivery graph: precomputed pairwise routes.
//!
//! # Data layout
//!
//! Waypoints are stored densely with the warehouse at index
//! [`WAREHOUSE`] (0) and deliveries at 1..n.  The route matrix is a flat
//! `Vec<Option<Route>>` of length n×n indexed `from * n + to`, with `None`
//! on the diagonal — exactly N×(N−1) directed routes for N waypoints.
//! Directions matter (streets may be one-way), so `(u, v)` and `(v, u)` are
//! independent entries.
//!
//! The graph is built once per planning run by
//! [`build_delivery_graph`](crate::build_delivery_graph) and read-only
//! afterwards.

use tour_core::SegmentId;

use crate::waypoint::Waypoint;

/// Index of the warehouse in every [`DeliveryGraph`].
pub const WAREHOUSE: usize = 0;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The realized shortest path between two waypoints.
///
/// `segments` is non-empty for every route stored in a delivery graph — a
/// request never places two waypoints on the same intersection.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub start: Waypoint,
    pub end:   Waypoint,
    /// Street segments traversed, in order.
    pub segments: Vec<SegmentId>,
    /// Total travel time in seconds (sum of segment durations).
    pub duration_s: u32,
}

// ── DeliveryGraph ─────────────────────────────────────────────────────────────

/// Complete graph over a request's waypoints, warehouse first.
#[derive(Clone, Debug)]
pub struct DeliveryGraph {
    waypoints:   Vec<Waypoint>,
    /// Flat n×n matrix, `None` on the diagonal.
    routes:      Vec<Option<Route>>,
    departure_s: u32,
}

impl DeliveryGraph {
    pub(crate) fn new(
        waypoints: Vec<Waypoint>,
        routes: Vec<Option<Route>>,
        departure_s: u32,
    ) -> Self {
        debug_assert_eq!(routes.len(), waypoints.len() * waypoints.len());
        Self { waypoints, routes, departure_s }
    }

    /// Number of waypoints (warehouse + deliveries).
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of stored directed routes: N×(N−1).
    pub fn route_count(&self) -> usize {
        self.routes.iter().filter(|r| r.is_some()).count()
    }

    /// All waypoints; index 0 is the warehouse.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[inline]
    pub fn waypoint(&self, idx: usize) -> &Waypoint {
        &self.waypoints[idx]
    }

    /// Start-of-planning time carried over from the delivery request.
    pub fn departure_s(&self) -> u32 {
        self.departure_s
    }

    /// The precomputed route from waypoint `from` to waypoint `to`, or
    /// `None` on the diagonal.
    #[inline]
    pub fn route(&self, from: usize, to: usize) -> Option<&Route> {
        self.routes[from * self.waypoints.len() + to].as_ref()
    }

    /// Travel duration from `from` to `to` in seconds.
    #[inline]
    pub fn duration_s(&self, from: usize, to: usize) -> Option<u32> {
        self.route(from, to).map(|r| r.duration_s)
    }
}
