//! Points of interest: the warehouse and delivery addresses.
//!
//! # Identity
//!
//! A waypoint's identity is the intersection it sits on.  Two waypoints at
//! distinct intersections are always distinct; equality, ordering, and
//! hashing all follow the intersection ID.  Service duration and window are
//! payload, not identity — a delivery request never places two waypoints on
//! the same intersection (enforced by [`DeliveryRequest::validate`] and the
//! graph builder).

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use tour_core::{IntersectionId, TimeWindow};

use crate::{DeliveryError, DeliveryResult};

// ── WaypointKind ──────────────────────────────────────────────────────────────

/// Distinguishes the tour's fixed start/end point from the addresses it
/// must visit.  The only behavioral differences are the warehouse's zero
/// service duration and its role as the cycle anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaypointKind {
    Warehouse,
    Delivery,
}

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A point the tour must visit, with a service duration and a time window.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub intersection: IntersectionId,
    pub kind:         WaypointKind,
    /// Time spent on site, in seconds.  Always 0 for the warehouse.
    pub service_s:    u32,
    /// The `[start, end)` window during which service may happen.
    pub window:       TimeWindow,
}

impl Waypoint {
    /// The warehouse: zero service duration, unconstrained window.
    pub fn warehouse(intersection: IntersectionId) -> Self {
        Self {
            intersection,
            kind:      WaypointKind::Warehouse,
            service_s: 0,
            window:    TimeWindow::full_day(),
        }
    }

    /// A delivery address with an unconstrained window.
    pub fn delivery(intersection: IntersectionId, service_s: u32) -> Self {
        Self::delivery_in_window(intersection, service_s, TimeWindow::full_day())
    }

    /// A delivery address constrained to `window`.
    pub fn delivery_in_window(
        intersection: IntersectionId,
        service_s: u32,
        window: TimeWindow,
    ) -> Self {
        Self { intersection, kind: WaypointKind::Delivery, service_s, window }
    }
}

impl PartialEq for Waypoint {
    fn eq(&self, other: &Self) -> bool {
        self.intersection == other.intersection
    }
}

impl Eq for Waypoint {}

impl PartialOrd for Waypoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Waypoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.intersection.cmp(&other.intersection)
    }
}

impl Hash for Waypoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.intersection.hash(state);
    }
}

// ── DeliveryRequest ───────────────────────────────────────────────────────────

/// One planning run's input: the warehouse, the departure time, and the
/// addresses to visit.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRequest {
    pub warehouse:  Waypoint,
    pub deliveries: Vec<Waypoint>,
    /// Start-of-planning time, in seconds of day.
    pub departure_s: u32,
}

impl DeliveryRequest {
    pub fn new(warehouse: Waypoint, deliveries: Vec<Waypoint>, departure_s: u32) -> Self {
        Self { warehouse, deliveries, departure_s }
    }

    /// All points of interest, warehouse first.
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        std::iter::once(&self.warehouse).chain(self.deliveries.iter())
    }

    /// Check the request is self-consistent: correct kinds, at least one
    /// delivery, distinct intersections, and
    /// every window able to fit its own service duration.
    ///
    /// Loaders call this before handing a request to the planner; a request
    /// built in code may skip it, in which case an unmeetable window is
    /// merely penalized by the solver rather than rejected.
    pub fn validate(&self) -> DeliveryResult<()> {
        if self.warehouse.kind != WaypointKind::Warehouse {
            return Err(DeliveryError::WrongKind {
                expected: "warehouse",
                at: self.warehouse.intersection,
            });
        }
        if self.deliveries.is_empty() {
            return Err(DeliveryError::EmptyRequest);
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for wp in self.waypoints() {
            if !seen.insert(wp.intersection) {
                return Err(DeliveryError::DuplicateWaypoint(wp.intersection));
            }
        }

        for delivery in &self.deliveries {
            if delivery.kind != WaypointKind::Delivery {
                return Err(DeliveryError::WrongKind {
                    expected: "delivery",
                    at: delivery.intersection,
                });
            }
            delivery.window.validate(delivery.service_s)?;
        }
        Ok(())
    }
}
