//! The finished plan: an ordered sequence of legs with a time line.

use tour_delivery::{DeliveryGraph, Route, WAREHOUSE};

use crate::solver::leg_timing;
use crate::{SolverError, SolverResult};

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One hop of the tour: the route driven plus the timing at its end.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// The realized street route for this hop.
    pub route: Route,
    /// Time of day on reaching the route's end, before any wait.
    pub arrival_s: u32,
    /// Idle time before the destination's window opens.
    pub wait_s: u32,
    /// `true` if service cannot finish inside the window even after
    /// waiting.  The leg is still driven; its cost carries a one-day
    /// penalty so the solver avoids it whenever any order can.
    pub violates_window: bool,
}

// ── Planning ──────────────────────────────────────────────────────────────────

/// A complete tour: warehouse to warehouse, one leg per hop.
///
/// For k deliveries there are k+1 legs; the last leg returns to the
/// warehouse.  Built by the solver, read-only afterwards.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Planning {
    legs:        Vec<Leg>,
    departure_s: u32,
    total_s:     u32,
}

impl Planning {
    /// Replay a visiting order over the graph, computing each leg's
    /// arrival, wait, and window status.  `order` starts at the warehouse
    /// and lists every waypoint exactly once; the closing leg back to the
    /// warehouse is added here.
    pub(crate) fn assemble(graph: &DeliveryGraph, order: &[usize]) -> SolverResult<Planning> {
        let departure_s = graph.departure_s();
        let mut legs = Vec::with_capacity(order.len());
        let mut elapsed_s: u32 = 0;

        let stops = order.iter().copied().chain(std::iter::once(WAREHOUSE));
        let mut current = WAREHOUSE;
        for stop in stops.skip(1) {
            let route = graph
                .route(current, stop)
                .ok_or(SolverError::MissingRoute { from: current, to: stop })?;
            let wp = graph.waypoint(stop);
            let timing =
                leg_timing(&wp.window, wp.service_s, departure_s, elapsed_s, route.duration_s);

            elapsed_s = elapsed_s
                .saturating_add(route.duration_s)
                .saturating_add(timing.overhead_s(wp.service_s));
            legs.push(Leg {
                route:           route.clone(),
                arrival_s:       timing.arrival_s,
                wait_s:          timing.wait_s,
                violates_window: timing.penalty_s > 0,
            });
            current = stop;
        }

        Ok(Planning { legs, departure_s, total_s: elapsed_s })
    }

    /// Legs in driving order; the last one ends at the warehouse.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Number of delivery stops (legs minus the return hop).
    pub fn stop_count(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }

    /// Start-of-tour time of day, in seconds.
    pub fn departure_s(&self) -> u32 {
        self.departure_s
    }

    /// Total tour cost in seconds: travel + waits + service, plus one day
    /// per violated window.
    pub fn total_s(&self) -> u32 {
        self.total_s
    }

    /// Total idle time across all legs.
    pub fn total_wait_s(&self) -> u32 {
        self.legs.iter().map(|l| l.wait_s).sum()
    }

    /// `true` if any leg misses its destination's window.
    pub fn has_violations(&self) -> bool {
        self.legs.iter().any(|l| l.violates_window)
    }
}
