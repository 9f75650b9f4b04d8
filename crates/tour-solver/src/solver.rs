//! Branch-and-bound tour search over a delivery graph.
//!
//! # Search
//!
//! Each node of the search tree is a partial tour starting at the
//! warehouse.  Expanding a node tries the unvisited waypoints as next
//! stops, cheapest travel first; a complete tour closes back at the
//! warehouse.  A node whose accumulated cost already reaches the best
//! complete tour found so far is cut.
//!
//! # Cost model
//!
//! A leg's cost is travel + wait + penalty + service, all in seconds:
//!
//! - **travel** is the precomputed shortest-route duration;
//! - **wait** is the idle time when the courier arrives before the
//!   destination's window opens;
//! - **penalty** is one full day ([`SECONDS_PER_DAY`]) when service cannot
//!   finish inside the window even after waiting.  The penalty exceeds any
//!   feasible tour, so a violating order is chosen only when every order
//!   violates some window; the tour is still returned, flagged per leg.
//!
//! Arrival times are seconds of day and wrap at midnight.
//!
//! # Heuristic knobs
//!
//! [`SolveOptions`] carries two optional prunings that trade optimality
//! for speed on large requests.  The defaults disable both, so the default
//! search is exact.

use tour_core::{TimeWindow, SECONDS_PER_DAY};
use tour_delivery::{DeliveryGraph, WAREHOUSE};

use crate::cancel::CancelToken;
use crate::planning::Planning;
use crate::{SolverError, SolverResult};

// ── Options ───────────────────────────────────────────────────────────────────

/// Tuning knobs for the branch-and-bound search.
///
/// Branch width limits how many of a node's cheapest candidates are
/// expanded: `remaining / branch_width_divisor + min_branch_width`.  The
/// cost-ratio cut stops expanding a node's candidates once one costs more
/// than `max_cost_ratio` times the node's cheapest candidate.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveOptions {
    pub min_branch_width:     usize,
    pub branch_width_divisor: usize,
    pub max_cost_ratio:       u32,
}

impl Default for SolveOptions {
    /// Both prunings effectively disabled: the width formula admits every
    /// candidate and no realistic edge costs 1000× its cheapest sibling.
    fn default() -> Self {
        Self { min_branch_width: 3, branch_width_divisor: 1, max_cost_ratio: 1000 }
    }
}

impl SolveOptions {
    /// Explicitly exact search with no pruning at all.
    pub fn exhaustive() -> Self {
        Self {
            min_branch_width:     usize::MAX,
            branch_width_divisor: 1,
            max_cost_ratio:       u32::MAX,
        }
    }

    fn branch_width(&self, remaining: usize) -> usize {
        (remaining / self.branch_width_divisor.max(1)).saturating_add(self.min_branch_width)
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What a solve run produced.
///
/// A cancelled run still carries the best tour recorded before the cancel
/// landed; `planning` is `None` only when no complete tour had been
/// reached by then.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    pub planning:  Option<Planning>,
    pub cancelled: bool,
}

// ── Leg timing ────────────────────────────────────────────────────────────────

pub(crate) struct LegTiming {
    /// Time of day on reaching the destination, before any wait.
    pub arrival_s: u32,
    pub wait_s:    u32,
    /// 0, or [`SECONDS_PER_DAY`] if the window is missed despite waiting.
    pub penalty_s: u32,
}

impl LegTiming {
    /// Full leg cost excluding travel.  Saturates rather than wrapping on
    /// absurd service durations.
    pub fn overhead_s(&self, service_s: u32) -> u32 {
        (self.wait_s + self.penalty_s).saturating_add(service_s)
    }
}

/// Timing of one leg: depart after `elapsed` tour seconds, travel
/// `travel_s`, then service a waypoint with `window`.
pub(crate) fn leg_timing(
    window: &TimeWindow,
    service_s: u32,
    departure_s: u32,
    elapsed_s: u32,
    travel_s: u32,
) -> LegTiming {
    let arrival_s = (departure_s % SECONDS_PER_DAY + elapsed_s % SECONDS_PER_DAY
        + travel_s % SECONDS_PER_DAY)
        % SECONDS_PER_DAY;
    let wait_s = window.wait_for(arrival_s);
    let penalty_s = if (arrival_s + wait_s).saturating_add(service_s) > window.end_s {
        SECONDS_PER_DAY
    } else {
        0
    };
    LegTiming { arrival_s, wait_s, penalty_s }
}

// ── Solve ─────────────────────────────────────────────────────────────────────

/// Find the cheapest warehouse-to-warehouse tour over `graph`.
///
/// Runs on the calling thread; see [`spawn_solve`](crate::spawn_solve) for
/// the background variant.  Checks `cancel` at every search node; a
/// cancelled run still reports the best tour found up to that point.
///
/// # Errors
///
/// [`SolverError::NoDeliveries`] if the graph holds only the warehouse.
pub fn solve(
    graph: &DeliveryGraph,
    options: &SolveOptions,
    cancel: &CancelToken,
) -> SolverResult<SolveReport> {
    let n = graph.len();
    if n < 2 {
        return Err(SolverError::NoDeliveries);
    }

    // Flat travel matrix, u32::MAX on the diagonal (never read).
    let mut travel = vec![u32::MAX; n * n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                travel[i * n + j] = graph
                    .duration_s(i, j)
                    .ok_or(SolverError::MissingRoute { from: i, to: j })?;
            }
        }
    }

    let mut search = Search {
        graph,
        travel,
        n,
        options,
        cancel,
        order: Vec::with_capacity(n),
        unvisited: vec![true; n],
        remaining: n - 1,
        best: None,
        cancelled: false,
    };
    search.order.push(WAREHOUSE);
    search.unvisited[WAREHOUSE] = false;
    search.expand(WAREHOUSE, 0);

    let cancelled = search.cancelled;
    let planning = match search.best {
        Some(best) => Some(Planning::assemble(graph, &best.order)?),
        None => None,
    };
    Ok(SolveReport { planning, cancelled })
}

struct Best {
    order: Vec<usize>,
    cost:  u32,
}

struct Search<'a> {
    graph:     &'a DeliveryGraph,
    travel:    Vec<u32>,
    n:         usize,
    options:   &'a SolveOptions,
    cancel:    &'a CancelToken,
    order:     Vec<usize>,
    unvisited: Vec<bool>,
    remaining: usize,
    best:      Option<Best>,
    cancelled: bool,
}

impl Search<'_> {
    fn expand(&mut self, current: usize, elapsed_s: u32) {
        if self.cancelled || self.cancel.is_cancelled() {
            self.cancelled = true;
            return;
        }
        if let Some(best) = &self.best {
            if elapsed_s >= best.cost {
                return;
            }
        }

        if self.remaining == 0 {
            self.close_tour(current, elapsed_s);
            return;
        }

        // Unvisited candidates, cheapest travel first.
        let mut candidates: Vec<(u32, usize)> = (0..self.n)
            .filter(|&c| self.unvisited[c])
            .map(|c| (self.travel[current * self.n + c], c))
            .collect();
        candidates.sort_unstable();
        let cheapest_s = candidates[0].0;

        let width = self.options.branch_width(self.remaining);
        for &(travel_s, candidate) in candidates.iter().take(width) {
            // Suffix cut: candidates are sorted, so once one is too
            // expensive relative to the cheapest, the rest are too.
            // A zero-duration cheapest edge (length < speed truncates to
            // 0) would zero the threshold and cut every sibling, so the
            // ratio cut only applies when the cheapest edge has positive
            // cost.
            if cheapest_s > 0
                && u64::from(travel_s)
                    > u64::from(cheapest_s) * u64::from(self.options.max_cost_ratio)
            {
                break;
            }

            let wp = *self.graph.waypoint(candidate);
            let timing =
                leg_timing(&wp.window, wp.service_s, self.graph.departure_s(), elapsed_s, travel_s);
            let leg_s = travel_s.saturating_add(timing.overhead_s(wp.service_s));

            self.order.push(candidate);
            self.unvisited[candidate] = false;
            self.remaining -= 1;

            self.expand(candidate, elapsed_s.saturating_add(leg_s));

            self.remaining += 1;
            self.unvisited[candidate] = true;
            self.order.pop();

            if self.cancelled {
                return;
            }
        }
    }

    /// Terminal node: add the return leg to the warehouse and record the
    /// tour if it beats the best so far.  The best record is only ever
    /// written here.
    fn close_tour(&mut self, current: usize, elapsed_s: u32) {
        let travel_s = self.travel[current * self.n + WAREHOUSE];
        let wp = *self.graph.waypoint(WAREHOUSE);
        let timing =
            leg_timing(&wp.window, wp.service_s, self.graph.departure_s(), elapsed_s, travel_s);
        let total_s = elapsed_s
            .saturating_add(travel_s)
            .saturating_add(timing.overhead_s(wp.service_s));

        if self.best.as_ref().is_none_or(|b| total_s < b.cost) {
            self.best = Some(Best { order: self.order.clone(), cost: total_s });
        }
    }
}
