//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The delivery-graph builder calls routing via the [`Router`] trait, so
//! applications can swap in custom implementations (A*, contraction
//! hierarchies) without touching the planner core.  The default
//! [`DijkstraRouter`] is sufficient for city-scale maps.
//!
//! # Cost units
//!
//! All costs and totals are whole **seconds** (`u32`), taken from the
//! precomputed `seg_duration_s` array.  Non-negativity is guaranteed by the
//! map builder, so the label-setting invariant holds.
//!
//! # Multi-target queries
//!
//! A tour planner needs the shortest path from one point of interest to
//! *all* others, so the query API is single-source multi-target: one
//! Dijkstra run settles every requested target, then each path is
//! reconstructed by walking predecessor segments.  The search stops as soon
//! as the last requested target is settled rather than exhausting the graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tour_core::{IntersectionId, SegmentId};

use crate::network::RoadMap;
use crate::{MapError, MapResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered list of `SegmentId`s and the
/// total travel time.
#[derive(Debug, Clone)]
pub struct Path {
    /// Segments to traverse in order, from source to destination.
    pub segments: Vec<SegmentId>,
    /// Cumulative travel time in seconds.
    pub duration_s: u32,
}

impl Path {
    /// `true` if the source and destination are the same intersection.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the delivery-graph builder can
/// fan source queries out across Rayon worker threads.
pub trait Router: Send + Sync {
    /// Compute shortest paths from `source` to every intersection in
    /// `targets`, returned in the same order as `targets`.
    ///
    /// An unreachable target is a structural error
    /// ([`MapError::NoRoute`]) — the map is misconfigured, not the query.
    fn paths(
        &self,
        map: &RoadMap,
        source: IntersectionId,
        targets: &[IntersectionId],
    ) -> MapResult<Vec<Path>>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard label-setting Dijkstra over the CSR road graph.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn paths(
        &self,
        map: &RoadMap,
        source: IntersectionId,
        targets: &[IntersectionId],
    ) -> MapResult<Vec<Path>> {
        dijkstra(map, source, targets)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    map: &RoadMap,
    source: IntersectionId,
    targets: &[IntersectionId],
) -> MapResult<Vec<Path>> {
    let n = map.intersection_count();

    // dist[v] = best known cost (s) to reach v.
    let mut dist = vec![u32::MAX; n];
    // prev_seg[v] = SegmentId that reached v; INVALID for unreached nodes.
    let mut prev_seg = vec![SegmentId::INVALID; n];
    // settled[v] = final distance fixed (popped fresh from the heap).
    let mut settled = vec![false; n];

    // Targets still waiting to be settled.  Duplicate targets and a target
    // equal to the source only count once.
    let mut is_target = vec![false; n];
    let mut remaining = 0usize;
    for &t in targets {
        if !is_target[t.index()] && t != source {
            is_target[t.index()] = true;
            remaining += 1;
        }
    }

    dist[source.index()] = 0;

    // Min-heap: (cost, node). Reverse makes BinaryHeap (max) behave as
    // min-heap.  Secondary key IntersectionId gives deterministic
    // tie-breaking.
    let mut heap: BinaryHeap<Reverse<(u32, IntersectionId)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] || settled[node.index()] {
            continue;
        }
        settled[node.index()] = true;

        if is_target[node.index()] {
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }

        for seg in map.out_segments(node) {
            let neighbor = map.seg_end[seg.index()];
            let new_cost = cost.saturating_add(map.seg_duration_s[seg.index()]);

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_seg[neighbor.index()] = seg;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    targets
        .iter()
        .map(|&t| reconstruct(map, &prev_seg, &dist, source, t))
        .collect()
}

/// Walk predecessor segments from `target` back to `source` and reverse.
fn reconstruct(
    map: &RoadMap,
    prev_seg: &[SegmentId],
    dist: &[u32],
    source: IntersectionId,
    target: IntersectionId,
) -> MapResult<Path> {
    if target == source {
        return Ok(Path { segments: vec![], duration_s: 0 });
    }
    if dist[target.index()] == u32::MAX {
        return Err(MapError::NoRoute { from: source, to: target });
    }

    let mut segments = Vec::new();
    let mut cur = target;
    loop {
        let s = prev_seg[cur.index()];
        if s == SegmentId::INVALID {
            break;
        }
        segments.push(s);
        cur = map.seg_start[s.index()];
    }
    segments.reverse();
    debug_assert_eq!(map.seg_start[segments[0].index()], source);

    Ok(Path { segments, duration_s: dist[target.index()] })
}
