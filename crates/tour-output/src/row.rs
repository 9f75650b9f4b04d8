//! Plain data row types written by output backends.

use tour_map::RoadMap;
use tour_solver::Planning;

/// One leg of the finished tour, flattened for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegRow {
    /// 0-based position in driving order; the last leg returns to the
    /// warehouse.
    pub leg:               u32,
    pub from_intersection: u32,
    pub to_intersection:   u32,
    /// Street names along the route, consecutive duplicates collapsed.
    pub streets:           String,
    pub segment_count:     u32,
    pub travel_s:          u32,
    /// Time of day on reaching the leg's end, before any wait.
    pub arrival_s:         u32,
    pub wait_s:            u32,
    pub service_s:         u32,
    pub violates_window:   bool,
}

/// Whole-tour summary statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRow {
    pub stops:            u32,
    pub departure_s:      u32,
    pub total_s:          u32,
    pub travel_s:         u32,
    pub wait_s:           u32,
    pub service_s:        u32,
    pub violated_windows: u32,
}

/// Flatten a planning into its per-leg rows and summary row.  `map` is the
/// road map the planning was computed on; it supplies street names.
pub fn rows_from_planning(planning: &Planning, map: &RoadMap) -> (Vec<LegRow>, SummaryRow) {
    let mut travel_s = 0;
    let mut service_s = 0;
    let mut violated = 0;

    let legs: Vec<LegRow> = planning
        .legs()
        .iter()
        .enumerate()
        .map(|(i, leg)| {
            travel_s += leg.route.duration_s;
            service_s += leg.route.end.service_s;
            violated += u32::from(leg.violates_window);
            LegRow {
                leg:               i as u32,
                from_intersection: leg.route.start.intersection.0,
                to_intersection:   leg.route.end.intersection.0,
                streets:           street_summary(map, &leg.route.segments),
                segment_count:     leg.route.segments.len() as u32,
                travel_s:          leg.route.duration_s,
                arrival_s:         leg.arrival_s,
                wait_s:            leg.wait_s,
                service_s:         leg.route.end.service_s,
                violates_window:   leg.violates_window,
            }
        })
        .collect();

    let summary = SummaryRow {
        stops: planning.stop_count() as u32,
        departure_s: planning.departure_s(),
        total_s: planning.total_s(),
        travel_s,
        wait_s: planning.total_wait_s(),
        service_s,
        violated_windows: violated,
    };
    (legs, summary)
}

/// Street names along a segment sequence, consecutive duplicates collapsed.
fn street_summary(map: &RoadMap, segments: &[tour_core::SegmentId]) -> String {
    let mut streets: Vec<&str> = Vec::new();
    for seg in segments {
        let name = map.seg_street[seg.index()].as_str();
        if streets.last() != Some(&name) {
            streets.push(name);
        }
    }
    streets.join(" / ")
}
