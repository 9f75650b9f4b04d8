//! grid8 — smallest end-to-end run of the rust_tourplan planner.
//!
//! Plans a morning tour of 4 deliveries over an 8-intersection synthetic
//! street grid.  Swap the embedded CSV fixtures for real map and request
//! files to plan at city scale; the pipeline is identical.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{anyhow, Result};

use tour_core::format_time_of_day;
use tour_delivery::{build_delivery_graph, load_request_reader};
use tour_map::{load_map_readers, DijkstraRouter};
use tour_output::{rows_from_planning, CsvWriter, PlanningWriter};
use tour_solver::{spawn_solve, SolveOptions};

// ── Embedded fixtures ─────────────────────────────────────────────────────────

// 8 intersections on a 2×4 grid, 100 m spacing.  External IDs are sparse
// on purpose, as real map files' are.
const INTERSECTIONS_CSV: &str = "\
id,x,y
101,0,0
102,100,0
103,200,0
104,300,0
201,0,100
202,100,100
203,200,100
204,300,100
";

// Two-way streets as paired rows.  Grid streets run at 10 units/s; the
// avenue along the top row is faster.
const SEGMENTS_CSV: &str = "\
start,end,length,speed,street
101,102,100,10,Oak Street
102,101,100,10,Oak Street
102,103,100,10,Oak Street
103,102,100,10,Oak Street
103,104,100,10,Oak Street
104,103,100,10,Oak Street
201,202,100,20,Fast Avenue
202,201,100,20,Fast Avenue
202,203,100,20,Fast Avenue
203,202,100,20,Fast Avenue
203,204,100,20,Fast Avenue
204,203,100,20,Fast Avenue
101,201,100,10,First Cross
201,101,100,10,First Cross
102,202,100,10,Second Cross
202,102,100,10,Second Cross
103,203,100,10,Third Cross
203,103,100,10,Third Cross
104,204,100,10,Fourth Cross
204,104,100,10,Fourth Cross
";

// Departure 08:00; two deliveries carry morning windows.
const REQUEST_CSV: &str = "\
kind,intersection,service_s,start,end
warehouse,101,0,8:00:00,
delivery,104,300,8:05:00,9:00:00
delivery,203,180,,
delivery,202,240,8:30:00,10:00:00
delivery,102,120,,
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== grid8 — rust_tourplan delivery planner ===");
    println!();

    // 1. Load the road map and the external-ID index.
    let (map, index) =
        load_map_readers(Cursor::new(INTERSECTIONS_CSV), Cursor::new(SEGMENTS_CSV))?;
    println!(
        "Road map: {} intersections, {} segments",
        map.intersection_count(),
        map.segment_count()
    );

    // 2. Load the delivery request against the same index.
    let request = load_request_reader(Cursor::new(REQUEST_CSV), &index)?;
    println!(
        "Request: {} deliveries, departure {}",
        request.deliveries.len(),
        format_time_of_day(request.departure_s)
    );

    // 3. Precompute the pairwise delivery graph.
    let graph = build_delivery_graph(&map, &DijkstraRouter, &request)?;
    println!("Delivery graph: {} routes", graph.route_count());

    // 4. Solve on a background worker.
    let started = Instant::now();
    let handle = spawn_solve(graph, SolveOptions::default())?;
    let report = handle.wait()?;
    let planning = report
        .planning
        .ok_or_else(|| anyhow!("no solution found"))?;
    println!("Solved in {:.1} ms", started.elapsed().as_secs_f64() * 1e3);
    println!();

    // 5. Print the tour.
    println!(
        "Tour: {} stops, {} s total ({} s waiting)",
        planning.stop_count(),
        planning.total_s(),
        planning.total_wait_s()
    );
    for leg in planning.legs() {
        println!(
            "  {} -> {}  arrive {}  wait {:>4} s  service {:>4} s",
            leg.route.start.intersection,
            leg.route.end.intersection,
            format_time_of_day(leg.arrival_s),
            leg.wait_s,
            leg.route.end.service_s
        );
    }
    println!();

    // 6. Export CSV next to the binary.
    let out_dir = Path::new("output/grid8");
    std::fs::create_dir_all(out_dir)?;
    let (legs, summary) = rows_from_planning(&planning, &map);
    let mut writer = CsvWriter::new(out_dir)?;
    writer.write_legs(&legs)?;
    writer.write_summary(&summary)?;
    writer.finish()?;
    println!("Wrote {}/planning_legs.csv and planning_summary.csv", out_dir.display());

    Ok(())
}
