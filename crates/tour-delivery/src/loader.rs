//! CSV delivery-request loader.
//!
//! # CSV format
//!
//! One row per waypoint.  Exactly one `warehouse` row and at least one
//! `delivery` row are required.
//!
//! ```csv
//! kind,intersection,service_s,start,end
//! warehouse,25303831,0,8:00:00,
//! delivery,25303833,300,9:00:00,11:30:00
//! delivery,25303835,600,,
//! ```
//!
//! | Column         | Meaning                                                |
//! |----------------|--------------------------------------------------------|
//! | `kind`         | `warehouse` or `delivery`                              |
//! | `intersection` | external map-file intersection ID                      |
//! | `service_s`    | on-site service duration in seconds (0 for warehouse)  |
//! | `start`,`end`  | time window bounds, `h:m:s` or plain seconds           |
//!
//! For the warehouse row, `start` is the **departure time** (required) and
//! `end` is ignored.  For a delivery row, both bounds must be present or
//! both absent; absent means the unconstrained `[0, 86_400)` window.
//!
//! The loaded request is validated before being returned: unknown
//! intersection IDs, duplicate waypoints, and windows too short for their
//! own service duration are all rejected here, never retried.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use tour_core::{parse_time_of_day, TimeWindow};
use tour_map::IntersectionIndex;

use crate::waypoint::{DeliveryRequest, Waypoint};
use crate::{DeliveryError, DeliveryResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestRecord {
    kind:         String,
    intersection: i64,
    service_s:    u32,
    start:        Option<String>,
    end:          Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a delivery request from a CSV file, resolving external intersection
/// IDs through `index` (returned by the map loader).
pub fn load_request_csv(
    path: &Path,
    index: &IntersectionIndex,
) -> DeliveryResult<DeliveryRequest> {
    let file = std::fs::File::open(path)?;
    load_request_reader(file, index)
}

/// Like [`load_request_csv`] but accepts any `Read` source.
pub fn load_request_reader<R: Read>(
    reader: R,
    index: &IntersectionIndex,
) -> DeliveryResult<DeliveryRequest> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut warehouse: Option<(Waypoint, u32)> = None;
    let mut deliveries: Vec<Waypoint> = Vec::new();

    for result in csv_reader.deserialize::<RequestRecord>() {
        let row = result.map_err(|e| DeliveryError::Parse(e.to_string()))?;
        let intersection = index.require(row.intersection)?;

        match row.kind.trim() {
            "warehouse" => {
                if warehouse.is_some() {
                    return Err(DeliveryError::MultipleWarehouses);
                }
                let departure = row.start.as_deref().ok_or_else(|| {
                    DeliveryError::Parse("warehouse row is missing the departure time".into())
                })?;
                let departure_s = parse_time_of_day(departure)?;
                warehouse = Some((Waypoint::warehouse(intersection), departure_s));
            }
            "delivery" => {
                let window = parse_window(row.start.as_deref(), row.end.as_deref())?;
                deliveries.push(Waypoint::delivery_in_window(
                    intersection,
                    row.service_s,
                    window,
                ));
            }
            other => {
                return Err(DeliveryError::Parse(format!(
                    "invalid waypoint kind {other:?}: expected \"warehouse\" or \"delivery\""
                )));
            }
        }
    }

    let (warehouse, departure_s) = warehouse.ok_or(DeliveryError::NoWarehouse)?;
    let request = DeliveryRequest::new(warehouse, deliveries, departure_s);
    request.validate()?;
    Ok(request)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_window(start: Option<&str>, end: Option<&str>) -> DeliveryResult<TimeWindow> {
    match (start, end) {
        (None, None) => Ok(TimeWindow::full_day()),
        (Some(s), Some(e)) => Ok(TimeWindow::new(parse_time_of_day(s)?, parse_time_of_day(e)?)),
        _ => Err(DeliveryError::Parse(
            "time window bounds must both be present or both absent".into(),
        )),
    }
}
