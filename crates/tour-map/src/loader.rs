//! CSV map loader.
//!
//! # CSV formats
//!
//! Two files: one row per intersection, one row per directed street segment.
//! Intersection IDs in the files are arbitrary non-negative `i64` values;
//! the loader maps them to dense [`IntersectionId`]s and returns the mapping
//! so request loaders can resolve the same external IDs.
//!
//! ```csv
//! id,x,y
//! 25303831,450,520
//! 25303832,610,520
//! ```
//!
//! ```csv
//! start,end,length,speed,street
//! 25303831,25303832,1600,10,Rue Danton
//! 25303832,25303831,1600,10,Rue Danton
//! ```
//!
//! A two-way street is simply two rows.  Structural validation (duplicate
//! IDs, dangling endpoints, self-loops, zero speeds, duplicate ordered
//! pairs) happens here and in [`RoadMapBuilder`]; a file that fails any
//! check yields a [`MapError`] before any planning can start.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use tour_core::{IntersectionId, Point};

use crate::network::{RoadMap, RoadMapBuilder};
use crate::{MapError, MapResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct IntersectionRecord {
    id: i64,
    x:  i32,
    y:  i32,
}

#[derive(Deserialize)]
struct SegmentRecord {
    start:  i64,
    end:    i64,
    length: u32,
    speed:  u32,
    street: String,
}

// ── External-ID index ─────────────────────────────────────────────────────────

/// Mapping from external map-file intersection IDs to dense internal IDs.
///
/// Returned by the map loader and consumed by the delivery-request loader,
/// which must resolve the same external IDs.
#[derive(Debug, Default)]
pub struct IntersectionIndex {
    ids: FxHashMap<i64, IntersectionId>,
}

impl IntersectionIndex {
    pub fn get(&self, external: i64) -> Option<IntersectionId> {
        self.ids.get(&external).copied()
    }

    /// Resolve an external ID or fail with [`MapError::UnknownId`].
    pub fn require(&self, external: i64) -> MapResult<IntersectionId> {
        self.get(external).ok_or(MapError::UnknownId(external))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a road map from intersection and segment CSV files.
pub fn load_map_csv(
    intersections: &Path,
    segments: &Path,
) -> MapResult<(RoadMap, IntersectionIndex)> {
    let inter_file = std::fs::File::open(intersections).map_err(MapError::Io)?;
    let seg_file   = std::fs::File::open(segments).map_err(MapError::Io)?;
    load_map_readers(inter_file, seg_file)
}

/// Like [`load_map_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or loading from embedded
/// fixtures.
pub fn load_map_readers<RI: Read, RS: Read>(
    intersections: RI,
    segments: RS,
) -> MapResult<(RoadMap, IntersectionIndex)> {
    // ── Parse intersections, assigning dense IDs in file order ────────────
    let mut index = IntersectionIndex::default();
    let mut builder = RoadMapBuilder::new();

    let mut inter_reader = csv::Reader::from_reader(intersections);
    for result in inter_reader.deserialize::<IntersectionRecord>() {
        let row = result.map_err(|e| MapError::Parse(e.to_string()))?;
        if row.id < 0 {
            return Err(MapError::Parse(format!("negative intersection id {}", row.id)));
        }
        let dense = builder.add_intersection(Point::new(row.x, row.y));
        if index.ids.insert(row.id, dense).is_some() {
            return Err(MapError::DuplicateId(row.id));
        }
    }

    // ── Parse segments, resolving external endpoint IDs ───────────────────
    let mut seg_reader = csv::Reader::from_reader(segments);
    for result in seg_reader.deserialize::<SegmentRecord>() {
        let row = result.map_err(|e| MapError::Parse(e.to_string()))?;
        let start = index.require(row.start)?;
        let end   = index.require(row.end)?;
        builder.add_segment(start, end, row.length, row.speed, &row.street)?;
    }

    Ok((builder.build()?, index))
}
