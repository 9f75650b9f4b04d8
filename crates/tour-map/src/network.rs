//! Road map representation and validating builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing
//! segments.  Given an `IntersectionId n`, its outgoing segments occupy the
//! slice:
//!
//! ```text
//! seg_*[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All segment arrays (`seg_start`, `seg_end`, `seg_length`, `seg_speed`,
//! `seg_duration_s`, `seg_street`) are sorted by source intersection and
//! indexed by `SegmentId`.  Iteration over an intersection's outgoing
//! segments is therefore a contiguous memory scan — ideal for Dijkstra's
//! inner loop.
//!
//! # Validation
//!
//! [`RoadMapBuilder::build`] rejects structurally invalid input: self-loop
//! segments, duplicate `(start, end)` pairs, dangling endpoints, and zero
//! speeds (a zero speed would make the segment duration undefined).
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(x, y)` to the nearest `IntersectionId`.
//! Used to snap externally supplied positions (e.g. a clicked map location)
//! to an intersection.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use tour_core::{IntersectionId, Point, SegmentId};

use crate::{MapError, MapResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `IntersectionId`.  Coordinates are widened to `i64` so the
/// squared-distance arithmetic cannot overflow.
#[derive(Clone)]
struct NodeEntry {
    point: [i64; 2],
    id: IntersectionId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── RoadMap ───────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for intersection
/// snapping.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadMapBuilder`].
pub struct RoadMap {
    // ── Intersection data ─────────────────────────────────────────────────
    /// Planar position of each intersection.  Indexed by `IntersectionId`.
    pub node_pos: Vec<Point>,

    // ── CSR segment adjacency ─────────────────────────────────────────────
    /// CSR row pointer.  Outgoing segments of intersection `n` are at
    /// SegmentIds `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `intersection_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Segment data (indexed by SegmentId = position in sorted order) ────
    /// Source intersection of each segment.  Redundant with CSR but required
    /// for efficient path reconstruction (trace `prev_seg` back to source).
    pub seg_start: Vec<IntersectionId>,

    /// Destination intersection of each segment.
    pub seg_end: Vec<IntersectionId>,

    /// Length of each segment (map-file distance units).
    pub seg_length: Vec<u32>,

    /// Speed on each segment (map-file distance units per second, > 0).
    pub seg_speed: Vec<u32>,

    /// Travel time in whole seconds: `length / speed`, truncating division.
    /// The Dijkstra edge cost.
    pub seg_duration_s: Vec<u32>,

    /// Street name of each segment.
    pub seg_street: Vec<String>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl std::fmt::Debug for RoadMap {
    /// Compact form; the full arrays and the R-tree would swamp any
    /// assertion output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadMap")
            .field("intersections", &self.node_pos.len())
            .field("segments", &self.seg_end.len())
            .finish_non_exhaustive()
    }
}

impl RoadMap {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn intersection_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn segment_count(&self) -> usize {
        self.seg_end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Position of an intersection.
    #[inline]
    pub fn position(&self, id: IntersectionId) -> Point {
        self.node_pos[id.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `SegmentId`s of all outgoing segments from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_segments(&self, node: IntersectionId) -> impl Iterator<Item = SegmentId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| SegmentId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing segments).
    #[inline]
    pub fn out_degree(&self, node: IntersectionId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `IntersectionId` of the intersection nearest to `pos`.
    ///
    /// Returns `None` only if the map has no intersections.
    pub fn nearest_intersection(&self, pos: Point) -> Option<IntersectionId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.x as i64, pos.y as i64])
            .map(|e| e.id)
    }
}

// ── RoadMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`RoadMap`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts intersections and directed segments in any order.
/// `build()` sorts segments by source intersection, constructs the CSR
/// arrays, validates pair uniqueness, and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use tour_core::Point;
/// use tour_map::RoadMapBuilder;
///
/// let mut b = RoadMapBuilder::new();
/// let a = b.add_intersection(Point::new(0, 0));
/// let c = b.add_intersection(Point::new(120, 0));
/// b.add_segment(a, c, 1_200, 10, "Rue de la République").unwrap();
/// let map = b.build().unwrap();
/// assert_eq!(map.intersection_count(), 2);
/// assert_eq!(map.seg_duration_s[0], 120);
/// ```
pub struct RoadMapBuilder {
    nodes:    Vec<Point>,
    raw_segs: Vec<RawSegment>,
}

struct RawSegment {
    start:      IntersectionId,
    end:        IntersectionId,
    length:     u32,
    speed:      u32,
    duration_s: u32,
    street:     String,
}

impl RoadMapBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_segs: Vec::new() }
    }

    /// Pre-allocate for the expected number of intersections and segments to
    /// reduce reallocations when bulk-loading from a map file.
    pub fn with_capacity(intersections: usize, segments: usize) -> Self {
        Self {
            nodes:    Vec::with_capacity(intersections),
            raw_segs: Vec::with_capacity(segments),
        }
    }

    /// Add an intersection and return its `IntersectionId` (sequential from 0).
    pub fn add_intersection(&mut self, pos: Point) -> IntersectionId {
        let id = IntersectionId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** street segment from `start` to `end`.
    ///
    /// The travel duration is derived immediately as `length / speed` in
    /// whole seconds (truncating integer division).
    ///
    /// # Errors
    ///
    /// - [`MapError::SelfLoop`] if `start == end`;
    /// - [`MapError::UnknownIntersection`] if either endpoint was never added;
    /// - [`MapError::ZeroSpeed`] if `speed == 0`.
    pub fn add_segment(
        &mut self,
        start:  IntersectionId,
        end:    IntersectionId,
        length: u32,
        speed:  u32,
        street: &str,
    ) -> MapResult<()> {
        if start == end {
            return Err(MapError::SelfLoop(start));
        }
        for endpoint in [start, end] {
            if endpoint.index() >= self.nodes.len() {
                return Err(MapError::UnknownIntersection(endpoint));
            }
        }
        if speed == 0 {
            return Err(MapError::ZeroSpeed { from: start, to: end });
        }

        self.raw_segs.push(RawSegment {
            start,
            end,
            length,
            speed,
            duration_s: length / speed,
            street: street.to_string(),
        });
        Ok(())
    }

    /// Convenience: add segments in **both directions** for a two-way street.
    pub fn add_street(
        &mut self,
        a:      IntersectionId,
        b:      IntersectionId,
        length: u32,
        speed:  u32,
        street: &str,
    ) -> MapResult<()> {
        self.add_segment(a, b, length, speed, street)?;
        self.add_segment(b, a, length, speed, street)
    }

    pub fn intersection_count(&self) -> usize { self.nodes.len() }
    pub fn segment_count(&self) -> usize { self.raw_segs.len() }

    /// Consume the builder and produce a [`RoadMap`].
    ///
    /// Time complexity: O(E log E) for segment sort + O(N log N) for R-tree
    /// bulk load, where N = intersections, E = segments.
    ///
    /// # Errors
    ///
    /// [`MapError::DuplicateSegment`] if two segments share an ordered
    /// `(start, end)` pair.
    pub fn build(self) -> MapResult<RoadMap> {
        let node_count = self.nodes.len();
        let seg_count = self.raw_segs.len();

        // Sort segments by (start, end) for CSR construction; sorting also
        // makes duplicate ordered pairs adjacent.
        let mut raw = self.raw_segs;
        raw.sort_unstable_by_key(|s| (s.start.0, s.end.0));
        for pair in raw.windows(2) {
            if pair[0].start == pair[1].start && pair[0].end == pair[1].end {
                return Err(MapError::DuplicateSegment {
                    from: pair[0].start,
                    to:   pair[0].end,
                });
            }
        }

        // Build segment arrays from sorted raw segments.
        let seg_start:      Vec<IntersectionId> = raw.iter().map(|s| s.start).collect();
        let seg_end:        Vec<IntersectionId> = raw.iter().map(|s| s.end).collect();
        let seg_length:     Vec<u32>            = raw.iter().map(|s| s.length).collect();
        let seg_speed:      Vec<u32>            = raw.iter().map(|s| s.speed).collect();
        let seg_duration_s: Vec<u32>            = raw.iter().map(|s| s.duration_s).collect();
        let seg_street:     Vec<String>         = raw.into_iter().map(|s| s.street).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for s in &seg_start {
            node_out_start[s.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, seg_count);

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.x as i64, pos.y as i64],
                id: IntersectionId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(RoadMap {
            node_pos: self.nodes,
            node_out_start,
            seg_start,
            seg_end,
            seg_length,
            seg_speed,
            seg_duration_s,
            seg_street,
            spatial_idx,
        })
    }
}

impl Default for RoadMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
