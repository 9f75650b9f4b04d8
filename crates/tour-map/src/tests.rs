//! Unit tests for tour-map.
//!
//! All tests use hand-crafted maps so they run without any map file.

#[cfg(test)]
mod helpers {
    use tour_core::{IntersectionId, Point};
    use crate::{RoadMap, RoadMapBuilder};

    /// Build a small grid map for testing.
    ///
    /// Intersections (x, y):
    ///   0:(0,0)  1:(100,0)  2:(200,0)
    ///   3:(0,100)           4:(200,100)
    ///
    /// Two-way streets: 0-1, 1-2, 0-3, 2-4, 3-4
    ///
    /// Durations are controlled via length (speed 1) so we can assert
    /// deterministically:
    ///   0→1→2→4 = 10+10+10 = 30 s   vs   0→3→4 = 50+10 = 60 s
    pub fn grid_map() -> (RoadMap, [IntersectionId; 5]) {
        let mut b = RoadMapBuilder::new();

        let n0 = b.add_intersection(Point::new(0, 0));
        let n1 = b.add_intersection(Point::new(100, 0));
        let n2 = b.add_intersection(Point::new(200, 0));
        let n3 = b.add_intersection(Point::new(0, 100));
        let n4 = b.add_intersection(Point::new(200, 100));

        b.add_street(n0, n1, 10, 1, "First Street").unwrap();
        b.add_street(n1, n2, 10, 1, "First Street").unwrap();
        b.add_street(n2, n4, 10, 1, "East Avenue").unwrap();
        b.add_street(n0, n3, 50, 1, "Long Way").unwrap();
        b.add_street(n3, n4, 10, 1, "South Road").unwrap();

        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & map structure ───────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use tour_core::{IntersectionId, Point};
    use crate::{MapError, RoadMapBuilder};

    #[test]
    fn empty_build() {
        let map = RoadMapBuilder::new().build().unwrap();
        assert_eq!(map.intersection_count(), 0);
        assert_eq!(map.segment_count(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn duration_is_truncating_division() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let c = b.add_intersection(Point::new(100, 0));
        b.add_segment(a, c, 125, 10, "Main").unwrap(); // 125/10 = 12.5 → 12
        let map = b.build().unwrap();
        assert_eq!(map.seg_duration_s[0], 12);
    }

    #[test]
    fn rejects_self_loop() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let err = b.add_segment(a, a, 10, 1, "Loop").unwrap_err();
        assert!(matches!(err, MapError::SelfLoop(id) if id == a));
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let ghost = IntersectionId(99);
        assert!(matches!(
            b.add_segment(a, ghost, 10, 1, "Nowhere"),
            Err(MapError::UnknownIntersection(id)) if id == ghost
        ));
    }

    #[test]
    fn rejects_zero_speed() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let c = b.add_intersection(Point::new(1, 0));
        assert!(matches!(
            b.add_segment(a, c, 10, 0, "Stopped"),
            Err(MapError::ZeroSpeed { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ordered_pair() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let c = b.add_intersection(Point::new(1, 0));
        b.add_segment(a, c, 10, 1, "Main").unwrap();
        b.add_segment(c, a, 10, 1, "Main").unwrap(); // reverse pair is fine
        b.add_segment(a, c, 20, 2, "Main bis").unwrap(); // duplicate pair
        assert!(matches!(b.build(), Err(MapError::DuplicateSegment { .. })));
    }

    #[test]
    fn csr_out_segments() {
        let (map, [n0, n1, n2, n3, n4]) = super::helpers::grid_map();

        assert_eq!(map.out_degree(n0), 2); // n0→n1, n0→n3
        assert_eq!(map.out_degree(n1), 2);
        assert_eq!(map.out_degree(n2), 2);
        assert_eq!(map.out_degree(n3), 2);
        assert_eq!(map.out_degree(n4), 2);

        // Every outgoing segment of n0 has n0 as its start.
        for s in map.out_segments(n0) {
            assert_eq!(map.seg_start[s.index()], n0);
        }
    }

    #[test]
    fn debug_output_is_compact() {
        // Map results must be debug-printable so assertions like
        // `unwrap_err` can format the Ok side.
        let (map, _) = super::helpers::grid_map();
        let printed = format!("{map:?}");
        assert!(printed.contains("RoadMap"));
        assert!(printed.contains("intersections: 5"));
    }

    #[test]
    fn directed_only_segment() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let c = b.add_intersection(Point::new(1, 0));
        b.add_segment(a, c, 10, 1, "One Way").unwrap();
        let map = b.build().unwrap();
        assert_eq!(map.segment_count(), 1);
        assert_eq!(map.out_degree(a), 1);
        assert_eq!(map.out_degree(c), 0); // no return segment
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use tour_core::Point;
    use crate::RoadMapBuilder;

    #[test]
    fn snap_exact_position() {
        let (map, [n0, ..]) = super::helpers::grid_map();
        assert_eq!(map.nearest_intersection(Point::new(0, 0)), Some(n0));
    }

    #[test]
    fn snap_nearest() {
        let (map, [n0, n1, ..]) = super::helpers::grid_map();
        assert_eq!(map.nearest_intersection(Point::new(40, 0)), Some(n0));
        assert_eq!(map.nearest_intersection(Point::new(60, 0)), Some(n1));
    }

    #[test]
    fn empty_map_returns_none() {
        let map = RoadMapBuilder::new().build().unwrap();
        assert!(map.nearest_intersection(Point::new(0, 0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use tour_core::Point;
    use crate::{DijkstraRouter, MapError, RoadMapBuilder, Router};

    #[test]
    fn shortest_path_correct() {
        let (map, [n0, n1, n2, _, n4]) = super::helpers::grid_map();
        let paths = DijkstraRouter.paths(&map, n0, &[n4]).unwrap();
        let path = &paths[0];

        // Shortest: n0→n1→n2→n4 = 30 s
        assert_eq!(path.duration_s, 30);
        assert_eq!(path.segments.len(), 3);

        // Chain invariant: starts at the source's outgoing segment, each
        // segment starts where the previous one ended, ends at the target,
        // and the segment durations sum to the reported total.
        assert_eq!(map.seg_start[path.segments[0].index()], n0);
        assert_eq!(map.seg_end[path.segments[0].index()], n1);
        assert_eq!(map.seg_end[path.segments[1].index()], n2);
        assert_eq!(map.seg_end[path.segments[2].index()], n4);
        for pair in path.segments.windows(2) {
            assert_eq!(map.seg_end[pair[0].index()], map.seg_start[pair[1].index()]);
        }
        let sum: u32 = path.segments.iter().map(|s| map.seg_duration_s[s.index()]).sum();
        assert_eq!(sum, path.duration_s);
    }

    #[test]
    fn multi_target_alignment() {
        let (map, [n0, n1, _, n3, n4]) = super::helpers::grid_map();
        let paths = DijkstraRouter.paths(&map, n0, &[n4, n1, n3]).unwrap();
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].duration_s, 30); // n4
        assert_eq!(paths[1].duration_s, 10); // n1
        assert_eq!(paths[2].duration_s, 50); // n3
    }

    #[test]
    fn trivial_same_intersection() {
        let (map, [n0, ..]) = super::helpers::grid_map();
        let paths = DijkstraRouter.paths(&map, n0, &[n0]).unwrap();
        assert!(paths[0].is_trivial());
        assert_eq!(paths[0].duration_s, 0);
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let c = b.add_intersection(Point::new(1, 0));
        // No segments — a and c are completely disconnected.
        let map = b.build().unwrap();
        let result = DijkstraRouter.paths(&map, a, &[c]);
        assert!(matches!(result, Err(MapError::NoRoute { .. })));
    }

    #[test]
    fn directed_one_way_is_asymmetric() {
        let mut b = RoadMapBuilder::new();
        let a = b.add_intersection(Point::new(0, 0));
        let c = b.add_intersection(Point::new(1, 0));
        b.add_segment(a, c, 10, 1, "One Way").unwrap();
        let map = b.build().unwrap();

        assert!(DijkstraRouter.paths(&map, a, &[c]).is_ok());
        assert!(DijkstraRouter.paths(&map, c, &[a]).is_err());
    }

    #[test]
    fn early_exit_matches_full_search() {
        // Asking for a near target only must not corrupt its distance even
        // though most of the graph is never settled.
        let (map, [n0, n1, ..]) = super::helpers::grid_map();
        let near = DijkstraRouter.paths(&map, n0, &[n1]).unwrap();
        assert_eq!(near[0].duration_s, 10);
    }

    #[test]
    fn shortest_never_beaten_by_detour() {
        // Any explicit concatenation of valid segments from source to
        // target is at least as long as the reported shortest path.
        let (map, [n0, _, _, _, n4]) = super::helpers::grid_map();
        let shortest = DijkstraRouter.paths(&map, n0, &[n4]).unwrap()[0].duration_s;
        let detour = 50 + 10; // n0→n3→n4 by hand
        assert!(shortest <= detour);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_map_readers, MapError};

    const INTERSECTIONS: &str = "\
id,x,y
25303831,0,0
25303832,100,0
25303833,100,100
";

    const SEGMENTS: &str = "\
start,end,length,speed,street
25303831,25303832,100,10,Rue Danton
25303832,25303831,100,10,Rue Danton
25303832,25303833,250,10,Rue Fabian
";

    #[test]
    fn loads_map_and_index() {
        let (map, index) =
            load_map_readers(Cursor::new(INTERSECTIONS), Cursor::new(SEGMENTS)).unwrap();
        assert_eq!(map.intersection_count(), 3);
        assert_eq!(map.segment_count(), 3);
        assert_eq!(index.len(), 3);

        let a = index.require(25303831).unwrap();
        let b = index.require(25303832).unwrap();
        assert_eq!(map.out_degree(a), 1);
        assert_eq!(map.out_degree(b), 2);
        // 250 / 10 = 25 s on the one-way Rue Fabian segment.
        let fabian = map.out_segments(b).find(|s| map.seg_street[s.index()] == "Rue Fabian");
        assert_eq!(map.seg_duration_s[fabian.unwrap().index()], 25);
    }

    #[test]
    fn rejects_duplicate_external_id() {
        let dup = "id,x,y\n1,0,0\n1,5,5\n";
        let err = load_map_readers(Cursor::new(dup), Cursor::new("start,end,length,speed,street\n"))
            .unwrap_err();
        assert!(matches!(err, MapError::DuplicateId(1)));
    }

    #[test]
    fn rejects_dangling_endpoint() {
        let segs = "start,end,length,speed,street\n25303831,999,10,1,Ghost Road\n";
        let err = load_map_readers(Cursor::new(INTERSECTIONS), Cursor::new(segs)).unwrap_err();
        assert!(matches!(err, MapError::UnknownId(999)));
    }

    #[test]
    fn rejects_negative_id() {
        let bad = "id,x,y\n-4,0,0\n";
        let err = load_map_readers(Cursor::new(bad), Cursor::new("start,end,length,speed,street\n"))
            .unwrap_err();
        assert!(matches!(err, MapError::Parse(_)));
    }

    #[test]
    fn rejects_malformed_row() {
        let bad = "id,x,y\nnot-a-number,0,0\n";
        let err = load_map_readers(Cursor::new(bad), Cursor::new("start,end,length,speed,street\n"))
            .unwrap_err();
        assert!(matches!(err, MapError::Parse(_)));
    }
}
