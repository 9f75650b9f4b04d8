//! Unit tests for tour-delivery.
//!
//! All tests use hand-crafted maps so they run without any map file.

#[cfg(test)]
mod helpers {
    use tour_core::{IntersectionId, Point};
    use tour_map::{RoadMap, RoadMapBuilder};

    /// Build a small grid map for testing.
    ///
    /// Intersections (x, y):
    ///   0:(0,0)  1:(100,0)  2:(200,0)
    ///   3:(0,100)           4:(200,100)
    ///
    /// Two-way streets 0-1, 1-2, 2-4, 3-4, 0-3; all durations equal 10 s
    /// per segment except Long Way (0-3) at 50 s.
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

// ── Waypoint identity ─────────────────────────────────────────────────────────

#[cfg(test)]
mod identity {
    use rustc_hash::FxHashSet;
    use tour_core::{IntersectionId, TimeWindow};

    use crate::waypoint::Waypoint;

    #[test]
    fn equality_follows_intersection_only() {
        let a = Waypoint::delivery(IntersectionId(7), 300);
        let b = Waypoint::delivery_in_window(IntersectionId(7), 600, TimeWindow::new(100, 900));
        let c = Waypoint::warehouse(IntersectionId(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ordering_follows_intersection() {
        let mut wps = vec![
            Waypoint::delivery(IntersectionId(9), 0),
            Waypoint::warehouse(IntersectionId(2)),
            Waypoint::delivery(IntersectionId(5), 0),
        ];
        wps.sort();
        let ids: Vec<u32> = wps.iter().map(|w| w.intersection.0).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn hashing_is_consistent_with_equality() {
        let mut set = FxHashSet::default();
        set.insert(Waypoint::delivery(IntersectionId(3), 100));
        assert!(!set.insert(Waypoint::delivery_in_window(
            IntersectionId(3),
            999,
            TimeWindow::new(0, 1000),
        )));
    }
}

// ── Request validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod request {
    use tour_core::{CoreError, IntersectionId, TimeWindow};

    use crate::waypoint::{DeliveryRequest, Waypoint};
    use crate::DeliveryError;

    fn warehouse() -> Waypoint {
        Waypoint::warehouse(IntersectionId(0))
    }

    #[test]
    fn accepts_well_formed_request() {
        let req = DeliveryRequest::new(
            warehouse(),
            vec![
                Waypoint::delivery(IntersectionId(1), 300),
                Waypoint::delivery_in_window(IntersectionId(2), 600, TimeWindow::new(3600, 7200)),
            ],
            28_800,
        );
        req.validate().unwrap();
        assert_eq!(req.waypoints().count(), 3);
    }

    #[test]
    fn rejects_empty_request() {
        let req = DeliveryRequest::new(warehouse(), vec![], 0);
        assert!(matches!(req.validate(), Err(DeliveryError::EmptyRequest)));
    }

    #[test]
    fn rejects_duplicate_intersection() {
        let req = DeliveryRequest::new(
            warehouse(),
            vec![
                Waypoint::delivery(IntersectionId(1), 0),
                Waypoint::delivery(IntersectionId(1), 0),
            ],
            0,
        );
        assert!(matches!(
            req.validate(),
            Err(DeliveryError::DuplicateWaypoint(id)) if id == IntersectionId(1)
        ));
    }

    #[test]
    fn rejects_delivery_posing_as_warehouse() {
        let req = DeliveryRequest::new(
            Waypoint::delivery(IntersectionId(0), 0),
            vec![Waypoint::delivery(IntersectionId(1), 0)],
            0,
        );
        assert!(matches!(
            req.validate(),
            Err(DeliveryError::WrongKind { expected: "warehouse", .. })
        ));
    }

    #[test]
    fn rejects_window_too_short_for_service() {
        // [0, 5) cannot fit a 10 s service.
        let req = DeliveryRequest::new(
            warehouse(),
            vec![Waypoint::delivery_in_window(IntersectionId(1), 10, TimeWindow::new(0, 5))],
            0,
        );
        assert!(matches!(
            req.validate(),
            Err(DeliveryError::Window(CoreError::WindowTooShort { .. }))
        ));
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph_builder {
    use tour_core::Point;
    use tour_map::{DijkstraRouter, MapError, RoadMapBuilder};

    use super::helpers::grid_map;
    use crate::builder::build_delivery_graph;
    use crate::waypoint::{DeliveryRequest, Waypoint};
    use crate::{DeliveryError, WAREHOUSE};

    #[test]
    fn graph_is_complete() {
        let (map, n) = grid_map();
        let req = DeliveryRequest::new(
            Waypoint::warehouse(n[0]),
            vec![
                Waypoint::delivery(n[2], 300),
                Waypoint::delivery(n[3], 300),
                Waypoint::delivery(n[4], 300),
            ],
            28_800,
        );

        let graph = build_delivery_graph(&map, &DijkstraRouter, &req).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.route_count(), 4 * 3);
        assert_eq!(graph.departure_s(), 28_800);
        assert_eq!(graph.waypoint(WAREHOUSE).intersection, n[0]);
        for i in 0..graph.len() {
            assert!(graph.route(i, i).is_none());
            for j in 0..graph.len() {
                if i != j {
                    let route = graph.route(i, j).unwrap();
                    assert_eq!(route.start.intersection, graph.waypoint(i).intersection);
                    assert_eq!(route.end.intersection, graph.waypoint(j).intersection);
                    assert!(!route.segments.is_empty());
                }
            }
        }
    }

    #[test]
    fn routes_take_the_shortest_path() {
        let (map, n) = grid_map();
        let req = DeliveryRequest::new(
            Waypoint::warehouse(n[0]),
            vec![Waypoint::delivery(n[4], 0)],
            0,
        );
        let graph = build_delivery_graph(&map, &DijkstraRouter, &req).unwrap();
        // 0→1→2→4 at 30 s beats 0→3→4 at 60 s.
        assert_eq!(graph.duration_s(0, 1), Some(30));
        assert_eq!(graph.route(0, 1).unwrap().segments.len(), 3);
    }

    #[test]
    fn one_way_streets_make_the_matrix_asymmetric() {
        // a → b direct (10 s); b can only reach a the long way via c (40 s).
        let mut b = RoadMapBuilder::new();
        let na = b.add_intersection(Point::new(0, 0));
        let nb = b.add_intersection(Point::new(100, 0));
        let nc = b.add_intersection(Point::new(50, 100));
        b.add_segment(na, nb, 10, 1, "One Way").unwrap();
        b.add_street(nb, nc, 20, 1, "Loop Road").unwrap();
        b.add_street(nc, na, 20, 1, "Loop Road").unwrap();
        let map = b.build().unwrap();

        let req = DeliveryRequest::new(
            Waypoint::warehouse(na),
            vec![Waypoint::delivery(nb, 0)],
            0,
        );
        let graph = build_delivery_graph(&map, &DijkstraRouter, &req).unwrap();
        assert_eq!(graph.duration_s(0, 1), Some(10));
        assert_eq!(graph.duration_s(1, 0), Some(40));
    }

    #[test]
    fn rejects_empty_request() {
        let (map, n) = grid_map();
        let req = DeliveryRequest::new(Waypoint::warehouse(n[0]), vec![], 0);
        assert!(matches!(
            build_delivery_graph(&map, &DijkstraRouter, &req),
            Err(DeliveryError::EmptyRequest)
        ));
    }

    #[test]
    fn rejects_duplicate_waypoints() {
        let (map, n) = grid_map();
        let req = DeliveryRequest::new(
            Waypoint::warehouse(n[0]),
            vec![Waypoint::delivery(n[0], 0)],
            0,
        );
        assert!(matches!(
            build_delivery_graph(&map, &DijkstraRouter, &req),
            Err(DeliveryError::DuplicateWaypoint(id)) if id == n[0]
        ));
    }

    #[test]
    fn unreachable_waypoint_fails_construction() {
        // An isolated intersection with no segments at all.
        let mut b = RoadMapBuilder::new();
        let na = b.add_intersection(Point::new(0, 0));
        let nb = b.add_intersection(Point::new(100, 0));
        let island = b.add_intersection(Point::new(500, 500));
        b.add_street(na, nb, 10, 1, "Main").unwrap();
        let map = b.build().unwrap();

        let req = DeliveryRequest::new(
            Waypoint::warehouse(na),
            vec![Waypoint::delivery(island, 0)],
            0,
        );
        let err = build_delivery_graph(&map, &DijkstraRouter, &req).unwrap_err();
        assert!(matches!(
            err,
            DeliveryError::Map(MapError::NoRoute { from, to })
                if from == na && to == island
        ));
    }
}

// ── Request loader ────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tour_map::{load_map_readers, IntersectionIndex, MapError};

    use crate::loader::load_request_reader;
    use crate::waypoint::WaypointKind;
    use crate::DeliveryError;

    const INTERSECTIONS: &str = "\
id,x,y
100,0,0
200,100,0
300,200,0
";
    const SEGMENTS: &str = "\
start,end,length,speed,street
100,200,10,1,Main
200,100,10,1,Main
200,300,10,1,Main
300,200,10,1,Main
";

    fn index() -> IntersectionIndex {
        let (_, index) =
            load_map_readers(Cursor::new(INTERSECTIONS), Cursor::new(SEGMENTS)).unwrap();
        index
    }

    fn load(request: &str) -> Result<crate::DeliveryRequest, DeliveryError> {
        load_request_reader(Cursor::new(request), &index())
    }

    #[test]
    fn loads_well_formed_request() {
        let req = load(
            "kind,intersection,service_s,start,end\n\
             warehouse,100,0,8:00:00,\n\
             delivery,200,300,9:00:00,11:30:00\n\
             delivery,300,600,,\n",
        )
        .unwrap();

        assert_eq!(req.departure_s, 8 * 3600);
        assert_eq!(req.warehouse.kind, WaypointKind::Warehouse);
        assert_eq!(req.deliveries.len(), 2);

        let constrained = &req.deliveries[0];
        assert_eq!(constrained.service_s, 300);
        assert_eq!(constrained.window.start_s, 9 * 3600);
        assert_eq!(constrained.window.end_s, 11 * 3600 + 30 * 60);

        assert!(req.deliveries[1].window.is_unconstrained());
    }

    #[test]
    fn rejects_missing_warehouse() {
        let err = load(
            "kind,intersection,service_s,start,end\n\
             delivery,200,300,,\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::NoWarehouse));
    }

    #[test]
    fn rejects_second_warehouse() {
        let err = load(
            "kind,intersection,service_s,start,end\n\
             warehouse,100,0,8:00:00,\n\
             warehouse,200,0,8:00:00,\n\
             delivery,300,300,,\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::MultipleWarehouses));
    }

    #[test]
    fn rejects_one_sided_window() {
        let err = load(
            "kind,intersection,service_s,start,end\n\
             warehouse,100,0,8:00:00,\n\
             delivery,200,300,9:00:00,\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_intersection_id() {
        let err = load(
            "kind,intersection,service_s,start,end\n\
             warehouse,100,0,8:00:00,\n\
             delivery,999,300,,\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::Map(MapError::UnknownId(999))));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = load(
            "kind,intersection,service_s,start,end\n\
             depot,100,0,8:00:00,\n\
             delivery,200,300,,\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::Parse(_)));
    }

    #[test]
    fn rejects_warehouse_without_departure_time() {
        let err = load(
            "kind,intersection,service_s,start,end\n\
             warehouse,100,0,,\n\
             delivery,200,300,,\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::Parse(_)));
    }

    #[test]
    fn loaded_request_passes_window_validation() {
        // A window shorter than its own service duration fails at load time.
        let err = load(
            "kind,intersection,service_s,start,end\n\
             warehouse,100,0,8:00:00,\n\
             delivery,200,10,0:00:00,0:00:05\n",
        )
        .unwrap_err();
        assert!(matches!(err, DeliveryError::Window(_)));
    }
}
