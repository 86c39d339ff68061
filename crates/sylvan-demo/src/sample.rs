//! A small hand-built village edge: a few park trees, an avenue, a forest
//! crossed by a road and a bridge, and an apple orchard.

use glam::DVec2;
use sylvan_math::{AabbXz, PolygonXz};
use sylvan_trees::{
    FeatureId, GroundState, MapArea, MapData, MapNode, MapWaySegment, Obstacle, Tags,
};

fn ring(points: &[(f64, f64)]) -> Vec<DVec2> {
    points.iter().map(|&(x, z)| DVec2::new(x, z)).collect()
}

pub fn sample_map() -> MapData {
    let nodes = vec![
        MapNode {
            id: FeatureId(101),
            pos: DVec2::new(12.0, 18.0),
            tags: Tags::new().with("natural", "tree").with("height", "16 m"),
        },
        MapNode {
            id: FeatureId(102),
            pos: DVec2::new(21.0, 24.0),
            tags: Tags::new()
                .with("natural", "tree")
                .with("species", "Malus domestica"),
        },
        MapNode {
            id: FeatureId(103),
            pos: DVec2::new(30.5, 15.0),
            tags: Tags::new()
                .with("natural", "tree")
                .with("leaf_type", "needleleaved")
                .with("height", "40 ft"),
        },
        MapNode {
            id: FeatureId(104),
            pos: DVec2::new(25.0, 40.0),
            tags: Tags::new().with("amenity", "bench"),
        },
    ];

    let way_segments = vec![
        MapWaySegment {
            id: FeatureId(201),
            start: DVec2::new(0.0, 60.0),
            end: DVec2::new(120.0, 60.0),
            tags: Tags::new().with("natural", "tree_row"),
        },
        MapWaySegment {
            id: FeatureId(202),
            start: DVec2::new(120.0, 60.0),
            end: DVec2::new(150.0, 100.0),
            tags: Tags::new().with("natural", "tree_row").with("wood", "coniferous"),
        },
        MapWaySegment {
            id: FeatureId(203),
            start: DVec2::new(0.0, 65.0),
            end: DVec2::new(200.0, 65.0),
            tags: Tags::new().with("highway", "residential"),
        },
    ];

    let road = Obstacle {
        id: FeatureId(901),
        ground_state: GroundState::On,
        positions: (0..=10)
            .map(|i| DVec2::new(100.0 + 10.0 * i as f64, 150.0))
            .collect(),
        clearance_radius: 6.0,
    };
    let bridge = Obstacle {
        id: FeatureId(902),
        ground_state: GroundState::Above,
        positions: vec![DVec2::new(150.0, 120.0), DVec2::new(150.0, 180.0)],
        clearance_radius: 8.0,
    };

    let areas = vec![
        MapArea {
            id: FeatureId(301),
            outline: PolygonXz::with_holes(
                ring(&[(100.0, 100.0), (200.0, 100.0), (200.0, 200.0), (100.0, 200.0)]),
                vec![ring(&[(160.0, 160.0), (180.0, 160.0), (180.0, 180.0), (160.0, 180.0)])],
            ),
            tags: Tags::new().with("landuse", "forest").with("leaf_type", "mixed"),
            overlaps: vec![road, bridge],
        },
        MapArea {
            id: FeatureId(302),
            outline: PolygonXz::new(ring(&[
                (0.0, 100.0),
                (60.0, 100.0),
                (40.0, 150.0),
                (0.0, 140.0),
            ])),
            tags: Tags::new().with("landuse", "orchard"),
            overlaps: Vec::new(),
        },
        MapArea {
            id: FeatureId(303),
            outline: PolygonXz::new(ring(&[
                (190.0, 0.0),
                (260.0, 0.0),
                (260.0, 50.0),
                (190.0, 50.0),
            ])),
            tags: Tags::new().with("natural", "wood").with("wood", "deciduous"),
            overlaps: Vec::new(),
        },
        MapArea {
            id: FeatureId(304),
            outline: PolygonXz::rectangle(DVec2::new(60.0, 0.0), DVec2::new(90.0, 30.0)),
            tags: Tags::new().with("building", "yes"),
            overlaps: Vec::new(),
        },
    ];

    MapData {
        nodes,
        way_segments,
        areas,
        // The deciduous wood reaches past the data extent and gets clipped.
        boundary: AabbXz::new(DVec2::ZERO, DVec2::splat(220.0)),
    }
}

/// Gentle hill centered on the forest.
pub fn hill_elevation(pos: DVec2) -> f64 {
    let d = pos.distance(DVec2::new(150.0, 150.0));
    (20.0 - 0.1 * d).max(0.0)
}
