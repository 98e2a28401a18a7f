#![cfg(feature = "serde")]

use ai_nav::{NavGraph, NavGraphConfig, NavPath, PathSource, Rect, Vec2};

#[test]
fn level_geometry_roundtrips_through_json() {
    let platforms = vec![
        Rect::new(0.0, 400.0, 200.0, 20.0),
        Rect::new(240.0, 340.0, 120.0, 20.0),
    ];
    let json = serde_json::to_string(&platforms).expect("serialize");
    let restored: Vec<Rect> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, platforms);

    let config = NavGraphConfig {
        precompute_adjacency: true,
        ..NavGraphConfig::default()
    };
    let json = serde_json::to_string(&config).expect("serialize");
    let back: NavGraphConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);

    let graph = NavGraph::build(&restored, &back);
    assert_eq!(graph.region_count(), 2);
}

#[test]
fn path_keeps_its_source_tag() {
    let path = NavPath::direct(Vec2::ZERO, Vec2::new(10.0, 0.0), PathSource::SameRegion);
    let json = serde_json::to_string(&path).expect("serialize");
    let back: NavPath = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.source, PathSource::SameRegion);
    assert_eq!(back.points, path.points);
}
