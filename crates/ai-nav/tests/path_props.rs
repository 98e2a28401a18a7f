use ai_nav::{smooth_path, NavGraph, NavGraphConfig, PathFinder, PathFinderConfig, Rect, Vec2};
use proptest::prelude::*;

fn arb_point() -> impl Strategy<Value = Vec2> {
    (-1_000.0f32..1_000.0, -1_000.0f32..1_000.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn arb_platforms() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(
        (
            -1_000.0f32..1_000.0,
            -1_000.0f32..1_000.0,
            0.0f32..300.0,
            0.0f32..40.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h)),
        0..24,
    )
}

proptest! {
    #[test]
    fn path_is_never_shorter_than_two_and_keeps_endpoints(
        platforms in arb_platforms(),
        from in arb_point(),
        to in arb_point(),
        threshold in 50.0f32..600.0,
        sight in 1.0f32..800.0,
        baked in any::<bool>(),
    ) {
        let graph = NavGraph::build(&platforms, &NavGraphConfig {
            footing_margin: 12.0,
            adjacency_threshold: threshold,
            precompute_adjacency: baked,
        });
        let finder = PathFinder::new(PathFinderConfig { sight_distance: sight });
        let path = finder.find_path(&graph, from, to);

        prop_assert!(path.len() >= 2);
        prop_assert_eq!(path.start(), Some(from));
        prop_assert_eq!(path.goal(), Some(to));
    }

    #[test]
    fn smoothing_never_lengthens(
        points in prop::collection::vec(arb_point(), 2..32),
        sight in 0.0f32..2_000.0,
    ) {
        let smoothed = smooth_path(&points, sight);
        prop_assert!(smoothed.len() <= points.len());
        prop_assert_eq!(smoothed.first(), points.first());
        prop_assert_eq!(smoothed.last(), points.last());
    }
}
