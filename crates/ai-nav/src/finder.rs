use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{NavGraph, NavPath, PathSource, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    region: usize,
    tie: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, usize, u64) {
        (self.f, self.g, self.region, self.tie)
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reusable scratch buffers for path queries.
///
/// This avoids per-query allocations when many agents replan in the same tick.
#[derive(Debug, Default)]
pub struct PathQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<usize>>,
    regions: Vec<usize>,
    raw: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathFinderConfig {
    /// Line-of-sight proxy used by smoothing: two waypoints "see" each other when closer
    /// than this. No raycast against level geometry is performed.
    pub sight_distance: f32,
}

impl Default for PathFinderConfig {
    fn default() -> Self {
        Self {
            sight_distance: 200.0,
        }
    }
}

/// A* over navigation regions with a direct-path fallback and distance-based smoothing.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    config: PathFinderConfig,
}

impl PathFinder {
    pub fn new(config: PathFinderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PathFinderConfig {
        self.config
    }

    pub fn find_path(&self, graph: &NavGraph, from: Vec2, to: Vec2) -> NavPath {
        let mut query = PathQuery::default();
        self.find_path_with(graph, from, to, &mut query)
    }

    /// Never returns fewer than two points; the first is `from` and the last is `to`.
    pub fn find_path_with(
        &self,
        graph: &NavGraph,
        from: Vec2,
        to: Vec2,
        query: &mut PathQuery,
    ) -> NavPath {
        if graph.is_empty() {
            return NavPath::direct(from, to, PathSource::EmptyGraph);
        }

        let (Some(start), Some(goal)) = (graph.nearest_region(from), graph.nearest_region(to))
        else {
            return NavPath::direct(from, to, PathSource::SearchFailed);
        };

        if start == goal {
            return NavPath::direct(from, to, PathSource::SameRegion);
        }

        if !region_path_into(graph, start, goal, to, query) {
            tracing::trace!(start, goal, "region search exhausted; direct fallback");
            return NavPath::direct(from, to, PathSource::SearchFailed);
        }

        // Interior hops only: `from` stands on the start region and `to` on the goal region.
        query.raw.clear();
        query.raw.push(from);
        let interior = query.regions.len().saturating_sub(2);
        query
            .raw
            .extend(query.regions.iter().skip(1).take(interior).map(|&r| graph.centroid(r)));
        query.raw.push(to);

        let points = smooth_path(&query.raw, self.config.sight_distance);
        NavPath::new(points, PathSource::Search)
    }
}

/// A* from `start` to `goal` region; writes the inclusive region sequence into `query.regions`.
fn region_path_into(
    graph: &NavGraph,
    start: usize,
    goal: usize,
    goal_point: Vec2,
    query: &mut PathQuery,
) -> bool {
    let PathQuery {
        open,
        g_score,
        came_from,
        regions: out,
        ..
    } = query;
    out.clear();

    let quant = |d: f32| -> u32 { (d.max(0.0) * 16.0) as u32 };
    let heuristic = |r: usize| -> u32 { quant(graph.centroid(r).distance(goal_point)) };
    let edge_cost = |a: usize, b: usize| -> u32 {
        quant(graph.centroid(a).distance(graph.centroid(b))).saturating_add(1)
    };

    let n = graph.region_count();
    open.clear();
    g_score.clear();
    g_score.resize(n, u32::MAX);
    came_from.clear();
    came_from.resize(n, None);

    g_score[start] = 0;
    open.push(OpenNode {
        f: heuristic(start),
        g: 0,
        region: start,
        tie: 0,
    });
    let mut tie: u64 = 1;

    while let Some(node) = open.pop() {
        if node.region == goal {
            out.push(goal);
            let mut current = goal;
            while let Some(prev) = came_from[current] {
                current = prev;
                out.push(current);
            }
            out.reverse();
            return true;
        }

        if node.g != g_score[node.region] {
            // Stale heap entry.
            continue;
        }

        for next in graph.neighbors(node.region) {
            let tentative_g = node.g.saturating_add(edge_cost(node.region, next));
            if tentative_g >= g_score[next] {
                continue;
            }

            came_from[next] = Some(node.region);
            g_score[next] = tentative_g;
            open.push(OpenNode {
                f: tentative_g.saturating_add(heuristic(next)),
                g: tentative_g,
                region: next,
                tie,
            });
            tie += 1;
        }
    }

    false
}

/// Coarse visibility proxy used by [`smooth_path`].
pub fn has_line_of_sight(a: Vec2, b: Vec2, sight_distance: f32) -> bool {
    a.distance(b) < sight_distance
}

/// Greedy string-pulling with a distance-based line-of-sight proxy.
///
/// From the current waypoint, jump to the farthest later waypoint still "visible", until the
/// last waypoint is reached. Endpoints are kept; the result is never longer than the input.
pub fn smooth_path(points: &[Vec2], sight_distance: f32) -> Vec<Vec2> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);

    let mut current = 0;
    while current < last {
        let mut next = current + 1;
        for candidate in (current + 2..=last).rev() {
            if has_line_of_sight(points[current], points[candidate], sight_distance) {
                next = candidate;
                break;
            }
        }
        out.push(points[next]);
        current = next;
    }

    out
}
