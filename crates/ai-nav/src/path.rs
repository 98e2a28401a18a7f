use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which branch of the path finder produced a [`NavPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathSource {
    /// The graph has no regions; direct two-point path.
    EmptyGraph,
    /// Start and goal resolve to the same region; direct two-point path.
    SameRegion,
    /// A* over regions succeeded (then smoothed).
    Search,
    /// A* exhausted the open set, or an endpoint could not be resolved; direct two-point path.
    SearchFailed,
}

impl PathSource {
    pub fn is_fallback(self) -> bool {
        matches!(self, PathSource::EmptyGraph | PathSource::SearchFailed)
    }
}

/// Ordered waypoints from start to goal.
///
/// Always holds at least the literal start and goal points, even for fallbacks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec2>,
    pub source: PathSource,
}

impl NavPath {
    pub fn new(points: Vec<Vec2>, source: PathSource) -> Self {
        Self { points, source }
    }

    pub fn direct(from: Vec2, to: Vec2, source: PathSource) -> Self {
        Self {
            points: vec![from, to],
            source,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Two points or fewer: there is nothing to follow beyond the goal itself.
    pub fn is_direct(&self) -> bool {
        self.points.len() <= 2
    }

    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn goal(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
