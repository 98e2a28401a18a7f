//! Navigation for side-scrolling levels: platform rectangles become regions, A* finds a region
//! route, and a distance-based smoothing pass trims redundant hops.
//!
//! Every query degrades instead of failing: an empty graph, an unreachable goal, or an
//! unresolvable endpoint all produce the two-point `[from, to]` path.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod finder;
pub mod geometry;
pub mod graph;
pub mod math;
pub mod path;
pub mod provider;

pub use finder::{has_line_of_sight, smooth_path, PathFinder, PathFinderConfig, PathQuery};
pub use geometry::Rect;
pub use graph::{NavGraph, NavGraphConfig, NavRegionId, Region};
pub use math::Vec2;
pub use path::{NavPath, PathSource};
pub use provider::{DirectPaths, NavService, PathProvider};
