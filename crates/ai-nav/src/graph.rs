use crate::{Rect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backend-defined region identifier.
///
/// Equal to the region's index in [`NavGraph::regions`]; stable for a given platform list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavRegionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavGraphConfig {
    /// Standing room added above each platform's top edge.
    pub footing_margin: f32,
    /// Two regions are neighbors when their centroids are at most this far apart.
    pub adjacency_threshold: f32,
    /// Bake neighbor lists at build time instead of scanning every region per expansion.
    ///
    /// Implicit adjacency costs O(n) per A* expansion (O(n^2) per search); that is fine for
    /// a few dozen platforms. Large levels should enable this.
    pub precompute_adjacency: bool,
}

impl Default for NavGraphConfig {
    fn default() -> Self {
        Self {
            footing_margin: 20.0,
            adjacency_threshold: 250.0,
            precompute_adjacency: false,
        }
    }
}

/// Walkable area derived from one platform's top surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub id: NavRegionId,
    /// Clockwise from top-left: the top edge raised by the footing margin, then the edge itself.
    pub polygon: [Vec2; 4],
    pub centroid: Vec2,
    /// Index into the platform list the graph was built from.
    pub platform: usize,
}

impl Region {
    fn from_platform(id: NavRegionId, platform: usize, rect: &Rect, margin: f32) -> Self {
        let left = rect.x;
        let right = rect.x + rect.width;
        let surface = rect.y;
        let top = surface - margin;
        let polygon = [
            Vec2::new(left, top),
            Vec2::new(right, top),
            Vec2::new(right, surface),
            Vec2::new(left, surface),
        ];
        let centroid = Vec2::new(left + rect.width * 0.5, surface - margin * 0.5);
        Self {
            id,
            polygon,
            centroid,
            platform,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let min = self.polygon[0];
        let max = self.polygon[2];
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

/// Immutable navigation graph built from static level geometry.
///
/// Regions never change after construction; rebuilding is the only way to reflect new geometry.
/// A graph with zero regions is valid and makes every path query fall back to a direct path.
#[derive(Debug, Clone, Default)]
pub struct NavGraph {
    regions: Vec<Region>,
    adjacency_threshold: f32,
    adjacency: Option<Vec<Vec<usize>>>,
    skipped: usize,
}

impl NavGraph {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build one region per non-degenerate platform. Never fails: malformed rectangles are
    /// skipped and counted in [`NavGraph::skipped_platforms`].
    pub fn build(platforms: &[Rect], config: &NavGraphConfig) -> Self {
        let margin = if config.footing_margin.is_finite() {
            config.footing_margin.max(0.0)
        } else {
            0.0
        };
        let threshold = if config.adjacency_threshold.is_finite() {
            config.adjacency_threshold.max(0.0)
        } else {
            0.0
        };

        let mut regions = Vec::with_capacity(platforms.len());
        let mut skipped = 0;
        for (platform, rect) in platforms.iter().enumerate() {
            if rect.is_degenerate() {
                skipped += 1;
                continue;
            }
            let id = NavRegionId(regions.len() as u32);
            regions.push(Region::from_platform(id, platform, rect, margin));
        }

        let mut graph = Self {
            regions,
            adjacency_threshold: threshold,
            adjacency: None,
            skipped,
        };

        if config.precompute_adjacency {
            let baked = (0..graph.regions.len())
                .map(|i| graph.implicit_neighbors(i).collect())
                .collect();
            graph.adjacency = Some(baked);
        }

        tracing::info!(
            regions = graph.regions.len(),
            skipped = graph.skipped,
            precomputed = config.precompute_adjacency,
            "navigation graph built"
        );
        graph
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn skipped_platforms(&self) -> usize {
        self.skipped
    }

    pub fn adjacency_threshold(&self) -> f32 {
        self.adjacency_threshold
    }

    pub fn has_precomputed_adjacency(&self) -> bool {
        self.adjacency.is_some()
    }

    pub(crate) fn centroid(&self, index: usize) -> Vec2 {
        self.regions[index].centroid
    }

    /// Region whose centroid is closest to `p` (linear scan, first wins on ties).
    pub fn nearest_region(&self, p: Vec2) -> Option<usize> {
        if !p.is_finite() {
            return None;
        }
        let mut best: Option<(f32, usize)> = None;
        for (i, region) in self.regions.iter().enumerate() {
            let d2 = region.centroid.distance_squared(p);
            match best {
                None => best = Some((d2, i)),
                Some((best_d2, _)) if d2 < best_d2 => best = Some((d2, i)),
                _ => {}
            }
        }
        best.map(|(_, i)| i)
    }

    /// Neighbors of region `index` in ascending index order.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let baked = self
            .adjacency
            .as_ref()
            .map(|adj| adj[index].iter().copied());
        let implicit = if baked.is_none() {
            Some(self.implicit_neighbors(index))
        } else {
            None
        };
        baked.into_iter().flatten().chain(implicit.into_iter().flatten())
    }

    fn implicit_neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let origin = self.regions[index].centroid;
        let threshold2 = self.adjacency_threshold * self.adjacency_threshold;
        self.regions
            .iter()
            .enumerate()
            .filter(move |(j, r)| *j != index && r.centroid.distance_squared(origin) <= threshold2)
            .map(|(j, _)| j)
    }
}
