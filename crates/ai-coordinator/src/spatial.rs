use std::collections::BTreeMap;

use ai_core::AgentId;
use ai_nav::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Cell(i32, i32);

fn cell_for(p: Vec2, cell_size: f32) -> Cell {
    let cs = cell_size.max(1e-6);
    Cell((p.x / cs).floor() as i32, (p.y / cs).floor() as i32)
}

/// Uniform-grid bucket index over agent positions for radius queries.
///
/// Buckets are ordered maps so query results never depend on hash seeds.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f32,
    buckets: BTreeMap<Cell, Vec<AgentId>>,
    entries: BTreeMap<AgentId, (Cell, Vec2)>,
}

impl SpatialIndex {
    pub fn new(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() { cell_size.max(1e-3) } else { 64.0 };
        Self {
            cell_size,
            buckets: BTreeMap::new(),
            entries: BTreeMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Insert or move `id`.
    pub fn upsert(&mut self, id: AgentId, position: Vec2) {
        let cell = cell_for(position, self.cell_size);
        if let Some((old, _)) = self.entries.insert(id, (cell, position)) {
            if old == cell {
                return;
            }
            self.detach(old, id);
        }
        self.buckets.entry(cell).or_default().push(id);
    }

    pub fn remove(&mut self, id: AgentId) -> bool {
        match self.entries.remove(&id) {
            Some((cell, _)) => {
                self.detach(cell, id);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.entries.clear();
    }

    /// Ids within `radius` of `center` (inclusive), ascending.
    pub fn query(&self, center: Vec2, radius: f32) -> Vec<AgentId> {
        if !center.is_finite() || !(radius >= 0.0) {
            return Vec::new();
        }
        let radius2 = radius * radius;
        let within = |p: Vec2| p.distance_squared(center) <= radius2;

        let lo = cell_for(center - Vec2::new(radius, radius), self.cell_size);
        let hi = cell_for(center + Vec2::new(radius, radius), self.cell_size);
        let span = (hi.0 as i64 - lo.0 as i64 + 1).saturating_mul(hi.1 as i64 - lo.1 as i64 + 1);

        let mut out: Vec<AgentId> = if span > self.buckets.len() as i64 {
            // Huge radius: scanning every entry is cheaper than walking empty cells.
            self.entries
                .iter()
                .filter(|(_, (_, p))| within(*p))
                .map(|(id, _)| *id)
                .collect()
        } else {
            let mut found = Vec::new();
            for cy in lo.1..=hi.1 {
                for cx in lo.0..=hi.0 {
                    let Some(bucket) = self.buckets.get(&Cell(cx, cy)) else {
                        continue;
                    };
                    for id in bucket {
                        if self.entries.get(id).is_some_and(|(_, p)| within(*p)) {
                            found.push(*id);
                        }
                    }
                }
            }
            found
        };
        out.sort_unstable();
        out
    }

    fn detach(&mut self, cell: Cell, id: AgentId) {
        if let Some(bucket) = self.buckets.get_mut(&cell) {
            bucket.retain(|other| *other != id);
            if bucket.is_empty() {
                self.buckets.remove(&cell);
            }
        }
    }
}
