use std::collections::BTreeMap;

use ai_core::TargetId;
use ai_nav::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What an agent believes about one target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemoryRecord {
    pub target: TargetId,
    pub last_known_position: Vec2,
    pub time_since_sensed: f32,
    pub threat: f32,
    pub times_sensed: u32,
}

impl MemoryRecord {
    /// Decaying rank: fresher and more dangerous records dominate.
    pub fn salience(&self) -> f32 {
        self.threat / (1.0 + self.time_since_sensed)
    }
}

/// Private short-term memory of one agent.
///
/// Records are created on first sighting, refreshed on every later one, aged each tick, and
/// evicted once older than the memory span. Only [`TargetMemory::age`] deletes records.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetMemory {
    span: f32,
    records: BTreeMap<TargetId, MemoryRecord>,
}

impl TargetMemory {
    pub fn new(span_seconds: f32) -> Self {
        Self {
            span: span_seconds.max(0.0),
            records: BTreeMap::new(),
        }
    }

    pub fn span(&self) -> f32 {
        self.span
    }

    /// Upsert: a fresh record starts at `times_sensed = 1`; refreshing resets the age, moves
    /// the position, and keeps the higher of the old and new threat.
    pub fn remember(&mut self, target: TargetId, position: Vec2, threat: f32) -> &MemoryRecord {
        let threat = threat.max(0.0);
        self.records
            .entry(target)
            .and_modify(|r| {
                r.last_known_position = position;
                r.time_since_sensed = 0.0;
                r.threat = r.threat.max(threat);
                r.times_sensed = r.times_sensed.saturating_add(1);
            })
            .or_insert(MemoryRecord {
                target,
                last_known_position: position,
                time_since_sensed: 0.0,
                threat,
                times_sensed: 1,
            })
    }

    /// Age every record by `dt` seconds and evict those older than the span.
    /// Returns how many records were evicted.
    pub fn age(&mut self, dt: f32) -> usize {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let span = self.span;
        let before = self.records.len();
        self.records.retain(|_, r| {
            r.time_since_sensed += dt;
            r.time_since_sensed <= span
        });
        before - self.records.len()
    }

    pub fn get(&self, target: TargetId) -> Option<&MemoryRecord> {
        self.records.get(&target)
    }

    pub fn most_threatening(&self) -> Option<&MemoryRecord> {
        let mut best: Option<&MemoryRecord> = None;
        for record in self.records.values() {
            match best {
                Some(b) if record.salience() <= b.salience() => {}
                _ => best = Some(record),
            }
        }
        best
    }

    pub fn records(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
