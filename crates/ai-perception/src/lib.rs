//! Per-agent perception: a field-of-view sight test plus a short-lived memory, so agents
//! neither see through the back of their heads nor forget the player the instant they look
//! away.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod memory;
pub mod vision;

use ai_core::TargetId;
use ai_nav::Vec2;

pub use memory::{MemoryRecord, TargetMemory};
pub use vision::{can_see, Facing, VisionConfig};

/// Read-only view of a perceivable target for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub id: TargetId,
    pub position: Vec2,
}

/// Result of one perception refresh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Percept {
    /// Target currently in sight, with its exact position.
    pub visible: Option<TargetView>,
    /// Best belief about a target: the visible one if any, otherwise the most threatening
    /// remembered record.
    pub belief: Option<MemoryRecord>,
}

impl Percept {
    pub fn sees_target(&self) -> bool {
        self.visible.is_some()
    }

    /// Where the agent thinks its target is.
    pub fn target_position(&self) -> Option<Vec2> {
        self.visible
            .map(|v| v.position)
            .or_else(|| self.belief.map(|b| b.last_known_position))
    }
}

/// Sight + memory for one agent.
#[derive(Debug, Clone)]
pub struct Perception {
    vision: VisionConfig,
    memory: TargetMemory,
    sight_threat: f32,
}

impl Perception {
    pub fn new(vision: VisionConfig, memory_span: f32, sight_threat: f32) -> Self {
        Self {
            vision,
            memory: TargetMemory::new(memory_span),
            sight_threat,
        }
    }

    pub fn vision(&self) -> &VisionConfig {
        &self.vision
    }

    pub fn memory(&self) -> &TargetMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut TargetMemory {
        &mut self.memory
    }

    pub fn can_see(&self, eye: Vec2, facing: Facing, target: Vec2) -> bool {
        can_see(eye, facing, &self.vision, target)
    }

    /// Age memories, then record a sighting if the target is visible.
    ///
    /// Aging first means a target seen this tick always ends the tick with a fresh record.
    pub fn refresh(
        &mut self,
        eye: Vec2,
        facing: Facing,
        target: Option<TargetView>,
        dt: f32,
    ) -> Percept {
        self.memory.age(dt);

        let visible = target.filter(|t| self.can_see(eye, facing, t.position));
        if let Some(t) = visible {
            self.memory.remember(t.id, t.position, self.sight_threat);
        }

        let belief = match visible {
            Some(t) => self.memory.get(t.id).copied(),
            None => self.memory.most_threatening().copied(),
        };

        Percept { visible, belief }
    }

    /// Record a threat the agent did not see (e.g. it was hit from behind).
    pub fn sense_threat(&mut self, target: TargetId, position: Vec2, threat: f32) {
        self.memory.remember(target, position, threat);
    }

    pub fn forget_all(&mut self) {
        self.memory.clear();
    }
}
