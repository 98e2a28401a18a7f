use ai_core::DeterministicRng;
use ai_nav::Vec2;

use crate::{PrimitiveKind, SteeringBody, SteeringPrimitive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque handle returned by [`SteeringController::push`]. Never reused by the same controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringHandle(pub u32);

/// Weights for combining multiple steering primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringWeights {
    pub seek: f32,
    pub flee: f32,
    pub wander: f32,
    pub follow_path: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            seek: 1.0,
            flee: 1.5,
            wander: 0.5,
            follow_path: 1.0,
        }
    }
}

impl SteeringWeights {
    pub fn for_kind(&self, kind: PrimitiveKind) -> f32 {
        match kind {
            PrimitiveKind::Seek => self.seek,
            PrimitiveKind::Flee => self.flee,
            PrimitiveKind::Wander => self.wander,
            PrimitiveKind::FollowPath => self.follow_path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteeringTuning {
    /// Steering force limit (units: speed per second).
    pub max_force: f32,
    pub wander_jitter: f32,
    pub wander_radius: f32,
    pub wander_distance: f32,
    /// Follow-path advances to the next waypoint inside this radius.
    pub arrival_radius: f32,
    pub weights: SteeringWeights,
}

impl Default for SteeringTuning {
    fn default() -> Self {
        Self {
            max_force: 1200.0,
            wander_jitter: 3.0,
            wander_radius: 30.0,
            wander_distance: 60.0,
            arrival_radius: 16.0,
            weights: SteeringWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteeringEntry {
    pub handle: SteeringHandle,
    pub primitive: SteeringPrimitive,
    pub weight: f32,
}

/// Result of one steering calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringOutput {
    /// Weighted sum of primitive forces, truncated to the force limit.
    pub total_force: Vec2,
    /// Current velocity integrated with `total_force` and clamped to the speed cap.
    pub desired_velocity: Vec2,
}

/// Weighted sum of the active steering primitives of one agent.
///
/// The controller knows nothing about behavior states: callers push primitives, keep the
/// returned handles, and remove exactly those handles when they are done.
#[derive(Debug, Clone)]
pub struct SteeringController {
    tuning: SteeringTuning,
    entries: Vec<SteeringEntry>,
    next_handle: u32,
}

impl Default for SteeringController {
    fn default() -> Self {
        Self::new(SteeringTuning::default())
    }
}

impl SteeringController {
    pub fn new(tuning: SteeringTuning) -> Self {
        Self {
            tuning,
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn tuning(&self) -> &SteeringTuning {
        &self.tuning
    }

    /// Push with the configured weight for the primitive's kind.
    pub fn push(&mut self, primitive: SteeringPrimitive) -> SteeringHandle {
        let weight = self.tuning.weights.for_kind(primitive.kind());
        self.push_weighted(primitive, weight)
    }

    pub fn push_weighted(&mut self, primitive: SteeringPrimitive, weight: f32) -> SteeringHandle {
        let handle = SteeringHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.entries.push(SteeringEntry {
            handle,
            primitive,
            weight,
        });
        handle
    }

    /// Returns `false` (and changes nothing) when the handle is not active.
    pub fn remove(&mut self, handle: SteeringHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, handle: SteeringHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn get(&self, handle: SteeringHandle) -> Option<&SteeringPrimitive> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| &e.primitive)
    }

    pub fn get_mut(&mut self, handle: SteeringHandle) -> Option<&mut SteeringPrimitive> {
        self.entries
            .iter_mut()
            .find(|e| e.handle == handle)
            .map(|e| &mut e.primitive)
    }

    /// Point an active seek or flee primitive at a new location. Returns `false` for other
    /// kinds and unknown handles.
    pub fn retarget(&mut self, handle: SteeringHandle, point: Vec2) -> bool {
        match self.get_mut(handle) {
            Some(SteeringPrimitive::Seek { target }) => {
                *target = point;
                true
            }
            Some(SteeringPrimitive::Flee { from }) => {
                *from = point;
                true
            }
            _ => false,
        }
    }

    /// Active handles in insertion order.
    pub fn handles(&self) -> Vec<SteeringHandle> {
        self.entries.iter().map(|e| e.handle).collect()
    }

    pub fn entries(&self) -> &[SteeringEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Blend all active primitives into one force and the resulting velocity.
    ///
    /// With no active primitives the force is zero and the velocity is carried over unchanged.
    pub fn calculate<R>(&mut self, body: &SteeringBody, dt: f32, rng: &mut R) -> SteeringOutput
    where
        R: DeterministicRng + ?Sized,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut total = Vec2::ZERO;
        for entry in self.entries.iter_mut() {
            let force = entry.primitive.force(body, dt, rng);
            if force.is_finite() {
                total += force * entry.weight;
            }
        }

        let total_force = total.clamp_length(self.tuning.max_force);
        let desired_velocity =
            (body.velocity + total_force * dt).clamp_length(body.max_speed.max(0.0));
        SteeringOutput {
            total_force,
            desired_velocity,
        }
    }
}
