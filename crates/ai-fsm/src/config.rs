use ai_perception::VisionConfig;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal band a patrolling agent stays inside.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatrolZone {
    pub min_x: f32,
    pub max_x: f32,
}

/// Per enemy type data supplied at agent creation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentConfig {
    pub max_health: f32,
    /// Damage dealt per attack, reported through the attack hook.
    pub damage: f32,
    pub aggro_radius: f32,
    pub attack_range: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub patrol_zone: Option<PatrolZone>,
    pub vision: VisionConfig,
    /// Seconds a memory record survives without being refreshed.
    pub memory_span: f32,
    pub attack_cooldown_ticks: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            damage: 10.0,
            aggro_radius: 200.0,
            attack_range: 40.0,
            patrol_speed: 60.0,
            chase_speed: 140.0,
            patrol_zone: None,
            vision: VisionConfig::default(),
            memory_span: 3.0,
            attack_cooldown_ticks: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_health must be positive and finite (got {0})")]
    NonPositiveHealth(f32),
    #[error("{field} must be finite and non-negative (got {value})")]
    InvalidValue { field: &'static str, value: f32 },
    #[error("patrol zone is inverted (min_x {min_x} > max_x {max_x})")]
    InvertedPatrolZone { min_x: f32, max_x: f32 },
    #[error("field of view must lie in (0, 2π] radians (got {0})")]
    FieldOfView(f32),
    #[error("memory span must be positive and finite (got {0})")]
    MemorySpan(f32),
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_health.is_finite() && self.max_health > 0.0) {
            return Err(ConfigError::NonPositiveHealth(self.max_health));
        }

        let non_negative = [
            ("damage", self.damage),
            ("aggro_radius", self.aggro_radius),
            ("attack_range", self.attack_range),
            ("patrol_speed", self.patrol_speed),
            ("chase_speed", self.chase_speed),
            ("vision.range", self.vision.range),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if let Some(zone) = self.patrol_zone {
            if !(zone.min_x.is_finite() && zone.max_x.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    field: "patrol_zone",
                    value: if zone.min_x.is_finite() { zone.max_x } else { zone.min_x },
                });
            }
            if zone.min_x > zone.max_x {
                return Err(ConfigError::InvertedPatrolZone {
                    min_x: zone.min_x,
                    max_x: zone.max_x,
                });
            }
        }

        let fov = self.vision.field_of_view;
        if !(fov > 0.0 && fov <= core::f32::consts::TAU) {
            return Err(ConfigError::FieldOfView(fov));
        }

        if !(self.memory_span.is_finite() && self.memory_span > 0.0) {
            return Err(ConfigError::MemorySpan(self.memory_span));
        }

        Ok(())
    }
}

/// Engine constants shared by every enemy type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BehaviorTuning {
    /// Inclusive range the idle timer is drawn from.
    pub idle_ticks: (u32, u32),
    /// Per-tick probability of a patrolling agent pausing.
    pub patrol_idle_chance: f32,
    pub stagger_ticks: u32,
    pub chase_recalc_ticks: u32,
    /// Target displacement since the last path that forces a replan.
    pub chase_replan_distance: f32,
    /// Chase gives up beyond `aggro_radius * chase_leave_factor`.
    pub chase_leave_factor: f32,
    /// Attack resumes chasing beyond `attack_range * attack_leave_factor`.
    pub attack_leave_factor: f32,
    /// Flee is over beyond `aggro_radius * flee_safe_factor` from the threat.
    pub flee_safe_factor: f32,
    pub flee_speed_factor: f32,
    /// Fraction of max health under which a staggered agent flees.
    pub flee_health: f32,
    /// Fraction of max health above which a fleeing agent fights again.
    pub recover_health: f32,
    /// Threat assigned to a sighting.
    pub sight_threat: f32,
}

impl Default for BehaviorTuning {
    fn default() -> Self {
        Self {
            idle_ticks: (60, 180),
            patrol_idle_chance: 0.005,
            stagger_ticks: 20,
            chase_recalc_ticks: 60,
            chase_replan_distance: 48.0,
            chase_leave_factor: 1.5,
            attack_leave_factor: 1.5,
            flee_safe_factor: 2.0,
            flee_speed_factor: 1.2,
            flee_health: 0.25,
            recover_health: 0.5,
            sight_threat: 1.0,
        }
    }
}
