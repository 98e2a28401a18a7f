use ai_fsm::BehaviorTuning;
use ai_nav::{NavGraphConfig, PathFinderConfig};
use ai_steering::SteeringTuning;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinatorConfig {
    /// World seed every agent RNG stream is derived from.
    pub seed: u64,
    pub time_scale: f32,
    /// Bucket size of the range-query index, in world units.
    pub cell_size: f32,
    pub nav: NavGraphConfig,
    pub path_finder: PathFinderConfig,
    pub behavior: BehaviorTuning,
    pub steering: SteeringTuning,
    /// Apply `position += velocity * dt` after each update. Hosts with their own physics step
    /// leave this off and write positions back through `set_agent_position`.
    pub integrate_positions: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            time_scale: 1.0,
            cell_size: 128.0,
            nav: NavGraphConfig::default(),
            path_finder: PathFinderConfig::default(),
            behavior: BehaviorTuning::default(),
            steering: SteeringTuning::default(),
            integrate_positions: false,
        }
    }
}
