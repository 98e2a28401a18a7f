use crate::{rng, AgentId, SplitMix64};

/// Per-tick inputs shared by every agent update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    /// Scaled simulation seconds for this tick.
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    /// Fresh stream for `(seed, tick, agent, stream)`; two ticks never share draws.
    pub fn rng_for_agent(&self, agent: AgentId, stream: u64) -> SplitMix64 {
        let tick_seed = self.seed ^ rng::mix64(self.tick.wrapping_add(0xD1B5_4A32_D192_ED03));
        let seed = rng::derive_seed(tick_seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}

/// Shared simulated clock.
///
/// Host frames call [`SimClock::advance`] once; the returned context carries the
/// time-scaled delta. A time scale of `0.5` yields slow motion, `0.0` freezes
/// dt-driven behavior while tick-counted timers keep advancing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    tick: u64,
    elapsed_seconds: f64,
    time_scale: f32,
    seed: u64,
}

impl SimClock {
    pub fn new(seed: u64) -> Self {
        Self {
            tick: 0,
            elapsed_seconds: 0.0,
            time_scale: 1.0,
            seed,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Zero-dt context at the current tick, for events between frames (damage, scripting).
    pub fn context(&self) -> TickContext {
        TickContext {
            tick: self.tick,
            dt_seconds: 0.0,
            seed: self.seed,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Negative and non-finite scales are clamped to `0.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    pub fn advance(&mut self, dt_seconds: f32) -> TickContext {
        let raw = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        let scaled = raw * self.time_scale;
        let ctx = TickContext {
            tick: self.tick,
            dt_seconds: scaled,
            seed: self.seed,
        };
        self.tick += 1;
        self.elapsed_seconds += scaled as f64;
        ctx
    }
}
