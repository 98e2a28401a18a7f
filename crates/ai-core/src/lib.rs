//! Deterministic, engine-agnostic AI kernel primitives.
//!
//! Everything above this crate (navigation, perception, steering, the behavior machine) is
//! driven by a single [`TickContext`] per frame and draws randomness only from [`SplitMix64`]
//! streams derived from the world seed, so a replay with the same inputs is bit-identical.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod rng;
pub mod tick;

pub use agent::{AgentId, TargetId};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::{SimClock, TickContext};
