//! Umbrella crate that re-exports the `ai-*` building blocks for side-scroller enemies.
//!
//! Most hosts only need [`coordinator`]: register agents, hand it the level's platforms once,
//! and call `update(dt)` every frame. The lower layers are exposed for hosts that drive
//! agents themselves.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use ai_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use ai_tools as tools;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use ai_nav as nav;

#[cfg(feature = "perception")]
#[cfg_attr(docsrs, doc(cfg(feature = "perception")))]
pub use ai_perception as perception;

#[cfg(feature = "steering")]
#[cfg_attr(docsrs, doc(cfg(feature = "steering")))]
pub use ai_steering as steering;

#[cfg(feature = "fsm")]
#[cfg_attr(docsrs, doc(cfg(feature = "fsm")))]
pub use ai_fsm as fsm;

#[cfg(feature = "coordinator")]
#[cfg_attr(docsrs, doc(cfg(feature = "coordinator")))]
pub use ai_coordinator as coordinator;
