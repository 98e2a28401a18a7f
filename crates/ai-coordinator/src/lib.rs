//! Runtime for side-scroller enemy AI: one [`Coordinator`] per level owns the clock, the
//! agents, and the navigation graph, and is driven once per frame by the host loop.
//!
//! ```
//! use ai_coordinator::{Coordinator, CoordinatorConfig};
//! use ai_core::{AgentId, TargetId};
//! use ai_fsm::{AgentConfig, StateKind};
//! use ai_nav::{Rect, Vec2};
//!
//! let mut ai = Coordinator::new(CoordinatorConfig::default());
//! ai.build_navigation(&[Rect::new(0.0, 400.0, 800.0, 32.0)]);
//! ai.add_agent(AgentId(1), AgentConfig::default(), Vec2::new(0.0, 380.0)).unwrap();
//! ai.set_target_position(TargetId(0), Vec2::new(150.0, 380.0));
//!
//! let report = ai.update(1.0 / 60.0);
//! assert_eq!(report.ticked, vec![AgentId(1)]);
//! assert_eq!(ai.agent(AgentId(1)).unwrap().state(), StateKind::Chase);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod coordinator;
mod hooks;
pub mod spatial;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CoordinatorError, UpdateReport};
pub use spatial::SpatialIndex;
