//! Hostile agent model and its behavior state machine.
//!
//! Each [`Agent`] runs a closed six-state machine (Idle, Patrol, Chase, Attack, Flee, Hurt)
//! through a static `{enter, execute, exit}` dispatch table. The active state owns the
//! steering handles it pushed; leaving the state removes exactly those.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod hooks;
pub mod machine;
pub mod state;

mod states;

pub use agent::{Agent, AgentEnv, AgentError, DamageOutcome};
pub use config::{AgentConfig, BehaviorTuning, ConfigError, PatrolZone};
pub use hooks::{AgentEvent, AgentHooks, NoHooks, RecordingHooks};
pub use machine::StateMachine;
pub use state::{ChaseLocals, StateKind, StateLocals};
