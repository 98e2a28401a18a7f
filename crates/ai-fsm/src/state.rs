use core::fmt;

use ai_nav::Vec2;
use ai_steering::SteeringHandle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of behavior states. Initial state is [`StateKind::Idle`]; there is no terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StateKind {
    #[default]
    Idle,
    Patrol,
    Chase,
    Attack,
    Flee,
    Hurt,
}

impl StateKind {
    pub const ALL: [StateKind; 6] = [
        StateKind::Idle,
        StateKind::Patrol,
        StateKind::Chase,
        StateKind::Attack,
        StateKind::Flee,
        StateKind::Hurt,
    ];

    /// Position in [`StateKind::ALL`]; also the dispatch table slot.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Patrol => "patrol",
            StateKind::Chase => "chase",
            StateKind::Attack => "attack",
            StateKind::Flee => "flee",
            StateKind::Hurt => "hurt",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chase bookkeeping: which primitive is steering and when the path was last planned.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChaseLocals {
    pub follow: Option<SteeringHandle>,
    pub seek: Option<SteeringHandle>,
    pub ticks_since_plan: u32,
    /// Target position the current path was planned toward.
    pub planned_for: Option<Vec2>,
    pub plans: u32,
}

/// Counters local to the active state. Reset on every `enter`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StateLocals {
    #[default]
    None,
    Idle {
        remaining: u32,
    },
    Chase(ChaseLocals),
    Attack {
        cooldown: u32,
    },
    Flee {
        handle: Option<SteeringHandle>,
    },
    Hurt {
        remaining: u32,
    },
}
