use ai_core::{AgentId, SplitMix64};
use ai_nav::PathProvider;
use ai_perception::Percept;
use ai_steering::{SteeringHandle, SteeringPrimitive};

use crate::agent::AgentBody;
use crate::states;
use crate::{AgentHooks, StateKind, StateLocals};

/// `{enter, execute, exit}` for one state kind.
pub(crate) struct StateFns {
    pub enter: fn(&mut StateCx<'_>),
    /// Returns the next state, if any.
    pub execute: fn(&mut StateCx<'_>) -> Option<StateKind>,
    pub exit: fn(&mut StateCx<'_>),
}

/// Indexed by [`StateKind::index`].
static DISPATCH: [StateFns; 6] = [
    states::idle::FNS,
    states::patrol::FNS,
    states::chase::FNS,
    states::attack::FNS,
    states::flee::FNS,
    states::hurt::FNS,
];

fn fns(kind: StateKind) -> &'static StateFns {
    &DISPATCH[kind.index()]
}

/// Per-agent machine: current state, its locals, and the steering handles it owns.
#[derive(Debug, Clone, Default)]
pub struct StateMachine {
    pub(crate) current: StateKind,
    pub(crate) entered: bool,
    pub(crate) locals: StateLocals,
    pub(crate) owned: Vec<SteeringHandle>,
    pub(crate) previous: Option<StateKind>,
    pub(crate) ticks_in_state: u64,
}

impl StateMachine {
    pub fn current(&self) -> StateKind {
        self.current
    }

    pub fn previous(&self) -> Option<StateKind> {
        self.previous
    }

    /// Whether `current` has been entered and not yet exited.
    pub fn is_active(&self) -> bool {
        self.entered
    }

    pub fn locals(&self) -> &StateLocals {
        &self.locals
    }

    /// Steering handles pushed by the active state.
    pub fn owned_handles(&self) -> &[SteeringHandle] {
        &self.owned
    }

    pub fn ticks_in_state(&self) -> u64 {
        self.ticks_in_state
    }

    /// Forget the active state without running its exit and fall back to Idle.
    /// The caller owns steering cleanup.
    pub(crate) fn reset(&mut self) {
        self.current = StateKind::Idle;
        self.entered = false;
        self.locals = StateLocals::None;
        self.owned.clear();
        self.ticks_in_state = 0;
    }
}

/// Everything a state function may touch for one agent.
pub(crate) struct StateCx<'a> {
    pub id: AgentId,
    pub body: &'a mut AgentBody,
    pub fsm: &'a mut StateMachine,
    pub percept: Percept,
    pub paths: &'a dyn PathProvider,
    pub hooks: &'a mut dyn AgentHooks,
    pub rng: &'a mut SplitMix64,
}

impl StateCx<'_> {
    /// Push a primitive owned by the active state.
    pub fn push(&mut self, primitive: SteeringPrimitive) -> SteeringHandle {
        let handle = self.body.steering.push(primitive);
        self.fsm.owned.push(handle);
        handle
    }

    /// Remove a primitive this state pushed earlier. Foreign handles are left alone.
    pub fn release(&mut self, handle: SteeringHandle) -> bool {
        let Some(idx) = self.fsm.owned.iter().position(|h| *h == handle) else {
            return false;
        };
        self.fsm.owned.swap_remove(idx);
        self.body.steering.remove(handle)
    }

    pub fn enter(&mut self, kind: StateKind) {
        if self.fsm.entered {
            self.exit();
        }
        self.fsm.current = kind;
        self.fsm.entered = true;
        self.fsm.locals = StateLocals::None;
        self.fsm.ticks_in_state = 0;
        (fns(kind).enter)(self);
    }

    /// No-op when nothing is entered.
    pub fn exit(&mut self) {
        if !self.fsm.entered {
            return;
        }
        (fns(self.fsm.current).exit)(self);
        for handle in self.fsm.owned.drain(..) {
            self.body.steering.remove(handle);
        }
        self.fsm.locals = StateLocals::None;
        self.fsm.entered = false;
    }

    pub fn change_state(&mut self, next: StateKind) {
        let from = self.fsm.current;
        self.exit();
        self.fsm.previous = Some(from);
        tracing::debug!(agent = %self.id, from = %from, to = %next, "state transition");
        self.hooks.on_transition(self.id, from, next);
        self.enter(next);
    }

    /// Run the active state once, entering the current kind first if needed.
    pub fn execute(&mut self) {
        if !self.fsm.entered {
            self.enter(self.fsm.current);
        }
        self.fsm.ticks_in_state += 1;
        if let Some(next) = (fns(self.fsm.current).execute)(self) {
            self.change_state(next);
        }
    }
}
