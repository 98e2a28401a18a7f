use ai_core::{AgentId, TargetId};
use ai_nav::Vec2;

use crate::StateKind;

/// Side effects consumed by audio, animation, and combat collaborators.
///
/// All methods default to no-ops; implement only what the host cares about.
pub trait AgentHooks {
    /// Entering Chase.
    fn on_alert(&mut self, _agent: AgentId, _target: Option<Vec2>) {}

    /// Attack cooldown elapsed while in Attack.
    fn on_attack(&mut self, _agent: AgentId, _target: Option<TargetId>, _damage: f32) {}

    /// Health reached zero. Fired at most once per agent.
    fn on_death(&mut self, _agent: AgentId, _position: Vec2) {}

    fn on_transition(&mut self, _agent: AgentId, _from: StateKind, _to: StateKind) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl AgentHooks for NoHooks {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentEvent {
    Alert {
        agent: AgentId,
    },
    Attack {
        agent: AgentId,
        target: Option<TargetId>,
        damage: f32,
    },
    Death {
        agent: AgentId,
        position: Vec2,
    },
    Transition {
        agent: AgentId,
        from: StateKind,
        to: StateKind,
    },
}

/// Hooks implementation that records every callback in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingHooks {
    pub events: Vec<AgentEvent>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> usize {
        self.count(|e| matches!(e, AgentEvent::Alert { .. }))
    }

    pub fn attacks(&self) -> usize {
        self.count(|e| matches!(e, AgentEvent::Attack { .. }))
    }

    pub fn deaths(&self) -> usize {
        self.count(|e| matches!(e, AgentEvent::Death { .. }))
    }

    pub fn transitions(&self) -> impl Iterator<Item = (StateKind, StateKind)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            AgentEvent::Transition { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn count(&self, pred: impl Fn(&AgentEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl AgentHooks for RecordingHooks {
    fn on_alert(&mut self, agent: AgentId, _target: Option<Vec2>) {
        self.events.push(AgentEvent::Alert { agent });
    }

    fn on_attack(&mut self, agent: AgentId, target: Option<TargetId>, damage: f32) {
        self.events.push(AgentEvent::Attack {
            agent,
            target,
            damage,
        });
    }

    fn on_death(&mut self, agent: AgentId, position: Vec2) {
        self.events.push(AgentEvent::Death { agent, position });
    }

    fn on_transition(&mut self, agent: AgentId, from: StateKind, to: StateKind) {
        self.events.push(AgentEvent::Transition { agent, from, to });
    }
}
