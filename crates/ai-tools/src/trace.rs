use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use ai_core::AgentId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tags emitted by the coordinator.
pub mod tags {
    /// `a` = from-state index, `b` = to-state index.
    pub const FSM_TRANSITION: &str = "fsm.transition";
    /// `a` = damage in hundredths, `b` = remaining health in hundredths.
    pub const AGENT_DAMAGED: &str = "agent.damaged";
    pub const AGENT_DIED: &str = "agent.died";
    pub const AGENT_REMOVED: &str = "agent.removed";
    /// `a` = target id (0 when none), `b` = damage in hundredths.
    pub const AGENT_ATTACK: &str = "agent.attack";
    pub const AGENT_ALERT: &str = "agent.alert";
}

/// A small, allocation-friendly trace event.
///
/// This is intentionally "dumb data" so it can be recorded during simulation and later rendered
/// by tooling. The meaning of `a` and `b` depends on the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub agent: u64,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            agent: 0,
            a: 0,
            b: 0,
        }
    }

    pub fn with_agent(mut self, agent: AgentId) -> Self {
        self.agent = agent.stable_id();
        self
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }

    pub fn for_agent(&self, agent: AgentId) -> impl Iterator<Item = &TraceEvent> + '_ {
        let id = agent.stable_id();
        self.events.iter().filter(move |e| e.agent == id)
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Sink that keeps a [`TraceLog`] readable after the sink itself has been boxed and handed
/// away. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct SharedTraceLog(Rc<RefCell<TraceLog>>);

impl SharedTraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    pub fn snapshot(&self) -> TraceLog {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }
}

impl TraceSink for SharedTraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}
