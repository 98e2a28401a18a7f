use ai_core::{AgentId, TargetId};
use ai_fsm::{AgentHooks, StateKind};
use ai_nav::Vec2;
use ai_tools::{tags, TraceEvent, TraceSink};

/// Forwards every callback to the host hooks and mirrors it into the trace sink.
pub(crate) struct TracingHooks<'a> {
    pub inner: &'a mut dyn AgentHooks,
    pub sink: &'a mut Option<Box<dyn TraceSink>>,
    pub tick: u64,
}

impl TracingHooks<'_> {
    fn trace(&mut self, event: TraceEvent) {
        emit(self.sink, event);
    }
}

pub(crate) fn emit(sink: &mut Option<Box<dyn TraceSink>>, event: TraceEvent) {
    if let Some(sink) = sink.as_deref_mut() {
        sink.emit(event);
    }
}

impl AgentHooks for TracingHooks<'_> {
    fn on_alert(&mut self, agent: AgentId, target: Option<Vec2>) {
        self.inner.on_alert(agent, target);
        self.trace(TraceEvent::new(self.tick, tags::AGENT_ALERT).with_agent(agent));
    }

    fn on_attack(&mut self, agent: AgentId, target: Option<TargetId>, damage: f32) {
        self.inner.on_attack(agent, target, damage);
        self.trace(
            TraceEvent::new(self.tick, tags::AGENT_ATTACK)
                .with_agent(agent)
                .with_a(target.map_or(0, |t| t.0))
                .with_b(hundredths(damage)),
        );
    }

    fn on_death(&mut self, agent: AgentId, position: Vec2) {
        self.inner.on_death(agent, position);
        self.trace(TraceEvent::new(self.tick, tags::AGENT_DIED).with_agent(agent));
    }

    fn on_transition(&mut self, agent: AgentId, from: StateKind, to: StateKind) {
        self.inner.on_transition(agent, from, to);
        self.trace(
            TraceEvent::new(self.tick, tags::FSM_TRANSITION)
                .with_agent(agent)
                .with_a(from.index() as u64)
                .with_b(to.index() as u64),
        );
    }
}

/// Fixed-point encoding for trace payloads.
pub(crate) fn hundredths(value: f32) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * 100.0).round() as u64
    } else {
        0
    }
}
