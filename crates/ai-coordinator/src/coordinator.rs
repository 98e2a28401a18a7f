use std::collections::BTreeMap;
use std::sync::Arc;

use ai_core::{AgentId, SimClock, TargetId};
use ai_fsm::{Agent, AgentConfig, AgentEnv, AgentError, AgentHooks, ConfigError, DamageOutcome, NoHooks};
use ai_nav::{NavGraph, NavPath, NavService, PathFinder, PathProvider, Rect, Vec2};
use ai_perception::TargetView;
use ai_tools::{tags, TraceEvent, TraceSink};
use thiserror::Error;

use crate::hooks::{emit, hundredths, TracingHooks};
use crate::{CoordinatorConfig, SpatialIndex};

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinatorError {
    #[error("{0} is already registered")]
    DuplicateAgent(AgentId),
    #[error("{0} is not registered")]
    UnknownAgent(AgentId),
    #[error("invalid agent config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// What one [`Coordinator::update`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub tick: u64,
    /// Agents that completed the tick, ascending.
    pub ticked: Vec<AgentId>,
    /// Agents whose update failed; their velocity was zeroed and the tick moved on.
    pub failed: Vec<(AgentId, AgentError)>,
    /// Agents removed since the previous update (deaths and explicit removals).
    pub removed: Vec<AgentId>,
}

/// Process-wide registry of live agents.
///
/// Owns the shared clock, the cached navigation graph, and the range-query index, and drives
/// every agent through perception, behavior, steering, and facing once per [`update`].
///
/// [`update`]: Coordinator::update
pub struct Coordinator {
    config: CoordinatorConfig,
    clock: SimClock,
    agents: BTreeMap<AgentId, Agent>,
    nav: NavService,
    index: SpatialIndex,
    target: Option<TargetView>,
    hooks: Box<dyn AgentHooks>,
    trace: Option<Box<dyn TraceSink>>,
    removed: Vec<AgentId>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        let mut clock = SimClock::new(config.seed);
        clock.set_time_scale(config.time_scale);
        Self {
            config,
            clock,
            agents: BTreeMap::new(),
            nav: NavService::without_graph(PathFinder::new(config.path_finder)),
            index: SpatialIndex::new(config.cell_size),
            target: None,
            hooks: Box::new(NoHooks),
            trace: None,
            removed: Vec::new(),
        }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn with_hooks(mut self, hooks: Box<dyn AgentHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn AgentHooks>) {
        self.hooks = hooks;
    }

    pub fn set_trace_sink(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.trace = sink;
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.elapsed_seconds()
    }

    pub fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    /// Slow motion below `1.0`; negative and non-finite values clamp to `0.0`.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    /// Replace the cached navigation graph. Call between frames, never during `update`.
    pub fn build_navigation(&mut self, platforms: &[Rect]) -> &NavGraph {
        self.nav.rebuild(platforms, &self.config.nav);
        self.nav.graph()
    }

    pub fn nav_graph(&self) -> &Arc<NavGraph> {
        self.nav.graph()
    }

    pub fn find_path(&self, from: Vec2, to: Vec2) -> NavPath {
        self.nav.find_path(from, to)
    }

    pub fn add_agent(
        &mut self,
        id: AgentId,
        config: AgentConfig,
        position: Vec2,
    ) -> Result<(), CoordinatorError> {
        if self.agents.contains_key(&id) {
            return Err(CoordinatorError::DuplicateAgent(id));
        }
        let agent = Agent::with_tuning(
            id,
            config,
            self.config.behavior,
            self.config.steering,
            position,
        )?;
        self.index.upsert(id, position);
        self.agents.insert(id, agent);
        tracing::debug!(agent = %id, "agent registered");
        Ok(())
    }

    /// Tear down everything the agent owns within this call.
    pub fn remove_agent(&mut self, id: AgentId) -> Result<(), CoordinatorError> {
        if self.detach(id) {
            Ok(())
        } else {
            Err(CoordinatorError::UnknownAgent(id))
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// The player/target every agent perceives, or `None` when absent.
    pub fn set_target(&mut self, target: Option<TargetView>) {
        self.target = target;
    }

    pub fn set_target_position(&mut self, id: TargetId, position: Vec2) {
        self.target = Some(TargetView { id, position });
    }

    pub fn target(&self) -> Option<TargetView> {
        self.target
    }

    /// Write back a physics-integrated position.
    pub fn set_agent_position(&mut self, id: AgentId, position: Vec2) -> Result<(), CoordinatorError> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(CoordinatorError::UnknownAgent(id))?;
        agent.set_position(position);
        self.index.upsert(id, position);
        Ok(())
    }

    /// Live agents within `radius` of `point`, ascending by id.
    pub fn get_agents_in_range(&self, point: Vec2, radius: f32) -> Vec<AgentId> {
        self.index.query(point, radius)
    }

    pub fn damage_agent(&mut self, id: AgentId, amount: f32) -> Result<DamageOutcome, CoordinatorError> {
        self.apply_damage(id, amount, None)
    }

    /// Damage with a known attacker; the agent remembers where the hit came from.
    pub fn damage_agent_from(
        &mut self,
        id: AgentId,
        amount: f32,
        attacker: TargetId,
        from: Vec2,
    ) -> Result<DamageOutcome, CoordinatorError> {
        self.apply_damage(id, amount, Some((attacker, from)))
    }

    pub fn heal_agent(&mut self, id: AgentId, amount: f32) -> Result<f32, CoordinatorError> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(CoordinatorError::UnknownAgent(id))?;
        Ok(agent.heal(amount))
    }

    /// Advance the clock and run every agent once: perception, behavior, steering, facing.
    ///
    /// A failing agent is stopped and reported; it never aborts the loop for the others.
    pub fn update(&mut self, dt_seconds: f32) -> UpdateReport {
        let ctx = self.clock.advance(dt_seconds);
        let mut report = UpdateReport {
            tick: ctx.tick,
            removed: std::mem::take(&mut self.removed),
            ..UpdateReport::default()
        };

        let mut hooks = TracingHooks {
            inner: self.hooks.as_mut(),
            sink: &mut self.trace,
            tick: ctx.tick,
        };
        let paths: &dyn PathProvider = &self.nav;

        for (&id, agent) in self.agents.iter_mut() {
            let mut env = AgentEnv::new(ctx, paths, &mut hooks).with_target(self.target);
            match agent.update(&mut env) {
                Ok(()) => report.ticked.push(id),
                Err(err) => {
                    tracing::warn!(agent = %id, error = %err, "agent update failed");
                    agent.stop();
                    report.failed.push((id, err));
                }
            }

            if self.config.integrate_positions {
                let p = agent.position() + agent.velocity() * ctx.dt_seconds;
                if p.is_finite() {
                    agent.set_position(p);
                }
            }
            self.index.upsert(id, agent.position());
        }

        report
    }

    fn apply_damage(
        &mut self,
        id: AgentId,
        amount: f32,
        attacker: Option<(TargetId, Vec2)>,
    ) -> Result<DamageOutcome, CoordinatorError> {
        let agent = self
            .agents
            .get_mut(&id)
            .ok_or(CoordinatorError::UnknownAgent(id))?;
        let ctx = self.clock.context();

        let outcome = {
            let mut hooks = TracingHooks {
                inner: self.hooks.as_mut(),
                sink: &mut self.trace,
                tick: ctx.tick,
            };
            let mut env = AgentEnv::new(ctx, &self.nav, &mut hooks).with_target(self.target);
            match attacker {
                Some((attacker, from)) => agent.take_damage_from(amount, attacker, from, &mut env),
                None => agent.take_damage(amount, &mut env),
            }
        };

        if outcome != DamageOutcome::Ignored {
            let health = agent.health();
            emit(
                &mut self.trace,
                TraceEvent::new(ctx.tick, tags::AGENT_DAMAGED)
                    .with_agent(id)
                    .with_a(hundredths(amount))
                    .with_b(hundredths(health)),
            );
        }
        if outcome == DamageOutcome::Died {
            self.detach(id);
        }
        Ok(outcome)
    }

    fn detach(&mut self, id: AgentId) -> bool {
        let Some(mut agent) = self.agents.remove(&id) else {
            return false;
        };
        agent.teardown();
        self.index.remove(id);
        self.removed.push(id);
        emit(
            &mut self.trace,
            TraceEvent::new(self.clock.tick(), tags::AGENT_REMOVED).with_agent(id),
        );
        tracing::debug!(agent = %id, "agent removed");
        true
    }
}
