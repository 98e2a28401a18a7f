use ai_core::{AgentId, SplitMix64, TargetId, TickContext};
use ai_nav::{PathProvider, Vec2};
use ai_perception::{Facing, MemoryRecord, Percept, Perception, TargetView};
use ai_steering::{SteeringBody, SteeringController, SteeringHandle, SteeringTuning};
use thiserror::Error;

use crate::machine::{StateCx, StateMachine};
use crate::{AgentConfig, AgentHooks, BehaviorTuning, ConfigError, StateKind, StateLocals};

const BEHAVIOR_STREAM: u64 = 1;
const STEERING_STREAM: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AgentError {
    #[error("{agent}: position is not finite ({x}, {y})")]
    NonFinitePosition { agent: AgentId, x: f32, y: f32 },
    #[error("{agent}: tick delta must be finite and non-negative (got {dt})")]
    InvalidDelta { agent: AgentId, dt: f32 },
    #[error("{agent} is dead")]
    Dead { agent: AgentId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Non-positive amount, or the agent was already dead.
    Ignored,
    /// Survived; now in Hurt.
    Hurt,
    /// Health reached zero; the death hook has fired.
    Died,
}

/// Collaborators an agent needs for one call.
pub struct AgentEnv<'a> {
    pub ctx: TickContext,
    /// Read-only view of the player/target this tick.
    pub target: Option<TargetView>,
    pub paths: &'a dyn PathProvider,
    pub hooks: &'a mut dyn AgentHooks,
}

impl<'a> AgentEnv<'a> {
    pub fn new(ctx: TickContext, paths: &'a dyn PathProvider, hooks: &'a mut dyn AgentHooks) -> Self {
        Self {
            ctx,
            target: None,
            paths,
            hooks,
        }
    }

    pub fn with_target(mut self, target: Option<TargetView>) -> Self {
        self.target = target;
        self
    }
}

/// Mutable per-agent data that state functions read and write.
#[derive(Debug, Clone)]
pub(crate) struct AgentBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Speed cap set by the active state.
    pub max_speed: f32,
    pub health: f32,
    pub facing: Facing,
    pub config: AgentConfig,
    pub tuning: BehaviorTuning,
    pub steering: SteeringController,
    pub perception: Perception,
}

impl AgentBody {
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.max_speed = 0.0;
    }

    /// Target visible this tick and inside the aggro radius.
    pub fn sees_within_aggro(&self, percept: &Percept) -> bool {
        percept
            .visible
            .is_some_and(|t| self.position.distance(t.position) <= self.config.aggro_radius)
    }
}

/// One hostile actor: kinematics, health, perception, steering, and its behavior machine.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    body: AgentBody,
    fsm: StateMachine,
    percept: Percept,
    alive: bool,
}

impl Agent {
    pub fn new(id: AgentId, config: AgentConfig, position: Vec2) -> Result<Self, ConfigError> {
        Self::with_tuning(
            id,
            config,
            BehaviorTuning::default(),
            SteeringTuning::default(),
            position,
        )
    }

    pub fn with_tuning(
        id: AgentId,
        config: AgentConfig,
        tuning: BehaviorTuning,
        steering: SteeringTuning,
        position: Vec2,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let perception = Perception::new(config.vision, config.memory_span, tuning.sight_threat);
        Ok(Self {
            id,
            body: AgentBody {
                position,
                velocity: Vec2::ZERO,
                max_speed: 0.0,
                health: config.max_health,
                facing: Facing::default(),
                config,
                tuning,
                steering: SteeringController::new(steering),
                perception,
            },
            fsm: StateMachine::default(),
            percept: Percept::default(),
            alive: true,
        })
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Position is owned by the physics collaborator; it writes the integrated result back here.
    pub fn set_position(&mut self, position: Vec2) {
        self.body.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Zero the velocity without touching the behavior state.
    pub fn stop(&mut self) {
        self.body.velocity = Vec2::ZERO;
    }

    pub fn max_speed(&self) -> f32 {
        self.body.max_speed
    }

    pub fn health(&self) -> f32 {
        self.body.health
    }

    pub fn max_health(&self) -> f32 {
        self.body.config.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn facing(&self) -> Facing {
        self.body.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.body.facing = facing;
    }

    pub fn state(&self) -> StateKind {
        self.fsm.current()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.fsm
    }

    pub fn config(&self) -> &AgentConfig {
        &self.body.config
    }

    pub fn tuning(&self) -> &BehaviorTuning {
        &self.body.tuning
    }

    pub fn steering(&self) -> &SteeringController {
        &self.body.steering
    }

    /// Direct access for hosts layering their own primitives. The behavior machine never
    /// removes handles it did not push.
    pub fn steering_mut(&mut self) -> &mut SteeringController {
        &mut self.body.steering
    }

    pub fn active_steering(&self) -> Vec<SteeringHandle> {
        self.body.steering.handles()
    }

    pub fn perception(&self) -> &Perception {
        &self.body.perception
    }

    pub fn memories(&self) -> impl Iterator<Item = &MemoryRecord> {
        self.body.perception.memory().records()
    }

    /// Percept computed by the most recent perception refresh.
    pub fn percept(&self) -> Percept {
        self.percept
    }

    /// Ticks elapsed since the last attack (or since entering Attack), while in Attack.
    pub fn attack_cooldown(&self) -> Option<u32> {
        match *self.fsm.locals() {
            StateLocals::Attack { cooldown } => Some(cooldown),
            _ => None,
        }
    }

    /// One tick: perception refresh, behavior execute, steering blend, facing bookkeeping.
    pub fn update(&mut self, env: &mut AgentEnv<'_>) -> Result<(), AgentError> {
        if !self.alive {
            return Err(AgentError::Dead { agent: self.id });
        }
        let dt = env.ctx.dt_seconds;
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(AgentError::InvalidDelta { agent: self.id, dt });
        }
        let p = self.body.position;
        if !p.is_finite() {
            return Err(AgentError::NonFinitePosition {
                agent: self.id,
                x: p.x,
                y: p.y,
            });
        }

        let percept = self.perceive(env.target, dt);

        let mut rng = env.ctx.rng_for_agent(self.id, BEHAVIOR_STREAM);
        self.state_cx(percept, env.paths, &mut *env.hooks, &mut rng)
            .execute();

        let mut steer_rng = env.ctx.rng_for_agent(self.id, STEERING_STREAM);
        let body = SteeringBody::new(self.body.position, self.body.velocity, self.body.max_speed);
        let out = self.body.steering.calculate(&body, dt, &mut steer_rng);
        self.body.velocity = out.desired_velocity;

        self.update_facing();
        Ok(())
    }

    /// Force a transition outside the regular update, e.g. from scripted events.
    pub fn change_state(&mut self, next: StateKind, env: &mut AgentEnv<'_>) {
        if !self.alive {
            return;
        }
        let percept = self.perceive(env.target, 0.0);
        let mut rng = env.ctx.rng_for_agent(self.id, BEHAVIOR_STREAM);
        self.state_cx(percept, env.paths, &mut *env.hooks, &mut rng)
            .change_state(next);
    }

    /// Exit the active state, removing every steering primitive it pushed. The next update
    /// re-enters the current kind. No-op when nothing is entered.
    pub fn exit_state(&mut self, env: &mut AgentEnv<'_>) {
        let percept = self.percept;
        let mut rng = env.ctx.rng_for_agent(self.id, BEHAVIOR_STREAM);
        self.state_cx(percept, env.paths, &mut *env.hooks, &mut rng)
            .exit();
    }

    /// Subtract health. Survivors are forced into Hurt regardless of their current state.
    pub fn take_damage(&mut self, amount: f32, env: &mut AgentEnv<'_>) -> DamageOutcome {
        if !self.alive || !(amount.is_finite() && amount > 0.0) {
            return DamageOutcome::Ignored;
        }

        self.body.health -= amount;
        if self.body.health <= 0.0 {
            self.body.health = 0.0;
            self.die(env.hooks);
            return DamageOutcome::Died;
        }

        self.change_state(StateKind::Hurt, env);
        DamageOutcome::Hurt
    }

    /// Like [`Agent::take_damage`], but the attacker is remembered with a damage-weighted
    /// threat so the agent knows where the hit came from even when it was not looking.
    pub fn take_damage_from(
        &mut self,
        amount: f32,
        attacker: TargetId,
        from: Vec2,
        env: &mut AgentEnv<'_>,
    ) -> DamageOutcome {
        if self.alive && amount.is_finite() && amount > 0.0 && from.is_finite() {
            self.body.perception.sense_threat(attacker, from, amount);
        }
        self.take_damage(amount, env)
    }

    /// Restore health, clamped to max. Returns the new health.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.alive && amount.is_finite() && amount > 0.0 {
            self.body.health = (self.body.health + amount).min(self.body.config.max_health);
        }
        self.body.health
    }

    /// Drop everything the agent owns: steering primitives, state, and memory records.
    pub fn teardown(&mut self) {
        self.body.steering.clear();
        self.fsm.reset();
        self.body.perception.forget_all();
        self.body.velocity = Vec2::ZERO;
        self.percept = Percept::default();
    }

    fn die(&mut self, hooks: &mut dyn AgentHooks) {
        self.alive = false;
        self.teardown();
        tracing::debug!(agent = %self.id, "agent died");
        hooks.on_death(self.id, self.body.position);
    }

    fn perceive(&mut self, target: Option<TargetView>, dt: f32) -> Percept {
        let percept =
            self.body
                .perception
                .refresh(self.body.position, self.body.facing, target, dt);
        self.percept = percept;
        percept
    }

    fn update_facing(&mut self) {
        let toward_target = match self.fsm.current() {
            StateKind::Chase | StateKind::Attack => self
                .percept
                .target_position()
                .map(|t| t.x - self.body.position.x),
            _ => None,
        };
        let dx = toward_target.unwrap_or(self.body.velocity.x);
        if let Some(facing) = Facing::from_dx(dx) {
            self.body.facing = facing;
        }
    }

    fn state_cx<'a>(
        &'a mut self,
        percept: Percept,
        paths: &'a dyn PathProvider,
        hooks: &'a mut dyn AgentHooks,
        rng: &'a mut SplitMix64,
    ) -> StateCx<'a> {
        StateCx {
            id: self.id,
            body: &mut self.body,
            fsm: &mut self.fsm,
            percept,
            paths,
            hooks,
            rng,
        }
    }
}
