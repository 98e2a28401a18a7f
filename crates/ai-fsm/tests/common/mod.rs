#![allow(dead_code)]

use std::cell::Cell;

use ai_core::{AgentId, SimClock, TargetId, TickContext};
use ai_fsm::{Agent, AgentConfig, AgentEnv, BehaviorTuning, DamageOutcome, RecordingHooks, StateKind};
use ai_nav::{DirectPaths, NavPath, PathProvider, PathSource, Vec2};
use ai_perception::TargetView;
use ai_steering::SteeringTuning;
use tracing_subscriber::{fmt, EnvFilter};

pub const DT: f32 = 1.0 / 60.0;
pub const SEED: u64 = 0xA11CE;
pub const PLAYER: TargetId = TargetId(7);

/// Log output for a failing test: `RUST_LOG=ai_fsm=debug cargo test`.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// Path provider that counts calls and always answers with a three-point route.
#[derive(Debug, Default)]
pub struct CountingPaths {
    pub calls: Cell<u32>,
}

impl CountingPaths {
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

impl PathProvider for CountingPaths {
    fn find_path(&self, from: Vec2, to: Vec2) -> NavPath {
        self.calls.set(self.calls.get() + 1);
        let mid = Vec2::new((from.x + to.x) * 0.5, (from.y + to.y) * 0.5 - 20.0);
        NavPath::new(vec![from, mid, to], PathSource::Search)
    }
}

/// One agent plus the collaborators a host would own.
pub struct Rig {
    pub agent: Agent,
    pub hooks: RecordingHooks,
    pub clock: SimClock,
    pub target: Option<TargetView>,
}

impl Rig {
    pub fn new(config: AgentConfig) -> Self {
        Self::with_tuning(config, BehaviorTuning::default())
    }

    pub fn with_tuning(config: AgentConfig, tuning: BehaviorTuning) -> Self {
        init_tracing();
        let agent = Agent::with_tuning(
            AgentId(1),
            config,
            tuning,
            SteeringTuning::default(),
            Vec2::ZERO,
        )
        .expect("valid config");
        Self {
            agent,
            hooks: RecordingHooks::new(),
            clock: SimClock::new(SEED),
            target: None,
        }
    }

    pub fn target_at(&mut self, x: f32, y: f32) {
        self.target = Some(TargetView {
            id: PLAYER,
            position: Vec2::new(x, y),
        });
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn state(&self) -> StateKind {
        self.agent.state()
    }

    pub fn update(&mut self) {
        self.update_with(&DirectPaths);
    }

    pub fn update_with(&mut self, paths: &dyn PathProvider) {
        self.step(DT, paths);
    }

    pub fn update_dt(&mut self, dt: f32) {
        self.step(dt, &DirectPaths);
    }

    pub fn change_state(&mut self, next: StateKind) {
        let mut env = AgentEnv::new(self.idle_ctx(), &DirectPaths, &mut self.hooks)
            .with_target(self.target);
        self.agent.change_state(next, &mut env);
    }

    pub fn exit_state(&mut self) {
        let mut env = AgentEnv::new(self.idle_ctx(), &DirectPaths, &mut self.hooks)
            .with_target(self.target);
        self.agent.exit_state(&mut env);
    }

    pub fn damage(&mut self, amount: f32) -> DamageOutcome {
        let mut env = AgentEnv::new(self.idle_ctx(), &DirectPaths, &mut self.hooks)
            .with_target(self.target);
        self.agent.take_damage(amount, &mut env)
    }

    pub fn damage_from(&mut self, amount: f32, x: f32, y: f32) -> DamageOutcome {
        let mut env = AgentEnv::new(self.idle_ctx(), &DirectPaths, &mut self.hooks)
            .with_target(self.target);
        self.agent
            .take_damage_from(amount, PLAYER, Vec2::new(x, y), &mut env)
    }

    fn step(&mut self, dt: f32, paths: &dyn PathProvider) {
        let ctx = self.clock.advance(dt);
        let mut env = AgentEnv::new(ctx, paths, &mut self.hooks).with_target(self.target);
        self.agent.update(&mut env).expect("agent update");
    }

    fn idle_ctx(&self) -> TickContext {
        self.clock.context()
    }
}
