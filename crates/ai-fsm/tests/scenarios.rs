mod common;

use ai_core::{AgentId, TickContext};
use ai_fsm::{Agent, AgentConfig, AgentEnv, AgentError, DamageOutcome, NoHooks, StateKind};
use ai_nav::{DirectPaths, Vec2};
use common::Rig;

#[test]
fn idle_to_chase_pushes_exactly_one_primitive() {
    let mut rig = Rig::new(AgentConfig {
        aggro_radius: 200.0,
        ..AgentConfig::default()
    });
    assert_eq!(rig.agent.position(), Vec2::ZERO);
    assert_eq!(rig.state(), StateKind::Idle);

    rig.target_at(150.0, 0.0);
    rig.update();

    assert_eq!(rig.state(), StateKind::Chase);
    assert_eq!(rig.agent.active_steering().len(), 1);
    assert_eq!(rig.hooks.alerts(), 1);
    assert!(rig.agent.velocity().x > 0.0);
}

#[test]
fn attack_fires_once_per_cooldown() {
    let mut rig = Rig::new(AgentConfig {
        attack_cooldown_ticks: 60,
        ..AgentConfig::default()
    });
    rig.target_at(30.0, 0.0);
    rig.change_state(StateKind::Attack);
    assert_eq!(rig.agent.attack_cooldown(), Some(0));

    for _ in 0..59 {
        rig.update();
    }
    assert_eq!(rig.state(), StateKind::Attack);
    assert_eq!(rig.hooks.attacks(), 0);
    assert_eq!(rig.agent.attack_cooldown(), Some(59));

    rig.update();
    assert_eq!(rig.hooks.attacks(), 1);
    assert_eq!(rig.agent.attack_cooldown(), Some(0));

    for _ in 0..60 {
        rig.update();
    }
    assert_eq!(rig.hooks.attacks(), 2);
}

#[test]
fn attacking_agent_stands_still() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(30.0, 0.0);
    rig.change_state(StateKind::Attack);
    rig.update();
    assert_eq!(rig.agent.velocity(), Vec2::ZERO);
}

#[test]
fn lethal_damage_fires_death_once() {
    let mut rig = Rig::new(AgentConfig {
        max_health: 10.0,
        ..AgentConfig::default()
    });
    rig.target_at(150.0, 0.0);
    rig.update();

    assert_eq!(rig.damage(15.0), DamageOutcome::Died);
    assert!(rig.agent.health() <= 0.0);
    assert!(!rig.agent.is_alive());
    assert_eq!(rig.state(), StateKind::Idle);
    assert!(!rig.agent.machine().is_active());
    assert_eq!(rig.hooks.deaths(), 1);
    assert!(rig.agent.steering().is_empty());
    assert_eq!(rig.agent.memories().count(), 0);

    assert_eq!(rig.damage(5.0), DamageOutcome::Ignored);
    assert_eq!(rig.hooks.deaths(), 1);
}

#[test]
fn dead_agents_refuse_to_update() {
    let mut agent = Agent::new(AgentId(3), AgentConfig::default(), Vec2::ZERO).unwrap();
    let mut hooks = NoHooks;
    let ctx = TickContext {
        tick: 0,
        dt_seconds: 1.0 / 60.0,
        seed: 1,
    };
    let mut env = AgentEnv::new(ctx, &DirectPaths, &mut hooks);
    assert_eq!(agent.take_damage(500.0, &mut env), DamageOutcome::Died);
    assert_eq!(
        agent.update(&mut env),
        Err(AgentError::Dead { agent: AgentId(3) })
    );
}

#[test]
fn rejects_non_finite_inputs() {
    let mut agent = Agent::new(AgentId(4), AgentConfig::default(), Vec2::ZERO).unwrap();
    let mut hooks = NoHooks;
    let ctx = TickContext {
        tick: 0,
        dt_seconds: f32::NAN,
        seed: 1,
    };
    let mut env = AgentEnv::new(ctx, &DirectPaths, &mut hooks);
    assert!(matches!(
        agent.update(&mut env),
        Err(AgentError::InvalidDelta { .. })
    ));

    env.ctx.dt_seconds = 1.0 / 60.0;
    agent.set_position(Vec2::new(f32::INFINITY, 0.0));
    assert!(matches!(
        agent.update(&mut env),
        Err(AgentError::NonFinitePosition { .. })
    ));
}

#[test]
fn non_positive_damage_is_ignored() {
    let mut rig = Rig::new(AgentConfig::default());
    assert_eq!(rig.damage(0.0), DamageOutcome::Ignored);
    assert_eq!(rig.damage(-3.0), DamageOutcome::Ignored);
    assert_eq!(rig.damage(f32::NAN), DamageOutcome::Ignored);
    assert_eq!(rig.agent.health(), 100.0);
    assert_eq!(rig.state(), StateKind::Idle);
}

#[test]
fn hit_from_behind_turns_the_agent_toward_the_attacker() {
    let mut rig = Rig::new(AgentConfig::default());
    // Facing right; the attacker is behind at x = -80.
    rig.damage_from(10.0, -80.0, 0.0);
    let record = rig.agent.memories().next().copied().expect("attacker remembered");
    assert_eq!(record.last_known_position, Vec2::new(-80.0, 0.0));
    assert_eq!(record.threat, 10.0);

    for _ in 0..rig.agent.tuning().stagger_ticks {
        rig.update();
    }
    assert_eq!(rig.state(), StateKind::Chase);
    rig.update();
    assert!(rig.agent.velocity().x < 0.0);
    assert_eq!(rig.agent.facing(), ai_perception::Facing::Left);
}

#[test]
fn patrol_zone_turns_wandering_agents_back() {
    let config = AgentConfig {
        patrol_zone: Some(ai_fsm::PatrolZone {
            min_x: 0.0,
            max_x: 100.0,
        }),
        ..AgentConfig::default()
    };
    let tuning = ai_fsm::BehaviorTuning {
        patrol_idle_chance: 0.0,
        ..ai_fsm::BehaviorTuning::default()
    };
    let mut rig = Rig::with_tuning(config, tuning);
    rig.agent.set_position(Vec2::new(400.0, 0.0));
    rig.change_state(StateKind::Patrol);
    rig.update();
    assert!(rig.agent.velocity().x < 0.0);
    assert!(rig.agent.velocity().length() <= rig.agent.config().patrol_speed + 1e-3);
}
