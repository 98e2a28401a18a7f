mod common;

use ai_fsm::{AgentConfig, BehaviorTuning, DamageOutcome, StateKind};
use ai_nav::Vec2;
use common::Rig;

fn quick_tuning() -> BehaviorTuning {
    BehaviorTuning {
        idle_ticks: (3, 3),
        stagger_ticks: 3,
        ..BehaviorTuning::default()
    }
}

#[test]
fn idle_chases_a_sighted_target_inside_aggro() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(150.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);
}

#[test]
fn idle_ignores_a_target_outside_aggro() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(260.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Idle);
}

#[test]
fn idle_patrols_when_the_timer_expires() {
    let mut rig = Rig::with_tuning(AgentConfig::default(), quick_tuning());
    rig.update();
    rig.update();
    assert_eq!(rig.state(), StateKind::Idle);
    rig.update();
    assert_eq!(rig.state(), StateKind::Patrol);
}

#[test]
fn patrol_pauses_into_idle() {
    let tuning = BehaviorTuning {
        patrol_idle_chance: 1.0,
        ..quick_tuning()
    };
    let mut rig = Rig::with_tuning(AgentConfig::default(), tuning);
    rig.change_state(StateKind::Patrol);
    rig.update();
    assert_eq!(rig.state(), StateKind::Idle);
}

#[test]
fn patrol_chases_a_sighted_target() {
    let tuning = BehaviorTuning {
        patrol_idle_chance: 0.0,
        ..quick_tuning()
    };
    let mut rig = Rig::with_tuning(AgentConfig::default(), tuning);
    rig.change_state(StateKind::Patrol);
    assert_eq!(rig.state(), StateKind::Patrol);

    rig.target_at(100.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);
}

#[test]
fn chase_gives_up_beyond_aggro_hysteresis() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(150.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);

    // Past aggro (200) but inside 1.5x: keep chasing.
    rig.target_at(290.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);

    rig.target_at(310.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Patrol);
}

#[test]
fn chase_follows_memory_then_gives_up_when_it_fades() {
    let config = AgentConfig {
        memory_span: 0.5,
        ..AgentConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.target_at(150.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);

    rig.clear_target();
    rig.update_dt(0.3);
    assert_eq!(rig.state(), StateKind::Chase);
    assert_eq!(
        rig.agent.percept().target_position(),
        Some(Vec2::new(150.0, 0.0))
    );

    rig.update_dt(0.3);
    assert_eq!(rig.state(), StateKind::Patrol);
}

#[test]
fn chase_attacks_inside_attack_range() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(150.0, 0.0);
    rig.update();
    rig.target_at(30.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Attack);
}

#[test]
fn attack_resumes_chase_beyond_attack_hysteresis() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(30.0, 0.0);
    rig.change_state(StateKind::Attack);

    // attack_range 40, leave at 60.
    rig.target_at(55.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Attack);

    rig.target_at(70.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);
}

#[test]
fn attack_idles_when_target_is_lost() {
    let config = AgentConfig {
        memory_span: 0.5,
        ..AgentConfig::default()
    };
    let mut rig = Rig::new(config);
    rig.target_at(30.0, 0.0);
    rig.change_state(StateKind::Attack);

    rig.clear_target();
    rig.update_dt(0.6);
    assert_eq!(rig.state(), StateKind::Idle);
}

#[test]
fn hurt_flees_at_low_health_after_stagger() {
    let mut rig = Rig::with_tuning(AgentConfig::default(), quick_tuning());
    assert_eq!(rig.damage(80.0), DamageOutcome::Hurt);
    assert_eq!(rig.state(), StateKind::Hurt);

    rig.update();
    rig.update();
    assert_eq!(rig.state(), StateKind::Hurt);
    rig.update();
    assert_eq!(rig.state(), StateKind::Flee);
}

#[test]
fn hurt_chases_when_a_target_is_known() {
    let mut rig = Rig::with_tuning(AgentConfig::default(), quick_tuning());
    rig.target_at(150.0, 0.0);
    rig.damage(10.0);
    for _ in 0..3 {
        rig.update();
    }
    assert_eq!(rig.state(), StateKind::Chase);
}

#[test]
fn hurt_patrols_without_a_target() {
    let mut rig = Rig::with_tuning(AgentConfig::default(), quick_tuning());
    rig.damage(10.0);
    for _ in 0..3 {
        rig.update();
    }
    assert_eq!(rig.state(), StateKind::Patrol);
}

#[test]
fn hurt_preempts_every_state() {
    for kind in StateKind::ALL {
        let mut rig = Rig::with_tuning(AgentConfig::default(), quick_tuning());
        rig.target_at(150.0, 0.0);
        rig.change_state(kind);
        rig.damage(1.0);
        assert_eq!(rig.state(), StateKind::Hurt, "from {kind}");
        assert!(rig.agent.steering().is_empty(), "from {kind}");
    }
}

#[test]
fn flee_fights_again_once_health_recovers() {
    let tuning = BehaviorTuning {
        stagger_ticks: 1,
        ..BehaviorTuning::default()
    };
    let mut rig = Rig::with_tuning(AgentConfig::default(), tuning);
    rig.damage_from(80.0, -50.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Flee);

    rig.update();
    assert_eq!(rig.state(), StateKind::Flee);

    assert_eq!(rig.agent.heal(40.0), 60.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);
}

#[test]
fn flee_ends_when_far_from_the_threat() {
    let tuning = BehaviorTuning {
        stagger_ticks: 1,
        ..BehaviorTuning::default()
    };
    let mut rig = Rig::with_tuning(AgentConfig::default(), tuning);
    rig.damage_from(80.0, -50.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Flee);

    // aggro 200, safe beyond 400.
    rig.agent.set_position(Vec2::new(500.0, 0.0));
    rig.update();
    assert_eq!(rig.state(), StateKind::Patrol);
}

#[test]
fn flee_steers_away_from_the_threat() {
    let tuning = BehaviorTuning {
        stagger_ticks: 1,
        ..BehaviorTuning::default()
    };
    let mut rig = Rig::with_tuning(AgentConfig::default(), tuning);
    rig.damage_from(80.0, -50.0, 0.0);
    rig.update();
    rig.update();
    assert_eq!(rig.state(), StateKind::Flee);
    assert!(rig.agent.velocity().x > 0.0);
}

#[test]
fn heal_is_clamped_to_max_health() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.damage(30.0);
    assert_eq!(rig.agent.heal(1000.0), 100.0);
}

#[test]
fn attack_investigates_when_the_target_slips_behind() {
    let mut rig = Rig::new(AgentConfig::default());
    rig.target_at(30.0, 0.0);
    rig.change_state(StateKind::Attack);

    // Inside attack range but behind a right-facing agent: out of the vision cone.
    rig.target_at(-20.0, 0.0);
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);
    assert!(!rig.agent.percept().sees_target());

    // The remembered spot is inside attack range, yet Chase must not re-enter Attack blind.
    rig.update();
    assert_eq!(rig.state(), StateKind::Chase);
    assert_eq!(rig.hooks.attacks(), 0);
}

#[test]
fn attacks_only_land_on_a_visible_target() {
    let mut rig = Rig::new(AgentConfig {
        attack_cooldown_ticks: 10,
        ..AgentConfig::default()
    });
    rig.target_at(30.0, 0.0);
    rig.change_state(StateKind::Attack);
    rig.target_at(-20.0, 0.0);

    for _ in 0..400 {
        let before = rig.hooks.attacks();
        rig.update();
        if rig.hooks.attacks() > before {
            assert!(rig.agent.percept().sees_target());
        }
    }
}
