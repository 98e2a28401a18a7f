use ai_core::TargetId;
use ai_nav::Vec2;
use ai_perception::{Facing, Perception, TargetMemory, TargetView, VisionConfig};

const PLAYER: TargetId = TargetId(1);

#[test]
fn record_survives_until_span_elapses() {
    let mut memory = TargetMemory::new(3.0);
    memory.remember(PLAYER, Vec2::new(10.0, 0.0), 1.0);

    memory.age(2.9);
    let record = memory.get(PLAYER).expect("still remembered at 2.9s");
    assert!((record.time_since_sensed - 2.9).abs() < 1e-5);

    assert_eq!(memory.age(0.2), 1);
    assert!(memory.get(PLAYER).is_none());
    assert!(memory.is_empty());
}

#[test]
fn refresh_resets_age_and_counts_sightings() {
    let mut memory = TargetMemory::new(3.0);
    memory.remember(PLAYER, Vec2::new(0.0, 0.0), 1.0);
    memory.age(2.0);
    memory.remember(PLAYER, Vec2::new(40.0, 0.0), 0.5);

    let record = memory.get(PLAYER).copied().expect("record");
    assert_eq!(record.times_sensed, 2);
    assert_eq!(record.time_since_sensed, 0.0);
    assert_eq!(record.last_known_position, Vec2::new(40.0, 0.0));
    assert_eq!(record.threat, 1.0);
}

#[test]
fn most_threatening_prefers_fresh_high_threat() {
    let mut memory = TargetMemory::new(10.0);
    memory.remember(TargetId(1), Vec2::new(0.0, 0.0), 1.0);
    memory.age(4.0);
    memory.remember(TargetId(2), Vec2::new(50.0, 0.0), 1.0);

    assert_eq!(memory.most_threatening().map(|r| r.target), Some(TargetId(2)));

    memory.remember(TargetId(1), Vec2::new(0.0, 0.0), 8.0);
    assert_eq!(memory.most_threatening().map(|r| r.target), Some(TargetId(1)));
}

#[test]
fn perception_remembers_target_after_it_leaves_the_cone() {
    let mut perception = Perception::new(VisionConfig::default(), 3.0, 1.0);
    let eye = Vec2::new(0.0, 0.0);

    let seen = perception.refresh(
        eye,
        Facing::Right,
        Some(TargetView {
            id: PLAYER,
            position: Vec2::new(100.0, 0.0),
        }),
        1.0 / 60.0,
    );
    assert!(seen.sees_target());

    // Player slips behind the agent.
    let behind = TargetView {
        id: PLAYER,
        position: Vec2::new(-100.0, 0.0),
    };
    let percept = perception.refresh(eye, Facing::Right, Some(behind), 1.0);
    assert!(!percept.sees_target());
    assert_eq!(percept.target_position(), Some(Vec2::new(100.0, 0.0)));

    let percept = perception.refresh(eye, Facing::Right, Some(behind), 2.5);
    assert!(percept.belief.is_none());
    assert_eq!(percept.target_position(), None);
}

#[test]
fn sensed_threat_is_remembered_without_sight() {
    let mut perception = Perception::new(VisionConfig::default(), 3.0, 1.0);
    perception.sense_threat(PLAYER, Vec2::new(-20.0, 0.0), 5.0);

    let percept = perception.refresh(Vec2::ZERO, Facing::Right, None, 0.1);
    let belief = percept.belief.expect("belief from damage");
    assert_eq!(belief.threat, 5.0);
    assert_eq!(belief.last_known_position, Vec2::new(-20.0, 0.0));
}
