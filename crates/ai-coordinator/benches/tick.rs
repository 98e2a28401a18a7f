use ai_coordinator::{Coordinator, CoordinatorConfig};
use ai_core::{AgentId, TargetId};
use ai_fsm::AgentConfig;
use ai_nav::{Rect, Vec2};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn level() -> Vec<Rect> {
    (0..40)
        .map(|i| Rect::new(i as f32 * 180.0, 400.0 - (i % 4) as f32 * 60.0, 160.0, 20.0))
        .collect()
}

fn populated(agents: u64) -> Coordinator {
    let mut ai = Coordinator::new(CoordinatorConfig {
        seed: 7,
        integrate_positions: true,
        ..CoordinatorConfig::default()
    });
    ai.build_navigation(&level());
    for i in 0..agents {
        let x = (i as f32 * 71.0) % 7_000.0;
        ai.add_agent(AgentId(i), AgentConfig::default(), Vec2::new(x, 380.0))
            .expect("valid config");
    }
    ai
}

fn bench_tick(c: &mut Criterion) {
    let mut ai = populated(100);
    ai.set_target_position(TargetId(0), Vec2::new(3_500.0, 380.0));
    c.bench_function("coordinator_update_100_agents", |b| {
        b.iter(|| black_box(ai.update(black_box(1.0 / 60.0))))
    });

    let ai = populated(100);
    c.bench_function("agents_in_range_100_agents", |b| {
        b.iter(|| black_box(ai.get_agents_in_range(black_box(Vec2::new(3_500.0, 380.0)), 400.0)))
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
