use ai_core::DeterministicRng;
use ai_steering::{SteeringPrimitive, Wander, WanderBounds};

use crate::machine::{StateCx, StateFns};
use crate::StateKind;

pub(crate) const FNS: StateFns = StateFns {
    enter,
    execute,
    exit,
};

fn enter(cx: &mut StateCx<'_>) {
    cx.body.max_speed = cx.body.config.patrol_speed;

    let tuning = *cx.body.steering.tuning();
    let bounds = cx.body.config.patrol_zone.map(|z| WanderBounds {
        min_x: z.min_x,
        max_x: z.max_x,
    });
    let wander = Wander {
        angle: cx.rng.next_f32_signed() * core::f32::consts::PI,
        jitter: tuning.wander_jitter,
        radius: tuning.wander_radius,
        distance: tuning.wander_distance,
        bounds,
    };
    cx.push(SteeringPrimitive::Wander(wander));
}

fn execute(cx: &mut StateCx<'_>) -> Option<StateKind> {
    if cx.body.sees_within_aggro(&cx.percept) {
        return Some(StateKind::Chase);
    }
    cx.rng
        .chance(cx.body.tuning.patrol_idle_chance)
        .then_some(StateKind::Idle)
}

fn exit(_cx: &mut StateCx<'_>) {}
