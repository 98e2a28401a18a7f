use ai_nav::Vec2;
use ai_steering::{FollowPath, SteeringPrimitive};

use crate::machine::{StateCx, StateFns};
use crate::{ChaseLocals, StateKind, StateLocals};

pub(crate) const FNS: StateFns = StateFns {
    enter,
    execute,
    exit,
};

fn enter(cx: &mut StateCx<'_>) {
    cx.body.max_speed = cx.body.config.chase_speed;
    cx.fsm.locals = StateLocals::Chase(ChaseLocals::default());

    let target = cx.percept.target_position();
    cx.hooks.on_alert(cx.id, target);
    if let Some(target) = target {
        plan(cx, target);
    }
}

fn execute(cx: &mut StateCx<'_>) -> Option<StateKind> {
    let Some(target) = cx.percept.target_position() else {
        return Some(StateKind::Patrol);
    };

    let config = cx.body.config;
    let tuning = cx.body.tuning;
    let distance = cx.body.position.distance(target);
    if distance > config.aggro_radius * tuning.chase_leave_factor {
        return Some(StateKind::Patrol);
    }
    if distance < config.attack_range && cx.percept.sees_target() {
        return Some(StateKind::Attack);
    }

    let StateLocals::Chase(locals) = &mut cx.fsm.locals else {
        return Some(StateKind::Patrol);
    };
    locals.ticks_since_plan = locals.ticks_since_plan.saturating_add(1);

    let no_path = locals.follow.is_none() && locals.seek.is_none();
    let interval = locals.ticks_since_plan >= tuning.chase_recalc_ticks;
    let moved = locals
        .planned_for
        .map_or(true, |p| p.distance(target) > tuning.chase_replan_distance);

    if no_path || interval || moved {
        plan(cx, target);
    } else if let Some(seek) = locals.seek {
        cx.body.steering.retarget(seek, target);
    }
    None
}

fn exit(_cx: &mut StateCx<'_>) {}

/// Replace whatever this state steers with a fresh route to `target`.
///
/// A multi-hop route becomes a follow-path primitive. The two-point direct fallback becomes
/// a plain seek so a degenerate path is never "followed".
fn plan(cx: &mut StateCx<'_>, target: Vec2) {
    let mut locals = match cx.fsm.locals {
        StateLocals::Chase(locals) => locals,
        _ => ChaseLocals::default(),
    };

    let path = cx.paths.find_path(cx.body.position, target);
    let waypoints = path.len();
    let source = path.source;

    if let Some(old) = locals.follow.take() {
        cx.release(old);
    }

    if waypoints > 2 {
        if let Some(seek) = locals.seek.take() {
            cx.release(seek);
        }
        let arrival = cx.body.steering.tuning().arrival_radius;
        let follow = FollowPath::new(path.points, arrival);
        locals.follow = Some(cx.push(SteeringPrimitive::FollowPath(follow)));
    } else {
        match locals.seek {
            Some(seek) => {
                cx.body.steering.retarget(seek, target);
            }
            None => locals.seek = Some(cx.push(SteeringPrimitive::Seek { target })),
        }
    }

    locals.ticks_since_plan = 0;
    locals.planned_for = Some(target);
    locals.plans = locals.plans.saturating_add(1);
    cx.fsm.locals = StateLocals::Chase(locals);

    tracing::trace!(agent = %cx.id, waypoints, source = ?source, "chase path planned");
}
