use ai_steering::SteeringPrimitive;

use crate::machine::{StateCx, StateFns};
use crate::{StateKind, StateLocals};

pub(crate) const FNS: StateFns = StateFns {
    enter,
    execute,
    exit,
};

fn enter(cx: &mut StateCx<'_>) {
    cx.body.max_speed = cx.body.config.chase_speed * cx.body.tuning.flee_speed_factor;

    // With no known threat, run away from whatever is in front.
    let from = cx
        .percept
        .target_position()
        .unwrap_or(cx.body.position + cx.body.facing.forward());
    let handle = cx.push(SteeringPrimitive::Flee { from });
    cx.fsm.locals = StateLocals::Flee {
        handle: Some(handle),
    };
}

fn execute(cx: &mut StateCx<'_>) -> Option<StateKind> {
    let config = cx.body.config;
    let tuning = cx.body.tuning;

    let Some(threat) = cx.percept.target_position() else {
        return Some(StateKind::Patrol);
    };
    if cx.body.position.distance(threat) > config.aggro_radius * tuning.flee_safe_factor {
        return Some(StateKind::Patrol);
    }
    if cx.body.health > config.max_health * tuning.recover_health {
        return Some(StateKind::Chase);
    }

    if let StateLocals::Flee {
        handle: Some(handle),
    } = cx.fsm.locals
    {
        cx.body.steering.retarget(handle, threat);
    }
    None
}

fn exit(_cx: &mut StateCx<'_>) {}
