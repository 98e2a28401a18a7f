use crate::machine::{StateCx, StateFns};
use crate::{StateKind, StateLocals};

pub(crate) const FNS: StateFns = StateFns {
    enter,
    execute,
    exit,
};

fn enter(cx: &mut StateCx<'_>) {
    cx.body.halt();
    cx.fsm.locals = StateLocals::Attack { cooldown: 0 };
}

fn execute(cx: &mut StateCx<'_>) -> Option<StateKind> {
    // Strikes need sight. A remembered target is investigated from Chase instead.
    let Some(seen) = cx.percept.visible else {
        return Some(if cx.percept.belief.is_some() {
            StateKind::Chase
        } else {
            StateKind::Idle
        });
    };
    let config = cx.body.config;
    if cx.body.position.distance(seen.position)
        > config.attack_range * cx.body.tuning.attack_leave_factor
    {
        return Some(StateKind::Chase);
    }

    let StateLocals::Attack { cooldown } = &mut cx.fsm.locals else {
        return Some(StateKind::Idle);
    };
    *cooldown = cooldown.saturating_add(1);
    if *cooldown < config.attack_cooldown_ticks {
        return None;
    }
    *cooldown = 0;

    cx.hooks.on_attack(cx.id, Some(seen.id), config.damage);
    None
}

fn exit(_cx: &mut StateCx<'_>) {}
