use crate::machine::{StateCx, StateFns};
use crate::{StateKind, StateLocals};

pub(crate) const FNS: StateFns = StateFns {
    enter,
    execute,
    exit,
};

fn enter(cx: &mut StateCx<'_>) {
    cx.body.halt();
    cx.fsm.locals = StateLocals::Hurt {
        remaining: cx.body.tuning.stagger_ticks,
    };
}

fn execute(cx: &mut StateCx<'_>) -> Option<StateKind> {
    if let StateLocals::Hurt { remaining } = &mut cx.fsm.locals {
        *remaining = remaining.saturating_sub(1);
        if *remaining > 0 {
            return None;
        }
    }

    let config = cx.body.config;
    if cx.body.health < config.max_health * cx.body.tuning.flee_health {
        Some(StateKind::Flee)
    } else if cx.percept.target_position().is_some() {
        Some(StateKind::Chase)
    } else {
        Some(StateKind::Patrol)
    }
}

fn exit(_cx: &mut StateCx<'_>) {}
