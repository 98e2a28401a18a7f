use ai_core::DeterministicRng;

use crate::machine::{StateCx, StateFns};
use crate::{StateKind, StateLocals};

pub(crate) const FNS: StateFns = StateFns {
    enter,
    execute,
    exit,
};

fn enter(cx: &mut StateCx<'_>) {
    let (lo, hi) = cx.body.tuning.idle_ticks;
    let remaining = cx.rng.range_u32(lo, hi);
    cx.fsm.locals = StateLocals::Idle { remaining };
    cx.body.halt();
}

fn execute(cx: &mut StateCx<'_>) -> Option<StateKind> {
    if cx.body.sees_within_aggro(&cx.percept) {
        return Some(StateKind::Chase);
    }

    let StateLocals::Idle { remaining } = &mut cx.fsm.locals else {
        return Some(StateKind::Patrol);
    };
    *remaining = remaining.saturating_sub(1);
    (*remaining == 0).then_some(StateKind::Patrol)
}

fn exit(_cx: &mut StateCx<'_>) {}
