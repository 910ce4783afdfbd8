//! Property test: whatever order requests and completion signals arrive
//! in, the coordinator never lets two modals be visible at once and never
//! completes an open it did not start.

#![cfg(test)]

use std::collections::HashMap;

use proptest::prelude::*;

use crate::coordinator::ModalCoordinator;
use crate::messages::{Command, LifecycleEvent, ModalPhase};
use crate::registry::StaticRegistry;

const IDS: [&str; 3] = ["a", "b", "c"];

#[derive(Debug, Clone)]
enum Op {
    Open(usize),
    Close(usize, Option<usize>),
    Toggle(usize),
    Escape,
    Cancel(usize, bool),
    ClickClose,
    AnimationEnd(usize),
    PlatformClose(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (0..3usize).prop_map(Op::Open),
        1 => (0..3usize, proptest::option::of(0..3usize)).prop_map(|(i, n)| Op::Close(i, n)),
        1 => (0..3usize).prop_map(Op::Toggle),
        1 => Just(Op::Escape),
        1 => (0..3usize, any::<bool>()).prop_map(|(i, c)| Op::Cancel(i, c)),
        1 => Just(Op::ClickClose),
        1 => (0..3usize).prop_map(Op::PlatformClose),
        // Completion signals are the most common event on a real page.
        3 => (0..3usize).prop_map(Op::AnimationEnd),
    ]
}

fn apply(
    coord: &mut ModalCoordinator<u32>,
    reg: &StaticRegistry,
    op: &Op,
) -> Vec<Command<u32>> {
    let result = match op {
        Op::Open(i) => coord.open(reg, IDS[*i], Some(1)),
        Op::Close(i, next) => coord.close(reg, IDS[*i], None, next.map(|n| IDS[n])),
        Op::Toggle(i) => coord.toggle(reg, IDS[*i], None),
        Op::Escape => coord.key_down(reg, "Escape", 2).map(|(_, c)| c),
        Op::Cancel(i, cancelable) => coord.cancel(reg, IDS[*i], *cancelable).map(|(_, c)| c),
        Op::ClickClose => coord.click(reg, None, true, 3),
        Op::AnimationEnd(i) => Ok(coord.animation_ended(reg, IDS[*i])),
        Op::PlatformClose(i) => Ok(coord.dialog_closed(reg, IDS[*i])),
    };
    // Every id exists, so the only possible failure is a close marker with
    // nothing active.
    result.unwrap_or_default()
}

proptest! {
    #[test]
    fn single_active_modal(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let reg = IDS.iter().fold(StaticRegistry::new(), |r, id| r.with_modal(id, false));
        let mut coord = ModalCoordinator::<u32>::new();
        let mut before_open: HashMap<String, usize> = HashMap::new();
        let mut after_open: HashMap<String, usize> = HashMap::new();

        for op in &ops {
            for cmd in apply(&mut coord, &reg, op) {
                if let Command::Dispatch { id, event, .. } = cmd {
                    match event {
                        LifecycleEvent::BeforeOpen => *before_open.entry(id).or_default() += 1,
                        LifecycleEvent::AfterOpen => *after_open.entry(id).or_default() += 1,
                        _ => {}
                    }
                }
            }

            let visible: Vec<_> = IDS
                .iter()
                .filter(|id| coord.phase(id) != ModalPhase::Closed)
                .collect();
            prop_assert!(visible.len() <= 1, "visible: {:?} after {:?}", visible, op);
            prop_assert_eq!(visible.first().map(|id| **id), coord.active());
            if coord.active().is_none() {
                prop_assert!(!coord.is_transitioning());
            }
            for (id, opened) in &after_open {
                prop_assert!(*opened <= before_open.get(id).copied().unwrap_or(0));
            }
        }
    }

    #[test]
    fn coordinator_never_locks_up(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let reg = IDS.iter().fold(StaticRegistry::new(), |r, id| r.with_modal(id, false));
        let mut coord = ModalCoordinator::<u32>::new();
        for op in &ops {
            apply(&mut coord, &reg, op);
        }

        // Let every running transition (and anything chained behind it) finish.
        for _ in 0..8 {
            let Some(active) = coord.active().map(str::to_string) else { break };
            if !coord.is_transitioning() {
                break;
            }
            coord.animation_ended(&reg, &active);
        }
        prop_assert!(!coord.is_transitioning());

        // Whatever happened before, a fresh request for "c" still gets there.
        coord.open(&reg, "c", None).unwrap();
        for _ in 0..4 {
            let Some(active) = coord.active().map(str::to_string) else { break };
            coord.animation_ended(&reg, &active);
        }
        prop_assert_eq!(coord.active(), Some("c"));
        prop_assert_eq!(coord.phase("c"), ModalPhase::Open);
    }
}
