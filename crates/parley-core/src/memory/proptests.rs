//! Property-based tests for conversation history transitions
//!
//! These tests verify the step-ownership invariants hold across arbitrary
//! sequences of advance/undo/redo operations.

use super::*;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum HistoryOp {
    Advance,
    Undo,
    Redo,
}

fn arb_history_op() -> impl Strategy<Value = HistoryOp> {
    prop_oneof![
        3 => Just(HistoryOp::Advance),
        2 => Just(HistoryOp::Undo),
        1 => Just(HistoryOp::Redo),
    ]
}

/// Tags every step with a unique id so steps can be tracked across moves.
fn apply(memory: &mut ConversationMemory, op: HistoryOp, next_id: &mut u64) -> bool {
    match op {
        HistoryOp::Advance => {
            let step = memory.start_next_step();
            step.store_data(Data::new("id", *next_id));
            *next_id += 1;
            true
        }
        HistoryOp::Undo => memory.undo_last_step().is_ok(),
        HistoryOp::Redo => memory.redo_last_step().is_ok(),
    }
}

fn step_id(step: &ConversationStep) -> Option<u64> {
    step.get_data("id").and_then(|d| d.result.as_u64())
}

proptest! {
    #[test]
    fn prop_size_tracks_advances(advances in 0usize..40) {
        let mut memory = ConversationMemory::with_id("c", "b", 1);
        for _ in 0..advances {
            memory.start_next_step();
        }
        prop_assert_eq!(memory.size(), advances + 1);
        prop_assert_eq!(memory.all_steps().size(), advances + 1);
    }

    #[test]
    fn prop_size_invariant_holds(ops in prop::collection::vec(arb_history_op(), 0..60)) {
        let mut memory = ConversationMemory::with_id("c", "b", 1);
        let mut next_id = 1;
        for op in ops {
            let undo_before = memory.is_undo_available();
            let redo_before = memory.is_redo_available();
            let applied = apply(&mut memory, op, &mut next_id);

            match op {
                HistoryOp::Undo => prop_assert_eq!(applied, undo_before),
                HistoryOp::Redo => prop_assert_eq!(applied, redo_before),
                HistoryOp::Advance => prop_assert!(!memory.is_redo_available()),
            }
            prop_assert_eq!(memory.size(), memory.previous_steps().size() + 1);
            prop_assert_eq!(memory.all_steps().size(), memory.size());
        }
    }

    #[test]
    fn prop_steps_live_in_exactly_one_place(ops in prop::collection::vec(arb_history_op(), 0..60)) {
        let mut memory = ConversationMemory::with_id("c", "b", 1);
        memory.current_step_mut().store_data(Data::new("id", 0u64));
        let mut next_id = 1;
        for op in ops {
            apply(&mut memory, op, &mut next_id);
        }

        let mut seen: Vec<u64> = memory.all_steps().iter().filter_map(step_id).collect();
        let total = seen.len() + memory.redo_cache_size();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), memory.size());
        prop_assert!(total <= next_id as usize);
    }

    #[test]
    fn prop_undo_redo_pair_is_identity(advances in 1usize..20) {
        let mut memory = ConversationMemory::with_id("c", "b", 1);
        let mut next_id = 1;
        for _ in 0..advances {
            apply(&mut memory, HistoryOp::Advance, &mut next_id);
        }
        let current = memory.current_step().clone();
        let previous = memory.previous_steps().size();
        let redo = memory.redo_cache_size();

        memory.undo_last_step().unwrap();
        memory.redo_last_step().unwrap();

        prop_assert_eq!(memory.current_step(), &current);
        prop_assert_eq!(memory.previous_steps().size(), previous);
        prop_assert_eq!(memory.redo_cache_size(), redo);
    }
}
