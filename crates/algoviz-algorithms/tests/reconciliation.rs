//! Interactive structures against plain std collections.

use std::collections::VecDeque;
use std::sync::Arc;

use algoviz_algorithms::structures::{bst, linked_list, queue, stack};
use algoviz_core::{Advance, Domain, Engine, EngineConfig, EngineError, PlaybackState};
use proptest::prelude::*;

fn engine<T: Domain>(definition: algoviz_core::AlgorithmDefinition<T>) -> Engine<T> {
    Engine::with_algorithm(Arc::new(definition), None, EngineConfig::seeded(3)).expect("structures load")
}

/// Run the active command to completion, returning the number of steps.
fn settle<T: Domain>(engine: &mut Engine<T>) -> usize {
    let mut steps = 0;
    while engine.step_forward().expect("structure commands never fault") == Advance::Stepped {
        steps += 1;
        assert!(steps < 1_000, "command did not terminate");
    }
    assert_eq!(engine.state(), PlaybackState::Finished);
    steps
}

#[derive(Debug, Clone)]
enum Op {
    Insert(Option<i64>),
    Remove,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => proptest::option::weighted(0.9, -50i64..150).prop_map(Op::Insert),
        2 => Just(Op::Remove),
    ];
    prop::collection::vec(op, 0..25)
}

proptest! {
    #[test]
    fn stack_matches_vec(ops in ops()) {
        let mut engine = engine(stack::definition());
        let mut reference: Vec<i64> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(value) => {
                    engine.run_command("push", value.as_slice()).unwrap();
                    reference.extend(value);
                }
                Op::Remove => {
                    engine.run_command("pop", &[]).unwrap();
                    reference.pop();
                }
            }
            settle(&mut engine);
            prop_assert_eq!(engine.logical_state(), Some(stack::Stack(reference.clone())));
        }
    }

    #[test]
    fn queue_matches_vecdeque(ops in ops()) {
        let mut engine = engine(queue::definition());
        let mut reference: VecDeque<i64> = VecDeque::from([10, 20, 30]);

        for op in ops {
            match op {
                Op::Insert(value) => {
                    engine.run_command("enqueue", value.as_slice()).unwrap();
                    reference.extend(value);
                }
                Op::Remove => {
                    engine.run_command("dequeue", &[]).unwrap();
                    reference.pop_front();
                }
            }
            settle(&mut engine);
            prop_assert_eq!(engine.logical_state(), Some(queue::Queue(reference.clone())));
        }
    }

    #[test]
    fn list_matches_vecdeque(ops in ops(), front in prop::collection::vec(any::<bool>(), 25)) {
        let mut engine = engine(linked_list::definition());
        let mut reference: VecDeque<i64> = VecDeque::from([10, 20, 30]);

        for (op, at_head) in ops.into_iter().zip(front) {
            match op {
                Op::Insert(value) if at_head => {
                    engine.run_command("prepend", value.as_slice()).unwrap();
                    if let Some(v) = value {
                        reference.push_front(v);
                    }
                }
                Op::Insert(value) => {
                    engine.run_command("append", value.as_slice()).unwrap();
                    reference.extend(value);
                }
                Op::Remove => {
                    engine.run_command("deleteHead", &[]).unwrap();
                    reference.pop_front();
                }
            }
            settle(&mut engine);
            let values = engine.logical_state().map(|list| list.values());
            prop_assert_eq!(values, Some(Vec::from(reference.clone())));
        }
    }

    #[test]
    fn tree_keeps_every_value_in_order(values in prop::collection::vec(0i64..100, 0..20)) {
        let mut engine = engine(bst::definition());
        for &value in &values {
            engine.run_command("insert", &[value]).unwrap();
            settle(&mut engine);
        }

        let mut sorted = values.clone();
        sorted.sort_unstable();
        let tree = engine.logical_state().expect("loaded");
        prop_assert_eq!(tree.in_order(), sorted);
    }
}

#[test]
fn unknown_command_changes_nothing() {
    let mut engine = engine(stack::definition());
    engine.run_command("push", &[7]).unwrap();
    settle(&mut engine);

    let state = engine.logical_state();
    let snapshot = engine.current().cloned();
    let steps = engine.step_count();

    let err = engine.run_command("shove", &[1]).unwrap_err();
    assert!(matches!(err, EngineError::UnknownOperation { .. }));
    assert!(err.is_configuration());
    assert_eq!(engine.logical_state(), state);
    assert_eq!(engine.current().cloned(), snapshot);
    assert_eq!(engine.step_count(), steps);
    assert_eq!(engine.state(), PlaybackState::Finished);
}

#[test]
fn pop_narrates_then_removes() {
    let mut engine = engine(stack::definition());
    engine.run_command("push", &[1]).unwrap();
    settle(&mut engine);
    engine.run_command("pop", &[]).unwrap();

    engine.step_forward().unwrap();
    let highlighted = engine.current().and_then(|s| s.description.clone());
    assert_eq!(highlighted.as_deref(), Some("Popping top value: 1"));
    // removal happens on the following step
    assert_eq!(engine.logical_state(), Some(stack::Stack(vec![1])));

    engine.step_forward().unwrap();
    assert_eq!(engine.logical_state(), Some(stack::Stack(vec![])));
}

#[test]
fn first_insert_becomes_root() {
    let mut engine = engine(bst::definition());
    engine.run_command("insert", &[50]).unwrap();
    engine.step_forward().unwrap();
    let description = engine.current().and_then(|s| s.description.clone());
    assert_eq!(description.as_deref(), Some("Tree empty. 50 becomes Root."));
    assert!(engine.current().and_then(|s| s.domain_value()).is_some_and(|t| t.len() == 1));
    settle(&mut engine);
    assert_eq!(engine.logical_state().map(|t| t.len()), Some(1));
}
