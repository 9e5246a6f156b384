use crate::{merge, Queue};
use proptest::collection::vec;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    InsertHead(String),
    InsertTail(String),
    RemoveHead,
    RemoveTail,
    DeleteMiddle,
    DeleteDuplicates,
    SwapPairs,
    Reverse,
    ReverseK(usize),
    Sort(bool),
    Ascend,
    Descend,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[a-d]{0,2}".prop_map(Op::InsertHead),
        3 => "[a-d]{0,2}".prop_map(Op::InsertTail),
        1 => Just(Op::RemoveHead),
        1 => Just(Op::RemoveTail),
        1 => Just(Op::DeleteMiddle),
        1 => Just(Op::DeleteDuplicates),
        1 => Just(Op::SwapPairs),
        1 => Just(Op::Reverse),
        1 => (0_usize..5).prop_map(Op::ReverseK),
        1 => any::<bool>().prop_map(Op::Sort),
        1 => Just(Op::Ascend),
        1 => Just(Op::Descend),
    ]
}

/// Keep the values that compare as `keep` (or equal) against everything to
/// their right.
fn keep_monotonic(model: &mut Vec<String>, keep: std::cmp::Ordering) {
    let kept: Vec<String> = (0..model.len())
        .filter(|&i| model[i + 1..].iter().all(|right| model[i].cmp(right) != keep.reverse()))
        .map(|i| model[i].clone())
        .collect();
    *model = kept;
}

/// Apply `op` to both the queue and a `Vec` model of it.
fn apply(queue: &mut Queue, model: &mut Vec<String>, op: Op) {
    use std::cmp::Ordering;
    match op {
        Op::InsertHead(value) => {
            queue.insert_head(&value).unwrap();
            model.insert(0, value);
        }
        Op::InsertTail(value) => {
            queue.insert_tail(&value).unwrap();
            model.push(value);
        }
        Op::RemoveHead => {
            let removed = queue.remove_head(None).map(|e| e.into_value());
            let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
            assert_eq!(removed, expected);
        }
        Op::RemoveTail => {
            assert_eq!(queue.remove_tail(None).map(|e| e.into_value()), model.pop());
        }
        Op::DeleteMiddle => {
            assert_eq!(queue.delete_middle().is_ok(), !model.is_empty());
            if !model.is_empty() {
                model.remove(model.len() / 2);
            }
        }
        Op::DeleteDuplicates => {
            assert_eq!(queue.delete_duplicates().is_ok(), !model.is_empty());
            let kept: Vec<String> = (0..model.len())
                .filter(|&i| {
                    (i == 0 || model[i - 1] != model[i])
                        && (i + 1 == model.len() || model[i + 1] != model[i])
                })
                .map(|i| model[i].clone())
                .collect();
            *model = kept;
        }
        Op::SwapPairs => {
            queue.swap_pairs();
            model.chunks_exact_mut(2).for_each(|pair| pair.swap(0, 1));
        }
        Op::Reverse => {
            queue.reverse();
            model.reverse();
        }
        Op::ReverseK(k) => {
            queue.reverse_k(k);
            if k >= 2 {
                model.chunks_exact_mut(k).for_each(|group| group.reverse());
            }
        }
        Op::Sort(descending) => {
            queue.sort(descending);
            model.sort();
            if descending {
                model.reverse();
            }
        }
        Op::Ascend => {
            keep_monotonic(model, Ordering::Less);
            assert_eq!(queue.ascend(), model.len());
        }
        Op::Descend => {
            keep_monotonic(model, Ordering::Greater);
            assert_eq!(queue.descend(), model.len());
        }
    }
}

proptest! {
    #[test]
    fn queue_matches_model(ops in vec(op(), 0..64)) {
        let mut queue = Queue::new();
        let mut model = Vec::new();
        for op in ops {
            apply(&mut queue, &mut model, op);
            queue.assert_well_formed();
            prop_assert_eq!(queue.iter().collect::<Vec<_>>(), model.clone());
            prop_assert_eq!(queue.size(), model.len());
        }
    }

    #[test]
    fn reverse_is_an_involution(values in vec("[a-z]{0,3}", 0..7)) {
        let mut queue: Queue = values.iter().cloned().collect();
        let original = queue.clone();
        queue.reverse();
        queue.reverse();
        prop_assert_eq!(queue, original);
    }

    #[test]
    fn sort_directions_mirror_each_other(values in vec("[a-c]{0,2}", 0..32)) {
        let mut ascending: Queue = values.iter().cloned().collect();
        ascending.sort(false);
        let mut descending = ascending.clone();
        descending.sort(true);
        prop_assert_eq!(
            descending.iter().collect::<Vec<_>>(),
            ascending.iter().rev().collect::<Vec<_>>()
        );

        let once = ascending.clone();
        ascending.sort(false);
        prop_assert_eq!(ascending, once);
    }

    #[test]
    fn merge_matches_model(
        lists in vec(vec("[a-e]{1,2}", 0..8), 0..5),
        descending in any::<bool>()
    ) {
        let mut expected: Vec<String> = lists.iter().flatten().cloned().collect();
        expected.sort();
        if descending {
            expected.reverse();
        }
        let mut queues: Vec<Queue> = lists
            .into_iter()
            .map(|mut list| {
                list.sort();
                if descending {
                    list.reverse();
                }
                list.into_iter().collect()
            })
            .collect();

        prop_assert_eq!(merge(&mut queues, descending), Ok(expected.len()));
        if let Some((first, rest)) = queues.split_first() {
            first.assert_well_formed();
            prop_assert_eq!(first.iter().collect::<Vec<_>>(), expected);
            prop_assert!(rest.iter().all(Queue::is_empty));
        }
    }
}
