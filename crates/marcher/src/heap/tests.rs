use super::*;
use proptest::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn by_id(a: ElementId, b: ElementId) -> Ordering {
    a.cmp(&b)
}

fn drain<K: KeyOrder + ?Sized>(heap: &mut IndexedHeap, keys: &K) -> Vec<ElementId> {
    let mut out = Vec::new();
    while let Some(id) = heap.poll(keys) {
        out.push(id);
    }
    out
}

#[test]
fn poll_returns_ascending_for_small_min_heap() {
    let mut h = IndexedHeap::new(10, HeapKind::Min);
    for id in [5, 3, 8, 1] {
        assert!(h.add(id, &by_id));
    }
    assert_eq!(h.len(), 4);
    assert_eq!(h.peek(), Some(1));
    assert_eq!(drain(&mut h, &by_id), vec![1, 3, 5, 8]);
    assert!(h.is_empty());
    assert_eq!(h.poll(&by_id), None);
    assert_eq!(h.peek(), None);
}

#[test]
fn max_heap_drains_descending() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut ids: Vec<usize> = (0..64).collect();
    ids.shuffle(&mut rng);
    let mut h = IndexedHeap::new(64, HeapKind::Max);
    for &id in &ids {
        h.add(id, &by_id);
    }
    let expected: Vec<usize> = (0..64).rev().collect();
    assert_eq!(drain(&mut h, &by_id), expected);
}

#[test]
fn add_and_remove_are_idempotent() {
    let mut h = IndexedHeap::new(4, HeapKind::Min);
    assert!(h.add(2, &by_id));
    assert!(!h.add(2, &by_id));
    assert_eq!(h.len(), 1);
    assert!(h.remove(2, &by_id));
    assert!(!h.remove(2, &by_id));
    assert!(!h.contains(2));
    assert!(!h.update(2, &by_id));
}

#[test]
#[should_panic(expected = "out of range")]
fn add_out_of_range_panics() {
    let mut h = IndexedHeap::new(3, HeapKind::Min);
    h.add(3, &by_id);
}

#[test]
fn update_reads_live_keys() {
    let mut keys = vec![4.0, 3.0, 2.0, 1.0];
    let mut h = IndexedHeap::new(4, HeapKind::Min);
    for id in 0..4 {
        h.add(id, keys.as_slice());
    }
    assert_eq!(h.peek(), Some(3));

    // decrease-key
    keys[0] = 0.5;
    assert!(h.update(0, keys.as_slice()));
    assert_eq!(h.peek(), Some(0));

    // increase-key on the root
    keys[0] = 10.0;
    h.update(0, keys.as_slice());
    assert_eq!(h.peek(), Some(3));
    assert!(h.is_heap(keys.as_slice()));
    assert_eq!(drain(&mut h, keys.as_slice()), vec![3, 2, 1, 0]);
}

#[test]
fn update_all_rebuilds_after_bulk_change() {
    let mut keys: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let mut h = IndexedHeap::new(20, HeapKind::Min);
    h.set_all(keys.as_slice());
    assert_eq!(h.len(), 20);
    for k in keys.iter_mut() {
        *k = -*k;
    }
    assert!(!h.is_heap(keys.as_slice()));
    h.update_all(keys.as_slice());
    assert!(h.is_heap(keys.as_slice()));
    assert_eq!(h.peek(), Some(19));
}

#[test]
fn set_ignores_duplicates_and_clear_keeps_capacity() {
    let keys = [3.0, 1.0, 2.0, 0.0, 5.0];
    let mut h = IndexedHeap::new(5, HeapKind::Max);
    h.set(&[0, 2, 2, 4, 0], &keys[..]);
    assert_eq!(h.len(), 3);
    assert_eq!(h.peek(), Some(4));
    assert!(h.is_heap(&keys[..]));
    h.clear();
    assert!(h.is_empty());
    assert_eq!(h.capacity(), 5);
    assert!(!h.contains(4));
    assert!(h.is_heap(&keys[..]));
}

#[test]
fn peek_last_and_poll_last_find_opposite_extreme() {
    let keys = [7.0, 2.0, 9.0, 4.0, 1.0, 8.0];
    let mut h = IndexedHeap::new(6, HeapKind::Min);
    h.set_all(&keys[..]);
    assert_eq!(h.peek_last(&keys[..]), Some(2));
    assert_eq!(h.poll_last(&keys[..]), Some(2));
    assert_eq!(h.peek_last(&keys[..]), Some(5));
    assert!(h.is_heap(&keys[..]));
    assert_eq!(h.peek(), Some(4));

    let mut single = IndexedHeap::new(2, HeapKind::Min);
    assert_eq!(single.peek_last(&keys[..]), None);
    single.add(1, &keys[..]);
    assert_eq!(single.poll_last(&keys[..]), Some(1));
    assert!(single.is_empty());
}

#[test]
fn nan_keys_do_not_break_invariants() {
    let keys = [f64::NAN, 1.0, f64::INFINITY, -0.0, 0.0];
    let mut h = IndexedHeap::new(5, HeapKind::Min);
    h.set_all(&keys[..]);
    assert!(h.is_heap(&keys[..]));
    assert_eq!(h.poll(&keys[..]), Some(3));
}

#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
    Poll,
    PollLast,
    Rekey(usize, i32),
}

fn op_strategy(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..n).prop_map(Op::Add),
        2 => (0..n).prop_map(Op::Remove),
        1 => Just(Op::Poll),
        1 => Just(Op::PollLast),
        2 => ((0..n), -50i32..50).prop_map(|(id, k)| Op::Rekey(id, k)),
    ]
}

proptest! {
    #[test]
    fn random_ops_preserve_invariants(
        kind in prop_oneof![Just(HeapKind::Min), Just(HeapKind::Max)],
        init in prop::collection::vec(-50i32..50, 32),
        ops in prop::collection::vec(op_strategy(32), 1..200),
    ) {
        let mut keys: Vec<f64> = init.iter().map(|&k| k as f64).collect();
        let mut h = IndexedHeap::new(keys.len(), kind);
        let mut members = std::collections::BTreeSet::new();
        for op in ops {
            match op {
                Op::Add(id) => {
                    prop_assert_eq!(h.add(id, keys.as_slice()), members.insert(id));
                }
                Op::Remove(id) => {
                    prop_assert_eq!(h.remove(id, keys.as_slice()), members.remove(&id));
                }
                Op::Poll => {
                    let expect = members.iter().copied().reduce(|a, b| {
                        let better = match kind {
                            HeapKind::Min => keys[b] < keys[a],
                            HeapKind::Max => keys[b] > keys[a],
                        };
                        if better { b } else { a }
                    });
                    let got = h.poll(keys.as_slice());
                    prop_assert_eq!(got.is_some(), expect.is_some());
                    if let (Some(g), Some(e)) = (got, expect) {
                        prop_assert_eq!(keys[g], keys[e]);
                        members.remove(&g);
                    }
                }
                Op::PollLast => {
                    if let Some(g) = h.poll_last(keys.as_slice()) {
                        for &m in &members {
                            match kind {
                                HeapKind::Min => prop_assert!(keys[g] >= keys[m]),
                                HeapKind::Max => prop_assert!(keys[g] <= keys[m]),
                            }
                        }
                        members.remove(&g);
                    } else {
                        prop_assert!(members.is_empty());
                    }
                }
                Op::Rekey(id, k) => {
                    keys[id] = k as f64;
                    prop_assert_eq!(h.update(id, keys.as_slice()), members.contains(&id));
                }
            }
            prop_assert!(h.is_heap(keys.as_slice()));
            prop_assert_eq!(h.len(), members.len());
        }
    }

    #[test]
    fn removal_matches_full_rebuild_oracle(
        keys in prop::collection::vec(-20i32..20, 1..48),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..48),
    ) {
        let keys: Vec<f64> = keys.into_iter().map(f64::from).collect();
        let mut h = IndexedHeap::new(keys.len(), HeapKind::Min);
        h.set_all(keys.as_slice());
        for pick in picks {
            if h.is_empty() {
                break;
            }
            let victim = h.as_slice()[pick.index(h.len())];
            h.remove(victim, keys.as_slice());

            let mut oracle = h.clone();
            oracle.update_all(keys.as_slice());
            prop_assert!(h.is_heap(keys.as_slice()));
            prop_assert_eq!(h.len(), oracle.len());
            prop_assert_eq!(
                h.peek().map(|id| keys[id]),
                oracle.peek().map(|id| keys[id])
            );
        }
    }

    #[test]
    fn sorted_drain_of_permutation(perm in Just((0..100usize).collect::<Vec<_>>()).prop_shuffle()) {
        let mut h = IndexedHeap::new(perm.len(), HeapKind::Min);
        for &id in &perm {
            h.add(id, &by_id);
        }
        let drained = drain(&mut h, &by_id);
        prop_assert_eq!(drained, (0..100).collect::<Vec<_>>());
    }
}
