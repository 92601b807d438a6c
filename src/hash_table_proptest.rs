#![cfg(test)]

// Property tests for HashTable kept inside the crate so the load-factor
// bounds can be checked against the table's private parameters.

use crate::error::Error;
use crate::hash_table::{HashTable, LoadParams};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Delete(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            1 => idx.clone().prop_map(OpI::Get),
            1 => "[a-z]{0,4}".prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn assert_load_bounds<V>(t: &HashTable<String, V>) -> Result<(), TestCaseError> {
    let LoadParams {
        min_load_factor,
        max_load_factor,
        ..
    } = t.params();
    let load = t.load_factor();
    prop_assert!(t.capacity() >= 1);
    prop_assert!(load < max_load_factor, "load {} reached max", load);
    prop_assert!(
        t.capacity() == 1 || load > min_load_factor,
        "load {} at or below min with capacity {}",
        load,
        t.capacity()
    );
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `set` returns true exactly for keys the model lacks; the last set value wins.
// - `get`/`contains` parity with the model; absent keys fail with NotFound.
// - `delete` returns the model's value and fails with NotFound when absent.
// - `iter` yields each live entry exactly once with its current value.
// - Load factor stays inside the configured bounds after every call.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: HashTable<String, i32> = HashTable::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    let k = pool[i].clone();
                    let fresh = !model.contains_key(&k);
                    prop_assert_eq!(sut.set(k.clone(), v), fresh);
                    model.insert(k, v);
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    match (sut.delete(k.as_str()), model.remove(k)) {
                        (Ok(got), Some(want)) => prop_assert_eq!(got, want),
                        (Err(Error::NotFound(_)), None) => {}
                        (got, want) => prop_assert!(false, "delete mismatch: {:?} vs {:?}", got, want),
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    match model.get(k) {
                        Some(want) => prop_assert_eq!(sut.get(k.as_str()), Ok(want)),
                        None => prop_assert!(matches!(sut.get(k.as_str()), Err(Error::NotFound(_)))),
                    }
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains(s.as_str()), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(mv) = model.get_mut(k) {
                        let sv = sut.get_mut(k.as_str()).expect("present in sut");
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    } else {
                        prop_assert!(sut.get_mut(k.as_str()).is_err());
                    }
                }
                OpI::Iterate => {
                    let seen: Vec<(String, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    let keys: BTreeSet<&String> = seen.iter().map(|(k, _)| k).collect();
                    prop_assert_eq!(keys.len(), seen.len(), "duplicate key in iteration");
                    prop_assert_eq!(seen.len(), model.len());
                    for (k, v) in &seen {
                        prop_assert_eq!(model.get(k), Some(v));
                    }
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            assert_load_bounds(&sut)?;
        }

        // Draining every remaining key leaves an empty, single-bucket table.
        let remaining: Vec<String> = model.keys().cloned().collect();
        for k in remaining {
            prop_assert!(sut.delete(k.as_str()).is_ok());
            assert_load_bounds(&sut)?;
        }
        prop_assert!(sut.is_empty());
        prop_assert_eq!(sut.iter().count(), 0);
        prop_assert_eq!(sut.capacity(), 1);
    }
}
