#![cfg(test)]

// Property tests for HashMap kept inside the crate next to the unit tests.

use crate::error::MapError;
use crate::hash_map::HashMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap as StdHashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Erase(usize),
    At(usize),
    Mutate(usize, i32),
    ApplyIfEven,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<i32>, Vec<OpI>)> {
    proptest::collection::vec(-500i32..500, 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Erase),
            2 => idx.clone().prop_map(OpI::At),
            1 => (idx.clone(), -1000i32..1000).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::ApplyIfEven),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_against_model<F>(hash: F, pool: Vec<i32>, ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    F: Fn(&i32) -> usize,
{
    let mut sut: HashMap<i32, i32, F> = HashMap::new(hash).unwrap();
    let mut model: StdHashMap<i32, i32> = StdHashMap::new();

    for op in ops {
        let cap_before = sut.capacity();
        match op {
            OpI::Insert(i, v) => {
                let k = pool[i];
                let already = model.contains_key(&k);
                match sut.insert_kv(&k, &v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(MapError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                }
            }
            OpI::Erase(i) => {
                let k = pool[i];
                match sut.erase(&k) {
                    Ok(()) => {
                        prop_assert!(model.remove(&k).is_some());
                        prop_assert!(sut.at(&k).is_none());
                    }
                    Err(MapError::NotFound) => prop_assert!(!model.contains_key(&k)),
                    Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                }
            }
            OpI::At(i) => {
                let k = pool[i];
                prop_assert_eq!(sut.at(&k), model.get(&k));
            }
            OpI::Mutate(i, d) => {
                let k = pool[i];
                if let Some(v) = sut.at_mut(&k) {
                    *v = v.wrapping_add(d);
                    let mv = model.get_mut(&k).expect("model has key");
                    *mv = mv.wrapping_add(d);
                } else {
                    prop_assert!(!model.contains_key(&k));
                }
            }
            OpI::ApplyIfEven => {
                let n = sut.apply_if(|k| k % 2 == 0, |v| *v = v.wrapping_neg());
                let mut expected = 0;
                for (k, v) in model.iter_mut() {
                    if k % 2 == 0 {
                        *v = v.wrapping_neg();
                        expected += 1;
                    }
                }
                prop_assert_eq!(n, expected);
            }
            OpI::Iterate => {
                let s: BTreeMap<i32, i32> = sut.iter().map(|(k, v)| (*k, *v)).collect();
                let m: BTreeMap<i32, i32> = model.iter().map(|(k, v)| (*k, *v)).collect();
                prop_assert_eq!(s, m);
            }
        }

        // Post-conditions after each op
        let cap = sut.capacity();
        prop_assert!(cap.is_power_of_two());
        prop_assert!(cap == cap_before || cap == cap_before * 2 || cap * 2 == cap_before);
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(sut.load_factor() <= 0.75);
        if cap < cap_before {
            // Shrinks happen only once the erase left a quarter load or less.
            prop_assert!(sut.len() * 4 <= cap_before);
        }
        let chained: usize = (0..cap).map(|b| sut.bucket_len(b).unwrap_or(0)).sum();
        prop_assert_eq!(chained, sut.len());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// - Duplicate keys are rejected without touching capacity.
// - `at`/`erase` agree with the model; erased keys are no longer found.
// - `apply_if` mutates exactly the matching values and reports their count.
// - Capacity stays a power of two and changes by at most one step per op.
// - The load factor never exceeds 0.75; pairs across buckets sum to `len`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_against_model(|k: &i32| *k as usize, pool, ops)?;
    }
}

// Property: Same invariants under worst-case collisions (every key hashes to
// zero), which stresses chain scans, erase within long chains and rehash.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_against_model(|_: &i32| 0, pool, ops)?;
    }
}
