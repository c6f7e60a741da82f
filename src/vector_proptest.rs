#![cfg(test)]

// Property tests for Vector against a std `Vec` model.

use crate::error::VectorError;
use crate::policy::GrowthPolicy;
use crate::vector::Vector;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(u16),
    Erase(usize),
    At(usize),
    Find(u16),
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            6 => (0u16..64).prop_map(Op::Push),
            4 => (0usize..80).prop_map(Op::Erase),
            2 => (0usize..80).prop_map(Op::At),
            2 => (0u16..64).prop_map(Op::Find),
            1 => Just(Op::Clear),
        ],
        1..200,
    )
}

// Property: Vector behaves like `Vec` and its capacity follows the policy.
// - `at`/`find` agree with indexing and `position` on the model.
// - Out-of-range erase fails without changing anything.
// - `len <= capacity`, capacity never below the floor, and a push into a
//   full vector doubles capacity exactly.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_vec_model(ops in arb_ops()) {
        let mut sut: Vector<u16> = Vector::new().unwrap();
        let mut model: Vec<u16> = Vec::new();
        let floor = GrowthPolicy::VECTOR.min_capacity;

        for op in ops {
            let cap_before = sut.capacity();
            match op {
                Op::Push(x) => {
                    sut.push_back(&x).unwrap();
                    model.push(x);
                    if model.len() > cap_before {
                        prop_assert_eq!(sut.capacity(), cap_before * 2);
                    } else {
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                }
                Op::Erase(i) => {
                    let res = sut.erase(i);
                    if i < model.len() {
                        prop_assert!(res.is_ok());
                        model.remove(i);
                    } else {
                        prop_assert_eq!(res, Err(VectorError::OutOfBounds { index: i, len: model.len() }));
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                }
                Op::At(i) => {
                    prop_assert_eq!(sut.at(i).ok(), model.get(i));
                }
                Op::Find(x) => {
                    prop_assert_eq!(sut.find(&x).ok(), model.iter().position(|&y| y == x));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), GrowthPolicy::VECTOR.initial_capacity);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.as_slice(), model.as_slice());
            prop_assert!(sut.len() <= sut.capacity());
            prop_assert!(sut.capacity() >= floor);
        }
    }
}
