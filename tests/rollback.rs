// Failure injection: strategies whose copies draw from a shared budget and
// whose destroys are counted. Every failed mutation must leave the
// container exactly as it was and release every partial copy.

use chained_hashmap::{hash_int, CopyError, ElementOps, HashMap, MapError, Pair};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Budget {
    copies_left: Rc<Cell<usize>>,
    destroyed: Rc<Cell<usize>>,
}

impl Budget {
    fn unlimited() -> Self {
        let b = Self::default();
        b.copies_left.set(usize::MAX);
        b
    }
    fn allow(&self, n: usize) {
        self.copies_left.set(n);
    }
    fn destroyed(&self) -> usize {
        self.destroyed.get()
    }
}

impl ElementOps<i32> for Budget {
    fn copy(&self, elem: &i32) -> Result<i32, CopyError> {
        match self.copies_left.get() {
            0 => Err(CopyError),
            n => {
                self.copies_left.set(n - 1);
                Ok(*elem)
            }
        }
    }
    fn compare(&self, a: &i32, b: &i32) -> bool {
        a == b
    }
    fn destroy(&self, _elem: i32) {
        self.destroyed.set(self.destroyed.get() + 1);
    }
}

type MeteredMap = HashMap<i32, i32, fn(&i32) -> usize, Budget, Budget>;

fn map_with(ops: &Budget, n: i32) -> MeteredMap {
    let mut m: MeteredMap = HashMap::new(hash_int as fn(&i32) -> usize).unwrap();
    for k in 0..n {
        let p = Pair::with_ops(&k, &(k * 10), ops.clone(), ops.clone()).unwrap();
        m.insert(&p).unwrap();
        p.destroy();
    }
    m
}

fn assert_contents(m: &MeteredMap, n: i32) {
    assert_eq!(m.len(), n as usize);
    for k in 0..n {
        assert_eq!(m.at(&k), Some(&(k * 10)));
    }
}

/// A copy failure part-way through a growth rehash fails the insert, keeps
/// the old buckets and destroys the partial copies.
#[test]
fn growth_rehash_failure_rolls_back() {
    let ops = Budget::unlimited();
    let mut m = map_with(&ops, 12);
    let pair = Pair::with_ops(&12, &120, ops.clone(), ops.clone()).unwrap();
    let destroyed_before = ops.destroyed();

    // Two pairs copy fully, the third key copy fails.
    ops.allow(4);
    assert_eq!(m.insert(&pair), Err(MapError::Copy(CopyError)));
    assert_eq!(m.capacity(), 16);
    assert_contents(&m, 12);
    assert_eq!(ops.destroyed() - destroyed_before, 4);
    assert_eq!(m.at(&12), None);

    ops.allow(usize::MAX);
    m.insert(&pair).unwrap();
    assert_eq!(m.capacity(), 32);
    assert_contents(&m, 13);
}

/// The rehash itself succeeds but copying the new pair fails: the fresh
/// array is discarded and the map is unchanged.
#[test]
fn failure_placing_new_pair_after_rehash_rolls_back() {
    let ops = Budget::unlimited();
    let mut m = map_with(&ops, 12);
    let pair = Pair::with_ops(&12, &120, ops.clone(), ops.clone()).unwrap();
    let destroyed_before = ops.destroyed();

    ops.allow(24);
    assert_eq!(m.insert(&pair), Err(MapError::Copy(CopyError)));
    assert_eq!(m.capacity(), 16);
    assert_contents(&m, 12);
    assert_eq!(ops.destroyed() - destroyed_before, 24);
}

/// Insert without growth: a failed value copy releases the key copy.
#[test]
fn plain_insert_failure_releases_key_copy() {
    let ops = Budget::unlimited();
    let mut m = map_with(&ops, 3);
    let pair = Pair::with_ops(&3, &30, ops.clone(), ops.clone()).unwrap();
    let destroyed_before = ops.destroyed();

    ops.allow(1);
    assert_eq!(m.insert(&pair), Err(MapError::Copy(CopyError)));
    assert_eq!(ops.destroyed() - destroyed_before, 1);
    assert_contents(&m, 3);
    assert_eq!(m.capacity(), 16);
}

/// A shrink that cannot rehash is skipped; the erase still succeeds and the
/// next erase shrinks normally.
#[test]
fn shrink_failure_keeps_capacity_but_erases() {
    let ops = Budget::unlimited();
    let mut m = map_with(&ops, 13);
    assert_eq!(m.capacity(), 32);
    for k in (9..13).rev() {
        m.erase(&k).unwrap();
    }
    assert_eq!(m.capacity(), 32);

    ops.allow(0);
    m.erase(&8).unwrap();
    assert_eq!(m.capacity(), 32);
    assert_contents(&m, 8);

    ops.allow(usize::MAX);
    m.erase(&7).unwrap();
    assert_eq!(m.capacity(), 16);
    assert_contents(&m, 7);
}

/// Every copy the map ever made is destroyed by the time it is dropped.
#[test]
fn every_copy_is_destroyed() {
    let ops = Budget::unlimited();
    {
        let mut m = map_with(&ops, 40);
        for k in 0..30 {
            m.erase(&k).unwrap();
        }
        m.apply_if(|k| *k > 35, |v| *v += 1);
    }
    let made = usize::MAX - ops.copies_left.get();
    assert_eq!(ops.destroyed(), made);
}

/// Pairs held by the caller release their copies on drop, like the map's own.
#[test]
fn caller_pair_released_on_drop() {
    let ops = Budget::unlimited();
    {
        let mut m: MeteredMap = HashMap::new(hash_int as fn(&i32) -> usize).unwrap();
        let pair = Pair::with_ops(&1, &2, ops.clone(), ops.clone()).unwrap();
        m.insert(&pair).unwrap();
        assert_eq!(ops.destroyed(), 0);
    }
    let made = usize::MAX - ops.copies_left.get();
    assert_eq!(made, 4);
    assert_eq!(ops.destroyed(), 4);
}
