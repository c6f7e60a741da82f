//! HashMap: separate chaining over a power-of-two array of `Vector`
//! buckets, with full rehash on every capacity change.

use crate::buffer::reserve;
use crate::error::MapError;
use crate::hash::{BuildHash, KeyHash};
use crate::ops::{CloneOps, ElementOps};
use crate::pair::{Pair, PairOps};
use crate::policy::GrowthPolicy;
use crate::vector::Vector;
use core::fmt;
use tracing::{debug, warn};

type Bucket<K, V, KO, VO> = Vector<Pair<K, V, KO, VO>, PairOps>;

/// A map from keys to values that stores deep copies of inserted pairs.
///
/// A key lives in bucket `hash(key) & (capacity - 1)`. Capacity doubles
/// before an insert would push the load factor above the policy maximum and
/// halves once an erase leaves it at or below the minimum; every change is a
/// full rehash that either completes or leaves the map untouched.
pub struct HashMap<K, V, H = BuildHash, KO = CloneOps, VO = CloneOps>
where
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    buckets: Box<[Bucket<K, V, KO, VO>]>,
    len: usize,
    hasher: H,
    policy: GrowthPolicy,
}

impl<K, V, KO, VO> HashMap<K, V, BuildHash, KO, VO>
where
    K: core::hash::Hash,
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    pub fn with_default_hasher() -> Result<Self, MapError> {
        Self::new(BuildHash::default())
    }
}

impl<K, V, H> HashMap<K, V, H>
where
    K: Clone + PartialEq,
    V: Clone + PartialEq,
    H: KeyHash<K>,
{
    /// Insert copies of `key` and `value` using the `Clone` strategies.
    pub fn insert_kv(&mut self, key: &K, value: &V) -> Result<(), MapError> {
        self.insert(&Pair::new(key, value))
    }
}

impl<K, V, H, KO, VO> HashMap<K, V, H, KO, VO>
where
    H: KeyHash<K>,
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    pub fn new(hasher: H) -> Result<Self, MapError> {
        Self::with_policy(hasher, GrowthPolicy::HASH_MAP)
    }

    pub fn with_policy(hasher: H, policy: GrowthPolicy) -> Result<Self, MapError> {
        policy.validate_for_map()?;
        Ok(Self {
            buckets: alloc_buckets(policy.initial_capacity)?,
            len: 0,
            hasher,
            policy,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets; always a power of two.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        GrowthPolicy::load_factor(self.len, self.capacity())
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// Number of pairs chained in bucket `index`.
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Vector::len)
    }

    #[inline]
    fn index_for(&self, key: &K, capacity: usize) -> usize {
        debug_assert!(capacity.is_power_of_two());
        self.hasher.hash_key(key) & (capacity - 1)
    }

    /// (bucket, position in bucket) of the pair holding `key`.
    fn locate(&self, key: &K) -> Option<(usize, usize)> {
        let b = self.index_for(key, self.capacity());
        self.buckets[b]
            .iter()
            .position(|p| p.key_matches(key))
            .map(|i| (b, i))
    }

    /// Store a deep copy of `pair`. Duplicate keys are rejected, never
    /// overwritten; any failure leaves the map unchanged.
    pub fn insert(&mut self, pair: &Pair<K, V, KO, VO>) -> Result<(), MapError> {
        if self.locate(pair.key()).is_some() {
            return Err(MapError::DuplicateKey);
        }
        let cap = self.capacity();
        if self.policy.exceeds_max(self.len + 1, cap) {
            let target = self
                .policy
                .grown(cap)
                .ok_or(MapError::CapacityOverflow(cap))?;
            // Place the new pair before installing so a failure discards
            // the whole fresh array.
            let mut fresh = self.rehashed(target)?;
            let idx = self.index_for(pair.key(), target);
            fresh[idx].push_back(pair)?;
            self.install(fresh);
        } else {
            let idx = self.index_for(pair.key(), cap);
            self.buckets[idx].push_back(pair)?;
        }
        self.len += 1;
        Ok(())
    }

    /// The stored value for `key`, not a copy.
    pub fn at(&self, key: &K) -> Option<&V> {
        let (b, i) = self.locate(key)?;
        self.buckets[b].at(i).ok().map(Pair::value)
    }

    pub fn at_mut(&mut self, key: &K) -> Option<&mut V> {
        let (b, i) = self.locate(key)?;
        self.buckets[b].at_mut(i).ok().map(Pair::value_mut)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Remove and destroy the pair for `key`. A shrink rehash that fails is
    /// skipped; the erase itself still succeeds.
    pub fn erase(&mut self, key: &K) -> Result<(), MapError> {
        let (b, i) = self.locate(key).ok_or(MapError::NotFound)?;
        self.buckets[b].erase(i)?;
        self.len -= 1;

        let cap = self.capacity();
        if self.policy.should_shrink(self.len, cap) {
            let target = self.policy.shrunk(cap);
            match self.rehashed(target) {
                Ok(fresh) => self.install(fresh),
                Err(e) => warn!(from = cap, to = target, error = %e, "hash map shrink skipped"),
            }
        }
        Ok(())
    }

    /// Mutate in place every value whose key satisfies `pred`. Returns how
    /// many values were mutated.
    pub fn apply_if<P, M>(&mut self, mut pred: P, mut mutate: M) -> usize
    where
        P: FnMut(&K) -> bool,
        M: FnMut(&mut V),
    {
        let mut count = 0;
        for bucket in self.buckets.iter_mut() {
            for pair in bucket.iter_mut() {
                if pred(pair.key()) {
                    mutate(pair.value_mut());
                    count += 1;
                }
            }
        }
        count
    }

    pub fn iter(&self) -> Iter<'_, K, V, KO, VO> {
        Iter {
            it: self.buckets.iter().flatten(),
        }
    }

    /// Copy every pair into a new bucket array of `capacity` buckets.
    /// On error the partial array is dropped and `self` is untouched.
    fn rehashed(&self, capacity: usize) -> Result<Box<[Bucket<K, V, KO, VO>]>, MapError> {
        let mut fresh = alloc_buckets(capacity)?;
        for pair in self.buckets.iter().flatten() {
            let idx = self.index_for(pair.key(), capacity);
            fresh[idx].push_back(pair)?;
        }
        Ok(fresh)
    }

    /// Swap in a rebuilt bucket array, destroying the old copies.
    fn install(&mut self, fresh: Box<[Bucket<K, V, KO, VO>]>) {
        debug!(
            from = self.capacity(),
            to = fresh.len(),
            len = self.len,
            "rehashed"
        );
        self.buckets = fresh;
    }
}

fn alloc_buckets<K, V, KO, VO>(capacity: usize) -> Result<Box<[Bucket<K, V, KO, VO>]>, MapError>
where
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    let mut buckets = reserve(capacity)?;
    for _ in 0..capacity {
        buckets.push(Vector::with_policy(PairOps, GrowthPolicy::BUCKET)?);
    }
    Ok(buckets.into_boxed_slice())
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V, KO, VO>
where
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    it: core::iter::Flatten<core::slice::Iter<'a, Bucket<K, V, KO, VO>>>,
}

impl<'a, K, V, KO, VO> Iterator for Iter<'a, K, V, KO, VO>
where
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|p| (p.key(), p.value()))
    }
}

impl<K, V, H, KO, VO> fmt::Debug for HashMap<K, V, H, KO, VO>
where
    K: fmt::Debug,
    V: fmt::Debug,
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.buckets
                    .iter()
                    .flatten()
                    .map(|p| (p.key(), p.value())),
            )
            .finish()
    }
}
