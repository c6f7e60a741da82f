//! Pair: an owned key/value entry that carries its own key and value
//! strategies.

use crate::ops::{CloneOps, CopyError, ElementOps};
use core::fmt;
use core::mem::ManuallyDrop;

/// An owned key and value plus the strategies that copy, compare and
/// destroy them. The key is fixed once built; the value may be replaced in
/// place.
///
/// Dropping a pair releases both parts through their strategies.
pub struct Pair<K, V, KO = CloneOps, VO = CloneOps>
where
    KO: ElementOps<K>,
    VO: ElementOps<V>,
{
    key: ManuallyDrop<K>,
    value: ManuallyDrop<V>,
    key_ops: KO,
    value_ops: VO,
}

impl<K, V> Pair<K, V>
where
    K: Clone + PartialEq,
    V: Clone + PartialEq,
{
    /// Copy `key` and `value` with the default `Clone` strategies.
    pub fn new(key: &K, value: &V) -> Self {
        Pair {
            key: ManuallyDrop::new(key.clone()),
            value: ManuallyDrop::new(value.clone()),
            key_ops: CloneOps,
            value_ops: CloneOps,
        }
    }
}

impl<K, V, KO, VO> Pair<K, V, KO, VO>
where
    KO: ElementOps<K>,
    VO: ElementOps<V>,
{
    /// Deep-copy `key` and `value` through their strategies. The caller keeps
    /// the originals.
    pub fn with_ops(key: &K, value: &V, key_ops: KO, value_ops: VO) -> Result<Self, CopyError> {
        let key = key_ops.copy(key)?;
        let value = match value_ops.copy(value) {
            Ok(v) => v,
            Err(e) => {
                key_ops.destroy(key);
                return Err(e);
            }
        };
        Ok(Pair {
            key: ManuallyDrop::new(key),
            value: ManuallyDrop::new(value),
            key_ops,
            value_ops,
        })
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn key_ops(&self) -> &KO {
        &self.key_ops
    }

    pub fn value_ops(&self) -> &VO {
        &self.value_ops
    }

    /// Compare keys with the key strategy.
    #[inline]
    pub fn key_matches(&self, key: &K) -> bool {
        self.key_ops.compare(self.key(), key)
    }

    /// Release the key and value through their strategies. Same as
    /// dropping the pair.
    pub fn destroy(self) {
        drop(self);
    }
}

impl<K, V, KO, VO> Drop for Pair<K, V, KO, VO>
where
    KO: ElementOps<K>,
    VO: ElementOps<V>,
{
    fn drop(&mut self) {
        // SAFETY: key and value are taken once, here, and never read again.
        let key = unsafe { ManuallyDrop::take(&mut self.key) };
        let value = unsafe { ManuallyDrop::take(&mut self.value) };
        self.key_ops.destroy(key);
        self.value_ops.destroy(value);
    }
}

impl<K, V, KO, VO> Pair<K, V, KO, VO>
where
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    /// A deep copy that shares nothing with `self` but the strategies.
    pub fn try_clone(&self) -> Result<Self, CopyError> {
        Self::with_ops(
            self.key(),
            self.value(),
            self.key_ops.clone(),
            self.value_ops.clone(),
        )
    }
}

impl<K, V, KO, VO> fmt::Debug for Pair<K, V, KO, VO>
where
    K: fmt::Debug,
    V: fmt::Debug,
    KO: ElementOps<K>,
    VO: ElementOps<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pair")
            .field("key", self.key())
            .field("value", self.value())
            .finish()
    }
}

/// Element strategy for vectors of pairs: delegates to the strategies each
/// pair carries. Two pairs are equal when both keys and values compare
/// equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairOps;

impl<K, V, KO, VO> ElementOps<Pair<K, V, KO, VO>> for PairOps
where
    KO: ElementOps<K> + Clone,
    VO: ElementOps<V> + Clone,
{
    fn copy(&self, elem: &Pair<K, V, KO, VO>) -> Result<Pair<K, V, KO, VO>, CopyError> {
        elem.try_clone()
    }

    fn compare(&self, a: &Pair<K, V, KO, VO>, b: &Pair<K, V, KO, VO>) -> bool {
        a.key_ops.compare(a.key(), b.key()) && a.value_ops.compare(a.value(), b.value())
    }

    fn destroy(&self, elem: Pair<K, V, KO, VO>) {
        elem.destroy();
    }
}
