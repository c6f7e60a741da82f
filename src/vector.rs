//! Vector: a growable sequence that copies, compares and destroys its
//! elements through an `ElementOps` strategy.

use crate::buffer::Buffer;
use crate::error::VectorError;
use crate::ops::{CloneOps, ElementOps};
use crate::policy::GrowthPolicy;
use core::fmt;
use tracing::warn;

/// An owning, contiguous, growable sequence of opaque elements.
///
/// Capacity doubles when a push would overflow it and halves when an erase
/// leaves the vector a quarter full, never dropping below the policy floor.
pub struct Vector<T, O = CloneOps>
where
    O: ElementOps<T>,
{
    buf: Buffer<T>,
    ops: O,
    policy: GrowthPolicy,
}

impl<T> Vector<T>
where
    T: Clone + PartialEq,
{
    pub fn new() -> Result<Self, VectorError> {
        Self::with_ops(CloneOps)
    }
}

impl<T, O> Vector<T, O>
where
    O: ElementOps<T>,
{
    pub fn with_ops(ops: O) -> Result<Self, VectorError> {
        Self::with_policy(ops, GrowthPolicy::VECTOR)
    }

    pub fn with_policy(ops: O, policy: GrowthPolicy) -> Result<Self, VectorError> {
        policy.validate()?;
        Ok(Self {
            buf: Buffer::with_capacity(policy.initial_capacity)?,
            ops,
            policy,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    /// `len / capacity`. Capacity is never zero.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        GrowthPolicy::load_factor(self.len(), self.capacity())
    }

    /// The element at `index` itself, not a copy.
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        let len = self.len();
        self.buf
            .as_slice()
            .get(index)
            .ok_or(VectorError::OutOfBounds { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let len = self.len();
        self.buf
            .as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::OutOfBounds { index, len })
    }

    /// Index of the first element equal to `value` under the strategy.
    pub fn find(&self, value: &T) -> Result<usize, VectorError> {
        self.buf
            .as_slice()
            .iter()
            .position(|e| self.ops.compare(e, value))
            .ok_or(VectorError::NotFound)
    }

    /// Append a copy of `value` made by the strategy. The caller keeps
    /// `value`; on failure the vector is unchanged.
    pub fn push_back(&mut self, value: &T) -> Result<(), VectorError> {
        let copy = self.ops.copy(value)?;
        self.push(copy)
    }

    /// Append an already owned element. On failure the element is handed to
    /// the strategy's `destroy` and the vector is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), VectorError> {
        let len = self.len();
        let cap = self.capacity();
        if self.buf.is_full() || self.policy.exceeds_max(len + 1, cap) {
            // An overflowing target cannot be reserved and fails below.
            let target = self.policy.grown(cap).unwrap_or(usize::MAX);
            if let Err(e) = self.buf.relocate(target) {
                self.ops.destroy(value);
                return Err(e.into());
            }
        }
        self.buf.push(value);
        Ok(())
    }

    /// Destroy the element at `index` and close the gap. A shrink that
    /// cannot allocate is skipped; the erase itself still succeeds.
    pub fn erase(&mut self, index: usize) -> Result<(), VectorError> {
        let len = self.len();
        if index >= len {
            return Err(VectorError::OutOfBounds { index, len });
        }
        let removed = self.buf.remove(index);
        self.ops.destroy(removed);
        self.shrink_if_sparse();
        Ok(())
    }

    /// Destroy every element and return to the initial capacity.
    pub fn clear(&mut self) {
        for e in self.buf.drain() {
            self.ops.destroy(e);
        }
        let initial = self.policy.initial_capacity;
        if self.capacity() != initial {
            if let Err(e) = self.buf.relocate(initial) {
                warn!(capacity = self.capacity(), error = %e, "clear kept grown storage");
            }
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.buf.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.buf.as_mut_slice().iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        self.buf.as_slice()
    }

    fn shrink_if_sparse(&mut self) {
        let len = self.len();
        let cap = self.capacity();
        if !self.policy.should_shrink(len, cap) {
            return;
        }
        let target = self.policy.shrunk(cap).max(len);
        if let Err(e) = self.buf.relocate(target) {
            warn!(from = cap, to = target, error = %e, "vector shrink skipped");
        }
    }
}

impl<T, O> Drop for Vector<T, O>
where
    O: ElementOps<T>,
{
    fn drop(&mut self) {
        for e in self.buf.drain() {
            self.ops.destroy(e);
        }
    }
}

impl<T, O> fmt::Debug for Vector<T, O>
where
    T: fmt::Debug,
    O: ElementOps<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, O> IntoIterator for &'a Vector<T, O>
where
    O: ElementOps<T>,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
