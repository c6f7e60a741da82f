//! Owned element storage with a logical capacity and transactional resize.

use crate::error::AllocError;
use tracing::trace;

/// Contiguous storage for at most `capacity` elements.
///
/// `capacity` is the logical slot count the owning container reasons about;
/// the allocation behind it is reserved up front so that pushing within the
/// logical capacity never allocates.
#[derive(Debug)]
pub(crate) struct Buffer<T> {
    items: Vec<T>,
    capacity: usize,
}

pub(crate) fn reserve<T>(capacity: usize) -> Result<Vec<T>, AllocError> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(capacity)
        .map_err(|source| AllocError {
            requested: capacity,
            source,
        })?;
    Ok(items)
}

impl<T> Buffer<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        debug_assert!(capacity > 0);
        Ok(Self {
            items: reserve(capacity)?,
            capacity,
        })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Append within the current capacity; callers grow first when full.
    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        debug_assert!(self.items.len() < self.capacity, "push into a full buffer");
        self.items.push(value);
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Remove the element at `index`, shifting the tail left.
    #[inline]
    pub(crate) fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    /// Move every element into freshly reserved storage of `new_capacity`
    /// slots. The old allocation is released only after the new one exists;
    /// on failure the buffer is untouched.
    pub(crate) fn relocate(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        debug_assert!(new_capacity >= self.items.len());
        let mut fresh = reserve(new_capacity)?;
        fresh.append(&mut self.items);
        trace!(
            from = self.capacity,
            to = new_capacity,
            len = fresh.len(),
            "relocated buffer"
        );
        self.items = fresh;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Take every element out, leaving the buffer empty at its current
    /// capacity.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.items.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_at_logical_capacity() {
        let mut b = Buffer::with_capacity(2).unwrap();
        b.push(1);
        assert!(!b.is_full());
        b.push(2);
        assert!(b.is_full());
        assert_eq!(b.as_slice(), &[1, 2]);
    }

    #[test]
    fn relocate_preserves_order_both_ways() {
        let mut b = Buffer::with_capacity(4).unwrap();
        for i in 0..4 {
            b.push(i);
        }
        b.relocate(8).unwrap();
        assert_eq!(b.capacity(), 8);
        assert_eq!(b.as_slice(), &[0, 1, 2, 3]);
        b.push(4);
        assert_eq!(b.remove(0), 0);
        b.relocate(4).unwrap();
        assert_eq!(b.capacity(), 4);
        assert_eq!(b.as_slice(), &[1, 2, 3, 4]);
    }

    /// Invariant: a reservation that cannot succeed reports an error and
    /// leaves the buffer as it was.
    #[test]
    fn failed_relocate_leaves_buffer_untouched() {
        let mut b: Buffer<u64> = Buffer::with_capacity(2).unwrap();
        b.push(7);
        let err = b.relocate(usize::MAX).unwrap_err();
        assert_eq!(err.requested, usize::MAX);
        assert_eq!(b.capacity(), 2);
        assert_eq!(b.as_slice(), &[7]);
        assert!(Buffer::<u64>::with_capacity(usize::MAX).is_err());
    }

    #[test]
    fn drain_empties_but_keeps_capacity() {
        let mut b = Buffer::with_capacity(3).unwrap();
        b.push("a");
        b.push("b");
        let taken: Vec<_> = b.drain().collect();
        assert_eq!(taken, vec!["a", "b"]);
        assert_eq!(b.len(), 0);
        assert_eq!(b.capacity(), 3);
    }
}
