//! Element strategies: the copy / compare / destroy bundle that
//! parameterizes `Vector` and `Pair`.

use thiserror::Error;

/// An injected copy operation could not produce a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("element copy failed")]
pub struct CopyError;

/// Per-type operations used by the containers instead of `Clone`/`Eq`.
///
/// A strategy is a value (usually zero-sized) held by the container, the way
/// a `BuildHasher` is held by a std map. The container never inspects its
/// elements; it only copies, compares and destroys them through this trait.
pub trait ElementOps<T> {
    /// Produce an owned, independent copy of `elem`.
    fn copy(&self, elem: &T) -> Result<T, CopyError>;

    /// Whether `a` and `b` are equal under this strategy.
    fn compare(&self, a: &T, b: &T) -> bool;

    /// Release an owned element. Must not fail.
    #[inline]
    fn destroy(&self, elem: T) {
        drop(elem);
    }
}

/// Default strategy: copy with `Clone`, compare with `PartialEq`, destroy by
/// dropping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneOps;

impl<T> ElementOps<T> for CloneOps
where
    T: Clone + PartialEq,
{
    #[inline]
    fn copy(&self, elem: &T) -> Result<T, CopyError> {
        Ok(elem.clone())
    }

    #[inline]
    fn compare(&self, a: &T, b: &T) -> bool {
        a == b
    }
}
