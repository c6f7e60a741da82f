//! Key hashing strategies.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Maps a key to an unsigned integer. Must be a pure function of the key's
/// value: keys that compare equal must hash equal.
///
/// The bucket of a key is `hash_key(key) & (capacity - 1)`.
pub trait KeyHash<K: ?Sized> {
    fn hash_key(&self, key: &K) -> usize;
}

impl<K, F> KeyHash<K> for F
where
    K: ?Sized,
    F: Fn(&K) -> usize,
{
    #[inline]
    fn hash_key(&self, key: &K) -> usize {
        self(key)
    }
}

/// Adapts any `BuildHasher` to `KeyHash` for `K: Hash`.
#[derive(Debug, Clone, Default)]
pub struct BuildHash<S = DefaultHashBuilder>(pub S);

impl<K, S> KeyHash<K> for BuildHash<S>
where
    K: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> usize {
        // Keep the low bits on 32-bit targets.
        self.0.hash_one(key) as usize
    }
}

/// Identity hash for integers; negative values wrap as two's complement.
pub fn hash_int(key: &i32) -> usize {
    *key as usize
}

/// Identity hash for byte-sized characters.
pub fn hash_char(key: &u8) -> usize {
    *key as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;

    #[test]
    fn identity_hashes() {
        assert_eq!(hash_int(&7), 7);
        assert_eq!(hash_int(&-1), usize::MAX);
        assert_eq!(hash_char(&b'a'), 97);
    }

    #[test]
    fn closures_and_fn_items_are_key_hashes() {
        fn h<K: ?Sized, H: KeyHash<K>>(hasher: &H, k: &K) -> usize {
            hasher.hash_key(k)
        }
        assert_eq!(h(&hash_int, &3), 3);
        assert_eq!(h(&|s: &str| s.len(), "four"), 4);
    }

    /// Invariant: equal keys hash equal, including through borrowed forms.
    #[test]
    fn build_hash_is_consistent() {
        let bh = BuildHash(RandomState::new());
        let a = "key".to_string();
        assert_eq!(bh.hash_key(&a), bh.hash_key(&"key".to_string()));
        assert_eq!(bh.hash_key("key"), bh.hash_key(a.as_str()));

        let d: BuildHash = BuildHash::default();
        assert_eq!(d.hash_key(&42u64), d.clone().hash_key(&42u64));
    }
}
