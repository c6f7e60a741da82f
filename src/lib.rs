//! chained-hashmap: a separate-chaining hash map built on a growable
//! vector, both driven by caller-supplied element strategies.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: own every policy decision (growth, collision resolution,
//!   rehashing, destruction) instead of delegating to a std container.
//! - Layers:
//!   - `ElementOps<T>`: the copy / compare / destroy strategy bundle. The
//!     containers never look inside an element.
//!   - `Buffer<T>`: owned storage with a logical capacity whose resize
//!     reserves the new allocation before moving anything.
//!   - `Vector<T, O>`: growable sequence; doubles when full, halves at a
//!     quarter load, never below its floor.
//!   - `Pair<K, V, KO, VO>`: owned key/value carrying its own strategies.
//!   - `HashMap<K, V, H, KO, VO>`: power-of-two array of `Vector<Pair>`
//!     buckets, indexed by `hash(key) & (capacity - 1)`.
//!
//! Constraints
//! - Single-threaded; no internal synchronization and no reentrancy
//!   guarantees.
//! - Inserted keys and values are deep-copied through their strategies; the
//!   caller keeps its originals.
//! - Unique keys; a duplicate insert fails and never overwrites.
//! - All-or-nothing mutations: a failed copy or allocation leaves the
//!   structure exactly as it was.
//!
//! Rehashing
//! - Growing or shrinking builds a complete new bucket array from deep
//!   copies, then swaps it in and drops the old one. A growing insert places
//!   its pair into the new array before the swap, so a failure at any step
//!   discards only the new array.
//! - The map keeps `len / capacity` within `[0.25, 0.75]` after every
//!   successful mutation, except at the single-bucket floor. The shrink check
//!   runs after the erased pair is gone.
//!
//! Allocation failure
//! - Storage is reserved with `Vec::try_reserve_exact`, so an allocation
//!   that cannot be satisfied surfaces as `AllocError` instead of aborting.
//!
//! Notes and non-goals
//! - No persistence, serialization or concurrent access.
//! - `destroy` defaults to dropping; strategies override it to observe
//!   releases.

mod buffer;
pub mod error;
pub mod hash;
pub mod hash_map;
mod hash_map_proptest;
pub mod ops;
pub mod pair;
pub mod policy;
pub mod vector;
mod vector_proptest;

// Public surface
pub use error::{AllocError, MapError, VectorError};
pub use hash::{hash_char, hash_int, BuildHash, KeyHash};
pub use hash_map::HashMap;
pub use ops::{CloneOps, CopyError, ElementOps};
pub use pair::{Pair, PairOps};
pub use policy::{GrowthPolicy, PolicyError};
pub use vector::Vector;
