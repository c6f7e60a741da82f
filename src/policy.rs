//! Growth configuration shared by `Vector` and `HashMap`.

use thiserror::Error;

/// A growth configuration that cannot keep the container invariants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolicyError {
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo { field: &'static str, value: usize },
    #[error("growth factor must be at least 2, got {0}")]
    GrowthFactor(usize),
    #[error("capacity floor {floor} must be in 1..={initial}")]
    Floor { floor: usize, initial: usize },
    #[error("load thresholds must satisfy 0 <= min ({min}) < max ({max})")]
    LoadThresholds { min: f64, max: f64 },
}

/// Capacity and load-factor thresholds for a resizable container.
///
/// Capacity grows by `growth_factor` when an insertion would push the load
/// factor above `max_load`, and shrinks by the same factor when a removal
/// leaves it at or below `min_load`, never below `min_capacity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    pub initial_capacity: usize,
    pub growth_factor: usize,
    pub max_load: f64,
    pub min_load: f64,
    pub min_capacity: usize,
}

impl GrowthPolicy {
    /// Vector: grow once full, shrink at a quarter, never below the
    /// initial capacity.
    pub const VECTOR: Self = Self {
        initial_capacity: 16,
        growth_factor: 2,
        max_load: 1.0,
        min_load: 0.25,
        min_capacity: 16,
    };

    /// Hash-map bucket: most chains hold zero or one pair, so start at a
    /// single slot.
    pub const BUCKET: Self = Self {
        initial_capacity: 1,
        growth_factor: 2,
        max_load: 1.0,
        min_load: 0.25,
        min_capacity: 1,
    };

    /// Hash map: keep the load factor within `[0.25, 0.75]` down to a
    /// single bucket.
    pub const HASH_MAP: Self = Self {
        initial_capacity: 16,
        growth_factor: 2,
        max_load: 0.75,
        min_load: 0.25,
        min_capacity: 1,
    };

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.growth_factor < 2 {
            return Err(PolicyError::GrowthFactor(self.growth_factor));
        }
        if self.min_capacity == 0 || self.min_capacity > self.initial_capacity {
            return Err(PolicyError::Floor {
                floor: self.min_capacity,
                initial: self.initial_capacity,
            });
        }
        // `!(a < b)` so that NaN thresholds are rejected as well.
        if !(self.min_load >= 0.0 && self.min_load < self.max_load) {
            return Err(PolicyError::LoadThresholds {
                min: self.min_load,
                max: self.max_load,
            });
        }
        Ok(())
    }

    /// Bucket indexing masks with `capacity - 1`, so every reachable
    /// capacity must be a power of two.
    pub fn validate_for_map(&self) -> Result<(), PolicyError> {
        self.validate()?;
        for (field, value) in [
            ("initial_capacity", self.initial_capacity),
            ("growth_factor", self.growth_factor),
            ("min_capacity", self.min_capacity),
        ] {
            if !value.is_power_of_two() {
                return Err(PolicyError::NotPowerOfTwo { field, value });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn load_factor(len: usize, capacity: usize) -> f64 {
        len as f64 / capacity as f64
    }

    /// Holding `len` elements in `capacity` slots exceeds the maximum load.
    #[inline]
    pub fn exceeds_max(&self, len: usize, capacity: usize) -> bool {
        Self::load_factor(len, capacity) > self.max_load
    }

    /// Holding `len` elements calls for halving `capacity`.
    #[inline]
    pub fn should_shrink(&self, len: usize, capacity: usize) -> bool {
        capacity > self.min_capacity && Self::load_factor(len, capacity) <= self.min_load
    }

    #[inline]
    pub fn grown(&self, capacity: usize) -> Option<usize> {
        capacity.checked_mul(self.growth_factor)
    }

    #[inline]
    pub fn shrunk(&self, capacity: usize) -> usize {
        (capacity / self.growth_factor).max(self.min_capacity)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::HASH_MAP
    }
}
