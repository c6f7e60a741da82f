//! Error types for `Vector` and `HashMap`.

use crate::ops::CopyError;
use crate::policy::PolicyError;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate storage for {requested} slots")]
pub struct AllocError {
    pub requested: usize,
    #[source]
    pub source: TryReserveError,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    #[error("index {index} out of bounds for vector of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("value not found")]
    NotFound,
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error(transparent)]
    Copy(#[from] CopyError),
    #[error("invalid growth policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("key already present")]
    DuplicateKey,
    #[error("key not found")]
    NotFound,
    #[error("capacity overflow while growing from {0} buckets")]
    CapacityOverflow(usize),
    #[error(transparent)]
    Alloc(#[from] AllocError),
    #[error(transparent)]
    Copy(#[from] CopyError),
    #[error("invalid growth policy: {0}")]
    InvalidPolicy(#[from] PolicyError),
}

impl From<VectorError> for MapError {
    fn from(e: VectorError) -> Self {
        match e {
            VectorError::OutOfBounds { .. } | VectorError::NotFound => MapError::NotFound,
            VectorError::Alloc(a) => MapError::Alloc(a),
            VectorError::Copy(c) => MapError::Copy(c),
            VectorError::InvalidPolicy(p) => MapError::InvalidPolicy(p),
        }
    }
}
