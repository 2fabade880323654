//! # Centralized Error Handling
//!
//! Unified error type for the crate using `thiserror`.
//!
//! Every variant is a precondition violation detected on a checked path:
//! a buffer too short for its declared shape, an index outside an extent,
//! a negative allele count handed over by the caller, or arithmetic that
//! would overflow `usize`. None of them are recoverable by retrying.

use thiserror::Error;

/// Main error type for genotensor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenotensorError {
    /// Buffer holds fewer elements than the declared extents require
    #[error("Buffer too small: shape requires {required} elements, buffer has {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Multi-index outside the extents of a view or virtual matrix
    #[error("Index {index:?} out of bounds for extents {extents:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        extents: Vec<usize>,
    },

    /// Allele count rejected at the boundary (negative)
    #[error("Invalid allele count: {value}")]
    InvalidAlleleCount { value: i64 },

    /// Size arithmetic overflowed `usize`
    #[error("Arithmetic overflow while computing {context}")]
    Overflow { context: String },

    /// Layout conversion errors (shape rejected by ndarray)
    #[error("Layout error: {message}")]
    Layout { message: String },
}

/// Type alias for Results using GenotensorError
pub type Result<T> = std::result::Result<T, GenotensorError>;

impl GenotensorError {
    /// Create a buffer-too-small error
    pub fn buffer_too_small(required: usize, actual: usize) -> Self {
        Self::BufferTooSmall { required, actual }
    }

    /// Create an out-of-bounds error from an index and the extents it violated
    pub fn out_of_bounds(index: &[usize], extents: &[usize]) -> Self {
        Self::IndexOutOfBounds {
            index: index.to_vec(),
            extents: extents.to_vec(),
        }
    }

    /// Create an invalid allele count error
    pub fn invalid_allele_count(value: i64) -> Self {
        Self::InvalidAlleleCount { value }
    }

    /// Create an overflow error
    pub fn overflow(context: impl Into<String>) -> Self {
        Self::Overflow {
            context: context.into(),
        }
    }

    /// Create a layout error
    pub fn layout(message: impl Into<String>) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }
}

// Convert ndarray shape errors to GenotensorError
impl From<ndarray::ShapeError> for GenotensorError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::layout(err.to_string())
    }
}
