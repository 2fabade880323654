//! # Column-Major Layout
//!
//! Offset arithmetic shared by views and owned buffers.
//!
//! The first axis is innermost. For extents `[e0, e1, .., e(N-1)]` the stride
//! of axis `k` is `e0 * .. * e(k-1)` and a multi-index maps to
//! `sum(index[k] * stride[k])`. For a `2 x 3` matrix this gives the offset
//! table
//!
//! ```text
//!        c=0  c=1  c=2
//!  r=0    0    2    4
//!  r=1    1    3    5
//! ```
//!
//! which is the Fortran order `ndarray` produces for `shape.f()`.

use crate::error::{GenotensorError, Result};

/// Shape and strides of a rank-`N` column-major tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout<const N: usize> {
    extents: [usize; N],
    strides: [usize; N],
    len: usize,
}

impl<const N: usize> Layout<N> {
    /// Build the layout for `extents`, failing if the element count overflows.
    pub fn column_major(extents: [usize; N]) -> Result<Self> {
        let mut strides = [0usize; N];
        let mut len = 1usize;
        for (stride, &extent) in strides.iter_mut().zip(extents.iter()) {
            *stride = len;
            len = len
                .checked_mul(extent)
                .ok_or_else(|| GenotensorError::overflow(format!("element count of {extents:?}")))?;
        }
        Ok(Self {
            extents,
            strides,
            len,
        })
    }

    /// Per-axis extents
    #[inline]
    pub fn extents(&self) -> &[usize; N] {
        &self.extents
    }

    /// Per-axis strides in elements
    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    /// Product of all extents
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every axis index is below its extent
    #[inline]
    pub fn contains(&self, index: &[usize; N]) -> bool {
        index.iter().zip(self.extents.iter()).all(|(i, e)| i < e)
    }

    /// Flat offset of `index`, or `None` if any axis is out of range
    #[inline]
    pub fn offset(&self, index: &[usize; N]) -> Option<usize> {
        if self.contains(index) {
            Some(self.offset_unchecked(index))
        } else {
            None
        }
    }

    /// Flat offset of `index` without per-axis validation
    #[inline(always)]
    pub fn offset_unchecked(&self, index: &[usize; N]) -> usize {
        index
            .iter()
            .zip(self.strides.iter())
            .map(|(i, s)| i * s)
            .sum()
    }

    /// Multi-index of a flat offset (inverse of [`Layout::offset`])
    pub fn unravel(&self, mut offset: usize) -> Option<[usize; N]> {
        if offset >= self.len {
            return None;
        }
        let mut index = [0usize; N];
        for (slot, &extent) in index.iter_mut().zip(self.extents.iter()) {
            *slot = offset % extent;
            offset /= extent;
        }
        Some(index)
    }

    /// Offset for `index` under `mode`, panicking with a descriptive message
    /// when a checked access is out of range.
    #[inline]
    #[track_caller]
    pub(crate) fn offset_or_panic(&self, index: &[usize; N], checked: bool) -> usize {
        if checked {
            match self.offset(index) {
                Some(offset) => offset,
                None => panic!(
                    "index {:?} out of bounds for extents {:?}",
                    index, self.extents
                ),
            }
        } else {
            debug_assert!(
                self.contains(index),
                "index {:?} out of bounds for extents {:?}",
                index,
                self.extents
            );
            self.offset_unchecked(index)
        }
    }
}
