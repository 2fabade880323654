//! # Owned Tensor Buffers
//!
//! Pre-allocated, 32-byte aligned storage for probability tensors. The
//! likelihood engine sizes a buffer from allele counts, keeps it across
//! computation steps, and borrows [`TensorView`]s from it; nothing in the
//! view path allocates.
//!
//! ## Design Philosophy
//! The buffer owns memory and shape; views own neither. Reusing a buffer for
//! a new shape (`reshape_filled`) keeps the allocation when it is large
//! enough, so per-locus workspaces are resized instead of reallocated.
//!
//! ```
//! use genotensor::data::Diploid;
//! use genotensor::utils::workspace::ProbTensor;
//!
//! // Joint genotype distribution for two diploid individuals, 3 alleles
//! let mut joint = ProbTensor::<2>::for_alleles::<Diploid>(3).unwrap();
//! assert_eq!(joint.extents(), &[6, 6]);
//!
//! joint.view_mut()[[0, 5]] = 0.25;
//! assert_eq!(joint.view()[[0, 5]], 0.25);
//! ```

use aligned_vec::{AVec, ConstAlign};
use num_traits::{Float, Zero};

use crate::config::CheckMode;
use crate::data::dims::dim_width;
use crate::data::rank::RankKind;
use crate::data::storage::{Layout, TensorView, TensorViewMut};
use crate::error::Result;
use crate::model::kahan::sum_kahan;

/// Alignment of tensor storage in bytes
pub const BUFFER_ALIGN: usize = 32;

/// Owned, aligned, column-major tensor
pub struct TensorBuffer<T, const N: usize> {
    data: AVec<T, ConstAlign<BUFFER_ALIGN>>,
    layout: Layout<N>,
    mode: CheckMode,
}

/// Single-precision probability tensor
pub type ProbTensor<const N: usize> = TensorBuffer<f32, N>;

impl<T: Copy, const N: usize> TensorBuffer<T, N> {
    /// Allocate a tensor with every element set to `value`
    pub fn filled(extents: [usize; N], value: T) -> Result<Self> {
        let layout = Layout::column_major(extents)?;
        tracing::trace!(extents = ?extents, len = layout.len(), "allocating tensor buffer");
        Ok(Self {
            data: AVec::from_iter(BUFFER_ALIGN, std::iter::repeat(value).take(layout.len())),
            layout,
            mode: CheckMode::default(),
        })
    }

    /// Allocate a tensor and fill it from a function of the multi-index
    pub fn from_fn<F>(extents: [usize; N], mut f: F) -> Result<Self>
    where
        F: FnMut([usize; N]) -> T,
    {
        let layout = Layout::column_major(extents)?;
        tracing::trace!(extents = ?extents, len = layout.len(), "allocating tensor buffer");
        let data = AVec::from_iter(
            BUFFER_ALIGN,
            (0..layout.len()).filter_map(|offset| layout.unravel(offset)).map(&mut f),
        );
        Ok(Self {
            data,
            layout,
            mode: CheckMode::default(),
        })
    }

    /// Access policy handed to borrowed views
    pub fn set_mode(&mut self, mode: CheckMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    #[inline]
    pub fn extents(&self) -> &[usize; N] {
        self.layout.extents()
    }

    #[inline]
    pub fn layout(&self) -> &Layout<N> {
        &self.layout
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Borrow as a read-only view
    pub fn view(&self) -> TensorView<'_, T, N> {
        TensorView::from_layout(&self.data, self.layout, self.mode)
    }

    /// Borrow as a mutable view
    pub fn view_mut(&mut self) -> TensorViewMut<'_, T, N> {
        TensorViewMut::from_layout(&mut self.data, self.layout, self.mode)
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Change shape and set every element to `value`, keeping the
    /// allocation when its capacity suffices
    pub fn reshape_filled(&mut self, extents: [usize; N], value: T) -> Result<()> {
        let layout = Layout::column_major(extents)?;
        self.data.clear();
        for _ in 0..layout.len() {
            self.data.push(value);
        }
        self.layout = layout;
        Ok(())
    }
}

impl<T: Copy + Zero, const N: usize> TensorBuffer<T, N> {
    pub fn zeros(extents: [usize; N]) -> Result<Self> {
        Self::filled(extents, T::zero())
    }

    /// Zeroed tensor whose every axis spans the rank-`R` state space of
    /// `n_alleles` alleles
    pub fn for_alleles<R: RankKind>(n_alleles: usize) -> Result<Self> {
        Self::zeros([dim_width::<R>(n_alleles); N])
    }
}

impl<T: Float, const N: usize> TensorBuffer<T, N> {
    /// Compensated sum of all elements in buffer order
    pub fn sum_kahan(&self) -> T {
        sum_kahan(self.data.iter().copied())
    }
}

impl<T: Copy + std::fmt::Debug, const N: usize> std::fmt::Debug for TensorBuffer<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorBuffer")
            .field("extents", self.layout.extents())
            .field("mode", &self.mode)
            .finish()
    }
}
