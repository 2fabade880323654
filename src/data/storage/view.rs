//! # Tensor Views
//!
//! Non-owning, shape-annotated views over caller-owned contiguous buffers.
//! A view borrows the buffer, so it cannot outlive it; it never allocates,
//! copies or frees. Writing through a [`TensorViewMut`] writes the caller's
//! buffer directly.
//!
//! Elements are addressed in column-major order (see [`Layout`]).
//!
//! ## Construction
//! ```
//! use genotensor::data::{dim_width, Diploid};
//! use genotensor::data::storage::TensorView;
//! use genotensor::tensor_view;
//!
//! let n = 2;
//! let width = dim_width::<Diploid>(n);
//! let buf: Vec<f32> = (0..width * width).map(|x| x as f32).collect();
//!
//! let a = TensorView::new(&buf, [width, width]).unwrap();
//! let b = tensor_view!(&buf; width, width).unwrap();
//! assert_eq!(a[[1, 2]], b[[1, 2]]);
//! assert_eq!(a[[1, 2]], 7.0);
//! ```

use std::ops::{Index, IndexMut};

use ndarray::{ArrayView, ArrayViewD, ArrayViewMut, ArrayViewMutD, IxDyn, ShapeBuilder};
use num_traits::Float;

use crate::config::CheckMode;
use crate::data::storage::layout::Layout;
use crate::error::{GenotensorError, Result};
use crate::model::kahan::sum_kahan;

/// Build a [`TensorView`] from a buffer and a list of per-axis extents.
///
/// Expands to [`TensorView::new`] with the extents collected into an array,
/// so the rank is the number of extents given.
#[macro_export]
macro_rules! tensor_view {
    ($buf:expr; $($extent:expr),+ $(,)?) => {
        $crate::data::storage::TensorView::new($buf, [$($extent),+])
    };
}

/// Build a [`TensorViewMut`] from a buffer and a list of per-axis extents.
#[macro_export]
macro_rules! tensor_view_mut {
    ($buf:expr; $($extent:expr),+ $(,)?) => {
        $crate::data::storage::TensorViewMut::new($buf, [$($extent),+])
    };
}

fn bind_layout<const N: usize>(available: usize, extents: [usize; N]) -> Result<Layout<N>> {
    let layout = Layout::column_major(extents)?;
    if available < layout.len() {
        tracing::debug!(
            required = layout.len(),
            actual = available,
            extents = ?extents,
            "tensor view rejected: buffer too small"
        );
        return Err(GenotensorError::buffer_too_small(layout.len(), available));
    }
    Ok(layout)
}

/// Read-only rank-`N` view over a borrowed buffer
pub struct TensorView<'a, T, const N: usize> {
    data: &'a [T],
    layout: Layout<N>,
    mode: CheckMode,
}

impl<'a, T, const N: usize> Clone for TensorView<'a, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, const N: usize> Copy for TensorView<'a, T, N> {}

impl<'a, T, const N: usize> std::fmt::Debug for TensorView<'a, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorView")
            .field("extents", self.layout.extents())
            .field("mode", &self.mode)
            .finish()
    }
}

impl<'a, T, const N: usize> TensorView<'a, T, N> {
    /// Wrap `buffer` with the given extents.
    ///
    /// Only the first `product(extents)` elements are viewed; a longer buffer
    /// is allowed. Fails with `BufferTooSmall` when it is shorter.
    pub fn new(buffer: &'a [T], extents: [usize; N]) -> Result<Self> {
        Self::with_mode(buffer, extents, CheckMode::default())
    }

    /// Wrap `buffer` with an explicit access policy.
    pub fn with_mode(buffer: &'a [T], extents: [usize; N], mode: CheckMode) -> Result<Self> {
        let layout = bind_layout(buffer.len(), extents)?;
        Ok(Self {
            data: &buffer[..layout.len()],
            layout,
            mode,
        })
    }

    /// Wrap a raw pointer.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `product(extents)` contiguous,
    /// initialized elements for the whole lifetime `'a`, nothing may mutate
    /// them during `'a`, and the product must not overflow `usize`.
    pub unsafe fn from_raw_parts(ptr: *const T, extents: [usize; N]) -> Self {
        let layout = Layout::column_major(extents)
            .unwrap_or_else(|err| panic!("tensor view from raw parts: {err}"));
        Self {
            data: std::slice::from_raw_parts(ptr, layout.len()),
            layout,
            mode: CheckMode::default(),
        }
    }

    /// Same view with a different access policy
    pub fn with_check_mode(self, mode: CheckMode) -> Self {
        Self { mode, ..self }
    }

    pub(crate) fn from_layout(data: &'a [T], layout: Layout<N>, mode: CheckMode) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        Self { data, layout, mode }
    }

    #[inline]
    pub fn extents(&self) -> &[usize; N] {
        self.layout.extents()
    }

    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        self.layout.strides()
    }

    #[inline]
    pub fn layout(&self) -> &Layout<N> {
        &self.layout
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        N
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
    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    /// Flat offset of `index`, `None` if any axis is out of range
    #[inline]
    pub fn offset_of(&self, index: [usize; N]) -> Option<usize> {
        self.layout.offset(&index)
    }

    /// Element at `index`.
    ///
    /// In `Unchecked` mode the per-axis test is skipped in release builds and
    /// only the flat offset is bounds-checked.
    #[inline]
    pub fn get(&self, index: [usize; N]) -> Option<&'a T> {
        let data = self.data;
        if self.mode.is_checked() {
            self.layout.offset(&index).map(|o| &data[o])
        } else {
            debug_assert!(
                self.layout.contains(&index),
                "index {:?} out of bounds for extents {:?}",
                index,
                self.layout.extents()
            );
            data.get(self.layout.offset_unchecked(&index))
        }
    }

    /// Element at `index` without any bounds checking.
    ///
    /// # Safety
    /// Every axis index must be below its extent.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: [usize; N]) -> &'a T {
        debug_assert!(
            self.layout.contains(&index),
            "index {:?} out of bounds for extents {:?}",
            index,
            self.layout.extents()
        );
        let data = self.data;
        data.get_unchecked(self.layout.offset_unchecked(&index))
    }

    /// The viewed elements in buffer (column-major) order
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Iterate the viewed elements in buffer order
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }

    /// Convert into an `ndarray` view with Fortran layout
    pub fn as_array(&self) -> Result<ArrayViewD<'a, T>> {
        Ok(ArrayView::from_shape(IxDyn(self.extents()).f(), self.data)?)
    }
}

impl<'a, T: Float, const N: usize> TensorView<'a, T, N> {
    /// Compensated sum of all viewed elements in buffer order
    pub fn sum_kahan(&self) -> T {
        sum_kahan(self.data.iter().copied())
    }
}

impl<'a, T, const N: usize> Index<[usize; N]> for TensorView<'a, T, N> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: [usize; N]) -> &T {
        &self.data[self.layout.offset_or_panic(&index, self.mode.is_checked())]
    }
}

/// Mutable rank-`N` view over a uniquely borrowed buffer
pub struct TensorViewMut<'a, T, const N: usize> {
    data: &'a mut [T],
    layout: Layout<N>,
    mode: CheckMode,
}

impl<'a, T, const N: usize> std::fmt::Debug for TensorViewMut<'a, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorViewMut")
            .field("extents", self.layout.extents())
            .field("mode", &self.mode)
            .finish()
    }
}

impl<'a, T, const N: usize> TensorViewMut<'a, T, N> {
    /// Wrap `buffer` mutably with the given extents.
    pub fn new(buffer: &'a mut [T], extents: [usize; N]) -> Result<Self> {
        Self::with_mode(buffer, extents, CheckMode::default())
    }

    /// Wrap `buffer` mutably with an explicit access policy.
    pub fn with_mode(buffer: &'a mut [T], extents: [usize; N], mode: CheckMode) -> Result<Self> {
        let layout = bind_layout(buffer.len(), extents)?;
        Ok(Self {
            data: &mut buffer[..layout.len()],
            layout,
            mode,
        })
    }

    /// Wrap a raw mutable pointer.
    ///
    /// # Safety
    /// `ptr` must be valid for reads and writes of `product(extents)`
    /// contiguous, initialized elements for the whole lifetime `'a`, no other
    /// reference may access them during `'a`, and the product must not
    /// overflow `usize`.
    pub unsafe fn from_raw_parts(ptr: *mut T, extents: [usize; N]) -> Self {
        let layout = Layout::column_major(extents)
            .unwrap_or_else(|err| panic!("tensor view from raw parts: {err}"));
        Self {
            data: std::slice::from_raw_parts_mut(ptr, layout.len()),
            layout,
            mode: CheckMode::default(),
        }
    }

    /// Same view with a different access policy
    pub fn with_check_mode(self, mode: CheckMode) -> Self {
        Self { mode, ..self }
    }

    pub(crate) fn from_layout(data: &'a mut [T], layout: Layout<N>, mode: CheckMode) -> Self {
        debug_assert_eq!(data.len(), layout.len());
        Self { data, layout, mode }
    }

    #[inline]
    pub fn extents(&self) -> &[usize; N] {
        self.layout.extents()
    }

    #[inline]
    pub fn strides(&self) -> &[usize; N] {
        self.layout.strides()
    }

    #[inline]
    pub fn layout(&self) -> &Layout<N> {
        &self.layout
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        N
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
    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    #[inline]
    pub fn offset_of(&self, index: [usize; N]) -> Option<usize> {
        self.layout.offset(&index)
    }

    /// Reborrow as a read-only view
    pub fn view(&self) -> TensorView<'_, T, N> {
        TensorView {
            data: &*self.data,
            layout: self.layout,
            mode: self.mode,
        }
    }

    #[inline]
    pub fn get(&self, index: [usize; N]) -> Option<&T> {
        if self.mode.is_checked() {
            self.layout.offset(&index).map(|o| &self.data[o])
        } else {
            debug_assert!(
                self.layout.contains(&index),
                "index {:?} out of bounds for extents {:?}",
                index,
                self.layout.extents()
            );
            self.data.get(self.layout.offset_unchecked(&index))
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: [usize; N]) -> Option<&mut T> {
        if self.mode.is_checked() {
            match self.layout.offset(&index) {
                Some(o) => Some(&mut self.data[o]),
                None => None,
            }
        } else {
            debug_assert!(
                self.layout.contains(&index),
                "index {:?} out of bounds for extents {:?}",
                index,
                self.layout.extents()
            );
            self.data.get_mut(self.layout.offset_unchecked(&index))
        }
    }

    /// # Safety
    /// Every axis index must be below its extent.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: [usize; N]) -> &T {
        debug_assert!(
            self.layout.contains(&index),
            "index {:?} out of bounds for extents {:?}",
            index,
            self.layout.extents()
        );
        self.data.get_unchecked(self.layout.offset_unchecked(&index))
    }

    /// # Safety
    /// Every axis index must be below its extent.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: [usize; N]) -> &mut T {
        debug_assert!(
            self.layout.contains(&index),
            "index {:?} out of bounds for extents {:?}",
            index,
            self.layout.extents()
        );
        let offset = self.layout.offset_unchecked(&index);
        self.data.get_unchecked_mut(offset)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    /// Set every viewed element to `value`
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Convert into a mutable `ndarray` view with Fortran layout
    pub fn as_array_mut(&mut self) -> Result<ArrayViewMutD<'_, T>> {
        let shape = IxDyn(self.layout.extents()).f();
        Ok(ArrayViewMut::from_shape(shape, &mut *self.data)?)
    }
}

impl<'a, T: Float, const N: usize> TensorViewMut<'a, T, N> {
    /// Compensated sum of all viewed elements in buffer order
    pub fn sum_kahan(&self) -> T {
        sum_kahan(self.data.iter().copied())
    }
}

impl<'a, T, const N: usize> Index<[usize; N]> for TensorViewMut<'a, T, N> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, index: [usize; N]) -> &T {
        &self.data[self.layout.offset_or_panic(&index, self.mode.is_checked())]
    }
}

impl<'a, T, const N: usize> IndexMut<[usize; N]> for TensorViewMut<'a, T, N> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        let offset = self.layout.offset_or_panic(&index, self.mode.is_checked());
        &mut self.data[offset]
    }
}

impl<'a, T, const N: usize> From<TensorViewMut<'a, T, N>> for TensorView<'a, T, N> {
    fn from(view: TensorViewMut<'a, T, N>) -> Self {
        TensorView {
            data: view.data,
            layout: view.layout,
            mode: view.mode,
        }
    }
}
