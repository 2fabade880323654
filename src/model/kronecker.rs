//! # Lazy Kronecker Products
//!
//! Element access into `A ⊗ B` without building it.
//!
//! For `A` (`ra x ca`) and `B` (`rb x cb`) the product is the
//! `(ra*rb) x (ca*cb)` block matrix whose block `(p, q)` is `A[p, q] * B`.
//! Element `(i, j)` is therefore
//!
//! ```text
//! (A ⊗ B)[i, j] = A[i / rb, j / cb] * B[i % rb, j % cb]
//! ```
//!
//! Genotype-pair transition matrices are Kronecker products of per-parent
//! matrices, so reading the elements a computation needs costs O(1) each
//! instead of materializing a matrix quadratic in the state count.
//!
//! ## Example
//! ```
//! use genotensor::model::kronecker::{kronecker_product_coef, KroneckerProduct};
//! use ndarray::array;
//!
//! let a = array![[1.0, 2.0], [3.0, 4.0]];
//! let b = array![[0.0, 5.0], [6.0, 7.0]];
//! assert_eq!(kronecker_product_coef(&a, &b, 1, 2), 2.0 * 6.0);
//!
//! let ab = KroneckerProduct::new(&a, &b);
//! assert_eq!(ab.rows(), 4);
//! assert_eq!(ab.get(3, 3), 4.0 * 7.0);
//! ```

use std::ops::Mul;

use ndarray::{Array2, ArrayBase, Data, Ix2};

use crate::config::CheckMode;
use crate::data::storage::TensorView;
use crate::error::{GenotensorError, Result};

/// Read access to a 2-D matrix of `Copy` elements
pub trait MatrixAccess {
    type Elem: Copy;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Element at `(row, col)`; callers keep indices in range
    fn coef(&self, row: usize, col: usize) -> Self::Elem;
}

impl<M: MatrixAccess + ?Sized> MatrixAccess for &M {
    type Elem = M::Elem;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn coef(&self, row: usize, col: usize) -> Self::Elem {
        (**self).coef(row, col)
    }
}

impl<A: Copy, S: Data<Elem = A>> MatrixAccess for ArrayBase<S, Ix2> {
    type Elem = A;

    #[inline]
    fn rows(&self) -> usize {
        self.nrows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn coef(&self, row: usize, col: usize) -> A {
        self[[row, col]]
    }
}

impl<'a, T: Copy> MatrixAccess for TensorView<'a, T, 2> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.extents()[0]
    }

    #[inline]
    fn cols(&self) -> usize {
        self.extents()[1]
    }

    #[inline]
    fn coef(&self, row: usize, col: usize) -> T {
        self[[row, col]]
    }
}

/// Element `(i, j)` of `a ⊗ b`.
///
/// Indices must satisfy `i < a.rows() * b.rows()` and
/// `j < a.cols() * b.cols()`; this is a debug assertion only. Use
/// [`try_kronecker_product_coef`] on the checked path.
#[inline]
pub fn kronecker_product_coef<A, B>(a: &A, b: &B, i: usize, j: usize) -> A::Elem
where
    A: MatrixAccess + ?Sized,
    B: MatrixAccess<Elem = A::Elem> + ?Sized,
    A::Elem: Mul<Output = A::Elem>,
{
    debug_assert!(
        i < a.rows() * b.rows() && j < a.cols() * b.cols(),
        "kronecker index ({}, {}) out of bounds for {}x{}",
        i,
        j,
        a.rows() * b.rows(),
        a.cols() * b.cols()
    );
    let (rb, cb) = (b.rows(), b.cols());
    a.coef(i / rb, j / cb) * b.coef(i % rb, j % cb)
}

/// Checked [`kronecker_product_coef`].
pub fn try_kronecker_product_coef<A, B>(a: &A, b: &B, i: usize, j: usize) -> Result<A::Elem>
where
    A: MatrixAccess + ?Sized,
    B: MatrixAccess<Elem = A::Elem> + ?Sized,
    A::Elem: Mul<Output = A::Elem>,
{
    let rows = a.rows() * b.rows();
    let cols = a.cols() * b.cols();
    if i < rows && j < cols {
        Ok(kronecker_product_coef(a, b, i, j))
    } else {
        Err(GenotensorError::out_of_bounds(&[i, j], &[rows, cols]))
    }
}

/// The virtual matrix `a ⊗ b`.
///
/// Holds its operands (usually by reference) and computes elements on demand.
/// It implements [`MatrixAccess`] itself, so products nest.
#[derive(Clone, Copy, Debug)]
pub struct KroneckerProduct<A, B> {
    a: A,
    b: B,
    mode: CheckMode,
}

impl<A, B> KroneckerProduct<A, B>
where
    A: MatrixAccess,
    B: MatrixAccess<Elem = A::Elem>,
    A::Elem: Mul<Output = A::Elem>,
{
    pub fn new(a: A, b: B) -> Self {
        Self::with_mode(a, b, CheckMode::default())
    }

    pub fn with_mode(a: A, b: B, mode: CheckMode) -> Self {
        Self { a, b, mode }
    }

    pub fn mode(&self) -> CheckMode {
        self.mode
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.a.rows() * self.b.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.a.cols() * self.b.cols()
    }

    /// Element `(i, j)`; panics on out-of-range indices in `Checked` mode
    #[inline]
    #[track_caller]
    pub fn get(&self, i: usize, j: usize) -> A::Elem {
        if self.mode.is_checked() && (i >= self.rows() || j >= self.cols()) {
            panic!(
                "kronecker index ({}, {}) out of bounds for {}x{}",
                i,
                j,
                self.rows(),
                self.cols()
            );
        }
        kronecker_product_coef(&self.a, &self.b, i, j)
    }

    pub fn try_get(&self, i: usize, j: usize) -> Result<A::Elem> {
        try_kronecker_product_coef(&self.a, &self.b, i, j)
    }

    /// Lazily iterate row `i`
    pub fn row(&self, i: usize) -> impl Iterator<Item = A::Elem> + '_ {
        (0..self.cols()).map(move |j| self.get(i, j))
    }

    /// Build the full product. Intended for verification and small operands.
    pub fn to_array(&self) -> Array2<A::Elem> {
        let _span = tracing::debug_span!("kronecker_materialize", rows = self.rows(), cols = self.cols())
            .entered();
        Array2::from_shape_fn((self.rows(), self.cols()), |(i, j)| {
            kronecker_product_coef(&self.a, &self.b, i, j)
        })
    }
}

impl<A, B> MatrixAccess for KroneckerProduct<A, B>
where
    A: MatrixAccess,
    B: MatrixAccess<Elem = A::Elem>,
    A::Elem: Mul<Output = A::Elem>,
{
    type Elem = A::Elem;

    #[inline]
    fn rows(&self) -> usize {
        KroneckerProduct::rows(self)
    }

    #[inline]
    fn cols(&self) -> usize {
        KroneckerProduct::cols(self)
    }

    #[inline]
    fn coef(&self, row: usize, col: usize) -> A::Elem {
        kronecker_product_coef(&self.a, &self.b, row, col)
    }
}
