//! # Sign-Split Compensated Summation
//!
//! Kahan summation with two independent accumulators: one for values `> 0`,
//! one for values `<= 0`. Each branch keeps its own compensation term and the
//! result is the sum of both branch totals.
//!
//! Probability-mass tensors are mostly same-signed with occasional
//! cancellation. Keeping the signs apart means a large value of one sign
//! cannot swallow the low-order bits of many tiny values of the other sign
//! before they have been accumulated.
//!
//! ## Update (per branch)
//! ```text
//! y   = x - c
//! t   = sum + y
//! c   = (t - sum) - y
//! sum = t
//! ```
//!
//! Traversal order is the input's order, so results are deterministic for a
//! given order but not invariant under reordering. NaN fails the `> 0` test,
//! lands in the non-positive branch, and propagates to the result.

use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Float;

/// Running state of a sign-split compensated sum
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignedKahan<T> {
    sum_pos: T,
    comp_pos: T,
    sum_neg: T,
    comp_neg: T,
}

impl<T: Float> SignedKahan<T> {
    pub fn new() -> Self {
        Self {
            sum_pos: T::zero(),
            comp_pos: T::zero(),
            sum_neg: T::zero(),
            comp_neg: T::zero(),
        }
    }

    /// Accumulate one value into the branch matching its sign
    #[inline]
    pub fn add(&mut self, x: T) {
        if x > T::zero() {
            let y = x - self.comp_pos;
            let t = self.sum_pos + y;
            self.comp_pos = (t - self.sum_pos) - y;
            self.sum_pos = t;
        } else {
            let y = x - self.comp_neg;
            let t = self.sum_neg + y;
            self.comp_neg = (t - self.sum_neg) - y;
            self.sum_neg = t;
        }
    }

    /// Sum of both branch totals
    #[inline]
    pub fn total(&self) -> T {
        self.sum_pos + self.sum_neg
    }

    /// Running total of the positive branch
    pub fn positive(&self) -> T {
        self.sum_pos
    }

    /// Running total of the non-positive branch
    pub fn non_positive(&self) -> T {
        self.sum_neg
    }
}

impl<T: Float> Default for SignedKahan<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Extend<T> for SignedKahan<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl<'a, T: Float + 'a> Extend<&'a T> for SignedKahan<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &x in iter {
            self.add(x);
        }
    }
}

impl<T: Float> FromIterator<T> for SignedKahan<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

/// Compensated sum of `values` in iteration order. Empty input gives 0.
pub fn sum_kahan<T, I>(values: I) -> T
where
    T: Float,
    I: IntoIterator<Item = T>,
{
    values.into_iter().collect::<SignedKahan<T>>().total()
}

/// Compensated sum of an `ndarray` array.
///
/// Contiguous arrays (either order) are traversed in memory order, which is
/// the flat order of the underlying buffer. Other arrays fall back to logical
/// (row-major) iteration.
pub fn sum_kahan_array<A, S, D>(array: &ArrayBase<S, D>) -> A
where
    A: Float,
    S: Data<Elem = A>,
    D: Dimension,
{
    match array.as_slice_memory_order() {
        Some(flat) => sum_kahan(flat.iter().copied()),
        None => sum_kahan(array.iter().copied()),
    }
}
