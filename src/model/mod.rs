//! # Model Module
//!
//! Numeric kernels the likelihood engine builds on.
//!
//! ## Kernels
//! - `kahan`: sign-split compensated summation over flat buffers, slices,
//!   views and `ndarray` arrays
//! - `kronecker`: O(1) element access into Kronecker products of matrices,
//!   plus a lazy product value that nests
//!
//! Both are pure functions over caller data. Neither allocates except
//! `KroneckerProduct::to_array`, which exists for verification.

pub mod kahan;
pub mod kronecker;

pub use kahan::{sum_kahan, sum_kahan_array, SignedKahan};
pub use kronecker::{
    kronecker_product_coef, try_kronecker_product_coef, KroneckerProduct, MatrixAccess,
};
