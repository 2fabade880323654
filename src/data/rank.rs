//! # Rank Marker Types
//!
//! Zero-sized marker types selecting the state-space formula at compile time.
//! A haploid axis has one state per allele; a diploid axis has one state per
//! unordered allele pair.
//!
//! # Example
//!
//! ```
//! use genotensor::data::{dim_width, Diploid, Haploid};
//!
//! assert_eq!(dim_width::<Haploid>(4), 4);
//! assert_eq!(dim_width::<Diploid>(4), 10);
//! ```
//!
//! Callers that only learn the rank at runtime use [`Rank`] instead.

use std::fmt::Debug;

use crate::data::dims::num_diploids;

/// Marker trait for rank kinds.
///
/// This trait is sealed and cannot be implemented outside this module,
/// ensuring only `Haploid` and `Diploid` can be used as rank parameters.
pub trait RankKind: Copy + Clone + Default + Debug + private::Sealed {
    /// Number of alleles per state (1 for haploid, 2 for diploid)
    const RANK: usize;

    /// Runtime counterpart of this marker
    const KIND: Rank;

    /// Size of the state space for `n_alleles` alleles
    fn width(n_alleles: usize) -> usize;
}

mod private {
    pub trait Sealed {}
    impl Sealed for super::Haploid {}
    impl Sealed for super::Diploid {}
}

/// Rank marker: one allele per state.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Haploid;

impl RankKind for Haploid {
    const RANK: usize = 1;
    const KIND: Rank = Rank::Haploid;

    #[inline(always)]
    fn width(n_alleles: usize) -> usize {
        n_alleles
    }
}

/// Rank marker: an unordered allele pair per state.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Diploid;

impl RankKind for Diploid {
    const RANK: usize = 2;
    const KIND: Rank = Rank::Diploid;

    #[inline(always)]
    fn width(n_alleles: usize) -> usize {
        num_diploids(n_alleles)
    }
}

/// Runtime rank selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    Haploid = 1,
    Diploid = 2,
}

impl Rank {
    /// Number of alleles per state
    #[inline]
    pub const fn ploidy(self) -> usize {
        self as usize
    }

    /// Size of the state space for `n_alleles` alleles
    #[inline]
    pub const fn dim_width(self, n_alleles: usize) -> usize {
        match self {
            Rank::Haploid => n_alleles,
            Rank::Diploid => num_diploids(n_alleles),
        }
    }
}
