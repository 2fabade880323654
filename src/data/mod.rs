//! # Data Module
//!
//! State-space arithmetic and tensor storage for genotype distributions.
//!
//! ## Design Philosophy
//! - **Compile-time rank:** `Haploid`/`Diploid` are zero-sized markers, so
//!   `dim_width::<Diploid>(n)` costs the same as writing `n*(n+1)/2` inline.
//! - **Borrowed storage:** views alias caller buffers and never allocate.
//! - **One layout:** column-major offsets everywhere.

pub mod dims;
pub mod rank;
pub mod storage;

// Re-export commonly used types
pub use dims::{
    allele_count, checked_num_diploids, dim_width, diploid_alleles, diploid_index, num_diploids,
};
pub use rank::{Diploid, Haploid, Rank, RankKind};
pub use storage::{Layout, TensorView, TensorViewMut};
