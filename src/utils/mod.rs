//! # Utilities Module
//!
//! ## Role
//! Cross-cutting helpers that don't belong in the data or model modules.
//!
//! ## Sub-modules
//! - `workspace`: owned, aligned tensor buffers that views are borrowed from
//!
//! ## Design Notes
//! The engine allocates once per locus and reuses buffers across computation
//! steps, so the hot paths only ever see borrowed views.

pub mod workspace;

pub use workspace::{ProbTensor, TensorBuffer};
