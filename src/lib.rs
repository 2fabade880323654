//! # Genotensor Library Root
//!
//! ## Role
//! Numeric building blocks for likelihood computations over diploid genotype
//! states: state-space sizes, borrowed tensor views, compensated summation
//! and lazy Kronecker-product access. The crate computes no probability model
//! itself; the enclosing pedigree engine calls into it.
//!
//! ## Module Structure
//! ```text
//! genotensor
//! ├── config      # Access policy (checked / unchecked)
//! ├── data        # Dimension math, rank markers
//! │   └── storage # Column-major layout, tensor views
//! ├── error       # Error type
//! ├── model       # Kahan summation, Kronecker access
//! └── utils       # Owned aligned tensor buffers
//! ```
//!
//! ## Quick Tour
//! ```
//! use genotensor::data::{dim_width, Diploid, TensorView};
//! use genotensor::model::{sum_kahan, KroneckerProduct};
//! use ndarray::array;
//!
//! let width = dim_width::<Diploid>(2);
//! let buf = vec![1.0f64 / 9.0; width * width];
//! let joint = TensorView::new(&buf, [width, width]).unwrap();
//! assert!((joint.sum_kahan() - 1.0).abs() < 1e-15);
//!
//! let a = array![[0.9f64, 0.1], [0.2, 0.8]];
//! let pair = KroneckerProduct::new(&a, &a);
//! assert_eq!(pair.get(1, 2), 0.1 * 0.2);
//! assert!((sum_kahan(pair.row(0)) - 1.0).abs() < 1e-15);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod utils;

pub use config::CheckMode;
pub use error::{GenotensorError, Result};
