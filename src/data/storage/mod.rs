//! # Tensor Storage
//!
//! ## Role
//! Shape-annotated access to contiguous numeric buffers owned by the caller.
//!
//! ## Layout
//! All tensors are column-major: the first axis is innermost. The same
//! [`Layout`] arithmetic serves borrowed views and the owned
//! [`TensorBuffer`](crate::utils::workspace::TensorBuffer), so a buffer
//! allocated for `[width, width]` and a view declared as `[width, width]`
//! agree on every offset.
//!
//! ## Views
//! ```rust,ignore
//! // Read-only, Copy
//! let view: TensorView<'_, f32, 2> = TensorView::new(&buf, [rows, cols])?;
//!
//! // Unique, writes through to `buf`
//! let mut view: TensorViewMut<'_, f32, 2> = TensorViewMut::new(&mut buf, [rows, cols])?;
//! ```

pub mod layout;
pub mod view;

pub use layout::Layout;
pub use view::{TensorView, TensorViewMut};
