//! Image reading in pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Rule height** | [`resolve_height`] (halving in hidpi-only mode) |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Height**: the height transform applied to every emitted rule

pub mod backend;
pub mod height;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use height::resolve_height;
pub use rust_backend::{RustBackend, is_supported_image, supported_input_extensions};
