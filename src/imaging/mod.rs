//! Image processing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Fixed variants** | `resize_to_fill` (Lanczos3) → JPEG/PNG + lossless WebP |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for density/dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{DEFAULT_DENSITIES, FixedSize, calculate_fixed_sizes, density_descriptor};
pub use operations::{FixedConfig, FixedVariant, create_fixed_images, get_dimensions};
pub use params::{FillParams, Quality};
pub use rust_backend::{RustBackend, is_supported_input};
