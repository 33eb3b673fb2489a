//! Image processing backend trait and shared types.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use
//! `MockBackend`, which records operations instead of touching pixels.

use super::params::FillParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` so variants can be encoded from rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Resize to fill and center-crop to exact dimensions.
    fn fill(&self, params: &FillParams) -> Result<(), BackendError>;
}
