//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{DEFAULT_DENSITIES, FixedSize, calculate_fixed_sizes};
use super::params::{FillParams, Quality};
use rayon::prelude::*;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration for fixed-size image generation.
#[derive(Debug, Clone)]
pub struct FixedConfig {
    /// Display width in CSS pixels.
    pub width: u32,
    /// Display height in CSS pixels.
    pub height: u32,
    pub densities: Vec<f32>,
    pub quality: Quality,
    /// Extension of the primary (non-WebP) output, e.g. `jpg` or `png`.
    pub extension: String,
}

impl Default for FixedConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            densities: DEFAULT_DENSITIES.to_vec(),
            quality: Quality::default(),
            extension: "jpg".to_string(),
        }
    }
}

/// One generated density variant. Paths are relative to the output root and
/// always use `/` separators.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedVariant {
    pub density: f32,
    pub path: String,
    pub webp_path: String,
    pub width: u32,
    pub height: u32,
}

/// Plan the fill operations for every density without executing them.
///
/// Returns, per variant, the primary and WebP fill parameters.
pub fn plan_fixed(
    source: &Path,
    source_dims: (u32, u32),
    output_root: &Path,
    relative_dir: &str,
    filename_stem: &str,
    config: &FixedConfig,
) -> Vec<(FixedSize, FillParams, FillParams)> {
    let sizes = calculate_fixed_sizes(
        source_dims,
        (config.width, config.height),
        &config.densities,
    );
    let dir = output_root.join(relative_dir);

    sizes
        .into_iter()
        .map(|size| {
            let name = variant_name(filename_stem, &size);
            let primary = FillParams {
                source: source.to_path_buf(),
                output: dir.join(format!("{}.{}", name, config.extension)),
                width: size.width,
                height: size.height,
                quality: config.quality,
            };
            let webp = FillParams {
                output: dir.join(format!("{}.webp", name)),
                ..primary.clone()
            };
            (size, primary, webp)
        })
        .collect()
}

fn variant_name(stem: &str, size: &FixedSize) -> String {
    format!("{}-{}x{}", stem, size.width, size.height)
}

/// Create the fixed-size variants of an image under
/// `output_root/relative_dir`.
///
/// Variants are encoded in parallel; the returned list keeps density order.
pub fn create_fixed_images(
    backend: &impl ImageBackend,
    source: &Path,
    output_root: &Path,
    relative_dir: &str,
    filename_stem: &str,
    config: &FixedConfig,
) -> Result<Vec<FixedVariant>> {
    let source_dims = get_dimensions(backend, source)?;
    let plan = plan_fixed(
        source,
        source_dims,
        output_root,
        relative_dir,
        filename_stem,
        config,
    );

    std::fs::create_dir_all(output_root.join(relative_dir))?;

    plan.par_iter()
        .map(|(size, primary, webp)| -> Result<FixedVariant> {
            backend.fill(primary)?;
            backend.fill(webp)?;

            let name = variant_name(filename_stem, size);
            Ok(FixedVariant {
                density: size.density,
                path: format!("{}/{}.{}", relative_dir, name, config.extension),
                webp_path: format!("{}/{}.webp", relative_dir, name),
                width: size.width,
                height: size.height,
            })
        })
        .collect()
}
