//! Content digests for generated asset paths.
//!
//! Avatar variants are written to `static/<source>/<params>/`, where both
//! segments are truncated SHA-256 hex digests:
//!
//! - **source**: digest of the avatar file's bytes, so replacing the photo
//!   yields new URLs and browsers never serve a stale cached avatar.
//! - **params**: digest of the encoding parameters (display size, densities,
//!   quality, format). Changing any of them also changes the URL.

use sha2::{Digest, Sha256};
use std::io;
use std::path::Path;

/// Hex characters kept from each digest.
pub const DIGEST_LEN: usize = 16;

/// SHA-256 of a file's contents, truncated hex.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(truncate(format!("{:x}", digest)))
}

/// SHA-256 of the fixed-image encoding parameters, truncated hex.
pub fn hash_fixed_params(
    display: (u32, u32),
    densities: &[f32],
    quality: u32,
    extension: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"fixed\0");
    hasher.update(display.0.to_le_bytes());
    hasher.update(display.1.to_le_bytes());
    for density in densities {
        hasher.update(density.to_le_bytes());
    }
    hasher.update(quality.to_le_bytes());
    hasher.update(extension.as_bytes());
    truncate(format!("{:x}", hasher.finalize()))
}

fn truncate(mut hex: String) -> String {
    hex.truncate(DIGEST_LEN);
    hex
}
