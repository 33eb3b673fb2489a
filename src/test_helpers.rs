//! Shared test utilities for the simple-bio test suite.
//!
//! Provides fixture builders for bio data, site config, and on-disk content
//! directories with a synthetic avatar.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let content = setup_content();
//! let config = jane_config();
//! let html = render(&jane_doe()).into_string();
//! ```

use image::{ImageEncoder, RgbImage};
use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::types::{Author, BioData, FixedImage, Social};

// =========================================================================
// Data fixtures
// =========================================================================

/// Jane Doe's social handles.
pub fn jane_social() -> Social {
    Social {
        twitter: "jane".to_string(),
        linkedin: "jane-doe".to_string(),
        xing: "jane.x".to_string(),
        github: "janedoe".to_string(),
        dev: "jane".to_string(),
    }
}

/// A fully populated [`BioData`] for Jane Doe.
pub fn jane_doe() -> BioData {
    BioData {
        avatar: FixedImage {
            width: 50,
            height: 50,
            src: "/static/aaaa/bbbb/profile-pic-50x50.jpg".to_string(),
            src_set: "/static/aaaa/bbbb/profile-pic-50x50.jpg 1x,\n\
                      /static/aaaa/bbbb/profile-pic-100x100.jpg 2x"
                .to_string(),
            src_set_webp: Some(
                "/static/aaaa/bbbb/profile-pic-50x50.webp 1x,\n\
                 /static/aaaa/bbbb/profile-pic-100x100.webp 2x"
                    .to_string(),
            ),
        },
        author: Author {
            name: "Jane Doe".to_string(),
        },
        social: jane_social(),
    }
}

/// Default site config with Jane Doe's metadata.
pub fn jane_config() -> SiteConfig {
    SiteConfig {
        author: Author {
            name: "Jane Doe".to_string(),
        },
        social: jane_social(),
        ..SiteConfig::default()
    }
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// A content directory with Jane Doe's `config.toml` and a 400x400 avatar
/// at `images/profile-pic.jpg`.
pub fn setup_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        r#"
[author]
name = "Jane Doe"

[social]
twitter = "jane"
linkedin = "jane-doe"
xing = "jane.x"
github = "janedoe"
dev = "jane"
"#,
    )
    .unwrap();
    std::fs::create_dir_all(tmp.path().join("images")).unwrap();
    create_test_jpeg(&tmp.path().join("images/profile-pic.jpg"), 400, 400);
    tmp
}
