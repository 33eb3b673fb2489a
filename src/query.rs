//! Build-time data query.
//!
//! Stage 1 of the pipeline. Resolves everything the bio block needs into a
//! plain [`BioData`] value:
//!
//! - **Site metadata**: author name and social handles from `config.toml`.
//! - **Avatar**: the first file named `avatar.file` (default
//!   `profile-pic.jpg`) anywhere under the content root, cover-cropped to the
//!   configured display size at 1x, 1.5x and 2x.
//!
//! ## Output
//!
//! ```text
//! .simple-bio-temp/
//! ├── bio.json                                  # QueryManifest
//! └── static/
//!     └── 3f9c0a1b2c3d4e5f/                     # source digest
//!         └── 9a8b7c6d5e4f3a2b/                 # params digest
//!             ├── profile-pic-50x50.jpg
//!             ├── profile-pic-50x50.webp
//!             ├── profile-pic-75x75.jpg
//!             └── ...
//! ```
//!
//! `static/` holds only the current avatar: it is cleared before the
//! variants are written.
//!
//! The query is where the bio's data contract is enforced: a missing author
//! name or avatar fails here, so the renderer can assume complete input.

use crate::config::{self, ConfigError, SiteConfig};
use crate::digest;
use crate::imaging::{
    BackendError, DEFAULT_DENSITIES, FixedConfig, FixedVariant, ImageBackend, Quality,
    RustBackend, create_fixed_images, density_descriptor, is_supported_input,
};
use crate::types::{BioData, FixedImage, Platform};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// File name of the query manifest inside the temp directory.
pub const MANIFEST_FILENAME: &str = "bio.json";

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Avatar '{file}' not found under {root}")]
    AvatarNotFound { file: String, root: PathBuf },
    #[error("Unsupported avatar format: {0}")]
    UnsupportedAvatar(PathBuf),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Everything stage 2 needs, serialized to `bio.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryManifest {
    pub bio: BioData,
    /// Avatar source path, relative to the content root.
    pub avatar_source: String,
    pub config: SiteConfig,
}

/// Result of a dry run over the content directory.
#[derive(Debug)]
pub struct CheckReport {
    pub author: String,
    pub avatar_source: PathBuf,
    /// Platforms with an empty handle; these still render, pointing at the
    /// platform root.
    pub missing_social: Vec<Platform>,
}

/// Load `config.toml` from `source_root` and run the query with the default
/// image backend.
pub fn run(source_root: &Path, processed_dir: &Path) -> Result<QueryManifest, QueryError> {
    let config = config::load_config(source_root)?;
    query(&RustBackend::new(), source_root, processed_dir, &config)
}

/// Resolve [`BioData`] from the content directory.
///
/// Avatar variants are written under `processed_dir/static/`, replacing
/// whatever an earlier run left there.
pub fn query(
    backend: &impl ImageBackend,
    source_root: &Path,
    processed_dir: &Path,
    config: &SiteConfig,
) -> Result<QueryManifest, QueryError> {
    require_author(config)?;
    let avatar_path = find_avatar(source_root, &config.avatar.file)?;

    let fixed_config = FixedConfig {
        width: config.avatar.width,
        height: config.avatar.height,
        densities: DEFAULT_DENSITIES.to_vec(),
        quality: Quality::new(config.avatar.quality),
        extension: output_extension(&avatar_path).to_string(),
    };
    let relative_dir = format!(
        "static/{}/{}",
        digest::hash_file(&avatar_path)?,
        digest::hash_fixed_params(
            (fixed_config.width, fixed_config.height),
            &fixed_config.densities,
            fixed_config.quality.value(),
            &fixed_config.extension,
        )
    );

    let static_dir = processed_dir.join("static");
    if static_dir.is_dir() {
        fs::remove_dir_all(&static_dir)?;
    }

    let stem = avatar_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "avatar".to_string());

    let variants = create_fixed_images(
        backend,
        &avatar_path,
        processed_dir,
        &relative_dir,
        &stem,
        &fixed_config,
    )?;

    let bio = BioData {
        avatar: fixed_image(config.avatar.width, config.avatar.height, &variants),
        author: config.author.clone(),
        social: config.social.clone(),
    };

    Ok(QueryManifest {
        bio,
        avatar_source: relative_source(source_root, &avatar_path),
        config: config.clone(),
    })
}

/// Validate the content directory without writing anything.
pub fn check(source_root: &Path) -> Result<CheckReport, QueryError> {
    let config = config::load_config(source_root)?;
    require_author(&config)?;
    let avatar_source = find_avatar(source_root, &config.avatar.file)?;

    Ok(CheckReport {
        author: config.author.name.clone(),
        avatar_source,
        missing_social: config.social.missing(),
    })
}

fn require_author(config: &SiteConfig) -> Result<(), QueryError> {
    if config.author.name.trim().is_empty() {
        return Err(QueryError::MissingField("author.name"));
    }
    Ok(())
}

/// Find the first file named `file_name` under `root`.
///
/// Entries are visited in file-name order and hidden directories are skipped,
/// so the match is deterministic. A directory that cannot be read fails the
/// lookup with [`QueryError::Io`].
pub fn find_avatar(root: &Path, file_name: &str) -> Result<PathBuf, QueryError> {
    let mut found = None;
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && entry.file_name().to_str() == Some(file_name) {
            found = Some(entry.into_path());
            break;
        }
    }

    let path = found.ok_or_else(|| QueryError::AvatarNotFound {
        file: file_name.to_string(),
        root: root.to_path_buf(),
    })?;

    if !is_supported_input(&path) {
        return Err(QueryError::UnsupportedAvatar(path));
    }
    Ok(path)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// PNG sources stay PNG (keeps transparency); everything else becomes JPEG.
fn output_extension(source: &Path) -> &'static str {
    match source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "png",
        _ => "jpg",
    }
}

fn relative_source(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the image descriptor from generated variants.
///
/// `variants` must be non-empty and start with the `1x` variant, which
/// [`create_fixed_images`] guarantees.
fn fixed_image(width: u32, height: u32, variants: &[FixedVariant]) -> FixedImage {
    let first = variants.first();

    FixedImage {
        width,
        height,
        src: first.map(|v| format!("/{}", v.path)).unwrap_or_default(),
        src_set: src_set(variants, false),
        src_set_webp: first.map(|_| src_set(variants, true)),
    }
}

fn src_set(variants: &[FixedVariant], webp: bool) -> String {
    variants
        .iter()
        .map(|v| {
            let path = if webp { &v.webp_path } else { &v.path };
            format!("/{} {}", path, density_descriptor(v.density))
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{create_test_jpeg, jane_config, setup_content};
    use std::fs;
    use tempfile::TempDir;

    fn mock_backend(width: u32, height: u32) -> MockBackend {
        MockBackend::with_dimensions(vec![Dimensions { width, height }])
    }

    #[test]
    fn query_copies_site_metadata() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        let config = jane_config();

        let manifest = query(&mock_backend(400, 400), content.path(), out.path(), &config).unwrap();

        assert_eq!(manifest.bio.author.name, "Jane Doe");
        assert_eq!(manifest.bio.social, config.social);
        assert_eq!(manifest.avatar_source, "images/profile-pic.jpg");
    }

    #[test]
    fn query_builds_density_src_set() {
        let content = setup_content();
        let out = TempDir::new().unwrap();

        let manifest =
            query(&mock_backend(400, 400), content.path(), out.path(), &jane_config()).unwrap();
        let avatar = &manifest.bio.avatar;

        assert_eq!((avatar.width, avatar.height), (50, 50));
        assert!(avatar.src.starts_with("/static/"));
        assert!(avatar.src.ends_with("/profile-pic-50x50.jpg"));

        let entries: Vec<&str> = avatar.src_set.split(",\n").collect();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].ends_with("profile-pic-50x50.jpg 1x"));
        assert!(entries[1].ends_with("profile-pic-75x75.jpg 1.5x"));
        assert!(entries[2].ends_with("profile-pic-100x100.jpg 2x"));

        let webp = avatar.src_set_webp.as_deref().unwrap();
        assert!(webp.contains("profile-pic-100x100.webp 2x"));
        assert!(webp.starts_with("/static/"));
    }

    #[test]
    fn query_path_is_content_addressed() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        let config = jane_config();

        let first = query(&mock_backend(400, 400), content.path(), out.path(), &config).unwrap();
        let again = query(&mock_backend(400, 400), content.path(), out.path(), &config).unwrap();
        assert_eq!(first.bio.avatar.src, again.bio.avatar.src);

        create_test_jpeg(&content.path().join("images/profile-pic.jpg"), 300, 200);
        let changed = query(&mock_backend(300, 200), content.path(), out.path(), &config).unwrap();
        assert_ne!(first.bio.avatar.src, changed.bio.avatar.src);
    }

    #[test]
    fn query_requires_author_name() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        let mut config = jane_config();
        config.author.name = "   ".to_string();

        let result = query(&mock_backend(400, 400), content.path(), out.path(), &config);
        assert!(matches!(result, Err(QueryError::MissingField("author.name"))));
    }

    #[test]
    fn query_missing_avatar_is_error() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let result = query(&mock_backend(400, 400), content.path(), out.path(), &jane_config());
        assert!(matches!(
            result,
            Err(QueryError::AvatarNotFound { ref file, .. }) if file == "profile-pic.jpg"
        ));
    }

    #[test]
    fn find_avatar_skips_hidden_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".cache")).unwrap();
        fs::create_dir_all(tmp.path().join("z")).unwrap();
        create_test_jpeg(&tmp.path().join(".cache/profile-pic.jpg"), 10, 10);
        create_test_jpeg(&tmp.path().join("z/profile-pic.jpg"), 10, 10);

        let found = find_avatar(tmp.path(), "profile-pic.jpg").unwrap();
        assert_eq!(found, tmp.path().join("z/profile-pic.jpg"));
    }

    #[test]
    fn find_avatar_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        for dir in ["b", "a"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
            create_test_jpeg(&tmp.path().join(dir).join("me.jpg"), 10, 10);
        }

        let found = find_avatar(tmp.path(), "me.jpg").unwrap();
        assert_eq!(found, tmp.path().join("a/me.jpg"));
    }

    #[test]
    fn query_replaces_previous_variants() {
        let content = setup_content();
        let out = TempDir::new().unwrap();
        let config = jane_config();

        let first = query(&mock_backend(400, 400), content.path(), out.path(), &config).unwrap();
        create_test_jpeg(&content.path().join("images/profile-pic.jpg"), 300, 300);
        let second = query(&mock_backend(300, 300), content.path(), out.path(), &config).unwrap();

        // "/static/<source digest>/<params digest>/<file>"
        let source_digest = |src: &str| src.split('/').nth(2).unwrap().to_string();
        assert_ne!(
            source_digest(&first.bio.avatar.src),
            source_digest(&second.bio.avatar.src)
        );

        let dirs: Vec<String> = fs::read_dir(out.path().join("static"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(dirs, vec![source_digest(&second.bio.avatar.src)]);
    }

    #[test]
    fn find_avatar_missing_root_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = find_avatar(&tmp.path().join("nope"), "profile-pic.jpg");
        assert!(matches!(result, Err(QueryError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn find_avatar_unreadable_directory_is_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let locked = tmp.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores permission bits
        let readable = fs::read_dir(&locked).is_ok();

        let result = find_avatar(tmp.path(), "profile-pic.jpg");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(matches!(result, Err(QueryError::Io(_))));
        }
    }

    #[test]
    fn find_avatar_rejects_unsupported_format() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("me.gif"), b"GIF89a").unwrap();

        let result = find_avatar(tmp.path(), "me.gif");
        assert!(matches!(result, Err(QueryError::UnsupportedAvatar(_))));
    }

    #[test]
    fn output_extension_keeps_png() {
        assert_eq!(output_extension(Path::new("a.PNG")), "png");
        assert_eq!(output_extension(Path::new("a.jpeg")), "jpg");
        assert_eq!(output_extension(Path::new("a.webp")), "jpg");
    }

    #[test]
    fn check_reports_missing_social_handles() {
        let content = setup_content();
        fs::write(
            content.path().join("config.toml"),
            r#"
[author]
name = "Jane Doe"

[social]
github = "janedoe"
"#,
        )
        .unwrap();

        let report = check(content.path()).unwrap();
        assert_eq!(report.author, "Jane Doe");
        assert!(report.avatar_source.ends_with("images/profile-pic.jpg"));
        assert_eq!(report.missing_social.len(), 4);
        assert!(!report.missing_social.contains(&Platform::GitHub));
    }

    #[test]
    fn run_uses_real_backend() {
        let content = setup_content();
        let out = TempDir::new().unwrap();

        let manifest = run(content.path(), out.path()).unwrap();

        let one_x = out.path().join(manifest.bio.avatar.src.trim_start_matches('/'));
        assert_eq!(image::image_dimensions(&one_x).unwrap(), (50, 50));
        let assets = manifest.bio.avatar.asset_paths();
        assert_eq!(assets.len(), 6);
        assert!(assets.iter().all(|a| out.path().join(a).exists()));
    }
}
