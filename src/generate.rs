//! HTML output generation.
//!
//! Stage 2 of the pipeline. Takes the query manifest and writes the final
//! files.
//!
//! ## Generated Files
//!
//! - **Fragment** (`/bio.html`): the bare bio block, ready to be included in
//!   a blog template.
//! - **Preview** (`/index.html`): a standalone document with the generated
//!   CSS, useful for checking the block in a browser.
//! - **Avatar variants** (`/static/...`): the variants the manifest
//!   references, copied from the temp directory. `static/` is rebuilt on
//!   every run, so assets of a replaced avatar are not published.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── bio.html
//! ├── index.html
//! └── static/<source digest>/<params digest>/
//!     ├── profile-pic-50x50.jpg
//!     ├── profile-pic-50x50.webp
//!     └── ...
//! ```
//!
//! ## CSS
//!
//! `static/bio.css` is embedded at compile time. Color and rhythm custom
//! properties generated from config are prepended to it.

use crate::config;
use crate::query::QueryManifest;
use crate::render;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset path outside static/: {0}")]
    InvalidAsset(String),
}

/// File name of the bare bio fragment.
pub const FRAGMENT_FILENAME: &str = "bio.html";
/// File name of the preview document.
pub const PREVIEW_FILENAME: &str = "index.html";

const CSS_STATIC: &str = include_str!("../static/bio.css");

/// What stage 2 wrote, for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub files: Vec<String>,
}

pub fn generate(
    manifest_path: &Path,
    processed_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: QueryManifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    let mut files = copy_assets(&manifest.bio.avatar.asset_paths(), processed_dir, output_dir)?;

    let fragment = render::render(&manifest.bio);
    fs::write(output_dir.join(FRAGMENT_FILENAME), fragment.into_string())?;
    files.push(FRAGMENT_FILENAME.to_string());

    let css = build_css(&manifest.config);
    let preview = render_preview_page(&manifest, &css);
    fs::write(output_dir.join(PREVIEW_FILENAME), preview.into_string())?;
    files.push(PREVIEW_FILENAME.to_string());

    files.sort();
    Ok(GenerateReport { files })
}

/// Generated custom properties followed by the static stylesheet.
pub fn build_css(config: &config::SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    )
}

/// Replace `output_dir/static` with exactly the listed assets. Paths are
/// relative to both roots and must stay inside `static/`.
fn copy_assets(
    assets: &[&str],
    processed_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<String>, GenerateError> {
    let static_out = output_dir.join("static");
    if static_out.is_dir() {
        fs::remove_dir_all(&static_out)?;
    }

    let mut copied = Vec::new();
    for &asset in assets {
        if !is_static_asset(asset) {
            return Err(GenerateError::InvalidAsset(asset.to_string()));
        }
        if copied.iter().any(|c| c == asset) {
            continue;
        }
        let dst = output_dir.join(asset);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(processed_dir.join(asset), &dst)?;
        copied.push(asset.to_string());
    }
    Ok(copied)
}

fn is_static_asset(path: &str) -> bool {
    let mut components = Path::new(path).components();
    components.next() == Some(Component::Normal("static".as_ref()))
        && components.clone().next().is_some()
        && components.all(|c| matches!(c, Component::Normal(_)))
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the standalone preview page around the bio fragment.
fn render_preview_page(manifest: &QueryManifest, css: &str) -> Markup {
    let title = format!("About {}", manifest.bio.author.name);
    let content = html! {
        main.preview {
            (render::render(&manifest.bio))
        }
    };

    base_document(&title, css, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{jane_config, jane_doe};
    use tempfile::TempDir;

    fn jane_manifest() -> QueryManifest {
        QueryManifest {
            bio: jane_doe(),
            avatar_source: "profile-pic.jpg".to_string(),
            config: jane_config(),
        }
    }

    #[test]
    fn build_css_includes_variables_and_static_rules() {
        let css = build_css(&jane_config());
        assert!(css.contains("--color-primary: #007acc"));
        assert!(css.contains("--rhythm: 1.75rem"));
        assert!(css.contains(".bio-avatar"));
    }

    #[test]
    fn preview_page_embeds_fragment_and_css() {
        let manifest = jane_manifest();
        let html = render_preview_page(&manifest, "body { color: red; }").into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>About Jane Doe</title>"));
        assert!(html.contains("<style>body { color: red; }</style>"));
        assert!(html.contains(r#"<main class="preview"><div class="bio">"#));
    }

    const JANE_ASSETS: [&str; 4] = [
        "static/aaaa/bbbb/profile-pic-100x100.jpg",
        "static/aaaa/bbbb/profile-pic-100x100.webp",
        "static/aaaa/bbbb/profile-pic-50x50.jpg",
        "static/aaaa/bbbb/profile-pic-50x50.webp",
    ];

    /// Temp dir with Jane's manifest and every variant it references.
    fn processed_dir(root: &Path) -> std::path::PathBuf {
        let processed = root.join("processed");
        for asset in JANE_ASSETS {
            let path = processed.join(asset);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, asset.as_bytes()).unwrap();
        }
        fs::write(
            processed.join("bio.json"),
            serde_json::to_string_pretty(&jane_manifest()).unwrap(),
        )
        .unwrap();
        processed
    }

    #[test]
    fn generate_writes_fragment_preview_and_assets() {
        let tmp = TempDir::new().unwrap();
        let processed = processed_dir(tmp.path());

        let output = tmp.path().join("dist");
        let report = generate(&processed.join("bio.json"), &processed, &output).unwrap();

        let mut expected = vec!["bio.html".to_string(), "index.html".to_string()];
        expected.extend(JANE_ASSETS.iter().map(|a| a.to_string()));
        assert_eq!(report.files, expected);
        for asset in JANE_ASSETS {
            assert_eq!(fs::read_to_string(output.join(asset)).unwrap(), asset);
        }
        assert!(!output.join("bio.json").exists());

        let fragment = fs::read_to_string(output.join("bio.html")).unwrap();
        assert_eq!(fragment, render::render(&jane_doe()).into_string());
    }

    #[test]
    fn generate_skips_unreferenced_variants() {
        let tmp = TempDir::new().unwrap();
        let processed = processed_dir(tmp.path());
        let stale = processed.join("static/old0/old1/profile-pic-50x50.jpg");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, b"old").unwrap();

        let output = tmp.path().join("dist");
        let report = generate(&processed.join("bio.json"), &processed, &output).unwrap();

        assert_eq!(report.files.len(), 2 + JANE_ASSETS.len());
        assert!(!output.join("static/old0").exists());
    }

    #[test]
    fn generate_clears_previous_static_output() {
        let tmp = TempDir::new().unwrap();
        let processed = processed_dir(tmp.path());
        let output = tmp.path().join("dist");
        let leftover = output.join("static/old0/old1/profile-pic-50x50.jpg");
        fs::create_dir_all(leftover.parent().unwrap()).unwrap();
        fs::write(&leftover, b"old").unwrap();
        fs::write(output.join("keep.txt"), b"mine").unwrap();

        generate(&processed.join("bio.json"), &processed, &output).unwrap();

        assert!(!leftover.exists());
        assert!(output.join("keep.txt").exists());
        assert!(output.join(JANE_ASSETS[0]).exists());
    }

    #[test]
    fn generate_missing_referenced_variant_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let processed = processed_dir(tmp.path());
        fs::remove_file(processed.join(JANE_ASSETS[0])).unwrap();

        let result = generate(
            &processed.join("bio.json"),
            &processed,
            &tmp.path().join("dist"),
        );
        assert!(matches!(result, Err(GenerateError::Io(_))));
    }

    #[test]
    fn static_asset_paths_must_stay_in_static() {
        assert!(is_static_asset("static/a/b/me-50x50.jpg"));
        assert!(!is_static_asset("static"));
        assert!(!is_static_asset("bio.json"));
        assert!(!is_static_asset("static/../../etc/passwd"));
        assert!(!is_static_asset("/static/a.jpg"));
    }

    #[test]
    fn generate_missing_manifest_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = generate(
            &tmp.path().join("missing.json"),
            tmp.path(),
            &tmp.path().join("dist"),
        );
        assert!(matches!(result, Err(GenerateError::Io(_))));
    }

    #[test]
    fn generate_invalid_manifest_is_json_error() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("bio.json");
        fs::write(&manifest_path, "{ not json").unwrap();

        let result = generate(&manifest_path, tmp.path(), &tmp.path().join("dist"));
        assert!(matches!(result, Err(GenerateError::Json(_))));
    }
}
