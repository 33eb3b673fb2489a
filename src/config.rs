//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the avatar image:
//!
//! ```text
//! content/
//! ├── config.toml        # Site metadata, avatar and theme settings
//! └── profile-pic.jpg    # Avatar source (name configurable)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [author]
//! name = ""                 # Required by the query stage
//!
//! [social]
//! twitter = ""
//! linkedin = ""
//! xing = ""
//! github = ""
//! dev = ""
//!
//! [avatar]
//! file = "profile-pic.jpg"  # Looked up anywhere under the content root
//! width = 50                # Display size in CSS pixels
//! height = 50
//! quality = 90              # JPEG quality (1-100)
//!
//! [theme]
//! rhythm = "1.75rem"        # Vertical rhythm unit, rhythm(1)
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#222222"
//! primary = "#007acc"       # Avatar border
//! link = "#007acc"
//! link_hover = "#005a9e"
//!
//! [colors.dark]
//! background = "#121212"
//! text = "#e6e6e6"
//! primary = "#4fb3ff"
//! link = "#4fb3ff"
//! link_hover = "#9fd4ff"
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use crate::types::{Author, Social};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Author metadata shown in the bio.
    pub author: Author,
    /// Social handles, one per platform.
    pub social: Social,
    /// Avatar source file and fixed output size.
    pub avatar: AvatarConfig,
    /// Spacing settings.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.avatar.quality) {
            return Err(ConfigError::Validation(
                "avatar.quality must be 1-100".into(),
            ));
        }
        if self.avatar.width == 0 || self.avatar.height == 0 {
            return Err(ConfigError::Validation(
                "avatar.width and avatar.height must be non-zero".into(),
            ));
        }
        if self.avatar.file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "avatar.file must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Avatar lookup and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    /// File name of the avatar source, matched anywhere under the content root.
    pub file: String,
    /// Display width in CSS pixels.
    pub width: u32,
    /// Display height in CSS pixels.
    pub height: u32,
    /// Encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            file: "profile-pic.jpg".to_string(),
            width: 50,
            height: 50,
            quality: 90,
        }
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// One unit of vertical rhythm (CSS length). Bio spacing is expressed in
    /// multiples of it.
    pub rhythm: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            rhythm: "1.75rem".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Accent color (avatar border).
    pub primary: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#222222".to_string(),
            primary: "#007acc".to_string(),
            link: "#007acc".to_string(),
            link_hover: "#005a9e".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#e6e6e6".to_string(),
            primary: "#4fb3ff".to_string(),
            link: "#4fb3ff".to_string(),
            link_hover: "#9fd4ff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Bio Configuration
# ========================
# All settings are optional except author.name. Values shown below are the
# defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Author
# ---------------------------------------------------------------------------
[author]
# Display name, used in the bio text and as the avatar's alt text.
name = ""

# ---------------------------------------------------------------------------
# Social handles
# ---------------------------------------------------------------------------
# Usernames only; the profile URL prefix is added for you.
# An empty handle still renders a link to the platform's root.
[social]
linkedin = ""
xing = ""
twitter = ""
github = ""
dev = ""

# ---------------------------------------------------------------------------
# Avatar
# ---------------------------------------------------------------------------
[avatar]
# File name of the avatar source, searched for anywhere under the content root.
file = "profile-pic.jpg"

# Display size in CSS pixels. 1.5x and 2x variants are generated when the
# source is large enough.
width = 50
height = 50

# JPEG encoding quality (1 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# One unit of vertical rhythm. Bio spacing uses multiples of it.
rhythm = "1.75rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#222222"
primary = "#007acc"    # Avatar border
link = "#007acc"
link_hover = "#005a9e"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#121212"
text = "#e6e6e6"
primary = "#4fb3ff"
link = "#4fb3ff"
link_hover = "#9fd4ff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-primary: {light_primary};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-primary: {dark_primary};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_primary = colors.light.primary,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_primary = colors.dark.primary,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --rhythm: {rhythm};
}}"#,
        rhythm = theme.rhythm,
    )
}
