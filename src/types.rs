//! Data shared between the query stage and the renderer.
//!
//! [`BioData`] is what the query stage resolves and what [`crate::render`]
//! consumes. It is serialized to `bio.json` between the two stages.

use serde::{Deserialize, Serialize};

/// Everything the bio block needs, resolved once at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioData {
    pub avatar: FixedImage,
    pub author: Author,
    pub social: Social,
}

/// A fixed-size image with density variants (`1x`, `1.5x`, `2x`).
///
/// `width` and `height` are the display size in CSS pixels, not the pixel
/// size of any particular variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedImage {
    pub width: u32,
    pub height: u32,
    /// URL of the `1x` variant.
    pub src: String,
    /// `srcset` value with density descriptors.
    pub src_set: String,
    /// WebP `srcset`, offered through a `<picture>` source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_set_webp: Option<String>,
}

impl FixedImage {
    /// Paths of every variant listed in the srcsets, relative to the output
    /// root (leading `/` removed), in srcset order.
    pub fn asset_paths(&self) -> Vec<&str> {
        std::iter::once(self.src_set.as_str())
            .chain(self.src_set_webp.as_deref())
            .flat_map(|set| set.split(','))
            .filter_map(|entry| entry.split_whitespace().next())
            .map(|url| url.trim_start_matches('/'))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Author {
    /// Display name, also used as the avatar's alt text.
    pub name: String,
}

/// Usernames per platform.
///
/// Missing handles deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Social {
    pub twitter: String,
    pub linkedin: String,
    pub xing: String,
    pub github: String,
    pub dev: String,
}

impl Social {
    /// Username for a platform.
    pub fn handle(&self, platform: Platform) -> &str {
        match platform {
            Platform::LinkedIn => &self.linkedin,
            Platform::Xing => &self.xing,
            Platform::Twitter => &self.twitter,
            Platform::GitHub => &self.github,
            Platform::Dev => &self.dev,
        }
    }

    /// Platforms whose handle is empty, in render order.
    pub fn missing(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.handle(*p).is_empty())
            .collect()
    }
}

/// A social platform the bio links out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LinkedIn,
    Xing,
    Twitter,
    GitHub,
    Dev,
}

impl Platform {
    /// All platforms, in the order the links are rendered.
    pub const ALL: [Platform; 5] = [
        Platform::LinkedIn,
        Platform::Xing,
        Platform::Twitter,
        Platform::GitHub,
        Platform::Dev,
    ];

    /// Config key, as used in the `[social]` table.
    pub fn key(self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Xing => "xing",
            Platform::Twitter => "twitter",
            Platform::GitHub => "github",
            Platform::Dev => "dev",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Xing => "XING",
            Platform::Twitter => "Twitter",
            Platform::GitHub => "GitHub",
            Platform::Dev => "DEV",
        }
    }

    /// Profile URL prefix; the username is appended verbatim.
    pub fn base_url(self) -> &'static str {
        match self {
            Platform::LinkedIn => "https://linkedin.com/",
            Platform::Xing => "https://xing.com/",
            Platform::Twitter => "https://twitter.com/",
            Platform::GitHub => "https://github.com/",
            Platform::Dev => "https://dev.to/",
        }
    }

    /// Font Awesome brand icon classes.
    pub fn icon_class(self) -> &'static str {
        match self {
            Platform::LinkedIn => "fab fa-linkedin",
            Platform::Xing => "fab fa-xing",
            Platform::Twitter => "fab fa-twitter",
            Platform::GitHub => "fab fa-github",
            Platform::Dev => "fab fa-dev",
        }
    }

    pub fn profile_url(self, username: &str) -> String {
        format!("{}{}", self.base_url(), username)
    }
}
