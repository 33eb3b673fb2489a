//! The bio block renderer.
//!
//! Rendering happens in two pure steps:
//!
//! 1. [`bio_block`] turns [`BioData`] into a [`BioBlock`] render tree: the
//!    avatar, the narrative, and one [`SocialLink`] per [`Platform`].
//! 2. [`render_bio`] turns the tree into HTML with maud.
//!
//! [`render`] composes both. Nothing here does I/O or can fail; a missing
//! social handle simply yields a link to the platform root.
//!
//! ```text
//! div.bio
//! ├── picture > source[type=image/webp] + img.bio-avatar   (alt = author)
//! └── p
//!     ├── "My name is " strong(author) ". I live and work in Vienna ..."
//!     ├── br
//!     └── a.bio-social × 5   (linkedin, xing, twitter, github, dev)
//! ```

use crate::types::{BioData, FixedImage, Platform};
use maud::{Markup, html};

const NARRATIVE_LEAD: &str = "My name is ";
const NARRATIVE_BODY: &str = ". I live and work in Vienna as a frontend developer with an \
ongoing study in Business Informatics. On this blog, I will mostly write about frontend \
development in combination with serverless services by Amazon Web Services (AWS).";

/// Render tree for the bio block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioBlock {
    pub avatar: AvatarElement,
    pub narrative: Narrative,
    pub links: Vec<SocialLink>,
}

/// Circular avatar at the image's fixed display size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarElement {
    pub image: FixedImage,
    /// Accessibility label; always the author's name.
    pub alt: String,
}

/// The fixed bio text with the author's name emphasised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub author: String,
}

impl Narrative {
    /// The narrative without markup.
    pub fn plain_text(&self) -> String {
        format!("{}{}{}", NARRATIVE_LEAD, self.author, NARRATIVE_BODY)
    }
}

/// Outbound link to a social profile, opened in a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: Platform,
    pub href: String,
}

impl SocialLink {
    pub fn target(&self) -> &'static str {
        "_blank"
    }
}

/// Build the render tree.
pub fn bio_block(data: &BioData) -> BioBlock {
    BioBlock {
        avatar: AvatarElement {
            image: data.avatar.clone(),
            alt: data.author.name.clone(),
        },
        narrative: Narrative {
            author: data.author.name.clone(),
        },
        links: Platform::ALL
            .into_iter()
            .map(|platform| SocialLink {
                platform,
                href: platform.profile_url(data.social.handle(platform)),
            })
            .collect(),
    }
}

/// Render the tree as an HTML fragment.
pub fn render_bio(block: &BioBlock) -> Markup {
    html! {
        div.bio {
            (render_avatar(&block.avatar))
            p {
                (NARRATIVE_LEAD)
                strong { (block.narrative.author) }
                (NARRATIVE_BODY)
                " "
                br;
                " "
                @for link in &block.links {
                    (render_social_link(link))
                }
            }
        }
    }
}

/// Build and render in one step.
pub fn render(data: &BioData) -> Markup {
    render_bio(&bio_block(data))
}

fn render_avatar(avatar: &AvatarElement) -> Markup {
    let image = &avatar.image;
    let img = html! {
        img.bio-avatar
            src=(image.src)
            srcset=(image.src_set)
            width=(image.width)
            height=(image.height)
            alt=(avatar.alt)
            style="border-radius: 50%;";
    };

    html! {
        @if let Some(webp) = &image.src_set_webp {
            picture {
                source type="image/webp" srcset=(webp);
                (img)
            }
        } @else {
            (img)
        }
    }
}

fn render_social_link(link: &SocialLink) -> Markup {
    html! {
        a.bio-social
            href=(link.href)
            target=(link.target())
            rel="noopener noreferrer"
            aria-label=(link.platform.label())
        {
            i class=(link.platform.icon_class()) aria-hidden="true" {}
        }
    }
}
