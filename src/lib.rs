//! # Simple Bio
//!
//! Renders the author bio block of a personal blog: a circular avatar, a
//! short narrative with the author's name, and a row of links to the author's
//! social profiles. The block is built ahead of time and shipped as plain HTML.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Query     content/  →  bio.json + static/   (config + avatar → BioData)
//! 2. Generate  bio.json  →  dist/                (BioData → HTML)
//! ```
//!
//! The query stage is the only part that touches the filesystem or can fail.
//! It enforces the data contract (author name present, avatar found and
//! decodable) so that rendering is a pure, infallible function of its input.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`query`] | Stage 1: reads config, locates the avatar, produces [`types::BioData`] |
//! | [`render`] | Pure renderer: `BioData` → render tree → maud `Markup` |
//! | [`generate`] | Stage 2: writes the fragment, preview page and avatar assets |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS variables |
//! | [`types`] | `BioData`, `FixedImage`, `Social`, `Platform` |
//! | [`imaging`] | Pure-Rust cover-crop of the avatar at 1x/1.5x/2x |
//! | [`digest`] | Content digests for cache-safe asset URLs |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Render Tree Before HTML
//!
//! [`render::bio_block`] produces a typed [`render::BioBlock`] first and
//! [`render::render_bio`] turns it into HTML. Properties such as link order
//! and targets are asserted on the tree, not by scraping markup.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Template variables
//! are Rust expressions and all interpolation is auto-escaped, so an author
//! name can never inject markup.
//!
//! ## Content-Addressed Avatar URLs
//!
//! Avatar variants live under `static/<source digest>/<params digest>/`.
//! Replacing the photo or changing its size yields new URLs, so the output
//! can be served with long cache lifetimes.

pub mod config;
pub mod digest;
pub mod generate;
pub mod imaging;
pub mod output;
pub mod query;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
