//! CLI output formatting for all pipeline stages.
//!
//! Output is information-first: each stage leads with what it resolved or
//! produced (author, links, files), with source paths shown as indented
//! context lines.
//!
//! # Output Format
//!
//! ## Query
//!
//! ```text
//! Author
//!     Jane Doe
//! Avatar
//!     Source: images/profile-pic.jpg
//!     50x50 (1x, 1.5x, 2x)
//! Links
//!     001 LinkedIn → https://linkedin.com/jane-doe
//!     002 XING → https://xing.com/jane.x
//!     ...
//! ```
//!
//! ## Generate
//!
//! ```text
//! bio.html
//! index.html
//! static/3f9c0a1b2c3d4e5f/9a8b7c6d5e4f3a2b/profile-pic-50x50.jpg
//!
//! Generated 2 pages, 6 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::generate::GenerateReport;
use crate::query::{CheckReport, QueryManifest};
use crate::render::bio_block;
use crate::types::Platform;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Density descriptors present in a `srcset`, e.g. `1x, 2x`.
fn densities(src_set: &str) -> String {
    src_set
        .split(',')
        .filter_map(|entry| entry.split_whitespace().last())
        .collect::<Vec<_>>()
        .join(", ")
}

fn missing_platform_lines(missing: &[Platform]) -> Vec<String> {
    missing
        .iter()
        .map(|p| {
            format!(
                "{}{}: empty handle, links to {}",
                indent(1),
                p.label(),
                p.base_url()
            )
        })
        .collect()
}

// ============================================================================
// Stage 1: Query output
// ============================================================================

/// Format query stage output: author, avatar variants, and resolved links.
pub fn format_query_output(manifest: &QueryManifest) -> Vec<String> {
    let bio = &manifest.bio;
    let block = bio_block(bio);
    let mut lines = Vec::new();

    lines.push("Author".to_string());
    lines.push(format!("{}{}", indent(1), bio.author.name));

    lines.push("Avatar".to_string());
    lines.push(format!("{}Source: {}", indent(1), manifest.avatar_source));
    lines.push(format!(
        "{}{}x{} ({})",
        indent(1),
        bio.avatar.width,
        bio.avatar.height,
        densities(&bio.avatar.src_set)
    ));

    lines.push("Links".to_string());
    for (i, link) in block.links.iter().enumerate() {
        lines.push(format!(
            "{}{} {} → {}",
            indent(1),
            format_index(i + 1),
            link.platform.label(),
            link.href
        ));
    }

    let missing = bio.social.missing();
    if !missing.is_empty() {
        lines.push("Warnings".to_string());
        lines.extend(missing_platform_lines(&missing));
    }

    lines
}

/// Print query output to stdout.
pub fn print_query_output(manifest: &QueryManifest) {
    for line in format_query_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: every written file plus a summary line.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report.files.clone();
    let pages = report.files.iter().filter(|f| f.ends_with(".html")).count();
    let assets = report.files.len() - pages;

    lines.push(String::new());
    lines.push(format!("Generated {} pages, {} assets", pages, assets));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the result of `check`.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec![
        format!("Author: {}", report.author),
        format!("Avatar: {}", report.avatar_source.display()),
    ];
    if !report.missing_social.is_empty() {
        lines.push("Warnings".to_string());
        lines.extend(missing_platform_lines(&report.missing_social));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
