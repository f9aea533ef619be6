//! CLI output formatting for `check` and `build`.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (project, section, download) is its positional index and
//! title, with ids, output paths and skip reasons as secondary context. This
//! makes the output read as a content inventory.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Projects
//! 001 Autonomous Navigation System (5 sections)
//!     Id: autonomous-nav
//!     SLAM-based navigation for warehouse robots.
//!     001 overview: Project Overview
//!     002 gallery: Gallery (3 images)
//!     003 video (skipped: no video url)
//!     004 timeline: Milestones (skipped: unrecognized kind)
//!
//! Downloads
//! 001 resume.pdf (document, 240 KB)
//!
//! Warnings
//!     Duplicate project id: autonomous-nav
//!
//! Config
//!     config.toml
//!     catalog.toml
//!     assets/
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! 001 Autonomous Navigation System → projects/autonomous-nav/index.html
//! Not found → 404.html
//! Downloads → downloads.html
//! Assets → assets/ (4 files)
//!
//! Generated 1 project page, 4 pages total
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::{Catalog, ProjectSource, Section};
use crate::config::SiteConfig;
use crate::files::classify;
use crate::generate::GenerateReport;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional detail.
///
/// ```text
/// 001 Autonomous Navigation System (5 sections)
/// 001 resume.pdf
/// ```
fn entity_header(index: usize, title: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), title, d),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Why a section renders nothing, if it doesn't.
fn skip_reason(section: &Section) -> Option<&'static str> {
    match section {
        Section::Gallery { images: None, .. } => Some("no images"),
        Section::Video {
            video_url: None, ..
        } => Some("no video url"),
        Section::Unrecognized { .. } => Some("unrecognized kind"),
        _ => None,
    }
}

/// Format one section line: index, kind, optional title and detail.
///
/// ```text
/// 001 overview: Project Overview
/// 002 gallery: Gallery (3 images)
/// 003 video (skipped: no video url)
/// ```
fn section_line(index: usize, section: &Section) -> String {
    let mut line = format!("{} {}", format_index(index), section.kind());
    if let Some(title) = section.title() {
        line.push_str(": ");
        line.push_str(title);
    }
    if let Some(reason) = skip_reason(section) {
        line.push_str(&format!(" (skipped: {reason})"));
    } else if let Section::Gallery {
        images: Some(images),
        ..
    } = section
    {
        line.push_str(&format!(" ({})", plural(images.len(), "image", "images")));
    }
    line
}

// ============================================================================
// Check
// ============================================================================

/// Format the catalog inventory shown by `check`.
///
/// `source_root` is only consulted to list which config inputs exist.
pub fn format_check_output(
    catalog: &Catalog,
    config: &SiteConfig,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Projects".to_string());
    if catalog.projects().is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, project) in catalog.projects().iter().enumerate() {
        let count = plural(project.sections.len(), "section", "sections");
        lines.push(entity_header(i + 1, &project.title, Some(&count)));
        lines.push(format!("{}Id: {}", indent(1), project.id));

        let desc = truncate_desc(project.description.trim(), 60);
        if !desc.is_empty() {
            lines.push(format!("{}{}", indent(1), desc));
        }
        for (j, section) in project.sections.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), section_line(j + 1, section)));
        }
    }

    if !catalog.downloads().is_empty() {
        lines.push(String::new());
        lines.push("Downloads".to_string());
        for (i, file) in catalog.downloads().iter().enumerate() {
            let category = classify(&file.name, file.mime_type.as_deref()).as_str();
            let detail = match &file.size {
                Some(size) => format!("{category}, {size}"),
                None => category.to_string(),
            };
            lines.push(entity_header(i + 1, &file.name, Some(&detail)));
        }
    }

    let duplicates = catalog.duplicate_ids();
    if !duplicates.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for id in duplicates {
            lines.push(format!("{}Duplicate project id: {}", indent(1), id));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    lines.push(format!("{}{}", indent(1), config.catalog));
    if source_root.join(&config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), config.assets_dir));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(catalog: &Catalog, config: &SiteConfig, source_root: &Path) {
    for line in format_check_output(catalog, config, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the pages written by `build`.
///
/// Information-first: each entity leads with its positional index and title,
/// followed by `→` and the output path.
pub fn format_generate_output(
    catalog: &Catalog,
    config: &SiteConfig,
    report: &GenerateReport,
) -> Vec<String> {
    let mut lines = Vec::new();
    let written = |page: &str| report.pages.iter().any(|p| p == Path::new(page));

    lines.push("Home \u{2192} index.html".to_string());

    let mut project_pages = 0;
    for (i, project) in catalog.unique_projects().enumerate() {
        let page = format!("projects/{}/index.html", project.id);
        if written(&page) {
            project_pages += 1;
            lines.push(format!(
                "{} \u{2192} {}",
                entity_header(i + 1, &project.title, None),
                page
            ));
        }
    }

    if written("404.html") {
        lines.push("Not found \u{2192} 404.html".to_string());
    }
    if written("downloads.html") {
        lines.push("Downloads \u{2192} downloads.html".to_string());
    }
    if report.assets_copied > 0 {
        lines.push(format!(
            "Assets \u{2192} {}/ ({})",
            config.assets_dir,
            plural(report.assets_copied, "file", "files")
        ));
    }

    for id in &report.duplicate_ids {
        lines.push(format!("{}Skipped duplicate id: {}", indent(1), id));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {} total",
        plural(project_pages, "project page", "project pages"),
        plural(report.pages.len(), "page", "pages")
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(catalog: &Catalog, config: &SiteConfig, report: &GenerateReport) {
    for line in format_generate_output(catalog, config, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
