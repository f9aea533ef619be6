//! HTML site generation.
//!
//! Takes the loaded catalog and config and writes the static site. Every page
//! is a pure function of those two inputs, so rebuilding unchanged content
//! produces byte-identical output.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): Project cards with hero thumbnail,
//!   title, description and tags
//! - **Project pages** (`/projects/{id}/index.html`): Full case study for
//!   each distinct id (the first record wins when ids repeat)
//! - **Not-found page** (`/404.html`): The state shown for an unknown id
//! - **Downloads page** (`/downloads.html`): Only when the catalog lists
//!   downloads
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── downloads.html             # If the catalog has downloads
//! ├── projects/
//! │   ├── autonomous-nav/
//! │   │   └── index.html
//! │   └── arm-control/
//! │       └── index.html
//! └── assets/                    # Copied verbatim from content/assets/
//!     └── ...
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time. The color and theme
//! custom properties generated from config are prepended, and the whole
//! sheet is inlined into each page.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::catalog::{Catalog, Project, ProjectSource};
use crate::config::{self, SiteConfig};
use crate::detail::{DetailContext, LISTING_HREF, render_detail, render_not_found};
use crate::files::render_downloads;
use crate::resolve::{ImageResolver, SiteResolver};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a generate run wrote, for the CLI inventory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GenerateReport {
    /// Pages written, relative to the output directory, in write order.
    pub pages: Vec<PathBuf>,
    /// Files copied from the assets directory.
    pub assets_copied: usize,
    /// Ids shared by more than one project; only the first was rendered.
    pub duplicate_ids: Vec<String>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");

const NOT_FOUND_TITLE: &str = "Project Not Found";
const DOWNLOADS_HREF: &str = "/downloads.html";

/// Everything page rendering needs from config, computed once per run.
struct Site<'a> {
    config: &'a SiteConfig,
    css: String,
    resolver: SiteResolver,
    has_downloads: bool,
}

impl<'a> Site<'a> {
    fn new(config: &'a SiteConfig, has_downloads: bool) -> Self {
        let css = format!(
            "{}\n\n{}\n\n{}",
            config::generate_color_css(&config.colors),
            config::generate_theme_css(&config.theme),
            CSS_STATIC
        );
        Self {
            config,
            css,
            resolver: SiteResolver::new(config.images.base_path.clone()),
            has_downloads,
        }
    }

    fn detail_context(&self) -> DetailContext<'_> {
        DetailContext {
            resolver: &self.resolver,
            tech_stack_preview: self.config.detail.tech_stack_preview,
        }
    }

    fn page_title(&self, page: &str) -> String {
        format!("{page} · {}", self.config.site.title)
    }

    /// Wraps page content in the document shell and site header.
    fn document(
        &self,
        page: &str,
        description: Option<&str>,
        body_class: &str,
        content: Markup,
    ) -> Markup {
        let description = description
            .or(Some(self.config.site.description.as_str()))
            .filter(|d| !d.is_empty());
        base_document(
            &self.page_title(page),
            description,
            &self.css,
            body_class,
            html! {
                (site_header(&self.config.site.title, self.has_downloads))
                (content)
            },
        )
    }
}

pub fn generate(
    catalog: &Catalog,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let site = Site::new(config, !catalog.downloads().is_empty());
    let mut report = GenerateReport::default();

    fs::create_dir_all(output_dir)?;

    write_page(output_dir, "index.html", render_index(catalog, &site), &mut report)?;

    for id in catalog.duplicate_ids() {
        tracing::warn!(id, "duplicate project id, only the first is rendered");
        report.duplicate_ids.push(id.to_string());
    }
    for project in catalog.unique_projects() {
        let rel = PathBuf::from("projects").join(&project.id).join("index.html");
        let page = render_project_page(catalog, project, &site);
        write_page(output_dir, rel, page, &mut report)?;
    }

    write_page(output_dir, "404.html", render_not_found_page(&site), &mut report)?;

    if site.has_downloads {
        let page = render_downloads_page(catalog, &site);
        write_page(output_dir, "downloads.html", page, &mut report)?;
    }

    let assets_src = source_dir.join(&config.assets_dir);
    if assets_src.is_dir() {
        let assets_dst = output_dir.join(&config.assets_dir);
        report.assets_copied = copy_dir_recursive(&assets_src, &assets_dst)?;
    } else {
        tracing::debug!(path = %assets_src.display(), "no assets directory, skipping copy");
    }

    Ok(report)
}

fn write_page(
    output_dir: &Path,
    rel: impl Into<PathBuf>,
    page: Markup,
    report: &mut GenerateReport,
) -> Result<(), GenerateError> {
    let rel = rel.into();
    let path = output_dir.join(&rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, page.into_string())?;
    tracing::debug!(page = %rel.display(), "wrote page");
    report.pages.push(rel);
    Ok(())
}

/// Copy every file under `src` to the same relative path under `dst`.
///
/// Returns the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    description: Option<&str>,
    css: &str,
    body_class: &str,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=(body_class) {
                (content)
            }
        }
    }
}

/// Renders the site header with the home link and page navigation
fn site_header(site_title: &str, has_downloads: bool) -> Markup {
    html! {
        header.site-header {
            a.site-title href=(LISTING_HREF) { (site_title) }
            nav.site-nav {
                a href=(LISTING_HREF) { "Projects" }
                @if has_downloads {
                    a href=(DOWNLOADS_HREF) { "Downloads" }
                }
            }
        }
    }
}

fn project_href(id: &str) -> String {
    format!("/projects/{id}/")
}

fn project_card(project: &Project, resolver: &dyn ImageResolver) -> Markup {
    html! {
        a.project-card href=(project_href(&project.id)) {
            div.card-image {
                img src=(resolver.resolve(&project.image)) alt=(project.title) loading="lazy";
            }
            div.card-body {
                h2.card-title { (project.title) }
                p.card-description { (project.description) }
                @if !project.tags.is_empty() {
                    div.tag-list {
                        @for tag in &project.tags {
                            span.tag { (tag) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the listing page with one card per distinct project
fn render_index(catalog: &Catalog, site: &Site) -> Markup {
    let content = html! {
        main.index-page {
            h1.page-title { "Projects" }
            @if catalog.projects().is_empty() {
                p.empty-state { "No projects yet." }
            } @else {
                div.project-grid {
                    @for project in catalog.unique_projects() {
                        (project_card(project, &site.resolver))
                    }
                }
            }
        }
    };
    site.document("Projects", None, "index", content)
}

fn render_project_page(catalog: &Catalog, project: &Project, site: &Site) -> Markup {
    let content = html! {
        main.detail-page {
            (render_detail(catalog, &project.id, site.detail_context()))
        }
    };
    site.document(
        &project.title,
        Some(&project.description),
        "detail",
        content,
    )
}

fn render_not_found_page(site: &Site) -> Markup {
    let content = html! {
        main.detail-page {
            (render_not_found())
        }
    };
    site.document(NOT_FOUND_TITLE, None, "not-found-page", content)
}

fn render_downloads_page(catalog: &Catalog, site: &Site) -> Markup {
    let content = html! {
        main.downloads-page {
            h1.page-title { "Downloads" }
            (render_downloads(catalog.downloads()))
        }
    };
    site.document("Downloads", None, "downloads", content)
}

/// Render the complete detail document for `id`, or the not-found page.
///
/// This is the same page `generate` writes to `projects/<id>/index.html`.
pub fn render_detail_page(catalog: &Catalog, id: &str, config: &SiteConfig) -> Markup {
    let site = Site::new(config, !catalog.downloads().is_empty());
    match catalog.find_by_id(id) {
        Some(project) => render_project_page(catalog, project, &site),
        None => {
            tracing::debug!(id, "no project with this id");
            render_not_found_page(&site)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
