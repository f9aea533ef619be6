//! Project catalog: the content schema and lookup by identifier.
//!
//! The catalog is authored as a single TOML file (`catalog.toml` by default)
//! and loaded once at startup. After loading it is read-only: nothing in the
//! rendering pipeline creates, mutates, or removes a project.
//!
//! ## File Format
//!
//! ```toml
//! [[projects]]
//! id = "autonomous-nav"
//! title = "Autonomous Navigation System"
//! description = "SLAM-based navigation for warehouse robots."
//! image = "https://images.unsplash.com/photo-1487887235947-a955ef187fcc"
//! tags = ["Robotics", "Computer Vision"]
//! tech_stack = ["ROS", "C++", "LiDAR"]
//! duration = "8 months"
//! role = "Lead Navigation Engineer"
//! team_size = 4
//! outcomes = ["Reduced planning time by 60%"]
//!
//! [[projects.sections]]
//! type = "overview"
//! title = "Project Overview"
//! content = """
//! Markdown **prose** goes here.
//! """
//!
//! [[projects.sections]]
//! type = "gallery"
//! title = "Gallery"
//! images = [{ src = "nav/map.jpg", alt = "Occupancy grid" }]
//!
//! [[projects.sections]]
//! type = "video"
//! video_url = "https://www.youtube.com/embed/dQw4w9WgXcQ"
//!
//! [[downloads]]
//! name = "resume.pdf"
//! url = "/assets/resume.pdf"
//! size = "240 KB"
//! ```
//!
//! ## Sections
//!
//! A section's `type` decides which of its other fields mean anything:
//! `content` for the prose kinds, `images` for galleries, `video_url` for
//! videos. Fields that don't belong to the kind are dropped on load. A `type`
//! outside the known set loads as [`Section::Unrecognized`] and renders
//! nothing.
//!
//! ## Identifiers
//!
//! Project ids become directory names in the generated site
//! (`projects/<id>/index.html`), so they must be a single non-empty path
//! segment. Two projects sharing an id is an authoring mistake rather than a
//! load error: lookups return the first one and `check` reports the rest.

use crate::files::FileItem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid project id {0:?}: ids must be a single non-empty path segment")]
    InvalidId(String),
}

/// A project case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    /// Stable key, also the URL segment of the detail page.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Hero image reference (local path or absolute URL).
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "techStack", skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, alias = "teamSize", skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    /// Detail page content, in authored order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<String>,
}

impl Project {
    /// Whether any field of the metadata block (duration, role, team size,
    /// tech stack) is present.
    pub fn has_metadata(&self) -> bool {
        self.duration.is_some()
            || self.role.is_some()
            || self.team_members().is_some()
            || !self.tech_stack.is_empty()
    }

    /// Team size for display. Zero counts as unset.
    pub fn team_members(&self) -> Option<u32> {
        self.team_size.filter(|&n| n > 0)
    }
}

/// The three kinds of section whose body is markdown prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProseKind {
    Overview,
    Technical,
    Results,
}

impl ProseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProseKind::Overview => "overview",
            ProseKind::Technical => "technical",
            ProseKind::Results => "results",
        }
    }
}

/// One image of a gallery section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// A typed block of detail-page content.
///
/// Only the fields meaningful for the kind survive loading. `images` and
/// `video_url` stay optional so an absent list can be told apart from an
/// empty one: a gallery with `images = []` still renders its title, a gallery
/// without `images` renders nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SectionRecord", into = "SectionRecord")]
pub enum Section {
    Prose {
        kind: ProseKind,
        title: Option<String>,
        content: Option<String>,
    },
    Gallery {
        title: Option<String>,
        images: Option<Vec<GalleryImage>>,
    },
    Video {
        title: Option<String>,
        video_url: Option<String>,
    },
    /// A `type` tag this version doesn't know. Kept so the inventory can
    /// report it; never rendered.
    Unrecognized {
        kind: String,
        title: Option<String>,
    },
}

impl Section {
    /// The authored `type` tag.
    pub fn kind(&self) -> &str {
        match self {
            Section::Prose { kind, .. } => kind.as_str(),
            Section::Gallery { .. } => "gallery",
            Section::Video { .. } => "video",
            Section::Unrecognized { kind, .. } => kind,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Section::Prose { title, .. }
            | Section::Gallery { title, .. }
            | Section::Video { title, .. }
            | Section::Unrecognized { title, .. } => title.as_deref(),
        }
    }

    /// True when the section renders nothing at all.
    pub fn is_inert(&self) -> bool {
        match self {
            Section::Prose { .. } => false,
            Section::Gallery { images, .. } => images.is_none(),
            Section::Video { video_url, .. } => video_url.is_none(),
            Section::Unrecognized { .. } => true,
        }
    }
}

/// Flat authored shape of a section, before dispatch on `type`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SectionRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    images: Option<Vec<GalleryImage>>,
    #[serde(default, alias = "videoUrl", skip_serializing_if = "Option::is_none")]
    video_url: Option<String>,
}

impl From<SectionRecord> for Section {
    fn from(record: SectionRecord) -> Self {
        let SectionRecord {
            kind,
            title,
            content,
            images,
            video_url,
        } = record;
        let prose_kind = match kind.as_str() {
            "overview" => Some(ProseKind::Overview),
            "technical" => Some(ProseKind::Technical),
            "results" => Some(ProseKind::Results),
            _ => None,
        };
        if let Some(kind) = prose_kind {
            return Section::Prose {
                kind,
                title,
                content,
            };
        }
        if kind == "gallery" {
            Section::Gallery { title, images }
        } else if kind == "video" {
            Section::Video { title, video_url }
        } else {
            Section::Unrecognized { kind, title }
        }
    }
}

impl From<Section> for SectionRecord {
    fn from(section: Section) -> Self {
        match section {
            Section::Prose {
                kind,
                title,
                content,
            } => SectionRecord {
                kind: kind.as_str().to_string(),
                title,
                content,
                ..Default::default()
            },
            Section::Gallery { title, images } => SectionRecord {
                kind: "gallery".to_string(),
                title,
                images,
                ..Default::default()
            },
            Section::Video { title, video_url } => SectionRecord {
                kind: "video".to_string(),
                title,
                video_url,
                ..Default::default()
            },
            Section::Unrecognized { kind, title } => SectionRecord {
                kind,
                title,
                ..Default::default()
            },
        }
    }
}

/// Read-only access to projects, as handed to the renderers.
pub trait ProjectSource {
    /// All projects in authored order.
    fn projects(&self) -> &[Project];

    /// First project with the given id.
    fn find_by_id(&self, id: &str) -> Option<&Project> {
        self.projects().iter().find(|p| p.id == id)
    }
}

impl ProjectSource for [Project] {
    fn projects(&self) -> &[Project] {
        self
    }
}

/// All projects plus the site-level download list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    downloads: Vec<FileItem>,
}

impl ProjectSource for Catalog {
    fn projects(&self) -> &[Project] {
        &self.projects
    }
}

impl Catalog {
    pub fn new(projects: Vec<Project>, downloads: Vec<FileItem>) -> Result<Self, CatalogError> {
        let catalog = Self {
            projects,
            downloads,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn downloads(&self) -> &[FileItem] {
        &self.downloads
    }

    /// Projects with a distinct id, keeping the first of any duplicates.
    pub fn unique_projects(&self) -> impl Iterator<Item = &Project> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .filter(move |p| seen.insert(p.id.as_str()))
    }

    /// Ids used by more than one project, each listed once, in authored order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dupes = Vec::new();
        for project in &self.projects {
            let id = project.id.as_str();
            if !seen.insert(id) && !dupes.contains(&id) {
                dupes.push(id);
            }
        }
        dupes
    }

    fn validate(&self) -> Result<(), CatalogError> {
        match self.projects.iter().find(|p| !is_valid_id(&p.id)) {
            Some(bad) => Err(CatalogError::InvalidId(bad.id.clone())),
            None => Ok(()),
        }
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '?' || c == '#' || c.is_whitespace())
}
