//! Shared test utilities for the casebook test suite.
//!
//! Provides a fixture copy, a minimal project builder, and lookup helpers
//! that panic with the available values on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let catalog = Catalog::load(&tmp.path().join("catalog.toml")).unwrap();
//!
//! let nav = find_project(&catalog, "autonomous-nav");
//! assert_eq!(section_kinds(nav)[0], "overview");
//! ```

use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::catalog::{Catalog, Project, ProjectSource};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    for entry in WalkDir::new(&fixtures) {
        let entry = entry.unwrap();
        let target = tmp.path().join(entry.path().strip_prefix(&fixtures).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
    tmp
}

// =========================================================================
// Builders
// =========================================================================

/// A project with only the required fields set.
pub fn project(id: &str, title: &str) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        image: format!("{id}.jpg"),
        tags: Vec::new(),
        tech_stack: Vec::new(),
        duration: None,
        role: None,
        team_size: None,
        sections: Vec::new(),
        outcomes: Vec::new(),
    }
}

// =========================================================================
// Catalog lookups: panic with the available ids on a miss
// =========================================================================

/// Find a project by id. Panics if not found.
pub fn find_project<'a>(catalog: &'a Catalog, id: &str) -> &'a Project {
    catalog.find_by_id(id).unwrap_or_else(|| {
        panic!(
            "project {id:?} not found. Available: {:?}",
            project_ids(catalog)
        )
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn project_ids(catalog: &Catalog) -> Vec<String> {
    catalog.projects().iter().map(|p| p.id.clone()).collect()
}

/// Section `type` tags of a project, in authored order.
pub fn section_kinds(project: &Project) -> Vec<&str> {
    project.sections.iter().map(|s| s.kind()).collect()
}
