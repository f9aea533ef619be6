//! End-to-end tests that run the `casebook` binary against the fixture
//! content directory.
//!
//! Run with: cargo test --test cli_build

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

fn casebook(args: &[&str]) -> Output {
    let out = Command::new(env!("CARGO_BIN_EXE_casebook"))
        .args(args)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "casebook {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn build_writes_site() {
    let dist = TempDir::new().unwrap();
    let source = fixtures();
    let out = casebook(&[
        "build",
        "--source",
        source.to_str().unwrap(),
        "--output",
        dist.path().to_str().unwrap(),
    ]);

    for page in [
        "index.html",
        "404.html",
        "downloads.html",
        "projects/autonomous-nav/index.html",
        "projects/arm-control/index.html",
        "projects/drone-swarm/index.html",
        "projects/exoskeleton/index.html",
        "assets/resume.pdf",
        "assets/nav/occupancy-grid.svg",
        "assets/cad/exoskeleton-frame.step",
    ] {
        assert!(dist.path().join(page).is_file(), "missing {page}");
    }

    let text = stdout(&out);
    assert!(text.contains("projects/autonomous-nav/index.html"));
    assert!(text.contains("Generated 4 project pages"));
}

#[test]
fn build_resolves_local_images() {
    let dist = TempDir::new().unwrap();
    let source = fixtures();
    casebook(&[
        "build",
        "--source",
        source.to_str().unwrap(),
        "--output",
        dist.path().to_str().unwrap(),
    ]);

    let nav = fs::read_to_string(dist.path().join("projects/autonomous-nav/index.html")).unwrap();
    assert!(nav.contains(r#"src="/assets/nav/occupancy-grid.svg""#));
    assert!(nav.contains("<title>Autonomous Navigation System · Jane Doe Robotics</title>"));
    assert!(nav.contains("video-frame"));

    // The gallery without images and the unrecognized section render nothing.
    let drone = fs::read_to_string(dist.path().join("projects/drone-swarm/index.html")).unwrap();
    assert!(!drone.contains("Field Testing"));
    let exo = fs::read_to_string(dist.path().join("projects/exoskeleton/index.html")).unwrap();
    assert!(!exo.contains("Milestones"));
    assert!(!exo.contains(r#"class="project-meta""#));
}

#[test]
fn check_prints_inventory() {
    let source = fixtures();
    let out = casebook(&["check", "--source", source.to_str().unwrap()]);
    let text = stdout(&out);
    assert!(text.contains("001 Autonomous Navigation System (5 sections)"));
    assert!(text.contains("gallery: Field Testing (skipped: no images)"));
    assert!(text.contains("timeline: Milestones (skipped: unrecognized kind)"));
    assert!(text.contains("resume.pdf (document, 1 KB)"));
    assert!(text.contains("==> Content is valid"));
}

#[test]
fn check_json_dumps_catalog() {
    let source = fixtures();
    let out = casebook(&["check", "--json", "--source", source.to_str().unwrap()]);
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let projects = value["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[0]["id"], "autonomous-nav");
    assert_eq!(projects[0]["sections"][0]["type"], "overview");
}

#[test]
fn show_prints_detail_page() {
    let source = fixtures();
    let out = casebook(&["show", "arm-control", "--source", source.to_str().unwrap()]);
    let html = stdout(&out);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Precision Robotic Arm Controller"));
    assert!(html.contains("3 members"));
}

#[test]
fn show_unknown_id_prints_not_found() {
    let source = fixtures();
    let out = casebook(&["show", "ghost", "--source", source.to_str().unwrap()]);
    let html = stdout(&out);
    assert!(html.contains("Project Not Found"));
    assert!(html.contains("Back to Projects"));
}

#[test]
fn gen_config_is_valid_config() {
    let out = casebook(&["gen-config"]);
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), &out.stdout).unwrap();
    fs::write(dir.path().join("catalog.toml"), "").unwrap();
    let check = casebook(&["check", "--source", dir.path().to_str().unwrap()]);
    assert!(stdout(&check).contains("(none)"));
}

#[test]
fn missing_catalog_fails() {
    let dir = TempDir::new().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_casebook"))
        .args(["check", "--source", dir.path().to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("catalog.toml"));
}
