//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table, the user's `config.toml` (if any) is merged on
//! top key-by-key, and the result is deserialized and validated.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! ├── catalog.toml       # Projects and downloads
//! └── assets/            # Copied verbatim to the output
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! catalog = "catalog.toml"  # Catalog file, relative to the content directory
//! assets_dir = "assets"     # Static assets copied to the output root
//!
//! [site]
//! title = "Portfolio"       # Appended to every page title
//! description = ""          # <meta name="description">, omitted when empty
//!
//! [images]
//! base_path = "/assets/"    # Prefix for local image references
//!
//! [detail]
//! tech_stack_preview = 3    # Tech stack entries shown in the metadata block
//!
//! [theme]
//! content_width = "64rem"   # Max width of page content
//! gallery_tile_min = "14rem" # Minimum gallery tile width
//! card_gap = "1.5rem"       # Gap between listing cards and gallery tiles
//!
//! [theme.page_padding]
//! size = "4vw"
//! min = "1rem"
//! max = "3rem"
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f5f5f4"       # Cards, metadata block
//! text = "#111111"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! link = "#333333"
//! link_hover = "#000000"
//! accent = "#2563eb"        # Tags, outcome markers
//!
//! [colors.dark]
//! # same keys
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};
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
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Catalog file, relative to the content directory.
    pub catalog: String,
    /// Static assets directory, relative to the content directory. Copied to
    /// the same relative path in the output.
    pub assets_dir: String,
    pub site: SiteMeta,
    pub images: ImagesConfig,
    pub detail: DetailConfig,
    pub theme: ThemeConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog: "catalog.toml".to_string(),
            assets_dir: "assets".to_string(),
            site: SiteMeta::default(),
            images: ImagesConfig::default(),
            detail: DetailConfig::default(),
            theme: ThemeConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.images.base_path.is_empty() {
            return Err(ConfigError::Validation(
                "images.base_path must not be empty".into(),
            ));
        }
        if self.detail.tech_stack_preview == 0 {
            return Err(ConfigError::Validation(
                "detail.tech_stack_preview must be at least 1".into(),
            ));
        }
        if !is_relative_subdir(&self.assets_dir) {
            return Err(ConfigError::Validation(format!(
                "assets_dir must be a relative path inside the source directory, got {:?}",
                self.assets_dir
            )));
        }
        Ok(())
    }
}

/// A non-empty relative path with no `..` components. The same path is
/// joined onto both the source and the output directory.
fn is_relative_subdir(path: &str) -> bool {
    let path = Path::new(path);
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

/// Site-wide text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
        }
    }
}

/// Image reference settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Prefix joined onto local (non-URL, non-rooted) image references.
    pub base_path: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            base_path: "/assets/".to_string(),
        }
    }
}

/// Project detail page settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetailConfig {
    /// How many tech stack entries the metadata block shows before `+N`.
    /// Stacks longer than this also get a full "Technologies Used" list.
    pub tech_stack_preview: usize,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            tech_stack_preview: 3,
        }
    }
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"4vw"`).
    pub size: String,
    /// Minimum bound (e.g. `"1rem"`).
    pub min: String,
    /// Maximum bound (e.g. `"3rem"`).
    pub max: String,
}

impl ClampSize {
    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Max width of the page content column (CSS value).
    pub content_width: String,
    /// Minimum gallery tile width; the grid fits as many columns as it can.
    pub gallery_tile_min: String,
    /// Gap between listing cards and between gallery tiles (CSS value).
    pub card_gap: String,
    /// Horizontal padding around the content column.
    pub page_padding: ClampSize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            content_width: "64rem".to_string(),
            gallery_tile_min: "14rem".to_string(),
            card_gap: "1.5rem".to_string(),
            page_padding: ClampSize {
                size: "4vw".to_string(),
                min: "1rem".to_string(),
                max: "3rem".to_string(),
            },
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
    /// Page background.
    pub background: String,
    /// Card and metadata block background.
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (descriptions, metadata labels).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Link color.
    pub link: String,
    /// Link hover color.
    pub link_hover: String,
    /// Tags, outcome markers, icon badges.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f5f5f4".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            surface: "#171717".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            link_hover: "#ffffff".to_string(),
            accent: "#60a5fa".to_string(),
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
/// This is the base layer user overrides are merged onto.
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
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Casebook Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Catalog file with [[projects]] and [[downloads]], relative to this directory.
catalog = "catalog.toml"

# Static assets (images, downloads, favicon) copied to the output as-is.
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Appended to every page title and shown in the header.
title = "Portfolio"

# Used for <meta name="description">. Omitted when empty.
description = ""

# ---------------------------------------------------------------------------
# Image references
# ---------------------------------------------------------------------------
[images]
# Local image references ("nav/map.jpg") are joined onto this prefix.
# Absolute URLs and paths starting with "/" are used unchanged.
base_path = "/assets/"

# ---------------------------------------------------------------------------
# Project detail pages
# ---------------------------------------------------------------------------
[detail]
# Tech stack entries shown in the metadata block before "+N".
# Longer stacks also get a full "Technologies Used" list.
tech_stack_preview = 3

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Max width of the content column (CSS value).
content_width = "64rem"

# Minimum gallery tile width; the grid fits as many columns as it can.
gallery_tile_min = "14rem"

# Gap between listing cards and gallery tiles (CSS value).
card_gap = "1.5rem"

# Horizontal page padding, as CSS clamp(min, size, max).
[theme.page_padding]
size = "4vw"
min = "1rem"
max = "3rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f5f5f4"       # Cards, metadata block
text = "#111111"
text_muted = "#666666"    # Descriptions, metadata labels
border = "#e0e0e0"
link = "#333333"
link_hover = "#000000"
accent = "#2563eb"        # Tags, outcome markers

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
surface = "#171717"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"
accent = "#60a5fa"
"##
}

fn color_variables(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-surface", &scheme.surface),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
        ("--color-accent", &scheme.accent),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};\n"))
    .collect()
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{light}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{dark}    }}\n}}",
        light = color_variables(&colors.light, "    "),
        dark = color_variables(&colors.dark, "        "),
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --content-width: {content_width};
    --gallery-tile-min: {gallery_tile_min};
    --card-gap: {card_gap};
    --page-padding: {page_padding};
}}"#,
        content_width = theme.content_width,
        gallery_tile_min = theme.gallery_tile_min,
        card_gap = theme.card_gap,
        page_padding = theme.page_padding.to_css(),
    )
}
