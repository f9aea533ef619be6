//! # Casebook
//!
//! A minimal static site generator for engineering project portfolios.
//! A single TOML catalog describes the projects; each becomes a case study
//! page built from typed sections (prose, galleries, videos), and the index
//! lists them as cards.
//!
//! # Architecture
//!
//! ```text
//! content/config.toml  ─┐
//! content/catalog.toml ─┼─→  Catalog + SiteConfig  ─→  dist/  (static HTML)
//! content/assets/      ─┘          (load once)          (pure render + write)
//! ```
//!
//! Loading is the only fallible step on the way in; writing files is the only
//! one on the way out. Everything between is a pure function of the loaded
//! catalog and config: an unknown id renders the not-found state, missing
//! optional fields drop their element, malformed markdown comes out as
//! literal text.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Content schema (`Project`, `Section`), TOML loading, lookup by id |
//! | [`markdown`] | Markdown to HTML with GFM extensions and image path resolution |
//! | [`files`] | File icon classification and the downloads widget |
//! | [`sections`] | Per-kind section rendering, including the gallery lightbox and video embed |
//! | [`detail`] | Project detail page layout and the not-found state |
//! | [`generate`] | Writes every page and copies static assets |
//! | [`resolve`] | Maps authored image references to loadable URLs |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for `check` and `build` |
//!
//! # Design Decisions
//!
//! ## Closed Section Kinds
//!
//! Sections are a Rust enum rather than a bag of optional fields. The authored
//! record is still flat (`type`, `title`, `content`, `images`, `video_url`),
//! but on load only the fields that mean something for the kind survive, so
//! a renderer can't read a gallery's `content` by accident. Unknown tags load
//! as [`catalog::Section::Unrecognized`] and render nothing, which keeps old
//! binaries working on newer catalogs.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Interpolation is auto-escaped, so catalog text can't
//! inject markup. Markdown output is the one deliberate exception: authors
//! may embed raw HTML in prose.
//!
//! ## No JavaScript
//!
//! The gallery lightbox is a CSS `:target` overlay and videos are plain
//! iframes. Generated pages work with scripting disabled and can be served
//! from any file server.
//!
//! ## One Resolver for Every Image
//!
//! Hero images, gallery tiles and markdown images all go through the same
//! [`resolve::ImageResolver`]. Local paths get the configured base path,
//! absolute URLs pass through. Renderers take the resolver as a trait object,
//! so tests can substitute a closure.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod files;
pub mod generate;
pub mod markdown;
pub mod output;
pub mod resolve;
pub mod sections;

#[cfg(test)]
pub(crate) mod test_helpers;
