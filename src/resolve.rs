//! Image path resolution.
//!
//! Authors reference images two ways: absolute URLs to hosted images
//! (`https://images.unsplash.com/...`) and paths into the site's own assets
//! (`nav/map.jpg`). Every image the renderers emit (hero, gallery, and
//! markdown images) goes through an [`ImageResolver`] so both forms end up
//! as something a browser can load from the generated site.
//!
//! ```text
//! https://cdn.example.com/a.jpg  →  https://cdn.example.com/a.jpg
//! /favicon.png                   →  /favicon.png
//! nav/map.jpg                    →  /assets/nav/map.jpg
//! ./nav/map.jpg                  →  /assets/nav/map.jpg
//! ```

/// Turns an authored image reference into a servable `src`.
///
/// Implementations must be total: any input, including the empty string,
/// produces some output.
pub trait ImageResolver {
    fn resolve(&self, raw: &str) -> String;
}

impl<F> ImageResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve(&self, raw: &str) -> String {
        self(raw)
    }
}

/// The resolver used for generated sites: local references are joined onto
/// `images.base_path` from the config, everything else passes through.
#[derive(Debug, Clone)]
pub struct SiteResolver {
    base_path: String,
}

impl SiteResolver {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl ImageResolver for SiteResolver {
    fn resolve(&self, raw: &str) -> String {
        if raw.is_empty() || is_servable_as_is(raw) {
            return raw.to_string();
        }
        let local = raw.strip_prefix("./").unwrap_or(raw);
        format!("{}/{}", self.base_path.trim_end_matches('/'), local)
    }
}

fn is_servable_as_is(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:")
        || raw.starts_with('/')
}
