//! Section dispatch: renders a project's content sections in authored order.
//!
//! Each [`Section`] kind maps to one block of markup:
//!
//! | Kind | Renders | Skipped when |
//! |------|---------|--------------|
//! | `overview`, `technical`, `results` | optional title + markdown body | never (missing content → empty body) |
//! | `gallery` | optional title + tile grid + lightboxes | `images` absent |
//! | `video` | optional title + 16:9 embedded player | `video_url` absent (title too) |
//! | anything else | nothing | always |
//!
//! Gallery tiles open a CSS `:target` lightbox with the enlarged image, so the
//! generated pages need no JavaScript.
//!
//! Sections don't see each other: a section that renders nothing leaves the
//! rest of the sequence untouched.

use crate::catalog::{GalleryImage, ProseKind, Section};
use crate::markdown::render_markdown;
use crate::resolve::ImageResolver;
use maud::{Markup, html};

const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// What section rendering needs to know about the surrounding page.
#[derive(Clone, Copy)]
pub struct SectionContext<'a> {
    /// Used to title embedded players.
    pub project_title: &'a str,
    pub resolver: &'a dyn ImageResolver,
}

/// Render every section in order, skipping the ones that render nothing.
pub fn render_sections(sections: &[Section], ctx: SectionContext<'_>) -> Markup {
    html! {
        @for (index, section) in sections.iter().enumerate() {
            @if let Some(markup) = render_section(section, index, ctx) {
                (markup)
            }
        }
    }
}

/// Render one section. `index` is its position in the project, used to keep
/// lightbox anchors unique across galleries.
pub fn render_section(section: &Section, index: usize, ctx: SectionContext<'_>) -> Option<Markup> {
    match section {
        Section::Prose {
            kind,
            title,
            content,
        } => Some(render_prose(*kind, title.as_deref(), content.as_deref(), ctx)),
        Section::Gallery {
            title,
            images: Some(images),
        } => Some(render_gallery(title.as_deref(), images, index, ctx)),
        Section::Gallery { images: None, .. } => {
            tracing::debug!(index, "skipping gallery section without images");
            None
        }
        Section::Video {
            title,
            video_url: Some(url),
        } => Some(render_video(title.as_deref(), url, ctx)),
        Section::Video {
            video_url: None, ..
        } => {
            tracing::debug!(index, "skipping video section without a url");
            None
        }
        Section::Unrecognized { kind, .. } => {
            tracing::debug!(index, kind = %kind, "skipping unrecognized section");
            None
        }
    }
}

fn section_title(title: Option<&str>) -> Markup {
    html! {
        @if let Some(title) = title {
            h2.section-title { (title) }
        }
    }
}

fn render_prose(
    kind: ProseKind,
    title: Option<&str>,
    content: Option<&str>,
    ctx: SectionContext<'_>,
) -> Markup {
    html! {
        section.content-section data-kind=(kind.as_str()) {
            (section_title(title))
            div.prose {
                (render_markdown(content.unwrap_or_default(), ctx.resolver))
            }
        }
    }
}

/// Alt text for a gallery image, numbering untitled ones from 1.
fn gallery_alt(image: &GalleryImage, position: usize) -> String {
    match image.alt.as_deref() {
        Some(alt) if !alt.is_empty() => alt.to_string(),
        _ => format!("Gallery image {}", position + 1),
    }
}

fn render_gallery(
    title: Option<&str>,
    images: &[GalleryImage],
    index: usize,
    ctx: SectionContext<'_>,
) -> Markup {
    let tiles: Vec<(String, String, String)> = images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            (
                ctx.resolver.resolve(&image.src),
                gallery_alt(image, i),
                format!("lightbox-{}-{}", index + 1, i + 1),
            )
        })
        .collect();

    html! {
        section.content-section data-kind="gallery" {
            (section_title(title))
            div.gallery-grid {
                @for (src, alt, anchor) in &tiles {
                    a.gallery-tile href={ "#" (anchor) } {
                        img src=(src) alt=(alt) loading="lazy";
                    }
                }
            }
            @for (src, alt, anchor) in &tiles {
                div.lightbox id=(anchor) {
                    a.lightbox-close href="#_" aria-label="Close" { "×" }
                    img src=(src) alt=(alt) loading="lazy";
                }
            }
        }
    }
}

fn render_video(title: Option<&str>, url: &str, ctx: SectionContext<'_>) -> Markup {
    let frame_title = format!("{} - {}", ctx.project_title, title.unwrap_or("Video"));
    html! {
        section.content-section data-kind="video" {
            @if let Some(title) = title {
                h2.section-title {
                    span.video-icon aria-hidden="true" { "▶" }
                    (title)
                }
            }
            div.video-frame {
                iframe src=(url) title=(frame_title) allow=(VIDEO_ALLOW)
                    frameborder="0" loading="lazy" allowfullscreen {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(raw: &str) -> String {
        raw.to_string()
    }

    fn render(sections: &[Section]) -> String {
        let ctx = SectionContext {
            project_title: "Test Project",
            resolver: &identity,
        };
        render_sections(sections, ctx).into_string()
    }

    fn image(src: &str, alt: Option<&str>) -> GalleryImage {
        GalleryImage {
            src: src.to_string(),
            alt: alt.map(String::from),
        }
    }

    // =========================================================================
    // Prose
    // =========================================================================

    #[test]
    fn overview_markdown_rendered() {
        let html = render(&[Section::Prose {
            kind: ProseKind::Overview,
            title: None,
            content: Some("**bold** text".into()),
        }]);
        assert!(html.contains("<p><strong>bold</strong> text</p>"));
        assert!(!html.contains("section-title"));
    }

    #[test]
    fn prose_without_content_keeps_title_and_empty_body() {
        let html = render(&[Section::Prose {
            kind: ProseKind::Results,
            title: Some("Results".into()),
            content: None,
        }]);
        assert!(html.contains(r#"<h2 class="section-title">Results</h2>"#));
        assert!(html.contains(r#"<div class="prose"></div>"#));
    }

    #[test]
    fn prose_without_title_or_content_still_rendered() {
        let html = render(&[Section::Prose {
            kind: ProseKind::Technical,
            title: None,
            content: None,
        }]);
        assert!(html.contains(r#"data-kind="technical""#));
    }

    #[test]
    fn prose_title_escaped() {
        let html = render(&[Section::Prose {
            kind: ProseKind::Overview,
            title: Some("<script>x</script>".into()),
            content: None,
        }]);
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn prose_images_use_resolver() {
        let ctx = SectionContext {
            project_title: "P",
            resolver: &|raw: &str| format!("/assets/{raw}"),
        };
        let section = Section::Prose {
            kind: ProseKind::Overview,
            title: None,
            content: Some("![wiring](wiring.png)".into()),
        };
        let html = render_section(&section, 0, ctx).unwrap().into_string();
        assert!(html.contains(r#"src="/assets/wiring.png""#));
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    #[test]
    fn empty_gallery_renders_title_and_empty_grid() {
        let html = render(&[Section::Gallery {
            title: Some("Shots".into()),
            images: Some(vec![]),
        }]);
        assert!(html.contains(r#"<h2 class="section-title">Shots</h2>"#));
        assert!(html.contains(r#"<div class="gallery-grid"></div>"#));
        assert_eq!(html.matches("gallery-tile").count(), 0);
    }

    #[test]
    fn gallery_without_images_skipped() {
        let html = render(&[Section::Gallery {
            title: Some("Shots".into()),
            images: None,
        }]);
        assert_eq!(html, "");
    }

    #[test]
    fn gallery_tiles_match_images_in_order() {
        let html = render(&[Section::Gallery {
            title: None,
            images: Some(vec![
                image("one.jpg", Some("First")),
                image("two.jpg", Some("Second")),
                image("three.jpg", Some("Third")),
            ]),
        }]);
        assert_eq!(html.matches(r#"class="gallery-tile""#).count(), 3);
        let one = html.find("one.jpg").unwrap();
        let two = html.find("two.jpg").unwrap();
        let three = html.find("three.jpg").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn gallery_tiles_link_to_lightboxes() {
        let html = render(&[Section::Gallery {
            title: None,
            images: Some(vec![image("a.jpg", Some("A")), image("b.jpg", Some("B"))]),
        }]);
        assert!(html.contains(r##"href="#lightbox-1-1""##));
        assert!(html.contains(r#"id="lightbox-1-1""#));
        assert!(html.contains(r#"id="lightbox-1-2""#));
        assert_eq!(html.matches("lightbox-close").count(), 2);
    }

    #[test]
    fn lightbox_anchors_unique_per_section() {
        let gallery = Section::Gallery {
            title: None,
            images: Some(vec![image("a.jpg", None)]),
        };
        let html = render(&[gallery.clone(), gallery]);
        assert!(html.contains(r#"id="lightbox-1-1""#));
        assert!(html.contains(r#"id="lightbox-2-1""#));
    }

    #[test]
    fn gallery_missing_alt_numbered() {
        let html = render(&[Section::Gallery {
            title: None,
            images: Some(vec![image("a.jpg", Some("Named")), image("b.jpg", None)]),
        }]);
        assert!(html.contains(r#"alt="Named""#));
        assert!(html.contains(r#"alt="Gallery image 2""#));
    }

    // =========================================================================
    // Video
    // =========================================================================

    #[test]
    fn video_without_url_skipped_with_title() {
        let html = render(&[Section::Video {
            title: Some("Demo".into()),
            video_url: None,
        }]);
        assert_eq!(html, "");
    }

    #[test]
    fn video_renders_iframe() {
        let html = render(&[Section::Video {
            title: Some("Demo Video".into()),
            video_url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".into()),
        }]);
        assert!(html.contains("video-frame"));
        assert!(html.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
        assert!(html.contains(r#"title="Test Project - Demo Video""#));
        assert!(html.contains("allowfullscreen"));
        assert!(html.contains("Demo Video</h2>"));
    }

    #[test]
    fn untitled_video_frame_title_defaults() {
        let html = render(&[Section::Video {
            title: None,
            video_url: Some("https://player.vimeo.com/video/1".into()),
        }]);
        assert!(html.contains(r#"title="Test Project - Video""#));
        assert!(!html.contains("section-title"));
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    #[test]
    fn unrecognized_kind_skipped() {
        let html = render(&[Section::Unrecognized {
            kind: "timeline".into(),
            title: Some("Milestones".into()),
        }]);
        assert_eq!(html, "");
    }

    #[test]
    fn order_preserved_and_inert_sections_isolated() {
        let html = render(&[
            Section::Prose {
                kind: ProseKind::Overview,
                title: Some("Alpha".into()),
                content: None,
            },
            Section::Unrecognized {
                kind: "timeline".into(),
                title: Some("Hidden".into()),
            },
            Section::Video {
                title: Some("No Url".into()),
                video_url: None,
            },
            Section::Prose {
                kind: ProseKind::Results,
                title: Some("Omega".into()),
                content: Some("done".into()),
            },
        ]);
        let alpha = html.find("Alpha").unwrap();
        let omega = html.find("Omega").unwrap();
        assert!(alpha < omega);
        assert!(!html.contains("Hidden"));
        assert!(!html.contains("No Url"));
        assert_eq!(html.matches("content-section").count(), 2);
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
