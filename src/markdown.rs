//! Markdown to HTML conversion for authored prose.
//!
//! Wraps [pulldown-cmark](https://docs.rs/pulldown-cmark) with the GFM
//! extensions authors expect (tables, strikethrough, task lists, footnotes)
//! and three adjustments to the event stream:
//!
//! - **Image resolution**: every image `src`, whether from `![alt](path)` or
//!   a raw `<img src="...">`, is passed through the site's
//!   [`ImageResolver`]. Local asset paths and hosted URLs both come out
//!   loadable.
//! - **Lazy images**: markdown images render with `loading="lazy"` and the
//!   `markdown-image` class.
//! - **Standalone images**: a paragraph holding nothing but one image is
//!   unwrapped, so the image isn't boxed in paragraph margins.
//!
//! Raw HTML in the source passes through untouched. This converter is for
//! author-controlled content only and is not a sanitizer.

use crate::resolve::ImageResolver;
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html as md_html};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Convert markdown to HTML markup.
///
/// Total: empty input gives empty markup and anything CommonMark can't parse
/// as a construct comes out as literal text.
pub fn render_markdown<R: ImageResolver + ?Sized>(source: &str, resolver: &R) -> Markup {
    if source.trim().is_empty() {
        return PreEscaped(String::new());
    }
    let events: Vec<Event> = Parser::new_ext(source, options()).collect();
    let events = unwrap_image_paragraphs(events);
    let events = resolve_images(events, resolver);

    let mut body = String::with_capacity(source.len() + source.len() / 2);
    md_html::push_html(&mut body, events.into_iter());
    PreEscaped(body)
}

/// Drop the paragraph tags around any paragraph whose only child is an image.
fn unwrap_image_paragraphs(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut skip = vec![false; events.len()];
    for (start, event) in events.iter().enumerate() {
        if !matches!(event, Event::Start(Tag::Paragraph))
            || !matches!(events.get(start + 1), Some(Event::Start(Tag::Image { .. })))
        {
            continue;
        }
        let Some(image_end) = matching_end(&events, start + 1) else {
            continue;
        };
        if matches!(events.get(image_end + 1), Some(Event::End(TagEnd::Paragraph))) {
            skip[start] = true;
            skip[image_end + 1] = true;
        }
    }
    events
        .into_iter()
        .zip(skip)
        .filter_map(|(event, skip)| (!skip).then_some(event))
        .collect()
}

/// Index of the `End` event closing the `Start` at `start`.
fn matching_end(events: &[Event<'_>], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, event) in events[start..].iter().enumerate() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Replace markdown images with resolved `<img>` tags and resolve `src`
/// attributes inside raw HTML.
fn resolve_images<'a, R: ImageResolver + ?Sized>(
    events: Vec<Event<'a>>,
    resolver: &R,
) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len());
    let mut events = events.into_iter();
    while let Some(event) = events.next() {
        let event = match event {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                let alt = collect_alt_text(&mut events);
                let src = resolver.resolve(&dest_url);
                Event::InlineHtml(CowStr::from(image_tag(&src, &alt, &title)))
            }
            Event::Html(raw) => Event::Html(resolve_raw_image_sources(&raw, resolver).into()),
            Event::InlineHtml(raw) => {
                Event::InlineHtml(resolve_raw_image_sources(&raw, resolver).into())
            }
            other => other,
        };
        out.push(event);
    }
    out
}

/// Consume events up to the image's `End`, flattening the label to text.
fn collect_alt_text<'a>(events: &mut impl Iterator<Item = Event<'a>>) -> String {
    let mut alt = String::new();
    let mut depth = 0usize;
    for event in events {
        match event {
            Event::End(TagEnd::Image) if depth == 0 => break,
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => alt.push_str(&text),
            Event::SoftBreak | Event::HardBreak => alt.push(' '),
            _ => {}
        }
    }
    alt
}

fn image_tag(src: &str, alt: &str, title: &str) -> String {
    let title = (!title.is_empty()).then_some(title);
    html! {
        img.markdown-image src=(src) alt=(alt) title=[title] loading="lazy";
    }
    .into_string()
}

/// Rewrite the `src` of every `<img ...>` tag in a raw HTML fragment.
fn resolve_raw_image_sources<R: ImageResolver + ?Sized>(raw: &str, resolver: &R) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(tag_start) = rest.to_ascii_lowercase().find("<img") {
        let (before, from_tag) = rest.split_at(tag_start);
        out.push_str(before);
        let tag_len = from_tag.find('>').map_or(from_tag.len(), |i| i + 1);
        let (tag, after) = from_tag.split_at(tag_len);
        out.push_str(&rewrite_src_attribute(tag, resolver));
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Resolve the quoted value of a standalone `src=` attribute in one tag.
///
/// Unquoted values are left alone.
fn rewrite_src_attribute<R: ImageResolver + ?Sized>(tag: &str, resolver: &R) -> String {
    let lower = tag.to_ascii_lowercase();
    let attr = lower.match_indices("src=").map(|(i, _)| i).find(|&i| {
        tag.as_bytes()
            .get(i.wrapping_sub(1))
            .is_some_and(u8::is_ascii_whitespace)
    });
    let Some(attr) = attr else {
        return tag.to_string();
    };
    let value_start = attr + "src=".len();
    let quote = match tag[value_start..].chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return tag.to_string(),
    };
    let inner_start = value_start + 1;
    let Some(inner_len) = tag[inner_start..].find(quote) else {
        return tag.to_string();
    };
    let inner_end = inner_start + inner_len;
    format!(
        "{}{}{}",
        &tag[..inner_start],
        resolver.resolve(&tag[inner_start..inner_end]),
        &tag[inner_end..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::SiteResolver;

    fn identity(raw: &str) -> String {
        raw.to_string()
    }

    fn md(source: &str) -> String {
        render_markdown(source, &identity).into_string()
    }

    fn prefixed(raw: &str) -> String {
        format!("/r/{raw}")
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(md(""), "");
        assert_eq!(md("  \n\n "), "");
    }

    #[test]
    fn plain_text_is_single_paragraph() {
        assert_eq!(md("just some plain text"), "<p>just some plain text</p>\n");
    }

    #[test]
    fn bold_then_text() {
        assert_eq!(md("**bold** text"), "<p><strong>bold</strong> text</p>\n");
    }

    #[test]
    fn headings_and_lists() {
        let html = md("## Architecture\n\n- **Perception**: raw data\n- Mapping\n");
        assert!(html.contains("<h2>Architecture</h2>"));
        assert!(html.contains("<li><strong>Perception</strong>: raw data</li>"));
    }

    #[test]
    fn gfm_extensions_enabled() {
        let html = md("~~old~~\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n");
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn malformed_emphasis_is_literal() {
        assert_eq!(md("**unclosed"), "<p>**unclosed</p>\n");
    }

    #[test]
    fn image_src_goes_through_resolver() {
        let html = render_markdown("![Map](nav/map.jpg)", &prefixed).into_string();
        assert!(html.contains(r#"src="/r/nav/map.jpg""#));
        assert!(html.contains(r#"alt="Map""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains("markdown-image"));
    }

    #[test]
    fn absolute_image_unchanged_by_site_resolver() {
        let url = "https://images.unsplash.com/photo-1518770660439-4636190af475";
        let html = render_markdown(&format!("![board]({url})"), &SiteResolver::new("/assets/"))
            .into_string();
        assert!(html.contains(&format!(r#"src="{url}""#)));
    }

    #[test]
    fn standalone_image_not_wrapped_in_paragraph() {
        let html = md("Intro text.\n\n![Shot](a.jpg)\n\nOutro text.");
        assert!(html.contains("<p>Intro text.</p>"));
        assert!(html.contains("<p>Outro text.</p>"));
        assert!(!html.contains("<p><img"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn inline_image_keeps_paragraph() {
        let html = md("See ![icon](i.png) here");
        assert!(html.starts_with("<p>See <img"));
        assert!(html.contains(" here</p>"));
    }

    #[test]
    fn two_images_keep_paragraph() {
        let html = md("![a](a.png) ![b](b.png)");
        assert!(html.starts_with("<p><img"));
    }

    #[test]
    fn alt_text_flattened() {
        let html = md("![a *b* `c`](x.png)");
        assert!(html.contains(r#"alt="a b c""#));
    }

    #[test]
    fn image_title_kept() {
        let html = md(r#"![a](x.png "Caption")"#);
        assert!(html.contains(r#"title="Caption""#));
    }

    #[test]
    fn alt_text_escaped() {
        let html = md(r#"![say "hi" <b>](x.png)"#);
        assert!(html.contains("&quot;hi&quot;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn raw_html_passes_through() {
        let html = md("<div class=\"two-col\">\n\ncontent\n\n</div>\n");
        assert!(html.contains(r#"<div class="two-col">"#));
        assert!(html.contains("</div>"));
    }

    #[test]
    fn raw_img_src_resolved() {
        let html = render_markdown(
            "<img data-src=\"keep.png\" src=\"local.png\" width=\"300\">\n",
            &prefixed,
        )
        .into_string();
        assert!(html.contains(r#"data-src="keep.png""#));
        assert!(html.contains(r#"src="/r/local.png""#));
        assert!(html.contains(r#"width="300""#));
    }

    #[test]
    fn raw_img_single_quotes_and_case() {
        let out = resolve_raw_image_sources("<IMG SRC='a.png'>", &prefixed);
        assert_eq!(out, "<IMG SRC='/r/a.png'>");
    }

    #[test]
    fn raw_img_without_src_untouched() {
        let out = resolve_raw_image_sources("<p><img alt=\"x\"></p>", &prefixed);
        assert_eq!(out, "<p><img alt=\"x\"></p>");
    }

    #[test]
    fn rendering_is_repeatable() {
        let source = "# Title\n\n![a](a.png)\n\ntext";
        assert_eq!(md(source), md(source));
    }
}
