//! Project detail assembly.
//!
//! Looks a project up by id and lays out its detail page body, or the
//! not-found state when the id is unknown. A miss is a page, never an error.
//!
//! ## Layout
//!
//! ```text
//! ← Back to Projects
//! Title
//! [tag] [tag] [tag]
//! Description
//! ┌ Duration │ Role │ Team Size │ Tech Stack (first N, +K) ┐   only if any is set
//! ┌──────────── hero image, 16:9 ────────────┐
//! Key Outcomes                                                 only if non-empty
//! <sections, in authored order>
//! Technologies Used                                            only if stack > N
//! ```

use crate::catalog::{Project, ProjectSource};
use crate::resolve::ImageResolver;
use crate::sections::{SectionContext, render_sections};
use maud::{Markup, html};

/// Where the back links on detail and not-found pages point.
pub const LISTING_HREF: &str = "/";

#[derive(Clone, Copy)]
pub struct DetailContext<'a> {
    pub resolver: &'a dyn ImageResolver,
    /// Tech stack entries shown in the metadata block.
    pub tech_stack_preview: usize,
}

/// Render the detail body for `id`, or the not-found state.
pub fn render_detail<S: ProjectSource + ?Sized>(
    source: &S,
    id: &str,
    ctx: DetailContext<'_>,
) -> Markup {
    match source.find_by_id(id) {
        Some(project) => render_project(project, ctx),
        None => {
            tracing::debug!(id, "project not found");
            render_not_found()
        }
    }
}

fn back_link() -> Markup {
    html! {
        a.back-link href=(LISTING_HREF) { "← Back to Projects" }
    }
}

/// The terminal state for an unknown id.
pub fn render_not_found() -> Markup {
    html! {
        div.not-found {
            h1 { "Project Not Found" }
            p.not-found-message { "The project you're looking for doesn't exist." }
            a.button href=(LISTING_HREF) { "Back to Projects" }
        }
    }
}

pub fn render_project(project: &Project, ctx: DetailContext<'_>) -> Markup {
    let sections = SectionContext {
        project_title: &project.title,
        resolver: ctx.resolver,
    };
    html! {
        article.project-detail {
            header.project-header {
                (back_link())
                h1.project-title { (project.title) }
                @if !project.tags.is_empty() {
                    div.tag-list {
                        @for tag in &project.tags {
                            span.tag { (tag) }
                        }
                    }
                }
                p.project-description { (project.description) }
                @if project.has_metadata() {
                    (render_metadata(project, ctx.tech_stack_preview))
                }
            }
            div.hero-image {
                img src=(ctx.resolver.resolve(&project.image)) alt=(project.title);
            }
            @if !project.outcomes.is_empty() {
                section.outcomes {
                    h2 { "Key Outcomes" }
                    ul {
                        @for outcome in &project.outcomes {
                            li {
                                span.outcome-marker aria-hidden="true" { "▸" }
                                span { (outcome) }
                            }
                        }
                    }
                }
            }
            (render_sections(&project.sections, sections))
            @if project.tech_stack.len() > ctx.tech_stack_preview {
                section.content-section.tech-stack {
                    h2.section-title { "Technologies Used" }
                    div.tech-list {
                        @for tech in &project.tech_stack {
                            span.tech { (tech) }
                        }
                    }
                }
            }
        }
    }
}

fn team_size_label(size: u32) -> String {
    match size {
        1 => "1 member".to_string(),
        n => format!("{n} members"),
    }
}

fn meta_item(label: &str, value: Markup) -> Markup {
    html! {
        div.meta-item {
            div.meta-label { (label) }
            div.meta-value { (value) }
        }
    }
}

fn render_metadata(project: &Project, preview: usize) -> Markup {
    let stack = &project.tech_stack;
    html! {
        div.project-meta {
            @if let Some(duration) = &project.duration {
                (meta_item("Duration", html! { (duration) }))
            }
            @if let Some(role) = &project.role {
                (meta_item("Role", html! { (role) }))
            }
            @if let Some(size) = project.team_members() {
                (meta_item("Team Size", html! { (team_size_label(size)) }))
            }
            @if !stack.is_empty() {
                (meta_item("Tech Stack", html! {
                    @for tech in stack.iter().take(preview) {
                        span.tech-chip { (tech) }
                    }
                    @if stack.len() > preview {
                        span.tech-more { "+" (stack.len() - preview) }
                    }
                }))
            }
        }
    }
}
