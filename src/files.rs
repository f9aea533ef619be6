//! Downloadable files: icon classification and the download list widget.
//!
//! [`classify`] picks a display category for a file. A declared MIME-like
//! type wins when it is specific enough (`image/*`, `video/*`, anything
//! mentioning `pdf`); otherwise the extension decides. Unknown or missing
//! extensions fall back to [`IconCategory::Unknown`], so every file gets an
//! icon.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

/// A file offered for download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileItem {
    pub name: String,
    pub url: String,
    /// Human-readable size label, e.g. `"2.4 MB"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Declared MIME-like type, e.g. `"application/pdf"`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCategory {
    Document,
    Image,
    Video,
    Archive,
    CodeOrCad,
    Unknown,
}

impl IconCategory {
    /// CSS modifier used on the icon element.
    pub fn css_class(self) -> &'static str {
        match self {
            IconCategory::Document => "file-icon--document",
            IconCategory::Image => "file-icon--image",
            IconCategory::Video => "file-icon--video",
            IconCategory::Archive => "file-icon--archive",
            IconCategory::CodeOrCad => "file-icon--code",
            IconCategory::Unknown => "file-icon--file",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IconCategory::Document => "document",
            IconCategory::Image => "image",
            IconCategory::Video => "video",
            IconCategory::Archive => "archive",
            IconCategory::CodeOrCad => "code/cad",
            IconCategory::Unknown => "file",
        }
    }

    /// Short glyph label shown inside the icon badge.
    fn label(self) -> &'static str {
        match self {
            IconCategory::Document => "DOC",
            IconCategory::Image => "IMG",
            IconCategory::Video => "VID",
            IconCategory::Archive => "ZIP",
            IconCategory::CodeOrCad => "SRC",
            IconCategory::Unknown => "FILE",
        }
    }
}

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "webm"];
const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz"];
const CODE_OR_CAD_EXTENSIONS: &[&str] = &[
    "js", "ts", "tsx", "jsx", "py", "java", "cpp", "c", "h", "css", "html", "json", "xml", "yaml",
    // CAD
    "sldprt", "sldasm", "slddrw", "stl", "step", "iges", "dwg", "dxf",
];

/// Classify a file for its display icon.
pub fn classify(filename: &str, declared_type: Option<&str>) -> IconCategory {
    if let Some(category) = declared_type.and_then(classify_declared) {
        return category;
    }
    classify_extension(filename)
}

fn classify_declared(declared: &str) -> Option<IconCategory> {
    if declared.starts_with("image/") {
        Some(IconCategory::Image)
    } else if declared.starts_with("video/") {
        Some(IconCategory::Video)
    } else if declared.contains("pdf") {
        Some(IconCategory::Document)
    } else {
        None
    }
}

fn classify_extension(filename: &str) -> IconCategory {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return IconCategory::Unknown;
    };
    let ext = ext.to_ascii_lowercase();
    let table: [(&[&str], IconCategory); 5] = [
        (DOCUMENT_EXTENSIONS, IconCategory::Document),
        (IMAGE_EXTENSIONS, IconCategory::Image),
        (VIDEO_EXTENSIONS, IconCategory::Video),
        (ARCHIVE_EXTENSIONS, IconCategory::Archive),
        (CODE_OR_CAD_EXTENSIONS, IconCategory::CodeOrCad),
    ];
    table
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map(|&(_, category)| category)
        .unwrap_or(IconCategory::Unknown)
}

/// Renders the download list as a grid of file cards.
pub fn render_downloads(files: &[FileItem]) -> Markup {
    html! {
        div.download-grid {
            @for file in files {
                @let category = classify(&file.name, file.mime_type.as_deref());
                div.download-card {
                    span class={ "file-icon " (category.css_class()) } aria-hidden="true" {
                        (category.label())
                    }
                    div.download-info {
                        p.download-name { (file.name) }
                        @if let Some(size) = &file.size {
                            p.download-size { (size) }
                        }
                    }
                    a.download-link href=(file.url) download=(file.name) {
                        "Download"
                    }
                }
            }
        }
    }
}
