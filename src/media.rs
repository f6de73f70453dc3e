//! Local media reference detection
//!
//! Finds media embeds in a note body that still point at local vault
//! paths instead of a hosted URL. The actual upload/replace work is
//! done by an external asset-hosting collaborator behind the
//! [`AssetResolver`] trait; the linter only needs to know whether any
//! unresolved references remain.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::markdown;

static HTML_IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src=["']([^"']*)["']"#).expect("valid regex"));
static HTML_VIDEO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<video[^>]+src=["']([^"']*)["']"#).expect("valid regex"));

/// Kind of media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A media embed that points at a local (non-hosted) path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalMediaRef {
    /// The path as written in the note
    pub path: String,
    /// Alt text, when present
    pub alt: Option<String>,
    pub kind: MediaKind,
}

/// Asset-hosting collaborator: resolves a local reference to a hosted
/// URL (uploading if needed). Out of scope for this crate beyond the
/// interface; the linter never calls it.
pub trait AssetResolver {
    fn resolve(&self, reference: &LocalMediaRef, source_dir: &Path) -> Option<String>;
}

/// True when a destination already points at hosted content.
pub fn is_remote(dest: &str) -> bool {
    dest.starts_with("http://") || dest.starts_with("https://") || dest.starts_with("//")
}

fn video_extension(dest: &str) -> bool {
    let lower = dest.to_ascii_lowercase();
    lower.ends_with(".mp4") || lower.ends_with(".webm") || lower.ends_with(".mov")
}

/// Extract all media references in `body` that are not yet hosted.
pub fn extract_local_media(body: &str) -> Vec<LocalMediaRef> {
    let mut refs = Vec::new();

    for image in markdown::extract_images(body) {
        if image.dest.is_empty() || is_remote(&image.dest) {
            continue;
        }
        let kind = if video_extension(&image.dest) {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        refs.push(LocalMediaRef {
            path: image.dest,
            alt: if image.alt.is_empty() { None } else { Some(image.alt) },
            kind,
        });
    }

    // HTML embeds are invisible to the markdown parser
    for cap in HTML_IMG_RE.captures_iter(body) {
        let src = &cap[1];
        if !is_remote(src) {
            refs.push(LocalMediaRef {
                path: src.to_string(),
                alt: None,
                kind: MediaKind::Image,
            });
        }
    }
    for cap in HTML_VIDEO_RE.captures_iter(body) {
        let src = &cap[1];
        if !is_remote(src) {
            refs.push(LocalMediaRef {
                path: src.to_string(),
                alt: None,
                kind: MediaKind::Video,
            });
        }
    }

    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_markdown_image() {
        let refs = extract_local_media("![shot](./attachments/shot.png)");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].path, "./attachments/shot.png");
        assert_eq!(refs[0].kind, MediaKind::Image);
        assert_eq!(refs[0].alt.as_deref(), Some("shot"));
    }

    #[test]
    fn test_hosted_image_ignored() {
        let refs = extract_local_media(
            "![ok](https://res.cloudinary.com/demo/image/upload/v1/shot.png)",
        );
        assert!(refs.is_empty());
    }

    #[test]
    fn test_html_img_embed() {
        let refs = extract_local_media(r#"<img src="assets/pic.jpg" alt="x">"#);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].path, "assets/pic.jpg");
    }

    #[test]
    fn test_html_video_embed() {
        let refs = extract_local_media(r#"<video src="clips/demo.mp4"></video>"#);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_video_extension_in_markdown_embed() {
        let refs = extract_local_media("![demo](clips/demo.webm)");
        assert_eq!(refs[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_empty_body() {
        assert!(extract_local_media("plain text, no media").is_empty());
    }
}
