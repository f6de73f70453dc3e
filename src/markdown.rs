//! Markdown inspection utilities using pulldown-cmark
//!
//! The linter and media checks only need three things from the body:
//! the first heading (title fallback), inline link text/destinations,
//! and image destinations.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// An inline markdown link.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownLink {
    /// Visible link text
    pub text: String,
    /// Destination URL
    pub dest: String,
}

/// An embedded markdown image.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownImage {
    /// Alt text (may be empty)
    pub alt: String,
    /// Destination URL or path
    pub dest: String,
}

/// Extract the first heading of any level, used as the derivable title
/// when frontmatter has none.
pub fn first_heading(body: &str) -> Option<String> {
    let mut in_heading = false;
    let mut text = String::new();

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                text.clear();
            }
            Event::Text(t) | Event::Code(t) => {
                if in_heading {
                    text.push_str(&t);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                in_heading = false;
            }
            _ => {}
        }
    }
    None
}

/// Extract all inline links (not images) with their visible text.
pub fn extract_links(body: &str) -> Vec<MarkdownLink> {
    let mut links = Vec::new();
    let mut current: Option<MarkdownLink> = None;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                current = Some(MarkdownLink {
                    text: String::new(),
                    dest: dest_url.to_string(),
                });
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(link) = current.as_mut() {
                    link.text.push_str(&t);
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some(link) = current.take() {
                    links.push(link);
                }
            }
            _ => {}
        }
    }
    links
}

/// Extract all embedded images.
pub fn extract_images(body: &str) -> Vec<MarkdownImage> {
    let mut images = Vec::new();
    let mut current: Option<MarkdownImage> = None;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Image { dest_url, .. }) => {
                current = Some(MarkdownImage {
                    alt: String::new(),
                    dest: dest_url.to_string(),
                });
            }
            Event::Text(t) => {
                if let Some(img) = current.as_mut() {
                    img.alt.push_str(&t);
                }
            }
            Event::End(TagEnd::Image) => {
                if let Some(img) = current.take() {
                    images.push(img);
                }
            }
            _ => {}
        }
    }
    images
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_heading_h1() {
        assert_eq!(first_heading("# Hello World\n\nBody"), Some("Hello World".into()));
    }

    #[test]
    fn test_first_heading_h2_counts() {
        assert_eq!(first_heading("## Section\n\nBody"), Some("Section".into()));
    }

    #[test]
    fn test_no_heading() {
        assert_eq!(first_heading("Just a paragraph.\n"), None);
    }

    #[test]
    fn test_extract_links() {
        let links = extract_links("See [the docs](https://example.com) here.");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "the docs");
        assert_eq!(links[0].dest, "https://example.com");
    }

    #[test]
    fn test_extract_images_skips_links() {
        let body = "![alt text](./pic.png) and [a link](https://x.com)";
        let images = extract_images(body);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dest, "./pic.png");
        assert_eq!(images[0].alt, "alt text");
    }
}
