//! Safety linter
//!
//! Evaluates a note against a fixed rule set. Every rule runs on every
//! note, in a fixed order, so the same note always yields the same
//! warning list. Blocking warnings gate first publish; advisories are
//! informational only. The republish path bypasses the gate entirely
//! (see the engine), which is what makes the local-media rule
//! non-blocking on republish.

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::markdown;
use crate::media::{self, MediaKind};
use crate::note::Note;

/// A single lint finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub message: String,
    pub blocking: bool,
}

impl Warning {
    fn blocking(message: &str) -> Self {
        Warning { message: message.to_string(), blocking: true }
    }

    fn advisory(message: &str) -> Self {
        Warning { message: message.to_string(), blocking: false }
    }
}

/// True when no blocking warnings remain.
pub fn is_safe(warnings: &[Warning]) -> bool {
    !warnings.iter().any(|w| w.blocking)
}

/// Run the full rule set against a note. Rule order is the output
/// order.
pub fn lint(note: &Note) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let body = note.body.as_str();

    // 1. No title at all (frontmatter or derivable heading)
    if note.title().is_none() {
        warnings.push(Warning::blocking(C::WARN_NO_TITLE));
    }

    // 2. No date; required for sorting and display on the site
    if note.frontmatter.date.is_none() {
        warnings.push(Warning::blocking(C::WARN_NO_DATE));
    }

    // 3. Leftover work markers
    if body.contains("TODO") || body.contains("FIXME") {
        warnings.push(Warning::blocking(C::WARN_TODO_MARKERS));
    }

    // 4. Media still pointing at local vault paths
    let local_media = media::extract_local_media(body);
    if !local_media.is_empty() {
        warnings.push(Warning::blocking(C::WARN_LOCAL_MEDIA));
    }

    // 5. Broken or empty link targets
    if has_broken_links(body) {
        warnings.push(Warning::advisory(C::WARN_BROKEN_LINK));
    }

    // 6. Unhosted video deserves its own nudge; these embeds are easy
    // to miss in preview
    if local_media.iter().any(|m| m.kind == MediaKind::Video) {
        warnings.push(Warning::advisory(C::WARN_LOCAL_VIDEO));
    }

    // 7. Long link text reads badly on the site
    if has_long_link_text(body, C::MAX_LINK_TEXT_WORDS) {
        warnings.push(Warning::advisory(C::WARN_LONG_LINK_TEXT));
    }

    warnings
}

fn has_broken_links(body: &str) -> bool {
    const PATTERNS: [&str; 5] = ["]()", "](#)", "](http)", "[[]]", "![]()"];
    PATTERNS.iter().any(|p| body.contains(p))
}

fn has_long_link_text(body: &str, max_words: usize) -> bool {
    markdown::extract_links(body)
        .iter()
        .any(|link| link.text.split_whitespace().count() > max_words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Fingerprint;
    use crate::frontmatter;
    use std::path::PathBuf;

    fn note_from(text: &str) -> Note {
        let (fm, body) = frontmatter::parse(text);
        Note {
            path: PathBuf::from("/vault/blog/test-note.md"),
            filename: "test-note.md".into(),
            source_dir: "blog".into(),
            frontmatter: fm,
            fingerprint: Fingerprint::of_body(body),
            word_count: body.split_whitespace().count(),
            body: body.to_string(),
            created: 0,
            modified: 0,
        }
    }

    #[test]
    fn test_scenario_a_no_date_and_todo() {
        let note = note_from("# Hello\nTODO fix this");
        let warnings = lint(&note);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.contains(&C::WARN_NO_DATE));
        assert!(messages.contains(&C::WARN_TODO_MARKERS));
        assert!(!is_safe(&warnings));
    }

    #[test]
    fn test_clean_note_is_safe() {
        let note = note_from("---\ntitle: T\ndate: 2026-01-15\n---\nAll good here.");
        let warnings = lint(&note);
        assert!(warnings.is_empty());
        assert!(is_safe(&warnings));
    }

    #[test]
    fn test_heading_satisfies_title_rule() {
        let note = note_from("---\ndate: 2026-01-15\n---\n# Derived Title\nBody");
        let warnings = lint(&note);
        assert!(!warnings.iter().any(|w| w.message == C::WARN_NO_TITLE));
    }

    #[test]
    fn test_no_title_anywhere_blocks() {
        let note = note_from("---\ndate: 2026-01-15\n---\nJust prose, no heading.");
        let warnings = lint(&note);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, C::WARN_NO_TITLE);
        assert!(warnings[0].blocking);
    }

    #[test]
    fn test_local_media_blocks() {
        let note = note_from("---\ntitle: T\ndate: 2026-01-15\n---\n![x](./attachments/x.png)");
        let warnings = lint(&note);
        assert!(warnings.iter().any(|w| w.message == C::WARN_LOCAL_MEDIA && w.blocking));
    }

    #[test]
    fn test_advisories_do_not_block() {
        let note = note_from(
            "---\ntitle: T\ndate: 2026-01-15\n---\n[this link text is far too many words](https://x.com)",
        );
        let warnings = lint(&note);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, C::WARN_LONG_LINK_TEXT);
        assert!(is_safe(&warnings));
    }

    #[test]
    fn test_broken_link_advisory() {
        let note = note_from("---\ntitle: T\ndate: 2026-01-15\n---\nSee []() for nothing.");
        let warnings = lint(&note);
        assert!(warnings.iter().any(|w| w.message == C::WARN_BROKEN_LINK && !w.blocking));
    }

    #[test]
    fn test_deterministic_order() {
        let text = "TODO and ![x](./a.png) with []() broken";
        let a = lint(&note_from(text));
        let b = lint(&note_from(text));
        assert_eq!(a, b);
        // No title, no date, TODO, local media, broken link — rule order
        let messages: Vec<&str> = a.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                C::WARN_NO_TITLE,
                C::WARN_NO_DATE,
                C::WARN_TODO_MARKERS,
                C::WARN_LOCAL_MEDIA,
                C::WARN_BROKEN_LINK,
            ]
        );
    }
}
