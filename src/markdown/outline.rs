//! Heading extraction for the article outline.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Deepest heading level listed in the outline.
pub const OUTLINE_MAX_LEVEL: u8 = 4;

/// One entry in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `#`, 2 for `##`, ...
    pub level: u8,
    /// Plain text of the heading, inline markup stripped
    pub title: String,
}

impl Heading {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }
}

/// Collect headings `h1` through `h4` in document order.
///
/// Partial markdown (mid-stream) is fine: an unterminated heading line is
/// still a heading.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut current: Option<(u8, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some((level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current.take() {
                    let title = title.trim();
                    if level <= OUTLINE_MAX_LEVEL && !title.is_empty() {
                        headings.push(Heading::new(level, title));
                    }
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, title)) = current.as_mut() {
                    title.push_str(&text);
                }
            }
            _ => {}
        }
    }

    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_levels_in_order() {
        let md = "# Rust\n\nIntro.\n\n## History\n\ntext\n\n### Early years\n\n## Design\n";
        assert_eq!(
            extract_headings(md),
            vec![
                Heading::new(1, "Rust"),
                Heading::new(2, "History"),
                Heading::new(3, "Early years"),
                Heading::new(2, "Design"),
            ]
        );
    }

    #[test]
    fn test_skips_deep_headings() {
        let md = "#### Four\n\n##### Five\n\n###### Six\n";
        assert_eq!(extract_headings(md), vec![Heading::new(4, "Four")]);
    }

    #[test]
    fn test_inline_markup_stripped() {
        let md = "## The *borrow* `checker`\n";
        assert_eq!(
            extract_headings(md),
            vec![Heading::new(2, "The borrow checker")]
        );
    }

    #[test]
    fn test_setext_headings() {
        let md = "Title\n=====\n\nSection\n-------\n";
        assert_eq!(
            extract_headings(md),
            vec![Heading::new(1, "Title"), Heading::new(2, "Section")]
        );
    }

    #[test]
    fn test_partial_stream() {
        assert_eq!(extract_headings("# Photosyn"), vec![Heading::new(1, "Photosyn")]);
        assert!(extract_headings("").is_empty());
        assert!(extract_headings("#").is_empty());
    }

    #[test]
    fn test_hash_in_code_block_ignored() {
        let md = "```\n# not a heading\n```\n";
        assert!(extract_headings(md).is_empty());
    }
}
