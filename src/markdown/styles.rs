//! Style constants for markdown rendering

use ratatui::style::{Color, Modifier, Style};

/// Style for code blocks - gray/dim color
pub const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::DarkGray);

/// Style for inline code - cyan color
pub const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

/// Style for links - blue and underlined
pub const STYLE_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);

/// Style for table borders
pub const STYLE_TABLE_BORDER: Style = Style::new().fg(Color::DarkGray);

/// Style for the first table row
pub const STYLE_TABLE_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Style for block quote text
pub const STYLE_QUOTE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC);

/// Heading style by level: the article title stands out, section headings
/// step down to plain bold.
pub fn heading_style(level: u8) -> Style {
    match level {
        1 => Style::new()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        3 => Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        _ => Style::new().add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_styles_step_down() {
        assert!(heading_style(1).add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(heading_style(2).fg, Some(Color::Cyan));
        assert_eq!(heading_style(3).fg, Some(Color::LightBlue));
        assert_eq!(heading_style(6).fg, None);
        assert!(heading_style(6).add_modifier.contains(Modifier::BOLD));
    }
}
