//! Shared helpers for pane rendering.

use ratatui::{
    style::Style,
    widgets::{Block, BorderType, Borders},
};

use super::theme::{COLOR_BORDER, COLOR_FOCUS};

/// Bordered block with a title; the border is brighter when focused.
pub fn pane<'a>(title: impl Into<String>, focused: bool) -> Block<'a> {
    let color = if focused { COLOR_FOCUS } else { COLOR_BORDER };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(color))
        .title(format!(" {} ", title.into()))
}

/// Keep the last `max` lines of `text`.
pub fn tail_lines(text: &str, max: usize) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let skip = lines.len().saturating_sub(max);
    lines.into_iter().skip(skip).collect()
}
