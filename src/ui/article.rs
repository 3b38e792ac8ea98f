//! Article pane: the markdown of the current draft.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::helpers::pane;
use super::theme::COLOR_DIM;
use crate::markdown::render_markdown;
use crate::render::UiState;

pub fn article_lines(ui: &UiState) -> Vec<Line<'static>> {
    let markdown = ui.article_markdown();
    if !markdown.is_empty() {
        return render_markdown(markdown);
    }
    let hint = if ui.is_loading() {
        "Generating..."
    } else {
        "Type a topic below and press Enter."
    };
    vec![Line::styled(hint, Style::default().fg(COLOR_DIM))]
}

pub fn render_article(frame: &mut Frame, area: Rect, ui: &UiState, scroll: u16, focused: bool) {
    let title = if ui.topic().is_empty() {
        "Article".to_string()
    } else {
        ui.topic().to_string()
    };
    let paragraph = Paragraph::new(article_lines(ui))
        .block(pane(title, focused))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
