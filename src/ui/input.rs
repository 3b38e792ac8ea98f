//! Header, topic input and status bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::helpers::pane;
use super::theme::{
    notification_color, COLOR_ACCENT, COLOR_ACTIVE, COLOR_DIM, COLOR_FAIR, COLOR_GOOD,
};
use crate::app::Focus;
use crate::render::{ActionKind, ConvergenceBadge, UiState};

pub fn header_line(ui: &UiState, base_url: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            "encyclo",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {base_url}"), Style::default().fg(COLOR_DIM)),
    ];
    if let Some(kind) = ui.action() {
        let label = match kind {
            ActionKind::Start => "  Generating...",
            ActionKind::Continue => "  Revising...",
        };
        spans.push(Span::styled(label, Style::default().fg(COLOR_ACTIVE)));
    }
    Line::from(spans)
}

/// Notification if there is one, else key hints; then round counter and
/// convergence badge.
pub fn status_line(ui: &UiState, focus: Focus) -> Line<'static> {
    let mut spans = Vec::new();
    match ui.notification() {
        Some(notification) => spans.push(Span::styled(
            notification.message.clone(),
            Style::default().fg(notification_color(notification.level)),
        )),
        None => {
            let hints = match focus {
                Focus::Input => "Enter generate · Ctrl+R continue · Tab article · Ctrl+C quit",
                Focus::Article => "↑/↓ scroll · c continue · Tab input · q quit",
            };
            spans.push(Span::styled(hints, Style::default().fg(COLOR_DIM)));
        }
    }
    if let Some(counter) = ui.round_counter() {
        spans.push(Span::raw("  "));
        spans.push(Span::raw(counter.to_string()));
    }
    if let Some(badge) = ui.convergence_badge() {
        let color = match badge {
            ConvergenceBadge::Converged => COLOR_GOOD,
            ConvergenceBadge::MaxRoundsReached => COLOR_FAIR,
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{}]", badge.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

pub fn render_header(frame: &mut Frame, area: Rect, ui: &UiState, base_url: &str) {
    frame.render_widget(Paragraph::new(header_line(ui, base_url)), area);
}

pub fn render_input(frame: &mut Frame, area: Rect, input: &str, focused: bool) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(COLOR_DIM)),
        Span::raw(input.to_string()),
    ]))
    .block(pane("Topic", focused));
    frame.render_widget(paragraph, area);

    if focused {
        let typed = u16::try_from(input.width()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(3).saturating_add(typed);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

pub fn render_status(frame: &mut Frame, area: Rect, ui: &UiState, focus: Focus) {
    frame.render_widget(Paragraph::new(status_line(ui, focus)), area);
}
