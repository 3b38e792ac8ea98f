//! Sidebar: phase progress, round timeline and outline.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::helpers::pane;
use super::theme::{phase_style, score_style, COLOR_DIM, COLOR_POOR};
use crate::markdown::Heading;
use crate::models::Round;
use crate::render::{PhaseStatus, PhaseTracker, UiState};

pub fn phase_lines(phases: &PhaseTracker) -> Vec<Line<'static>> {
    phases
        .statuses()
        .map(|(phase, status)| {
            let icon = match status {
                PhaseStatus::Pending => "○",
                PhaseStatus::Active => "●",
                PhaseStatus::Done => "✓",
            };
            Line::styled(format!("{icon} {}", phase.label()), phase_style(status))
        })
        .collect()
}

/// One block per round: overall score, criterion scores, critical issues.
pub fn round_lines(rounds: &[Round]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for round in rounds {
        let overall = round.evaluation.overall;
        lines.push(Line::from(vec![
            Span::styled(
                format!("Round {}", round.number),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("{overall:.1}"), score_style(overall)),
        ]));
        for (label, score) in round.evaluation.scores.labelled() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {label:<13}"), Style::default().fg(COLOR_DIM)),
                Span::styled(score.to_string(), score_style(score as f64)),
            ]));
        }
        for issue in &round.evaluation.critical_issues {
            lines.push(Line::styled(
                format!("  ! {issue}"),
                Style::default().fg(COLOR_POOR),
            ));
        }
    }
    lines
}

pub fn outline_lines(outline: &[Heading]) -> Vec<Line<'static>> {
    outline
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
            Line::raw(format!("{indent}{}", heading.title))
        })
        .collect()
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui: &UiState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Percentage(50),
            Constraint::Min(3),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(phase_lines(ui.phases())).block(pane("Phases", false)),
        sections[0],
    );
    frame.render_widget(
        Paragraph::new(round_lines(ui.rounds()))
            .block(pane("Rounds", false))
            .wrap(Wrap { trim: false }),
        sections[1],
    );
    frame.render_widget(
        Paragraph::new(outline_lines(ui.outline()))
            .block(pane("Outline", false))
            .wrap(Wrap { trim: false }),
        sections[2],
    );
}
