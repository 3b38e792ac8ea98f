//! Metadata pane: infobox, references, see-also, categories, and the live
//! review channels.
//!
//! Each metadata channel is drawn from its structured shape when the payload
//! decodes, and as markdown otherwise.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::helpers::{pane, tail_lines};
use super::theme::{COLOR_ACCENT, COLOR_DIM};
use crate::dispatch::Channel;
use crate::markdown::render_markdown;
use crate::models::{Categories, Infobox, References, SeeAlso};
use crate::render::{Decoded, UiState};

/// Review channels shown while they stream, with the most recent lines kept.
const REVIEW_CHANNELS: [Channel; 4] = [
    Channel::Evaluation,
    Channel::RevisionPlan,
    Channel::Critique,
    Channel::FactCheck,
];
const REVIEW_TAIL: usize = 6;

fn heading(title: &str) -> Line<'static> {
    Line::styled(
        title.to_string(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )
}

fn section<T>(
    lines: &mut Vec<Line<'static>>,
    title: &str,
    view: Option<Decoded<T>>,
    structured: impl Fn(&T) -> Vec<Line<'static>>,
) {
    let Some(view) = view else {
        return;
    };
    if !lines.is_empty() {
        lines.push(Line::default());
    }
    lines.push(heading(title));
    match view {
        Decoded::Structured(value) => lines.extend(structured(&value)),
        Decoded::Raw(text) => lines.extend(render_markdown(&text)),
    }
}

pub fn infobox_lines(infobox: &Infobox) -> Vec<Line<'static>> {
    let width = infobox
        .rows
        .iter()
        .map(|row| row.field.width())
        .max()
        .unwrap_or(0);
    infobox
        .rows
        .iter()
        .map(|row| {
            let pad = " ".repeat(width - row.field.width());
            Line::from(vec![
                Span::styled(format!("{}{pad}  ", row.field), Style::default().fg(COLOR_DIM)),
                Span::raw(row.value.clone()),
            ])
        })
        .collect()
}

pub fn reference_lines(references: &References) -> Vec<Line<'static>> {
    references
        .references
        .iter()
        .enumerate()
        .map(|(i, reference)| Line::raw(format!("{}. {}", i + 1, reference.citation())))
        .collect()
}

pub fn see_also_lines(see_also: &SeeAlso) -> Vec<Line<'static>> {
    see_also
        .topics
        .iter()
        .map(|topic| Line::raw(format!("→ {topic}")))
        .collect()
}

pub fn category_lines(categories: &Categories) -> Vec<Line<'static>> {
    vec![Line::raw(categories.joined())]
}

pub fn metadata_lines(ui: &UiState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    section(&mut lines, "Infobox", ui.infobox(), infobox_lines);
    section(&mut lines, "References", ui.references(), reference_lines);
    section(&mut lines, "See also", ui.see_also(), see_also_lines);
    section(&mut lines, "Categories", ui.categories(), category_lines);

    if ui.is_loading() {
        for channel in REVIEW_CHANNELS {
            let text = ui.channel_text(channel);
            if text.trim().is_empty() {
                continue;
            }
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(heading(channel.label()));
            lines.extend(
                tail_lines(text, REVIEW_TAIL)
                    .into_iter()
                    .map(|line| Line::styled(line.to_string(), Style::default().fg(COLOR_DIM))),
            );
        }
    }
    lines
}

pub fn render_metadata(frame: &mut Frame, area: Rect, ui: &UiState) {
    let paragraph = Paragraph::new(metadata_lines(ui))
        .block(pane("Details", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
