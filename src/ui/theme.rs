//! Color theme constants for the encyclo UI.
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::render::{NotificationLevel, PhaseStatus, ScoreBand};

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused pane
pub const COLOR_FOCUS: Color = Color::White;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Active/running elements - bright green
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

pub const COLOR_GOOD: Color = Color::Rgb(4, 181, 117); // green #04B575
pub const COLOR_FAIR: Color = Color::Yellow;
pub const COLOR_POOR: Color = Color::Red;

pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Good => COLOR_GOOD,
        ScoreBand::Fair => COLOR_FAIR,
        ScoreBand::Poor => COLOR_POOR,
    }
}

pub fn score_style(score: f64) -> Style {
    Style::default().fg(band_color(ScoreBand::of(score)))
}

pub fn phase_style(status: PhaseStatus) -> Style {
    match status {
        PhaseStatus::Pending => Style::default().fg(COLOR_DIM),
        PhaseStatus::Active => Style::default()
            .fg(COLOR_ACTIVE)
            .add_modifier(Modifier::BOLD),
        PhaseStatus::Done => Style::default().fg(COLOR_ACCENT),
    }
}

pub fn notification_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => COLOR_ACCENT,
        NotificationLevel::Warning => COLOR_FAIR,
        NotificationLevel::Error => COLOR_POOR,
    }
}
