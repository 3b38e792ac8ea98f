//! UI rendering for encyclo.
//!
//! One screen, drawn entirely from [`UiState`](crate::render::UiState):
//! - Header with backend address and action status
//! - Sidebar: phase progress, round timeline, outline (hidden when narrow)
//! - Article pane with rendered markdown
//! - Details pane: metadata sections and live review text
//! - Topic input and status bar
//!
//! Pane content is built by pure `*_lines` functions so it can be tested
//! without a terminal.

mod article;
mod helpers;
mod input;
mod layout;
mod metadata;
mod sidebar;
mod theme;

pub use layout::{breakpoints, Areas, LayoutContext};
pub use theme::{band_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_FAIR, COLOR_GOOD, COLOR_POOR};

use ratatui::Frame;

use crate::app::{App, Focus};
use crate::traits::HttpClient;

/// Draw the whole screen.
pub fn render<C: HttpClient + 'static>(frame: &mut Frame, app: &App<C>) {
    let area = frame.area();
    let areas = LayoutContext::from_rect(area).split(area);
    let ui = &app.ui;

    input::render_header(frame, areas.header, ui, app.base_url());
    if let Some(sidebar) = areas.sidebar {
        sidebar::render_sidebar(frame, sidebar, ui);
    }
    article::render_article(
        frame,
        areas.article,
        ui,
        app.article_scroll,
        app.focus == Focus::Article,
    );
    metadata::render_metadata(frame, areas.metadata, ui);
    input::render_input(frame, areas.input, &app.input, app.focus == Focus::Input);
    input::render_status(frame, areas.status, ui, app.focus);
}
