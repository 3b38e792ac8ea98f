//! Responsive layout: which panes fit side by side at the current size.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Terminal width breakpoints for responsive layouts
pub mod breakpoints {
    /// Below this the sidebar is hidden
    pub const NARROW_WIDTH: u16 = 80;
    /// At or above this the metadata column sits beside the article
    pub const WIDE_WIDTH: u16 = 140;
}

/// Height of the input box including borders
pub const INPUT_HEIGHT: u16 = 3;

/// The areas one frame is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub sidebar: Option<Rect>,
    pub article: Rect,
    pub metadata: Rect,
    pub input: Rect,
    pub status: Rect,
}

/// Layout context holding terminal dimensions for responsive calculations.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    pub width: u16,
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    /// Calculate a width as a percentage of terminal width, minimum 1.
    pub fn percent_width(&self, percentage: u16) -> u16 {
        ((self.width as u32 * percentage as u32) / 100).max(1) as u16
    }

    pub fn is_narrow(&self) -> bool {
        self.width < breakpoints::NARROW_WIDTH
    }

    pub fn is_wide(&self) -> bool {
        self.width >= breakpoints::WIDE_WIDTH
    }

    /// Split `area` into the panes.
    ///
    /// Wide terminals get three columns. Otherwise metadata is stacked below
    /// the article, and narrow terminals drop the sidebar.
    pub fn split(&self, area: Rect) -> Areas {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);
        let (header, body, input, status) = (rows[0], rows[1], rows[2], rows[3]);

        let (sidebar, main) = if self.is_narrow() {
            (None, body)
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(self.percent_width(25).max(24)),
                    Constraint::Min(20),
                ])
                .split(body);
            (Some(columns[0]), columns[1])
        };

        let (article, metadata) = if self.is_wide() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(main);
            (columns[0], columns[1])
        } else {
            let stacked = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(main);
            (stacked[0], stacked[1])
        };

        Areas {
            header,
            sidebar,
            article,
            metadata,
            input,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_hides_sidebar() {
        let area = Rect::new(0, 0, 60, 30);
        let areas = LayoutContext::from_rect(area).split(area);
        assert!(areas.sidebar.is_none());
        assert_eq!(areas.article.width, 60);
        assert!(areas.metadata.y > areas.article.y);
        assert_eq!(areas.input.height, INPUT_HEIGHT);
    }

    #[test]
    fn test_wide_has_three_columns() {
        let area = Rect::new(0, 0, 160, 40);
        let areas = LayoutContext::from_rect(area).split(area);
        let sidebar = areas.sidebar.unwrap();
        assert!(sidebar.x < areas.article.x);
        assert!(areas.article.x < areas.metadata.x);
        assert_eq!(areas.article.y, areas.metadata.y);
    }

    #[test]
    fn test_percent_width() {
        let ctx = LayoutContext::new(100, 40);
        assert_eq!(ctx.percent_width(25), 25);
        assert_eq!(LayoutContext::new(2, 1).percent_width(10), 1);
    }
}
