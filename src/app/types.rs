/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Topic input line
    #[default]
    Input,
    /// Article pane (scrolling)
    Article,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::Article,
            Focus::Article => Focus::Input,
        }
    }
}
