/// Colour band for a 0-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    /// `>= 8` good, `>= 5` fair, otherwise poor.
    pub fn of(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::Good
        } else if score >= 5.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

/// Badge shown once the critique loop is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceBadge {
    Converged,
    MaxRoundsReached,
}

impl ConvergenceBadge {
    pub fn label(self) -> &'static str {
        match self {
            ConvergenceBadge::Converged => "Converged",
            ConvergenceBadge::MaxRoundsReached => "Max rounds reached",
        }
    }
}
