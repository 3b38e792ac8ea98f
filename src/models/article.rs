use serde::{Deserialize, Serialize};

/// Per-criterion scores out of 10.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Scores {
    pub factual_accuracy: i64,
    pub completeness: i64,
    pub neutrality: i64,
    pub clarity: i64,
    pub structure: i64,
}

impl Scores {
    /// `(label, score)` pairs in display order.
    pub fn labelled(&self) -> [(&'static str, i64); 5] {
        [
            ("Accuracy", self.factual_accuracy),
            ("Completeness", self.completeness),
            ("Neutrality", self.neutrality),
            ("Clarity", self.clarity),
            ("Structure", self.structure),
        ]
    }
}

/// The critique of one draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Evaluation {
    pub scores: Scores,
    pub overall: f64,
    pub critical_issues: Vec<String>,
}

/// One completed generate/critique cycle, as carried by `round_complete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Round {
    pub number: u32,
    pub article: String,
    pub evaluation: Evaluation,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub revision_plan: String,
}

impl Round {
    /// Status line shown after the round lands, e.g.
    /// `Round 1 complete (score: 7.5)`.
    pub fn summary(&self) -> String {
        format!(
            "Round {} complete (score: {:.1})",
            self.number, self.evaluation.overall
        )
    }
}

/// Typed view of a terminal result.
///
/// Every field is optional on the wire; variants of the backend that skip the
/// critique loop simply leave `rounds` empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArticleState {
    pub topic: String,
    pub current_article: String,
    pub references: String,
    pub infobox: String,
    pub see_also: String,
    pub categories: String,
    pub rounds: Vec<Round>,
    pub converged: bool,
}
