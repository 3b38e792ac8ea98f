use std::fmt;

/// A named token stream multiplexed into the response body.
///
/// Each channel carries JSON-string fragments that the caller concatenates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Article,
    Evaluation,
    RevisionPlan,
    References,
    Infobox,
    SeeAlso,
    Category,
    FactCheck,
    Critique,
}

impl Channel {
    pub const ALL: [Channel; 9] = [
        Channel::Article,
        Channel::Evaluation,
        Channel::RevisionPlan,
        Channel::References,
        Channel::Infobox,
        Channel::SeeAlso,
        Channel::Category,
        Channel::FactCheck,
        Channel::Critique,
    ];

    /// The `event:` name this channel arrives under.
    pub fn event_name(self) -> &'static str {
        match self {
            Channel::Article => "article_token",
            Channel::Evaluation => "evaluation_token",
            Channel::RevisionPlan => "revision_plan_token",
            Channel::References => "references_token",
            Channel::Infobox => "infobox_token",
            Channel::SeeAlso => "seealso_token",
            Channel::Category => "category_token",
            Channel::FactCheck => "factcheck_token",
            Channel::Critique => "critique_token",
        }
    }

    pub fn from_event_name(name: &str) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.event_name() == name)
    }

    /// Human-readable name used in panel titles and logs.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Article => "Article",
            Channel::Evaluation => "Evaluation",
            Channel::RevisionPlan => "Revision plan",
            Channel::References => "References",
            Channel::Infobox => "Infobox",
            Channel::SeeAlso => "See also",
            Channel::Category => "Categories",
            Channel::FactCheck => "Fact check",
            Channel::Critique => "Critique",
        }
    }

    /// Channels rendered as document metadata rather than process output.
    pub fn is_metadata(self) -> bool {
        matches!(
            self,
            Channel::References | Channel::Infobox | Channel::SeeAlso | Channel::Category
        )
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
