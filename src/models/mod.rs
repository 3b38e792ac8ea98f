//! Wire models for the authoring backend.

mod article;
mod metadata;
mod request;
mod terminal;

pub use article::{ArticleState, Evaluation, Round, Scores};
pub use metadata::{Categories, Infobox, InfoboxRow, Reference, References, SeeAlso};
pub use request::{normalize_max_rounds, StartRequest, DEFAULT_MAX_ROUNDS};
pub use terminal::TerminalResult;
