//! Incremental render sink: the state a view needs while a stream is in
//! flight, and the pure functions that derive what to draw from it.

mod buffers;
mod debounce;
mod decoded;
mod phase;
mod score;
mod state;

pub use buffers::ChannelBuffers;
pub use debounce::{Debounce, DEFAULT_OUTLINE_DEBOUNCE};
pub use decoded::{CategoriesView, Decoded, InfoboxView, ReferencesView, SeeAlsoView};
pub use phase::{Phase, PhaseStatus, PhaseTracker, PhaseTrigger};
pub use score::{ConvergenceBadge, ScoreBand};
pub use state::{ActionKind, Notification, NotificationLevel, UiState};
