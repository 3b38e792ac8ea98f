//! Explicit phase state machine for the authoring workflow.
//!
//! Phases are driven by triggers derived from stream events rather than by
//! handlers poking at display state directly.

use std::collections::HashSet;

use crate::dispatch::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Generate,
    Evaluate,
    Plan,
    Revise,
    Critique,
    FactCheck,
    Metadata,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Generate,
        Phase::Evaluate,
        Phase::Plan,
        Phase::Revise,
        Phase::Critique,
        Phase::FactCheck,
        Phase::Metadata,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Generate => "Generate",
            Phase::Evaluate => "Evaluate",
            Phase::Plan => "Plan",
            Phase::Revise => "Revise",
            Phase::Critique => "Critique",
            Phase::FactCheck => "Fact-check",
            Phase::Metadata => "Metadata",
        }
    }

    fn index(self) -> usize {
        match self {
            Phase::Generate => 0,
            Phase::Evaluate => 1,
            Phase::Plan => 2,
            Phase::Revise => 3,
            Phase::Critique => 4,
            Phase::FactCheck => 5,
            Phase::Metadata => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhaseStatus {
    #[default]
    Pending,
    Active,
    Done,
}

/// Inputs to the phase table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTrigger {
    ActionStarted,
    /// First token of a channel since the action started or the last round
    /// completed
    FirstToken(Channel),
    RoundComplete,
    ArticleDone,
    Done,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseTracker {
    statuses: [PhaseStatus; 7],
    seen: HashSet<Channel>,
    revision_pending: bool,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, phase: Phase) -> PhaseStatus {
        self.statuses[phase.index()]
    }

    /// `(phase, status)` for every phase in display order.
    pub fn statuses(&self) -> impl Iterator<Item = (Phase, PhaseStatus)> + '_ {
        Phase::ALL.into_iter().map(|phase| (phase, self.status(phase)))
    }

    pub fn active(&self) -> Vec<Phase> {
        self.statuses()
            .filter(|(_, status)| *status == PhaseStatus::Active)
            .map(|(phase, _)| phase)
            .collect()
    }

    /// True between a completed round and the first article token of the
    /// revision that follows it.
    pub fn revision_pending(&self) -> bool {
        self.revision_pending
    }

    /// Record a token and apply `FirstToken` if it is the channel's first in
    /// the current round. Returns whether a trigger fired.
    pub fn observe_token(&mut self, channel: Channel) -> bool {
        if !self.seen.insert(channel) {
            return false;
        }
        self.apply(PhaseTrigger::FirstToken(channel));
        true
    }

    pub fn apply(&mut self, trigger: PhaseTrigger) {
        match trigger {
            PhaseTrigger::ActionStarted => {
                self.statuses = [PhaseStatus::Pending; 7];
                self.seen.clear();
                self.revision_pending = false;
                self.set(Phase::Generate, PhaseStatus::Active);
            }
            PhaseTrigger::FirstToken(channel) => self.first_token(channel),
            PhaseTrigger::RoundComplete => {
                self.set(Phase::Evaluate, PhaseStatus::Done);
                self.set(Phase::Plan, PhaseStatus::Done);
                self.set(Phase::Revise, PhaseStatus::Pending);
                self.seen.clear();
                self.revision_pending = true;
            }
            PhaseTrigger::ArticleDone => {
                self.finish_active();
                self.set(Phase::Metadata, PhaseStatus::Active);
            }
            PhaseTrigger::Done => {
                self.finish_active();
                self.set(Phase::Metadata, PhaseStatus::Done);
            }
        }
    }

    fn first_token(&mut self, channel: Channel) {
        match channel {
            Channel::Article => {
                if self.revision_pending {
                    self.revision_pending = false;
                    self.set(Phase::Revise, PhaseStatus::Active);
                }
            }
            Channel::Evaluation => {
                self.set(Phase::Generate, PhaseStatus::Done);
                if self.status(Phase::Revise) == PhaseStatus::Active {
                    self.set(Phase::Revise, PhaseStatus::Done);
                }
                self.set(Phase::Evaluate, PhaseStatus::Active);
            }
            Channel::RevisionPlan => {
                self.set(Phase::Evaluate, PhaseStatus::Done);
                self.set(Phase::Plan, PhaseStatus::Active);
            }
            Channel::Critique => {
                self.set(Phase::Generate, PhaseStatus::Done);
                self.set(Phase::Critique, PhaseStatus::Active);
            }
            Channel::FactCheck => {
                self.set(Phase::Generate, PhaseStatus::Done);
                self.set(Phase::FactCheck, PhaseStatus::Active);
            }
            Channel::References | Channel::Infobox | Channel::SeeAlso | Channel::Category => {
                if self.status(Phase::Metadata) == PhaseStatus::Pending {
                    self.set(Phase::Metadata, PhaseStatus::Active);
                }
            }
        }
    }

    fn finish_active(&mut self) {
        for status in self.statuses.iter_mut() {
            if *status == PhaseStatus::Active {
                *status = PhaseStatus::Done;
            }
        }
    }

    fn set(&mut self, phase: Phase, status: PhaseStatus) {
        self.statuses[phase.index()] = status;
    }
}
