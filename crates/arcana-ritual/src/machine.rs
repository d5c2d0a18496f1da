//! The ritual phase machine.
//!
//! The machine is the only authority on which action is legal. Every phase
//! change goes through [`RitualMachine::fire`], which looks the trigger up in
//! a fixed transition table and checks the row's guards. Anything else is
//! rejected and leaves the phase untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "arcana::ritual";

/// Where a ritual currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RitualPhase {
    /// Nothing drawn yet.
    #[default]
    Initial,
    /// The shuffle is under way.
    Shuffling,
    /// Shuffled, waiting for the cut.
    Shuffled,
    /// The cut is under way.
    Cutting,
    /// The spread is laid face down; cards may be revealed.
    CutDone,
    /// Waiting for the concise interpretation.
    FetchingConcise,
    /// Concise interpretation received.
    ConciseDone,
    /// Waiting for the detailed advice.
    FetchingDetailed,
    /// Detailed advice received; the cycle is complete.
    DetailedDone,
    /// The cycle failed; only a fresh start is possible.
    Error,
}

impl RitualPhase {
    /// Whether a fresh ritual may begin from this phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Initial | Self::DetailedDone | Self::Error)
    }
}

impl fmt::Display for RitualPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initial => "initial",
            Self::Shuffling => "shuffling",
            Self::Shuffled => "shuffled",
            Self::Cutting => "cutting",
            Self::CutDone => "cut_done",
            Self::FetchingConcise => "fetching_concise",
            Self::ConciseDone => "concise_done",
            Self::FetchingDetailed => "fetching_detailed",
            Self::DetailedDone => "detailed_done",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Events that can move the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The user starts a new ritual.
    Start,
    /// The shuffle animation finished.
    ShuffleComplete,
    /// The user cuts the deck.
    Cut,
    /// The cut animation finished and the spread is drawn.
    CutComplete,
    /// The user turns a card of the spread face up.
    Reveal,
    /// The spread could not be drawn.
    DrawFailed,
    /// Every slot has been revealed.
    AllRevealed,
    /// The concise interpretation arrived.
    ConciseSucceeded,
    /// The concise interpretation failed.
    ConciseFailed,
    /// The user asks for detailed advice.
    RequestDetail,
    /// The detailed advice arrived.
    DetailedSucceeded,
    /// The detailed advice failed.
    DetailedFailed,
    /// The user walks away from the current cycle.
    Abandon,
}

impl Trigger {
    /// Every trigger, for exhaustive checks.
    pub const ALL: [Trigger; 13] = [
        Self::Start,
        Self::ShuffleComplete,
        Self::Cut,
        Self::CutComplete,
        Self::Reveal,
        Self::DrawFailed,
        Self::AllRevealed,
        Self::ConciseSucceeded,
        Self::ConciseFailed,
        Self::RequestDetail,
        Self::DetailedSucceeded,
        Self::DetailedFailed,
        Self::Abandon,
    ];
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Start => "start a ritual",
            Self::ShuffleComplete => "finish the shuffle",
            Self::Cut => "cut the deck",
            Self::CutComplete => "finish the cut",
            Self::Reveal => "reveal a card",
            Self::DrawFailed => "abort the draw",
            Self::AllRevealed => "request an interpretation",
            Self::ConciseSucceeded => "accept an interpretation",
            Self::ConciseFailed => "fail an interpretation",
            Self::RequestDetail => "request detailed advice",
            Self::DetailedSucceeded => "accept advice",
            Self::DetailedFailed => "fail advice",
            Self::Abandon => "abandon the ritual",
        };
        f.write_str(text)
    }
}

/// A condition a transition requires beyond being in the right phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// A card catalog is loaded.
    CatalogLoaded,
    /// A topic is selected.
    TopicChosen,
    /// The question is non-empty.
    QuestionAsked,
    /// The shuffled deck order is non-empty.
    DeckReady,
    /// Every slot of the spread is face up.
    AllRevealed,
    /// A concise interpretation is held.
    ConcisePresent,
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CatalogLoaded => "a loaded catalog",
            Self::TopicChosen => "a chosen topic",
            Self::QuestionAsked => "a question",
            Self::DeckReady => "a shuffled deck",
            Self::AllRevealed => "all cards revealed",
            Self::ConcisePresent => "a concise interpretation",
        };
        f.write_str(text)
    }
}

/// Snapshot of the facts guards are checked against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Guards {
    /// A catalog is attached.
    pub catalog_loaded: bool,
    /// A topic is selected.
    pub topic_chosen: bool,
    /// The question is non-empty.
    pub question_asked: bool,
    /// The deck order is non-empty.
    pub deck_ready: bool,
    /// Every slot is revealed.
    pub all_revealed: bool,
    /// A concise reading is stored.
    pub concise_present: bool,
}

impl Guards {
    /// Whether a single guard holds.
    pub fn holds(&self, guard: Guard) -> bool {
        match guard {
            Guard::CatalogLoaded => self.catalog_loaded,
            Guard::TopicChosen => self.topic_chosen,
            Guard::QuestionAsked => self.question_asked,
            Guard::DeckReady => self.deck_ready,
            Guard::AllRevealed => self.all_revealed,
            Guard::ConcisePresent => self.concise_present,
        }
    }
}

/// Why a trigger was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// No transition for this trigger from the current phase.
    #[error("cannot {trigger} while {phase}")]
    WrongPhase {
        /// Phase at the time of the trigger.
        phase: RitualPhase,
        /// The refused trigger.
        trigger: Trigger,
    },
    /// The transition exists but a guard does not hold.
    #[error("cannot {trigger} without {guard}")]
    GuardFailed {
        /// Phase at the time of the trigger.
        phase: RitualPhase,
        /// The refused trigger.
        trigger: Trigger,
        /// The first guard that failed.
        guard: Guard,
    },
}

const START_GUARDS: &[Guard] = &[Guard::CatalogLoaded, Guard::TopicChosen, Guard::QuestionAsked];
const REVEALED_GUARDS: &[Guard] = &[Guard::AllRevealed, Guard::TopicChosen, Guard::QuestionAsked];
const DETAIL_GUARDS: &[Guard] = &[Guard::ConcisePresent, Guard::TopicChosen, Guard::QuestionAsked];

/// The transition table: target phase and guards for a trigger, if any.
pub fn transition(from: RitualPhase, trigger: Trigger) -> Option<(RitualPhase, &'static [Guard])> {
    use RitualPhase as P;
    use Trigger as T;

    let row: (RitualPhase, &'static [Guard]) = match (from, trigger) {
        (P::Initial | P::DetailedDone | P::Error, T::Start) => (P::Shuffling, START_GUARDS),
        (P::Shuffling, T::ShuffleComplete) => (P::Shuffled, &[]),
        (P::Shuffled, T::Cut) => (P::Cutting, &[Guard::DeckReady]),
        (P::Cutting, T::CutComplete) => (P::CutDone, &[]),
        (P::Cutting, T::DrawFailed) => (P::Error, &[]),
        (P::CutDone, T::Reveal) => (P::CutDone, &[]),
        (P::CutDone, T::AllRevealed) => (P::FetchingConcise, REVEALED_GUARDS),
        (P::FetchingConcise, T::ConciseSucceeded) => (P::ConciseDone, &[]),
        (P::FetchingConcise, T::ConciseFailed) => (P::Error, &[]),
        (P::ConciseDone, T::RequestDetail) => (P::FetchingDetailed, DETAIL_GUARDS),
        (P::FetchingDetailed, T::DetailedSucceeded) => (P::DetailedDone, &[]),
        (P::FetchingDetailed, T::DetailedFailed) => (P::Error, &[]),
        (P::Shuffled | P::CutDone | P::ConciseDone, T::Abandon) => (P::Initial, &[]),
        _ => return None,
    };
    Some(row)
}

/// Holds the current phase and applies the transition table.
#[derive(Debug, Clone, Default)]
pub struct RitualMachine {
    phase: RitualPhase,
}

impl RitualMachine {
    /// A machine in the `Initial` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> RitualPhase {
        self.phase
    }

    /// Whether card reveals are accepted.
    pub fn accepts_reveal(&self) -> bool {
        transition(self.phase, Trigger::Reveal).is_some()
    }

    /// Check a trigger without firing it.
    pub fn check(&self, trigger: Trigger, guards: &Guards) -> Result<RitualPhase, Rejection> {
        let phase = self.phase;
        let (to, required) =
            transition(phase, trigger).ok_or(Rejection::WrongPhase { phase, trigger })?;
        if let Some(&guard) = required.iter().find(|&&g| !guards.holds(g)) {
            return Err(Rejection::GuardFailed {
                phase,
                trigger,
                guard,
            });
        }
        Ok(to)
    }

    /// Fire a trigger. On rejection the phase is unchanged.
    pub fn fire(&mut self, trigger: Trigger, guards: &Guards) -> Result<RitualPhase, Rejection> {
        match self.check(trigger, guards) {
            Ok(to) if to == self.phase => {
                tracing::debug!(target: LOG_TARGET, phase = %to, ?trigger, "trigger accepted");
                Ok(to)
            }
            Ok(to) => {
                tracing::info!(target: LOG_TARGET, from = %self.phase, to = %to, ?trigger, "phase change");
                self.phase = to;
                Ok(to)
            }
            Err(rejection) => {
                tracing::warn!(target: LOG_TARGET, phase = %self.phase, ?trigger, %rejection, "trigger rejected");
                Err(rejection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PHASES: [RitualPhase; 10] = [
        RitualPhase::Initial,
        RitualPhase::Shuffling,
        RitualPhase::Shuffled,
        RitualPhase::Cutting,
        RitualPhase::CutDone,
        RitualPhase::FetchingConcise,
        RitualPhase::ConciseDone,
        RitualPhase::FetchingDetailed,
        RitualPhase::DetailedDone,
        RitualPhase::Error,
    ];

    fn all_true() -> Guards {
        Guards {
            catalog_loaded: true,
            topic_chosen: true,
            question_asked: true,
            deck_ready: true,
            all_revealed: true,
            concise_present: true,
        }
    }

    fn machine_in(phase: RitualPhase) -> RitualMachine {
        RitualMachine { phase }
    }

    #[test]
    fn starts_initial() {
        let m = RitualMachine::new();
        assert_eq!(m.phase(), RitualPhase::Initial);
        assert!(!m.accepts_reveal());
    }

    #[test]
    fn happy_path() {
        let guards = all_true();
        let mut m = RitualMachine::new();
        let path = [
            (Trigger::Start, RitualPhase::Shuffling),
            (Trigger::ShuffleComplete, RitualPhase::Shuffled),
            (Trigger::Cut, RitualPhase::Cutting),
            (Trigger::CutComplete, RitualPhase::CutDone),
            (Trigger::Reveal, RitualPhase::CutDone),
            (Trigger::Reveal, RitualPhase::CutDone),
            (Trigger::Reveal, RitualPhase::CutDone),
            (Trigger::AllRevealed, RitualPhase::FetchingConcise),
            (Trigger::ConciseSucceeded, RitualPhase::ConciseDone),
            (Trigger::RequestDetail, RitualPhase::FetchingDetailed),
            (Trigger::DetailedSucceeded, RitualPhase::DetailedDone),
        ];
        for (trigger, expected) in path {
            assert_eq!(m.fire(trigger, &guards), Ok(expected));
        }
    }

    #[test]
    fn each_happy_path_phase_has_a_single_forward_trigger() {
        let guards = all_true();
        let forward = [
            (RitualPhase::Initial, Trigger::Start),
            (RitualPhase::Shuffling, Trigger::ShuffleComplete),
            (RitualPhase::Cutting, Trigger::CutComplete),
            (RitualPhase::FetchingConcise, Trigger::ConciseSucceeded),
            (RitualPhase::FetchingDetailed, Trigger::DetailedSucceeded),
        ];
        for (phase, only) in forward {
            let accepted: Vec<Trigger> = Trigger::ALL
                .into_iter()
                .filter(|&t| {
                    transition(phase, t).is_some_and(|(to, _)| to != RitualPhase::Error)
                        && machine_in(phase).check(t, &guards).is_ok()
                })
                .collect();
            assert_eq!(accepted, vec![only], "phase {phase}");
        }
    }

    #[test]
    fn unlisted_triggers_are_no_ops() {
        let guards = all_true();
        for phase in ALL_PHASES {
            for trigger in Trigger::ALL {
                if transition(phase, trigger).is_some() {
                    continue;
                }
                let mut m = machine_in(phase);
                assert_eq!(
                    m.fire(trigger, &guards),
                    Err(Rejection::WrongPhase { phase, trigger })
                );
                assert_eq!(m.phase(), phase);
            }
        }
    }

    #[test]
    fn start_guards() {
        let mut m = RitualMachine::new();
        let mut guards = all_true();
        guards.question_asked = false;
        assert_eq!(
            m.fire(Trigger::Start, &guards),
            Err(Rejection::GuardFailed {
                phase: RitualPhase::Initial,
                trigger: Trigger::Start,
                guard: Guard::QuestionAsked,
            })
        );
        assert_eq!(m.phase(), RitualPhase::Initial);

        guards.catalog_loaded = false;
        let err = m.fire(Trigger::Start, &guards).unwrap_err();
        assert!(matches!(
            err,
            Rejection::GuardFailed {
                guard: Guard::CatalogLoaded,
                ..
            }
        ));
    }

    #[test]
    fn restart_from_terminal_phases() {
        let guards = all_true();
        for phase in [RitualPhase::Error, RitualPhase::DetailedDone] {
            let mut m = machine_in(phase);
            assert_eq!(m.fire(Trigger::Start, &guards), Ok(RitualPhase::Shuffling));
        }
        let mut m = machine_in(RitualPhase::Cutting);
        assert!(m.fire(Trigger::Start, &guards).is_err());
    }

    #[test]
    fn fetch_failures_lead_to_error() {
        let guards = all_true();
        let mut m = machine_in(RitualPhase::FetchingConcise);
        assert_eq!(m.fire(Trigger::ConciseFailed, &guards), Ok(RitualPhase::Error));
        let mut m = machine_in(RitualPhase::FetchingDetailed);
        assert_eq!(m.fire(Trigger::DetailedFailed, &guards), Ok(RitualPhase::Error));
        let mut m = machine_in(RitualPhase::Cutting);
        assert_eq!(m.fire(Trigger::DrawFailed, &guards), Ok(RitualPhase::Error));
    }

    #[test]
    fn reveals_only_while_cut_done() {
        let guards = all_true();
        for phase in ALL_PHASES {
            let m = machine_in(phase);
            assert_eq!(m.accepts_reveal(), phase == RitualPhase::CutDone, "{phase}");
            assert_eq!(m.check(Trigger::Reveal, &guards).is_ok(), m.accepts_reveal());
        }
    }

    #[test]
    fn reentrant_cut_rejected() {
        let guards = all_true();
        let mut m = machine_in(RitualPhase::Cutting);
        assert!(m.fire(Trigger::Cut, &guards).is_err());
        assert_eq!(m.phase(), RitualPhase::Cutting);
    }

    #[test]
    fn detail_requires_concise() {
        let mut guards = all_true();
        guards.concise_present = false;
        let mut m = machine_in(RitualPhase::ConciseDone);
        assert!(m.fire(Trigger::RequestDetail, &guards).is_err());
        assert_eq!(m.phase(), RitualPhase::ConciseDone);
    }

    #[test]
    fn abandon_only_between_steps() {
        let guards = all_true();
        for phase in ALL_PHASES {
            let allowed = matches!(
                phase,
                RitualPhase::Shuffled | RitualPhase::CutDone | RitualPhase::ConciseDone
            );
            let mut m = machine_in(phase);
            assert_eq!(m.fire(Trigger::Abandon, &guards).is_ok(), allowed, "{phase}");
        }
    }

    #[test]
    fn terminal_flag_and_display() {
        assert!(RitualPhase::Error.is_terminal());
        assert!(!RitualPhase::ConciseDone.is_terminal());
        assert!(!RitualPhase::FetchingDetailed.is_terminal());
        assert_eq!(RitualPhase::CutDone.to_string(), "cut_done");
    }

    #[test]
    fn rejection_messages() {
        let wrong = Rejection::WrongPhase {
            phase: RitualPhase::Cutting,
            trigger: Trigger::Cut,
        };
        assert_eq!(wrong.to_string(), "cannot cut the deck while cutting");
        let guard = Rejection::GuardFailed {
            phase: RitualPhase::ConciseDone,
            trigger: Trigger::RequestDetail,
            guard: Guard::ConcisePresent,
        };
        assert_eq!(
            guard.to_string(),
            "cannot request detailed advice without a concise interpretation"
        );
    }
}
