//! The ritual session: one context object that owns every piece of mutable
//! ritual state and routes each user action through the phase machine.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use arcana_core::{
    Catalog, DrawnCard, SPREAD_SIZE, SpreadPosition, Topic, deck, draw_batch, identity, shuffle,
};
use arcana_oracle::{ConciseReading, DetailedRequest, Interpreter, ReadingRequest};

use crate::config::RitualConfig;
use crate::error::{RitualError, RitualResult};
use crate::journal::{Journal, JournalEntry};
use crate::machine::{Guard, Guards, Rejection, RitualMachine, RitualPhase, Trigger};
use crate::reveal::RevealCoordinator;

const LOG_TARGET: &str = "arcana::session";

/// Result of one interpretation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The service answered with this text.
    Text(String),
    /// The stage failed; the message is meant for the user.
    Failed(String),
}

impl Outcome {
    /// The text, whichever way it went.
    pub fn message(&self) -> &str {
        match self {
            Self::Text(text) | Self::Failed(text) => text,
        }
    }

    /// Whether the stage failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What the reading area shows for the current cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reading {
    /// The concise interpretation, once requested.
    pub concise: Option<Outcome>,
    /// The detailed advice, once requested.
    pub detailed: Option<Outcome>,
}

/// What happened after a reveal.
#[derive(Debug)]
pub enum FollowUp {
    /// This many cards are still face down.
    AwaitingReveals(usize),
    /// The spread is complete and the concise stage ran.
    Interpretation(Outcome),
    /// The spread is complete but the interpretation could not be requested.
    Blocked(RitualError),
}

/// The result of revealing one slot.
#[derive(Debug)]
pub struct RevealReport {
    /// One-based slot number.
    pub slot: usize,
    /// Spread position of the slot.
    pub position: SpreadPosition,
    /// The card, now face up.
    pub card: DrawnCard,
    /// What the reveal led to.
    pub follow_up: FollowUp,
}

/// A ritual session against one interpreter.
///
/// The form inputs (catalog, topic, question) persist across cycles. The deck
/// order, spread, and reading belong to a single cycle and are cleared on
/// every fresh start.
pub struct RitualSession<I> {
    interpreter: I,
    config: RitualConfig,
    catalog: Option<Catalog>,
    topic: Option<Topic>,
    question: String,
    machine: RitualMachine,
    deck: Vec<usize>,
    spread: RevealCoordinator,
    concise: Option<ConciseReading>,
    reading: Reading,
    cycle: u32,
    journal: Journal,
    rng: StdRng,
}

impl<I: Interpreter> RitualSession<I> {
    /// Create a session with no catalog and empty inputs.
    pub fn new(interpreter: I, config: RitualConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            interpreter,
            config,
            catalog: None,
            topic: None,
            question: String::new(),
            machine: RitualMachine::new(),
            deck: Vec::new(),
            spread: RevealCoordinator::default(),
            concise: None,
            reading: Reading::default(),
            cycle: 0,
            journal: Journal::new(),
            rng,
        }
    }

    /// Attach a catalog, builder style.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.attach_catalog(catalog);
        self
    }

    /// Attach or replace the catalog. Takes effect on the next shuffle.
    pub fn attach_catalog(&mut self, catalog: Catalog) {
        tracing::debug!(target: LOG_TARGET, cards = catalog.len(), "catalog attached");
        self.catalog = Some(catalog);
    }

    /// Select the topic.
    pub fn set_topic(&mut self, topic: Topic) {
        self.topic = Some(topic);
    }

    /// Set the question. Surrounding whitespace is dropped.
    pub fn set_question(&mut self, question: &str) {
        self.question = question.trim().to_string();
    }

    /// Clear the question.
    pub fn clear_question(&mut self) {
        self.question.clear();
    }

    // --- Ritual steps ---

    /// Begin a fresh cycle. Clears the previous deck, spread, and reading.
    pub fn start(&mut self) -> RitualResult<()> {
        self.fire(Trigger::Start)?;
        self.reset_cycle();
        self.cycle += 1;
        if let Some(topic) = self.topic {
            self.journal.append(JournalEntry::RitualStarted {
                cycle: self.cycle,
                topic,
                question: self.question.clone(),
                timestamp: Utc::now(),
            });
        }
        tracing::info!(target: LOG_TARGET, cycle = self.cycle, "ritual started");
        Ok(())
    }

    /// The shuffle settled: lay out a freshly shuffled deck.
    pub fn complete_shuffle(&mut self) -> RitualResult<()> {
        self.fire(Trigger::ShuffleComplete)?;
        let len = self.catalog.as_ref().map_or(0, Catalog::len);
        self.deck = shuffle(identity(len), &mut self.rng);
        self.journal.append(JournalEntry::DeckShuffled {
            size: len,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Cut the shuffled deck.
    pub fn cut(&mut self) -> RitualResult<()> {
        self.fire(Trigger::Cut)?;
        Ok(())
    }

    /// The cut settled: rotate the deck and draw the spread.
    ///
    /// If the spread cannot be drawn the cycle moves to the error phase and
    /// the draw error is returned.
    pub fn complete_cut(&mut self) -> RitualResult<()> {
        self.check(Trigger::CutComplete)?;
        let (order, point) = deck::cut(
            std::mem::take(&mut self.deck),
            self.config.cut_margin,
            &mut self.rng,
        );
        self.deck = order;
        self.journal.append(JournalEntry::DeckCut {
            point,
            timestamp: Utc::now(),
        });

        let drawn = self
            .draw_spread()
            .and_then(|cards| RevealCoordinator::bind(cards).map_err(RitualError::from));
        match drawn {
            Ok(spread) => {
                self.spread = spread;
                self.fire(Trigger::CutComplete)?;
                Ok(())
            }
            Err(err) => {
                self.fire(Trigger::DrawFailed)?;
                self.record_failure("draw", &err.to_string());
                Err(err)
            }
        }
    }

    fn draw_spread(&mut self) -> RitualResult<Vec<DrawnCard>> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or(RitualError::CatalogUnavailable)?;
        Ok(draw_batch(&self.deck, SPREAD_SIZE, catalog, &mut self.rng)?)
    }

    /// Reveal a zero-based slot of the spread.
    ///
    /// Revealing the last face-down card requests the concise interpretation
    /// in the same call. If the topic or question went missing in the
    /// meantime the card stays revealed and the request is blocked until
    /// [`RitualSession::interpret`] is called.
    pub fn reveal(&mut self, index: usize) -> RitualResult<RevealReport> {
        self.fire(Trigger::Reveal)?;
        let slot = self.spread.reveal(index)?;
        let position = slot.position();
        let card = slot.card().clone();
        self.journal.append(JournalEntry::CardRevealed {
            position,
            name: card.name.clone(),
            orientation: card.orientation,
            timestamp: Utc::now(),
        });

        let follow_up = if self.spread.all_revealed() {
            match self.interpret() {
                Ok(outcome) => FollowUp::Interpretation(outcome),
                Err(err) => FollowUp::Blocked(err),
            }
        } else {
            FollowUp::AwaitingReveals(self.spread.remaining())
        };
        Ok(RevealReport {
            slot: index + 1,
            position,
            card,
            follow_up,
        })
    }

    /// Request the concise interpretation of a fully revealed spread.
    ///
    /// A service failure is not an error here: the cycle moves to the error
    /// phase and the failure comes back as [`Outcome::Failed`].
    pub fn interpret(&mut self) -> RitualResult<Outcome> {
        self.check(Trigger::AllRevealed)?;
        let request = self.reading_request()?;
        self.fire(Trigger::AllRevealed)?;

        let outcome = match self.interpreter.concise(&request) {
            Ok(reading) => {
                self.fire(Trigger::ConciseSucceeded)?;
                self.journal.append(JournalEntry::ConciseReceived {
                    text: reading.interpretation.clone(),
                    timestamp: Utc::now(),
                });
                let outcome = Outcome::Text(reading.interpretation.clone());
                self.concise = Some(reading);
                outcome
            }
            Err(err) => {
                self.fire(Trigger::ConciseFailed)?;
                let message = format!("Failed to get the interpretation: {err}");
                self.record_failure("interpretation", &message);
                Outcome::Failed(message)
            }
        };
        self.reading.concise = Some(outcome.clone());
        Ok(outcome)
    }

    /// Request detailed advice building on the concise interpretation.
    pub fn request_detail(&mut self) -> RitualResult<Outcome> {
        self.check(Trigger::RequestDetail)?;
        let reading = self.reading_request()?;
        let concise = self.concise.as_ref().ok_or_else(|| {
            RitualError::Rejected(Rejection::GuardFailed {
                phase: self.phase(),
                trigger: Trigger::RequestDetail,
                guard: Guard::ConcisePresent,
            })
        })?;
        let request = DetailedRequest::new(reading, concise);
        self.fire(Trigger::RequestDetail)?;

        let outcome = match self.interpreter.detailed(&request) {
            Ok(advice) => {
                self.fire(Trigger::DetailedSucceeded)?;
                self.journal.append(JournalEntry::AdviceReceived {
                    text: advice.advice.clone(),
                    timestamp: Utc::now(),
                });
                Outcome::Text(advice.advice)
            }
            Err(err) => {
                self.fire(Trigger::DetailedFailed)?;
                let message = format!("Failed to get detailed advice: {err}");
                self.record_failure("advice", &message);
                Outcome::Failed(message)
            }
        };
        self.reading.detailed = Some(outcome.clone());
        Ok(outcome)
    }

    /// Walk away from the current cycle between steps.
    pub fn abandon(&mut self) -> RitualResult<()> {
        self.fire(Trigger::Abandon)?;
        self.reset_cycle();
        self.journal.append(JournalEntry::Abandoned {
            cycle: self.cycle,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    // --- Accessors ---

    /// Current phase.
    pub fn phase(&self) -> RitualPhase {
        self.machine.phase()
    }

    /// The attached catalog, if any.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// The selected topic.
    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    /// The current question.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The deck order of this cycle, as catalog indices.
    pub fn deck_order(&self) -> &[usize] {
        &self.deck
    }

    /// The spread of this cycle.
    pub fn spread(&self) -> &RevealCoordinator {
        &self.spread
    }

    /// The reading of this cycle.
    pub fn reading(&self) -> &Reading {
        &self.reading
    }

    /// Whether cards of the spread may be revealed right now.
    pub fn accepts_reveal(&self) -> bool {
        self.machine.accepts_reveal()
    }

    /// Whether detailed advice may be requested right now.
    pub fn detail_available(&self) -> bool {
        self.machine
            .check(Trigger::RequestDetail, &self.guards())
            .is_ok()
    }

    /// Number of cycles started so far.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The session configuration.
    pub fn config(&self) -> &RitualConfig {
        &self.config
    }

    /// The interpreter.
    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    // --- Internals ---

    fn guards(&self) -> Guards {
        Guards {
            catalog_loaded: self.catalog.is_some(),
            topic_chosen: self.topic.is_some(),
            question_asked: !self.question.is_empty(),
            deck_ready: !self.deck.is_empty(),
            all_revealed: self.spread.all_revealed(),
            concise_present: self.concise.is_some(),
        }
    }

    fn check(&self, trigger: Trigger) -> RitualResult<RitualPhase> {
        self.machine
            .check(trigger, &self.guards())
            .map_err(rejection_error)
    }

    fn fire(&mut self, trigger: Trigger) -> RitualResult<RitualPhase> {
        let guards = self.guards();
        let to = self
            .machine
            .fire(trigger, &guards)
            .map_err(rejection_error)?;
        if to != RitualPhase::CutDone {
            self.spread.disarm();
        }
        Ok(to)
    }

    fn reading_request(&self) -> RitualResult<ReadingRequest> {
        let topic = self.topic.ok_or(RitualError::MissingTopic)?;
        if self.question.is_empty() {
            return Err(RitualError::MissingQuestion);
        }
        Ok(ReadingRequest::new(topic, &self.question, self.spread.cards()))
    }

    fn reset_cycle(&mut self) {
        self.deck.clear();
        self.spread = RevealCoordinator::default();
        self.concise = None;
        self.reading = Reading::default();
    }

    fn record_failure(&mut self, stage: &str, message: &str) {
        tracing::warn!(target: LOG_TARGET, stage, %message, "ritual step failed");
        self.journal.append(JournalEntry::Failure {
            stage: stage.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }
}

/// Missing form inputs get their own errors; everything else is a plain
/// rejection.
fn rejection_error(rejection: Rejection) -> RitualError {
    match rejection {
        Rejection::GuardFailed {
            guard: Guard::CatalogLoaded,
            ..
        } => RitualError::CatalogUnavailable,
        Rejection::GuardFailed {
            guard: Guard::TopicChosen,
            ..
        } => RitualError::MissingTopic,
        Rejection::GuardFailed {
            guard: Guard::QuestionAsked,
            ..
        } => RitualError::MissingQuestion,
        other => RitualError::Rejected(other),
    }
}
