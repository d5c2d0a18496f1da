//! Error types for the ritual engine.

use thiserror::Error;

use crate::machine::Rejection;

/// Result type for ritual operations.
pub type RitualResult<T> = Result<T, RitualError>;

/// Errors that can occur while driving a ritual.
#[derive(Debug, Error)]
pub enum RitualError {
    /// No catalog has been attached to the session.
    #[error("the deck is not ready yet: no card catalog loaded")]
    CatalogUnavailable,

    /// No topic has been chosen.
    #[error("choose a topic first (love, career, finance, health, growth, general)")]
    MissingTopic,

    /// The question is empty.
    #[error("ask a question first")]
    MissingQuestion,

    /// The action is not legal right now.
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// Slot number outside the spread.
    #[error("no card in slot {0}; choose 1, 2 or 3")]
    InvalidSlot(usize),

    /// The slot was already turned face up.
    #[error("slot {0} is already revealed")]
    AlreadyRevealed(usize),

    /// The slot no longer accepts reveals in this cycle.
    #[error("slot {0} can no longer be revealed")]
    SlotClosed(usize),

    /// Invalid choice or input.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// Unknown console command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Deck engine error.
    #[error("{0}")]
    Core(#[from] arcana_core::CoreError),
}
