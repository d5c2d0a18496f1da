//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arcana_core::{Orientation, SpreadPosition, Topic};

/// A single entry in the ritual journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A new ritual cycle began.
    RitualStarted {
        /// Cycle number within the session, starting at 1.
        cycle: u32,
        /// Topic of the reading.
        topic: Topic,
        /// The question asked.
        question: String,
        /// When the ritual started.
        timestamp: DateTime<Utc>,
    },
    /// The deck was shuffled.
    DeckShuffled {
        /// Number of cards in the deck.
        size: usize,
        /// When the shuffle settled.
        timestamp: DateTime<Utc>,
    },
    /// The deck was cut.
    DeckCut {
        /// Cut point, or `None` when the deck was too small to cut.
        point: Option<usize>,
        /// When the cut happened.
        timestamp: DateTime<Utc>,
    },
    /// A card of the spread was turned face up.
    CardRevealed {
        /// Position in the spread.
        position: SpreadPosition,
        /// Card name.
        name: String,
        /// Orientation drawn.
        orientation: Orientation,
        /// When revealed.
        timestamp: DateTime<Utc>,
    },
    /// The concise interpretation arrived.
    ConciseReceived {
        /// Interpretation text.
        text: String,
        /// When received.
        timestamp: DateTime<Utc>,
    },
    /// The detailed advice arrived.
    AdviceReceived {
        /// Advice text.
        text: String,
        /// When received.
        timestamp: DateTime<Utc>,
    },
    /// A step of the cycle failed.
    Failure {
        /// What was being attempted.
        stage: String,
        /// The error shown to the user.
        message: String,
        /// When it failed.
        timestamp: DateTime<Utc>,
    },
    /// The cycle was abandoned before completion.
    Abandoned {
        /// Cycle number.
        cycle: u32,
        /// When abandoned.
        timestamp: DateTime<Utc>,
    },
}
