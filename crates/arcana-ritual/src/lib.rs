//! The tarot ritual: phase machine, reveal coordination, and session.
//!
//! A [`RitualSession`] owns every piece of mutable ritual state (form
//! inputs, the current deck order, the spread, and the reading) and routes
//! each user action through the [`RitualMachine`], which decides whether the
//! action is legal in the current phase.

pub mod config;
pub mod console;
pub mod error;
pub mod journal;
pub mod machine;
pub mod reveal;
pub mod session;

pub use config::RitualConfig;
pub use error::{RitualError, RitualResult};
pub use machine::{Guard, Guards, Rejection, RitualMachine, RitualPhase, Trigger};
pub use reveal::RevealCoordinator;
pub use journal::{Journal, JournalEntry};
pub use session::{FollowUp, Outcome, Reading, RevealReport, RitualSession};
