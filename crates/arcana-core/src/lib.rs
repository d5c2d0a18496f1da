//! Core types for Arcana: the card catalog, the deck engine, and drawn cards.
//!
//! Everything here is free of I/O beyond reading a catalog file. Randomness is
//! always supplied by the caller, so a seeded RNG reproduces a ritual exactly.

/// Drawn cards, orientations, and spread positions.
pub mod card;
/// The immutable card catalog loaded from JSON.
pub mod catalog;
/// Shuffle, cut, and draw operations over deck orders.
pub mod deck;
/// Error types used throughout the crate.
pub mod error;
/// The enumerated set of reading topics.
pub mod topic;

/// Re-export card types.
pub use card::{CardFace, DrawnCard, Orientation, SpreadPosition};
/// Re-export catalog types.
pub use catalog::{CardId, CardRecord, Catalog};
/// Re-export deck engine entry points.
pub use deck::{
    CutMargin, SPREAD_SIZE, choose_cut_point, cut, draw_batch, identity, rotate, shuffle,
};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the topic enum.
pub use topic::Topic;
