use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading the catalog or working with a deck.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The catalog is not a JSON array of card records.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The catalog parsed but holds no cards.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// A record is missing one of its orientation variants.
    #[error("card #{index} ({name}) is incomplete: {reason}")]
    IncompleteCard {
        /// Position of the record in the catalog.
        index: usize,
        /// Card name as given in the record.
        name: String,
        /// Which field is missing.
        reason: &'static str,
    },

    /// The deck order holds fewer indices than the spread needs.
    #[error("deck too small: need {needed} cards, have {available}")]
    DeckTooSmall {
        /// Cards required by the spread.
        needed: usize,
        /// Cards available in the order.
        available: usize,
    },

    /// A deck order refers to a card outside the catalog.
    #[error("card index {index} out of bounds for catalog of {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Catalog size.
        len: usize,
    },

    /// A topic name that is not part of the enumerated set.
    #[error("unknown topic '{0}', expected one of: love, career, finance, health, growth, general")]
    UnknownTopic(String),
}
