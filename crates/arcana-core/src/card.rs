use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{CardId, CardRecord};

/// Which way up a drawn card landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Upright.
    Upright,
    /// Upside down.
    Reversed,
}

impl Orientation {
    /// Whether the card is reversed.
    pub fn is_reversed(self) -> bool {
        self == Self::Reversed
    }
}

impl From<bool> for Orientation {
    fn from(reversed: bool) -> Self {
        if reversed { Self::Reversed } else { Self::Upright }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upright => write!(f, "Upright"),
            Self::Reversed => write!(f, "Reversed"),
        }
    }
}

/// The three positions of the spread, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpreadPosition {
    /// What led here: background and causes.
    Past,
    /// The heart of the matter now.
    Present,
    /// Where things are heading.
    Future,
}

impl SpreadPosition {
    /// All positions in slot order.
    pub const ALL: [SpreadPosition; 3] = [Self::Past, Self::Present, Self::Future];

    /// Position of a zero-based slot index.
    pub fn from_slot(slot: usize) -> Option<Self> {
        Self::ALL.get(slot).copied()
    }

    /// Short description of what the position speaks to.
    pub fn theme(self) -> &'static str {
        match self {
            Self::Past => "background",
            Self::Present => "core",
            Self::Future => "outcome",
        }
    }
}

impl fmt::Display for SpreadPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Past => write!(f, "Past"),
            Self::Present => write!(f, "Present"),
            Self::Future => write!(f, "Future"),
        }
    }
}

/// A card drawn into the spread, with its orientation fixed at draw time.
///
/// The orientation-resolved `keywords` and `meaning` are what the reader sees;
/// the raw upright/reversed fields are kept so the interpretation service
/// gets the full picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnCard {
    /// Identifier of the catalog record this card came from.
    pub source_card_id: CardId,
    /// Card name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Orientation chosen at draw time.
    pub orientation: Orientation,
    /// Keywords for the drawn orientation.
    pub keywords: Vec<String>,
    /// Meaning for the drawn orientation.
    pub meaning: String,
    /// Upright keywords from the catalog.
    pub keywords_upright: Vec<String>,
    /// Reversed keywords from the catalog.
    pub keywords_reversed: Vec<String>,
    /// Upright meaning from the catalog.
    pub meaning_upright: String,
    /// Reversed meaning from the catalog.
    pub meaning_reversed: String,
    revealed: bool,
}

impl DrawnCard {
    /// Draw a catalog record in the given orientation, face down.
    pub fn new(record: &CardRecord, orientation: Orientation) -> Self {
        let (keywords, meaning) = match orientation {
            Orientation::Upright => (&record.keywords_upright, &record.meaning_upright),
            Orientation::Reversed => (&record.keywords_reversed, &record.meaning_reversed),
        };
        Self {
            source_card_id: record.id.clone(),
            name: record.name.clone(),
            image: record.image.clone(),
            orientation,
            keywords: keywords.clone(),
            meaning: meaning.clone(),
            keywords_upright: record.keywords_upright.clone(),
            keywords_reversed: record.keywords_reversed.clone(),
            meaning_upright: record.meaning_upright.clone(),
            meaning_reversed: record.meaning_reversed.clone(),
            revealed: false,
        }
    }

    /// Whether the card is reversed.
    pub fn is_reversed(&self) -> bool {
        self.orientation.is_reversed()
    }

    /// Whether the card has been turned face up.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Turn the card face up. Returns `false` if it already was.
    pub fn reveal(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    /// The face shown to the reader, available once revealed.
    pub fn face(&self) -> Option<CardFace> {
        self.revealed.then(|| CardFace {
            title: format!("{} ({})", self.name, self.orientation),
            image: self.image.clone(),
            keywords: self.keywords.clone(),
            meaning: self.meaning.clone(),
        })
    }
}

/// Display fields of a revealed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    /// Name with orientation, e.g. "The Tower (Reversed)".
    pub title: String,
    /// Image reference.
    pub image: String,
    /// Keywords for the drawn orientation.
    pub keywords: Vec<String>,
    /// Meaning for the drawn orientation.
    pub meaning: String,
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n  Keywords: {}\n  Meaning: {}",
            self.title,
            self.keywords.join(", "),
            self.meaning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::record;

    #[test]
    fn upright_resolves_upright_fields() {
        let card = DrawnCard::new(&record(0, "The Sun"), Orientation::Upright);
        assert!(!card.is_reversed());
        assert_eq!(card.keywords, vec!["The Sun up"]);
        assert_eq!(card.meaning, "The Sun upright meaning");
        assert_eq!(card.keywords_reversed, vec!["The Sun down"]);
    }

    #[test]
    fn reversed_resolves_reversed_fields() {
        let card = DrawnCard::new(&record(0, "The Moon"), Orientation::Reversed);
        assert!(card.is_reversed());
        assert_eq!(card.keywords, vec!["The Moon down"]);
        assert_eq!(card.meaning, "The Moon reversed meaning");
        assert_eq!(card.meaning_upright, "The Moon upright meaning");
    }

    #[test]
    fn reveal_is_one_time() {
        let mut card = DrawnCard::new(&record(3, "The Empress"), Orientation::Upright);
        assert!(card.face().is_none());
        assert!(card.reveal());
        let face = card.face().unwrap();
        assert_eq!(face.title, "The Empress (Upright)");
        assert!(!card.reveal());
        assert_eq!(card.face().unwrap(), face);
    }

    #[test]
    fn positions_follow_slot_order() {
        assert_eq!(SpreadPosition::from_slot(0), Some(SpreadPosition::Past));
        assert_eq!(SpreadPosition::from_slot(2), Some(SpreadPosition::Future));
        assert_eq!(SpreadPosition::from_slot(3), None);
        assert_eq!(SpreadPosition::Present.theme(), "core");
    }

    #[test]
    fn orientation_from_bool() {
        assert_eq!(Orientation::from(true), Orientation::Reversed);
        assert_eq!(Orientation::from(false).to_string(), "Upright");
    }
}
