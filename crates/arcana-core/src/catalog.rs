use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

const LOG_TARGET: &str = "arcana::catalog";

/// Identifier of a catalog card. Catalogs in the wild use either numbers or
/// strings, so both are accepted. Numbers keep their JSON form, so negative
/// and fractional ids survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    /// A numeric identifier.
    Number(serde_json::Number),
    /// A textual identifier.
    Text(String),
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One card as it appears in the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Catalog identifier.
    pub id: CardId,
    /// Display name, e.g. "The Tower".
    pub name: String,
    /// Image reference (path or URL).
    pub image: String,
    /// Keywords for the upright orientation.
    pub keywords_upright: Vec<String>,
    /// Keywords for the reversed orientation.
    pub keywords_reversed: Vec<String>,
    /// Meaning for the upright orientation.
    pub meaning_upright: String,
    /// Meaning for the reversed orientation.
    pub meaning_reversed: String,
}

impl CardRecord {
    fn incomplete_reason(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("missing name")
        } else if self.keywords_upright.is_empty() {
            Some("no upright keywords")
        } else if self.keywords_reversed.is_empty() {
            Some("no reversed keywords")
        } else if self.meaning_upright.trim().is_empty() {
            Some("no upright meaning")
        } else if self.meaning_reversed.trim().is_empty() {
            Some("no reversed meaning")
        } else {
            None
        }
    }
}

/// The immutable, non-empty list of cards a ritual draws from.
///
/// A `Catalog` can only be built through validation, so holding one means
/// every record carries both orientations.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<CardRecord>,
}

impl Catalog {
    /// Validate a list of records.
    pub fn from_records(cards: Vec<CardRecord>) -> CoreResult<Self> {
        if cards.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        for (index, card) in cards.iter().enumerate() {
            if let Some(reason) = card.incomplete_reason() {
                return Err(CoreError::IncompleteCard {
                    index,
                    name: card.name.clone(),
                    reason,
                });
            }
        }
        Ok(Self { cards })
    }

    /// Parse and validate a JSON array of records.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let cards: Vec<CardRecord> = serde_json::from_str(json)?;
        Self::from_records(cards)
    }

    /// Read, parse, and validate a catalog file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(
            target: LOG_TARGET,
            path = %path.display(),
            cards = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at a catalog index.
    pub fn get(&self, index: usize) -> Option<&CardRecord> {
        self.cards.get(index)
    }

    /// All cards in catalog order.
    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    /// Find a card by name (case-insensitive, exact).
    pub fn find_by_name(&self, name: &str) -> Option<&CardRecord> {
        let needle = name.trim().to_lowercase();
        self.cards.iter().find(|c| c.name.to_lowercase() == needle)
    }

    /// Cards whose name or keywords contain the query (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<&CardRecord> {
        let q = query.to_lowercase();
        self.cards
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&q)
                    || c.keywords_upright
                        .iter()
                        .chain(&c.keywords_reversed)
                        .any(|k| k.to_lowercase().contains(&q))
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: u64, name: &str) -> CardRecord {
        CardRecord {
            id: CardId::Number(id.into()),
            name: name.to_string(),
            image: format!("images/{id}.jpg"),
            keywords_upright: vec![format!("{name} up")],
            keywords_reversed: vec![format!("{name} down")],
            meaning_upright: format!("{name} upright meaning"),
            meaning_reversed: format!("{name} reversed meaning"),
        }
    }

    pub(crate) fn catalog_of(n: usize) -> Catalog {
        let cards = (0..n).map(|i| record(i as u64, &format!("Card {i}"))).collect();
        Catalog::from_records(cards).unwrap()
    }

    #[test]
    fn parses_json_array() {
        let json = r#"[
            {
                "id": 16,
                "name": "The Tower",
                "image": "images/tower.jpg",
                "keywords_upright": ["upheaval", "revelation"],
                "keywords_reversed": ["averted disaster"],
                "meaning_upright": "Sudden change.",
                "meaning_reversed": "Resisting change."
            },
            {
                "id": "star",
                "name": "The Star",
                "image": "images/star.jpg",
                "keywords_upright": ["hope"],
                "keywords_reversed": ["despair"],
                "meaning_upright": "Renewal.",
                "meaning_reversed": "Lost faith."
            }
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().id, CardId::Number(16.into()));
        assert_eq!(catalog.get(1).unwrap().id, CardId::Text("star".into()));
        assert_eq!(catalog.get(1).unwrap().id.to_string(), "star");
    }

    #[test]
    fn accepts_negative_and_fractional_ids() {
        let json = r#"[
            {"id": -1, "name": "The Fool", "image": "",
             "keywords_upright": ["leap"], "keywords_reversed": ["fall"],
             "meaning_upright": "Begin.", "meaning_reversed": "Hesitate."},
            {"id": 1.5, "name": "The Magician", "image": "",
             "keywords_upright": ["skill"], "keywords_reversed": ["trickery"],
             "meaning_upright": "Will.", "meaning_reversed": "Illusion."}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.get(0).unwrap().id.to_string(), "-1");
        assert_eq!(catalog.get(1).unwrap().id.to_string(), "1.5");
        assert!(matches!(catalog.get(1).unwrap().id, CardId::Number(_)));
    }

    #[test]
    fn rejects_empty_array() {
        assert!(matches!(
            Catalog::from_json("[]"),
            Err(CoreError::EmptyCatalog)
        ));
    }

    #[test]
    fn rejects_non_array() {
        assert!(matches!(
            Catalog::from_json(r#"{"cards": []}"#),
            Err(CoreError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_orientation() {
        let mut bad = record(1, "The Fool");
        bad.meaning_reversed = "  ".into();
        let err = Catalog::from_records(vec![record(0, "The Magician"), bad]).unwrap_err();
        match err {
            CoreError::IncompleteCard { index, reason, .. } => {
                assert_eq!(index, 1);
                assert_eq!(reason, "no reversed meaning");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/tarot-data.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read catalog"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let json = serde_json::to_string(catalog_of(4).cards()).unwrap();
        std::fs::write(&path, json).unwrap();
        assert_eq!(Catalog::load(&path).unwrap().len(), 4);
    }

    #[test]
    fn find_and_search() {
        let catalog = Catalog::from_records(vec![
            record(0, "The Fool"),
            record(1, "The Magician"),
            record(2, "The High Priestess"),
        ])
        .unwrap();
        assert_eq!(catalog.find_by_name("the fool").unwrap().id, CardId::Number(0.into()));
        assert!(catalog.find_by_name("Fool").is_none());
        assert_eq!(catalog.search("magic").len(), 1);
        assert_eq!(catalog.search("priestess down").len(), 1);
        assert_eq!(catalog.search("the").len(), 3);
    }
}
