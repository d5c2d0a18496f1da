//! Wire payloads for the interpretation service.

use serde::{Deserialize, Serialize};

use arcana_core::{DrawnCard, Topic};

/// One drawn card as sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPayload {
    /// Card name.
    pub name: String,
    /// Whether the card was drawn reversed.
    #[serde(rename = "isReversed")]
    pub is_reversed: bool,
    /// Keywords for the drawn orientation.
    pub keywords: Vec<String>,
    /// Upright keywords.
    pub keywords_upright: Vec<String>,
    /// Reversed keywords.
    pub keywords_reversed: Vec<String>,
    /// Upright meaning.
    pub meaning_upright: String,
    /// Reversed meaning.
    pub meaning_reversed: String,
}

impl From<&DrawnCard> for CardPayload {
    fn from(card: &DrawnCard) -> Self {
        Self {
            name: card.name.clone(),
            is_reversed: card.is_reversed(),
            keywords: card.keywords.clone(),
            keywords_upright: card.keywords_upright.clone(),
            keywords_reversed: card.keywords_reversed.clone(),
            meaning_upright: card.meaning_upright.clone(),
            meaning_reversed: card.meaning_reversed.clone(),
        }
    }
}

/// Body of the concise interpretation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRequest {
    /// Selected topic.
    pub topic: Topic,
    /// The question as typed.
    pub question: String,
    /// The spread, in slot order.
    pub drawn_cards: Vec<CardPayload>,
}

impl ReadingRequest {
    /// Build a request from the form inputs and the drawn spread.
    pub fn new<'a>(
        topic: Topic,
        question: &str,
        cards: impl IntoIterator<Item = &'a DrawnCard>,
    ) -> Self {
        Self {
            topic,
            question: question.to_string(),
            drawn_cards: cards.into_iter().map(CardPayload::from).collect(),
        }
    }
}

/// A successful concise interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConciseReading {
    /// The interpretation text.
    pub interpretation: String,
}

/// Body of the detailed advice request: the reading plus its concise result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedRequest {
    /// The same fields as the concise request.
    #[serde(flatten)]
    pub reading: ReadingRequest,
    /// Text of the concise interpretation.
    pub concise_interpretation: String,
}

impl DetailedRequest {
    /// Chain a detailed request onto a completed concise stage.
    pub fn new(reading: ReadingRequest, concise: &ConciseReading) -> Self {
        Self {
            reading,
            concise_interpretation: concise.interpretation.clone(),
        }
    }
}

/// A successful detailed advice response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedAdvice {
    /// The advice text.
    pub advice: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::{CardId, CardRecord, Orientation};
    use serde_json::json;

    fn tower(orientation: Orientation) -> DrawnCard {
        let record = CardRecord {
            id: CardId::Number(16.into()),
            name: "The Tower".into(),
            image: "images/tower.jpg".into(),
            keywords_upright: vec!["upheaval".into()],
            keywords_reversed: vec!["averted disaster".into()],
            meaning_upright: "Sudden change.".into(),
            meaning_reversed: "Resisting change.".into(),
        };
        DrawnCard::new(&record, orientation)
    }

    #[test]
    fn concise_body_shape() {
        let cards = [tower(Orientation::Reversed)];
        let req = ReadingRequest::new(Topic::Career, "Will I get the promotion?", &cards);
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "topic": "career",
                "question": "Will I get the promotion?",
                "drawn_cards": [{
                    "name": "The Tower",
                    "isReversed": true,
                    "keywords": ["averted disaster"],
                    "keywords_upright": ["upheaval"],
                    "keywords_reversed": ["averted disaster"],
                    "meaning_upright": "Sudden change.",
                    "meaning_reversed": "Resisting change."
                }]
            })
        );
    }

    #[test]
    fn detailed_body_carries_concise_text() {
        let cards = [tower(Orientation::Upright)];
        let reading = ReadingRequest::new(Topic::Love, "Is it time?", &cards);
        let concise = ConciseReading {
            interpretation: "Change is coming.".into(),
        };
        let body = serde_json::to_value(DetailedRequest::new(reading, &concise)).unwrap();
        assert_eq!(body["topic"], "love");
        assert_eq!(body["drawn_cards"][0]["isReversed"], false);
        assert_eq!(body["concise_interpretation"], "Change is coming.");
    }

    #[test]
    fn responses_parse() {
        let concise: ConciseReading =
            serde_json::from_str(r#"{"interpretation": "Yes."}"#).unwrap();
        assert_eq!(concise.interpretation, "Yes.");
        let advice: DetailedAdvice = serde_json::from_str(r#"{"advice": "Wait."}"#).unwrap();
        assert_eq!(advice.advice, "Wait.");
    }
}
