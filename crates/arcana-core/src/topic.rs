use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The area of life a reading is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Romance and partnership.
    Love,
    /// Work and vocation.
    Career,
    /// Money and resources.
    Finance,
    /// Body and wellbeing.
    Health,
    /// Personal growth.
    Growth,
    /// No particular focus.
    General,
}

impl Topic {
    /// All topics, in menu order.
    pub const ALL: [Topic; 6] = [
        Self::Love,
        Self::Career,
        Self::Finance,
        Self::Health,
        Self::Growth,
        Self::General,
    ];

    /// The lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Career => "career",
            Self::Finance => "finance",
            Self::Health => "health",
            Self::Growth => "growth",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| CoreError::UnknownTopic(s.trim().to_string()))
    }
}
