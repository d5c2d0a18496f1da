//! Journal storage and export.

use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A chronological log of ritual events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Ritual Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::RitualStarted {
                    cycle,
                    topic,
                    question,
                    ..
                } => {
                    out.push_str(&format!("## Ritual {cycle}\n\n"));
                    out.push_str(&format!("**Topic**: {topic}\n"));
                    out.push_str(&format!("**Question**: {question}\n\n"));
                }
                JournalEntry::DeckShuffled { size, .. } => {
                    out.push_str(&format!("*Shuffled {size} cards*\n\n"));
                }
                JournalEntry::DeckCut { point, .. } => match point {
                    Some(p) => out.push_str(&format!("*Cut at card {p}*\n\n")),
                    None => out.push_str("*Deck too small to cut*\n\n"),
                },
                JournalEntry::CardRevealed {
                    position,
                    name,
                    orientation,
                    ..
                } => {
                    out.push_str(&format!("- **{position}**: {name} ({orientation})\n"));
                }
                JournalEntry::ConciseReceived { text, .. } => {
                    out.push_str(&format!("\n### Interpretation\n\n{text}\n\n"));
                }
                JournalEntry::AdviceReceived { text, .. } => {
                    out.push_str(&format!("### Advice\n\n{text}\n\n"));
                }
                JournalEntry::Failure { stage, message, .. } => {
                    out.push_str(&format!("\n> **{stage} failed**: {message}\n\n"));
                }
                JournalEntry::Abandoned { cycle, .. } => {
                    out.push_str(&format!("*Ritual {cycle} abandoned*\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Ritual Journal\n==============\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::RitualStarted {
                    cycle,
                    topic,
                    question,
                    timestamp,
                } => {
                    out.push_str(&format!(
                        "[{}] Ritual {cycle} ({topic}): {question}\n",
                        timestamp.format("%H:%M:%S")
                    ));
                }
                JournalEntry::DeckShuffled { size, .. } => {
                    out.push_str(&format!("  Shuffled {size} cards\n"));
                }
                JournalEntry::DeckCut { point, .. } => match point {
                    Some(p) => out.push_str(&format!("  Cut at card {p}\n")),
                    None => out.push_str("  Deck too small to cut\n"),
                },
                JournalEntry::CardRevealed {
                    position,
                    name,
                    orientation,
                    ..
                } => {
                    out.push_str(&format!("  {position}: {name} ({orientation})\n"));
                }
                JournalEntry::ConciseReceived { text, .. } => {
                    out.push_str(&format!("  Interpretation: {text}\n"));
                }
                JournalEntry::AdviceReceived { text, .. } => {
                    out.push_str(&format!("  Advice: {text}\n"));
                }
                JournalEntry::Failure { stage, message, .. } => {
                    out.push_str(&format!("  {stage} failed: {message}\n"));
                }
                JournalEntry::Abandoned { cycle, .. } => {
                    out.push_str(&format!("  Ritual {cycle} abandoned\n"));
                }
            }
        }
        out
    }
}
