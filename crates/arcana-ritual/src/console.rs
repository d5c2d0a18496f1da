//! Text commands for driving a session from a line-oriented console.

use std::thread;

use arcana_core::{SpreadPosition, Topic};
use arcana_oracle::Interpreter;

use crate::error::{RitualError, RitualResult};
use crate::journal::Journal;
use crate::session::{FollowUp, Outcome, RevealReport, RitualSession};

impl<I: Interpreter> RitualSession<I> {
    /// Process one line of console input and return the text to show.
    pub fn process(&mut self, input: &str) -> RitualResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "topic" => self.do_topic(rest),
            "question" | "ask" => self.do_question(rest),
            "start" | "draw" => self.do_start(),
            "cut" => self.do_cut(),
            "reveal" | "flip" => self.do_reveal(rest),
            "interpret" => self.do_interpret(),
            "advice" | "detail" => self.do_advice(),
            "spread" => self.do_spread(),
            "status" => self.do_status(),
            "journal" => self.do_journal_show(),
            "export" => self.do_journal_export(rest),
            "abandon" => {
                self.abandon()?;
                Ok("The cards are gathered back into the deck.".to_string())
            }
            "help" => Ok(help(rest).to_string()),
            "quit" | "q" => Ok("May the cards guide you.".to_string()),
            other => Err(RitualError::UnknownCommand(other.to_string())),
        }
    }

    fn do_topic(&mut self, rest: &str) -> RitualResult<String> {
        if rest.is_empty() {
            let names: Vec<&str> = Topic::ALL.iter().map(|t| t.as_str()).collect();
            return Ok(match self.topic() {
                Some(topic) => format!("Topic: {topic} (choose from {})", names.join(", ")),
                None => format!("No topic chosen. Choose from {}", names.join(", ")),
            });
        }
        let topic: Topic = rest.parse()?;
        self.set_topic(topic);
        Ok(format!("Topic: {topic}"))
    }

    fn do_question(&mut self, rest: &str) -> RitualResult<String> {
        if rest.is_empty() {
            return Err(RitualError::MissingQuestion);
        }
        self.set_question(rest);
        Ok(format!("Question: {}", self.question()))
    }

    fn do_start(&mut self) -> RitualResult<String> {
        self.start()?;
        thread::sleep(self.config().shuffle_delay);
        self.complete_shuffle()?;
        Ok(format!(
            "The deck of {} cards is shuffled. Type 'cut' when you are ready.",
            self.deck_order().len()
        ))
    }

    fn do_cut(&mut self) -> RitualResult<String> {
        self.cut()?;
        thread::sleep(self.config().cut_delay);
        self.complete_cut()?;
        Ok("The deck is cut and three cards lie face down:\n  \
            1. Past   2. Present   3. Future\n\
            Type 'reveal 1', 'reveal 2' or 'reveal 3'."
            .to_string())
    }

    fn do_reveal(&mut self, rest: &str) -> RitualResult<String> {
        let slot: usize = rest
            .parse()
            .map_err(|_| RitualError::InvalidChoice(format!("'{rest}' is not a slot, use 1, 2 or 3")))?;
        let index = slot.checked_sub(1).ok_or(RitualError::InvalidSlot(slot))?;
        if SpreadPosition::from_slot(index).is_none() {
            return Err(RitualError::InvalidSlot(slot));
        }
        let report = self.reveal(index)?;
        Ok(render_reveal(&report))
    }

    fn do_interpret(&mut self) -> RitualResult<String> {
        let outcome = self.interpret()?;
        Ok(render_concise(&outcome))
    }

    fn do_advice(&mut self) -> RitualResult<String> {
        let outcome = self.request_detail()?;
        Ok(match outcome {
            Outcome::Text(text) => format!("--- Advice ---\n{text}"),
            Outcome::Failed(message) => {
                format!("{message}\nType 'start' to begin a new ritual.")
            }
        })
    }

    fn do_spread(&self) -> RitualResult<String> {
        if !self.spread().is_bound() {
            return Ok("No cards are laid out.".to_string());
        }
        let lines: Vec<String> = self
            .spread()
            .slots()
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let position = slot.position();
                match slot.face() {
                    Some(face) => {
                        format!("{}. {position} ({}): {}", i + 1, position.theme(), face.title)
                    }
                    None => format!("{}. {position} ({}): face down", i + 1, position.theme()),
                }
            })
            .collect();
        let mut out = lines.join("\n");
        if self.accepts_reveal() && self.spread().remaining() > 0 {
            out.push_str("\nType 'reveal <1-3>' to turn a card face up.");
        }
        Ok(out)
    }

    fn do_status(&self) -> RitualResult<String> {
        let phase = self.phase();
        let mut out = if phase.is_terminal() {
            format!("Phase: {phase} (type 'start' for a new ritual)\n")
        } else {
            format!("Phase: {phase}\n")
        };
        match self.topic() {
            Some(topic) => out.push_str(&format!("Topic: {topic}\n")),
            None => out.push_str("Topic: none\n"),
        }
        if self.question().is_empty() {
            out.push_str("Question: none\n");
        } else {
            out.push_str(&format!("Question: {}\n", self.question()));
        }
        match self.catalog() {
            Some(catalog) => out.push_str(&format!("Catalog: {} cards\n", catalog.len())),
            None => out.push_str("Catalog: not loaded\n"),
        }
        if self.spread().is_bound() {
            out.push_str(&format!(
                "Face down: {} of 3\n",
                self.spread().remaining()
            ));
        }
        out.push_str(&format!("Rituals: {}\n", self.cycle()));
        out.push_str(&format!("Journal: {} entries", self.journal().len()));
        Ok(out)
    }

    fn do_journal_show(&self) -> RitualResult<String> {
        if self.journal().is_empty() {
            return Ok("Journal is empty.".to_string());
        }
        let entries = self.journal().entries();
        let start = entries.len().saturating_sub(10);
        let recent = &entries[start..];

        let mut out = format!(
            "Journal ({} entries, showing last {}):\n\n",
            entries.len(),
            recent.len()
        );
        let mut mini = Journal::new();
        for e in recent {
            mini.append(e.clone());
        }
        out.push_str(&mini.export_text());
        Ok(out.trim_end().to_string())
    }

    fn do_journal_export(&self, format: &str) -> RitualResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.journal().export_markdown()),
            "text" | "txt" => Ok(self.journal().export_text()),
            other => Err(RitualError::InvalidChoice(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }
}

fn render_reveal(report: &RevealReport) -> String {
    let mut out = match report.card.face() {
        Some(face) => format!(
            "{} ({}): {face}",
            report.position,
            report.position.theme()
        ),
        None => format!("{}: face down", report.position),
    };
    match &report.follow_up {
        FollowUp::AwaitingReveals(1) => out.push_str("\n\n1 card remains face down."),
        FollowUp::AwaitingReveals(n) => {
            out.push_str(&format!("\n\n{n} cards remain face down."));
        }
        FollowUp::Interpretation(outcome) => {
            out.push_str("\n\n");
            out.push_str(&render_concise(outcome));
        }
        FollowUp::Blocked(err) => {
            out.push_str(&format!(
                "\n\nAll cards are revealed, but the reading is on hold: {err}. \
                 Then type 'interpret'."
            ));
        }
    }
    out
}

fn render_concise(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Text(text) => {
            format!("--- Interpretation ---\n{text}\n\nType 'advice' for detailed advice.")
        }
        Outcome::Failed(message) => format!("{message}\nType 'start' to begin a new ritual."),
    }
}

fn help(topic: &str) -> &'static str {
    match topic.to_lowercase().as_str() {
        "ritual" | "reveal" | "cut" | "start" => {
            "\
Ritual Commands:
  start                         Shuffle the deck and begin a ritual
  cut                           Cut the deck and lay out the spread
  reveal <1-3>                  Turn a card face up (1 Past, 2 Present, 3 Future)
  spread                        Show the spread
  abandon                       Gather the cards and start over"
        }
        "reading" | "interpret" | "advice" => {
            "\
Reading Commands:
  interpret                     Request the reading once every card is revealed
  advice                        Request detailed advice after the reading

The reading is requested automatically when the last card is revealed.
If it fails, type 'start' to begin a new ritual."
        }
        "journal" | "export" => {
            "\
Journal Commands:
  journal                       Show recent entries
  export [markdown|text]        Export full journal"
        }
        _ => {
            "\
Tarot Ritual Commands:
  topic <name>                  Choose love, career, finance, health, growth or general
  question <text>               Ask your question
  start                         Shuffle the deck and begin a ritual
  cut                           Cut the deck and lay out the spread
  reveal <1-3>                  Turn a card face up
  interpret                     Request the reading once every card is revealed
  advice                        Request detailed advice after the reading
  spread                        Show the spread
  abandon                       Gather the cards and start over
  journal                       Show recent journal entries
  export [markdown|text]        Export full journal
  status                        Show the ritual state
  help [ritual|reading|journal] Show help
  quit                          Leave the session"
        }
    }
}
