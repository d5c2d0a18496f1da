use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use tracing::{debug, info};

use arcana_core::Topic;
use arcana_oracle::{HttpInterpreter, OracleConfig};
use arcana_ritual::{RitualConfig, RitualSession};

use super::LOG_TARGET;

/// Options for the interactive console.
pub struct RitualArgs<'a> {
    pub catalog: &'a Path,
    pub topic: Option<&'a str>,
    pub question: Option<&'a str>,
    pub endpoint: &'a str,
    pub concise_url: Option<&'a str>,
    pub detailed_url: Option<&'a str>,
    pub seed: Option<u64>,
    pub fast: bool,
    pub timeout_ms: u64,
}

pub fn run(args: RitualArgs<'_>) -> Result<(), String> {
    let catalog = super::load_catalog(args.catalog)?;

    let mut oracle = OracleConfig::from_base(args.endpoint)
        .with_timeout(Duration::from_millis(args.timeout_ms));
    if let Some(url) = args.concise_url {
        oracle = oracle.with_concise_url(url);
    }
    if let Some(url) = args.detailed_url {
        oracle = oracle.with_detailed_url(url);
    }
    let interpreter =
        HttpInterpreter::new(oracle).map_err(|e| format!("failed to start session: {e}"))?;

    let mut config = RitualConfig::default();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.fast {
        config = config.without_delays();
    }

    let mut session = RitualSession::new(interpreter, config).with_catalog(catalog);
    if let Some(topic) = args.topic {
        let topic: Topic = topic.parse().map_err(|e| format!("{e}"))?;
        session.set_topic(topic);
    }
    if let Some(question) = args.question {
        session.set_question(question);
    }

    let cards = session.catalog().map_or(0, |c| c.len());
    let service = session.interpreter().config();
    info!(
        target: LOG_TARGET,
        catalog = %args.catalog.display(),
        concise = %service.concise_url,
        detailed = %service.detailed_url,
        "ritual console started"
    );
    println!("  {} Tarot Ritual", "Starting".bold());
    println!("  Catalog: {cards} cards");
    println!("  Reading: {}", service.concise_url);
    println!("  Advice:  {}", service.detailed_url);
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                debug!(target: LOG_TARGET, command = input, error = %e, "command refused");
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
