// Interactive draft session: reads commands line by line, applies them to the
// player pool, and writes human-readable (search/list/count) or JSON (pick)
// responses.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use ffdraft_core::{PickOutcome, PlayerDatabase, PlayerRecord, Position};
use serde::Serialize;
use tracing::{debug, info};

use crate::command::{Command, ParseError, USAGE};

/// One pick, as emitted on a single JSON line.
#[derive(Debug, Serialize)]
struct PickReport<'a> {
    /// True when no single player matched and `player` is a stand-in.
    placeholder: bool,
    /// How many players the name matched.
    matches: usize,
    player: &'a PlayerRecord,
}

/// Run commands from `input` until `quit` or end of input. Returns the
/// records picked during the session, in order.
pub fn run<R: BufRead, W: Write>(
    db: &mut PlayerDatabase,
    input: R,
    mut out: W,
) -> Result<Vec<PlayerRecord>> {
    let mut picked = Vec::new();

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                writeln!(out, "{USAGE}")?;
                continue;
            }
        };
        debug!("command: {:?}", command);

        match command {
            Command::Search(query) => write_search(db, &query, &mut out)?,
            Command::Pick(name) => {
                let record = write_pick(db, &name, &mut out)?;
                picked.push(record);
            }
            Command::List(position) => write_list(db, position, &mut out)?,
            Command::Count => write_counts(db, &mut out)?,
            Command::Help => writeln!(out, "{USAGE}")?,
            Command::Quit => break,
        }
        out.flush()?;
    }

    info!("Session ended after {} picks; {} players left", picked.len(), db.len());
    Ok(picked)
}

fn write_search<W: Write>(db: &PlayerDatabase, query: &str, out: &mut W) -> Result<()> {
    let results = db.search(query);
    match results.len() {
        0 => writeln!(out, "no players match {query:?}")?,
        1 => writeln!(out, "1 match: {}", results.search_result())?,
        n => {
            writeln!(out, "{n} matches:")?;
            for player in results.iter() {
                writeln!(out, "  {}", describe(player))?;
            }
        }
    }
    Ok(())
}

fn write_pick<W: Write>(db: &mut PlayerDatabase, name: &str, out: &mut W) -> Result<PlayerRecord> {
    let outcome = db.pick(name);
    let matches = match &outcome {
        PickOutcome::Picked(_) => 1,
        PickOutcome::NotFound { .. } => 0,
        PickOutcome::Ambiguous { matches, .. } => *matches,
    };
    let placeholder = !outcome.is_picked();
    let record = outcome.into_record();

    let report = PickReport {
        placeholder,
        matches,
        player: &record,
    };
    let json = serde_json::to_string(&report).context("failed to serialize pick")?;
    writeln!(out, "{json}")?;
    Ok(record)
}

fn write_list<W: Write>(db: &PlayerDatabase, position: Position, out: &mut W) -> Result<()> {
    let players = db.players(position);
    writeln!(out, "{position}: {} available", players.len())?;
    for player in players {
        writeln!(out, "  {}", describe(player))?;
    }
    Ok(())
}

fn write_counts<W: Write>(db: &PlayerDatabase, out: &mut W) -> Result<()> {
    let summary: Vec<String> = db
        .counts()
        .into_iter()
        .map(|(pos, n)| format!("{pos} {n}"))
        .collect();
    writeln!(out, "{} (total {})", summary.join(", "), db.len())?;
    Ok(())
}

fn describe(player: &PlayerRecord) -> String {
    format!(
        "#{:<3} {} ({} {}, bye {})",
        player.overall_rank, player.name, player.position, player.team, player.bye_week
    )
}
