//! Line oriented commands driving a [`Drive`]

use anyhow::{Context, Result};
use derive_more::Display;
use drive_tree::prelude::*;
use log::{debug, warn};
use serde_json::Value;
use std::io::{BufRead, Write};

use crate::payload::{handle_drop, DropEvent, DropOutcome};
use crate::render::render;

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  show                              print the drive
  multi on|off                      switch multi-select mode (clears the selection)
  select <id> / deselect <id>       change the selection
  clear                             clear the selection
  move <source> <target>            move source and selection, target `root` for top level
  drop <source-json> [target-json]  raw drop event, e.g. drop {\"id\":\"3\"} {\"id\":null}
  help                              this text
  quit                              stop reading commands";

/// A parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the drive
    Show,
    /// Switch multi-select mode on or off
    Multi(bool),
    /// Add an item to the selection
    Select(ItemId),
    /// Remove an item from the selection
    Deselect(ItemId),
    /// Empty the selection
    Clear,
    /// Move `source` and the selection; `None` is the top level
    Move {
        source: ItemId,
        target: Option<ItemId>,
    },
    /// Raw drop event, source payload first
    Drop(DropEvent),
    /// Print [`HELP`]
    Help,
    /// Stop reading commands
    Quit,
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// The first word is not a command
    #[display(fmt = "unknown command `{}`, try `help`", _0)]
    Unknown(String),
    /// Wrong number or shape of arguments
    #[display(fmt = "`{}` expects {}", command, expected)]
    Usage {
        command: &'static str,
        expected: &'static str,
    },
    /// A drop argument is not valid JSON
    #[display(fmt = "invalid drop payload: {}", _0)]
    Payload(String),
}

impl std::error::Error for ParseError {}

impl Command {
    /// Parse one line
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match (word, args.as_slice()) {
            ("show", []) => Command::Show,
            ("show", _) => return Err(usage("show", "no arguments")),
            ("multi", ["on"]) => Command::Multi(true),
            ("multi", ["off"]) => Command::Multi(false),
            ("multi", _) => return Err(usage("multi", "`on` or `off`")),
            ("select", [id]) => Command::Select(ItemId::from(*id)),
            ("select", _) => return Err(usage("select", "one item id")),
            ("deselect", [id]) => Command::Deselect(ItemId::from(*id)),
            ("deselect", _) => return Err(usage("deselect", "one item id")),
            ("clear", []) => Command::Clear,
            ("clear", _) => return Err(usage("clear", "no arguments")),
            ("move", [source, target]) => Command::Move {
                source: ItemId::from(*source),
                target: (*target != "root").then(|| ItemId::from(*target)),
            },
            ("move", _) => return Err(usage("move", "a source id and a target id or `root`")),
            ("drop", _) => Command::Drop(parse_drop(rest)?),
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            (other, _) => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn usage(command: &'static str, expected: &'static str) -> ParseError {
    ParseError::Usage { command, expected }
}

/// `<source> [target...]` as whitespace separated JSON values
fn parse_drop(rest: &str) -> Result<DropEvent, ParseError> {
    let values = serde_json::Deserializer::from_str(rest)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ParseError::Payload(e.to_string()))?;

    let mut values = values.into_iter();
    let source = values.next().ok_or_else(|| usage("drop", "a source payload"))?;
    Ok(DropEvent {
        source,
        targets: values.collect(),
    })
}

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop after this command
    Quit,
}

/// Run a single command, returning what to print
pub fn execute(drive: &mut Drive, command: Command) -> (String, Flow) {
    let message = match command {
        Command::Show => render(drive).trim_end().to_string(),
        Command::Multi(on) => {
            drive.toggle_multi_select_mode(on);
            format!("Multi-select mode {}", if on { "on" } else { "off" })
        }
        Command::Select(id) => {
            if !drive.store().contains(&id) {
                format!("No item {}", id)
            } else if drive.set_selected(id.clone(), true) {
                format!("Selected {}", id)
            } else if drive.selection().is_selected(&id) {
                format!("{} is already selected", id)
            } else {
                format!("Cannot select {}: multi-select mode is off", id)
            }
        }
        Command::Deselect(id) => {
            if drive.set_selected(id.clone(), false) {
                format!("Deselected {}", id)
            } else {
                format!("{} was not selected", id)
            }
        }
        Command::Clear => {
            drive.clear_selection();
            "Selection cleared".to_string()
        }
        Command::Move { source, target } => match drive.apply_move(target, source) {
            Ok(outcome) => describe_move(&outcome),
            Err(err) => {
                warn!("Move rejected: {}", err);
                format!("Move rejected: {}", err)
            }
        },
        Command::Drop(event) => match handle_drop(drive, &event) {
            Ok(DropOutcome::NoTarget) => "Dropped nowhere, nothing moved".to_string(),
            Ok(DropOutcome::Moved { outcome, flash }) => match flash {
                Some(row) => format!("{} (flash row {})", describe_move(&outcome), row),
                None => describe_move(&outcome),
            },
            Err(err) => {
                warn!("Drop refused: {}", err);
                format!("Drop refused: {}", err)
            }
        },
        Command::Help => HELP.to_string(),
        Command::Quit => return (String::new(), Flow::Quit),
    };
    (message, Flow::Continue)
}

fn describe_move(outcome: &MoveOutcome) -> String {
    let ids: Vec<&str> = outcome.moved.iter().map(ItemId::as_str).collect();
    match &outcome.target {
        Some(target) => format!("Moved {} to {}", ids.join(", "), target),
        None => format!("Moved {} to the top level", ids.join(", ")),
    }
}

/// Read commands from `input` until it ends or `quit`, writing replies to `output`
pub fn run<R: BufRead, W: Write>(drive: &mut Drive, input: R, mut output: W) -> Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read command line {}", number + 1))?;
        debug!("Command {}: {}", number + 1, line);

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "Line {}: {}", number + 1, err)?;
                continue;
            }
        };

        let (message, flow) = execute(drive, command);
        if flow == Flow::Quit {
            break;
        }
        writeln!(output, "{}", message)?;
    }
    output.flush().context("Failed to flush output")?;
    Ok(())
}
