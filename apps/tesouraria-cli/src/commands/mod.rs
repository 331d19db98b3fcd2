//! # Console Commands Module
//!
//! One function per operator command, grouped by screen area.
//!
//! ## Module Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (line parsing + dispatch)
//! ├── drawer.rs       ◄─── count, damaged, extra
//! ├── transaction.rs  ◄─── add, remove, draft
//! ├── report.rs       ◄─── show, totals, denominations
//! └── session.rs      ◄─── reset
//! ```
//!
//! ## Line Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "add out 100 3 \"Sangria 14h\""                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  shell_words::split ──► ["add", "out", "100", "3", "Sangria 14h"]      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ConsoleLine::try_parse_from ──► ConsoleCommand::Add { .. }            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  transaction::add(session, ..) ──► Outcome::Reply("Recorded #1 ...")   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//! Every command returns `Result<Outcome, CliError>`. A failed command never
//! ends the session; the console prints the error and reads the next line.

pub mod drawer;
pub mod report;
pub mod session;
pub mod transaction;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use tesouraria_core::{DamagedField, Direction, Money};
use tracing::debug;

use crate::error::CliError;
use crate::state::SessionState;

/// What the console does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and read the next line.
    Reply(String),
    /// Ask the operator before clearing the session.
    ConfirmReset,
    /// Stop reading input.
    Quit,
}

// =============================================================================
// Line Grammar
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "tesouraria",
    no_binary_name = true,
    disable_version_flag = true,
    disable_help_flag = true,
    subcommand_required = true
)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Debug, Subcommand)]
enum ConsoleCommand {
    /// Set the physical count of a denomination (e.g. `count 100 3`)
    Count {
        value: String,
        #[arg(allow_hyphen_values = true)]
        count: String,
    },
    /// Set the damaged notes or coins amount (e.g. `damaged notes 12,50`)
    Damaged {
        field: DamagedArg,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Edit an extra entry's description or value
    Extra {
        id: u32,
        #[command(subcommand)]
        field: ExtraFieldArg,
    },
    /// Record a movement (e.g. `add out 100 3 Sangria`)
    Add {
        direction: DirectionArg,
        value: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Remove a recorded movement by id
    Remove { id: u64 },
    /// Work with the pending movement form
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Print the whole session
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Print the summary totals
    Totals {
        #[arg(long)]
        json: bool,
    },
    /// List the configured denominations
    Denominations,
    /// Clear counts, damaged, extras and movements
    Reset {
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Subcommand)]
enum ExtraFieldArg {
    /// Replace the description
    Description {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Replace the value (may be negative)
    Value {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

#[derive(Debug, Subcommand)]
enum DraftAction {
    /// Print the draft
    Show,
    /// Set the draft direction
    Direction { direction: DirectionArg },
    /// Set the draft denomination
    Denom { value: String },
    /// Set the draft quantity text
    Qty {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Set the draft description
    Desc {
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Record the draft as a movement
    Submit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    #[value(alias = "entrada")]
    In,
    #[value(alias = "saida", alias = "saída")]
    Out,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::In => Direction::In,
            DirectionArg::Out => Direction::Out,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DamagedArg {
    #[value(alias = "cedulas", alias = "cédulas")]
    Notes,
    #[value(alias = "moedas")]
    Coins,
}

impl From<DamagedArg> for DamagedField {
    fn from(arg: DamagedArg) -> Self {
        match arg {
            DamagedArg::Notes => DamagedField::Notes,
            DamagedArg::Coins => DamagedField::Coins,
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Parses one console line and runs it against the session.
pub fn dispatch(session: &mut SessionState, line: &str) -> Result<Outcome, CliError> {
    let words = shell_words::split(line).map_err(|e| CliError::usage(e.to_string()))?;
    if words.is_empty() {
        return Ok(Outcome::Reply(String::new()));
    }

    let parsed = match ConsoleLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            return Ok(Outcome::Reply(err.render().to_string().trim_end().to_string()));
        }
        Err(err) => {
            let rendered = err.render().to_string();
            let message = rendered.trim_end().trim_start_matches("error: ");
            return Err(CliError::usage(message));
        }
    };

    debug!(command = ?parsed.command, "Console line parsed");
    execute(session, parsed.command)
}

fn execute(session: &mut SessionState, command: ConsoleCommand) -> Result<Outcome, CliError> {
    match command {
        ConsoleCommand::Count { value, count } => drawer::set_count(session, &value, &count),
        ConsoleCommand::Damaged { field, amount } => {
            drawer::set_damaged(session, field.into(), &amount)
        }
        ConsoleCommand::Extra { id, field } => match field {
            ExtraFieldArg::Description { text } => {
                drawer::set_extra_description(session, id, &text.join(" "))
            }
            ExtraFieldArg::Value { amount } => drawer::set_extra_value(session, id, &amount),
        },
        ConsoleCommand::Add {
            direction,
            value,
            quantity,
            description,
        } => transaction::add(
            session,
            direction.into(),
            &value,
            &quantity,
            &description.join(" "),
        ),
        ConsoleCommand::Remove { id } => transaction::remove(session, id),
        ConsoleCommand::Draft { action } => match action {
            DraftAction::Show => transaction::show_draft(session),
            DraftAction::Direction { direction } => {
                transaction::set_draft_direction(session, direction.into())
            }
            DraftAction::Denom { value } => transaction::set_draft_denomination(session, &value),
            DraftAction::Qty { text } => transaction::set_draft_quantity(session, &text),
            DraftAction::Desc { text } => {
                transaction::set_draft_description(session, &text.join(" "))
            }
            DraftAction::Submit => transaction::submit_draft(session),
        },
        ConsoleCommand::Show { json } => report::show(session, json),
        ConsoleCommand::Totals { json } => report::totals(session, json),
        ConsoleCommand::Denominations => report::denominations(session),
        ConsoleCommand::Reset { yes } => session::reset(session, yes),
        ConsoleCommand::Quit => Ok(Outcome::Quit),
    }
}

/// Reads a denomination value typed by the operator (`100`, `0,50`, `.05`).
pub(crate) fn parse_value(text: &str) -> Result<Money, CliError> {
    Money::parse_decimal(text)
        .ok_or_else(|| CliError::validation(format!("'{}' is not a valid amount", text)))
}

// =============================================================================
// Unit Tests
// =============================================================================
