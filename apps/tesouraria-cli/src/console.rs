//! # Console Loop
//!
//! Reads operator lines, runs them, prints replies and errors.
//!
//! Generic over its input and output so tests can drive a whole session
//! with in-memory buffers. End of input behaves like `quit`. Bytes that are
//! not UTF-8 are replaced with U+FFFD rather than ending the session.
//!
//! A failing line that asked for `--json` gets its error as JSON too.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::commands::session::{confirm_reset, is_affirmative};
use crate::commands::{self, Outcome};
use crate::error::CliError;
use crate::render;
use crate::state::SessionState;

const PROMPT: &str = "> ";
const RESET_QUESTION: &str = "Zerar contagens, avariadas, extras e movimentações? [s/N] ";

pub struct Console<R, W> {
    input: R,
    output: W,
    prompt: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            prompt: true,
        }
    }

    /// Turns the `> ` prompt off, for piped scripts.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Runs until `quit` or end of input.
    ///
    /// Command failures are printed and the loop goes on; only I/O failures
    /// end it with an error.
    pub fn run(&mut self, session: &mut SessionState) -> Result<(), CliError> {
        if self.prompt {
            writeln!(self.output, "Tesouraria. Digite 'help' para ver os comandos.")?;
        }

        while let Some(line) = self.read_line()? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match commands::dispatch(session, line) {
                Ok(Outcome::Reply(text)) => self.print(&text)?,
                Ok(Outcome::ConfirmReset) => {
                    if self.confirm(RESET_QUESTION)? {
                        let text = confirm_reset(session);
                        self.print(&text)?;
                    } else {
                        info!("Reset cancelled by operator");
                        self.print("Nada foi alterado.")?;
                    }
                }
                Ok(Outcome::Quit) => break,
                Err(err) => {
                    warn!(code = %err.code, "{}", err.message);
                    self.print_error(&err, wants_json(line))?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.prompt {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;
        }

        self.next_input()
    }

    /// Next raw line, decoded lossily. `None` at end of input.
    fn next_input(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Asks a yes/no question. End of input counts as no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let Some(answer) = self.next_input()? else {
            writeln!(self.output)?;
            return Ok(false);
        };
        if !self.prompt {
            writeln!(self.output)?;
        }
        Ok(is_affirmative(&answer))
    }

    fn print_error(&mut self, err: &CliError, json: bool) -> Result<(), CliError> {
        if json {
            let text = render::json(err)?;
            self.print(&text)?;
        } else {
            writeln!(self.output, "{}", err)?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "{}", text.trim_end_matches('\n'))
    }
}

fn wants_json(line: &str) -> bool {
    line.split_whitespace().any(|word| word == "--json")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tesouraria_core::{DenominationTable, Direction, Money};

    fn run_script(script: &str) -> (SessionState, String) {
        let mut session = SessionState::new(DenominationTable::brl(), Direction::Out);
        let mut output = Vec::new();

        Console::new(Cursor::new(script.as_bytes()), &mut output)
            .with_prompt(false)
            .run(&mut session)
            .unwrap();

        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_withdrawal_scenario() {
        let (session, output) = run_script(
            "count 100 3\n\
             count 5 1\n\
             add out 100 2 Sangria\n\
             totals\n",
        );

        let totals = session.store().totals();
        assert_eq!(totals.notes_total, Money::from_cents(10_500));
        assert_eq!(totals.grand_total, Money::from_cents(10_500));
        assert!(output.contains("Total geral"));
        assert!(output.contains("R$ 105,00"));
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let (session, output) = run_script(
            "count 3 1\n\
             frobnicate\n\
             count 50 2\n",
        );

        assert!(output.contains("error [NOT_FOUND]"));
        assert!(output.contains("error [USAGE]"));
        assert_eq!(session.store().count(Money::from_cents(5_000)), Some(2));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (session, _) = run_script("count 10 1\nquit\ncount 10 9\n");
        assert_eq!(session.store().count(Money::from_cents(1_000)), Some(1));
    }

    #[test]
    fn test_reset_confirmed() {
        let (session, output) = run_script("count 20 4\nreset\nsim\n");

        assert!(output.contains(RESET_QUESTION));
        assert!(output.contains("Sessão zerada."));
        assert!(session.store().totals().grand_total.is_zero());
    }

    #[test]
    fn test_reset_declined() {
        let (session, output) = run_script("count 20 4\nreset\nn\n");

        assert!(output.contains("Nada foi alterado."));
        assert_eq!(session.store().count(Money::from_cents(2_000)), Some(4));
    }

    #[test]
    fn test_reset_at_end_of_input_is_declined() {
        let (session, _) = run_script("count 20 4\nreset\n");
        assert_eq!(session.store().count(Money::from_cents(2_000)), Some(4));
    }

    #[test]
    fn test_reset_with_yes_flag() {
        let (session, output) = run_script("count 20 4\nreset --yes\n");

        assert!(!output.contains(RESET_QUESTION));
        assert!(session.store().totals().grand_total.is_zero());
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let mut session = SessionState::new(DenominationTable::brl(), Direction::Out);
        let mut output = Vec::new();
        let script: &[u8] = b"count 10 1\nadd out 10 1 caf\xe9\ncount 20 2\n";

        Console::new(Cursor::new(script), &mut output)
            .with_prompt(false)
            .run(&mut session)
            .unwrap();

        let store = session.store();
        assert_eq!(store.count(Money::from_cents(2_000)), Some(2));
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].description, "caf\u{FFFD}");
    }

    #[test]
    fn test_huge_counts_keep_session_alive() {
        let (session, output) = run_script(
            "count 200 99999999999999999999\n\
             count 100 99999999999999999999\n\
             extra 1 value 90000000000000000\n\
             extra 2 value 90000000000000000\n\
             totals\n\
             count 5 1\n",
        );

        let totals = session.store().totals();
        assert_eq!(totals.grand_total, Money::from_cents(i64::MAX));
        assert_eq!(session.store().count(Money::from_cents(500)), Some(1));
        assert!(output.contains("Total geral"));
    }

    #[test]
    fn test_json_error_for_json_line() {
        let (_, output) = run_script("show --json --bogus\ncount 3 1\n");

        let json_start = output.find('{').unwrap();
        let json_end = output.find('}').unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&output[json_start..=json_end]).unwrap();
        assert_eq!(value["code"], "USAGE");

        assert!(output.contains("error [NOT_FOUND]"));
    }

    #[test]
    fn test_prompt_and_banner() {
        let mut session = SessionState::new(DenominationTable::brl(), Direction::Out);
        let mut output = Vec::new();

        Console::new(Cursor::new(&b"quit\n"[..]), &mut output)
            .run(&mut session)
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Tesouraria."));
        assert!(output.contains(PROMPT));
    }
}
