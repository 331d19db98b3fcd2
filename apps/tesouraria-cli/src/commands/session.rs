//! # Session Commands

use tracing::{debug, info};

use super::Outcome;
use crate::error::CliError;
use crate::state::SessionState;

/// Clears the session.
///
/// Without `--yes` nothing changes yet: the console asks the operator and
/// calls [`confirm_reset`] only on an explicit yes.
pub fn reset(session: &mut SessionState, yes: bool) -> Result<Outcome, CliError> {
    debug!(yes, "reset command");

    if !yes {
        return Ok(Outcome::ConfirmReset);
    }
    Ok(Outcome::Reply(confirm_reset(session)))
}

/// Runs a reset the operator has confirmed.
pub fn confirm_reset(session: &mut SessionState) -> String {
    session.reset();
    info!(version = session.store().version(), "Session cleared");
    "Sessão zerada.".to_string()
}

/// `y`, `yes`, `s` or `sim`, case-insensitive. Anything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}
