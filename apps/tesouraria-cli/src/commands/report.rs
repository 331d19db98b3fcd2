//! # Report Commands
//!
//! Read-only views of the session. None of these change the ledger version.

use tracing::debug;

use super::Outcome;
use crate::error::CliError;
use crate::render;
use crate::state::SessionState;

/// Prints the whole session: counts, damaged, extras, movements, summary.
pub fn show(session: &SessionState, json: bool) -> Result<Outcome, CliError> {
    debug!(json, "show command");

    let text = if json {
        render::json(&render::SessionView::of(session.store()))?
    } else {
        render::session(session)
    };
    Ok(Outcome::Reply(text))
}

/// Prints the summary card only.
pub fn totals(session: &SessionState, json: bool) -> Result<Outcome, CliError> {
    debug!(json, "totals command");

    let totals = session.store().totals();
    let text = if json {
        render::json(totals)?
    } else {
        render::summary(totals)
    };
    Ok(Outcome::Reply(text))
}

pub fn denominations(session: &SessionState) -> Result<Outcome, CliError> {
    debug!("denominations command");
    Ok(Outcome::Reply(render::denominations(session.store().table())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tesouraria_core::{DenominationTable, Direction, Money};

    #[test]
    fn test_totals_json_matches_store() {
        let mut session = SessionState::new(DenominationTable::brl(), Direction::Out);
        session.store_mut().set_count(Money::from_cents(5_000), 2);

        let Outcome::Reply(text) = totals(&session, true).unwrap() else {
            panic!("expected reply");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["grand_total"], 10_000);
        assert_eq!(value["notes_total"], 10_000);
    }

    #[test]
    fn test_reports_do_not_bump_version() {
        let session = SessionState::new(DenominationTable::brl(), Direction::Out);
        show(&session, false).unwrap();
        show(&session, true).unwrap();
        totals(&session, false).unwrap();
        denominations(&session).unwrap();

        assert_eq!(session.store().version(), 0);
    }
}
