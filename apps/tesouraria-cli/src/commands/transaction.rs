//! # Transaction Commands
//!
//! Manual movements (entradas / saídas) and the pending movement form.
//!
//! ## Movement Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌───────────┐  draft direction / denom / qty / desc                  │
//! │   │   Draft   │◄────────────────────────────────────┐                  │
//! │   └─────┬─────┘                                     │                  │
//! │         │ draft submit                              │                  │
//! │         ▼                                           │                  │
//! │   ┌───────────┐   add in|out <value> <qty> [desc]   │                  │
//! │   │ Recorded  │◄──────────────────────────          │ (qty + desc     │
//! │   │   #id     │                                     │  cleared)       │
//! │   └─────┬─────┘─────────────────────────────────────┘                  │
//! │         │ remove <id>                                                   │
//! │         ▼                                                               │
//! │      (gone; its adjustment is undone)                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A movement may take out more units than were counted. It is still
//! recorded; the affected line is clamped to zero and the reply warns.

use std::fmt::Write as _;

use tesouraria_core::validation::parse_quantity;
use tesouraria_core::{Direction, LedgerStore, Money, TransactionId, ValidationError};
use tracing::{debug, info, warn};

use super::{parse_value, Outcome};
use crate::error::CliError;
use crate::render;
use crate::state::SessionState;

/// Records a movement directly.
///
/// ## User Workflow
/// ```text
/// > add out 100 3 Sangria
/// Registrada #1: saída 3 × R$ 100 = R$ 300,00 (Sangria)
/// ```
pub fn add(
    session: &mut SessionState,
    direction: Direction,
    value: &str,
    quantity: &str,
    description: &str,
) -> Result<Outcome, CliError> {
    debug!(%direction, value = %value, quantity = %quantity, "add command");

    let value = parse_value(value)?;
    let quantity = parse_quantity(quantity).ok_or_else(|| ValidationError::Required {
        field: "quantity".to_string(),
    })?;

    let store = session.store_mut();
    let id = store.add_transaction(description, value, quantity, direction)?;

    info!(%id, %direction, %value, quantity, version = store.version(), "Transaction recorded");
    Ok(Outcome::Reply(recorded_reply(store, id, value)))
}

/// Removes a movement by id.
pub fn remove(session: &mut SessionState, id: u64) -> Result<Outcome, CliError> {
    debug!(id, "remove command");

    let id = TransactionId(id);
    let store = session.store_mut();
    let Some(removed) = store.remove_transaction(id) else {
        warn!(%id, "Remove ignored: no such transaction");
        return Err(CliError::not_found("Transaction", id));
    };

    info!(%id, version = store.version(), "Transaction removed");
    Ok(Outcome::Reply(format!(
        "Removida {}: {} {} × {} = {}",
        removed.id,
        render::direction_label(removed.direction),
        removed.quantity,
        store.label_for(removed.denomination_value),
        removed.total_value
    )))
}

// =============================================================================
// Draft
// =============================================================================

pub fn show_draft(session: &SessionState) -> Result<Outcome, CliError> {
    debug!("draft show command");
    let store = session.store();
    Ok(Outcome::Reply(render::draft(store, store.draft())))
}

pub fn set_draft_direction(session: &mut SessionState, direction: Direction) -> Result<Outcome, CliError> {
    debug!(%direction, "draft direction command");
    session.store_mut().set_draft_direction(direction);
    show_draft(session)
}

pub fn set_draft_denomination(session: &mut SessionState, value: &str) -> Result<Outcome, CliError> {
    debug!(value = %value, "draft denom command");
    let value = parse_value(value)?;
    session.store_mut().set_draft_denomination(value)?;
    show_draft(session)
}

/// Holds the quantity as typed; it is only checked on submit.
pub fn set_draft_quantity(session: &mut SessionState, text: &str) -> Result<Outcome, CliError> {
    debug!(text = %text, "draft qty command");
    session.store_mut().set_draft_quantity(text);
    show_draft(session)
}

pub fn set_draft_description(session: &mut SessionState, text: &str) -> Result<Outcome, CliError> {
    debug!(text = %text, "draft desc command");
    session.store_mut().set_draft_description(text);
    show_draft(session)
}

/// Records the draft. On failure the draft keeps what was typed.
pub fn submit_draft(session: &mut SessionState) -> Result<Outcome, CliError> {
    debug!("draft submit command");

    let store = session.store_mut();
    let value = store.draft().denomination_value;
    let id = match store.submit_draft() {
        Ok(id) => id,
        Err(err) => {
            warn!(error = %err, "Draft rejected");
            return Err(err.into());
        }
    };

    info!(%id, %value, version = store.version(), "Draft submitted");
    Ok(Outcome::Reply(recorded_reply(store, id, value)))
}

fn recorded_reply(store: &LedgerStore, id: TransactionId, value: Money) -> String {
    let mut reply = match store.transactions().iter().find(|t| t.id == id) {
        Some(tx) => format!(
            "Registrada {}: {} {} × {} = {} ({})",
            tx.id,
            render::direction_label(tx.direction),
            tx.quantity,
            store.label_for(tx.denomination_value),
            tx.total_value,
            tx.description
        ),
        None => format!("Registrada {}", id),
    };

    if let Some(line) = store.totals().line(value).filter(|l| l.over_withdrawn) {
        warn!(%value, adjustment = line.adjustment, "Over-withdrawal clamped to zero");
        let _ = write!(
            reply,
            "\n! {}: saídas acima do contado ({} + {}), considerado 0",
            line.label, line.physical_count, line.adjustment
        );
    }
    reply
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tesouraria_core::{DenominationTable, DEFAULT_TRANSACTION_DESCRIPTION};

    fn session() -> SessionState {
        SessionState::new(DenominationTable::brl(), Direction::Out)
    }

    fn reais(n: i64) -> Money {
        Money::from_cents(n * 100)
    }

    #[test]
    fn test_add_and_remove_restore_totals() {
        let mut s = session();
        s.store_mut().set_count(reais(100), 3);
        let before = s.store().totals().clone();

        let Outcome::Reply(text) = add(&mut s, Direction::Out, "100", "1", "Sangria").unwrap() else {
            panic!("expected reply");
        };
        assert_eq!(text, "Registrada #1: saída 1 × R$ 100 = R$ 100,00 (Sangria)");
        assert_eq!(s.store().totals().notes_total, reais(200));

        remove(&mut s, 1).unwrap();
        assert_eq!(s.store().totals(), &before);
    }

    #[test]
    fn test_add_rejects_bad_quantity() {
        let mut s = session();
        assert_eq!(
            add(&mut s, Direction::In, "100", "0", "").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            add(&mut s, Direction::In, "100", "muitas", "").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert!(s.store().transactions().is_empty());
    }

    #[test]
    fn test_add_unknown_denomination() {
        let mut s = session();
        let err = add(&mut s, Direction::In, "3", "1", "").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_add_blank_description_placeholder() {
        let mut s = session();
        add(&mut s, Direction::In, "10", "2", "  ").unwrap();
        assert_eq!(
            s.store().transactions()[0].description,
            DEFAULT_TRANSACTION_DESCRIPTION
        );
    }

    #[test]
    fn test_over_withdrawal_warns_but_records() {
        let mut s = session();
        s.store_mut().set_count(reais(100), 1);

        let Outcome::Reply(text) = add(&mut s, Direction::Out, "100", "3", "").unwrap() else {
            panic!("expected reply");
        };
        assert!(text.contains("! R$ 100"));
        assert_eq!(s.store().transactions().len(), 1);
        assert!(s.store().totals().notes_total.is_zero());
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut s = session();
        assert_eq!(remove(&mut s, 42).unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_draft_flow() {
        let mut s = session();
        set_draft_direction(&mut s, Direction::In).unwrap();
        set_draft_denomination(&mut s, "20").unwrap();
        set_draft_quantity(&mut s, "4").unwrap();
        set_draft_description(&mut s, "Troco").unwrap();

        submit_draft(&mut s).unwrap();

        let tx = &s.store().transactions()[0];
        assert_eq!(tx.total_value, reais(80));
        assert_eq!(tx.direction, Direction::In);

        let draft = s.store().draft();
        assert!(draft.quantity.is_empty());
        assert!(draft.description.is_empty());
        assert_eq!(draft.denomination_value, reais(20));
    }

    #[test]
    fn test_draft_submit_failure_keeps_input() {
        let mut s = session();
        set_draft_quantity(&mut s, "").unwrap();
        set_draft_description(&mut s, "Sangria").unwrap();

        assert_eq!(submit_draft(&mut s).unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(s.store().draft().description, "Sangria");
        assert!(s.store().transactions().is_empty());
    }

    #[test]
    fn test_draft_unknown_denomination() {
        let mut s = session();
        let err = set_draft_denomination(&mut s, "7").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(s.store().draft().denomination_value, reais(200));
    }
}
