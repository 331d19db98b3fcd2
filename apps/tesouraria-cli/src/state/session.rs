//! # Session State
//!
//! Owns the one [`LedgerStore`] a console run works on.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  startup ──► SessionState::new(table, default_direction)               │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │             count / damaged / extra / add / remove / draft ...         │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │             reset (confirmed) ──► store.reset_all()                    │
//! │                   │               draft direction = default_direction  │
//! │                   ▼                                                     │
//! │             quit / end of input ──► session dropped, nothing persisted │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tesouraria_core::{DenominationTable, Direction, LedgerStore};

/// The operator's working session.
#[derive(Debug)]
pub struct SessionState {
    store: LedgerStore,
    default_direction: Direction,
    started_at: DateTime<Utc>,
}

impl SessionState {
    /// Creates an empty session whose draft starts at `default_direction`.
    pub fn new(table: DenominationTable, default_direction: Direction) -> Self {
        let mut store = LedgerStore::new(table);
        store.set_draft_direction(default_direction);

        SessionState {
            store,
            default_direction,
            started_at: Utc::now(),
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut LedgerStore {
        &mut self.store
    }

    pub fn default_direction(&self) -> Direction {
        self.default_direction
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Clears everything the operator entered. The caller has already
    /// asked for confirmation.
    pub fn reset(&mut self) {
        self.store.reset_all();
        self.store.set_draft_direction(self.default_direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tesouraria_core::Money;

    #[test]
    fn test_reset_restores_configured_direction() {
        let mut session = SessionState::new(DenominationTable::brl(), Direction::In);
        assert_eq!(session.store().draft().direction, Direction::In);

        session.store_mut().set_draft_direction(Direction::Out);
        session.store_mut().set_count(Money::from_cents(10_000), 4);

        session.reset();

        assert_eq!(session.store().draft().direction, Direction::In);
        assert_eq!(session.store().count(Money::from_cents(10_000)), Some(0));
        assert!(session.store().totals().grand_total.is_zero());
    }
}
