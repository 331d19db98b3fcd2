//! # Ledger Store
//!
//! Holds the state of one drawer-counting session.
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Store Operations                              │
//! │                                                                         │
//! │  Operator Action            Store Method              State Change      │
//! │  ───────────────            ────────────              ────────────      │
//! │                                                                         │
//! │  Type a count ────────────► set_count() ───────────► counts[pos] = n    │
//! │                                                                         │
//! │  Type damaged value ──────► set_damaged() ─────────► damaged.field = v  │
//! │                                                                         │
//! │  Edit an extra ───────────► set_extra_field() ─────► extras[i].field    │
//! │                                                                         │
//! │  Add movement ────────────► add_transaction() ─────► transactions.push  │
//! │                                                                         │
//! │  Delete movement ─────────► remove_transaction() ──► transactions.remove│
//! │                                                                         │
//! │  Confirmed reset ─────────► reset_all() ───────────► back to defaults   │
//! │                                                                         │
//! │  View totals ─────────────► totals() ──────────────► (read only)        │
//! │                                                                         │
//! │  NOTE: every state change bumps `version` and drops the cached Totals.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - One physical count per configured denomination, never negative
//! - Damaged amounts never negative
//! - Every transaction references a configured denomination and has a
//!   positive quantity
//! - Transaction ids strictly increase and are never reused, even across a
//!   reset
//!
//! No mutation can break these: bad counts are clamped, unknown ids and
//! values are ignored, and an invalid transaction is rejected before
//! anything changes.

use std::cell::OnceCell;

use chrono::Utc;
use serde::Serialize;
use ts_rs::TS;

use crate::denomination::{Category, DenominationTable};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::reconcile::{reconcile, Totals};
use crate::types::{
    DamagedCurrency, DamagedField, Direction, ExtraEntry, ExtraId, ExtraUpdate, Transaction,
    TransactionDraft, TransactionId,
};
use crate::validation::{normalize_description, parse_quantity, validate_quantity};

// =============================================================================
// Snapshot
// =============================================================================

/// The physical count of one denomination, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CountEntry {
    pub value: Money,
    pub category: Category,
    pub label: String,
    pub count: i64,
}

/// Owned, read-only view of everything the operator has entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LedgerSnapshot {
    pub version: u64,
    pub counts: Vec<CountEntry>,
    pub damaged: DamagedCurrency,
    pub extras: Vec<ExtraEntry>,
    pub transactions: Vec<Transaction>,
}

// =============================================================================
// Ledger Store
// =============================================================================

/// The mutable session state.
///
/// ## Derived Totals
/// [`LedgerStore::totals`] computes [`Totals`] on first access after a
/// change and serves the same value until the next change. The cached value
/// is always identical to calling [`reconcile`] on the current state.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    table: DenominationTable,
    /// Physical counts, indexed by table position.
    counts: Vec<i64>,
    damaged: DamagedCurrency,
    extras: Vec<ExtraEntry>,
    transactions: Vec<Transaction>,
    draft: TransactionDraft,
    next_transaction_id: u64,
    version: u64,
    totals: OnceCell<Totals>,
}

impl LedgerStore {
    /// Starts an empty session over `table`.
    pub fn new(table: DenominationTable) -> Self {
        let draft = TransactionDraft::new(table.default_selection());
        LedgerStore {
            counts: vec![0; table.len()],
            table,
            damaged: DamagedCurrency::default(),
            extras: ExtraEntry::seeded(),
            transactions: Vec::new(),
            draft,
            next_transaction_id: 1,
            version: 0,
            totals: OnceCell::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn table(&self) -> &DenominationTable {
        &self.table
    }

    /// Number of state changes applied so far. Draft edits do not count.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Physical count for a configured value.
    pub fn count(&self, value: Money) -> Option<i64> {
        self.table.position(value).map(|pos| self.counts[pos])
    }

    /// Physical counts in table order.
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    pub fn damaged(&self) -> &DamagedCurrency {
        &self.damaged
    }

    pub fn extras(&self) -> &[ExtraEntry] {
        &self.extras
    }

    pub fn extra(&self, id: ExtraId) -> Option<&ExtraEntry> {
        self.extras.iter().find(|e| e.id == id)
    }

    /// Transactions in creation order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    pub fn label_for(&self, value: Money) -> String {
        self.table.label_for(value)
    }

    pub fn category_for(&self, value: Money) -> Category {
        self.table.category_for(value)
    }

    /// Copies the current state into an owned snapshot.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let counts = self
            .table
            .iter()
            .zip(&self.counts)
            .map(|(d, &count)| CountEntry {
                value: d.value,
                category: d.category,
                label: d.label.clone(),
                count,
            })
            .collect();

        LedgerSnapshot {
            version: self.version,
            counts,
            damaged: self.damaged,
            extras: self.extras.clone(),
            transactions: self.transactions.clone(),
        }
    }

    /// Current totals, recomputed only if the state changed since last call.
    pub fn totals(&self) -> &Totals {
        self.totals.get_or_init(|| reconcile(self))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Replaces the physical count of one denomination.
    ///
    /// Negative counts are stored as 0. Returns `false` (and changes nothing)
    /// when `value` is not in the table.
    pub fn set_count(&mut self, value: Money, count: i64) -> bool {
        let Some(pos) = self.table.position(value) else {
            return false;
        };

        let count = count.max(0);
        if self.counts[pos] != count {
            self.counts[pos] = count;
            self.touch();
        }
        true
    }

    /// Sets one of the damaged-currency amounts. Negative amounts become 0.
    pub fn set_damaged(&mut self, field: DamagedField, amount: Money) {
        let amount = amount.non_negative();
        let slot = match field {
            DamagedField::Notes => &mut self.damaged.notes_value,
            DamagedField::Coins => &mut self.damaged.coins_value,
        };

        if *slot != amount {
            *slot = amount;
            self.touch();
        }
    }

    /// Edits the description or value of an extra entry.
    ///
    /// Returns `false` when no entry has `id`.
    pub fn set_extra_field(&mut self, id: ExtraId, update: ExtraUpdate) -> bool {
        let Some(entry) = self.extras.iter_mut().find(|e| e.id == id) else {
            return false;
        };

        let changed = match update {
            ExtraUpdate::Description(description) if entry.description != description => {
                entry.description = description;
                true
            }
            ExtraUpdate::Value(value) if entry.value != value => {
                entry.value = value;
                true
            }
            _ => false,
        };

        if changed {
            self.touch();
        }
        true
    }

    /// Records a manual movement of `quantity` units of `denomination_value`.
    ///
    /// ## Behavior
    /// - Blank descriptions are stored as the placeholder description
    /// - `total_value` is frozen as `denomination_value × quantity`
    /// - The new transaction is appended, keeping creation order
    ///
    /// ## Errors
    /// Nothing is recorded when the quantity is not positive
    /// ([`ValidationError::MustBePositive`]) or the value is not configured
    /// ([`CoreError::UnknownDenomination`]).
    pub fn add_transaction(
        &mut self,
        description: &str,
        denomination_value: Money,
        quantity: i64,
        direction: Direction,
    ) -> CoreResult<TransactionId> {
        validate_quantity(quantity)?;
        if !self.table.contains(denomination_value) {
            return Err(CoreError::UnknownDenomination(denomination_value));
        }

        let id = TransactionId(self.next_transaction_id);
        self.next_transaction_id += 1;

        self.transactions.push(Transaction {
            id,
            description: normalize_description(description),
            denomination_value,
            quantity,
            direction,
            total_value: denomination_value.multiply_quantity(quantity),
            recorded_at: Utc::now(),
        });
        self.touch();

        Ok(id)
    }

    /// Removes a transaction, returning it. `None` if no transaction has `id`.
    pub fn remove_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let idx = self.transactions.iter().position(|t| t.id == id)?;
        let removed = self.transactions.remove(idx);
        self.touch();
        Some(removed)
    }

    /// Discards everything the operator entered.
    ///
    /// Counts go to zero, damaged to zero, extras back to the seeded slots,
    /// transactions are dropped and the draft form is emptied. Confirming
    /// with the operator is the caller's job; this always executes.
    pub fn reset_all(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.damaged = DamagedCurrency::default();
        self.extras = ExtraEntry::seeded();
        self.transactions.clear();
        self.draft = TransactionDraft::new(self.table.default_selection());
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Transaction Draft
    // -------------------------------------------------------------------------

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    /// Holds typed quantity text; it is only judged on submit.
    pub fn set_draft_quantity(&mut self, quantity: impl Into<String>) {
        self.draft.quantity = quantity.into();
    }

    pub fn set_draft_direction(&mut self, direction: Direction) {
        self.draft.direction = direction;
    }

    /// Points the draft at another denomination.
    pub fn set_draft_denomination(&mut self, value: Money) -> CoreResult<()> {
        if !self.table.contains(value) {
            return Err(CoreError::UnknownDenomination(value));
        }
        self.draft.denomination_value = value;
        Ok(())
    }

    /// Turns the draft into a transaction.
    ///
    /// On success the draft's description and quantity are cleared; on
    /// failure the draft is left as typed so the operator can fix it.
    pub fn submit_draft(&mut self) -> CoreResult<TransactionId> {
        let quantity = parse_quantity(&self.draft.quantity).ok_or_else(|| {
            ValidationError::Required {
                field: "quantity".to_string(),
            }
        })?;

        let TransactionDraft {
            description,
            denomination_value,
            direction,
            ..
        } = self.draft.clone();

        let id = self.add_transaction(&description, denomination_value, quantity, direction)?;
        self.draft.clear_entry();
        Ok(id)
    }

    fn touch(&mut self) {
        self.version += 1;
        self.totals.take();
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        LedgerStore::new(DenominationTable::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
