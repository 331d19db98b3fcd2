//! # Reconciliation Engine
//!
//! Derives drawer totals from the ledger. Pure and deterministic: the same
//! store state always yields bit-identical [`Totals`].
//!
//! ## Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  transactions ──► net adjustment per denomination (in: +q, out: -q)    │
//! │                              │                                          │
//! │  physical counts ────────────┤                                          │
//! │                              ▼                                          │
//! │            effective = max(0, physical + adjustment)                    │
//! │                              │                                          │
//! │                              ▼                                          │
//! │       notes_total / coins_total = Σ effective × value                   │
//! │                              │                                          │
//! │  damaged notes + coins ──────┼──► physical_total                        │
//! │                              │          │                               │
//! │  Σ extras (signed) ──────────┴──────────┴──► grand_total                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cost is linear in denominations + transactions + extras, so it is run
//! after every change without a second thought.
//!
//! ## Over-withdrawal
//! When `out` movements exceed what was physically counted, the effective
//! count is held at zero instead of going negative. The line is flagged
//! `over_withdrawn` so the presentation layer can warn; the totals are the
//! same either way.

use serde::Serialize;
use ts_rs::TS;

use crate::denomination::{Category, DenominationTable};
use crate::ledger::LedgerStore;
use crate::money::Money;
use crate::types::{DamagedCurrency, Direction, ExtraEntry, Transaction};

// =============================================================================
// Totals
// =============================================================================

/// The reconciled state of one denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DenominationLine {
    pub value: Money,
    pub category: Category,
    pub label: String,
    /// What the operator counted.
    pub physical_count: i64,
    /// Net units moved by transactions (positive = in).
    pub adjustment: i64,
    /// `max(0, physical_count + adjustment)`.
    pub effective_count: i64,
    /// `effective_count × value`.
    pub line_total: Money,
    /// `physical_count + adjustment` was below zero and got clamped.
    pub over_withdrawn: bool,
}

/// Everything the summary card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Totals {
    /// One line per configured denomination, in table order.
    pub lines: Vec<DenominationLine>,
    pub notes_total: Money,
    pub coins_total: Money,
    pub damaged_total: Money,
    pub extras_total: Money,
    /// Notes + coins + damaged.
    pub physical_total: Money,
    /// Physical + extras.
    pub grand_total: Money,
    /// Σ `total_value` of `in` transactions. Informational only.
    pub inflow_total: Money,
    /// Σ `total_value` of `out` transactions. Informational only.
    pub outflow_total: Money,
}

impl Totals {
    pub fn line(&self, value: Money) -> Option<&DenominationLine> {
        self.lines.iter().find(|l| l.value == value)
    }

    pub fn category_total(&self, category: Category) -> Money {
        match category {
            Category::Note => self.notes_total,
            Category::Coin => self.coins_total,
        }
    }

    pub fn over_withdrawn(&self) -> impl Iterator<Item = &DenominationLine> {
        self.lines.iter().filter(|l| l.over_withdrawn)
    }

    pub fn has_over_withdrawal(&self) -> bool {
        self.over_withdrawn().next().is_some()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Derives totals from the current state of `store`.
///
/// ```rust
/// use tesouraria_core::{reconcile, Direction, LedgerStore, Money};
///
/// let mut store = LedgerStore::default();
/// let hundred = Money::from_cents(10_000);
/// store.add_transaction("", hundred, 3, Direction::Out).unwrap();
///
/// let totals = reconcile(&store);
/// let line = totals.line(hundred).unwrap();
/// assert_eq!(line.effective_count, 0);
/// assert!(line.over_withdrawn);
/// assert!(totals.notes_total.is_zero());
/// ```
pub fn reconcile(store: &LedgerStore) -> Totals {
    reconcile_parts(
        store.table(),
        store.counts(),
        store.damaged(),
        store.extras(),
        store.transactions(),
    )
}

/// Same as [`reconcile`], over borrowed parts.
///
/// `counts` is indexed by table position; missing trailing entries count as 0.
pub fn reconcile_parts(
    table: &DenominationTable,
    counts: &[i64],
    damaged: &DamagedCurrency,
    extras: &[ExtraEntry],
    transactions: &[Transaction],
) -> Totals {
    let adjustments = net_adjustments(table, transactions);

    let lines: Vec<DenominationLine> = table
        .iter()
        .enumerate()
        .map(|(pos, d)| {
            let physical_count = counts.get(pos).copied().unwrap_or(0);
            let adjustment = adjustments[pos];
            let effective = effective_count(physical_count, adjustment);
            DenominationLine {
                value: d.value,
                category: d.category,
                label: d.label.clone(),
                physical_count,
                adjustment,
                effective_count: effective,
                line_total: d.value.multiply_quantity(effective),
                over_withdrawn: physical_count.saturating_add(adjustment) < 0,
            }
        })
        .collect();

    let subtotal = |category: Category| -> Money {
        lines
            .iter()
            .filter(|l| l.category == category)
            .map(|l| l.line_total)
            .sum()
    };
    let notes_total = subtotal(Category::Note);
    let coins_total = subtotal(Category::Coin);

    let damaged_total = damaged.total();
    let extras_total: Money = extras.iter().map(|e| e.value).sum();

    let physical_total = notes_total + coins_total + damaged_total;
    let grand_total = physical_total + extras_total;

    let flow = |direction: Direction| -> Money {
        transactions
            .iter()
            .filter(|t| t.direction == direction)
            .map(|t| t.total_value)
            .sum()
    };

    Totals {
        notes_total,
        coins_total,
        damaged_total,
        extras_total,
        physical_total,
        grand_total,
        inflow_total: flow(Direction::In),
        outflow_total: flow(Direction::Out),
        lines,
    }
}

/// Net units moved per denomination, indexed by table position.
///
/// Transactions for values outside `table` are skipped.
pub fn net_adjustments(table: &DenominationTable, transactions: &[Transaction]) -> Vec<i64> {
    let mut adjustments = vec![0i64; table.len()];
    for tx in transactions {
        if let Some(pos) = table.position(tx.denomination_value) {
            adjustments[pos] = adjustments[pos].saturating_add(tx.signed_quantity());
        }
    }
    adjustments
}

/// `max(0, physical + adjustment)`.
#[inline]
pub fn effective_count(physical: i64, adjustment: i64) -> i64 {
    physical.saturating_add(adjustment).max(0)
}

// =============================================================================
// Unit Tests
// =============================================================================
