//! # Domain Types
//!
//! Session entities recorded alongside the physical counts.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Transaction   │   │   ExtraEntry    │   │ DamagedCurrency │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (monotonic) │   │  id (seeded)    │   │  notes_value    │       │
//! │  │  denomination   │   │  description    │   │  coins_value    │       │
//! │  │  quantity       │   │  value (signed) │   └─────────────────┘       │
//! │  │  direction      │   └─────────────────┘                              │
//! │  │  total_value    │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │    Direction    │   │TransactionDraft │       │
//! │                        │  In / Out       │   │ (entry form)    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A transaction freezes `total_value` when it is created. Later changes to
//! the denomination table never rewrite past entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::SEEDED_EXTRA_DESCRIPTIONS;

// =============================================================================
// Identifiers
// =============================================================================

/// Transaction identifier, assigned in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Extra-entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtraId(pub u32);

impl fmt::Display for ExtraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Whether a manual transaction put units into the drawer or took them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Entrada: units added on top of the physical count.
    In,
    /// Saída: units taken from the physical count.
    Out,
}

impl Direction {
    /// +1 for `In`, -1 for `Out`.
    #[inline]
    pub const fn sign(&self) -> i64 {
        match self {
            Direction::In => 1,
            Direction::Out => -1,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// New transactions default to withdrawals, the common case at shift end.
impl Default for Direction {
    fn default() -> Self {
        Direction::Out
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A manual in/out adjustment tied to one denomination.
///
/// Immutable once created; the only way to change one is to remove it and
/// add another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Face value of the denomination moved.
    pub denomination_value: Money,
    /// Number of units moved. Always positive.
    pub quantity: i64,
    pub direction: Direction,
    /// `denomination_value × quantity`, frozen at creation.
    pub total_value: Money,
    #[ts(as = "String")]
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Quantity with the direction applied: positive for `In`, negative for `Out`.
    #[inline]
    pub fn signed_quantity(&self) -> i64 {
        self.quantity * self.direction.sign()
    }
}

// =============================================================================
// Extra Entries
// =============================================================================

/// An ad-hoc cash amount counted outside the denomination grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExtraEntry {
    pub id: ExtraId,
    /// Free text, may be empty.
    pub description: String,
    /// Signed; a negative entry reduces the grand total.
    pub value: Money,
}

impl ExtraEntry {
    /// The slots a session starts with (and returns to on reset).
    pub fn seeded() -> Vec<ExtraEntry> {
        SEEDED_EXTRA_DESCRIPTIONS
            .iter()
            .zip(1u32..)
            .map(|(description, id)| ExtraEntry {
                id: ExtraId(id),
                description: (*description).to_string(),
                value: Money::zero(),
            })
            .collect()
    }
}

/// An edit to one field of an extra entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraUpdate {
    Description(String),
    Value(Money),
}

// =============================================================================
// Damaged Currency
// =============================================================================

/// Which damaged-currency amount is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DamagedField {
    Notes,
    Coins,
}

/// Unusable notes and coins, recorded as free amounts rather than unit counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DamagedCurrency {
    pub notes_value: Money,
    pub coins_value: Money,
}

impl DamagedCurrency {
    pub fn get(&self, field: DamagedField) -> Money {
        match field {
            DamagedField::Notes => self.notes_value,
            DamagedField::Coins => self.coins_value,
        }
    }

    pub fn total(&self) -> Money {
        self.notes_value + self.coins_value
    }
}

// =============================================================================
// Transaction Draft
// =============================================================================

/// The pending "new transaction" form.
///
/// `quantity` stays as typed text so an unfinished entry ("", "1") can be
/// held without being judged until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionDraft {
    pub description: String,
    pub denomination_value: Money,
    pub quantity: String,
    pub direction: Direction,
}

impl TransactionDraft {
    /// An empty form pointing at `denomination_value`.
    pub fn new(denomination_value: Money) -> Self {
        TransactionDraft {
            description: String::new(),
            denomination_value,
            quantity: String::new(),
            direction: Direction::default(),
        }
    }

    /// Clears the typed fields after a successful submit. The selected
    /// denomination and direction are kept for the next entry.
    pub fn clear_entry(&mut self) {
        self.description.clear();
        self.quantity.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_sign_and_default() {
        assert_eq!(Direction::In.sign(), 1);
        assert_eq!(Direction::Out.sign(), -1);
        assert_eq!(Direction::default(), Direction::Out);
        assert_eq!(Direction::In.to_string(), "in");
    }

    #[test]
    fn test_signed_quantity() {
        let mut tx = Transaction {
            id: TransactionId(1),
            description: "Troco".to_string(),
            denomination_value: Money::from_cents(1000),
            quantity: 3,
            direction: Direction::In,
            total_value: Money::from_cents(3000),
            recorded_at: Utc::now(),
        };
        assert_eq!(tx.signed_quantity(), 3);

        tx.direction = Direction::Out;
        assert_eq!(tx.signed_quantity(), -3);
    }

    #[test]
    fn test_seeded_extras() {
        let extras = ExtraEntry::seeded();
        assert_eq!(extras.len(), 2);
        assert_eq!(extras[0].id, ExtraId(1));
        assert_eq!(extras[0].description, "Entrada Extra 1");
        assert_eq!(extras[1].id, ExtraId(2));
        assert_eq!(extras[1].description, "Entrada Extra 2");
        assert!(extras.iter().all(|e| e.value.is_zero()));
    }

    #[test]
    fn test_damaged_total() {
        let damaged = DamagedCurrency {
            notes_value: Money::from_cents(5000),
            coins_value: Money::from_cents(125),
        };
        assert_eq!(damaged.total(), Money::from_cents(5125));
        assert_eq!(damaged.get(DamagedField::Coins), Money::from_cents(125));
    }

    #[test]
    fn test_draft_clear_keeps_selection() {
        let mut draft = TransactionDraft::new(Money::from_cents(5000));
        draft.description = "Sangria".to_string();
        draft.quantity = "4".to_string();
        draft.direction = Direction::In;

        draft.clear_entry();

        assert!(draft.description.is_empty());
        assert!(draft.quantity.is_empty());
        assert_eq!(draft.denomination_value, Money::from_cents(5000));
        assert_eq!(draft.direction, Direction::In);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&TransactionId(7)).unwrap();
        assert_eq!(json, "7");
        assert_eq!(TransactionId(7).to_string(), "#7");
    }
}
