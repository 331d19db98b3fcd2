//! # Denominations
//!
//! The notes and coins a drawer can hold, and the fixed table of them that a
//! session is started with.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  position:   0     1     2    3    4    5    6  │  7     8     9   ...  │
//! │  value:    200   100    50   20   10    5    2  │ 1,00  0,50  0,25 ...  │
//! │  category: ─────────────── Note ──────────────  │ ──────── Coin ─────── │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Every per-denomination quantity in the ledger (physical counts, net
//! adjustments, effective counts) is a plain `Vec` indexed by this position,
//! so the table is looked up once per operation and never hashed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::validate_denomination_table;

// =============================================================================
// Category
// =============================================================================

/// Whether a denomination is a banknote or a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Note,
    Coin,
}

impl Category {
    /// Heading used when a report groups denominations.
    pub const fn heading(&self) -> &'static str {
        match self {
            Category::Note => "Cédulas",
            Category::Coin => "Moedas",
        }
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// A single note or coin value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denomination {
    /// Face value. Positive and unique within a table.
    pub value: Money,
    pub category: Category,
    /// Display string, e.g. `R$ 200` or `R$ 0,50`.
    pub label: String,
}

impl Denomination {
    pub fn new(value: Money, category: Category, label: impl Into<String>) -> Self {
        Denomination {
            value,
            category,
            label: label.into(),
        }
    }

    /// A banknote of whole reais, labelled without centavos (`R$ 50`).
    pub fn note(reais: i64) -> Self {
        Denomination::new(
            Money::from_major_minor(reais, 0),
            Category::Note,
            format!("R$ {}", reais),
        )
    }

    /// A coin, labelled with centavos (`R$ 0,25`).
    pub fn coin(cents: i64) -> Self {
        let value = Money::from_cents(cents);
        Denomination::new(value, Category::Coin, value.to_string())
    }
}

// =============================================================================
// Denomination Table
// =============================================================================

/// The ordered, validated set of denominations for one session.
///
/// ## Invariants
/// - Not empty
/// - Every value positive, no value listed twice, no blank label
/// - Notes come before coins; within a category the configured order is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DenominationTable {
    denominations: Vec<Denomination>,
}

impl DenominationTable {
    /// Builds a table from configured denominations.
    ///
    /// ```rust
    /// use tesouraria_core::{Category, Denomination, DenominationTable, Money};
    ///
    /// let table = DenominationTable::new(vec![
    ///     Denomination::coin(50),
    ///     Denomination::note(10),
    /// ])
    /// .unwrap();
    ///
    /// // Notes are moved in front of coins
    /// assert_eq!(table.get(0).unwrap().category, Category::Note);
    /// assert!(DenominationTable::new(vec![]).is_err());
    /// ```
    pub fn new(denominations: Vec<Denomination>) -> CoreResult<Self> {
        validate_denomination_table(&denominations)?;

        let (notes, coins): (Vec<_>, Vec<_>) = denominations
            .into_iter()
            .partition(|d| d.category == Category::Note);

        Ok(DenominationTable {
            denominations: notes.into_iter().chain(coins).collect(),
        })
    }

    /// The Brazilian real table: notes R$ 200 to R$ 2, coins R$ 1,00 to R$ 0,05.
    pub fn brl() -> Self {
        let notes = [200, 100, 50, 20, 10, 5, 2].into_iter().map(Denomination::note);
        let coins = [100, 50, 25, 10, 5].into_iter().map(Denomination::coin);
        DenominationTable {
            denominations: notes.chain(coins).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Denomination> {
        self.denominations.iter()
    }

    pub fn as_slice(&self) -> &[Denomination] {
        &self.denominations
    }

    pub fn get(&self, position: usize) -> Option<&Denomination> {
        self.denominations.get(position)
    }

    /// Position of a value in the table, used to index per-denomination arrays.
    pub fn position(&self, value: Money) -> Option<usize> {
        self.denominations.iter().position(|d| d.value == value)
    }

    pub fn find(&self, value: Money) -> Option<&Denomination> {
        self.denominations.iter().find(|d| d.value == value)
    }

    pub fn contains(&self, value: Money) -> bool {
        self.position(value).is_some()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Denomination> {
        self.denominations
            .iter()
            .filter(move |d| d.category == category)
    }

    /// The denomination a fresh transaction form points at: the first note,
    /// or the first entry of a coin-only table.
    pub fn default_selection(&self) -> Money {
        self.in_category(Category::Note)
            .next()
            .or_else(|| self.denominations.first())
            .map(|d| d.value)
            .unwrap_or_default()
    }

    /// Label for a value, falling back to the formatted amount when the
    /// value is not configured.
    pub fn label_for(&self, value: Money) -> String {
        match self.find(value) {
            Some(d) => d.label.clone(),
            None => value.to_string(),
        }
    }

    /// Category for a value; unconfigured values are reported as notes.
    pub fn category_for(&self, value: Money) -> Category {
        self.find(value).map_or(Category::Note, |d| d.category)
    }
}

impl Default for DenominationTable {
    fn default() -> Self {
        DenominationTable::brl()
    }
}

impl<'a> IntoIterator for &'a DenominationTable {
    type Item = &'a Denomination;
    type IntoIter = std::slice::Iter<'a, Denomination>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_brl_table_layout() {
        let table = DenominationTable::brl();
        assert_eq!(table.len(), 12);
        assert_eq!(table.in_category(Category::Note).count(), 7);
        assert_eq!(table.in_category(Category::Coin).count(), 5);

        let first = table.get(0).unwrap();
        assert_eq!(first.value, Money::from_cents(20_000));
        assert_eq!(first.label, "R$ 200");

        let last = table.get(11).unwrap();
        assert_eq!(last.value, Money::from_cents(5));
        assert_eq!(last.label, "R$ 0,05");
    }

    #[test]
    fn test_brl_table_passes_validation() {
        let rebuilt = DenominationTable::new(DenominationTable::brl().as_slice().to_vec());
        assert_eq!(rebuilt, Ok(DenominationTable::brl()));
    }

    #[test]
    fn test_position_lookup() {
        let table = DenominationTable::brl();
        assert_eq!(table.position(Money::from_cents(20_000)), Some(0));
        assert_eq!(table.position(Money::from_cents(100)), Some(7));
        assert_eq!(table.position(Money::from_cents(300)), None);
        assert!(table.contains(Money::from_cents(25)));
    }

    #[test]
    fn test_one_real_is_a_coin() {
        let table = DenominationTable::brl();
        let one = table.find(Money::from_cents(100)).unwrap();
        assert_eq!(one.category, Category::Coin);
        assert_eq!(one.label, "R$ 1,00");
    }

    #[test]
    fn test_new_orders_notes_before_coins() {
        let table = DenominationTable::new(vec![
            Denomination::coin(25),
            Denomination::note(5),
            Denomination::coin(10),
            Denomination::note(100),
        ])
        .unwrap();

        let values: Vec<i64> = table.iter().map(|d| d.value.cents()).collect();
        assert_eq!(values, vec![500, 10_000, 25, 10]);
    }

    #[test]
    fn test_new_rejects_invalid_tables() {
        assert!(matches!(
            DenominationTable::new(vec![]),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));

        assert!(matches!(
            DenominationTable::new(vec![Denomination::note(5), Denomination::note(5)]),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));

        let zero = Denomination::new(Money::zero(), Category::Coin, "R$ 0,00");
        assert!(matches!(
            DenominationTable::new(vec![zero]),
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let unlabeled = Denomination::new(Money::from_cents(100), Category::Coin, "  ");
        assert!(DenominationTable::new(vec![unlabeled]).is_err());
    }

    #[test]
    fn test_fallbacks_for_unknown_values() {
        let table = DenominationTable::brl();
        assert_eq!(table.label_for(Money::from_cents(300)), "R$ 3,00");
        assert_eq!(table.category_for(Money::from_cents(300)), Category::Note);
        assert_eq!(table.label_for(Money::from_cents(50)), "R$ 0,50");
        assert_eq!(table.category_for(Money::from_cents(50)), Category::Coin);
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(
            DenominationTable::brl().default_selection(),
            Money::from_cents(20_000)
        );

        let coins_only = DenominationTable::new(vec![Denomination::coin(50)]).unwrap();
        assert_eq!(coins_only.default_selection(), Money::from_cents(50));
    }
}
