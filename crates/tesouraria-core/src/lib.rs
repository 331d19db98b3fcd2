//! # tesouraria-core: Pure Reconciliation Logic for Tesouraria
//!
//! This crate is the **heart** of Tesouraria. It holds one drawer-counting
//! session in memory and derives every total from it, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tesouraria Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (operator console)                 │   │
//! │  │   count ──► damaged ──► extras ──► add/remove ──► show totals   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ mutations / accessors                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ tesouraria-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │   money   │  │denomination │  │  ledger   │  │reconcile │  │   │
//! │  │   │   Money   │  │   Table     │  │LedgerStore│  │  Totals  │  │   │
//! │  │   └───────────┘  └─────────────┘  └───────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • PURE DERIVATION                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer centavo arithmetic (no floating point!)
//! - [`denomination`] - Notes/coins and the fixed denomination table
//! - [`types`] - Session entities (transactions, extras, damaged currency)
//! - [`ledger`] - The mutable session store
//! - [`reconcile`] - Pure derivation of drawer totals
//! - [`validation`] - Business rules and lenient operator-input coercion
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tesouraria_core::{DenominationTable, Direction, LedgerStore, Money};
//!
//! let mut store = LedgerStore::new(DenominationTable::brl());
//! let hundred = Money::from_cents(10_000);
//! let one = Money::from_cents(100);
//!
//! store.set_count(hundred, 2);
//! store.set_count(one, 5);
//! store
//!     .add_transaction("Sangria", hundred, 1, Direction::Out)
//!     .unwrap();
//!
//! let totals = store.totals();
//! assert_eq!(totals.notes_total, Money::from_cents(10_000));
//! assert_eq!(totals.coins_total, Money::from_cents(500));
//! assert_eq!(totals.grand_total, Money::from_cents(10_500));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod denomination;
pub mod error;
pub mod ledger;
pub mod money;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use denomination::{Category, Denomination, DenominationTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{CountEntry, LedgerSnapshot, LedgerStore};
pub use money::Money;
pub use reconcile::{reconcile, DenominationLine, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Description stored on a transaction entered with a blank description.
pub const DEFAULT_TRANSACTION_DESCRIPTION: &str = "Sem descrição";

/// Descriptions of the extra-entry slots every session starts with.
///
/// The session always has exactly these slots (ids 1 and 2, value zero);
/// a reset brings them back.
pub const SEEDED_EXTRA_DESCRIPTIONS: [&str; 2] = ["Entrada Extra 1", "Entrada Extra 2"];
