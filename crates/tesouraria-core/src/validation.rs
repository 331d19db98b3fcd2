//! # Validation Module
//!
//! Business-rule validation and operator-input coercion for Tesouraria.
//!
//! ## Two Kinds of Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Typed-in drawer values (counts, damaged, extras)                       │
//! │  ├── Entered keystroke by keystroke, often half-finished               │
//! │  └── COERCED: garbage → 0, negative count → 0   (never an error)       │
//! │                                                                         │
//! │  Things that create records or configure the session                    │
//! │  ├── Transaction quantity, denomination table                          │
//! │  └── VALIDATED: rejected with a ValidationError, nothing changes       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tesouraria_core::validation::{parse_amount, parse_count, validate_quantity};
//! use tesouraria_core::Money;
//!
//! assert_eq!(parse_count("12"), 12);
//! assert_eq!(parse_count("-4"), 0);
//! assert_eq!(parse_amount("abc"), Money::zero());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use crate::denomination::Denomination;
use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_TRANSACTION_DESCRIPTION;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a transaction quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Movimentações: Add                                                     │
/// │                                                                         │
/// │  Operator enters: out, R$ 100, quantity 3                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(3) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → transaction appended to the ledger                      │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Denomination Validators
// =============================================================================

/// Validates one configured denomination.
///
/// ## Rules
/// - Value must be positive
/// - Label must not be blank
pub fn validate_denomination(denomination: &Denomination) -> ValidationResult<()> {
    if !denomination.value.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "denomination value".to_string(),
        });
    }

    if denomination.label.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "denomination label".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole denomination table.
///
/// ## Rules
/// - At least one denomination
/// - Each denomination valid on its own
/// - No value listed twice (a value is the denomination's identity)
pub fn validate_denomination_table(denominations: &[Denomination]) -> ValidationResult<()> {
    if denominations.is_empty() {
        return Err(ValidationError::Required {
            field: "denominations".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(denominations.len());
    for denomination in denominations {
        validate_denomination(denomination)?;

        if !seen.insert(denomination.value) {
            return Err(ValidationError::Duplicate {
                field: "denomination value".to_string(),
                value: denomination.value.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// String Normalizers
// =============================================================================

/// Normalizes a transaction description.
///
/// ## Returns
/// The trimmed description, or the placeholder when nothing was typed.
///
/// ```rust
/// use tesouraria_core::validation::normalize_description;
///
/// assert_eq!(normalize_description("  Sangria "), "Sangria");
/// assert_eq!(normalize_description("   "), "Sem descrição");
/// ```
pub fn normalize_description(description: &str) -> String {
    let description = description.trim();

    if description.is_empty() {
        DEFAULT_TRANSACTION_DESCRIPTION.to_string()
    } else {
        description.to_string()
    }
}

// =============================================================================
// Lenient Operator Input
// =============================================================================

/// Reads the leading integer of typed text, the way a numeric field does:
/// `"12"` → 12, `"3.7"` → 3, `"12abc"` → 12, `"abc"` → `None`.
///
/// Leading whitespace and one sign are accepted. Values beyond `i64` saturate.
pub fn parse_quantity(input: &str) -> Option<i64> {
    let text = input.trim_start();
    let (negative, rest) = split_sign(text);

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Coerces typed text into a physical unit count.
///
/// Non-numeric text becomes 0; negative counts are clamped to 0.
pub fn parse_count(input: &str) -> i64 {
    parse_quantity(input).unwrap_or(0).max(0)
}

/// Coerces typed text into an amount.
///
/// Reads the leading decimal number (`.` or `,` as separator) and ignores
/// anything after it: `"12,50 reais"` → R$ 12,50. Text without a number
/// becomes zero. The sign is kept; callers that need non-negative amounts
/// clamp afterwards.
pub fn parse_amount(input: &str) -> Money {
    let text = input.trim_start();
    let (_, rest) = split_sign(text);
    let sign_len = text.len() - rest.len();

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let mut end = int_len;
    if matches!(rest.as_bytes().get(int_len), Some(b'.') | Some(b',')) {
        let frac_len = rest[int_len + 1..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if int_len + frac_len > 0 {
            end = int_len + 1 + frac_len;
        }
    }

    Money::parse_decimal(&text[..sign_len + end]).unwrap_or_default()
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
