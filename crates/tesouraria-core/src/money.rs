//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Counting a drawer in floating point:                                   │
//! │    3 × R$ 0,10 = 0.30000000000000004  ❌ WRONG!                         │
//! │                                                                         │
//! │  Recomputed on every keystroke, the error drifts and two identical      │
//! │  drawers can print different totals.                                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    3 × 10 centavos = 30 centavos, every time                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tesouraria_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let coin = Money::from_cents(25); // R$ 0,25
//!
//! // Arithmetic operations
//! let roll = coin * 40;                   // R$ 10,00
//! let total = roll + Money::from_cents(5); // R$ 10,05
//! assert_eq!(total.to_string(), "R$ 10,05");
//!
//! // Operator text is parsed exactly, never through f64
//! assert_eq!(Money::parse_decimal("0,50"), Some(Money::from_cents(50)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: Extra entries may be negative (a withdrawal noted by hand)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Denomination.value ──┬──► effective count × value ──► notes/coins      │
/// │                       │                                                 │
/// │                       └──► Transaction.total_value (frozen)             │
/// │                                                                         │
/// │  DamagedCurrency ──► damaged_total ──┐                                  │
/// │  ExtraEntry.value ──► extras_total ──┴──► physical / grand total        │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tesouraria_core::money::Money;
    ///
    /// let note = Money::from_cents(20_000); // R$ 200,00
    /// assert_eq!(note.cents(), 20_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from reais and centavos.
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -R$ 5,50.
    ///
    /// ```rust
    /// use tesouraria_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Clamps negative amounts to zero.
    ///
    /// ```rust
    /// use tesouraria_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-300).non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(300).non_negative().cents(), 300);
    /// ```
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Multiplies money by a unit count.
    ///
    /// ## User Workflow
    /// ```text
    /// Denomination: R$ 50
    /// Effective count: 7
    ///      │
    ///      ▼
    /// multiply_quantity(7) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line value: R$ 350,00
    /// ```
    ///
    /// Saturates instead of wrapping: a drawer cannot hold i64::MAX centavos,
    /// but typed-in garbage counts must not panic the session.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Parses a decimal amount exactly, without going through `f64`.
    ///
    /// ## Accepted Forms
    /// - Optional leading `+` / `-`
    /// - Integer part, fractional part, or both, separated by `.` or `,`
    /// - Surrounding whitespace is ignored
    ///
    /// More than two fractional digits are rounded to the nearest centavo,
    /// half away from zero. Anything else (empty, letters, two separators,
    /// overflow) returns `None`.
    ///
    /// ```rust
    /// use tesouraria_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("12.5"), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::parse_decimal("-20"), Some(Money::from_cents(-2000)));
    /// assert_eq!(Money::parse_decimal(",05"), Some(Money::from_cents(5)));
    /// assert_eq!(Money::parse_decimal("0.125"), Some(Money::from_cents(13)));
    /// assert_eq!(Money::parse_decimal("abc"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let text = input.trim();
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let (int_part, frac_part) = match digits.find(|c: char| c == '.' || c == ',') {
            Some(idx) => (&digits[..idx], &digits[idx + 1..]),
            None => (digits, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return None;
        }

        let major: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };

        let mut frac = frac_part.bytes().map(|b| i64::from(b - b'0'));
        let tenths = frac.next().unwrap_or(0);
        let hundredths = frac.next().unwrap_or(0);
        let round_up = frac.next().map_or(0, |d| i64::from(d >= 5));

        let cents = major
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths + round_up)?;

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Plain decimal form with a `.` separator, e.g. `1234.50` or `-20.00`.
    ///
    /// This is the form [`Money::parse_decimal`] reads back.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money the way a Brazilian drawer report prints it:
/// `R$ 1.234,56`, `-R$ 20,00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

/// Formats an integer with `.` every three digits (`1234567` → `1.234.567`).
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds, like `multiply_quantity`: totals
// built from absurd typed-in counts pin at the limit instead of wrapping.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by a unit count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "R$ 10,99");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::from_cents(-2000).to_string(), "-R$ 20,00");
        assert_eq!(Money::zero().to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(123_456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(100_000_000).to_string(), "R$ 1.000.000,00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-a).cents(), -1000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.cents(), 500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        let min = Money::from_cents(i64::MIN);

        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(min - Money::from_cents(1), min);
        assert_eq!(-min, max);

        let mut acc = max;
        acc += max;
        assert_eq!(acc, max);

        let total: Money = [max, max, Money::from_cents(-5)].iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX - 5));
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(5000), Money::from_cents(-2000)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(3000));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
        assert!(negative.non_negative().is_zero());
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
        assert_eq!(
            Money::from_cents(20_000).multiply_quantity(i64::MAX).cents(),
            i64::MAX
        );
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(Money::parse_decimal("100"), Some(Money::from_cents(10_000)));
        assert_eq!(Money::parse_decimal("0.50"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("0,5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal("  7,25 "), Some(Money::from_cents(725)));
        assert_eq!(Money::parse_decimal("+3"), Some(Money::from_cents(300)));
        assert_eq!(Money::parse_decimal("-20"), Some(Money::from_cents(-2000)));
        assert_eq!(Money::parse_decimal("5."), Some(Money::from_cents(500)));
    }

    #[test]
    fn test_parse_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::parse_decimal("0.125"), Some(Money::from_cents(13)));
        assert_eq!(Money::parse_decimal("0.124"), Some(Money::from_cents(12)));
        assert_eq!(Money::parse_decimal("-0.125"), Some(Money::from_cents(-13)));
        assert_eq!(Money::parse_decimal("1.9999"), Some(Money::from_cents(200)));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("-"), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("1.2.3"), None);
        assert_eq!(Money::parse_decimal("12a"), None);
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_to_decimal_string() {
        assert_eq!(Money::from_cents(123450).to_decimal_string(), "1234.50");
        assert_eq!(Money::from_cents(-2000).to_decimal_string(), "-20.00");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");

        let m = Money::from_cents(-987);
        assert_eq!(Money::parse_decimal(&m.to_decimal_string()), Some(m));
    }

    /// 0.1 + 0.2 must be exactly 0.3 here, unlike f64.
    #[test]
    fn test_no_floating_point_drift() {
        let tenth = Money::parse_decimal("0.1").unwrap_or_default();
        let fifth = Money::parse_decimal("0.2").unwrap_or_default();
        assert_eq!(tenth + fifth, Money::from_cents(30));

        let repeated: Money = std::iter::repeat(Money::from_cents(10)).take(1000).sum();
        assert_eq!(repeated, Money::from_cents(10_000));
    }
}
