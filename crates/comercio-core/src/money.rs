//! # Money Module
//!
//! Converts product prices between the two representations the system uses.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE EACH REPRESENTATION LIVES                                        │
//! │                                                                         │
//! │  Request body        Storage (SQLite)        Response body             │
//! │  "price": 39.05  ──► price = 3905 (INTEGER) ──► "price": 39.05         │
//! │        decimal_to_minor_units        minor_units_to_decimal             │
//! │                                                                         │
//! │  Arithmetic and persistence only ever see integer cents.               │
//! │  Decimals exist at the HTTP boundary and nowhere else.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Precision
//! Currency has two decimal digits. Inputs with more digits are rounded
//! half up on the way in, so the two conversions are only inverses for
//! values that already have at most two decimals.
//!
//! ## Usage
//! ```rust
//! use comercio_core::money::{decimal_to_minor_units, minor_units_to_decimal};
//!
//! assert_eq!(decimal_to_minor_units(10.999), 1100);
//! assert_eq!(decimal_to_minor_units(5.555), 556);
//! assert_eq!(minor_units_to_decimal(1), 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Minor units per major unit (cents per real).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Largest amount in minor units accepted from callers (2^53).
///
/// Every integer up to here is exact in an `f64`, so stored cents survive
/// the decimal conversion on the way out.
pub const MAX_MINOR_UNITS: i64 = 1 << 53;

// =============================================================================
// Conversion Functions
// =============================================================================

/// Converts a decimal currency value to integer minor units.
///
/// Multiplies by 100 and rounds half up.
///
/// ## Example
/// ```rust
/// use comercio_core::money::decimal_to_minor_units;
///
/// assert_eq!(decimal_to_minor_units(39.05), 3905);
/// assert_eq!(decimal_to_minor_units(100.99), 10099);
/// assert_eq!(decimal_to_minor_units(0.0), 0);
/// ```
pub fn decimal_to_minor_units(value: f64) -> i64 {
    round_half_up(value * MINOR_UNITS_PER_MAJOR as f64) as i64
}

/// Converts integer minor units to a decimal with two places.
///
/// ## Example
/// ```rust
/// use comercio_core::money::minor_units_to_decimal;
///
/// assert_eq!(minor_units_to_decimal(3905), 39.05);
/// assert_eq!(minor_units_to_decimal(333), 3.33);
/// ```
pub fn minor_units_to_decimal(minor: i64) -> f64 {
    minor as f64 / MINOR_UNITS_PER_MAJOR as f64
}

/// Same as [`minor_units_to_decimal`] for a minor-unit amount that arrived
/// as a float. The amount is first rounded to a whole cent.
pub fn fractional_minor_units_to_decimal(minor: f64) -> f64 {
    round_half_up(minor) / MINOR_UNITS_PER_MAJOR as f64
}

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// `f64::round` sends ties away from zero, which differs for negatives.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A price in minor currency units (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches SQLite's INTEGER; validation keeps stored
///   prices non-negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use comercio_core::money::Money;
    ///
    /// let price = Money::from_cents(3905);
    /// assert_eq!(price.cents(), 3905);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding half up.
    ///
    /// ## Example
    /// ```rust
    /// use comercio_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(39.05).cents(), 3905);
    /// ```
    pub fn from_decimal(value: f64) -> Self {
        Money(decimal_to_minor_units(value))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a two-place decimal.
    pub fn to_decimal(&self) -> f64 {
        minor_units_to_decimal(self.0)
    }
}

/// Debug-friendly rendering: `39.05`, `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / MINOR_UNITS_PER_MAJOR,
            abs % MINOR_UNITS_PER_MAJOR
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
