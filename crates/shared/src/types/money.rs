//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the system is a `rust_decimal::Decimal` carried at cent precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places of the (single) operating currency.
pub const CENT_SCALE: u32 = 2;

/// Helpers for converting and rounding monetary amounts.
pub struct Money;

impl Money {
    /// The smallest currency unit (one cent).
    pub const MINOR_UNIT: Decimal = Decimal::from_parts(1, 0, 0, false, CENT_SCALE);

    /// Converts an integer count of minor units (cents) into an amount.
    ///
    /// This is a scale change, not a division: `12345` becomes `123.45` exactly.
    #[must_use]
    pub fn from_minor_units(cents: i64) -> Decimal {
        Decimal::new(cents, CENT_SCALE)
    }

    /// Rounds to cents, half away from zero (commercial rounding).
    #[must_use]
    pub fn round_cents(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Drops everything below one cent, rounding towards negative infinity.
    #[must_use]
    pub fn floor_cents(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::ToNegativeInfinity)
    }
}
