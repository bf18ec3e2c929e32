//! Decoding of fixed-width numeric and date fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tesouraria_shared::types::Money;

use super::layout::Field;

/// Two-digit years above this pivot belong to the 1900s.
const CENTURY_PIVOT: i32 = 50;

/// Borrows a field out of an ASCII record whose length was already checked.
pub(crate) fn slice(line: &str, field: Field) -> &str {
    line.get(field.start..field.end).unwrap_or_default()
}

/// Trimmed text field.
pub(crate) fn text(line: &str, field: Field) -> String {
    slice(line, field).trim().to_string()
}

/// Amount in minor units. Blank is zero; anything but digits is `None`.
pub(crate) fn amount(line: &str, field: Field) -> Option<Decimal> {
    let raw = slice(line, field).trim();
    if raw.is_empty() {
        return Some(Decimal::ZERO);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().map(Money::from_minor_units)
}

/// `ddMMyyyy` or `ddMMyy`. Blank, all-zero and impossible dates are `None`.
pub(crate) fn date(line: &str, field: Field) -> Option<NaiveDate> {
    let raw = slice(line, field).trim();
    if raw.is_empty() || raw.bytes().all(|b| b == b'0') || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day: u32 = raw.get(0..2)?.parse().ok()?;
    let month: u32 = raw.get(2..4)?.parse().ok()?;
    let year: i32 = match raw.len() {
        8 => raw.get(4..8)?.parse().ok()?,
        6 => {
            let short: i32 = raw.get(4..6)?.parse().ok()?;
            if short > CENTURY_PIVOT {
                1900 + short
            } else {
                2000 + short
            }
        }
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}
