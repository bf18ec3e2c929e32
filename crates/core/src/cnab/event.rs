//! Decoded bank return events.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::layout::CnabLayout;

/// What the bank reports happened to a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    /// Title settled (occurrences 06 and 17).
    Paid,
    /// Title registered at the bank (occurrence 02).
    Registered,
    /// Instruction rejected (occurrence 09).
    Rejected,
    /// Any other occurrence code.
    Unknown,
}

impl PaymentOutcome {
    /// Maps a two-digit occurrence code.
    #[must_use]
    pub fn from_occurrence(code: &str) -> Self {
        match code {
            "06" | "17" => Self::Paid,
            "02" => Self::Registered,
            "09" => Self::Rejected,
            _ => Self::Unknown,
        }
    }
}

/// Which detail record an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordSegment {
    /// CNAB240 segment T: title identification and face value.
    T,
    /// CNAB240 segment U: amounts and dates of the settlement.
    U,
    /// CNAB400 detail record.
    Detail,
}

/// One payment reported by a bank return file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// Source layout.
    pub layout: CnabLayout,
    /// Source record.
    pub segment: RecordSegment,
    /// Nosso número, trimmed.
    pub reference_token_1: String,
    /// Document number, trimmed.
    pub reference_token_2: String,
    /// Amount actually received.
    pub paid_amount: Decimal,
    /// Title face value, when the record carries it.
    pub face_amount: Option<Decimal>,
    /// Interest charged by the bank.
    pub interest: Decimal,
    /// Discount granted.
    pub discount: Decimal,
    /// Title due date, when the record carries it.
    pub due_date: Option<NaiveDate>,
    /// Payment date (credit date as fallback).
    pub paid_at: Option<NaiveDate>,
    /// Occurrence outcome.
    pub outcome: PaymentOutcome,
    /// SHA-256 of the layout and the source line(s), hex encoded.
    pub fingerprint: String,
}

impl PaymentEvent {
    /// Returns true if this event moves money into a receivable.
    ///
    /// Explicit settlements always do. Unknown occurrences count only when
    /// they carry a positive amount.
    #[must_use]
    pub fn is_settlement(&self) -> bool {
        match self.outcome {
            PaymentOutcome::Paid => true,
            PaymentOutcome::Unknown => self.paid_amount > Decimal::ZERO,
            PaymentOutcome::Registered | PaymentOutcome::Rejected => false,
        }
    }

    /// Non-empty reference tokens, nosso número first.
    pub fn reference_tokens(&self) -> impl Iterator<Item = &str> {
        [
            self.reference_token_1.as_str(),
            self.reference_token_2.as_str(),
        ]
        .into_iter()
        .filter(|token| !token.is_empty())
    }

    /// Completes a segment T event with the segment U record that follows it.
    ///
    /// Identification comes from T; amounts and dates come from U. A blank U
    /// amount falls back to the face value.
    #[must_use]
    pub fn with_segment_u(self, u: Self) -> Self {
        let paid_amount = if u.paid_amount > Decimal::ZERO {
            u.paid_amount
        } else {
            self.paid_amount
        };
        let outcome = match u.outcome {
            PaymentOutcome::Unknown => self.outcome,
            known => known,
        };
        let fingerprint = digest(self.layout, &[&self.fingerprint, &u.fingerprint]);

        Self {
            paid_amount,
            interest: u.interest,
            discount: u.discount,
            paid_at: u.paid_at.or(self.paid_at),
            outcome,
            fingerprint,
            ..self
        }
    }
}

/// Hex SHA-256 over the layout name and the given parts, newline separated.
pub(crate) fn digest(layout: CnabLayout, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(layout.as_str().as_bytes());
    for part in parts {
        hasher.update(b"\n");
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
