//! Line decoder.

use rust_decimal::Decimal;
use thiserror::Error;

use super::event::{digest, PaymentEvent, PaymentOutcome, RecordSegment};
use super::fields::{amount, date, slice, text};
use super::layout::{cnab240, cnab400, CnabLayout, Field};

/// Why a line produced no event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The line is not as wide as the layout requires.
    #[error("expected {expected} bytes, found {actual}")]
    WrongLength {
        /// Layout width.
        expected: usize,
        /// Actual width.
        actual: usize,
    },

    /// The line has non-ASCII bytes, so byte offsets are meaningless.
    #[error("line contains non-ASCII characters")]
    NonAscii,

    /// Header, trailer or other non-detail record.
    #[error("not a detail record")]
    NotDetail,

    /// CNAB240 segment other than T or U.
    #[error("unsupported segment '{0}'")]
    UnsupportedSegment(String),

    /// A numeric field holds something other than digits.
    #[error("malformed {0}")]
    MalformedAmount(&'static str),
}

impl SkipReason {
    /// Returns true for detail records with corrupt content, as opposed to
    /// records that are simply not payments.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::NonAscii | Self::MalformedAmount(_))
    }
}

/// Stateless CNAB line decoder.
pub struct CnabParser;

impl CnabParser {
    /// Decodes one line, or `None` if it is not a well-formed detail record.
    #[must_use]
    pub fn parse(line: &str, layout: CnabLayout) -> Option<PaymentEvent> {
        Self::decode(line, layout).ok()
    }

    /// Decodes one line, reporting why it was skipped.
    ///
    /// A trailing line terminator is ignored. Never panics, whatever the input.
    pub fn decode(line: &str, layout: CnabLayout) -> Result<PaymentEvent, SkipReason> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let expected = layout.line_length();
        if line.len() != expected {
            return Err(SkipReason::WrongLength {
                expected,
                actual: line.len(),
            });
        }
        if !line.is_ascii() {
            return Err(SkipReason::NonAscii);
        }

        match layout {
            CnabLayout::Cnab240 => decode_cnab240(line),
            CnabLayout::Cnab400 => decode_cnab400(line),
        }
    }
}

fn money(line: &str, field: Field, name: &'static str) -> Result<Decimal, SkipReason> {
    amount(line, field).ok_or(SkipReason::MalformedAmount(name))
}

fn decode_cnab240(line: &str) -> Result<PaymentEvent, SkipReason> {
    if slice(line, cnab240::RECORD_TYPE) != cnab240::DETAIL {
        return Err(SkipReason::NotDetail);
    }

    let layout = CnabLayout::Cnab240;
    let outcome = PaymentOutcome::from_occurrence(slice(line, cnab240::OCCURRENCE));
    let fingerprint = digest(layout, &[line]);

    match slice(line, cnab240::SEGMENT) {
        "T" => {
            let face = money(line, cnab240::T_FACE_AMOUNT, "face amount")?;
            Ok(PaymentEvent {
                layout,
                segment: RecordSegment::T,
                reference_token_1: text(line, cnab240::T_NOSSO_NUMERO),
                reference_token_2: text(line, cnab240::T_DOCUMENT),
                paid_amount: face,
                face_amount: Some(face),
                interest: Decimal::ZERO,
                discount: Decimal::ZERO,
                due_date: date(line, cnab240::T_DUE_DATE),
                paid_at: None,
                outcome,
                fingerprint,
            })
        }
        "U" => Ok(PaymentEvent {
            layout,
            segment: RecordSegment::U,
            reference_token_1: String::new(),
            reference_token_2: String::new(),
            paid_amount: money(line, cnab240::U_PAID_AMOUNT, "paid amount")?,
            face_amount: None,
            interest: money(line, cnab240::U_INTEREST, "interest")?,
            discount: money(line, cnab240::U_DISCOUNT, "discount")?,
            due_date: None,
            paid_at: date(line, cnab240::U_PAYMENT_DATE)
                .or_else(|| date(line, cnab240::U_CREDIT_DATE)),
            outcome,
            fingerprint,
        }),
        other => Err(SkipReason::UnsupportedSegment(other.to_string())),
    }
}

fn decode_cnab400(line: &str) -> Result<PaymentEvent, SkipReason> {
    if slice(line, cnab400::RECORD_TYPE) != cnab400::DETAIL {
        return Err(SkipReason::NotDetail);
    }

    let layout = CnabLayout::Cnab400;
    Ok(PaymentEvent {
        layout,
        segment: RecordSegment::Detail,
        reference_token_1: text(line, cnab400::NOSSO_NUMERO),
        reference_token_2: text(line, cnab400::DOCUMENT),
        paid_amount: money(line, cnab400::PAID_AMOUNT, "paid amount")?,
        face_amount: Some(money(line, cnab400::FACE_AMOUNT, "face amount")?),
        interest: money(line, cnab400::INTEREST, "interest")?,
        discount: money(line, cnab400::DISCOUNT, "discount")?,
        due_date: date(line, cnab400::DUE_DATE),
        paid_at: date(line, cnab400::PAYMENT_DATE),
        outcome: PaymentOutcome::from_occurrence(slice(line, cnab400::OCCURRENCE)),
        fingerprint: digest(layout, &[line]),
    })
}
