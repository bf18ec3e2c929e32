//! Fixed-width bank return files (CNAB240 and CNAB400).
//!
//! A return file is a sequence of fixed-width ASCII lines. Header and trailer
//! records are skipped; detail records decode into [`PaymentEvent`]s.

mod event;
mod fields;
mod layout;
pub(crate) mod parser;

#[cfg(test)]
mod parser_props;

pub use event::{PaymentEvent, PaymentOutcome, RecordSegment};
pub use layout::CnabLayout;
pub use parser::{CnabParser, SkipReason};
