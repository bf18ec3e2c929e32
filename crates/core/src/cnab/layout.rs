//! CNAB layouts and their field positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported bank file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CnabLayout {
    /// FEBRABAN 240-byte layout (segments T and U).
    Cnab240,
    /// 400-byte layout (one detail record per title).
    Cnab400,
}

impl CnabLayout {
    /// Line width in bytes, excluding the line terminator.
    #[must_use]
    pub const fn line_length(self) -> usize {
        match self {
            Self::Cnab240 => 240,
            Self::Cnab400 => 400,
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cnab240 => "cnab240",
            Self::Cnab400 => "cnab400",
        }
    }

    /// Guesses the layout of a file from its first non-empty line.
    ///
    /// Exact widths win. Otherwise `.ret` / `.rem` files with lines wider
    /// than 250 bytes are taken as CNAB400.
    #[must_use]
    pub fn detect(first_line: &str, filename: Option<&str>) -> Option<Self> {
        let width = first_line.trim_end_matches(['\r', '\n']).len();
        match width {
            240 => return Some(Self::Cnab240),
            400 => return Some(Self::Cnab400),
            _ => {}
        }

        let extension = filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("ret" | "rem") if width > 250 => Some(Self::Cnab400),
            _ => None,
        }
    }
}

impl fmt::Display for CnabLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CnabLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cnab240" => Ok(Self::Cnab240),
            "cnab400" => Ok(Self::Cnab400),
            other => Err(format!("unsupported CNAB layout: {other}")),
        }
    }
}

/// A half-open byte range `[start, end)` inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    pub start: usize,
    pub end: usize,
}

impl Field {
    pub(crate) const fn at(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }
}

/// CNAB240 detail record positions.
pub(crate) mod cnab240 {
    use super::Field;

    pub const RECORD_TYPE: Field = Field::at(7, 1);
    pub const SEGMENT: Field = Field::at(13, 1);
    pub const OCCURRENCE: Field = Field::at(15, 2);

    // Segment T
    pub const T_NOSSO_NUMERO: Field = Field::at(37, 20);
    pub const T_DOCUMENT: Field = Field::at(58, 15);
    pub const T_DUE_DATE: Field = Field::at(73, 8);
    pub const T_FACE_AMOUNT: Field = Field::at(81, 15);

    // Segment U
    pub const U_INTEREST: Field = Field::at(17, 15);
    pub const U_DISCOUNT: Field = Field::at(32, 15);
    pub const U_PAID_AMOUNT: Field = Field::at(77, 15);
    pub const U_PAYMENT_DATE: Field = Field::at(137, 8);
    pub const U_CREDIT_DATE: Field = Field::at(145, 8);

    pub const DETAIL: &str = "3";
}

/// CNAB400 detail record positions.
pub(crate) mod cnab400 {
    use super::Field;

    pub const RECORD_TYPE: Field = Field::at(0, 1);
    pub const NOSSO_NUMERO: Field = Field::at(62, 10);
    pub const OCCURRENCE: Field = Field::at(108, 2);
    pub const DUE_DATE: Field = Field::at(110, 6);
    pub const DOCUMENT: Field = Field::at(116, 10);
    pub const FACE_AMOUNT: Field = Field::at(152, 13);
    pub const DISCOUNT: Field = Field::at(240, 13);
    pub const PAID_AMOUNT: Field = Field::at(253, 13);
    pub const INTEREST: Field = Field::at(266, 13);
    pub const PAYMENT_DATE: Field = Field::at(295, 6);

    pub const DETAIL: &str = "1";
}
