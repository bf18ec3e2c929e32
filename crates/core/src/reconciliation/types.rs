//! Import request and summary types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cnab::CnabLayout;

/// Direction of a bank file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportDirection {
    /// Inbound bank return file; reconciled.
    #[default]
    Retorno,
    /// Outbound instruction file; accepted and not processed.
    Remessa,
}

impl fmt::Display for ImportDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Retorno => "retorno",
            Self::Remessa => "remessa",
        })
    }
}

impl FromStr for ImportDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retorno" => Ok(Self::Retorno),
            "remessa" => Ok(Self::Remessa),
            other => Err(format!("unsupported file type: {other}")),
        }
    }
}

/// An uploaded bank file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    /// Layout; inferred from the first line when absent.
    pub layout: Option<CnabLayout>,
    /// File direction.
    pub direction: ImportDirection,
    /// Original filename, used for layout inference.
    pub filename: Option<String>,
    /// File content.
    pub content: String,
}

/// Counters of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Layout the file was read with.
    pub layout: Option<CnabLayout>,
    /// Payment events decoded.
    pub processed: usize,
    /// Events matched to an open receivable.
    pub matched: usize,
    /// Matched events that changed a receivable.
    pub applied: usize,
    /// Events with no matching open receivable.
    pub unmatched: usize,
    /// Matched events that do not move money (registrations, rejections).
    pub ignored: usize,
    /// Events already applied by an earlier import.
    pub duplicates: usize,
    /// Lines that are not payment records (headers, trailers, wrong width).
    pub skipped: usize,
    /// Per-line failures.
    pub errors: Vec<String>,
}
