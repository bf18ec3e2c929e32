//! Event to receivable matching.

use crate::cnab::PaymentEvent;
use crate::receivable::Receivable;

/// Picks the receivable a bank event pays.
pub trait MatchStrategy: Send + Sync {
    /// Returns the matched receivable among `candidates`, if any.
    fn find<'a>(&self, event: &PaymentEvent, candidates: &'a [Receivable]) -> Option<&'a Receivable>;
}

/// Literal, case-sensitive substring search of the reference tokens in the
/// receivable's matching text. First hit in candidate order wins.
///
/// Ambiguous by nature: token `123` also matches notes containing `41234`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn find<'a>(&self, event: &PaymentEvent, candidates: &'a [Receivable]) -> Option<&'a Receivable> {
        candidates.iter().find(|receivable| {
            let text = receivable.matching_text();
            event.reference_tokens().any(|token| text.contains(token))
        })
    }
}
