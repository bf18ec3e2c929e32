//! Property-based tests for the CNAB line decoder.
//!
//! The decoder faces untrusted uploads: it must never panic and must only
//! accept lines of the exact layout width.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::layout::CnabLayout;
use super::parser::CnabParser;
use super::parser::fixtures::LineBuilder;

fn layout_strategy() -> impl Strategy<Value = CnabLayout> {
    prop_oneof![Just(CnabLayout::Cnab240), Just(CnabLayout::Cnab400)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Arbitrary text never panics the decoder.
    #[test]
    fn prop_arbitrary_input_never_panics(line in ".{0,450}", layout in layout_strategy()) {
        let _ = CnabParser::decode(&line, layout);
    }

    /// Lines of any other width are rejected.
    #[test]
    fn prop_wrong_width_rejected(width in 0usize..600, layout in layout_strategy()) {
        prop_assume!(width != layout.line_length());
        let line = "1".repeat(width);
        prop_assert!(CnabParser::parse(&line, layout).is_none());
    }

    /// Full-width printable ASCII never panics, whatever the field contents.
    #[test]
    fn prop_full_width_ascii_never_panics(
        body in proptest::collection::vec(0x20u8..0x7f, 400),
        layout in layout_strategy(),
    ) {
        let line: String = body[..layout.line_length()].iter().map(|&b| char::from(b)).collect();
        let _ = CnabParser::decode(&line, layout);
    }

    /// The paid amount is the digit field read as cents.
    #[test]
    fn prop_cnab400_amount_is_cents(cents in 0i64..10_000_000_000_000) {
        let line = LineBuilder::new(CnabLayout::Cnab400)
            .put(0, "1")
            .put(253, &format!("{cents:013}"))
            .build();
        let event = CnabParser::parse(&line, CnabLayout::Cnab400).unwrap();
        prop_assert_eq!(event.paid_amount, Decimal::new(cents, 2));
    }
}
