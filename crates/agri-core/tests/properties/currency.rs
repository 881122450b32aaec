//! Property tests for currency conversion and formatting.

use proptest::prelude::*;

use agri_core::{convert, format_amount, Currency, RateSchedule};

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Pln), Just(Currency::Eur), Just(Currency::Uah)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: converting into the base currency is the identity.
    #[test]
    fn property_base_conversion_is_identity(amount in -1.0e9..1.0e9f64) {
        let schedule = RateSchedule::program_2025();
        prop_assert_eq!(convert(amount, schedule.base_currency, &schedule), amount);
    }

    /// PROPERTY: dividing a converted amount by its factor gives it back.
    #[test]
    fn property_conversion_round_trips(amount in 0.0..1.0e7f64, target in currency()) {
        let schedule = RateSchedule::program_2025();
        let factor = schedule.currency_rates.factor(target);
        let back = convert(amount, target, &schedule) / factor;
        prop_assert!((back - amount).abs() <= amount.abs() * 1e-12 + 1e-9);
    }

    /// PROPERTY: formatting never panics and always ends with the symbol.
    #[test]
    fn property_format_ends_with_symbol(amount in -1.0e9..1.0e9f64, target in currency()) {
        let text = format_amount(amount, target);
        let suffix = format!(" {}", target.style().symbol);
        prop_assert!(text.ends_with(&suffix), "unexpected format: {text}");
    }
}
