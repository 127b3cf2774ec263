#[cfg(test)]
mod tests {
    use crate::agenda_time::normalize_agenda_time_value;
    use crate::amount::extract_numeric_value;
    use crate::currency::format_currency_no_decimals;
    use proptest::prelude::*;

    proptest! {
        // Formatting then re-reading recovers the value rounded to whole units.
        #[test]
        fn test_format_then_extract_round_trips(
            amount in -1_000_000_000.0f64..1_000_000_000.0f64,
            currency in prop::sample::select(vec!["COP", "USD", "MXN", "EUR", "CLP", "PEN"]),
        ) {
            let formatted = format_currency_no_decimals(amount, currency, None);
            let parsed = extract_numeric_value(&formatted);
            prop_assert_eq!(parsed, amount.round(), "formatted: {}", formatted);
        }

        // Unknown codes, digits included, keep the value readable.
        #[test]
        fn test_fallback_format_round_trips(
            amount in -1_000_000.0f64..1_000_000.0f64,
            currency in "[A-Za-z0-9.,$-]{1,6}",
        ) {
            let formatted = format_currency_no_decimals(amount, &currency, None);
            let parsed = extract_numeric_value(&formatted);
            prop_assert_eq!(parsed, amount.round(), "formatted: {}", formatted);
        }

        // Whatever the input, the result is empty or a valid HH:MM.
        #[test]
        fn test_normalized_time_is_always_valid(input in ".{0,24}") {
            let out = normalize_agenda_time_value(Some(&input));
            if !out.is_empty() {
                prop_assert_eq!(out.len(), 5);
                let h: u32 = out[..2].parse().unwrap();
                let m: u32 = out[3..].parse().unwrap();
                prop_assert!(h <= 23 && m <= 59);
            }
        }

        #[test]
        fn test_clock_values_survive_normalization(h in 0u32..24, m in 0u32..60) {
            let input = format!("{}:{:02}", h, m);
            prop_assert_eq!(normalize_agenda_time_value(Some(&input)), format!("{:02}:{:02}", h, m));
        }
    }
}
