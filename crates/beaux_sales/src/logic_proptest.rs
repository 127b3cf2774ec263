#[cfg(test)]
mod tests {
    use crate::logic::calculate_growth;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn growth_sign_follows_direction(current in -1.0e6f64..1.0e6, previous in 1.0f64..1.0e6) {
            let growth = calculate_growth(current, previous);
            prop_assert!(growth.ends_with('%'));
            if current >= previous {
                prop_assert!(growth.starts_with('+'), "{}", growth);
            } else {
                prop_assert!(growth.starts_with('-') || growth == "+0.0%" || growth == "-0.0%", "{}", growth);
            }
        }

        #[test]
        fn growth_has_one_decimal(current in 0.0f64..1.0e6, previous in 1.0f64..1.0e6) {
            let growth = calculate_growth(current, previous);
            let number = growth.trim_start_matches('+').trim_end_matches('%');
            let (_, decimals) = number.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 1);
        }
    }
}
