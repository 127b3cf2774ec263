// --- File: crates/beaux_format/src/amount.rs ---

/// Reads a number back out of a formatted amount such as `"$1.500.000"`,
/// `"US$ 1,234.50"` or `"-12,5"`.
///
/// Everything except digits, `.`, `,` and `-` is discarded. A separator
/// followed by exactly three digits is a thousands separator; the last
/// remaining separator is the decimal point. Unparsable input yields `0.0`.
pub fn extract_numeric_value(input: &str) -> f64 {
    let kept: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    let negative = kept.starts_with('-');
    let body: String = kept.chars().filter(|c| *c != '-').collect();
    if body.is_empty() {
        return 0.0;
    }

    let segments: Vec<&str> = body.split(['.', ',']).collect();
    if segments.len() == 1 {
        return signed(body.parse::<f64>().unwrap_or(0.0), negative);
    }

    // segments[i + 1] follows separator i
    let leading = segments[0];
    let is_grouping = |i: usize| -> bool {
        let next = segments[i + 1];
        next.len() == 3 && !(i == 0 && (leading.is_empty() || leading == "0"))
    };
    let decimal_sep = (0..segments.len() - 1).rev().find(|&i| !is_grouping(i));

    let (int_part, frac_part) = match decimal_sep {
        Some(i) => (segments[..=i].concat(), segments[i + 1..].concat()),
        None => (segments.concat(), String::new()),
    };
    let int_part = if int_part.is_empty() { "0".to_string() } else { int_part };
    let text = if frac_part.is_empty() {
        int_part
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    signed(text.parse::<f64>().unwrap_or(0.0), negative)
}

fn signed(value: f64, negative: bool) -> f64 {
    if negative {
        -value
    } else {
        value
    }
}
