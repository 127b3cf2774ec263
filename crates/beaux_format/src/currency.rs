// --- File: crates/beaux_format/src/currency.rs ---
//! Currency resolution and whole-unit amount formatting.

use beaux_config::SessionConfig;
use serde::{Deserialize, Serialize};

use crate::amount::extract_numeric_value;
use crate::text::fold;

/// Branch ids that always bill in USD.
const GUAYAQUIL_SEDE_IDS: &[&str] = &["SD-28080"];

/// Display locale per currency.
const CURRENCY_LOCALES: &[(&str, &str)] = &[
    ("COP", "es-CO"),
    ("MXN", "es-MX"),
    ("USD", "en-US"),
    ("EUR", "es-ES"),
    ("CLP", "es-CL"),
    ("PEN", "es-PE"),
];

/// Country name fragments (folded) to currency.
const COUNTRY_CURRENCIES: &[(&str, &str)] = &[
    ("colombia", "COP"),
    ("mexico", "MXN"),
    ("ecuador", "USD"),
    ("espana", "EUR"),
    ("spain", "EUR"),
    ("chile", "CLP"),
    ("peru", "PEN"),
    ("estados unidos", "USD"),
    ("united states", "USD"),
    ("usa", "USD"),
];

/// The subset of a sede that decides its currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SedeCurrencyInput {
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub moneda: Option<String>,
    #[serde(default)]
    pub es_internacional: Option<bool>,
}

impl From<&SessionConfig> for SedeCurrencyInput {
    fn from(session: &SessionConfig) -> Self {
        SedeCurrencyInput {
            sede_id: session.sede_id.clone(),
            nombre: session.nombre_local.clone(),
            pais: session.pais.clone(),
            moneda: session.moneda.clone(),
            es_internacional: session.es_internacional,
        }
    }
}

/// Trimmed, upper-cased currency code; `"USD"` when blank.
pub fn normalize_currency_code(value: Option<&str>) -> String {
    let normalized = value.unwrap_or_default().trim().to_uppercase();
    if normalized.is_empty() {
        "USD".to_string()
    } else {
        normalized
    }
}

fn is_iso_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Display locale for a currency, or `fallback` when the table has none.
pub fn resolve_currency_locale<'a>(currency: &str, fallback: &'a str) -> &'a str {
    let code = normalize_currency_code(Some(currency));
    CURRENCY_LOCALES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, locale)| *locale)
        .unwrap_or(fallback)
}

fn grouping_separator(locale: &str) -> char {
    match locale.to_ascii_lowercase().as_str() {
        "es-co" | "es-es" | "es-cl" | "es-ar" | "es-ec" | "de-de" | "pt-br" | "it-it" => '.',
        _ => ',',
    }
}

fn currency_symbol(code: &str) -> &'static str {
    match code {
        "COP" | "MXN" | "USD" | "CLP" | "ARS" => "$",
        "EUR" => "€",
        "PEN" => "S/",
        "GBP" => "£",
        _ => "",
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

fn whole_units(amount: f64) -> i64 {
    if amount.is_finite() {
        amount.round() as i64
    } else {
        0
    }
}

/// Formats an amount rounded to whole units with locale grouping, e.g.
/// `format_currency_no_decimals(1_500_000.0, "COP", None)` is `"$1.500.000"`.
///
/// `locale` defaults to the currency's own locale. Codes that are not three
/// letters fall back to `"<CODE> <value>"`, with digits, separators and signs
/// dropped from the code so [`extract_numeric_value`] still reads the value.
///
/// [`extract_numeric_value`]: crate::extract_numeric_value
pub fn format_currency_no_decimals(amount: f64, currency: &str, locale: Option<&str>) -> String {
    let code = normalize_currency_code(Some(currency));
    let rounded = whole_units(amount);
    if !is_iso_code(&code) {
        let label: String = code
            .chars()
            .filter(|c| !c.is_ascii_digit() && !matches!(c, '.' | ',' | '-'))
            .collect();
        return match label.trim() {
            "" => rounded.to_string(),
            label => format!("{} {}", label, rounded),
        };
    }

    let locale = locale.unwrap_or_else(|| resolve_currency_locale(&code, "es-CO"));
    let grouped = group_digits(rounded.unsigned_abs(), grouping_separator(locale));
    let sign = if rounded < 0 { "-" } else { "" };
    match currency_symbol(&code) {
        "" => format!("{}{} {}", sign, code, grouped),
        symbol => format!("{}{}{}", sign, symbol, grouped),
    }
}

/// An amount that may arrive as a number or as already-formatted text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoneyInput<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for MoneyInput<'_> {
    fn from(value: f64) -> Self {
        MoneyInput::Number(value)
    }
}

impl From<i64> for MoneyInput<'_> {
    fn from(value: i64) -> Self {
        MoneyInput::Number(value as f64)
    }
}

impl<'a> From<&'a str> for MoneyInput<'a> {
    fn from(value: &'a str) -> Self {
        MoneyInput::Text(value)
    }
}

/// Dashboard money formatting for values that may be numbers or strings.
pub fn format_money<'a>(
    value: impl Into<MoneyInput<'a>>,
    currency: &str,
    locale: Option<&str>,
) -> String {
    let amount = match value.into() {
        MoneyInput::Number(n) => n,
        MoneyInput::Text(s) => extract_numeric_value(s),
    };
    format_currency_no_decimals(amount, currency, locale)
}

/// Catalog label: `"$1.500.000 COP"`, or `"Precio no disponible"` for
/// non-finite prices.
pub fn format_price(price: f64, currency: &str) -> String {
    if !price.is_finite() {
        return "Precio no disponible".to_string();
    }
    let code = normalize_currency_code(Some(currency));
    format!(
        "{} {}",
        format_currency_no_decimals(price, &code, None),
        code
    )
}

fn currency_for_country(country: &str) -> Option<&'static str> {
    let folded = fold(country);
    if folded.is_empty() {
        return None;
    }
    COUNTRY_CURRENCIES
        .iter()
        .find(|(fragment, _)| {
            if fragment.len() <= 3 {
                folded == *fragment
            } else {
                folded.contains(fragment)
            }
        })
        .map(|(_, code)| *code)
}

/// `"Colombia"` resolves to `"COP"`; unknown countries resolve to the
/// normalized fallback.
pub fn resolve_currency_from_country(country: Option<&str>, fallback: &str) -> String {
    country
        .and_then(currency_for_country)
        .map(str::to_string)
        .unwrap_or_else(|| normalize_currency_code(Some(fallback)))
}

/// True for the Guayaquil branch, by id or by name.
pub fn is_guayaquil_sede(sede: &SedeCurrencyInput) -> bool {
    let sede_id = sede
        .sede_id
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_uppercase();
    if GUAYAQUIL_SEDE_IDS.contains(&sede_id.as_str()) {
        return true;
    }
    sede.nombre
        .as_deref()
        .map(|n| fold(n).contains("guayaquil"))
        .unwrap_or(false)
}

/// Currency a branch bills in: explicit `moneda`, then country, then the
/// international flag, then the Guayaquil rule, then `fallback`.
pub fn resolve_currency_from_sede(sede: Option<&SedeCurrencyInput>, fallback: &str) -> String {
    let Some(sede) = sede else {
        return normalize_currency_code(Some(fallback));
    };

    if let Some(moneda) = sede.moneda.as_deref().filter(|m| !m.trim().is_empty()) {
        return normalize_currency_code(Some(moneda));
    }
    if let Some(code) = sede.pais.as_deref().and_then(currency_for_country) {
        return code.to_string();
    }
    if sede.es_internacional == Some(true) || is_guayaquil_sede(sede) {
        return "USD".to_string();
    }
    normalize_currency_code(Some(fallback))
}

/// Currency for the current session context.
pub fn currency_for_session(session: &SessionConfig) -> String {
    resolve_currency_from_sede(Some(&SedeCurrencyInput::from(session)), "COP")
}
