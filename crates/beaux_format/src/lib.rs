// --- File: crates/beaux_format/src/lib.rs ---
//! Pure display helpers shared by the agenda, catalog and dashboards.
//!
//! Nothing here does I/O or reads ambient state: the session context is
//! passed in by the caller.

pub mod agenda_time;
#[cfg(test)]
mod agenda_time_test;
pub mod amount;
pub mod currency;
#[cfg(test)]
mod format_proptest;
mod text;

pub use agenda_time::{
    extract_agenda_additional_notes, format_agenda_time, format_date_dmy,
    normalize_agenda_time_value, parse_agenda_minutes,
};
pub use amount::extract_numeric_value;
pub use text::fold;
pub use currency::{
    currency_for_session, format_currency_no_decimals, format_money, format_price,
    is_guayaquil_sede, normalize_currency_code, resolve_currency_from_country,
    resolve_currency_from_sede, resolve_currency_locale, MoneyInput, SedeCurrencyInput,
};
