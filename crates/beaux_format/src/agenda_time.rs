// --- File: crates/beaux_format/src/agenda_time.rs ---
use serde_json::Value;

/// Keys that may carry free-text notes on an appointment, in priority order.
const NOTE_KEYS: &[&str] = &[
    "notas_adicionales",
    "notas",
    "nota_adicional",
    "nota",
    "observaciones",
    "comentarios",
    "notes",
    "additional_notes",
    "additionalNotes",
];

/// Finds the first `H:MM` / `HH:MM` (or `H:M`) in `value` and returns it as a
/// clamped, zero-padded `HH:MM`. Returns `""` when there is no such pattern.
///
/// ```
/// use beaux_format::normalize_agenda_time_value;
///
/// assert_eq!(normalize_agenda_time_value(Some("9:5")), "09:05");
/// assert_eq!(normalize_agenda_time_value(Some("2025-03-10T14:30:00")), "14:30");
/// assert_eq!(normalize_agenda_time_value(Some("sin hora")), "");
/// ```
pub fn normalize_agenda_time_value(value: Option<&str>) -> String {
    match find_clock(value.unwrap_or_default().trim()) {
        Some((h, m)) => format!("{:02}:{:02}", h.min(23), m.min(59)),
        None => String::new(),
    }
}

fn find_clock(input: &str) -> Option<(u32, u32)> {
    let bytes = input.as_bytes();
    for (idx, _) in input.match_indices(':') {
        let mut start = idx;
        while start > 0 && idx - start < 2 && bytes[start - 1].is_ascii_digit() {
            start -= 1;
        }
        let mut end = idx + 1;
        while end < bytes.len() && end - idx - 1 < 2 && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if start == idx || end == idx + 1 {
            continue;
        }
        let hours = input[start..idx].parse().ok()?;
        let minutes = input[idx + 1..end].parse().ok()?;
        return Some((hours, minutes));
    }
    None
}

/// Minutes since midnight of a time label, or `None` when it does not parse.
pub fn parse_agenda_minutes(value: &str) -> Option<u32> {
    find_clock(value.trim()).map(|(h, m)| h.min(23) * 60 + m.min(59))
}

/// Human clock time for a locale: `"2:05 p. m."` for `es-CO`, `"2:05 PM"`
/// for English locales, `"14:05"` elsewhere. Invalid input renders `"—"`.
pub fn format_agenda_time(value: Option<&str>, locale: Option<&str>) -> String {
    let normalized = normalize_agenda_time_value(value);
    let Some((hours, minutes)) = find_clock(&normalized) else {
        return "—".to_string();
    };
    let locale = locale.unwrap_or("es-CO").to_ascii_lowercase();
    let twelve = if hours % 12 == 0 { 12 } else { hours % 12 };
    let pm = hours >= 12;

    if locale.starts_with("en") {
        format!("{}:{:02} {}", twelve, minutes, if pm { "PM" } else { "AM" })
    } else if locale == "es-mx" {
        format!("{}:{:02} {}", twelve, minutes, if pm { "p.m." } else { "a.m." })
    } else if matches!(locale.as_str(), "es-co" | "es-ec" | "es-pe" | "es-us") {
        format!(
            "{}:{:02} {}",
            twelve,
            minutes,
            if pm { "p. m." } else { "a. m." }
        )
    } else {
        format!("{}:{:02}", hours, minutes)
    }
}

fn pick_note(source: Option<&Value>) -> Option<String> {
    let record = source?.as_object()?;
    NOTE_KEYS.iter().find_map(|key| {
        record
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// First non-empty note found on the appointment's `rawData`, then on the
/// appointment itself. Empty string when there is none.
pub fn extract_agenda_additional_notes(appointment: &Value) -> String {
    pick_note(appointment.get("rawData"))
        .or_else(|| pick_note(Some(appointment)))
        .unwrap_or_default()
}

/// `"2025-03-10"` (optionally followed by a time) as `"10/03/2025"`.
/// Anything else is returned unchanged.
pub fn format_date_dmy(fecha: &str) -> String {
    let day = fecha.trim().get(..10).unwrap_or(fecha.trim());
    match chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => fecha.to_string(),
    }
}
