#[cfg(test)]
mod tests {
    use crate::agenda_time::*;
    use serde_json::json;

    #[test]
    fn test_normalize_pads_single_digits() {
        assert_eq!(normalize_agenda_time_value(Some("9:5")), "09:05");
        assert_eq!(normalize_agenda_time_value(Some("9:30")), "09:30");
        assert_eq!(normalize_agenda_time_value(Some(" 10:00 ")), "10:00");
    }

    #[test]
    fn test_normalize_rejects_inputs_without_clock() {
        assert_eq!(normalize_agenda_time_value(None), "");
        assert_eq!(normalize_agenda_time_value(Some("")), "");
        assert_eq!(normalize_agenda_time_value(Some("mañana")), "");
        assert_eq!(normalize_agenda_time_value(Some("10h30")), "");
        assert_eq!(normalize_agenda_time_value(Some(":30")), "");
    }

    #[test]
    fn test_normalize_clamps_out_of_range() {
        assert_eq!(normalize_agenda_time_value(Some("27:75")), "23:59");
    }

    #[test]
    fn test_normalize_finds_clock_inside_datetime() {
        assert_eq!(
            normalize_agenda_time_value(Some("2025-03-10 08:15:00")),
            "08:15"
        );
        assert_eq!(normalize_agenda_time_value(Some("14:30:59")), "14:30");
    }

    #[test]
    fn test_parse_agenda_minutes() {
        assert_eq!(parse_agenda_minutes("05:00"), Some(300));
        assert_eq!(parse_agenda_minutes("19:00"), Some(1140));
        assert_eq!(parse_agenda_minutes("nope"), None);
    }

    #[test]
    fn test_format_agenda_time_per_locale() {
        assert_eq!(format_agenda_time(Some("14:05"), None), "2:05 p. m.");
        assert_eq!(format_agenda_time(Some("00:30"), Some("es-CO")), "12:30 a. m.");
        assert_eq!(format_agenda_time(Some("09:00"), Some("en-US")), "9:00 AM");
        assert_eq!(format_agenda_time(Some("12:00"), Some("es-MX")), "12:00 p.m.");
        assert_eq!(format_agenda_time(Some("14:05"), Some("es-ES")), "14:05");
        assert_eq!(format_agenda_time(Some("basura"), None), "—");
    }

    #[test]
    fn test_notes_prefer_raw_data() {
        let apt = json!({
            "notas": "de la vista",
            "rawData": { "observaciones": "  del backend  " }
        });
        assert_eq!(extract_agenda_additional_notes(&apt), "del backend");
    }

    #[test]
    fn test_notes_fall_back_to_entity_and_key_order() {
        let apt = json!({
            "rawData": { "notas": "   " },
            "comentarios": "segunda",
            "nota": "primera"
        });
        assert_eq!(extract_agenda_additional_notes(&apt), "primera");
        assert_eq!(extract_agenda_additional_notes(&json!({"notas": 3})), "");
        assert_eq!(extract_agenda_additional_notes(&json!("texto")), "");
    }

    #[test]
    fn test_format_date_dmy() {
        assert_eq!(format_date_dmy("2025-03-10"), "10/03/2025");
        assert_eq!(format_date_dmy("2025-03-10T08:00:00"), "10/03/2025");
        assert_eq!(format_date_dmy("10/03/2025"), "10/03/2025");
    }
}
