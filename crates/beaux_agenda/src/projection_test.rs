#[cfg(test)]
mod tests {
    use crate::projection::{applies_on, initials, Appointment, Bloqueo, Professional, StatusPalette, PALETTE};
    use beaux_common::models::{AppointmentStatus, BloqueoRecord, CitaRecord, Estilista};
    use chrono::NaiveDate;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rows() -> Vec<Professional> {
        vec![
            Professional::from_estilista(
                &Estilista {
                    profesional_id: "P-1".into(),
                    nombre: "ana maría ruiz".into(),
                    ..Default::default()
                },
                0,
            ),
            Professional::from_estilista(
                &Estilista {
                    profesional_id: "P-2".into(),
                    nombre: "Luis".into(),
                    ..Default::default()
                },
                1,
            ),
        ]
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("ana maría ruiz"), "AM");
        assert_eq!(initials("Luis"), "L");
        assert_eq!(initials("  "), "");
        assert_eq!(rows()[0].initials, "AM");
    }

    #[test]
    fn test_project_cita() {
        let cita = CitaRecord::from_value(json!({
            "_id": "c1",
            "profesional_id": "P-2",
            "cliente_id": "C-7",
            "fecha": "2025-03-10T00:00:00",
            "hora_inicio": "9:5",
            "hora_fin": "10:35:00",
            "estado": "Reservada",
            "servicios": [{"nombre": "Corte dama"}],
            "rawData": {"notas": "Trae referencia"}
        }))
        .unwrap();

        let appointment = Appointment::project(&cita, 5, &rows());
        assert_eq!(appointment.start, "09:05");
        assert_eq!(appointment.end, "10:35");
        assert_eq!(appointment.duracion, 90);
        assert_eq!(appointment.cliente_nombre, "Cliente C-7");
        assert_eq!(appointment.profesional_nombre, "Luis");
        assert_eq!(appointment.servicio_nombre, "Corte dama");
        assert_eq!(appointment.estado, AppointmentStatus::Pendiente);
        assert_eq!(appointment.style.color, "blue");
        assert_eq!(appointment.color, PALETTE[1], "colour follows the row");
        assert_eq!(appointment.notas, "Trae referencia");
        assert_eq!(appointment.raw_data["_id"], "c1");
    }

    #[test]
    fn test_project_cita_without_row_or_times() {
        let cita = CitaRecord::from_value(json!({
            "_id": "c2",
            "profesional_id": "P-9",
            "hora_inicio": "pronto",
            "hora_fin": "10:00"
        }))
        .unwrap();

        let appointment = Appointment::project(&cita, 10, &rows());
        assert_eq!(appointment.start, "");
        assert_eq!(appointment.duracion, 0);
        assert_eq!(appointment.cliente_nombre, "Cliente");
        assert_eq!(appointment.color, PALETTE[10 % PALETTE.len()]);
    }

    #[test]
    fn test_end_before_start_has_zero_duration() {
        let cita = CitaRecord::from_value(json!({
            "_id": "c3", "profesional_id": "P-1",
            "hora_inicio": "11:00", "hora_fin": "10:00"
        }))
        .unwrap();
        assert_eq!(Appointment::project(&cita, 0, &rows()).duracion, 0);
    }

    #[test]
    fn test_raw_data_serializes_under_camel_case_key() {
        let cita = CitaRecord::from_value(json!({"_id": "c4", "profesional_id": "P-1", "extra": 1}))
            .unwrap();
        let value = serde_json::to_value(Appointment::project(&cita, 0, &rows())).unwrap();
        assert_eq!(value["rawData"]["extra"], 1);
        assert_eq!(value["estado"], "pendiente");
    }

    #[test]
    fn test_status_palette() {
        assert_eq!(AppointmentStatus::Confirmada.palette().color, "green");
        assert_eq!(AppointmentStatus::Cancelada.palette().icon, "✗");
        assert_eq!(
            AppointmentStatus::parse(Some("reprogramada")).palette().color,
            "amber"
        );
    }

    #[test]
    fn test_dated_block_matches_its_day_in_any_format() {
        for fecha in ["2025-03-10", "2025-03-10T08:00:00", "2025-03-10 08:00:00"] {
            let record = BloqueoRecord {
                fecha: Some(fecha.to_string()),
                ..Default::default()
            };
            assert!(applies_on(&record, day(2025, 3, 10)), "{}", fecha);
            assert!(!applies_on(&record, day(2025, 3, 11)), "{}", fecha);
        }
    }

    #[test]
    fn test_recurring_block_follows_weekdays_and_bounds() {
        // 2025-03-10 is a Monday.
        let record = BloqueoRecord {
            recurrente: Some(true),
            dias_semana: Some(vec![0, 2]),
            fecha_inicio_regla: Some("2025-03-01".into()),
            fecha_fin_regla: Some("2025-03-31".into()),
            ..Default::default()
        };
        assert!(applies_on(&record, day(2025, 3, 10)));
        assert!(applies_on(&record, day(2025, 3, 12)));
        assert!(!applies_on(&record, day(2025, 3, 11)));
        assert!(!applies_on(&record, day(2025, 4, 7)), "after the rule ends");
    }

    #[test]
    fn test_undated_one_off_block_never_applies() {
        let record = BloqueoRecord::default();
        assert!(!applies_on(&record, day(2025, 3, 10)));
    }

    #[test]
    fn test_for_date_projects_only_matching_blocks() {
        let records = vec![
            BloqueoRecord {
                id: "b1".into(),
                profesional_id: "P-1".into(),
                fecha: Some("2025-03-10".into()),
                hora_inicio: "12:00:00".into(),
                hora_fin: "13:00:00".into(),
                motivo: Some("Almuerzo".into()),
                ..Default::default()
            },
            BloqueoRecord {
                id: "b2".into(),
                profesional_id: "P-1".into(),
                fecha: Some("2025-03-11".into()),
                ..Default::default()
            },
        ];
        let blocks = Bloqueo::for_date(&records, day(2025, 3, 10));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, "12:00");
        assert_eq!(blocks[0].motivo, "Almuerzo");
        assert!(!blocks[0].recurrente);
    }
}
