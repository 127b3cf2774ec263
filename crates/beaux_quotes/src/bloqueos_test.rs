#[cfg(test)]
mod tests {
    use crate::bloqueos::{BloqueoFiltro, NuevoBloqueo};
    use serde_json::json;

    fn bloqueo() -> NuevoBloqueo {
        NuevoBloqueo {
            profesional_id: "P-1".into(),
            sede_id: "SD-1".into(),
            hora_inicio: "12:00".into(),
            hora_fin: "13:00".into(),
            motivo: "Almuerzo".into(),
            fecha: Some("2025-03-10".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_day_block_needs_fecha() {
        assert!(bloqueo().validate().is_ok());
        let mut b = bloqueo();
        b.fecha = None;
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_end_after_start() {
        let mut b = bloqueo();
        b.hora_fin = "12:00".into();
        assert!(b.validate().is_err());
        b.hora_inicio = "9:00".into();
        assert!(b.validate().is_ok());
        b.hora_fin = "mediodía".into();
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_recurring_block_needs_weekdays() {
        let mut b = bloqueo();
        b.fecha = None;
        b.recurrente = Some(true);
        assert!(b.validate().is_err());
        b.dias_semana = Some(vec![0, 2, 4]);
        assert!(b.validate().is_ok());
        b.dias_semana = Some(vec![7]);
        assert!(b.validate().is_err());
    }

    #[test]
    fn test_filter_skips_empty_fields() {
        let filtro = BloqueoFiltro {
            sede_id: Some("SD-1".into()),
            fecha: Some("2025-03-10".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filtro).unwrap(),
            json!({"sede_id": "SD-1", "fecha": "2025-03-10"})
        );
    }
}
