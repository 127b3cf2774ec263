#[cfg(test)]
mod tests {
    use crate::error::QuotesError;
    use crate::logic::{require_id, NuevaCita, Pago, ServicioCita};
    use serde_json::json;

    fn cita() -> NuevaCita {
        NuevaCita {
            sede_id: "SD-1".into(),
            profesional_id: "P-1".into(),
            cliente_id: "C-1".into(),
            servicios: vec![ServicioCita {
                servicio_id: "SV-1".into(),
                precio_personalizado: None,
                cantidad: 1,
            }],
            fecha: "2025-03-10".into(),
            hora_inicio: "10:00".into(),
            hora_fin: "10:30".into(),
            ..Default::default()
        }
    }

    fn validation_message(err: QuotesError) -> String {
        match err {
            QuotesError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_defaults() {
        let payload = cita().into_payload().unwrap();
        assert_eq!(payload.metodo_pago_inicial, "sin_pago");
        assert_eq!(payload.abono, 0.0);
        assert_eq!(payload.notas, "");

        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("codigo_giftcard").is_none());
        assert_eq!(
            body["servicios"],
            json!([{"servicio_id": "SV-1", "precio_personalizado": null, "cantidad": 1}])
        );
    }

    #[test]
    fn test_payload_accepts_metodo_pago_alias() {
        let nueva: NuevaCita = serde_json::from_value(json!({
            "sede_id": "SD-1", "profesional_id": "P-1", "cliente_id": "C-1",
            "servicios": [{"servicio_id": "SV-1", "precio_personalizado": 45000}],
            "fecha": "2025-03-10", "hora_inicio": "10:00", "hora_fin": "11:00",
            "metodo_pago": "efectivo", "abono": 20000,
            "codigo_giftcard": "  "
        }))
        .unwrap();
        let payload = nueva.into_payload().unwrap();
        assert_eq!(payload.metodo_pago_inicial, "efectivo");
        assert_eq!(payload.abono, 20000.0);
        assert_eq!(payload.servicios[0].cantidad, 1);
        assert_eq!(payload.codigo_giftcard, None);
    }

    #[test]
    fn test_payload_requires_services() {
        let mut nueva = cita();
        nueva.servicios.clear();
        assert_eq!(
            validation_message(nueva.into_payload().unwrap_err()),
            "Debe incluir al menos un servicio"
        );

        let mut nueva = cita();
        nueva.servicios[0].servicio_id = " ".into();
        assert_eq!(
            validation_message(nueva.into_payload().unwrap_err()),
            "Cada servicio debe tener un servicio_id"
        );
    }

    #[test]
    fn test_giftcard_requires_code() {
        let mut nueva = cita();
        nueva.metodo_pago_inicial = Some("giftcard".into());
        assert_eq!(
            validation_message(nueva.clone().into_payload().unwrap_err()),
            "Debes ingresar el codigo de la Gift Card para continuar"
        );

        nueva.codigo_giftcard = Some(" GC-123 ".into());
        let payload = nueva.into_payload().unwrap();
        assert_eq!(payload.codigo_giftcard.as_deref(), Some("GC-123"));
    }

    #[test]
    fn test_pago_validation() {
        let pago = Pago {
            monto: 0.0,
            ..Default::default()
        };
        assert_eq!(
            validation_message(pago.into_payload().unwrap_err()),
            "El monto debe ser mayor a 0"
        );

        let pago = Pago {
            monto: 50_000.0,
            notas: Some("".into()),
            ..Default::default()
        };
        let payload = pago.into_payload().unwrap();
        assert_eq!(payload.metodo_pago, "efectivo");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"monto": 50000.0, "metodo_pago": "efectivo"})
        );

        let pago = Pago {
            monto: 10.0,
            metodo_pago: Some("giftcard".into()),
            ..Default::default()
        };
        assert!(pago.into_payload().is_err());
    }

    #[test]
    fn require_id_keeps_ids_to_one_segment() {
        assert_eq!(require_id(" C-1 ", "la cita").unwrap(), "C-1");
        assert!(matches!(
            require_id("", "la cita"),
            Err(QuotesError::Validation(ref m)) if m == "Falta el identificador de la cita"
        ));
        for id in ["../admin", "..", "C-1/estado", "C-1?x=1"] {
            assert!(matches!(
                require_id(id, "la cita"),
                Err(QuotesError::Validation(ref m)) if m == "Identificador de la cita inválido"
            ));
        }
    }
}
