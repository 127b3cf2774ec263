#[cfg(test)]
mod tests {
    use crate::logic::{calculate_growth, clientes_query, metricas_para_moneda};
    use crate::models::{DashboardQuery, VentasDashboardResponse};
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_growth_format() {
        assert_eq!(calculate_growth(112.5, 100.0), "+12.5%");
        assert_eq!(calculate_growth(50.0, 100.0), "-50.0%");
        assert_eq!(calculate_growth(100.0, 100.0), "+0.0%");
        assert_eq!(calculate_growth(-50.0, -100.0), "+50.0%");
    }

    #[test]
    fn test_growth_from_zero() {
        assert_eq!(calculate_growth(10.0, 0.0), "+100.0%");
        assert_eq!(calculate_growth(0.0, 0.0), "0.0%");
        assert_eq!(calculate_growth(-3.0, 0.0), "0.0%");
    }

    #[test]
    fn test_metrics_for_currency_or_zeroed() {
        let response: VentasDashboardResponse = serde_json::from_value(json!({
            "success": true,
            "moneda_sede": "COP",
            "metricas_por_moneda": {
                "COP": {"ventas_totales": "$1.500.000", "ventas_servicios": 1200000,
                        "ventas_productos": 300000, "cantidad_ventas": 12,
                        "metodos_pago": {"efectivo": 500000, "sin_pago": 0}}
            }
        }))
        .unwrap();

        let cop = metricas_para_moneda(&response, "cop");
        assert_eq!(cop.ventas_totales, 1_500_000.0);
        assert_eq!(cop.ventas_servicios, 1_200_000.0);
        assert_eq!(cop.cantidad_ventas, 12.0);
        assert_eq!(cop.ticket_promedio, 0.0);

        let usd = metricas_para_moneda(&response, "USD");
        assert_eq!(usd.ventas_totales, 0.0);
        assert!(usd.metodos_pago.is_empty());

        let empty = metricas_para_moneda(&VentasDashboardResponse::unavailable(), "COP");
        assert_eq!(empty, Default::default());
    }

    #[test]
    fn test_standard_period_drops_dates() {
        let query = DashboardQuery {
            period: Some("last_7_days".into()),
            sede_id: Some("SD-1".into()),
            start_date: Some(date(2025, 1, 1)),
            end_date: Some(date(2025, 1, 31)),
        };
        let sent = clientes_query(&query, date(2025, 3, 10));
        assert_eq!(sent.period.as_deref(), Some("last_7_days"));
        assert_eq!(sent.start_date, None);
        assert_eq!(sent.sede_id.as_deref(), Some("SD-1"));
    }

    #[test]
    fn test_custom_period_uses_dates_or_last_30_days() {
        let with_dates = DashboardQuery {
            period: Some("custom".into()),
            start_date: Some(date(2025, 1, 1)),
            end_date: Some(date(2025, 1, 31)),
            ..Default::default()
        };
        let sent = clientes_query(&with_dates, date(2025, 3, 10));
        assert_eq!(sent.period, None);
        assert_eq!(sent.start_date, Some(date(2025, 1, 1)));
        assert_eq!(sent.end_date, Some(date(2025, 1, 31)));

        let without = DashboardQuery {
            period: Some("custom".into()),
            ..Default::default()
        };
        let sent = clientes_query(&without, date(2025, 3, 10));
        assert_eq!(sent.start_date, Some(date(2025, 2, 8)));
        assert_eq!(sent.end_date, Some(date(2025, 3, 10)));

        let nothing = clientes_query(&DashboardQuery::default(), date(2025, 3, 10));
        assert_eq!(nothing, DashboardQuery::default());
    }

    #[test]
    fn test_query_serializes_without_empty_fields() {
        let query = DashboardQuery {
            start_date: Some(date(2025, 2, 8)),
            sede_id: Some("SD-1".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"sede_id": "SD-1", "start_date": "2025-02-08"})
        );
    }
}
