// --- File: crates/beaux_sales/src/models.rs ---
use beaux_format::extract_numeric_value;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Reads an amount sent either as a number or as formatted text.
/// Anything else counts as zero.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => extract_numeric_value(&s),
        _ => 0.0,
    })
}

/// Date range a dashboard covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Range {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub dias: u32,
}

/// Sales figures for one currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct VentasMetricas {
    #[serde(default, deserialize_with = "lenient_amount")]
    pub ventas_totales: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub cantidad_ventas: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub ventas_servicios: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub ventas_productos: f64,
    /// Raw per-method amounts as the backend names them.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub metodos_pago: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub ticket_promedio: f64,
    #[serde(default)]
    pub crecimiento_ventas: Option<String>,
}

/// The backend's sales dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct VentasDashboardResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub range: Option<Range>,
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub moneda_sede: Option<String>,
    #[serde(default)]
    pub metricas_por_moneda: BTreeMap<String, VentasMetricas>,
    #[serde(default)]
    pub calidad_datos: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub usuario: Option<Value>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub debug_info: Option<Value>,
}

impl VentasDashboardResponse {
    /// Stand-in when the backend cannot be read.
    pub fn unavailable() -> Self {
        Self {
            success: false,
            ..Default::default()
        }
    }
}

/// Filters shared by the dashboards. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sede_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A KPI whose value and growth may be numbers or text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Kpi {
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub valor: Value,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub crecimiento: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ClientesKpis {
    #[serde(default)]
    pub nuevos_clientes: Kpi,
    #[serde(default)]
    pub tasa_recurrencia: Kpi,
    #[serde(default)]
    pub tasa_churn: Kpi,
    /// Either a plain KPI or one entry per currency.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub ticket_promedio: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub debug_info: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Advertencia {
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub severidad: String,
    #[serde(default)]
    pub mensaje: String,
    #[serde(default)]
    pub recomendacion: String,
}

/// Client analytics dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ClientesDashboard {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub range: Option<Range>,
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub kpis: ClientesKpis,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub churn_actual: f64,
    #[serde(default)]
    pub calidad_datos: Option<String>,
    #[serde(default)]
    pub advertencias: Vec<Advertencia>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PeriodOption {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub min_days: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PeriodRecommendations {
    #[serde(default)]
    pub minimum: String,
    #[serde(default)]
    pub optimal: String,
    #[serde(default)]
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PeriodsResponse {
    #[serde(default)]
    pub periods: Vec<PeriodOption>,
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub recommendations: PeriodRecommendations,
}

/// A client who stopped coming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChurnCliente {
    #[serde(default)]
    pub cliente_id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub sede_id: String,
    #[serde(default)]
    pub ultima_visita: String,
    #[serde(default)]
    pub dias_inactivo: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChurnResponse {
    #[serde(default)]
    pub total_churn: u32,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub parametros: Value,
    #[serde(default)]
    pub clientes: Vec<ChurnCliente>,
}
