// --- File: crates/beaux_catalog/src/models.rs ---
use beaux_format::{format_price, normalize_currency_code};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Prices of one item per currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Precios {
    #[serde(rename = "USD", default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<f64>,
    #[serde(rename = "COP", default, skip_serializing_if = "Option::is_none")]
    pub cop: Option<f64>,
    #[serde(rename = "MXN", default, skip_serializing_if = "Option::is_none")]
    pub mxn: Option<f64>,
}

impl Precios {
    pub fn get(&self, moneda: &str) -> Option<f64> {
        match moneda {
            "USD" => self.usd,
            "COP" => self.cop,
            "MXN" => self.mxn,
            _ => None,
        }
    }
}

/// Price to show for a branch currency: the branch's own price when it has
/// one (COP or MXN), else USD, else zero USD.
pub fn select_price(precios: &Precios, moneda: &str) -> (f64, String) {
    let moneda = normalize_currency_code(Some(moneda));
    if matches!(moneda.as_str(), "COP" | "MXN") {
        if let Some(precio) = precios.get(&moneda) {
            return (precio, moneda);
        }
    }
    match precios.usd {
        Some(precio) => (precio, "USD".to_string()),
        None => (0.0, "USD".to_string()),
    }
}

/// A service as the backend stores it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServicioApi {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub servicio_id: Option<String>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub duracion_minutos: Option<u32>,
    #[serde(default)]
    pub precios: Option<Precios>,
    #[serde(default)]
    pub comision_estilista: Option<f64>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub requiere_producto: Option<bool>,
    #[serde(default)]
    pub activo: Option<bool>,
    #[serde(default)]
    pub sede_id: Option<String>,
    #[serde(default)]
    pub creado_por: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A service priced for one branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Servicio {
    #[serde(rename = "_id")]
    pub id: String,
    pub servicio_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_referencia: Option<String>,
    pub nombre: String,
    pub descripcion: String,
    pub duracion: u32,
    pub duracion_minutos: u32,
    pub precio: f64,
    pub precio_local: f64,
    pub moneda_local: String,
    pub precio_formateado: String,
    pub estado: String,
    pub comision_estilista: f64,
    pub categoria: String,
    pub requiere_producto: bool,
    pub activo: bool,
    pub creado_por: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub sede_id: Option<String>,
    pub precios_completos: Precios,
}

const DEFAULT_DURACION: u32 = 30;

impl Servicio {
    /// Prices a backend service for `moneda`. `sede_id` fills in a missing
    /// branch.
    pub fn from_api(api: ServicioApi, moneda: &str, sede_id: Option<&str>) -> Servicio {
        let precios = api.precios.unwrap_or_default();
        let (precio, moneda_local) = select_price(&precios, moneda);
        let duracion = api.duracion_minutos.filter(|d| *d > 0).unwrap_or(DEFAULT_DURACION);
        let activo = api.activo.unwrap_or(true);
        let precios_completos = if precios == Precios::default() {
            Precios {
                usd: Some(precio),
                ..Default::default()
            }
        } else {
            precios
        };

        Servicio {
            servicio_id: api.servicio_id.unwrap_or_else(|| api.id.clone()),
            id: api.id,
            codigo_referencia: None,
            nombre: api.nombre,
            descripcion: api.categoria.clone().unwrap_or_default(),
            duracion,
            duracion_minutos: duracion,
            precio,
            precio_local: precio,
            precio_formateado: format_price(precio, &moneda_local),
            moneda_local,
            estado: if activo { "activo" } else { "inactivo" }.to_string(),
            comision_estilista: api.comision_estilista.unwrap_or(0.0),
            categoria: api
                .categoria
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "General".to_string()),
            requiere_producto: api.requiere_producto.unwrap_or(false),
            activo,
            creado_por: api.creado_por,
            created_at: api.created_at,
            updated_at: api.updated_at,
            sede_id: api.sede_id.or_else(|| sede_id.map(str::to_string)),
            precios_completos,
        }
    }
}

/// A new service.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct NuevoServicio {
    pub nombre: String,
    pub duracion_minutos: u32,
    pub precios: Precios,
    #[serde(default)]
    pub comision_estilista: Option<f64>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub requiere_producto: Option<bool>,
    #[serde(default)]
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicioPayload {
    pub nombre: String,
    pub duracion_minutos: u32,
    pub precios: Precios,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comision_estilista: Option<f64>,
    pub categoria: String,
    pub requiere_producto: bool,
    pub activo: bool,
}

fn trimmed_categoria(categoria: Option<&str>) -> String {
    categoria
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("General")
        .to_string()
}

impl NuevoServicio {
    pub fn into_payload(self) -> Result<ServicioPayload, String> {
        let nombre = self.nombre.trim().to_string();
        if nombre.is_empty() {
            return Err("El nombre del servicio es obligatorio".to_string());
        }
        if self.duracion_minutos == 0 {
            return Err("La duración debe ser mayor a 0".to_string());
        }
        Ok(ServicioPayload {
            nombre,
            duracion_minutos: self.duracion_minutos,
            precios: self.precios,
            comision_estilista: self.comision_estilista,
            categoria: trimmed_categoria(self.categoria.as_deref()),
            requiere_producto: self.requiere_producto.unwrap_or(false),
            activo: self.activo.unwrap_or(true),
        })
    }
}

/// Fields to change on a service. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CambiosServicio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duracion_minutos: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precios: Option<Precios>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comision_estilista: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requiere_producto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

impl CambiosServicio {
    /// Trims the name and category. A blank category becomes `"General"`.
    pub fn normalized(mut self) -> Result<Self, String> {
        if let Some(nombre) = self.nombre.as_mut() {
            *nombre = nombre.trim().to_string();
            if nombre.is_empty() {
                return Err("El nombre del servicio es obligatorio".to_string());
            }
        }
        if let Some(categoria) = self.categoria.take() {
            self.categoria = Some(trimmed_categoria(Some(&categoria)));
        }
        Ok(self)
    }
}

/// An inventory product priced for one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Producto {
    pub id: String,
    pub nombre: String,
    pub categoria: String,
    pub descripcion: String,
    pub imagen: String,
    pub activo: bool,
    pub tipo_codigo: String,
    pub precio: f64,
    pub precio_local: f64,
    pub moneda_local: String,
    pub stock_actual: f64,
    pub stock_minimo: f64,
    pub precios: Precios,
}

fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Producto {
    /// Reads an inventory record. Price order: `precio_local`, the price
    /// for `moneda`, then `precio`.
    pub fn from_value(value: &Value, moneda: &str) -> Option<Producto> {
        let map = value.as_object()?;
        let precios: Precios = map
            .get("precios")
            .and_then(|p| serde_json::from_value(p.clone()).ok())
            .unwrap_or_default();
        let precio = number(map.get("precio_local"))
            .or_else(|| precios.get(moneda).filter(|p| *p != 0.0))
            .or_else(|| number(map.get("precio")))
            .unwrap_or(0.0);

        Some(Producto {
            id: text(map, "id").or_else(|| text(map, "_id")).unwrap_or_default(),
            nombre: text(map, "nombre").unwrap_or_else(|| "Producto sin nombre".to_string()),
            categoria: text(map, "categoria").unwrap_or_else(|| "Sin categoría".to_string()),
            descripcion: text(map, "descripcion").unwrap_or_default(),
            imagen: text(map, "imagen").unwrap_or_default(),
            activo: map.get("activo").and_then(Value::as_bool) != Some(false),
            tipo_codigo: text(map, "tipo_codigo").unwrap_or_default(),
            precio,
            precio_local: precio,
            moneda_local: moneda.to_string(),
            stock_actual: number(map.get("stock_actual"))
                .or_else(|| number(map.get("stock")))
                .unwrap_or(0.0),
            stock_minimo: number(map.get("stock_minimo")).unwrap_or(0.0),
            precios,
        })
    }
}
