// --- File: crates/beaux_catalog/src/fallback.rs ---
//! The Guayaquil branch's own service list.
//!
//! Used whole when the backend has nothing for the branch, and to fill in
//! the services its listing is missing.

use chrono::{DateTime, Utc};

use crate::models::{Precios, Servicio};

/// Branch id of Guayaquil.
pub const GUAYAQUIL_SEDE_ID: &str = "SD-28080";

const CREADO_POR: &str = "sistema-guayaquil-completo";

/// USD to COP rate used for list prices.
const COP_PER_USD: f64 = 4000.0;
/// USD to MXN rate used for list prices.
const MXN_PER_USD: f64 = 18.0;

/// One entry of the reference list. Prices are in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServicioReferencia {
    pub codigo: &'static str,
    pub nombre: &'static str,
    pub duracion: u32,
    pub categoria: &'static str,
    pub precio: f64,
    pub requiere_producto: bool,
}

const fn item(
    codigo: &'static str,
    nombre: &'static str,
    duracion: u32,
    categoria: &'static str,
    precio: f64,
    requiere_producto: bool,
) -> ServicioReferencia {
    ServicioReferencia {
        codigo,
        nombre,
        duracion,
        categoria,
        precio,
        requiere_producto,
    }
}

pub const SERVICIOS_GUAYAQUIL: [ServicioReferencia; 22] = [
    item("1687644", "PEINADOS O TRENZADOS", 40, "Peinados", 5.0, false),
    item("1542486", "SERVICIO EXPRESS", 90, "Express", 35.0, false),
    item("1128696", "COLOR", 120, "Color", 300.0, false),
    item("736672", "TRANSICION D MEDIA - EX ALTA", 180, "Transición", 60.0, false),
    item("736667", "TRANSICIÓN D EXB - MEDIA", 105, "Transición", 30.0, false),
    item("736662", "COMPLETO EX ALTA", 180, "Completo", 70.0, false),
    item("736660", "COMPLETO ALTA", 120, "Completo", 60.0, false),
    item("736658", "COMPLETO MEDIA", 90, "Completo", 50.0, false),
    item("736656", "COMPLETO BAJA", 75, "Completo", 40.0, false),
    item("736651", "COMPLETO EX BAJA", 60, "Completo", 30.0, false),
    item("736648", "OZONOTERAPIA", 60, "Tratamientos", 35.0, true),
    item("736647", "HIDRATACION D ALTA-E ALTA", 70, "Tratamientos", 35.0, true),
    item("736646", "HIDRATACION D BAJA-MEDIA", 60, "Tratamientos", 25.0, true),
    item("736645", "NUTRICION D ALTA-E TALTA", 70, "Tratamientos", 35.0, true),
    item("736644", "NUTRICION CAPILAR D BAJA-MEDIA", 60, "Tratamientos", 25.0, true),
    item("736643", "DEFINICION EA", 180, "Definición", 60.0, true),
    item("736642", "DEFINICION DA", 120, "Definición", 50.0, true),
    item("736639", "DEFINICION DM", 90, "Definición", 40.0, true),
    item("736637", "DEFINICION DB", 75, "Definición", 30.0, true),
    item("736634", "DEFINICION EB", 60, "Definición", 20.0, true),
    item("736625", "CORTE DE FORMA", 50, "Corte", 25.0, true),
    item("736534", "CORTE DE PUNTAS", 40, "Corte", 20.0, true),
];

/// Reference entry with the same name, ignoring case.
pub fn referencia_por_nombre(nombre: &str) -> Option<&'static ServicioReferencia> {
    let nombre = nombre.to_lowercase();
    SERVICIOS_GUAYAQUIL
        .iter()
        .find(|s| s.nombre.to_lowercase() == nombre)
}

/// A USD list price in the branch currency. Other currencies keep USD.
pub fn convert_price(usd: f64, moneda: &str) -> f64 {
    match moneda {
        "COP" => usd * COP_PER_USD,
        "MXN" => usd * MXN_PER_USD,
        _ => usd,
    }
}

/// How a reference entry is turned into a catalog service.
#[derive(Debug, Clone, Copy)]
pub enum Origen<'a> {
    /// The whole list stands in for the backend.
    Exclusivo,
    /// The entry was missing from the backend's answer for `sede_id`.
    Faltante { sede_id: &'a str },
}

impl ServicioReferencia {
    pub fn to_servicio(&self, moneda: &str, origen: Origen<'_>, now: DateTime<Utc>) -> Servicio {
        let (id, sede_id) = match origen {
            Origen::Exclusivo => (
                format!("guayaquil-exclusivo-{}", self.codigo),
                GUAYAQUIL_SEDE_ID,
            ),
            Origen::Faltante { sede_id } => (format!("faltante-{}", self.codigo), sede_id),
        };
        let precio = convert_price(self.precio, moneda);
        let timestamp = now.to_rfc3339();

        Servicio {
            id,
            servicio_id: format!("SV-{}", self.codigo),
            codigo_referencia: Some(self.codigo.to_string()),
            nombre: self.nombre.to_string(),
            descripcion: format!("{} - Servicio EXCLUSIVO Guayaquil", self.categoria),
            duracion: self.duracion,
            duracion_minutos: self.duracion,
            precio,
            precio_local: precio,
            moneda_local: moneda.to_string(),
            precio_formateado: beaux_format::format_price(precio, moneda),
            estado: "activo".to_string(),
            comision_estilista: 0.0,
            categoria: self.categoria.to_string(),
            requiere_producto: self.requiere_producto,
            activo: true,
            creado_por: Some(CREADO_POR.to_string()),
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
            sede_id: Some(sede_id.to_string()),
            precios_completos: Precios {
                usd: Some(self.precio),
                cop: Some(self.precio * COP_PER_USD),
                mxn: Some(self.precio * MXN_PER_USD),
            },
        }
    }
}

/// The full reference list in the branch currency.
pub fn catalogo_guayaquil(moneda: &str, now: DateTime<Utc>) -> Vec<Servicio> {
    SERVICIOS_GUAYAQUIL
        .iter()
        .map(|s| s.to_servicio(moneda, Origen::Exclusivo, now))
        .collect()
}
