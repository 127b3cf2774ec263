// File: crates/beaux_quotes/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::bloqueos::{BloqueoFiltro, CambiosBloqueo, NuevoBloqueo};
use crate::logic::{CambioEstado, NuevaCita, Pago, ProductoItem, ServicioCita};
use beaux_common::models::{BloqueoRecord, CitaRecord};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::list_citas_handler,
        crate::handlers::crear_cita_handler,
        crate::handlers::editar_cita_handler,
        crate::handlers::cancelar_cita_handler,
        crate::handlers::cambiar_estado_handler,
        crate::handlers::registrar_pago_handler,
        crate::handlers::agregar_productos_handler,
        crate::handlers::list_bloqueos_handler,
        crate::handlers::crear_bloqueo_handler,
        crate::handlers::actualizar_bloqueo_handler,
        crate::handlers::eliminar_bloqueo_handler
    ),
    components(
        schemas(
            CitaRecord,
            BloqueoRecord,
            NuevaCita,
            ServicioCita,
            CambioEstado,
            Pago,
            ProductoItem,
            BloqueoFiltro,
            NuevoBloqueo,
            CambiosBloqueo
        )
    ),
    tags(
        (name = "Quotes", description = "Appointments and blocked time")
    ),
    servers(
        (url = "/api", description = "Beaux API server")
    )
)]
pub struct QuotesApiDoc;
