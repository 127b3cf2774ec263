// File: crates/beaux_catalog/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{CambiosServicio, NuevoServicio, Precios, Producto, Servicio};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::list_servicios_handler,
        crate::handlers::servicio_por_codigo_handler,
        crate::handlers::get_servicio_handler,
        crate::handlers::create_servicio_handler,
        crate::handlers::update_servicio_handler,
        crate::handlers::delete_servicio_handler,
        crate::handlers::servicios_estilista_handler,
        crate::handlers::list_productos_handler
    ),
    components(
        schemas(Servicio, Precios, NuevoServicio, CambiosServicio, Producto)
    ),
    tags(
        (name = "Catalog", description = "Services and products")
    ),
    servers(
        (url = "/api", description = "Beaux API server")
    )
)]
pub struct CatalogApiDoc;
