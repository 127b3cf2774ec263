// --- File: crates/beaux_agenda/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
};
use beaux_common::bearer_token;
use beaux_config::AppConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::clock::{today_in, Clock};
use crate::error::AgendaError;
use crate::logic::{LayoutGeometry, OccupantKind, TimeGrid};
use crate::scope::{AgendaBuilder, AgendaView, CalendarScope};
use crate::DynAgendaSource;

/// Builds a source for one request from the caller's bearer token.
pub type SourceFactory =
    Arc<dyn Fn(Option<String>) -> Result<Arc<DynAgendaSource>, AgendaError> + Send + Sync>;

// Shared state for the agenda handlers
#[derive(Clone)]
pub struct AgendaState {
    pub config: Arc<AppConfig>,
    pub sources: SourceFactory,
    pub clock: Arc<dyn Clock>,
}

impl AgendaState {
    fn source_for(&self, headers: &HeaderMap) -> Result<Arc<DynAgendaSource>, AgendaError> {
        if !self.config.use_agenda {
            return Err(AgendaError::Disabled);
        }
        (self.sources)(bearer_token(headers))
    }

    fn builder(&self, source: Arc<DynAgendaSource>) -> Result<AgendaBuilder<DynAgendaSource>, AgendaError> {
        AgendaBuilder::new(source, &self.config.agenda)
    }

    /// Branch from the query, falling back to the session.
    fn sede_id(&self, requested: Option<&str>) -> Result<String, AgendaError> {
        requested
            .or(self.config.session.sede_id.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(AgendaError::MissingSede)
    }

    /// The requested day, or today where the branch is.
    async fn fecha(
        &self,
        requested: Option<&str>,
        source: &DynAgendaSource,
        sede_id: &str,
    ) -> Result<NaiveDate, AgendaError> {
        if let Some(fecha) = requested.map(str::trim).filter(|f| !f.is_empty()) {
            return NaiveDate::parse_from_str(fecha, "%Y-%m-%d")
                .map_err(|_| AgendaError::InvalidDate(fecha.to_string()));
        }
        let zona = match source.list_sedes().await {
            Ok(sedes) => sedes
                .into_iter()
                .find(|s| s.sede_id == sede_id)
                .and_then(|s| s.zona_horaria),
            Err(e) => {
                warn!("Could not load sedes to resolve the time zone: {}", e);
                None
            }
        };
        let zona = zona.or_else(|| self.config.session.zona_horaria.clone());
        Ok(today_in(self.clock.as_ref(), zona.as_deref()))
    }
}

/// `sede` (the default) or `superadmin`.
fn parse_scope(
    scope: Option<&str>,
    sede_id: String,
    profesional_id: Option<String>,
) -> Result<CalendarScope, AgendaError> {
    let profesional_id = profesional_id.filter(|p| !p.trim().is_empty());
    match scope.map(|s| s.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("sede") => Ok(CalendarScope::Sede {
            sede_id,
            profesional_id,
        }),
        Some("superadmin") | Some("super_admin") => Ok(CalendarScope::SuperAdmin { sede_id }),
        Some(other) => Err(AgendaError::InvalidScope(other.to_string())),
    }
}

#[derive(Debug, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AgendaQuery {
    /// Day in `YYYY-MM-DD`; today in the branch's time zone when absent.
    pub fecha: Option<String>,
    pub sede_id: Option<String>,
    pub profesional_id: Option<String>,
    /// `sede` or `superadmin`.
    pub scope: Option<String>,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/agenda",
    params(AgendaQuery),
    responses(
        (status = 200, description = "Laid-out agenda for one day", body = AgendaView),
        (status = 400, description = "Bad date, scope or missing branch"),
        (status = 503, description = "Agenda disabled")
    ),
    tag = "Agenda"
))]
pub async fn agenda_handler(
    State(state): State<Arc<AgendaState>>,
    headers: HeaderMap,
    Query(query): Query<AgendaQuery>,
) -> Result<Json<AgendaView>, AgendaError> {
    let source = state.source_for(&headers)?;
    let sede_id = state.sede_id(query.sede_id.as_deref())?;
    let fecha = state
        .fecha(query.fecha.as_deref(), source.as_ref(), &sede_id)
        .await?;
    let scope = parse_scope(query.scope.as_deref(), sede_id, query.profesional_id)?;

    let view = state.builder(source)?.build_view(&scope, fecha).await;
    if !view.warnings.is_empty() {
        info!("Agenda for {} served with warnings: {:?}", fecha, view.warnings);
    }
    Ok(Json(view))
}

#[derive(Debug, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct OccupancyQuery {
    pub fecha: Option<String>,
    pub sede_id: Option<String>,
    pub scope: Option<String>,
    /// Row label: the professional's display name or id.
    pub profesional: Option<String>,
    /// Slot label, `HH:MM`.
    pub hora: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct OccupancyResponse {
    pub fecha: String,
    pub profesional: String,
    pub hora: String,
    pub occupied: bool,
    pub kind: Option<OccupantKind>,
    pub occupant_id: Option<String>,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/agenda/occupancy",
    params(OccupancyQuery),
    responses(
        (status = 200, description = "Whether the cell is taken", body = OccupancyResponse),
        (status = 400, description = "Missing professional or time")
    ),
    tag = "Agenda"
))]
pub async fn occupancy_handler(
    State(state): State<Arc<AgendaState>>,
    headers: HeaderMap,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<OccupancyResponse>, AgendaError> {
    let profesional = query
        .profesional
        .filter(|p| !p.trim().is_empty())
        .ok_or(AgendaError::MissingParam("profesional"))?;
    let hora = query
        .hora
        .filter(|h| !h.trim().is_empty())
        .ok_or(AgendaError::MissingParam("hora"))?;

    let source = state.source_for(&headers)?;
    let sede_id = state.sede_id(query.sede_id.as_deref())?;
    let fecha = state
        .fecha(query.fecha.as_deref(), source.as_ref(), &sede_id)
        .await?;
    let scope = parse_scope(query.scope.as_deref(), sede_id, None)?;

    let day = state.builder(source)?.build(&scope, fecha).await;
    let occupant = day.resolver().occupant(&profesional, &hora);

    Ok(Json(OccupancyResponse {
        fecha: fecha.format("%Y-%m-%d").to_string(),
        occupied: occupant.is_some(),
        kind: occupant.map(|o| o.kind()),
        occupant_id: occupant.map(|o| o.id().to_string()),
        profesional,
        hora,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GridResponse {
    pub labels: Vec<String>,
    pub slot_minutes: u32,
    pub geometry: LayoutGeometry,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/agenda/grid",
    responses((status = 200, description = "Time labels and pixel constants", body = GridResponse)),
    tag = "Agenda"
))]
pub async fn grid_handler(
    State(state): State<Arc<AgendaState>>,
) -> Result<Json<GridResponse>, AgendaError> {
    if !state.config.use_agenda {
        return Err(AgendaError::Disabled);
    }
    let grid = TimeGrid::from_config(&state.config.agenda)?;
    Ok(Json(GridResponse {
        labels: grid.labels(),
        slot_minutes: grid.step(),
        geometry: LayoutGeometry::from(&state.config.agenda),
    }))
}
