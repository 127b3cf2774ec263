// --- File: crates/beaux_agenda/src/scope.rs ---
//! One agenda for both kinds of user.
//!
//! A branch user sees their own branch, optionally narrowed to one
//! professional, and the records are filtered here as well as by the
//! backend. An administrator picks any branch and the backend's branch
//! filter on citas is trusted. Everything else is shared.

use beaux_common::models::{BloqueoRecord, CitaRecord, Estilista};
use beaux_common::services::{AgendaSource, CitaFilter};
use beaux_config::AgendaConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::AgendaError;
use crate::logic::{
    group_bookings, BookingGroup, Density, LayoutGeometry, OccupancyResolver, OccupantKind,
    Position, TimeGrid,
};
use crate::projection::{Appointment, Bloqueo, Professional};

/// Page size asked of the backend for one administrator day view.
const ADMIN_CITAS_LIMIT: u32 = 100;

/// Who is looking at the agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum CalendarScope {
    /// A user bound to one branch.
    Sede {
        sede_id: String,
        profesional_id: Option<String>,
    },
    /// An administrator viewing a selected branch.
    SuperAdmin { sede_id: String },
}

impl CalendarScope {
    pub fn sede_id(&self) -> &str {
        match self {
            CalendarScope::Sede { sede_id, .. } | CalendarScope::SuperAdmin { sede_id } => sede_id,
        }
    }

    fn profesional_id(&self) -> Option<&str> {
        match self {
            CalendarScope::Sede { profesional_id, .. } => profesional_id.as_deref(),
            CalendarScope::SuperAdmin { .. } => None,
        }
    }

    fn cita_filter(&self, fecha: NaiveDate) -> CitaFilter {
        CitaFilter {
            sede_id: Some(self.sede_id().to_string()),
            profesional_id: self.profesional_id().map(str::to_string),
            fecha: Some(fecha.format("%Y-%m-%d").to_string()),
            limit: match self {
                CalendarScope::Sede { .. } => None,
                CalendarScope::SuperAdmin { .. } => Some(ADMIN_CITAS_LIMIT),
            },
        }
    }

    fn keeps_estilista(&self, estilista: &Estilista) -> bool {
        if estilista.activo == Some(false) || estilista.profesional_id.is_empty() {
            return false;
        }
        match (self, estilista.sede_id.as_deref()) {
            // Administrators also see professionals the backend did not tag.
            (CalendarScope::SuperAdmin { .. }, None) => true,
            (_, sede) if sede != Some(self.sede_id()) => false,
            _ => self
                .profesional_id()
                .map_or(true, |id| estilista.profesional_id == id),
        }
    }

    fn keeps_cita(&self, cita: &CitaRecord, fecha: &str) -> bool {
        if cita.fecha_dia() != fecha {
            return false;
        }
        match self {
            CalendarScope::Sede { sede_id, profesional_id } => {
                cita.sede_id.as_deref() == Some(sede_id.as_str())
                    && profesional_id
                        .as_deref()
                        .map_or(true, |id| cita.profesional_id == id)
            }
            CalendarScope::SuperAdmin { .. } => true,
        }
    }
}

/// One day of one branch, projected and ready to lay out.
#[derive(Debug, Clone)]
pub struct AgendaDay {
    pub fecha: NaiveDate,
    pub scope: CalendarScope,
    pub grid: TimeGrid,
    pub professionals: Vec<Professional>,
    pub appointments: Vec<Appointment>,
    pub blocks: Vec<Bloqueo>,
    /// Loads that failed and were replaced by empty lists.
    pub warnings: Vec<String>,
}

impl AgendaDay {
    /// Assembles a day from already-loaded records.
    pub fn assemble(
        scope: CalendarScope,
        fecha: NaiveDate,
        grid: TimeGrid,
        estilistas: &[Estilista],
        citas: &[CitaRecord],
        bloqueos: &[BloqueoRecord],
    ) -> AgendaDay {
        let fecha_str = fecha.format("%Y-%m-%d").to_string();
        let professionals: Vec<Professional> = estilistas
            .iter()
            .filter(|e| scope.keeps_estilista(e))
            .enumerate()
            .map(|(row, e)| Professional::from_estilista(e, row))
            .collect();
        let appointments = citas
            .iter()
            .filter(|c| scope.keeps_cita(c, &fecha_str))
            .enumerate()
            .map(|(index, c)| Appointment::project(c, index, &professionals))
            .collect();
        let blocks = Bloqueo::for_date(bloqueos, fecha)
            .into_iter()
            .filter(|b| professionals.iter().any(|p| p.profesional_id == b.profesional_id))
            .collect();

        AgendaDay {
            fecha,
            scope,
            grid,
            professionals,
            appointments,
            blocks,
            warnings: Vec::new(),
        }
    }

    pub fn resolver(&self) -> OccupancyResolver<'_> {
        OccupancyResolver::new(&self.grid, &self.professionals, &self.appointments, &self.blocks)
    }

    /// Lays the day out. Appointments and blocks whose professional has no
    /// row are left out.
    pub fn view(&self, geometry: &LayoutGeometry) -> AgendaView {
        let resolver = self.resolver();

        let rows = self
            .professionals
            .iter()
            .map(|professional| AgendaRow {
                professional: professional.clone(),
                cells: self
                    .grid
                    .slots()
                    .iter()
                    .map(|slot| {
                        let occupant =
                            resolver.occupant_for(&professional.profesional_id, slot.as_str());
                        CellState {
                            slot: slot.to_string(),
                            kind: occupant.map(|o| o.kind()),
                            occupant_id: occupant.map(|o| o.id().to_string()),
                        }
                    })
                    .collect(),
            })
            .collect();

        let appointments = self
            .appointments
            .iter()
            .filter_map(|appointment| {
                let Some(position) =
                    geometry.position_appointment(&self.grid, appointment, &self.professionals)
                else {
                    debug!(
                        "Cita {} has no row for profesional {}",
                        appointment.id, appointment.profesional_id
                    );
                    return None;
                };
                Some(PlacedAppointment {
                    appointment: appointment.clone(),
                    density: Density::for_height(position.height),
                    position,
                    group: group_bookings(appointment, &self.appointments),
                })
            })
            .collect();

        let blocks = self
            .blocks
            .iter()
            .filter_map(|bloqueo| {
                let position = geometry.position_block(&self.grid, bloqueo, &self.professionals)?;
                Some(PlacedBlock {
                    bloqueo: bloqueo.clone(),
                    position,
                })
            })
            .collect();

        AgendaView {
            fecha: self.fecha.format("%Y-%m-%d").to_string(),
            scope: self.scope.clone(),
            labels: self.grid.labels(),
            geometry: *geometry,
            rows,
            appointments,
            blocks,
            warnings: self.warnings.clone(),
        }
    }
}

/// Occupancy of one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CellState {
    pub slot: String,
    pub kind: Option<OccupantKind>,
    pub occupant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AgendaRow {
    pub professional: Professional,
    pub cells: Vec<CellState>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlacedAppointment {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub position: Position,
    pub density: Density,
    pub group: BookingGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PlacedBlock {
    #[serde(flatten)]
    pub bloqueo: Bloqueo,
    pub position: Position,
}

/// Everything the front-end needs to draw one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AgendaView {
    pub fecha: String,
    pub scope: CalendarScope,
    pub labels: Vec<String>,
    pub geometry: LayoutGeometry,
    pub rows: Vec<AgendaRow>,
    pub appointments: Vec<PlacedAppointment>,
    pub blocks: Vec<PlacedBlock>,
    pub warnings: Vec<String>,
}

/// Loads a day from an [`AgendaSource`].
///
/// Each build issues its own set of requests and returns a self-contained
/// day, so a slow build for an old date never mixes into a newer one.
pub struct AgendaBuilder<S: ?Sized> {
    source: Arc<S>,
    grid: TimeGrid,
    geometry: LayoutGeometry,
}

impl<S> AgendaBuilder<S>
where
    S: AgendaSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, config: &AgendaConfig) -> Result<Self, AgendaError> {
        Ok(AgendaBuilder {
            source,
            grid: TimeGrid::from_config(config)?,
            geometry: LayoutGeometry::from(config),
        })
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Fetches and projects one day. Failed loads degrade to empty lists
    /// and are reported in `warnings`.
    pub async fn build(&self, scope: &CalendarScope, fecha: NaiveDate) -> AgendaDay {
        let mut warnings = Vec::new();

        let estilistas = match self.source.list_estilistas(Some(scope.sede_id())).await {
            Ok(list) => list,
            Err(e) => {
                warn!("Loading estilistas for {} failed: {}", scope.sede_id(), e);
                warnings.push("No se pudieron cargar los estilistas".to_string());
                Vec::new()
            }
        };

        let citas = match self.source.list_citas(&scope.cita_filter(fecha)).await {
            Ok(list) => list,
            Err(e) => {
                warn!("Loading citas for {} on {} failed: {}", scope.sede_id(), fecha, e);
                warnings.push("No se pudieron cargar las citas".to_string());
                Vec::new()
            }
        };

        let ids: Vec<String> = estilistas
            .iter()
            .filter(|e| scope.keeps_estilista(e))
            .map(|e| e.profesional_id.clone())
            .collect();
        let bloqueos = self.load_bloqueos(ids).await;

        let mut day = AgendaDay::assemble(
            scope.clone(),
            fecha,
            self.grid.clone(),
            &estilistas,
            &citas,
            &bloqueos,
        );
        day.warnings = warnings;
        info!(
            "Agenda {} {}: {} profesionales, {} citas, {} bloqueos",
            scope.sede_id(),
            fecha,
            day.professionals.len(),
            day.appointments.len(),
            day.blocks.len()
        );
        day
    }

    pub async fn build_view(&self, scope: &CalendarScope, fecha: NaiveDate) -> AgendaView {
        self.build(scope, fecha).await.view(&self.geometry)
    }

    /// Blocks of every professional, loaded concurrently. A professional
    /// whose load fails contributes nothing.
    async fn load_bloqueos(&self, profesional_ids: Vec<String>) -> Vec<BloqueoRecord> {
        let mut tasks = JoinSet::new();
        for (order, id) in profesional_ids.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            tasks.spawn(async move {
                let result = source.list_bloqueos_profesional(&id).await;
                (order, id, result.map_err(|e| e.to_string()))
            });
        }

        let mut by_order = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((order, _, Ok(list))) => {
                    by_order.insert(order, list);
                }
                Ok((_, id, Err(e))) => {
                    warn!("Loading bloqueos for profesional {} failed: {}", id, e);
                }
                Err(e) => warn!("Bloqueo load task failed: {}", e),
            }
        }

        let mut orders: Vec<usize> = by_order.keys().copied().collect();
        orders.sort_unstable();
        orders
            .into_iter()
            .filter_map(|order| by_order.remove(&order))
            .flatten()
            .collect()
    }
}
