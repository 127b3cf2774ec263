// File: crates/beaux_agenda/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{GridResponse, OccupancyResponse};
use crate::logic::{BookingGroup, Density, LayoutGeometry, OccupantKind, Position};
use crate::projection::{Appointment, Bloqueo, Professional, StatusStyle};
use crate::scope::{AgendaRow, AgendaView, CalendarScope, CellState, PlacedAppointment, PlacedBlock};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::agenda_handler,
        crate::handlers::occupancy_handler,
        crate::handlers::grid_handler
    ),
    components(
        schemas(
            AgendaView,
            AgendaRow,
            CellState,
            CalendarScope,
            PlacedAppointment,
            PlacedBlock,
            Appointment,
            Bloqueo,
            Professional,
            StatusStyle,
            BookingGroup,
            Position,
            Density,
            OccupantKind,
            LayoutGeometry,
            OccupancyResponse,
            GridResponse
        )
    ),
    tags(
        (name = "Agenda", description = "Day agenda of a branch")
    ),
    servers(
        (url = "/api", description = "Beaux API server")
    )
)]
pub struct AgendaApiDoc;
