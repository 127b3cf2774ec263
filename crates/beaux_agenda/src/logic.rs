// --- File: crates/beaux_agenda/src/logic.rs ---
use beaux_config::AgendaConfig;
use beaux_format::parse_agenda_minutes;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::AgendaError;
use crate::projection::{Appointment, Bloqueo, Professional};

// --- Time grid ---

/// One `HH:MM` label of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    fn from_minutes(minutes: u32) -> Self {
        TimeSlot(format!("{:02}:{:02}", minutes / 60, minutes % 60))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The column axis of the agenda: evenly spaced labels from the first to
/// the last slot, both included. Generated once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    origin: u32,
    step: u32,
    slots: Vec<TimeSlot>,
}

impl TimeGrid {
    pub fn new(first: &str, last: &str, step_minutes: u32) -> Result<Self, AgendaError> {
        let origin = parse_agenda_minutes(first)
            .ok_or_else(|| AgendaError::InvalidGrid(format!("bad first slot '{}'", first)))?;
        let end = parse_agenda_minutes(last)
            .ok_or_else(|| AgendaError::InvalidGrid(format!("bad last slot '{}'", last)))?;
        if step_minutes == 0 {
            return Err(AgendaError::InvalidGrid("slot step must be positive".into()));
        }
        if end < origin {
            return Err(AgendaError::InvalidGrid(format!(
                "last slot {} is before first slot {}",
                last, first
            )));
        }
        Ok(Self::build(origin, end, step_minutes))
    }

    pub fn from_config(config: &AgendaConfig) -> Result<Self, AgendaError> {
        Self::new(&config.first_slot, &config.last_slot, config.slot_minutes)
    }

    fn build(origin: u32, end: u32, step: u32) -> Self {
        let slots = (origin..=end)
            .step_by(step as usize)
            .map(TimeSlot::from_minutes)
            .collect();
        TimeGrid {
            origin,
            step,
            slots,
        }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn labels(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.0.clone()).collect()
    }

    /// Minutes since midnight of the first slot.
    pub fn origin(&self) -> u32 {
        self.origin
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    /// Minutes between the grid origin and a time label. Times before the
    /// origin are negative; unparseable labels give `None`.
    pub fn offset(&self, time: &str) -> Option<i32> {
        parse_agenda_minutes(time).map(|m| m as i32 - self.origin as i32)
    }
}

/// 05:00 to 19:00 every 30 minutes.
impl Default for TimeGrid {
    fn default() -> Self {
        Self::build(5 * 60, 19 * 60, 30)
    }
}

// --- Overlay geometry ---

/// Pixel constants of the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LayoutGeometry {
    pub cell_height: i32,
    pub cell_width: i32,
    pub header_height: i32,
    pub label_column_width: i32,
    pub top_adjust: i32,
    pub height_padding: i32,
    pub min_height: i32,
}

impl From<&AgendaConfig> for LayoutGeometry {
    fn from(config: &AgendaConfig) -> Self {
        LayoutGeometry {
            cell_height: config.cell_height,
            cell_width: config.cell_width,
            header_height: config.header_height,
            label_column_width: config.label_column_width,
            top_adjust: config.top_adjust,
            height_padding: config.height_padding,
            min_height: config.min_height,
        }
    }
}

impl Default for LayoutGeometry {
    fn default() -> Self {
        LayoutGeometry::from(&AgendaConfig::default())
    }
}

/// Absolute overlay box of an appointment or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Position {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub start_slot: i32,
    pub end_slot: i32,
}

/// How much an overlay box has room to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    Medium,
    Full,
}

impl Density {
    pub fn for_height(height: i32) -> Density {
        match height {
            h if h <= 30 => Density::Compact,
            h if h <= 60 => Density::Medium,
            _ => Density::Full,
        }
    }
}

fn ceil_div(value: i32, step: i32) -> i32 {
    -((-value).div_euclid(step))
}

impl LayoutGeometry {
    /// Box for a `start`..`end` range in the given column. Geometry snaps to
    /// whole slots: the start rounds down and the end rounds up.
    pub fn position(&self, grid: &TimeGrid, start: &str, end: &str, column: usize) -> Option<Position> {
        let step = grid.step() as i32;
        let start_slot = grid.offset(start)?.div_euclid(step);
        let end_slot = ceil_div(grid.offset(end)?, step);
        let height = ((end_slot - start_slot) * self.cell_height - self.height_padding)
            .max(self.min_height);
        Some(Position {
            left: self.label_column_width + column as i32 * self.cell_width,
            top: self.header_height + start_slot * self.cell_height + self.top_adjust,
            width: self.cell_width - 1,
            height,
            start_slot,
            end_slot,
        })
    }

    /// Box for an appointment, or `None` when its professional has no row.
    pub fn position_appointment(
        &self,
        grid: &TimeGrid,
        appointment: &Appointment,
        professionals: &[Professional],
    ) -> Option<Position> {
        let column = column_of(professionals, &appointment.profesional_id)?;
        self.position(grid, &appointment.start, &appointment.end, column)
    }

    pub fn position_block(
        &self,
        grid: &TimeGrid,
        bloqueo: &Bloqueo,
        professionals: &[Professional],
    ) -> Option<Position> {
        let column = column_of(professionals, &bloqueo.profesional_id)?;
        self.position(grid, &bloqueo.start, &bloqueo.end, column)
    }
}

fn column_of(professionals: &[Professional], profesional_id: &str) -> Option<usize> {
    professionals
        .iter()
        .position(|p| p.profesional_id == profesional_id)
}

// --- Occupancy ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum OccupantKind {
    Appointment,
    Block,
}

/// What covers a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Occupant<'a> {
    Appointment(&'a Appointment),
    Block(&'a Bloqueo),
}

impl<'a> Occupant<'a> {
    pub fn kind(&self) -> OccupantKind {
        match self {
            Occupant::Appointment(_) => OccupantKind::Appointment,
            Occupant::Block(_) => OccupantKind::Block,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            Occupant::Appointment(a) => &a.id,
            Occupant::Block(b) => &b.id,
        }
    }
}

/// Answers "is this cell taken" for one day's data.
///
/// Intervals are half-open, so a slot equal to an interval's end is free.
/// Appointments are checked before blocks.
#[derive(Debug, Clone, Copy)]
pub struct OccupancyResolver<'a> {
    grid: &'a TimeGrid,
    professionals: &'a [Professional],
    appointments: &'a [Appointment],
    blocks: &'a [Bloqueo],
}

impl<'a> OccupancyResolver<'a> {
    pub fn new(
        grid: &'a TimeGrid,
        professionals: &'a [Professional],
        appointments: &'a [Appointment],
        blocks: &'a [Bloqueo],
    ) -> Self {
        OccupancyResolver {
            grid,
            professionals,
            appointments,
            blocks,
        }
    }

    /// The professional shown on a row, matched by display name and then by id.
    pub fn row(&self, row_name: &str) -> Option<&'a Professional> {
        self.professionals
            .iter()
            .find(|p| p.nombre == row_name)
            .or_else(|| self.professionals.iter().find(|p| p.profesional_id == row_name))
    }

    fn covers(&self, start: &str, end: &str, at: i32) -> bool {
        match (self.grid.offset(start), self.grid.offset(end)) {
            (Some(s), Some(e)) => s <= at && at < e,
            _ => false,
        }
    }

    /// What occupies `slot` for one professional.
    pub fn occupant_for(&self, profesional_id: &str, slot: &str) -> Option<Occupant<'a>> {
        let at = self.grid.offset(slot)?;
        let appointments = self.appointments;
        let blocks = self.blocks;
        appointments
            .iter()
            .find(|a| a.profesional_id == profesional_id && self.covers(&a.start, &a.end, at))
            .map(Occupant::Appointment)
            .or_else(|| {
                blocks
                    .iter()
                    .find(|b| b.profesional_id == profesional_id && self.covers(&b.start, &b.end, at))
                    .map(Occupant::Block)
            })
    }

    /// What occupies `slot` on the row labelled `row_name`. Unknown rows are free.
    pub fn occupant(&self, row_name: &str, slot: &str) -> Option<Occupant<'a>> {
        let professional = self.row(row_name)?;
        self.occupant_for(&professional.profesional_id, slot)
    }

    pub fn is_occupied(&self, row_name: &str, slot: &str) -> bool {
        self.occupant(row_name, slot).is_some()
    }
}

// --- Contiguous bookings ---

/// Several service bookings of one client with one professional, shown as
/// a single block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingGroup {
    pub appointment_ids: Vec<String>,
    pub start: String,
    pub end: String,
    pub total_duration: u32,
    /// Distinct service names joined with `" + "`.
    pub servicios: String,
    /// `"{n} servicios"` when the group has more than one booking.
    pub label: Option<String>,
}

impl BookingGroup {
    fn single(appointment: &Appointment) -> BookingGroup {
        BookingGroup {
            appointment_ids: vec![appointment.id.clone()],
            start: appointment.start.clone(),
            end: appointment.end.clone(),
            total_duration: appointment.duracion,
            servicios: appointment.servicio_nombre.clone(),
            label: None,
        }
    }

    pub fn len(&self) -> usize {
        self.appointment_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointment_ids.is_empty()
    }
}

/// Every booking sharing the appointment's client and professional.
///
/// Members are not checked for time adjacency: two separate visits of the
/// same client with the same professional on one day end up in one group.
pub fn group_bookings(appointment: &Appointment, all: &[Appointment]) -> BookingGroup {
    let Some(cliente_id) = appointment.cliente_id.as_deref().filter(|c| !c.is_empty()) else {
        return BookingGroup::single(appointment);
    };

    let mut members: Vec<&Appointment> = all
        .iter()
        .filter(|a| {
            a.cliente_id.as_deref() == Some(cliente_id)
                && a.profesional_id == appointment.profesional_id
        })
        .collect();
    if members.len() <= 1 {
        return BookingGroup::single(appointment);
    }
    // Unplaced bookings (empty start) go last and never bound the group.
    members.sort_by(|a, b| (a.start.is_empty(), &a.start).cmp(&(b.start.is_empty(), &b.start)));
    let placed: Vec<&&Appointment> = members.iter().filter(|m| !m.start.is_empty()).collect();
    let (start, end) = match (placed.first(), placed.last()) {
        (Some(first), Some(last)) => (first.start.clone(), last.end.clone()),
        _ => (appointment.start.clone(), appointment.end.clone()),
    };

    let mut servicios: Vec<&str> = Vec::new();
    for name in members.iter().map(|m| m.servicio_nombre.as_str()) {
        if !name.is_empty() && !servicios.contains(&name) {
            servicios.push(name);
        }
    }

    BookingGroup {
        appointment_ids: members.iter().map(|m| m.id.clone()).collect(),
        start,
        end,
        total_duration: members.iter().map(|m| m.duracion).sum(),
        servicios: servicios.join(" + "),
        label: Some(format!("{} servicios", members.len())),
    }
}
