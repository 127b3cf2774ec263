use beaux_agenda::logic::{LayoutGeometry, OccupancyResolver, TimeGrid};
use beaux_agenda::projection::{Appointment, Bloqueo, Professional};
use beaux_agenda::scope::{AgendaDay, CalendarScope};
use beaux_common::models::{BloqueoRecord, CitaRecord, Estilista};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

// One busy branch: `rows` professionals with back-to-back half-hour citas
// all morning and a lunch block each.
fn busy_day(rows: usize) -> (Vec<Estilista>, Vec<CitaRecord>, Vec<BloqueoRecord>) {
    let mut estilistas = Vec::new();
    let mut citas = Vec::new();
    let mut bloqueos = Vec::new();

    for row in 0..rows {
        let profesional_id = format!("P-{}", row);
        estilistas.push(Estilista {
            profesional_id: profesional_id.clone(),
            nombre: format!("Estilista {}", row),
            sede_id: Some("SD-1".to_string()),
            ..Default::default()
        });
        for half_hour in 0..12u32 {
            let start = 7 * 60 + half_hour * 30;
            let end = start + 30;
            citas.push(
                CitaRecord::from_value(json!({
                    "_id": format!("c-{}-{}", row, half_hour),
                    "profesional_id": profesional_id,
                    "sede_id": "SD-1",
                    "cliente_id": format!("C-{}", half_hour % 4),
                    "fecha": "2025-03-10",
                    "hora_inicio": format!("{:02}:{:02}", start / 60, start % 60),
                    "hora_fin": format!("{:02}:{:02}", end / 60, end % 60),
                    "estado": "confirmada"
                }))
                .unwrap(),
            );
        }
        bloqueos.push(BloqueoRecord {
            id: format!("b-{}", row),
            profesional_id,
            fecha: Some("2025-03-10".to_string()),
            hora_inicio: "13:00".to_string(),
            hora_fin: "14:00".to_string(),
            ..Default::default()
        });
    }
    (estilistas, citas, bloqueos)
}

fn benchmark_occupancy(c: &mut Criterion) {
    let mut group = c.benchmark_group("occupancy");
    let (estilistas, citas, bloqueos) = busy_day(12);
    let grid = TimeGrid::default();
    let professionals: Vec<Professional> = estilistas
        .iter()
        .enumerate()
        .map(|(row, e)| Professional::from_estilista(e, row))
        .collect();
    let appointments: Vec<Appointment> = citas
        .iter()
        .enumerate()
        .map(|(i, c)| Appointment::project(c, i, &professionals))
        .collect();
    let blocks: Vec<Bloqueo> = bloqueos.iter().map(Bloqueo::project).collect();

    group.bench_function("full_matrix_12_rows", |b| {
        let resolver = OccupancyResolver::new(&grid, &professionals, &appointments, &blocks);
        b.iter(|| {
            let mut taken = 0;
            for professional in &professionals {
                for slot in grid.slots() {
                    if resolver.is_occupied(black_box(&professional.nombre), slot.as_str()) {
                        taken += 1;
                    }
                }
            }
            taken
        })
    });

    group.bench_function("assemble_and_view_12_rows", |b| {
        let fecha = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let geometry = LayoutGeometry::default();
        b.iter(|| {
            let day = AgendaDay::assemble(
                CalendarScope::Sede {
                    sede_id: "SD-1".to_string(),
                    profesional_id: None,
                },
                fecha,
                grid.clone(),
                black_box(&estilistas),
                black_box(&citas),
                black_box(&bloqueos),
            );
            day.view(&geometry)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_occupancy);
criterion_main!(benches);
