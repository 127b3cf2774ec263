#[cfg(test)]
mod tests {
    use crate::logic::{LayoutGeometry, OccupancyResolver, TimeGrid};
    use crate::projection::{Bloqueo, Professional};
    use beaux_common::models::{BloqueoRecord, Estilista};
    use proptest::prelude::*;

    fn hhmm(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    fn block(id: &str, profesional: &str, start: u32, end: u32) -> Bloqueo {
        Bloqueo::project(&BloqueoRecord {
            id: id.to_string(),
            profesional_id: profesional.to_string(),
            hora_inicio: hhmm(start),
            hora_fin: hhmm(end),
            ..Default::default()
        })
    }

    fn rows() -> Vec<Professional> {
        ["P-1", "P-2"]
            .iter()
            .enumerate()
            .map(|(row, id)| {
                Professional::from_estilista(
                    &Estilista {
                        profesional_id: id.to_string(),
                        nombre: format!("Estilista {}", id),
                        ..Default::default()
                    },
                    row,
                )
            })
            .collect()
    }

    // Start and length in half-hour steps inside 05:00..19:00.
    fn interval() -> impl Strategy<Value = (u32, u32)> {
        (0u32..28).prop_flat_map(|s| (Just(s), (s + 1)..=28))
    }

    proptest! {
        // A slot is taken iff some interval of that professional covers it.
        #[test]
        fn test_occupied_iff_inside_some_interval(
            (s1, e1) in interval(),
            (s2, e2) in interval(),
            other_owner in any::<bool>(),
            t in 0u32..29,
        ) {
            let grid = TimeGrid::default();
            let rows = rows();
            let second_owner = if other_owner { "P-2" } else { "P-1" };
            let blocks = vec![
                block("b1", "P-1", 300 + s1 * 30, 300 + e1 * 30),
                block("b2", second_owner, 300 + s2 * 30, 300 + e2 * 30),
            ];
            let resolver = OccupancyResolver::new(&grid, &rows, &[], &blocks);

            let in_first = s1 <= t && t < e1;
            let in_second = !other_owner && s2 <= t && t < e2;
            let slot = hhmm(300 + t * 30);
            prop_assert_eq!(resolver.is_occupied("Estilista P-1", &slot), in_first || in_second);
        }

        // Whole-slot ranges never render below the minimum or off the row.
        #[test]
        fn test_position_spans_whole_slots((s, e) in interval(), column in 0usize..8) {
            let grid = TimeGrid::default();
            let geometry = LayoutGeometry::default();
            let position = geometry
                .position(&grid, &hhmm(300 + s * 30), &hhmm(300 + e * 30), column)
                .unwrap();

            prop_assert_eq!(position.start_slot, s as i32);
            prop_assert_eq!(position.end_slot, e as i32);
            prop_assert!(position.height >= geometry.min_height);
            prop_assert_eq!(position.left, geometry.label_column_width + column as i32 * geometry.cell_width);
        }
    }
}
