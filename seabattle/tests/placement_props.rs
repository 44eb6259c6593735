//! Property tests for randomized placement and hit testing.

use std::collections::HashMap;

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use seabattle::{battlefield::Battlefield, errors::ValidationError, ship::Ship};

/// Build a fleet from a list of sizes. Sizes come from strategies that never
/// produce zero.
fn fleet(sizes: &[usize]) -> Vec<Ship> {
    sizes
        .iter()
        .enumerate()
        .map(|(idx, &size)| Ship::new(size, format!("ship-{}", idx)).unwrap())
        .collect()
}

/// Collect the occupied cells of every ship, keyed by 1-based marker.
fn cells_by_marker(battlefield: &Battlefield) -> HashMap<usize, Vec<(usize, usize)>> {
    let mut cells: HashMap<usize, Vec<(usize, usize)>> = HashMap::new();
    for (row, line) in battlefield.grid().iter_rows().enumerate() {
        for (col, &marker) in line.iter().enumerate() {
            if marker != 0 {
                cells.entry(marker).or_default().push((row, col));
            }
        }
    }
    cells
}

/// Check that the cells form one contiguous horizontal or vertical line.
/// Cells arrive in row-major order and are unique by construction.
fn is_straight_contiguous_line(cells: &[(usize, usize)]) -> bool {
    if cells.len() <= 1 {
        return true;
    }
    let same_row = cells.iter().all(|&(row, _)| row == cells[0].0);
    let same_col = cells.iter().all(|&(_, col)| col == cells[0].1);
    if same_row {
        let min = cells.iter().map(|&(_, col)| col).min().unwrap();
        let max = cells.iter().map(|&(_, col)| col).max().unwrap();
        max - min + 1 == cells.len()
    } else if same_col {
        let min = cells.iter().map(|&(row, _)| row).min().unwrap();
        let max = cells.iter().map(|&(row, _)| row).max().unwrap();
        max - min + 1 == cells.len()
    } else {
        false
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn placement_invariants_hold_or_construction_fails_cleanly(
        seed in any::<u64>(),
        rows in 1usize..=12,
        cols in 1usize..=12,
        sizes in prop::collection::vec(1usize..=4, 1..=4),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        match Battlefield::with_source(rows, cols, fleet(&sizes), &mut rng) {
            // A grid too crowded for its fleet must fail with exactly the
            // placement error, never hang or report anything else.
            Err(err) => prop_assert_eq!(err, ValidationError::SmallBattlefield),
            Ok(battlefield) => {
                let cells = cells_by_marker(&battlefield);
                for marker in cells.keys() {
                    prop_assert!(
                        *marker <= sizes.len(),
                        "marker {} does not reference a ship",
                        marker
                    );
                }
                for (idx, &size) in sizes.iter().enumerate() {
                    let placed = cells
                        .get(&(idx + 1))
                        .map(|cells| cells.as_slice())
                        .unwrap_or(&[]);
                    prop_assert_eq!(
                        placed.len(),
                        size,
                        "ship {} covers the wrong number of cells",
                        idx
                    );
                    prop_assert!(
                        is_straight_contiguous_line(placed),
                        "ship {} is not a straight contiguous line: {:?}",
                        idx,
                        placed
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_range_probes_never_observe_or_mutate_ships(
        seed in any::<u64>(),
        rows in 1usize..=8,
        cols in 1usize..=8,
        row_off in 0usize..=100,
        col_off in 0usize..=100,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        // A single one-sector ship always fits.
        let mut battlefield =
            Battlefield::with_source(rows, cols, fleet(&[1]), &mut rng).unwrap();
        let before = battlefield.ships().to_vec();

        prop_assert!(!battlefield.is_ship_at_position(rows + row_off, 0));
        prop_assert!(!battlefield.is_ship_at_position(0, cols + col_off));
        prop_assert!(!battlefield.was_ship_hit(rows + row_off, 0));
        prop_assert!(!battlefield.was_ship_hit(0, cols + col_off));
        prop_assert!(!battlefield.was_ship_hit(rows + row_off, cols + col_off));

        prop_assert_eq!(battlefield.ships(), &before[..]);
    }

    #[test]
    fn a_ship_takes_exactly_its_size_in_distinct_hits(
        seed in any::<u64>(),
        size in 1usize..=5,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut battlefield =
            Battlefield::with_source(6, 6, fleet(&[size]), &mut rng).unwrap();
        let cells = cells_by_marker(&battlefield).remove(&1).unwrap();
        prop_assert_eq!(cells.len(), size);

        for (hits, &(row, col)) in cells.iter().enumerate() {
            let ship = battlefield.get_ship_by_position(row, col).unwrap();
            prop_assert!(!ship.is_destroyed(), "destroyed after only {} hits", hits);
            prop_assert!(battlefield.was_ship_hit(row, col));
            let ship = battlefield.get_ship_by_position(row, col).unwrap();
            prop_assert_eq!(ship.sectors_remaining(), size - hits - 1);
        }
        let (row, col) = cells[0];
        prop_assert!(battlefield.get_ship_by_position(row, col).unwrap().is_destroyed());
    }
}
