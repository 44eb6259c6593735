//! Randomized collision-free ship placement.

use log::{debug, warn};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{battlefield::Grid, errors::ValidationError, ship::Ship};

/// Placement attempts allowed per ship before the grid is declared too small
/// for the fleet. Far above the success horizon of any grid the fleet
/// actually fits, while keeping hopeless grids fast to reject.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Direction a ship extends in from its start cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All four directions, in sampling order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Step `dist` cells from `(row, col)` along this direction. Returns
    /// `None` when the step leaves the coordinate space.
    fn step(self, row: usize, col: usize, dist: usize) -> Option<(usize, usize)> {
        match self {
            Direction::Left => col.checked_sub(dist).map(|col| (row, col)),
            Direction::Right => col.checked_add(dist).map(|col| (row, col)),
            Direction::Up => row.checked_sub(dist).map(|row| (row, col)),
            Direction::Down => row.checked_add(dist).map(|row| (row, col)),
        }
    }
}

impl Distribution<Direction> for Standard {
    /// Sample one of the four directions with equal probability.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0, Direction::ALL.len())]
    }
}

/// Source of the random choices placement makes. Implemented for every
/// [`Rng`], so production code passes `thread_rng` while tests can supply a
/// seeded generator or a scripted sequence of cells and directions.
pub trait PlacementSource {
    /// Choose the start cell for one placement attempt. Cells outside the
    /// given dimensions are treated as failed attempts.
    fn start_cell(&mut self, rows: usize, cols: usize) -> (usize, usize);

    /// Choose the direction the ship extends in from its start cell.
    fn direction(&mut self) -> Direction;
}

impl<R: Rng> PlacementSource for R {
    fn start_cell(&mut self, rows: usize, cols: usize) -> (usize, usize) {
        (self.gen_range(0, rows), self.gen_range(0, cols))
    }

    fn direction(&mut self) -> Direction {
        self.gen()
    }
}

/// Place every ship on the grid in list order. The cells of `ships[i]` are
/// marked with `i + 1`. Ships placed earlier are never moved to make room
/// for later ones, so placement can fail on crowded grids even when a
/// packing exists.
pub(super) fn position_ships(
    grid: &mut Grid,
    ships: &[Ship],
    source: &mut impl PlacementSource,
) -> Result<(), ValidationError> {
    for (idx, ship) in ships.iter().enumerate() {
        position_ship(grid, ship, idx + 1, source)?;
    }
    Ok(())
}

/// Retry random placements of a single ship until one fits or the allowed
/// attempts run out. A failed attempt redraws the start cell and the
/// direction together.
fn position_ship(
    grid: &mut Grid,
    ship: &Ship,
    marker: usize,
    source: &mut impl PlacementSource,
) -> Result<(), ValidationError> {
    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        let (row, col) = source.start_cell(grid.rows(), grid.cols());
        match grid.get(row, col) {
            Some(0) => {}
            _ => continue,
        }
        let direction = source.direction();
        if let Some(cells) = project(grid, ship.total_size(), row, col, direction) {
            for (row, col) in cells {
                grid.set(row, col, marker);
            }
            debug!(
                "placed {} ({} sectors) after {} attempts",
                ship.name(),
                ship.total_size(),
                attempt
            );
            return Ok(());
        }
    }
    warn!(
        "no room for {} after {} attempts",
        ship.name(),
        MAX_PLACEMENT_ATTEMPTS
    );
    Err(ValidationError::SmallBattlefield)
}

/// Compute the cells a ship of `len` sectors would occupy from `(row, col)`
/// along `direction`. Returns `None` when any required cell is out of bounds
/// or already occupied.
fn project(
    grid: &Grid,
    len: usize,
    row: usize,
    col: usize,
    direction: Direction,
) -> Option<Vec<(usize, usize)>> {
    let mut cells = Vec::with_capacity(len);
    for dist in 0..len {
        let (row, col) = direction.step(row, col, dist)?;
        if grid.get(row, col) != Some(0) {
            return None;
        }
        cells.push((row, col));
    }
    Some(cells)
}
