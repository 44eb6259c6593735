//! The battlefield state engine: grid construction, randomized ship
//! placement, and hit bookkeeping.

use rand::thread_rng;

use crate::{errors::ValidationError, ship::Ship};

pub use self::{
    grid::Grid,
    placement::{Direction, PlacementSource, MAX_PLACEMENT_ATTEMPTS},
};

mod grid;
mod placement;

/// A battlefield: an owned grid of cells and the fleet that occupies it.
///
/// The grid is built once at construction and never resized. Cell values are
/// fixed after placement; attacks mutate only the referenced [`Ship`].
#[derive(Debug)]
pub struct Battlefield {
    /// Cells holding 1-based ship indices, `0` where empty.
    grid: Grid,
    /// The fleet in placement order. `grid` cells index into this list.
    ships: Vec<Ship>,
}

impl Battlefield {
    /// Construct a battlefield and randomly place `ships` on it using the
    /// process RNG.
    ///
    /// Fails with [`ValidationError::BattlefieldRows`] or
    /// [`ValidationError::BattlefieldCols`] when either dimension is zero,
    /// with [`ValidationError::NoShips`] when the fleet is empty, and with
    /// [`ValidationError::SmallBattlefield`] when placement cannot fit the
    /// fleet within its allowed attempts.
    pub fn new(rows: usize, cols: usize, ships: Vec<Ship>) -> Result<Self, ValidationError> {
        Self::with_source(rows, cols, ships, &mut thread_rng())
    }

    /// Construct a battlefield drawing start cells and directions from the
    /// given source. See [`Battlefield::new`] for the error contract.
    pub fn with_source(
        rows: usize,
        cols: usize,
        ships: Vec<Ship>,
        source: &mut impl PlacementSource,
    ) -> Result<Self, ValidationError> {
        if rows == 0 {
            return Err(ValidationError::BattlefieldRows);
        }
        if cols == 0 {
            return Err(ValidationError::BattlefieldCols);
        }
        if ships.is_empty() {
            return Err(ValidationError::NoShips);
        }
        let mut grid = Grid::new(rows, cols);
        placement::position_ships(&mut grid, &ships, source)?;
        Ok(Self { grid, ships })
    }

    /// Check whether a sector of some ship is located at `(row, col)`.
    /// Out-of-range coordinates are simply "no ship there", not an error.
    pub fn is_ship_at_position(&self, row: usize, col: usize) -> bool {
        match self.grid.get(row, col) {
            Some(marker) => marker != 0,
            None => false,
        }
    }

    /// Get the ship with a sector at `(row, col)`. Fails with
    /// [`ValidationError::InvalidShipPosition`] when
    /// [`is_ship_at_position`][Self::is_ship_at_position] is false.
    pub fn get_ship_by_position(&self, row: usize, col: usize) -> Result<&Ship, ValidationError> {
        match self.grid.get(row, col) {
            Some(marker) if marker != 0 => Ok(&self.ships[marker - 1]),
            _ => Err(ValidationError::InvalidShipPosition),
        }
    }

    /// Resolve an attack on `(row, col)`. Destroys one sector of the ship
    /// there and returns true; returns false without mutating anything for
    /// empty cells and out-of-range coordinates.
    ///
    /// The battlefield does not remember which cells were attacked already:
    /// a repeated attack on an occupied cell keeps returning true and keeps
    /// destroying a sector (a no-op once the ship is destroyed). Tracking
    /// revealed cells belongs to the caller.
    pub fn was_ship_hit(&mut self, row: usize, col: usize) -> bool {
        match self.grid.get(row, col) {
            Some(marker) if marker != 0 => {
                self.ships[marker - 1].destroy_sector();
                true
            }
            _ => false,
        }
    }

    /// Get the number of ships on this battlefield.
    pub fn ships_count(&self) -> usize {
        self.ships.len()
    }

    /// Get the fleet in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Get the number of rows on this battlefield.
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Get the number of cols on this battlefield.
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Get a read-only view of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
