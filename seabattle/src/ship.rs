//! The destructible ship entity and its named size presets.

use crate::errors::ValidationError;

/// Number of sectors a battleship occupies.
pub const BATTLESHIP_SIZE: usize = 5;

/// Number of sectors a destroyer occupies.
pub const DESTROYER_SIZE: usize = 4;

/// A named ship occupying a fixed number of grid sectors, destroyed once
/// every sector has been hit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    /// Display name of the ship.
    name: String,
    /// Number of sectors the ship occupies. Fixed at construction.
    total_size: usize,
    /// Sectors not yet destroyed. Only ever decreases.
    sectors_remaining: usize,
}

impl Ship {
    /// Construct a ship occupying `size` sectors. Fails with
    /// [`ValidationError::ShipLength`] if `size` is zero.
    pub fn new(size: usize, name: impl Into<String>) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::ShipLength);
        }
        Ok(Self {
            name: name.into(),
            total_size: size,
            sectors_remaining: size,
        })
    }

    /// Construct a battleship, the [`BATTLESHIP_SIZE`] sector preset.
    pub fn battleship(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_size: BATTLESHIP_SIZE,
            sectors_remaining: BATTLESHIP_SIZE,
        }
    }

    /// Construct a destroyer, the [`DESTROYER_SIZE`] sector preset.
    pub fn destroyer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_size: DESTROYER_SIZE,
            sectors_remaining: DESTROYER_SIZE,
        }
    }

    /// Check if every sector of this ship has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.sectors_remaining == 0
    }

    /// Destroy one sector. Does nothing once the ship is already destroyed.
    pub fn destroy_sector(&mut self) {
        self.sectors_remaining = self.sectors_remaining.saturating_sub(1);
    }

    /// Get the display name of this ship.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of sectors this ship occupies on the grid.
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Get the number of sectors that have not been destroyed yet.
    pub fn sectors_remaining(&self) -> usize {
        self.sectors_remaining
    }
}
