//! The attack-flow controller: one attack per call, shot counting, and
//! game-over detection.

use thiserror::Error;

use crate::battlefield::Battlefield;

/// Error returned when attacking after every ship was already destroyed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("the game is already over")]
pub struct GameOverError;

/// Resolution of a single attack.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AttackOutcome {
    /// The attack hit open water.
    Miss,
    /// The attack destroyed a sector of a ship that is still afloat.
    Hit,
    /// The attack left the named ship with no intact sectors while other
    /// ships are still afloat.
    Sunk(String),
    /// The attack sank the named ship and it was the last one.
    Victory(String),
}

impl AttackOutcome {
    /// Get the name of the ship this attack sank, if it sank one.
    pub fn sunk_ship(&self) -> Option<&str> {
        match self {
            AttackOutcome::Miss | AttackOutcome::Hit => None,
            AttackOutcome::Sunk(name) | AttackOutcome::Victory(name) => Some(name),
        }
    }
}

/// Drives one game over a battlefield: translates attacks into outcomes and
/// tracks shots and destroyed ships.
pub struct Game {
    battlefield: Battlefield,
    /// Attacks resolved so far, repeats included.
    shots: usize,
    /// Ships destroyed so far. Each ship is counted once.
    ships_destroyed: usize,
}

impl Game {
    /// Start a game on the given battlefield.
    pub fn new(battlefield: Battlefield) -> Self {
        Self {
            battlefield,
            shots: 0,
            ships_destroyed: 0,
        }
    }

    /// Resolve one attack at `(row, col)`.
    ///
    /// Every resolved attack counts as a shot, repeats and misses included.
    /// Re-attacking a destroyed ship's cell reports [`AttackOutcome::Sunk`]
    /// again without counting the ship twice. Fails once the game is over.
    pub fn attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, GameOverError> {
        if self.is_over() {
            return Err(GameOverError);
        }
        self.shots += 1;
        let was_destroyed = self
            .battlefield
            .get_ship_by_position(row, col)
            .map(|ship| ship.is_destroyed())
            .unwrap_or(false);
        if !self.battlefield.was_ship_hit(row, col) {
            return Ok(AttackOutcome::Miss);
        }
        // was_ship_hit returned true, so the cell is guaranteed to hold a
        // ship.
        let ship = self
            .battlefield
            .get_ship_by_position(row, col)
            .expect("hit cell holds a ship");
        if !ship.is_destroyed() {
            return Ok(AttackOutcome::Hit);
        }
        let name = ship.name().to_owned();
        if !was_destroyed {
            self.ships_destroyed += 1;
        }
        if self.is_over() {
            Ok(AttackOutcome::Victory(name))
        } else {
            Ok(AttackOutcome::Sunk(name))
        }
    }

    /// Check whether every ship on the battlefield has been destroyed.
    pub fn is_over(&self) -> bool {
        self.ships_destroyed == self.battlefield.ships_count()
    }

    /// Get the number of attacks resolved so far.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Get the number of ships destroyed so far.
    pub fn ships_destroyed(&self) -> usize {
        self.ships_destroyed
    }

    /// Get the battlefield this game is played on.
    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }
}
