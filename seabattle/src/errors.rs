//! Errors raised when validating battlefield setup and coordinate queries.

use thiserror::Error;

/// Domain validation failures. Every variant is fatal to the call that
/// raised it; the caller decides whether to abort game setup or prompt for
/// another input.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ValidationError {
    /// The battlefield was constructed with zero rows.
    #[error("battlefield must have a positive number of rows")]
    BattlefieldRows,
    /// The battlefield was constructed with zero cols.
    #[error("battlefield must have a positive number of cols")]
    BattlefieldCols,
    /// The battlefield was constructed with an empty ship list.
    #[error("cannot start a game without any ships")]
    NoShips,
    /// A ship was constructed with a length of zero.
    #[error("a ship must be at least one sector long")]
    ShipLength,
    /// A ship was requested from a cell that holds no ship.
    #[error("no ship was found at this position")]
    InvalidShipPosition,
    /// Placement ran out of attempts before every ship fit on the grid.
    #[error("the ships cannot fit on this battlefield, try a bigger one")]
    SmallBattlefield,
}
