//! Single player implementation of the classic game Battleship: a fleet is
//! placed at random on a rectangular grid and attacked one coordinate at a
//! time until every ship is destroyed.
//!
//! [`battlefield::Battlefield`] owns the grid and the placement algorithm,
//! [`ship::Ship`] tracks per-ship damage, and [`game::Game`] drives the
//! attack flow on behalf of a front end.

pub mod battlefield;
pub mod errors;
pub mod game;
pub mod ship;
