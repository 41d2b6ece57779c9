//! Stackbot core crate - grid, pieces, movement primitives and the game session.

mod bag;
mod board;
mod moves;
mod piece;
mod playfield;
mod state;

pub use bag::SevenBag;
pub use board::{BoardConfig, Cell, Grid, GridParseError};
pub use moves::Movement;
pub use piece::{Piece, Rotation};
pub use playfield::Playfield;
pub use state::{Game, LINE_CLEAR_POINTS};
