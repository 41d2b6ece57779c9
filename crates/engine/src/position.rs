//! Search states and the candidates handed to the selector.

use smallvec::SmallVec;
use stackbot_core::{Grid, Movement, Piece, Playfield, Rotation};

/// Input path of a search state. Most paths fit inline.
pub type InputPath = SmallVec<[Movement; 24]>;

/// Identity of a search state.
pub type StateKey = (Rotation, i8, i8);

/// A reachable piece state: the playfield snapshot with the piece painted
/// active at (rotation, x, y), and the inputs that lead there.
#[derive(Clone, Debug)]
pub struct Placement {
    pub field: Playfield,
    pub inputs: InputPath,
}

impl Placement {
    pub fn new(field: Playfield, inputs: InputPath) -> Self {
        Self { field, inputs }
    }

    #[inline]
    pub fn key(&self) -> StateKey {
        (self.field.rotation(), self.field.x(), self.field.y())
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.field.grid()
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.field.piece()
    }
}

/// A resting placement as a decision candidate.
#[derive(Clone, Debug)]
pub struct Position {
    pub placement: Placement,
    pub score: f64,
    pub uses_hold: bool,
    /// Piece being placed.
    pub current: Piece,
    /// Piece that follows it.
    pub next: Piece,
}

impl Position {
    pub fn new(placement: Placement, current: Piece, next: Piece, uses_hold: bool) -> Self {
        Self {
            placement,
            score: 0.0,
            uses_hold,
            current,
            next,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.placement.grid()
    }

    #[inline]
    pub fn inputs(&self) -> &[Movement] {
        &self.placement.inputs
    }

    /// The board after this placement: piece cells marked previous, full
    /// rows cleared, no live piece.
    pub fn settle(&self) -> Playfield {
        let mut field = self.placement.field.clone();
        field.mark_previous();
        field.line_clears();
        field
    }
}
