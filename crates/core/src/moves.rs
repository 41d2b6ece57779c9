//! Input symbols the engine emits and the game consumes, one per call.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// One clockwise turn.
    Rotation,
    Left,
    Right,
    /// Soft drop by one row.
    Down,
    /// Hard drop and settle.
    Drop,
}

impl Movement {
    /// Symbols for `rotations` turns followed by at most one horizontal and
    /// one downward step.
    pub fn sequence(rotations: usize, dx: i8, dy: i8) -> impl Iterator<Item = Movement> {
        let horizontal = match dx.signum() {
            -1 => Some(Movement::Left),
            1 => Some(Movement::Right),
            _ => None,
        };
        let vertical = (dy > 0).then_some(Movement::Down);
        std::iter::repeat(Movement::Rotation)
            .take(rotations)
            .chain(horizontal)
            .chain(vertical)
    }

    pub fn to_char(self) -> char {
        match self {
            Movement::Rotation => 'r',
            Movement::Left => '<',
            Movement::Right => '>',
            Movement::Down => 'v',
            Movement::Drop => '#',
        }
    }
}
