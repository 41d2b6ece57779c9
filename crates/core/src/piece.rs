//! Piece types and mino definitions for the seven tetrominoes.

use serde::{Deserialize, Serialize};

/// Shape identity. Declaration order is the shape index used by the bag
/// and by fixtures: S, Z, I, O, J, L, T.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Spawn-state offsets on the 5x5 local grid, (x, y) with y growing downwards.
const SPAWN_CELLS: [[(i8, i8); 4]; 7] = [
    [(2, 1), (3, 1), (1, 2), (2, 2)], // S
    [(1, 1), (2, 1), (2, 2), (3, 2)], // Z
    [(1, 2), (2, 2), (3, 2), (4, 2)], // I
    [(2, 1), (3, 1), (2, 2), (3, 2)], // O
    [(1, 1), (1, 2), (2, 2), (3, 2)], // J
    [(3, 1), (1, 2), (2, 2), (3, 2)], // L
    [(2, 1), (1, 2), (2, 2), (3, 2)], // T
];

/// Every rotation state of every piece, built at compile time by turning the
/// spawn state clockwise about local cell (2, 2).
const SHAPES: [[[(i8, i8); 4]; 4]; 7] = {
    let mut table = [[[(0i8, 0i8); 4]; 4]; 7];
    let mut piece = 0;
    while piece < 7 {
        table[piece][0] = SPAWN_CELLS[piece];
        let mut rot = 1;
        while rot < 4 {
            let mut i = 0;
            while i < 4 {
                let (x, y) = table[piece][rot - 1][i];
                table[piece][rot][i] = (4 - y, x);
                i += 1;
            }
            rot += 1;
        }
        piece += 1;
    }
    table
};

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::S,
        Piece::Z,
        Piece::I,
        Piece::O,
        Piece::J,
        Piece::L,
        Piece::T,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Piece> {
        Self::ALL.get(index).copied()
    }

    /// Mino offsets on the 5x5 local grid for the given rotation state.
    #[inline]
    pub fn cells(self, rot: Rotation) -> [(i8, i8); 4] {
        SHAPES[self.index()][rot.index()]
    }

    pub fn color(self) -> &'static str {
        match self {
            Piece::S => "green",
            Piece::Z => "red",
            Piece::I => "cyan",
            Piece::O => "yellow",
            Piece::J => "blue",
            Piece::L => "orange",
            Piece::T => "purple",
        }
    }

    pub fn letter(self) -> char {
        match self {
            Piece::S => 'S',
            Piece::Z => 'Z',
            Piece::I => 'I',
            Piece::O => 'O',
            Piece::J => 'J',
            Piece::L => 'L',
            Piece::T => 'T',
        }
    }

    pub fn from_letter(c: char) -> Option<Piece> {
        Self::ALL.into_iter().find(|p| p.letter() == c)
    }
}
