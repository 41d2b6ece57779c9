//! Grid representation - row-major cells, row 0 is the top hidden row.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Piece;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Occupied by the falling piece.
    Active,
    /// Occupied by the piece placed during lookahead.
    Previous,
    /// Settled piece, tagged by its shape.
    Filled(Piece),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Cells a moving piece may enter: empty space or its own cells.
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, Cell::Empty | Cell::Active)
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Active => 'A',
            Cell::Previous => 'P',
            Cell::Filled(piece) => piece.letter(),
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'A' => Some(Cell::Active),
            'P' => Some(Cell::Previous),
            other => Piece::from_letter(other).map(Cell::Filled),
        }
    }
}

/// Board dimensions. `hidden_rows` sit above the visible area so pieces can
/// spawn before they become visible.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub visible_height: usize,
    pub hidden_rows: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 10,
            visible_height: 20,
            hidden_rows: 3,
        }
    }
}

impl BoardConfig {
    #[inline]
    pub fn total_height(&self) -> usize {
        self.visible_height + self.hidden_rows
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    #[error("grid has no rows")]
    Empty,
    #[error("grid rows have no cells")]
    NoColumns,
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown cell {found:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, found: char },
    #[error("grid has {rows} rows, fewer than the {hidden_rows} hidden rows")]
    TooShort { rows: usize, hidden_rows: usize },
}

/// Rectangular cell matrix. Cloning is a deep copy; search branches never
/// alias each other's grids.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    hidden_rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(config: &BoardConfig) -> Self {
        let height = config.total_height();
        Self {
            width: config.width,
            height,
            hidden_rows: config.hidden_rows,
            cells: vec![Cell::Empty; config.width * height],
        }
    }

    /// Parse text rows (`.` empty, `A` active, `P` previous, shape letters
    /// for settled cells). The first `hidden_rows` rows are the hidden area.
    pub fn parse<S: AsRef<str>>(rows: &[S], hidden_rows: usize) -> Result<Self, GridParseError> {
        let first = rows.first().ok_or(GridParseError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GridParseError::NoColumns);
        }
        if rows.len() < hidden_rows {
            return Err(GridParseError::TooShort {
                rows: rows.len(),
                hidden_rows,
            });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GridParseError::Ragged {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(GridParseError::UnknownCell {
                    row: y,
                    col: x,
                    found: c,
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            hidden_rows,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total rows, hidden ones included.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
    }

    /// Bounds-checked lookup for signed coordinates.
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(self.get(x as usize, y as usize))
        }
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Remove every row with no empty and no active cell, inserting empty
    /// rows at the top. Returns the number removed.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut kept: Vec<Cell> = Vec::with_capacity(self.cells.len());
        let mut cleared = 0u32;
        for row in self.cells.chunks(self.width) {
            if row.iter().any(|c| c.is_free()) {
                kept.extend_from_slice(row);
            } else {
                cleared += 1;
            }
        }
        if cleared > 0 {
            let mut cells = vec![Cell::Empty; cleared as usize * self.width];
            cells.extend(kept);
            self.cells = cells;
        }
        cleared
    }

    /// Replace every active cell with empty space.
    pub fn clear_active(&mut self) {
        for cell in &mut self.cells {
            if *cell == Cell::Active {
                *cell = Cell::Empty;
            }
        }
    }

    /// Index of the first row from the top holding a settled or previous
    /// cell; `height()` when there is none.
    pub fn structure_height(&self) -> usize {
        self.rows()
            .position(|row| row.iter().any(|c| !c.is_free()))
            .unwrap_or(self.height)
    }

    /// Whether any settled cell sits inside the hidden rows.
    pub fn hidden_rows_occupied(&self) -> bool {
        self.rows()
            .take(self.hidden_rows)
            .any(|row| row.iter().any(|c| !c.is_free()))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
