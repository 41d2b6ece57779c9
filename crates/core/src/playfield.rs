//! A grid plus the one falling piece on it, with the movement primitives.

use crate::{BoardConfig, Cell, Grid, Piece, Rotation};

/// Grid and active piece. (x, y) is the top-left corner of the piece's 5x5
/// local grid.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Playfield {
    grid: Grid,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
    alive: bool,
}

impl Playfield {
    /// Empty board with no live piece.
    pub fn new(config: &BoardConfig) -> Self {
        Self::from_grid(Grid::new(config))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            piece: Piece::I,
            rotation: Rotation::North,
            x: 0,
            y: 0,
            alive: false,
        }
    }

    /// Adopt a grid whose active cells already belong to `piece` at the
    /// given state.
    pub fn with_piece(grid: Grid, piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            grid,
            piece,
            rotation,
            x,
            y,
            alive: true,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn x(&self) -> i8 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i8 {
        self.y
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Column where pieces spawn.
    pub fn spawn_x(&self) -> i8 {
        (self.grid.width() / 2) as i8 - 2
    }

    /// Place `piece` at rotation 0 on the spawn column, top row. Returns
    /// false when the spawn cells overlap settled cells; the piece is
    /// placed regardless.
    pub fn spawn(&mut self, piece: Piece) -> bool {
        self.piece = piece;
        self.rotation = Rotation::North;
        self.x = self.spawn_x();
        self.y = 0;
        self.alive = true;

        let fits = self.fits(self.rotation, 0, 0);
        self.paint(Cell::Active);
        fits
    }

    /// Whether the piece at `rotation`, shifted by (dx, dy), stays on the
    /// grid and only covers empty or active cells.
    fn fits(&self, rotation: Rotation, dx: i8, dy: i8) -> bool {
        self.piece.cells(rotation).iter().all(|&(cx, cy)| {
            let x = (cx + self.x + dx) as i32;
            let y = (cy + self.y + dy) as i32;
            self.grid.cell_at(x, y).is_some_and(Cell::is_free)
        })
    }

    pub fn move_is_legal(&self, dx: i8, dy: i8) -> bool {
        self.fits(self.rotation, dx, dy)
    }

    pub fn rotation_is_legal(&self) -> bool {
        self.fits(self.rotation.cw(), 0, 0)
    }

    fn paint(&mut self, cell: Cell) {
        for (cx, cy) in self.piece.cells(self.rotation) {
            let x = (cx + self.x) as usize;
            let y = (cy + self.y) as usize;
            self.grid.set(x, y, cell);
        }
    }

    /// Shift the piece. An illegal downward move settles it instead.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.move_is_legal(dx, dy) {
            if dy > 0 {
                self.kill();
            }
            return false;
        }
        self.paint(Cell::Empty);
        self.x += dx;
        self.y += dy;
        self.paint(Cell::Active);
        true
    }

    /// Turn clockwise in place. No kicks.
    pub fn rotate(&mut self) -> bool {
        if !self.rotation_is_legal() {
            return false;
        }
        self.paint(Cell::Empty);
        self.rotation = self.rotation.cw();
        self.paint(Cell::Active);
        true
    }

    pub fn hard_drop(&mut self) {
        while self.try_move(0, 1) {}
    }

    /// Turn the active cells into settled cells of the piece's shape.
    pub fn kill(&mut self) {
        self.paint(Cell::Filled(self.piece));
        self.alive = false;
    }

    /// Mark the piece's cells as the lookahead's previous piece.
    pub fn mark_previous(&mut self) {
        self.paint(Cell::Previous);
        self.alive = false;
    }

    pub fn line_clears(&mut self) -> u32 {
        self.grid.clear_full_rows()
    }

    pub fn structure_height(&self) -> usize {
        self.grid.structure_height()
    }

    /// Remove the active piece from the grid without settling it.
    pub fn lift_piece(&mut self) {
        self.grid.clear_active();
        self.rotation = Rotation::North;
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(&BoardConfig::default())
    }

    fn active_cells(field: &Playfield) -> Vec<(usize, usize)> {
        let g = field.grid();
        let mut out = Vec::new();
        for y in 0..g.height() {
            for x in 0..g.width() {
                if g.get(x, y) == Cell::Active {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_spawn_centered() {
        let mut f = field();
        assert!(f.spawn(Piece::I));
        assert_eq!(f.x(), 3);
        assert_eq!(f.y(), 0);
        assert_eq!(active_cells(&f), vec![(4, 2), (5, 2), (6, 2), (7, 2)]);
    }

    #[test]
    fn test_move_left_and_blocked_by_wall() {
        let mut f = field();
        f.spawn(Piece::I);
        assert!(f.try_move(-1, 0));
        assert_eq!(f.x(), 2);
        for _ in 0..3 {
            assert!(f.try_move(-1, 0));
        }
        assert!(!f.try_move(-1, 0));
        assert!(f.is_alive());
        assert_eq!(active_cells(&f), vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_rotate_without_kicks() {
        let mut f = field();
        f.spawn(Piece::I);
        assert!(f.rotate());
        assert_eq!(f.rotation(), Rotation::East);
        assert_eq!(active_cells(&f), vec![(5, 1), (5, 2), (5, 3), (5, 4)]);

        // upright I against the right wall cannot turn flat again
        while f.try_move(1, 0) {}
        assert!(!f.rotate());
        assert_eq!(f.rotation(), Rotation::East);
    }

    #[test]
    fn test_hard_drop_settles() {
        let mut f = field();
        f.spawn(Piece::O);
        f.hard_drop();
        assert!(!f.is_alive());
        let g = f.grid();
        assert_eq!(g.get(5, 22), Cell::Filled(Piece::O));
        assert_eq!(g.get(6, 21), Cell::Filled(Piece::O));
        assert!(active_cells(&f).is_empty());
    }

    #[test]
    fn test_piece_lands_on_stack() {
        let mut f = field();
        f.spawn(Piece::T);
        f.hard_drop();
        f.spawn(Piece::T);
        while f.try_move(0, 1) {}
        assert!(!f.is_alive());
        assert_eq!(f.y(), 18);
        assert_eq!(f.grid().get(4, 20), Cell::Filled(Piece::T));
        assert_eq!(f.grid().get(5, 19), Cell::Filled(Piece::T));
    }

    #[test]
    fn test_sideways_block_keeps_piece_alive() {
        let mut f = field();
        f.spawn(Piece::O);
        while f.try_move(1, 0) {}
        assert!(f.is_alive());
        assert_eq!(f.x(), 6);
    }

    #[test]
    fn test_line_clear_after_settle() {
        let mut g = Grid::new(&BoardConfig::default());
        for x in 0..10 {
            if !(4..8).contains(&x) {
                g.set(x, 22, Cell::Filled(Piece::Z));
            }
        }
        let mut f = Playfield::from_grid(g);
        f.spawn(Piece::I);
        f.hard_drop();
        assert_eq!(f.line_clears(), 1);
        assert_eq!(f.structure_height(), 23);
    }

    #[test]
    fn test_spawn_overlap_reported() {
        let mut g = Grid::new(&BoardConfig::default());
        g.set(5, 2, Cell::Filled(Piece::S));
        let mut f = Playfield::from_grid(g);
        assert!(!f.spawn(Piece::I));
    }
}
