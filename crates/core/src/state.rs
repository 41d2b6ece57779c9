//! Game session: playfield, piece queue, hold slot, score and bag.

use log::debug;

use crate::{BoardConfig, Movement, Piece, Playfield, SevenBag};

/// Points for clearing 0..=4 rows with one piece.
pub const LINE_CLEAR_POINTS: [u64; 5] = [0, 40, 100, 300, 1200];

#[derive(Clone, Debug)]
pub struct Game {
    field: Playfield,
    current: Piece,
    next: Piece,
    held: Option<Piece>,
    hold_used: bool,
    score: u64,
    lines: u32,
    over: bool,
    bag: SevenBag,
}

impl Game {
    /// New session. Current and next are drawn from the bag; nothing is on
    /// the board until `start`.
    pub fn new(config: &BoardConfig, mut bag: SevenBag) -> Self {
        let current = bag.next_piece();
        let next = bag.next_piece();
        Self {
            field: Playfield::new(config),
            current,
            next,
            held: None,
            hold_used: false,
            score: 0,
            lines: 0,
            over: false,
            bag,
        }
    }

    /// Session over an existing playfield, for replaying positions.
    pub fn from_parts(field: Playfield, next: Piece, held: Option<Piece>, bag: SevenBag) -> Self {
        Self {
            current: field.piece(),
            field,
            next,
            held,
            hold_used: false,
            score: 0,
            lines: 0,
            over: false,
            bag,
        }
    }

    /// Spawn the current piece without advancing the queue.
    pub fn start(&mut self) {
        self.make_piece(true);
    }

    #[inline]
    pub fn field(&self) -> &Playfield {
        &self.field
    }

    #[inline]
    pub fn current(&self) -> Piece {
        self.current
    }

    #[inline]
    pub fn next(&self) -> Piece {
        self.next
    }

    #[inline]
    pub fn held(&self) -> Option<Piece> {
        self.held
    }

    /// Hold is allowed once per piece life.
    #[inline]
    pub fn can_hold(&self) -> bool {
        !self.hold_used
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn lines(&self) -> u32 {
        self.lines
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[inline]
    pub fn piece_alive(&self) -> bool {
        self.field.is_alive()
    }

    /// Spawn the current piece. Unless `swapping`, the queue advances first:
    /// next becomes current and a new next is drawn from the bag.
    pub fn make_piece(&mut self, swapping: bool) {
        if !swapping {
            self.current = self.next;
            self.next = self.bag.next_piece();
        }
        if !self.field.spawn(self.current) {
            debug!("spawn of {:?} overlaps the stack", self.current);
            self.over = true;
        }
    }

    /// Swap the current piece into the hold slot. With an empty slot the
    /// queue advances; otherwise the held piece comes back without a draw.
    pub fn hold_piece(&mut self) -> bool {
        if self.hold_used || !self.field.is_alive() {
            return false;
        }
        self.field.lift_piece();
        self.hold_used = true;

        match self.held.replace(self.current) {
            None => self.make_piece(false),
            Some(held) => {
                self.current = held;
                self.make_piece(true);
            }
        }
        true
    }

    /// Apply one input symbol to the live piece.
    pub fn apply(&mut self, movement: Movement) -> bool {
        if !self.field.is_alive() {
            return false;
        }
        let applied = match movement {
            Movement::Rotation => self.field.rotate(),
            Movement::Left => self.field.try_move(-1, 0),
            Movement::Right => self.field.try_move(1, 0),
            Movement::Down => self.field.try_move(0, 1),
            Movement::Drop => {
                self.field.hard_drop();
                true
            }
        };
        if !self.field.is_alive() {
            self.on_settle();
        }
        applied
    }

    fn on_settle(&mut self) {
        self.hold_used = false;
        if self.field.grid().hidden_rows_occupied() {
            debug!("stack reached the hidden rows");
            self.over = true;
        }
    }

    /// Clear full rows and score them. Returns the number cleared.
    pub fn line_clears(&mut self) -> u32 {
        let cleared = self.field.line_clears();
        let points = LINE_CLEAR_POINTS
            .get(cleared as usize)
            .copied()
            .unwrap_or(LINE_CLEAR_POINTS[4]);
        self.score += points;
        self.lines += cleared;
        cleared
    }

    /// Empty the board and start over with fresh pieces from the same bag.
    pub fn reset(&mut self) {
        let config = BoardConfig {
            width: self.field.grid().width(),
            visible_height: self.field.grid().height() - self.field.grid().hidden_rows(),
            hidden_rows: self.field.grid().hidden_rows(),
        };
        self.field = Playfield::new(&config);
        self.current = self.bag.next_piece();
        self.next = self.bag.next_piece();
        self.held = None;
        self.hold_used = false;
        self.score = 0;
        self.lines = 0;
        self.over = false;
    }
}
