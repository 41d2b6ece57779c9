//! Reachable placement search for the live piece.

use log::{debug, trace};
use rustc_hash::FxHashMap;
use stackbot_core::{Grid, Movement, Piece, Playfield};

use crate::error::SearchError;
use crate::position::{InputPath, Placement, Position, StateKey};

/// Sub-moves tried after every rotation count: stay, left, right, down.
const MICRO_MOVES: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, 1)];

/// Rows kept between the fast-dropped piece and the stack. The tallest
/// shape spans four rows of its 5x5 box.
const DROP_MARGIN: i32 = 5;

/// Every resting placement of the live piece on `field`, each with the
/// shortest input path found, in discovery order.
pub fn generate_positions(
    field: &Playfield,
    current: Piece,
    next: Piece,
    uses_hold: bool,
) -> Result<Vec<Position>, SearchError> {
    if !field.is_alive() {
        return Err(SearchError::NoLivePiece);
    }
    let start = fast_drop(field);
    let placements = find_placements(start);
    if placements.is_empty() {
        return Err(SearchError::NoPlacements { piece: current });
    }
    debug!(
        "{:?}: {} placements (hold: {})",
        current,
        placements.len(),
        uses_hold
    );
    Ok(placements
        .into_iter()
        .map(|placement| Position::new(placement, current, next, uses_hold))
        .collect())
}

/// Move the piece straight down while it is well clear of the stack.
pub fn fast_drop(field: &Playfield) -> Placement {
    let mut field = field.clone();
    let mut inputs = InputPath::new();
    let limit = field.structure_height() as i32 - DROP_MARGIN;
    while (field.y() as i32) < limit {
        if !field.try_move(0, 1) {
            break;
        }
        inputs.push(Movement::Down);
    }
    Placement::new(field, inputs)
}

/// Layered breadth-first search from `start`. States live in an arena; the
/// visited map points into it so a shorter path found later can replace the
/// stored one.
pub fn find_placements(start: Placement) -> Vec<Placement> {
    let mut arena: Vec<Placement> = vec![start];
    let mut visited: FxHashMap<StateKey, usize> = FxHashMap::default();
    visited.insert(arena[0].key(), 0);

    let mut terminals: Vec<Placement> = Vec::new();
    let mut terminal_by_grid: FxHashMap<Grid, usize> = FxHashMap::default();

    let mut frontier = vec![0usize];
    let mut layer = 0usize;
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();

        for &index in &frontier {
            let base = arena[index].inputs.clone();
            let mut field = arena[index].field.clone();

            if !field.move_is_legal(0, 1) {
                record_terminal(&mut terminals, &mut terminal_by_grid, &field, &base);
            }

            for rotations in 0..4 {
                if rotations > 0 && !field.rotate() {
                    break;
                }
                for (dx, dy) in MICRO_MOVES {
                    let key = (field.rotation(), field.x() + dx, field.y() + dy);
                    let steps = (dx.unsigned_abs() + dy.unsigned_abs()) as usize;
                    let cost = base.len() + rotations + steps;

                    if let Some(&known) = visited.get(&key) {
                        if cost < arena[known].inputs.len() {
                            arena[known].inputs = extend_path(&base, rotations, dx, dy);
                        }
                        continue;
                    }

                    let moved = (dx, dy) != (0, 0);
                    if moved && !field.move_is_legal(dx, dy) {
                        continue;
                    }
                    let mut branch = field.clone();
                    if moved {
                        branch.try_move(dx, dy);
                    }

                    let state = Placement::new(branch, extend_path(&base, rotations, dx, dy));
                    visited.insert(key, arena.len());
                    next_frontier.push(arena.len());
                    arena.push(state);
                }
            }
        }

        trace!("layer {}: {} new states", layer, next_frontier.len());
        frontier = next_frontier;
        layer += 1;
    }

    debug!(
        "search visited {} states, {} terminal",
        arena.len(),
        terminals.len()
    );
    terminals
}

fn extend_path(base: &InputPath, rotations: usize, dx: i8, dy: i8) -> InputPath {
    let mut path = base.clone();
    path.extend(Movement::sequence(rotations, dx, dy));
    path
}

/// Keep one placement per resulting grid; a strictly shorter path replaces
/// the stored one.
fn record_terminal(
    terminals: &mut Vec<Placement>,
    by_grid: &mut FxHashMap<Grid, usize>,
    field: &Playfield,
    inputs: &InputPath,
) {
    if let Some(&existing) = by_grid.get(field.grid()) {
        if inputs.len() < terminals[existing].inputs.len() {
            terminals[existing].inputs = inputs.clone();
        }
        return;
    }
    by_grid.insert(field.grid().clone(), terminals.len());
    terminals.push(Placement::new(field.clone(), inputs.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackbot_core::{BoardConfig, Rotation};

    fn spawned(piece: Piece) -> Playfield {
        let mut field = Playfield::new(&BoardConfig::default());
        field.spawn(piece);
        field
    }

    #[test]
    fn test_settled_field_is_rejected() {
        let mut field = spawned(Piece::T);
        field.hard_drop();
        let before = field.grid().clone();
        assert_eq!(
            generate_positions(&field, Piece::T, Piece::I, false).unwrap_err(),
            SearchError::NoLivePiece
        );
        assert_eq!(field.grid(), &before);
    }

    #[test]
    fn test_shorter_terminal_path_replaces_longer() {
        let field = spawned(Piece::O);
        let mut terminals = Vec::new();
        let mut by_grid = FxHashMap::default();
        let path = |n: usize| -> InputPath {
            std::iter::repeat(Movement::Left).take(n).collect()
        };

        record_terminal(&mut terminals, &mut by_grid, &field, &path(3));
        record_terminal(&mut terminals, &mut by_grid, &field, &path(1));
        assert_eq!(terminals.len(), 1);
        assert_eq!(terminals[0].inputs.len(), 1);

        record_terminal(&mut terminals, &mut by_grid, &field, &path(2));
        assert_eq!(terminals.len(), 1);
        assert_eq!(terminals[0].inputs.len(), 1);
    }

    #[test]
    fn test_fast_drop_empty_board() {
        let start = fast_drop(&spawned(Piece::T));
        assert_eq!(start.field.y(), 18);
        assert_eq!(start.inputs.len(), 18);
        assert!(start.inputs.iter().all(|m| *m == Movement::Down));
    }

    #[test]
    fn test_generate_positions_empty_board() {
        let positions = generate_positions(&spawned(Piece::T), Piece::T, Piece::I, false).unwrap();
        assert_eq!(positions.len(), 34);
        assert!(positions.iter().all(|p| !p.uses_hold && p.next == Piece::I));
    }

    #[test]
    fn test_all_rotations_present() {
        let positions = generate_positions(&spawned(Piece::T), Piece::T, Piece::T, false).unwrap();
        for rotation in Rotation::ALL {
            assert!(positions
                .iter()
                .any(|p| p.placement.field.rotation() == rotation));
        }
    }

    #[test]
    fn test_terminals_rest_on_something() {
        let positions = generate_positions(&spawned(Piece::L), Piece::L, Piece::O, true).unwrap();
        for p in &positions {
            assert!(!p.placement.field.move_is_legal(0, 1));
            assert!(p.uses_hold);
        }
    }

    #[test]
    fn test_o_piece_grids_are_distinct() {
        let positions = generate_positions(&spawned(Piece::O), Piece::O, Piece::O, false).unwrap();
        assert_eq!(positions.len(), 9);
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert_ne!(a.grid(), b.grid());
            }
        }
    }
}
