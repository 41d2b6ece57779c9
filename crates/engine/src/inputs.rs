//! Input post-processing for the chosen placement.

use stackbot_core::{Cell, Grid, Movement};

/// Whether the active piece could have arrived by falling straight down:
/// no column holds an active cell underneath a settled or previous one.
pub fn hard_drop_reachable(grid: &Grid) -> bool {
    (0..grid.width()).all(|x| {
        let mut covered = false;
        for y in 0..grid.height() {
            match grid.get(x, y) {
                Cell::Active if covered => return false,
                cell if !cell.is_free() => covered = true,
                _ => {}
            }
        }
        true
    })
}

/// Rewrite `inputs` for a hard drop when the placement allows it: downs
/// vanish, rotations move to the front, horizontal moves keep their order.
/// Tucked placements keep their step-by-step path.
pub fn optimize_inputs(grid: &Grid, inputs: &[Movement]) -> Vec<Movement> {
    if !hard_drop_reachable(grid) {
        return inputs.to_vec();
    }
    let (rotations, shifts): (Vec<Movement>, Vec<Movement>) = inputs
        .iter()
        .filter(|m| **m != Movement::Down)
        .partition(|m| **m == Movement::Rotation);
    rotations.into_iter().chain(shifts).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use Movement::{Down as D, Left as L, Right as R, Rotation as T};

    #[test]
    fn test_open_column_is_reachable() {
        let g = Grid::parse(&["..", "A.", "AJ", "JJ"], 1).unwrap();
        assert!(hard_drop_reachable(&g));
    }

    #[test]
    fn test_tuck_under_overhang() {
        let g = Grid::parse(&["..", "J.", "A.", "AJ"], 1).unwrap();
        assert!(!hard_drop_reachable(&g));
        let g = Grid::parse(&["..", "P.", "A."], 1).unwrap();
        assert!(!hard_drop_reachable(&g));
    }

    #[test]
    fn test_optimize_reorders() {
        let g = Grid::parse(&["..", "A."], 1).unwrap();
        assert_eq!(optimize_inputs(&g, &[D, D, L, T, D, R, T]), vec![T, T, L, R]);
    }

    #[test]
    fn test_optimize_keeps_tuck() {
        let g = Grid::parse(&["J.", "A."], 0).unwrap();
        let raw = [D, L, T, D, L, D];
        assert_eq!(optimize_inputs(&g, &raw), raw.to_vec());
    }
}
