//! Stackbot eval crate - heuristics for board evaluation.
//!
//! Every pass adds to a running score and can be called on its own;
//! `evaluate` is their sum.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stackbot_core::{Cell, Grid};

/// Top-based index of the first occupied cell per column.
pub type ColumnProfile = SmallVec<[usize; 16]>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub height: f64,
    pub empty_pillars: f64,
    pub bumpiness: f64,
    pub open_hole: f64,
    pub closed_hole: f64,
    pub rows_with_holes: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            height: -0.25,
            empty_pillars: -1.0,
            bumpiness: -0.1,
            open_hole: -0.4,
            closed_hole: -1.2,
            rows_with_holes: -0.4,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoleKind {
    /// Reachable from the side by a sliding piece.
    Open,
    /// Walled in on both sides.
    Closed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Holes {
    pub open: Vec<(usize, usize)>,
    pub closed: Vec<(usize, usize)>,
    /// Distinct rows containing at least one hole.
    pub rows: usize,
}

/// Closed when both horizontal neighbours are occupied; a wall counts as
/// occupied.
pub fn classify_hole(grid: &Grid, x: usize, y: usize) -> HoleKind {
    let occupied = |nx: i32| grid.cell_at(nx, y as i32).map_or(true, |cell| !cell.is_empty());
    if occupied(x as i32 - 1) && occupied(x as i32 + 1) {
        HoleKind::Closed
    } else {
        HoleKind::Open
    }
}

/// Every empty cell below the first occupied cell of its column.
pub fn find_holes(grid: &Grid) -> Holes {
    let mut holes = Holes::default();
    let mut rows = vec![false; grid.height()];
    for x in 0..grid.width() {
        let mut covered = false;
        for y in 0..grid.height() {
            if !grid.get(x, y).is_empty() {
                covered = true;
            } else if covered {
                match classify_hole(grid, x, y) {
                    HoleKind::Open => holes.open.push((x, y)),
                    HoleKind::Closed => holes.closed.push((x, y)),
                }
                rows[y] = true;
            }
        }
    }
    holes.rows = rows.iter().filter(|r| **r).count();
    holes
}

pub fn eval_holes(grid: &Grid, weights: &EvalWeights) -> f64 {
    let holes = find_holes(grid);
    holes.open.len() as f64 * weights.open_hole
        + holes.closed.len() as f64 * weights.closed_hole
        + holes.rows as f64 * weights.rows_with_holes
}

/// Bottom-based index of the highest row holding a piece placed during the
/// decision (active or previous cells). 0 when there is none.
pub fn placement_height(grid: &Grid) -> usize {
    grid.rows()
        .position(|row| row.iter().any(|c| matches!(c, Cell::Active | Cell::Previous)))
        .map_or(0, |y| grid.height() - 1 - y)
}

pub fn eval_height(grid: &Grid, weights: &EvalWeights) -> f64 {
    placement_height(grid) as f64 * weights.height
}

/// Per column, the row of its first occupied cell; the grid height for an
/// empty column.
pub fn column_profile(grid: &Grid) -> ColumnProfile {
    (0..grid.width())
        .map(|x| {
            (0..grid.height())
                .find(|&y| !grid.get(x, y).is_empty())
                .unwrap_or(grid.height())
        })
        .collect()
}

/// Columns sunk at least three rows below both neighbours. Edge columns
/// compare against their only neighbour.
pub fn count_empty_pillars(profile: &[usize]) -> usize {
    let n = profile.len();
    if n < 2 {
        return 0;
    }
    (0..n)
        .filter(|&i| {
            let reference = match i {
                0 => profile[1],
                i if i == n - 1 => profile[n - 2],
                i => profile[i - 1].max(profile[i + 1]),
            };
            profile[i] as i64 - reference as i64 >= 3
        })
        .count()
}

pub fn eval_empty_pillars(profile: &[usize], weights: &EvalWeights) -> f64 {
    count_empty_pillars(profile) as f64 * weights.empty_pillars
}

/// Sum of absolute differences between neighbouring columns.
pub fn bumpiness(profile: &[usize]) -> usize {
    profile.windows(2).map(|w| w[0].abs_diff(w[1])).sum()
}

pub fn eval_bumpiness(profile: &[usize], weights: &EvalWeights) -> f64 {
    bumpiness(profile) as f64 * weights.bumpiness
}

/// Full evaluation: holes, height, empty pillars and bumpiness.
pub fn evaluate(grid: &Grid, weights: &EvalWeights) -> f64 {
    let profile = column_profile(grid);
    eval_holes(grid, weights)
        + eval_height(grid, weights)
        + eval_empty_pillars(&profile, weights)
        + eval_bumpiness(&profile, weights)
}
