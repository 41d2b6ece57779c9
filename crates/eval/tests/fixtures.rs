use stackbot_core::Grid;
use stackbot_eval::{
    bumpiness, classify_hole, column_profile, count_empty_pillars, eval_bumpiness,
    eval_empty_pillars, eval_height, eval_holes, evaluate, find_holes, placement_height,
    EvalWeights, HoleKind,
};

struct Expected {
    board: &'static str,
    open: usize,
    closed: usize,
    rows: usize,
    height: usize,
    structure_height: usize,
    profile: [usize; 10],
    bumps: usize,
    pillars: usize,
}

const PLACED: [Expected; 3] = [
    Expected {
        board: include_str!("../../../fixtures/placed_1.txt"),
        open: 10,
        closed: 3,
        rows: 7,
        height: 4,
        structure_height: 13,
        profile: [19, 18, 18, 13, 14, 19, 16, 18, 23, 19],
        bumps: 26,
        pillars: 2,
    },
    Expected {
        board: include_str!("../../../fixtures/placed_2.txt"),
        open: 50,
        closed: 14,
        rows: 18,
        height: 20,
        structure_height: 4,
        profile: [9, 4, 4, 6, 4, 5, 5, 5, 2, 2],
        bumps: 13,
        pillars: 1,
    },
    Expected {
        board: include_str!("../../../fixtures/placed_3.txt"),
        open: 0,
        closed: 0,
        rows: 0,
        height: 0,
        structure_height: 19,
        profile: [22, 21, 22, 23, 22, 22, 19, 19, 19, 20],
        bumps: 8,
        pillars: 0,
    },
];

fn board(text: &str) -> Grid {
    let rows: Vec<&str> = text.lines().collect();
    Grid::parse(&rows, 3).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "{} != {}",
        actual,
        expected
    );
}

#[test]
fn test_holes() {
    let w = EvalWeights::default();
    for case in &PLACED {
        let g = board(case.board);
        let holes = find_holes(&g);
        assert_eq!(holes.open.len(), case.open);
        assert_eq!(holes.closed.len(), case.closed);
        assert_eq!(holes.rows, case.rows);
        let expected = case.open as f64 * w.open_hole
            + case.closed as f64 * w.closed_hole
            + case.rows as f64 * w.rows_with_holes;
        assert_close(eval_holes(&g, &w), expected);
    }
}

#[test]
fn test_height() {
    let w = EvalWeights::default();
    for case in &PLACED {
        let g = board(case.board);
        assert_eq!(placement_height(&g), case.height);
        assert_eq!(g.structure_height(), case.structure_height);
        assert_close(eval_height(&g, &w), case.height as f64 * w.height);
    }
}

#[test]
fn test_profile_bumpiness_and_pillars() {
    let w = EvalWeights::default();
    for case in &PLACED {
        let profile = column_profile(&board(case.board));
        assert_eq!(profile.as_slice(), &case.profile);
        assert_eq!(bumpiness(&profile), case.bumps);
        assert_eq!(count_empty_pillars(&profile), case.pillars);
        assert_close(eval_bumpiness(&profile, &w), case.bumps as f64 * w.bumpiness);
        assert_close(
            eval_empty_pillars(&profile, &w),
            case.pillars as f64 * w.empty_pillars,
        );
    }
}

#[test]
fn test_evaluate_is_sum_of_passes() {
    let w = EvalWeights::default();
    for case in &PLACED {
        let g = board(case.board);
        let profile = column_profile(&g);
        let forward = eval_holes(&g, &w)
            + eval_height(&g, &w)
            + eval_empty_pillars(&profile, &w)
            + eval_bumpiness(&profile, &w);
        let backward = eval_bumpiness(&profile, &w)
            + eval_empty_pillars(&profile, &w)
            + eval_height(&g, &w)
            + eval_holes(&g, &w);
        assert_close(evaluate(&g, &w), forward);
        assert_close(evaluate(&g, &w), backward);
    }
}

#[test]
fn test_weights_scale_independently() {
    let g = board(PLACED[0].board);
    let only_height = EvalWeights {
        height: -1.0,
        empty_pillars: 0.0,
        bumpiness: 0.0,
        open_hole: 0.0,
        closed_hole: 0.0,
        rows_with_holes: 0.0,
    };
    assert_close(evaluate(&g, &only_height), -4.0);
}

#[test]
fn test_hole_classification_at_known_cells() {
    let cases: [(&str, &[(usize, usize)], &[(usize, usize)]); 3] = [
        (
            include_str!("../../../fixtures/helper_1.txt"),
            &[(2, 19), (2, 18), (2, 17)],
            &[],
        ),
        (include_str!("../../../fixtures/helper_2.txt"), &[(5, 19)], &[]),
        (
            include_str!("../../../fixtures/helper_3.txt"),
            &[(0, 18), (1, 18), (0, 19), (1, 19), (8, 17), (9, 17)],
            &[(9, 19)],
        ),
    ];
    for (text, open, closed) in cases {
        let g = board(text);
        for &(x, y) in open {
            assert_eq!(classify_hole(&g, x, y), HoleKind::Open, "({}, {})", x, y);
        }
        for &(x, y) in closed {
            assert_eq!(classify_hole(&g, x, y), HoleKind::Closed, "({}, {})", x, y);
        }
    }
}
