use pretty_assertions::assert_eq;
use stepku::{replay, solve, validate, Grid, Pos, SolveOutcome};

const EASY: &str = "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

fn groups_complete(g: &Grid) -> bool {
    let full = |vals: [u8; 9]| {
        let mut seen = [false; 10];
        for v in vals { if v == 0 || seen[v as usize] { return false; } seen[v as usize] = true; }
        true
    };
    (0..9).all(|i| full(g.row_values(i)) && full(g.col_values(i)) && full(g.box_values(i)))
}

#[test]
fn parse_and_format() {
    let g = Grid::from_compact(EASY).unwrap();
    assert_eq!(g.to_compact(), EASY);
}

#[test]
fn rejects_malformed_compact() {
    assert!(Grid::from_compact("123").is_err());
    assert!(Grid::from_compact(&"x".repeat(81)).is_err());
}

#[test]
fn validator_accepts_consistent_grid() {
    let g = Grid::from_compact(EASY).unwrap();
    assert!(validate::is_valid(&g));
    assert!(validate::is_valid(&Grid::empty()));
}

#[test]
fn validator_rejects_row_duplicate() {
    let mut g = Grid::empty();
    g.set(Pos { r: 0, c: 0 }, 5).unwrap();
    g.set(Pos { r: 0, c: 1 }, 5).unwrap();
    assert!(!validate::is_valid(&g));

    let mask = validate::conflict_mask(&g);
    assert!(mask[0][0] && mask[0][1]);
    assert!(!mask[1][0]);
}

#[test]
fn validator_rejects_column_and_box_duplicates() {
    let mut g = Grid::empty();
    g.set(Pos { r: 0, c: 4 }, 3).unwrap();
    g.set(Pos { r: 8, c: 4 }, 3).unwrap();
    assert!(!validate::is_valid(&g));

    let mut g = Grid::empty();
    g.set(Pos { r: 0, c: 0 }, 7).unwrap();
    g.set(Pos { r: 2, c: 2 }, 7).unwrap();
    assert!(!validate::is_valid(&g));
}

#[test]
fn cell_edit_boundary() {
    let mut g = Grid::empty();
    assert!(g.set(Pos { r: 4, c: 4 }, 10).is_err());
    assert_eq!(g, Grid::empty());

    g.set(Pos { r: 4, c: 4 }, 9).unwrap();
    assert_eq!(g.get(Pos { r: 4, c: 4 }), 9);
    g.set(Pos { r: 4, c: 4 }, 0).unwrap();
    assert_eq!(g, Grid::empty());
}

#[test]
fn solves_easy_puzzle_and_preserves_givens() {
    let input = Grid::from_compact(EASY).unwrap();
    let solution = solve(&input).unwrap().solution().expect("solvable");

    assert!(solution.grid.is_filled());
    assert!(groups_complete(&solution.grid));
    assert!(solution.step_count() > 0);

    for p in Grid::iterate_cells() {
        if input.get(p) != 0 {
            assert_eq!(solution.grid.get(p), input.get(p), "given at {p:?} changed");
        }
    }
}

#[test]
fn solves_hard_demo_puzzle() {
    // Sparse 20-given board; forces heavy backtracking.
    let input = Grid::from_rows([
        [0, 0, 0, 1, 0, 2, 0, 0, 0],
        [0, 6, 0, 0, 0, 0, 0, 7, 0],
        [0, 0, 8, 0, 0, 0, 9, 0, 0],
        [4, 0, 0, 0, 0, 0, 0, 0, 3],
        [0, 5, 0, 0, 0, 7, 0, 0, 0],
        [2, 0, 0, 0, 8, 0, 0, 0, 1],
        [0, 0, 9, 0, 0, 0, 8, 0, 5],
        [0, 7, 0, 0, 0, 0, 0, 6, 0],
        [0, 0, 0, 3, 0, 4, 0, 0, 0],
    ])
    .unwrap();

    let solution = solve(&input).unwrap().solution().expect("solvable");
    assert!(groups_complete(&solution.grid));
    assert!(solution.step_count() > 0);
}

#[test]
fn solves_empty_grid_in_scan_order() {
    let solution = solve(&Grid::empty()).unwrap().solution().expect("solvable");
    assert!(groups_complete(&solution.grid));
    // Nothing constrains the first row, so the left-to-right 1..9 scan
    // fills it in order.
    assert_eq!(solution.grid.row_values(0), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn invalid_puzzle_is_not_searched() {
    let mut g = Grid::empty();
    g.set(Pos { r: 0, c: 0 }, 5).unwrap();
    g.set(Pos { r: 0, c: 1 }, 5).unwrap();

    match solve(&g).unwrap() {
        SolveOutcome::Invalid { reason } => assert_eq!(reason, stepku::solver::INVALID_PUZZLE),
        SolveOutcome::Solved(_) => panic!("duplicate givens must not solve"),
    }
}

#[test]
fn resolving_a_solution_takes_zero_steps() {
    let input = Grid::from_compact(EASY).unwrap();
    let first = solve(&input).unwrap().solution().unwrap();
    let again = solve(&first.grid).unwrap().solution().expect("solved grid is valid input");

    assert_eq!(again.step_count(), 0);
    assert_eq!(again.grid, first.grid);
}

#[test]
fn replaying_all_steps_reproduces_the_solution() {
    let input = Grid::from_compact(EASY).unwrap();
    let solution = solve(&input).unwrap().solution().unwrap();
    assert_eq!(replay::apply_all(&input, &solution.steps), solution.grid);
}
