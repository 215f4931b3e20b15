use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use crate::grid::{Digit, Grid, Pos};
use crate::validate;

/// Reason reported when the input grid fails validation.
pub const INVALID_PUZZLE: &str = "invalid puzzle";

/// One search event: an assignment of 1..=9, or a retraction when
/// `value == 0`. Recorded in chronological order; the sequence is
/// append-only during search and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub pos: Pos,
    pub value: Digit,
}

impl Step {
    pub fn apply_to(self, grid: &mut Grid) {
        grid.cells[self.pos.idx()] = self.value;
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub grid: Grid,
    pub steps: Vec<Step>,
    pub elapsed: Duration,
}

impl Solution {
    /// Number of main-loop iterations the search took (assignments plus
    /// retractions).
    pub fn step_count(&self) -> usize { self.steps.len() }
}

#[derive(Clone, Debug)]
pub enum SolveOutcome {
    Solved(Solution),
    Invalid { reason: &'static str },
}

impl SolveOutcome {
    pub fn solution(self) -> Option<Solution> {
        match self { SolveOutcome::Solved(s) => Some(s), SolveOutcome::Invalid { .. } => None }
    }
}

/// Solve by iterative backtracking over the free cells.
///
/// The input is validated first; a grid with duplicate givens comes back as
/// `SolveOutcome::Invalid` without any search. Given cells are never
/// written: the cursor walks flat indices 0..=80 in row-major order and
/// skips every position in the fixed mask. Index 81 is the terminal
/// success state.
///
/// An `Err` is only possible through the retreat guard, which is
/// unreachable once the input has passed validation.
pub fn solve(input: &Grid) -> Result<SolveOutcome> {
    if !validate::is_valid(input) {
        return Ok(SolveOutcome::Invalid { reason: INVALID_PUZZLE });
    }

    let started = Instant::now();
    let fixed = input.given_mask();
    let mut working = input.clone();
    let mut steps = Vec::new();

    let mut cur = 0usize;
    if fixed[cur] { cur = advance(&fixed, cur); }

    while cur < 81 {
        let pos = Pos::from_idx(cur);
        match next_candidate(&working, pos) {
            Some(d) => {
                working.cells[cur] = d;
                steps.push(Step { pos, value: d });
                cur = advance(&fixed, cur);
            }
            None => {
                working.cells[cur] = 0;
                steps.push(Step { pos, value: 0 });
                cur = retreat(&fixed, cur)?;
            }
        }
    }

    Ok(SolveOutcome::Solved(Solution { grid: working, steps, elapsed: started.elapsed() }))
}

// Next free index after `cur`, or 81 when none remain.
fn advance(fixed: &[bool; 81], mut cur: usize) -> usize {
    loop {
        cur += 1;
        if cur >= 81 || !fixed[cur] { return cur; }
    }
}

// Previous free index before `cur`. Regressing past the first cell means
// the search state is corrupt; fail loudly rather than hand back a wrong
// grid.
fn retreat(fixed: &[bool; 81], mut cur: usize) -> Result<usize> {
    loop {
        if cur == 0 { bail!("search retreated past the first free cell") }
        cur -= 1;
        if !fixed[cur] { return Ok(cur); }
    }
}

// First digit from max(current, 1) upward that is absent from the cell's
// row, column, and box in the working grid. The cell's own current value
// is among the row values, so a retried cell resumes past it.
fn next_candidate(working: &Grid, pos: Pos) -> Option<Digit> {
    let row = working.row_values(pos.r);
    let col = working.col_values(pos.c);
    let boxv = working.box_values(pos.box_idx());
    let start = working.get(pos).max(1);
    (start..=9).find(|d| !row.contains(d) && !col.contains(d) && !boxv.contains(d))
}
