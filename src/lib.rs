pub mod grid;
pub mod replay;
pub mod solver;
pub mod validate;

pub use grid::{Digit, Grid, Pos};
pub use replay::{CancelToken, Playback, ReplayStatus};
pub use solver::{solve, SolveOutcome, Solution, Step};
