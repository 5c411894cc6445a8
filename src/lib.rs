//! Solver for the water sort puzzle: pour colored units between tubes until
//! every tube is empty or holds a single color.

pub mod display;
pub mod error;
pub mod puzzle;
pub mod solver;

pub use error::{PuzzleError, SolveError};
pub use puzzle::{Move, Puzzle, Unit};
pub use solver::{run_attempt, AttemptOutcome, Solution, Solver, SolverConfig};
