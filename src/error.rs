use thiserror::Error;

use crate::puzzle::{Move, Unit};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Illegal move {0}")]
    InvalidMove(Move),
    #[error("Tube capacity must be at least one")]
    ZeroCapacity,
    #[error("A puzzle needs at least one tube")]
    EmptyPuzzle,
    #[error("Tube {tube} holds {len} units but the capacity is {capacity}")]
    Overfull {
        tube: usize,
        len: usize,
        capacity: usize,
    },
    #[error("Color {unit:?} appears {count} times, expected {capacity}")]
    UnbalancedColor {
        unit: Unit,
        count: usize,
        capacity: usize,
    },
    #[error("Unknown unit code {code:?} on line {line}")]
    UnknownUnit { line: usize, code: char },
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("No solution found in {attempts} attempts")]
    SearchExhausted { attempts: usize },
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
