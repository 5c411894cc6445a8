//! Randomized restarting search.
//!
//! Each attempt is a greedy random walk from the initial puzzle that refuses
//! to revisit any configuration it has already produced. A walk that runs
//! out of unvisited moves is abandoned and the next attempt starts over.
//! There is no guarantee that the shortest solution is found, or that a
//! solvable puzzle is solved within the attempt budget.

use std::collections::HashSet;

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::error::SolveError;
use crate::puzzle::{Move, Puzzle};

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Number of random walks tried before giving up
    pub max_attempts: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10_000,
        }
    }
}

/// A winning path and the attempt that found it (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub attempts: usize,
}

/// How a single random walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Solved(Vec<Move>),
    /// Every candidate at some step led to a visited configuration, or there
    /// were no legal moves at all. `depth` is the number of moves committed.
    DeadEnd { depth: usize },
}

pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs attempts until one reaches a complete configuration.
    ///
    /// # Errors
    ///
    /// `SolveError::SearchExhausted` once `max_attempts` walks have all
    /// dead-ended.
    pub fn solve<R: Rng>(
        &self,
        puzzle: &Puzzle,
        rng: &mut R,
    ) -> Result<Solution, SolveError> {
        info!(
            "Searching {} tubes with up to {} attempts",
            puzzle.tubes().len(),
            self.config.max_attempts
        );

        for attempt in 1..=self.config.max_attempts {
            match run_attempt(puzzle, rng)? {
                AttemptOutcome::Solved(moves) => {
                    info!(
                        "Solved on attempt {} with {} moves",
                        attempt,
                        moves.len()
                    );
                    return Ok(Solution {
                        moves,
                        attempts: attempt,
                    });
                }
                AttemptOutcome::DeadEnd { depth } => {
                    trace!("Attempt {} dead-ended after {} moves", attempt, depth);
                    if attempt % 1000 == 0 {
                        debug!("{} attempts without a solution", attempt);
                    }
                }
            }
        }

        warn!(
            "Gave up after {} attempts without a solution",
            self.config.max_attempts
        );
        Err(SolveError::SearchExhausted {
            attempts: self.config.max_attempts,
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

/// One random walk from `initial` with its own visited set.
pub fn run_attempt<R: Rng>(
    initial: &Puzzle,
    rng: &mut R,
) -> Result<AttemptOutcome, SolveError> {
    let mut current = initial.clone();
    let mut explored: HashSet<String> = HashSet::new();
    let mut path = Vec::new();

    while !current.is_complete() {
        let mut candidates = current.legal_moves();

        loop {
            if candidates.is_empty() {
                return Ok(AttemptOutcome::DeadEnd { depth: path.len() });
            }

            let index = rng.gen_range(0..candidates.len());
            let movement = candidates[index];
            let next = current.try_move(movement)?;

            // `insert` is false when the key was already there
            if explored.insert(next.canonical_key()) {
                current = next;
                path.push(movement);
                break;
            }
            candidates.swap_remove(index);
        }
    }

    Ok(AttemptOutcome::Solved(path))
}
