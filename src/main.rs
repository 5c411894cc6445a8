use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use env_logger::TimestampPrecision;
use log::{info, LevelFilter};
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use thiserror::Error;

use water_sort_solver::{
    display, Puzzle, PuzzleError, Solution, SolveError, Solver, SolverConfig,
};

#[derive(Parser)]
#[command(name = "water-sort")]
#[command(about = "Finds a sequence of pours that sorts every tube to a single color")]
#[command(version)]
struct Cli {
    /// Puzzle file, one tube per line from the bottom up (built-in puzzle if omitted)
    #[arg(long, value_name = "FILE")]
    puzzle: Option<PathBuf>,

    /// Units each tube holds when reading a puzzle file
    #[arg(long, default_value_t = Puzzle::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Random walks to try before giving up. Each walk is cheap but most
    /// dead-end, so larger puzzles such as the built-in one may need
    /// several hundred thousand
    #[arg(long, default_value_t = SolverConfig::default().max_attempts)]
    attempts: usize,

    /// Seed the random source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Replay the solution without waiting for Enter between moves
    #[arg(long)]
    no_pause: bool,

    /// Log verbosity: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read puzzle file {path:?}: {source}")]
    ReadPuzzle { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the puzzle was solved.
fn run(cli: &Cli) -> Result<bool, CliError> {
    let puzzle = match &cli.puzzle {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::ReadPuzzle {
                path: path.clone(),
                source,
            })?;
            Puzzle::parse(&text, cli.capacity)?
        }
        None => Puzzle::sample(),
    };

    let mut stdout = io::stdout();
    display::render(&puzzle, &mut stdout)?;
    pause(cli.no_pause)?;

    let solver = Solver::new(SolverConfig {
        max_attempts: cli.attempts,
    });
    let result = match cli.seed {
        Some(seed) => solver.solve(&puzzle, &mut StdRng::seed_from_u64(seed)),
        None => solver.solve(&puzzle, &mut thread_rng()),
    };

    let solution = match result {
        Ok(solution) => solution,
        Err(SolveError::SearchExhausted { attempts }) => {
            println!("Couldn't solve in {attempts} attempts, try a larger --attempts");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    replay(&puzzle, &solution, cli.no_pause, &mut stdout)?;
    Ok(true)
}

fn replay<W: Write>(
    puzzle: &Puzzle,
    solution: &Solution,
    no_pause: bool,
    out: &mut W,
) -> Result<(), CliError> {
    info!(
        "Replaying {} moves found on attempt {}",
        solution.moves.len(),
        solution.attempts
    );

    let states = puzzle.replay(&solution.moves)?;
    if states.is_empty() {
        writeln!(out, "Complete!")?;
        return Ok(());
    }

    for (movement, state) in solution.moves.iter().zip(&states) {
        display::clear(out)?;
        display::render(state, out)?;
        writeln!(out, "{movement}")?;

        if state.is_complete() {
            writeln!(out, "Complete!")?;
            break;
        }

        pause(no_pause)?;
    }

    Ok(())
}

fn pause(no_pause: bool) -> io::Result<()> {
    if !no_pause {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
    }
    Ok(())
}
