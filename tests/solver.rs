use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use water_sort_solver::{
    Move, Puzzle, PuzzleError, SolveError, Solver, SolverConfig,
    Unit::{self, Blue as B, Green as C, Red as A},
};

fn assert_conserved(initial: &Puzzle, state: &Puzzle) {
    for unit in Unit::PALETTE {
        assert_eq!(state.count_of(unit), initial.count_of(unit), "{unit:?}");
    }
    assert!(state
        .tubes()
        .iter()
        .all(|tube| tube.len() <= state.capacity()));
}

#[test_log::test]
fn full_mismatched_tubes_are_unsolvable() {
    let puzzle = Puzzle::new(2, vec![vec![A, B], vec![B, A]]).unwrap();
    assert!(puzzle.legal_moves().is_empty());

    let mut rng = StdRng::seed_from_u64(1);
    match Solver::default().solve(&puzzle, &mut rng) {
        Err(SolveError::SearchExhausted { attempts }) => assert_eq!(attempts, 10_000),
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test_log::test]
fn already_sorted_returns_empty_path() {
    let puzzle = Puzzle::new(2, vec![vec![A, A], vec![]]).unwrap();
    assert!(puzzle.legal_moves().is_empty());
    assert!(puzzle.is_complete());

    let mut rng = StdRng::seed_from_u64(1);
    let solution = Solver::default().solve(&puzzle, &mut rng).unwrap();
    assert!(solution.moves.is_empty());
    assert_eq!(solution.attempts, 1);
}

#[test_log::test]
fn small_puzzle_is_solved_first_try() {
    // Every walk from here is forced into a three move solution
    let puzzle = Puzzle::new(2, vec![vec![A, B], vec![B, A], vec![]]).unwrap();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let solution = Solver::default().solve(&puzzle, &mut rng).unwrap();
        assert_eq!(solution.attempts, 1);
        assert!(solution.moves.len() <= 4);

        let states = puzzle.replay(&solution.moves).unwrap();
        assert_eq!(states.len(), solution.moves.len());
        for state in &states {
            assert_conserved(&puzzle, state);
        }
        assert!(states.last().unwrap().is_complete());
    }
}

fn three_color_puzzle() -> Puzzle {
    Puzzle::parse(
        "
        # three colors, two spare tubes
        RBGR
        GBRB
        BGRG
        -
        -
        ",
        4,
    )
    .unwrap()
}

#[test_log::test]
fn found_paths_replay_to_completion() {
    let puzzle = three_color_puzzle();
    let solver = Solver::new(SolverConfig { max_attempts: 2000 });

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let solution = solver.solve(&puzzle, &mut rng).unwrap();
        info!(
            "seed {}: {} moves on attempt {}",
            seed,
            solution.moves.len(),
            solution.attempts
        );
        assert!(!solution.moves.is_empty());

        let states = puzzle.replay(&solution.moves).unwrap();
        for state in &states {
            assert_conserved(&puzzle, state);
        }
        assert!(states.last().unwrap().is_complete());
        // Nothing earlier on the path was already complete
        assert!(states.iter().rev().skip(1).all(|state| !state.is_complete()));
    }
}

#[test_log::test]
fn same_seed_same_solution() {
    let puzzle = three_color_puzzle();
    let solver = Solver::new(SolverConfig { max_attempts: 2000 });

    for seed in 0..5 {
        let first = solver
            .solve(&puzzle, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let second = solver
            .solve(&puzzle, &mut StdRng::seed_from_u64(seed))
            .unwrap();
        assert_eq!(first, second);
    }
}

#[test_log::test]
fn random_walks_keep_invariants() {
    let initial = Puzzle::sample();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..50 {
        let mut state = initial.clone();
        for _ in 0..40 {
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            for &movement in &moves {
                // No pour from a single-color tube into an empty one
                let source = &state.tubes()[movement.from];
                let dest = &state.tubes()[movement.to];
                assert!(!(dest.is_empty() && source.iter().all(|&u| u == source[0])));

                let next = state.try_move(movement).unwrap();
                assert_conserved(&initial, &next);
                assert_ne!(next.canonical_key(), state.canonical_key());
            }
            let movement = moves[rng.gen_range(0..moves.len())];
            state.apply_move(movement).unwrap();
        }
    }
}

#[test_log::test]
fn replay_rejects_illegal_paths() {
    let puzzle = Puzzle::new(2, vec![vec![A, B], vec![B, A], vec![]]).unwrap();
    let path = [Move::new(0, 2), Move::new(0, 2)];
    assert_eq!(
        puzzle.replay(&path),
        Err(PuzzleError::InvalidMove(Move::new(0, 2)))
    );
}

#[test_log::test]
fn parse_errors() {
    assert_eq!(
        Puzzle::parse("RB\nBX\n-\n", 2),
        Err(PuzzleError::UnknownUnit { line: 2, code: 'X' })
    );
    assert_eq!(
        Puzzle::parse("RRR\n-\n", 2),
        Err(PuzzleError::Overfull {
            tube: 0,
            len: 3,
            capacity: 2
        })
    );
    assert_eq!(
        Puzzle::parse("RG\nGG\n", 2),
        Err(PuzzleError::UnbalancedColor {
            unit: A,
            count: 1,
            capacity: 2
        })
    );
    assert_eq!(Puzzle::parse("# nothing\n", 2), Err(PuzzleError::EmptyPuzzle));

    let parsed = Puzzle::parse("R G\n G R \n-", 2).unwrap();
    assert_eq!(parsed.tubes(), &[vec![A, C], vec![C, A], vec![]]);
}
