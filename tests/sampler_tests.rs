use battleship_solver::{
    sample, BoardSnapshot, CellState, ConflictIndex, ConflictStrategy, Fleet, HitPolicy,
    Placements, SampleOutcome, ShipKind, SolveError, Solver, SolverConfig,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn board_with(cells: &[((usize, usize), CellState)]) -> BoardSnapshot {
    let mut board = BoardSnapshot::new();
    for &((r, c), state) in cells {
        board.set(r, c, state).unwrap();
    }
    board
}

fn run(
    board: &BoardSnapshot,
    cycles: usize,
    policy: HitPolicy,
    seed: u64,
) -> (Placements, SampleOutcome) {
    let placements = Placements::enumerate(board, Fleet::full());
    let index = ConflictIndex::build(&placements, ConflictStrategy::Auto);
    let mut rng = SmallRng::seed_from_u64(seed);
    let outcome = sample(board, &placements, &index, cycles, policy, &mut rng).unwrap();
    (placements, outcome)
}

fn coverage_count(
    placements: &Placements,
    outcome: &SampleOutcome,
    cell: (usize, usize),
) -> u64 {
    ShipKind::ALL
        .iter()
        .flat_map(|&kind| {
            placements
                .of(kind)
                .iter()
                .zip(outcome.frequencies.of(kind))
                .filter(move |(p, _)| p.covers(cell.0, cell.1))
                .map(|(_, &n)| n)
        })
        .sum()
}

#[test]
fn test_no_room_for_carrier() {
    let mut board = BoardSnapshot::new();
    for r in 0..10 {
        for c in 0..10 {
            if (r + c) % 5 == 0 {
                board.set(r, c, CellState::Miss).unwrap();
            }
        }
    }
    let mut rng = SmallRng::seed_from_u64(1);
    let err = Solver::default().solve(&board, &mut rng).unwrap_err();
    assert_eq!(err, SolveError::NoValidPlacement(ShipKind::Carrier));
}

#[test]
fn test_all_misses() {
    let board = BoardSnapshot::from_states([[1; 10]; 10]).unwrap();
    let mut rng = SmallRng::seed_from_u64(1);
    let err = Solver::default().solve(&board, &mut rng).unwrap_err();
    assert_eq!(err, SolveError::NoValidPlacement(ShipKind::Destroyer));
}

#[test]
fn test_empty_fleet() {
    let mut rng = SmallRng::seed_from_u64(1);
    let solver = Solver::default().with_fleet(Fleet::empty());
    assert_eq!(
        solver.solve(&BoardSnapshot::new(), &mut rng),
        Err(SolveError::EmptyFleet)
    );
}

#[test]
fn test_zero_cycles_gives_zero_grid() {
    let mut rng = SmallRng::seed_from_u64(9);
    let solver = Solver::new(SolverConfig::default().with_cycles(0usize));
    let report = solver.solve_report(&BoardSnapshot::new(), &mut rng).unwrap();
    assert_eq!(report.valid_samples, 0);
    assert!(report.grid.is_all_zero());
}

#[test]
fn test_accepted_samples_respect_hits() {
    let board = board_with(&[((0, 0), CellState::Hit)]);
    let (placements, outcome) = run(&board, 20_000, HitPolicy::RequireCoverage, 5);
    assert!(outcome.valid_samples > 0);
    assert_eq!(coverage_count(&placements, &outcome, (0, 0)), outcome.valid_samples);
    for kind in ShipKind::ALL {
        assert_eq!(outcome.frequencies.total(kind), outcome.valid_samples);
    }
}

#[test]
fn test_unchecked_policy_ignores_hits() {
    let board = board_with(&[((0, 0), CellState::Hit)]);
    let (placements, outcome) = run(&board, 20_000, HitPolicy::Unchecked, 5);
    assert!(outcome.valid_samples > 0);
    assert!(coverage_count(&placements, &outcome, (0, 0)) < outcome.valid_samples);
}

#[test]
fn test_neighbor_of_hit_is_likely() {
    let board = board_with(&[((0, 0), CellState::Hit)]);
    let mut rng = SmallRng::seed_from_u64(77);
    let solver = Solver::new(SolverConfig::default().with_cycles(40_000usize));
    let grid = solver.solve(&board, &mut rng).unwrap();
    assert_eq!(grid[(0, 0)], 0.0);
    assert!(grid[(0, 1)] > grid[(5, 5)]);
    assert!(grid[(1, 0)] > grid[(5, 5)]);
}

#[test]
fn test_workers_split_budget() {
    let board = BoardSnapshot::new();
    let placements = Placements::enumerate(&board, Fleet::full());
    let index = ConflictIndex::build(&placements, ConflictStrategy::Lazy);
    let mut rng = SmallRng::seed_from_u64(3);
    let outcome = battleship_solver::sample_parallel(
        &board,
        &placements,
        &index,
        1_001,
        HitPolicy::RequireCoverage,
        4,
        &mut rng,
    )
    .unwrap();
    assert!(outcome.valid_samples > 0);
    assert!(outcome.valid_samples <= 1_001);
}
