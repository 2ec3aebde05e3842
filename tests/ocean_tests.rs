use battleship_solver::{
    BoardError, CellState, Fleet, GuessResult, Ocean, Orientation, ShipKind, Solver,
    SolverConfig, MAX_PLACEMENT_ATTEMPTS,
};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Source that always yields zero, so every random placement lands on (0, 0).
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn test_place_and_sink() -> Result<(), BoardError> {
    let mut ocean = Ocean::new();
    ocean.place(ShipKind::Destroyer, 4, 4, Orientation::Vertical)?;
    assert_eq!(ocean.ship_map().count_ones(), 2);

    assert_eq!(ocean.guess(0, 0)?, GuessResult::Miss);
    assert_eq!(ocean.guess(4, 4)?, GuessResult::Hit);
    assert!(!ocean.is_sunk(ShipKind::Destroyer));
    assert_eq!(ocean.guess(5, 4)?, GuessResult::Sink(ShipKind::Destroyer));
    assert!(ocean.is_sunk(ShipKind::Destroyer));
    assert!(ocean.all_sunk());
    assert_eq!(ocean.shots(), 3);
    Ok(())
}

#[test]
fn test_place_errors() -> Result<(), BoardError> {
    let mut ocean = Ocean::new();
    ocean.place(ShipKind::Cruiser, 2, 2, Orientation::Horizontal)?;
    assert_eq!(
        ocean.place(ShipKind::Cruiser, 7, 7, Orientation::Horizontal),
        Err(BoardError::ShipAlreadyPlaced)
    );
    assert_eq!(
        ocean.place(ShipKind::Battleship, 0, 3, Orientation::Vertical),
        Err(BoardError::ShipOverlaps)
    );
    assert_eq!(
        ocean.place(ShipKind::Carrier, 9, 6, Orientation::Horizontal),
        Err(BoardError::ShipOutOfBounds)
    );
    ocean.guess(2, 2)?;
    assert_eq!(ocean.guess(2, 2), Err(BoardError::AlreadyGuessed));
    Ok(())
}

#[test]
fn test_random_fleet() -> Result<(), BoardError> {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut ocean = Ocean::new();
    ocean.place_fleet_randomly(&mut rng, Fleet::full())?;
    assert_eq!(ocean.ship_map().count_ones(), 17);
    assert_eq!(ocean.afloat(), Fleet::full());
    for kind in ShipKind::ALL {
        assert!(ocean.placement(kind).is_some());
    }
    Ok(())
}

#[test]
fn test_random_placement_gives_up() -> Result<(), BoardError> {
    let mut ocean = Ocean::new();
    ocean.place(ShipKind::Destroyer, 0, 0, Orientation::Horizontal)?;
    assert_eq!(
        ocean.random_placement(&mut ZeroRng, ShipKind::Carrier),
        Err(BoardError::UnableToPlaceShip {
            ship: ShipKind::Carrier,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    );
    Ok(())
}

#[test]
fn test_snapshot_holds_states_only() -> Result<(), BoardError> {
    let mut ocean = Ocean::new();
    ocean.place(ShipKind::Submarine, 1, 1, Orientation::Horizontal)?;
    ocean.guess(1, 2)?;
    ocean.guess(8, 8)?;
    let snap = ocean.snapshot();
    assert_eq!(snap.get(1, 2), Some(CellState::Hit));
    assert_eq!(snap.get(8, 8), Some(CellState::Miss));
    // the unhit part of the ship stays unknown
    assert_eq!(snap.get(1, 1), Some(CellState::Unknown));
    assert_eq!(snap.unknowns().count_ones(), 98);
    Ok(())
}

#[test]
fn test_solver_sees_only_observations() -> Result<(), BoardError> {
    let mut left = Ocean::new();
    left.place(ShipKind::Destroyer, 3, 3, Orientation::Horizontal)?;
    left.place(ShipKind::Carrier, 9, 0, Orientation::Horizontal)?;
    let mut right = Ocean::new();
    right.place(ShipKind::Destroyer, 3, 2, Orientation::Horizontal)?;
    right.place(ShipKind::Carrier, 0, 9, Orientation::Vertical)?;

    for ocean in [&mut left, &mut right] {
        ocean.guess(3, 3)?;
        ocean.guess(6, 6)?;
    }
    assert_eq!(left.snapshot(), right.snapshot());

    let solver = Solver::new(SolverConfig::default().with_cycles(3_000usize));
    let a = solver
        .solve(&left.snapshot(), &mut SmallRng::seed_from_u64(8))
        .unwrap();
    let b = solver
        .solve(&right.snapshot(), &mut SmallRng::seed_from_u64(8))
        .unwrap();
    assert_eq!(a, b);
    Ok(())
}
