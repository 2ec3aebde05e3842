use battleship_solver::{
    BoardSnapshot, CellState, ConflictIndex, ConflictStrategy, Fleet, Placements, ShipKind,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn cells_overlap(placements: &Placements, a: ShipKind, i: usize, b: ShipKind, j: usize) -> bool {
    let left: HashSet<_> = placements.of(a)[i].cells().collect();
    placements.of(b)[j].cells().any(|cell| left.contains(&cell))
}

#[test]
fn test_same_kind_never_conflicts() {
    let placements = Placements::enumerate(&BoardSnapshot::new(), Fleet::full());
    let index = ConflictIndex::build(&placements, ConflictStrategy::Lazy);
    // identical placement, same kind
    assert!(!index.conflicts(ShipKind::Cruiser, 0, ShipKind::Cruiser, 0));
}

#[test]
fn test_single_kind_fleet_has_no_pairs() {
    let placements = Placements::enumerate(
        &BoardSnapshot::new(),
        Fleet::only(&[ShipKind::Destroyer]),
    );
    let index = ConflictIndex::build(&placements, ConflictStrategy::Materialized);
    assert!(index.is_materialized());
    assert_eq!(index.incompatible_pairs(), 0);
}

#[test]
fn test_strategies_agree_on_pair_count() {
    let placements = Placements::enumerate(
        &BoardSnapshot::new(),
        Fleet::only(&[ShipKind::Destroyer, ShipKind::Carrier]),
    );
    let lazy = ConflictIndex::build(&placements, ConflictStrategy::Lazy);
    let dense = ConflictIndex::build(&placements, ConflictStrategy::Materialized);
    let auto = ConflictIndex::build(&placements, ConflictStrategy::Auto);
    assert!(!lazy.is_materialized());
    assert!(auto.is_materialized());
    assert_eq!(lazy.incompatible_pairs(), dense.incompatible_pairs());
    assert!(lazy.incompatible_pairs() > 0);
}

#[test]
fn test_compatible_picks() {
    let placements = Placements::enumerate(&BoardSnapshot::new(), Fleet::full());
    let index = ConflictIndex::build(&placements, ConflictStrategy::Auto);
    // placement 0 of every kind is horizontal at (0, 0)
    let stacked: Vec<_> = ShipKind::ALL.iter().map(|&k| (k, 0)).collect();
    assert!(!index.compatible(&stacked));

    let find = |kind: ShipKind, row: usize| {
        placements
            .of(kind)
            .iter()
            .position(|p| p.origin() == (row, 0))
            .unwrap()
    };
    let spread: Vec<_> = ShipKind::ALL
        .iter()
        .enumerate()
        .map(|(row, &k)| (k, find(k, row * 2)))
        .collect();
    assert!(index.compatible(&spread));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn index_matches_cell_overlap(
        misses in proptest::collection::vec((0usize..10, 0usize..10), 0..20),
        a in 0usize..5,
        b in 0usize..5,
        i in any::<prop::sample::Index>(),
        j in any::<prop::sample::Index>(),
        lazy in any::<bool>(),
    ) {
        let mut board = BoardSnapshot::new();
        for (r, c) in misses {
            board.set(r, c, CellState::Miss).unwrap();
        }
        let placements = Placements::enumerate(&board, Fleet::full());
        let (a, b) = (ShipKind::ALL[a], ShipKind::ALL[b]);
        prop_assume!(!placements.of(a).is_empty() && !placements.of(b).is_empty());

        let strategy = if lazy { ConflictStrategy::Lazy } else { ConflictStrategy::Materialized };
        let index = ConflictIndex::build(&placements, strategy);
        let i = i.index(placements.of(a).len());
        let j = j.index(placements.of(b).len());

        let expected = a != b && cells_overlap(&placements, a, i, b, j);
        prop_assert_eq!(index.conflicts(a, i, b, j), expected);
        prop_assert_eq!(index.conflicts(b, j, a, i), expected);
    }
}
