use battleship_solver::{BitBoard, BitBoardError, Mask};

#[test]
fn test_get_set() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(!bb.get(1, 2).unwrap());

    bb.set(2, 3).unwrap();
    assert!(bb.get(2, 3).unwrap());
    assert_eq!(bb.count_ones(), 2);
}

#[test]
fn test_complement_and_narrowing() {
    let row = Mask::from_cells([(4, 2), (4, 3), (4, 4)]).unwrap();
    let mut open = Mask::full() & !row;
    assert_eq!(open.count_ones(), 97);
    assert!(!open.intersects(&row));

    open &= Mask::from_cells([(0, 0), (4, 3)]).unwrap();
    assert_eq!(open.iter_set_bits().collect::<Vec<_>>(), vec![(0, 0)]);
}

#[test]
fn test_out_of_bounds() {
    let mut bb = Mask::new();
    assert_eq!(
        bb.set(10, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 10, col: 0 })
    );
    assert!(bb.get(0, 10).is_err());
    assert!(Mask::from_cells([(0, 0), (9, 10)]).is_err());
}

#[test]
fn test_from_cells_and_iter() {
    let bb = BitBoard::<u16, 4>::from_cells([(0, 1), (3, 3)]).unwrap();
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 1), (3, 3)]);
}

#[test]
fn test_intersects_and_contains_all() {
    let row = Mask::from_cells([(4, 2), (4, 3), (4, 4)]).unwrap();
    let col = Mask::from_cells([(3, 3), (4, 3), (5, 3)]).unwrap();
    let apart = Mask::from_cells([(0, 0), (0, 1)]).unwrap();

    assert!(row.intersects(&col));
    assert!(!row.intersects(&apart));
    assert!((row | col).contains_all(&row));
    assert!(!row.contains_all(&col));
    assert!(row.contains_all(&Mask::new()));
}

#[test]
fn test_full_board_uses_all_hundred_cells() {
    let full = Mask::full();
    assert_eq!(full.count_ones(), 100);
    assert!((!full).is_empty());
    assert_eq!(Mask::from_raw(u128::MAX), full);
}
