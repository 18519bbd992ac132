use battleship_env::{BitGrid, BitGridError};

#[test]
fn test_bounds_checked() {
    let mut grid = BitGrid::<u64>::new(4);
    assert_eq!(
        grid.set(4, 0),
        Err(BitGridError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert!(matches!(grid.get(0, 9), Err(BitGridError::IndexOutOfBounds { .. })));
}

#[test]
fn test_get_set_clear() {
    let mut grid = BitGrid::<u16>::new(4);
    assert!(grid.is_empty());

    grid.set(1, 1).unwrap();
    assert!(grid.get(1, 1).unwrap());

    grid.clear(1, 1).unwrap();
    assert!(!grid.get(1, 1).unwrap());

    grid.set(2, 3).unwrap();
    assert!(grid.get(2, 3).unwrap());
    assert_eq!(grid.count_ones(), 1);

    grid.clear_all();
    assert!(grid.is_empty());
}

#[test]
fn test_from_iter_and_iter() {
    let grid = BitGrid::<u16>::from_iter(4, [(0, 1), (3, 3)]).unwrap();
    let bits: Vec<_> = grid.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 1), (3, 3)]);
}

#[test]
fn test_ten_by_ten_spans_two_words() {
    let grid: BitGrid = BitGrid::from_iter(10, [(0, 0), (6, 3), (9, 9)]).unwrap();
    assert_eq!(grid.count_ones(), 3);
    assert!(grid.get(6, 3).unwrap());
    assert!(grid.get(9, 9).unwrap());
    assert!(!grid.get(6, 4).unwrap());
}

#[test]
fn test_intersects_and_union() {
    let mut a: BitGrid = BitGrid::from_iter(5, [(0, 0), (0, 1)]).unwrap();
    let b: BitGrid = BitGrid::from_iter(5, [(0, 1), (4, 4)]).unwrap();
    let c: BitGrid = BitGrid::from_iter(5, [(2, 2)]).unwrap();
    assert!(a.intersects(&b).unwrap());
    assert!(!a.intersects(&c).unwrap());

    a.union_with(&c).unwrap();
    assert_eq!(a.count_ones(), 3);

    let other_size: BitGrid = BitGrid::new(6);
    assert_eq!(
        a.intersects(&other_size),
        Err(BitGridError::SizeMismatch { left: 5, right: 6 })
    );
}
