use battleship_env::{EnvError, Orientation, Ship};

#[test]
fn test_new_and_mask() -> Result<(), EnvError> {
    let ship = Ship::new(3, Orientation::Horizontal, 2, 1, 5)?;
    for c in 1..4 {
        assert!(ship.mask().get(2, c)?);
    }
    assert_eq!(ship.mask().count_ones(), 3);
    assert_eq!(ship.origin(), (2, 1));
    assert_eq!(ship.orientation(), Orientation::Horizontal);
    Ok(())
}

#[test]
fn test_covers_and_cells() -> Result<(), EnvError> {
    let ship = Ship::new(4, Orientation::Vertical, 0, 0, 5)?;
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    for (r, c) in cells {
        assert!(ship.covers(r, c));
    }
    assert!(!ship.covers(4, 0));
    Ok(())
}

#[test]
fn test_out_of_bounds() {
    assert_eq!(
        Ship::new(3, Orientation::Horizontal, 0, 3, 5).unwrap_err(),
        EnvError::ShipOutOfBounds
    );
    assert_eq!(
        Ship::new(2, Orientation::Vertical, 4, 0, 5).unwrap_err(),
        EnvError::ShipOutOfBounds
    );
    assert!(Ship::new(2, Orientation::Vertical, 3, 4, 5).is_ok());
}

#[test]
fn test_register_hit_and_sunk() -> Result<(), EnvError> {
    let mut ship = Ship::new(2, Orientation::Horizontal, 1, 1, 4)?;
    assert!(!ship.is_sunk());
    ship.register_hit(1, 1);
    assert_eq!(ship.hit_count(), 1);
    assert!(!ship.is_sunk());

    // repeated hit on the same cell is a no-op
    ship.register_hit(1, 1);
    assert_eq!(ship.hit_count(), 1);
    assert!(!ship.is_sunk());

    ship.register_hit(1, 2);
    assert_eq!(ship.hit_count(), 2);
    assert!(ship.is_hit(1, 2));
    assert!(ship.is_sunk());
    Ok(())
}

#[test]
fn test_far_origin_is_out_of_bounds() {
    assert_eq!(
        Ship::new(3, Orientation::Horizontal, 0, usize::MAX, 10).unwrap_err(),
        EnvError::ShipOutOfBounds
    );
    assert_eq!(
        Ship::new(3, Orientation::Vertical, usize::MAX - 1, 0, 10).unwrap_err(),
        EnvError::ShipOutOfBounds
    );
}

#[test]
fn test_clear_hits_refloats_ship() -> Result<(), EnvError> {
    let mut ship = Ship::new(2, Orientation::Horizontal, 1, 1, 4)?;
    ship.register_hit(1, 1);
    ship.register_hit(1, 2);
    assert!(ship.is_sunk());

    ship.clear_hits();
    assert!(!ship.is_sunk());
    assert_eq!(ship.hit_count(), 0);
    assert!(ship.covers(1, 2));
    Ok(())
}
