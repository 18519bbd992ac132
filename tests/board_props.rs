use battleship_env::{EnvConfig, HiddenBoard, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_fleet_covers_exactly_17_cells(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = HiddenBoard::generate(&mut rng, &EnvConfig::default()).unwrap();

        let sizes: usize = board.ships().iter().map(|s| s.size()).sum();
        prop_assert_eq!(sizes, TOTAL_SHIP_CELLS);
        prop_assert_eq!(board.occupied_count(), TOTAL_SHIP_CELLS);

        let ships = board.ships();
        for i in 0..ships.len() {
            prop_assert_eq!(ships[i].mask().count_ones(), ships[i].size());
            for j in (i + 1)..ships.len() {
                prop_assert!(!ships[i].mask().intersects(ships[j].mask()).unwrap());
            }
        }
    }

    #[test]
    fn every_occupied_cell_has_one_owner(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = HiddenBoard::generate(&mut rng, &EnvConfig::default()).unwrap();
        for (r, c) in board.occupancy().iter_set_bits() {
            let owners = board.ships().iter().filter(|s| s.covers(r, c)).count();
            prop_assert_eq!(owners, 1);
        }
    }

    #[test]
    fn fleet_fits_other_grid_sizes(seed in any::<u64>(), grid_size in 6usize..16) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = HiddenBoard::generate(&mut rng, &EnvConfig::with_grid_size(grid_size)).unwrap();
        prop_assert_eq!(board.size(), grid_size);
        prop_assert_eq!(board.occupied_count(), TOTAL_SHIP_CELLS);
    }
}
